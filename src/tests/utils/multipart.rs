const BOUNDARY: &str = "----group-mailer-boundary";

/// Builds an `/uploadEmails` body. Returns the content-type header value and
/// the encoded payload.
pub fn multipart_body(file: Option<&str>, group_name: Option<&str>) -> (String, String) {
    let mut body = String::new();

    if let Some(content) = file {
        body.push_str(&format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"myFile\"; filename=\"emails.csv\"\r\nContent-Type: text/csv\r\n\r\n{content}\r\n"
        ));
    }

    if let Some(name) = group_name {
        body.push_str(&format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"groupName\"\r\n\r\n{name}\r\n"
        ));
    }

    body.push_str(&format!("--{BOUNDARY}--\r\n"));

    (format!("multipart/form-data; boundary={BOUNDARY}"), body)
}
