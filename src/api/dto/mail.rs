use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::api::dto::validation::is_email;
use crate::domain::models::mail::OutgoingMail;

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct SendMailDTO {
    #[validate(custom(function = "is_email"))]
    #[schema(examples("sender@gmail.com"))]
    pub from: String,

    /// A single address or a comma-separated list.
    #[schema(examples("john@mail.com"))]
    pub to: Option<String>,

    #[schema(examples(json!(["john@mail.com", "jane@mail.com"])))]
    pub bcc: Option<Vec<String>>,

    #[validate(length(min = 1, max = 998, message = "Subject must contain between 1 and 998 characters"))]
    #[schema(examples("Hello"))]
    pub subject: String,

    #[schema(examples("This is a test email"))]
    pub text: Option<String>,

    #[schema(examples("<b>This is a test email</b>"))]
    pub html: Option<String>,
}

fn addresses<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    values
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
        .collect()
}

impl From<SendMailDTO> for OutgoingMail {
    fn from(dto: SendMailDTO) -> Self {
        let to = dto
            .to
            .as_deref()
            .map(|to| addresses(to.split(',')))
            .unwrap_or_default();

        let bcc = dto
            .bcc
            .as_deref()
            .map(|bcc| addresses(bcc.iter().map(String::as_str)))
            .unwrap_or_default();

        OutgoingMail {
            from: dto.from.trim().to_string(),
            to,
            bcc,
            subject: dto.subject,
            text: dto.text.filter(|text| !text.is_empty()),
            html: dto.html.filter(|html| !html.is_empty()),
        }
    }
}
