use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::Regex;
use validator::ValidationError;

static STRONG_PASSWORD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:[^A-Z]*[A-Z])[^a-z]*[a-z][^0-9]*[0-9][^#?!@$%^&*-]*[#?!@$%^&*-].*$").unwrap()
});

static EMAIL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").unwrap());

fn invalid(message: &'static str) -> ValidationError {
    ValidationError::new("0").with_message(Cow::from(message))
}

pub fn is_email(email: &str) -> Result<(), ValidationError> {
    let email = email.trim();

    if email.len() < 3 || email.len() > 255 {
        return Err(invalid("Email must contain between 3 and 255 characters"));
    }

    if !EMAIL_REGEX.is_match(email) {
        return Err(invalid("Invalid email format"));
    }

    Ok(())
}

pub fn is_password(password: &str) -> Result<(), ValidationError> {
    if password.len() < 8 || password.len() > 72 {
        return Err(invalid("Password must contain between 8 and 72 characters"));
    }

    if !STRONG_PASSWORD.is_match(password) {
        return Err(invalid(
            "Password must contain at least one uppercase letter, one lowercase letter, one digit and one special character",
        ));
    }

    Ok(())
}

pub fn is_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().len() < 3 {
        return Err(invalid("Name must have at least 3 characters"));
    }

    Ok(())
}

pub fn is_group_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().chars().count() > 50 {
        return Err(invalid("Group name must have at most 50 characters"));
    }

    Ok(())
}

pub fn is_app_password(password: &str) -> Result<(), ValidationError> {
    if password.trim().is_empty() {
        return Err(invalid("App password is required"));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::*;

    #[rstest]
    #[case::plain("john@mail.com")]
    #[case::padded("  john@mail.com ")]
    #[case::plus("john+news@sub.mail.co")]
    fn test_valid_emails(#[case] email: &str) {
        assert!(is_email(email).is_ok());
    }

    #[rstest]
    #[case::no_at("john.mail.com")]
    #[case::no_tld("john@localhost")]
    #[case::too_short("a@")]
    fn test_invalid_emails(#[case] email: &str) {
        assert!(is_email(email).is_err());
    }

    #[test]
    fn test_group_name_length() {
        assert!(is_group_name("Newsletter").is_ok());
        assert!(is_group_name("").is_ok());
        assert!(is_group_name(&"g".repeat(51)).is_err());
    }
}
