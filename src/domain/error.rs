use actix_web::{
    HttpResponse, ResponseError,
    http::{StatusCode, header::ContentType},
    web::Json,
};

use actix_web::error::JsonPayloadError;

use validator::{ValidationError, ValidationErrors, ValidationErrorsKind};

use serde::Serialize;
use utoipa::ToSchema;

use serde_json::{Map, Value, to_string};

use argon2::password_hash::errors::Error::{self as Argon2Error, Password};

use crate::domain::capacity::CapacityError;
use crate::domain::repositories::repository::RepositoryError;
use crate::domain::services::mailer::MailerError;

pub type AppResult<T> = core::result::Result<T, AppError>;

macro_rules! static_error {
    ($name:ident, $status:expr) => {
        #[allow(non_snake_case, missing_docs)]
        pub fn $name(message: impl ToString) -> AppError {
            AppError {
                message: message.to_string(),
                code: $status.as_u16(),
                trace: None,
            }
        }
    };

    ($name:ident, $status:expr, $default:expr) => {
        #[allow(non_snake_case, missing_docs)]
        pub fn $name() -> AppError {
            AppError {
                message: $default.to_string(),
                code: $status.as_u16(),
                trace: None,
            }
        }
    };
}

/// Body of every error response. `trace` carries the underlying cause for
/// the logs and is never sent to the client.
#[derive(Debug, PartialEq, Eq, Serialize, ToSchema)]
pub struct AppError {
    pub message: String,
    pub code: u16,
    #[serde(skip)]
    pub trace: Option<String>,
}

#[rustfmt::skip]
pub mod message {
    pub static CONFLICT: &str = "Conflict with the current state of the resource";
    pub static NOT_FOUND: &str = "The server cannot find the requested resource";
    pub static UNAUTHORIZED: &str = "The request was not successful because it lacks valid authentication credentials";
    pub static UNPROCESSABLE_ENTITY: &str = "The server was unable to process the request because it contains invalid data";
    pub static BAD_REQUEST: &str = "The server would not process the request due to something the server considered to be a client error";
    pub static INTERNAL_ERROR: &str = "The server encountered an unexpected condition that prevented it from fulfilling the request";
}

#[rustfmt::skip]
impl AppError {
    static_error!(BadRequest, StatusCode::BAD_REQUEST);
    static_error!(NotFound, StatusCode::NOT_FOUND);
    static_error!(Conflict, StatusCode::CONFLICT);
    static_error!(UnprocessableEntity, StatusCode::UNPROCESSABLE_ENTITY);
    static_error!(ServerError, StatusCode::INTERNAL_SERVER_ERROR);

    static_error!(Unauthorized, StatusCode::UNAUTHORIZED, message::UNAUTHORIZED);
    static_error!(InternalError, StatusCode::INTERNAL_SERVER_ERROR, message::INTERNAL_ERROR);

    pub fn trace(mut self, cause: &str) -> AppError {
        self.trace = Some(cause.to_owned());
        self
    }

    pub fn example_400() -> AppError { AppError::BadRequest(message::BAD_REQUEST) }
    pub fn example_401() -> AppError { AppError::Unauthorized() }
    pub fn example_404() -> AppError { AppError::NotFound(message::NOT_FOUND) }
    pub fn example_409() -> AppError { AppError::Conflict(message::CONFLICT) }
    pub fn example_422() -> AppError { AppError::UnprocessableEntity(message::UNPROCESSABLE_ENTITY) }
    pub fn example_500() -> AppError { AppError::InternalError() }
}

impl std::error::Error for AppError {}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Error {}: {}", self.code, self.message)
    }
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        match &self.trace {
            Some(trace) if self.code >= 500 => {
                tracing::error!(code = self.code, trace = %trace, "{}", self.message)
            }
            Some(trace) => tracing::debug!(code = self.code, trace = %trace, "{}", self.message),
            None => {}
        }

        HttpResponse::build(self.status_code())
            .content_type(ContentType::json())
            .json(Json(self))
    }

    fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

impl From<RepositoryError> for AppError {
    fn from(error: RepositoryError) -> Self {
        AppError::InternalError().trace(&error.to_string())
    }
}

/// Unreachable relays and rejected logins surface as 500 with the
/// transport's message; malformed addresses are the caller's fault.
impl From<MailerError> for AppError {
    fn from(error: MailerError) -> Self {
        match error {
            MailerError::Transport(message) => AppError::ServerError(message),
            _ => AppError::BadRequest(error),
        }
    }
}

impl From<CapacityError> for AppError {
    fn from(error: CapacityError) -> Self {
        AppError::BadRequest(error)
    }
}

impl From<Argon2Error> for AppError {
    fn from(error: Argon2Error) -> Self {
        match error {
            Password => AppError::Unauthorized(),
            _ => AppError::InternalError().trace(&error.to_string()),
        }
    }
}

/// Flattens nested validation failures into a `{"path": "message"}` object,
/// e.g. `emailAccounts[1].email`, and serializes it as the 422 message.
impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        let mut fields = Map::new();
        collect_field_errors(&errors, None, &mut fields);

        AppError::UnprocessableEntity(to_string(&fields).unwrap_or_default())
    }
}

fn collect_field_errors(errors: &ValidationErrors, prefix: Option<&str>, out: &mut Map<String, Value>) {
    for (field, kind) in errors.errors() {
        let path = match prefix {
            Some(prefix) => format!("{prefix}.{field}"),
            None => field.to_string(),
        };

        match kind {
            ValidationErrorsKind::Field(field_errors) => {
                for error in field_errors {
                    out.insert(path.clone(), Value::String(describe(error)));
                }
            }
            ValidationErrorsKind::Struct(nested) => collect_field_errors(nested, Some(&path), out),
            ValidationErrorsKind::List(items) => {
                for (index, nested) in items {
                    collect_field_errors(nested, Some(&format!("{path}[{index}]")), out);
                }
            }
        }
    }
}

fn describe(error: &ValidationError) -> String {
    error
        .message
        .as_ref()
        .map(|message| message.to_string())
        .unwrap_or_else(|| error.code.to_string())
}

impl From<JsonPayloadError> for AppError {
    fn from(error: JsonPayloadError) -> Self {
        AppError::BadRequest(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use validator::Validate;

    #[derive(Debug, Validate)]
    struct Signup {
        #[validate(length(min = 3, message = "Name must have at least 3 characters"))]
        name: String,

        #[validate(email(message = "Invalid email format"))]
        email: String,

        #[validate(nested)]
        settings: Settings,

        #[validate(nested)]
        accounts: Vec<Account>,
    }

    #[derive(Debug, Validate)]
    struct Settings {
        #[validate(range(min = 1, max = 5, message = "Between 1 and 5 groups"))]
        groups: u8,
    }

    #[derive(Debug, Validate)]
    struct Account {
        #[validate(email(message = "Invalid sender address"))]
        email: String,
    }

    #[test]
    fn test_validation_errors_are_flattened() {
        let signup = Signup {
            name: "ab".to_string(),
            email: "invalid-email".to_string(),
            settings: Settings { groups: 9 },
            accounts: vec![
                Account {
                    email: "sender@gmail.com".to_string(),
                },
                Account {
                    email: "sender".to_string(),
                },
            ],
        };

        let app_error: AppError = signup.validate().unwrap_err().into();
        let message = serde_json::from_str::<Value>(&app_error.message).unwrap();

        assert_eq!(app_error.code, 422);
        assert_eq!(
            message,
            json!({
                "accounts[1].email": "Invalid sender address",
                "email": "Invalid email format",
                "name": "Name must have at least 3 characters",
                "settings.groups": "Between 1 and 5 groups"
            })
        );
    }

    #[test]
    fn test_capacity_error_is_bad_request() {
        let app_error: AppError = CapacityError::GroupLimitExceeded.into();

        assert_eq!(app_error.message, "Maximum 5 groups allowed!");
        assert_eq!(app_error.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_transport_failure_is_server_error() {
        let app_error: AppError = MailerError::Transport("connection refused".to_string()).into();

        assert_eq!(app_error.code, 500);
        assert_eq!(app_error.message, "connection refused");
    }

    #[test]
    fn test_trace_is_not_serialized() {
        let app_error = AppError::InternalError().trace("connection reset");
        let body = serde_json::to_value(&app_error).unwrap();

        assert_eq!(app_error.trace.as_deref(), Some("connection reset"));
        assert_eq!(
            body,
            json!({ "code": 500, "message": message::INTERNAL_ERROR })
        );
    }
}
