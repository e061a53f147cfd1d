pub mod group;
pub mod mail;
pub mod user;
pub mod validation;

use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct MessageDTO {
    #[schema(examples(true))]
    pub success: bool,
    #[schema(examples("Logged out"))]
    pub message: String,
}

impl MessageDTO {
    pub fn new(message: &str) -> Self {
        MessageDTO {
            success: true,
            message: message.to_string(),
        }
    }
}
