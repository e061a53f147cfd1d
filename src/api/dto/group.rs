use actix_multipart::form::{MultipartForm, tempfile::TempFile, text::Text};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::api::dto::validation::{is_email, is_group_name};
use crate::domain::capacity::Admitted;
use crate::domain::models::group::{AddEmail, EmailGroup, GroupBook};

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GroupDTO {
    #[schema(examples("General"))]
    group_name: String,
    #[schema(examples(json!(["john@mail.com", "jane@mail.com"])))]
    emails: Vec<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct GroupsDTO {
    groups: Vec<GroupDTO>,
}

#[derive(Debug, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AddEmailDTO {
    #[validate(custom(function = "is_email"))]
    #[schema(examples("john@mail.com"))]
    pub email: String,

    #[validate(custom(function = "is_group_name"))]
    #[schema(examples("General"))]
    pub group_name: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AddEmailResponseDTO {
    #[schema(examples(true))]
    pub success: bool,
    #[schema(examples("Email added successfully"))]
    pub message: String,
    pub group: GroupDTO,
}

/// Multipart body of a bulk import: the address file plus an optional
/// target group name.
#[derive(Debug, MultipartForm)]
pub struct UploadEmailsForm {
    #[multipart(rename = "myFile")]
    pub file: Option<TempFile>,
    #[multipart(rename = "groupName")]
    pub group_name: Option<Text<String>>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ImportSummaryDTO {
    #[schema(examples(true))]
    success: bool,
    #[schema(examples("Bulk upload successful"))]
    message: String,
    #[schema(examples("General"))]
    group_name: String,
    #[schema(examples(120))]
    added: usize,
    #[schema(examples(3))]
    skipped: usize,
    #[schema(examples(240))]
    total_emails_in_group: usize,
}

impl From<EmailGroup> for GroupDTO {
    fn from(group: EmailGroup) -> Self {
        GroupDTO {
            group_name: group.name,
            emails: group.emails,
        }
    }
}

impl From<GroupBook> for GroupsDTO {
    fn from(book: GroupBook) -> Self {
        GroupsDTO {
            groups: book.groups.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<AddEmailDTO> for AddEmail {
    fn from(dto: AddEmailDTO) -> Self {
        AddEmail {
            group_name: dto.group_name,
            email: dto.email,
        }
    }
}

impl From<Admitted> for ImportSummaryDTO {
    fn from(admitted: Admitted) -> Self {
        ImportSummaryDTO {
            success: true,
            message: "Bulk upload successful".to_string(),
            group_name: admitted.group,
            added: admitted.added,
            skipped: admitted.skipped,
            total_emails_in_group: admitted.group_size,
        }
    }
}
