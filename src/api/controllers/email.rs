use std::sync::Arc;

use crate::api::dto::MessageDTO;
use crate::api::dto::group::{
    AddEmailDTO, AddEmailResponseDTO, GroupDTO, GroupsDTO, ImportSummaryDTO, UploadEmailsForm,
};
use crate::api::dto::mail::SendMailDTO;
use crate::api::dto::validation::is_group_name;
use crate::api::error::ApiResult;
use crate::api::middlewares::auth::RequireJsonWebToken;
use crate::api::middlewares::validate::Json;
use crate::domain::error::AppError;
use crate::domain::models::group::ImportEmails;
use crate::domain::services::group::GroupService;
use crate::domain::services::mail::MailService;

use actix_multipart::form::MultipartForm;
use actix_web::{HttpResponse, get, post, web::Data as State};
use validator::ValidationErrors;

use utoipa_actix_web::service_config::ServiceConfig;

pub fn routes(cfg: &mut ServiceConfig) {
    cfg.service(show_groups)
        .service(add_email)
        .service(upload_emails)
        .service(send_email);
}

#[utoipa::path(
    responses(
        (status = 200, body = GroupsDTO),
        (status = 401, body = AppError, example = json!(AppError::example_401())),
        (status = 500, body = AppError, example = json!(AppError::example_500()))
    ),
    security(("jsonwebtoken" = [])),
    tag = "Email"
)]
#[get("/showsubEmails")]
pub async fn show_groups(
    auth: RequireJsonWebToken,
    group_service: State<Arc<dyn GroupService>>,
) -> ApiResult {
    let book = group_service.groups(auth.user_id()).await?;

    Ok(HttpResponse::Ok().json(GroupsDTO::from(book)))
}

#[utoipa::path(
    responses(
        (status = 200, body = AddEmailResponseDTO, description = "Email added to the group"),
        (status = 400, body = AppError, example = json!(AppError::example_400())),
        (status = 401, body = AppError, example = json!(AppError::example_401())),
        (status = 422, body = AppError, example = json!(AppError::example_422())),
        (status = 500, body = AppError, example = json!(AppError::example_500()))
    ),
    request_body = AddEmailDTO,
    security(("jsonwebtoken" = [])),
    tag = "Email"
)]
#[post("/addsubEmail")]
pub async fn add_email(
    auth: RequireJsonWebToken,
    payload: Json<AddEmailDTO>,
    group_service: State<Arc<dyn GroupService>>,
) -> ApiResult {
    let group = group_service
        .add_email(auth.user_id(), payload.into_inner().into())
        .await?;

    Ok(HttpResponse::Ok().json(AddEmailResponseDTO {
        success: true,
        message: "Email added successfully".to_string(),
        group: GroupDTO::from(group),
    }))
}

#[utoipa::path(
    responses(
        (status = 200, body = ImportSummaryDTO, description = "Addresses imported into the group"),
        (status = 400, body = AppError, example = json!(AppError::example_400())),
        (status = 401, body = AppError, example = json!(AppError::example_401())),
        (status = 422, body = AppError, example = json!(AppError::example_422())),
        (status = 500, body = AppError, example = json!(AppError::example_500()))
    ),
    request_body(
        content_type = "multipart/form-data",
        description = "`myFile`: text or CSV file of addresses, `groupName`: optional target group"
    ),
    security(("jsonwebtoken" = [])),
    tag = "Email"
)]
#[post("/uploadEmails")]
pub async fn upload_emails(
    auth: RequireJsonWebToken,
    payload: MultipartForm<UploadEmailsForm>,
    group_service: State<Arc<dyn GroupService>>,
) -> ApiResult {
    let form = payload.into_inner();

    // The temp file is unlinked when `file` drops, on every return path.
    let file = form
        .file
        .ok_or_else(|| AppError::BadRequest("File is required"))?;

    let group_name = form.group_name.map(|name| name.into_inner());

    if let Some(Err(error)) = group_name.as_deref().map(is_group_name) {
        let mut errors = ValidationErrors::new();
        errors.add("groupName", error);
        return Err(errors.into());
    }

    let bytes = tokio::fs::read(file.file.path())
        .await
        .map_err(|err| AppError::InternalError().trace(&err.to_string()))?;
    drop(file);

    let request = ImportEmails {
        group_name,
        content: String::from_utf8_lossy(&bytes).into_owned(),
    };

    let admitted = group_service
        .import_emails(auth.user_id(), request)
        .await?;

    Ok(HttpResponse::Ok().json(ImportSummaryDTO::from(admitted)))
}

#[utoipa::path(
    responses(
        (status = 200, body = MessageDTO, description = "Email sent"),
        (status = 400, body = AppError, example = json!(AppError::example_400())),
        (status = 401, body = AppError, example = json!(AppError::example_401())),
        (status = 404, body = AppError, example = json!(AppError::example_404())),
        (status = 422, body = AppError, example = json!(AppError::example_422())),
        (status = 500, body = AppError, example = json!(AppError::example_500()))
    ),
    request_body = SendMailDTO,
    security(("jsonwebtoken" = [])),
    tag = "Email"
)]
#[post("/sendEmail")]
pub async fn send_email(
    auth: RequireJsonWebToken,
    payload: Json<SendMailDTO>,
    mail_service: State<Arc<dyn MailService>>,
) -> ApiResult {
    mail_service
        .send(auth.user_id(), payload.into_inner().into())
        .await?;

    Ok(HttpResponse::Ok().json(MessageDTO::new("Email sent successfully")))
}
