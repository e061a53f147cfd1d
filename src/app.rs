use actix_multipart::form::MultipartFormConfig;
use actix_web::{
    App, HttpMessage,
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    http::header,
    middleware::{Next, from_fn},
    web,
};

use tracing_actix_web::{RequestId, TracingLogger};

use actix_cors::Cors;

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::openapi::{Components, OpenApi, Server};
use utoipa_actix_web::AppExt;
use utoipa_swagger_ui::SwaggerUi;

use crate::api;
use crate::config::WebConfig;
use crate::container::Container;
use crate::domain::error::AppError;

use std::sync::Arc;

pub fn create(
    container: Arc<Container>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Response = ServiceResponse<impl MessageBody>,
        Config = (),
        InitError = (),
        Error = actix_web::Error,
    >,
> {
    App::new()
        .into_utoipa_app()
        .openapi(docs())
        .configure(api::routes)
        .openapi_service(|api| {
            SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", api)
        })
        .into_app()
        .wrap(TracingLogger::default())
        .wrap(cors(&container.web))
        .wrap(from_fn(request_headers))
        .app_data(web::Data::new(container.user_service.clone()))
        .app_data(web::Data::new(container.group_service.clone()))
        .app_data(web::Data::new(container.mail_service.clone()))
        .app_data(web::Data::new(container.jsonwebtoken_service.clone()))
        .app_data(web::Data::new(container.web.clone()))
        .app_data(upload_config(&container.web))
}

fn upload_config(web: &WebConfig) -> MultipartFormConfig {
    MultipartFormConfig::default()
        .total_limit(web.upload_limit)
        .memory_limit(web.upload_limit)
        .error_handler(|err, _| AppError::BadRequest(err.to_string()).into())
}

/// The browser client sends the refresh cookie, so the single allowed
/// origin is paired with credential support.
fn cors(web: &WebConfig) -> Cors {
    Cors::default()
        .allowed_origin(&web.allowed_origin)
        .allowed_methods(vec!["GET", "POST"])
        .allowed_headers(&[header::AUTHORIZATION, header::ACCEPT, header::CONTENT_TYPE])
        .supports_credentials()
        .block_on_origin_mismatch(false)
        .max_age(3600)
}

async fn request_headers(
    req: ServiceRequest,
    svc: Next<impl MessageBody>,
) -> Result<ServiceResponse<impl MessageBody>, actix_web::Error> {
    let request_id = req.extensions().get::<RequestId>().copied();
    let mut res = svc.call(req).await?;

    if let Some(value) =
        request_id.and_then(|id| header::HeaderValue::from_str(&id.to_string()).ok())
    {
        res.headers_mut()
            .insert(header::HeaderName::from_static("x-request-id"), value);
    }
    Ok(res)
}

pub fn docs() -> OpenApi {
    let mut openapi = OpenApi::default();

    openapi.info.title = String::from("Group Mailer API");
    openapi.info.description = Some(String::from(
        "Manage recipient groups and send mail through linked Gmail accounts",
    ));
    openapi.info.version = String::from(env!("CARGO_PKG_VERSION"));

    openapi.servers = Some(vec![server("http://localhost:4000", "Localhost")]);
    openapi.components = Some(components());

    openapi
}

fn server(url: &str, description: &str) -> Server {
    Server::builder()
        .description(Some(description.to_owned()))
        .url(url.to_owned())
        .build()
}

fn components() -> Components {
    Components::builder()
        .security_scheme(
            "jsonwebtoken",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        )
        .build()
}
