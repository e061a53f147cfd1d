use std::sync::Arc;

use crate::api::dto::MessageDTO;
use crate::api::dto::user::{
    LoginDTO, LoginResponseDTO, RefreshResponseDTO, RegisterDTO, UpdateUserDTO, UserDTO,
    UserResponseDTO,
};
use crate::api::error::ApiResult;
use crate::api::middlewares::auth::RequireJsonWebToken;
use crate::api::middlewares::validate::Json;
use crate::config::WebConfig;
use crate::domain::error::{AppError, AppResult};
use crate::domain::models::jsonwebtoken::{Token, TokenKind};
use crate::domain::services::jsonwebtoken::JsonWebTokenService;
use crate::domain::services::user::UserService;

use actix_web::{
    HttpRequest, HttpResponse,
    cookie::time::OffsetDateTime,
    cookie::{Cookie, SameSite},
    get, post,
    web::Data as State,
};

use utoipa_actix_web::service_config::ServiceConfig;

pub const REFRESH_COOKIE: &str = "refreshToken";
const REFRESH_COOKIE_PATH: &str = "/api/auth";

pub fn routes(cfg: &mut ServiceConfig) {
    cfg.service(register)
        .service(login)
        .service(refresh)
        .service(logout)
        .service(profile)
        .service(update);
}

fn refresh_cookie(token: &Token, web: &WebConfig) -> AppResult<Cookie<'static>> {
    let expires = OffsetDateTime::from_unix_timestamp(token.expiration)
        .map_err(|err| AppError::InternalError().trace(&err.to_string()))?;

    let same_site = if web.secure_cookies {
        SameSite::Strict
    } else {
        SameSite::Lax
    };

    Ok(Cookie::build(REFRESH_COOKIE, token.token.clone())
        .http_only(true)
        .secure(web.secure_cookies)
        .path(REFRESH_COOKIE_PATH)
        .same_site(same_site)
        .expires(expires)
        .finish())
}

#[utoipa::path(
    responses(
        (status = 201, body = UserResponseDTO, description = "User registered"),
        (status = 400, body = AppError, example = json!(AppError::example_400())),
        (status = 409, body = AppError, example = json!(AppError::example_409())),
        (status = 422, body = AppError, example = json!(AppError::example_422())),
        (status = 500, body = AppError, example = json!(AppError::example_500()))
    ),
    request_body = RegisterDTO,
    tag = "Auth",
)]
#[post("/register")]
pub async fn register(
    payload: Json<RegisterDTO>,
    user_service: State<Arc<dyn UserService>>,
) -> ApiResult {
    let user = user_service.register(payload.into_inner().into()).await?;

    Ok(HttpResponse::Created().json(UserResponseDTO {
        user: UserDTO::from(user),
    }))
}

#[utoipa::path(
    responses(
        (status = 200, body = LoginResponseDTO, description = "Sets the refresh token cookie"),
        (status = 400, body = AppError, example = json!(AppError::example_400())),
        (status = 401, body = AppError, example = json!(AppError::example_401())),
        (status = 422, body = AppError, example = json!(AppError::example_422())),
        (status = 500, body = AppError, example = json!(AppError::example_500()))
    ),
    request_body = LoginDTO,
    tag = "Auth"
)]
#[post("/login")]
pub async fn login(
    payload: Json<LoginDTO>,
    user_service: State<Arc<dyn UserService>>,
    jsonwebtoken_service: State<Arc<dyn JsonWebTokenService>>,
    web: State<WebConfig>,
) -> ApiResult {
    let user = user_service.login(payload.into_inner().into()).await?;

    let access_token = jsonwebtoken_service.generate_token(user.id.clone(), TokenKind::Access)?;
    let refresh_token = jsonwebtoken_service.generate_token(user.id.clone(), TokenKind::Refresh)?;

    Ok(HttpResponse::Ok()
        .cookie(refresh_cookie(&refresh_token, &web)?)
        .json(LoginResponseDTO {
            user_exist: UserDTO::from(user),
            access_token: access_token.token,
        }))
}

#[utoipa::path(
    responses(
        (status = 200, body = RefreshResponseDTO, description = "Rotates the refresh token cookie"),
        (status = 401, body = AppError, example = json!(AppError::example_401())),
        (status = 500, body = AppError, example = json!(AppError::example_500()))
    ),
    tag = "Auth"
)]
#[post("/refresh")]
pub async fn refresh(
    req: HttpRequest,
    user_service: State<Arc<dyn UserService>>,
    jsonwebtoken_service: State<Arc<dyn JsonWebTokenService>>,
    web: State<WebConfig>,
) -> ApiResult {
    let cookie = req.cookie(REFRESH_COOKIE).ok_or_else(AppError::Unauthorized)?;

    let claims = jsonwebtoken_service.validate_token(cookie.value(), TokenKind::Refresh)?;

    let user = match user_service.profile(&claims.sub).await {
        Ok(user) => user,
        Err(error) if error.code == 404 => return Err(AppError::Unauthorized()),
        Err(error) => return Err(error),
    };

    let access_token = jsonwebtoken_service.generate_token(user.id.clone(), TokenKind::Access)?;
    let refresh_token = jsonwebtoken_service.generate_token(user.id.clone(), TokenKind::Refresh)?;

    Ok(HttpResponse::Ok()
        .cookie(refresh_cookie(&refresh_token, &web)?)
        .json(RefreshResponseDTO {
            access_token: access_token.token,
            user: UserDTO::from(user),
        }))
}

#[utoipa::path(
    responses(
        (status = 200, body = MessageDTO, description = "Clears the refresh token cookie"),
        (status = 401, body = AppError, example = json!(AppError::example_401()))
    ),
    security(("jsonwebtoken" = [])),
    tag = "Auth"
)]
#[post("/logout")]
pub async fn logout(_auth: RequireJsonWebToken) -> ApiResult {
    let mut cookie = Cookie::build(REFRESH_COOKIE, "")
        .http_only(true)
        .path(REFRESH_COOKIE_PATH)
        .finish();
    cookie.make_removal();

    Ok(HttpResponse::Ok()
        .cookie(cookie)
        .json(MessageDTO::new("Logged out")))
}

#[utoipa::path(
    responses(
        (status = 200, body = UserResponseDTO),
        (status = 401, body = AppError, example = json!(AppError::example_401())),
        (status = 404, body = AppError, example = json!(AppError::example_404()))
    ),
    security(("jsonwebtoken" = [])),
    tag = "Auth"
)]
#[get("/profile")]
pub async fn profile(
    auth: RequireJsonWebToken,
    user_service: State<Arc<dyn UserService>>,
) -> ApiResult {
    let user = user_service.profile(auth.user_id()).await?;

    Ok(HttpResponse::Ok().json(UserResponseDTO {
        user: UserDTO::from(user),
    }))
}

#[utoipa::path(
    responses(
        (status = 200, body = UserResponseDTO, description = "Sending accounts replaced"),
        (status = 400, body = AppError, example = json!(AppError::example_400())),
        (status = 401, body = AppError, example = json!(AppError::example_401())),
        (status = 404, body = AppError, example = json!(AppError::example_404())),
        (status = 422, body = AppError, example = json!(AppError::example_422()))
    ),
    request_body = UpdateUserDTO,
    security(("jsonwebtoken" = [])),
    tag = "Auth"
)]
#[post("/update")]
pub async fn update(
    auth: RequireJsonWebToken,
    payload: Json<UpdateUserDTO>,
    user_service: State<Arc<dyn UserService>>,
) -> ApiResult {
    let accounts = payload
        .into_inner()
        .email_accounts
        .into_iter()
        .map(Into::into)
        .collect();

    let user = user_service
        .update_email_accounts(auth.user_id(), accounts)
        .await?;

    Ok(HttpResponse::Ok().json(UserResponseDTO {
        user: UserDTO::from(user),
    }))
}
