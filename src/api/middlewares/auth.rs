use crate::domain::error::AppError;
use crate::domain::models::jsonwebtoken::{Claims, TokenKind};
use crate::domain::services::jsonwebtoken::JsonWebTokenService;
use actix_web::dev::Payload;
use actix_web::http::header;
use actix_web::{FromRequest, HttpRequest, web};
use futures::future::{Ready, err, ok};
use std::sync::Arc;

/// Guards a route behind a valid access token sent as
/// `Authorization: Bearer <token>`.
#[derive(Debug)]
pub struct RequireJsonWebToken {
    pub claims: Claims,
}

impl RequireJsonWebToken {
    pub fn user_id(&self) -> &str {
        &self.claims.sub
    }
}

fn get_token(req: &HttpRequest) -> Result<&str, AppError> {
    let value = req
        .headers()
        .get(header::AUTHORIZATION)
        .ok_or_else(AppError::Unauthorized)?
        .to_str()
        .map_err(|_| AppError::Unauthorized())?;

    value
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(AppError::Unauthorized)
}

impl FromRequest for RequireJsonWebToken {
    type Error = AppError;
    type Future = Ready<Result<RequireJsonWebToken, AppError>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let Some(jsonwebtoken_service) = req.app_data::<web::Data<Arc<dyn JsonWebTokenService>>>()
        else {
            return err(AppError::InternalError().trace("JsonWebTokenService is not defined"));
        };

        match get_token(req)
            .and_then(|token| jsonwebtoken_service.validate_token(token, TokenKind::Access))
        {
            Ok(claims) => ok(RequireJsonWebToken { claims }),
            Err(error) => err(error),
        }
    }
}
