use crate::domain::{
    error::AppResult,
    models::jsonwebtoken::{Claims, Token, TokenKind},
};

pub trait JsonWebTokenService: 'static + Sync + Send {
    fn generate_token(&self, id: String, kind: TokenKind) -> AppResult<Token>;
    fn validate_token(&self, token: &str, kind: TokenKind) -> AppResult<Claims>;
}
