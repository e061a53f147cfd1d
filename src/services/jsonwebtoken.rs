use crate::domain::error::{AppError, AppResult};
use crate::domain::models::jsonwebtoken::{Claims, Token, TokenKind};
use crate::domain::services::jsonwebtoken::JsonWebTokenService;
use chrono::{Duration, Utc};
use jsonwebtoken::errors::{Error as JsonWebTokenError, ErrorKind};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};

#[derive(Clone)]
pub struct KeyPair {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl KeyPair {
    pub fn from_rsa_pem(
        private_key: Vec<u8>,
        public_key: Vec<u8>,
    ) -> Result<Self, JsonWebTokenError> {
        Ok(KeyPair {
            encoding: EncodingKey::from_rsa_pem(&private_key)?,
            decoding: DecodingKey::from_rsa_pem(&public_key)?,
        })
    }
}

#[derive(Debug, Clone, Copy)]
pub struct TokenLifetimes {
    pub access: Duration,
    pub refresh: Duration,
}

impl Default for TokenLifetimes {
    fn default() -> Self {
        Self {
            access: Duration::minutes(15),
            refresh: Duration::days(7),
        }
    }
}

pub struct JsonWebTokenServiceImpl {
    keys: KeyPair,
    lifetimes: TokenLifetimes,
}

impl JsonWebTokenServiceImpl {
    pub fn new(keys: KeyPair, lifetimes: TokenLifetimes) -> Self {
        JsonWebTokenServiceImpl { keys, lifetimes }
    }

    fn lifetime(&self, kind: TokenKind) -> Duration {
        match kind {
            TokenKind::Access => self.lifetimes.access,
            TokenKind::Refresh => self.lifetimes.refresh,
        }
    }
}

impl JsonWebTokenService for JsonWebTokenServiceImpl {
    fn generate_token(&self, id: String, kind: TokenKind) -> AppResult<Token> {
        let now = Utc::now();

        let expiration = now
            .checked_add_signed(self.lifetime(kind))
            .ok_or_else(|| AppError::InternalError().trace("token expiration overflow"))?
            .timestamp();

        let iat = now.timestamp();

        let claims = Claims {
            sub: id,
            exp: expiration as usize,
            iat: iat as usize,
            kind,
        };

        let header = Header::new(Algorithm::RS256);

        let token = encode(&header, &claims, &self.keys.encoding)
            .map_err(|err| AppError::InternalError().trace(&err.to_string()))?;

        Ok(Token { token, expiration })
    }

    fn validate_token(&self, token: &str, kind: TokenKind) -> AppResult<Claims> {
        let mut validation = Validation::new(Algorithm::RS256);
        validation.validate_nbf = true;

        match decode::<Claims>(token, &self.keys.decoding, &validation) {
            Ok(token) if token.claims.kind == kind => Ok(token.claims),
            Ok(_) => Err(AppError::Unauthorized()),
            Err(error) => match error.kind() {
                ErrorKind::InvalidEcdsaKey
                | ErrorKind::InvalidRsaKey(_)
                | ErrorKind::RsaFailedSigning
                | ErrorKind::InvalidKeyFormat
                | ErrorKind::MissingAlgorithm
                | ErrorKind::Crypto(_) => {
                    Err(AppError::InternalError().trace(&format!("{error:?}")))
                }
                _ => Err(AppError::Unauthorized()),
            },
        }
    }
}
