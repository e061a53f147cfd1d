use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct AppConfig {
    pub service: ServiceConfig,
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub surrealdb: SurrealDbConfig,
    pub jsonwebtoken: JsonWebTokenConfig,
    pub smtp: SmtpConfig,
    pub web: WebConfig,
}

#[derive(Debug, Serialize, Deserialize, Default)]
pub struct JsonWebTokenConfig {
    pub public_keyfile: String,
    pub private_keyfile: String,
    pub access_token_minutes: i64,
    pub refresh_token_days: i64,
}

#[derive(Debug, Serialize, Deserialize, Default)]
pub struct ServiceConfig {
    pub name: String,
}

#[derive(Debug, Serialize, Deserialize, Default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Serialize, Deserialize, Default)]
pub struct LoggingConfig {
    pub level: String,
    /// Export spans through OTLP in addition to the JSON log output.
    pub otlp: bool,
}

#[derive(Debug, Serialize, Deserialize, Default)]
pub struct SurrealDbConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub namespace: String,
    pub database: String,
    pub migration: bool,
}

#[derive(Debug, Serialize, Deserialize, Default)]
pub struct SmtpConfig {
    pub relay: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct WebConfig {
    pub allowed_origin: String,
    pub secure_cookies: bool,
    /// Maximum accepted size of an uploaded address file, in bytes.
    pub upload_limit: usize,
}

impl AppConfig {
    pub fn load() -> Result<Self, figment::Error> {
        Figment::new()
            .merge(Serialized::defaults(AppConfig {
                service: ServiceConfig {
                    name: "group-mailer".to_string(),
                },
                server: ServerConfig {
                    host: "127.0.0.1".to_string(),
                    port: 4000,
                },
                logging: LoggingConfig {
                    level: "info".to_string(),
                    otlp: false,
                },
                jsonwebtoken: JsonWebTokenConfig {
                    public_keyfile: "config/public_key.pem".to_string(),
                    private_keyfile: "config/private_key.pem".to_string(),
                    access_token_minutes: 15,
                    refresh_token_days: 7,
                },
                surrealdb: SurrealDbConfig {
                    host: "localhost".to_string(),
                    port: 8000,
                    username: "root".to_string(),
                    password: "root".to_string(),
                    namespace: "test".to_string(),
                    database: "test".to_string(),
                    migration: true,
                },
                smtp: SmtpConfig {
                    relay: "smtp.gmail.com".to_string(),
                    port: 465,
                },
                web: WebConfig {
                    allowed_origin: "http://localhost:5173".to_string(),
                    secure_cookies: false,
                    upload_limit: 1024 * 1024,
                },
            }))
            .merge(Toml::file("config/default.toml"))
            .merge(Toml::file(format!(
                "config/{}.toml",
                std::env::var("RUST_ENV").unwrap_or("development".to_string())
            )))
            .merge(Env::prefixed("APP_").split("__"))
            .extract()
    }
}
