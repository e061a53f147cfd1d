use std::sync::Arc;

use chrono::Duration;
use surrealdb::Surreal;
use surrealdb::engine::remote::ws::Client;

use crate::config::{AppConfig, WebConfig};

use crate::domain::repositories::group::GroupRepository;
use crate::domain::repositories::user::UserRepository;
use crate::domain::services::group::GroupService;
use crate::domain::services::jsonwebtoken::JsonWebTokenService;
use crate::domain::services::mail::MailService;
use crate::domain::services::mailer::Mailer;
use crate::domain::services::user::UserService;

use crate::services::group::GroupServiceImpl;
use crate::services::jsonwebtoken::{JsonWebTokenServiceImpl, KeyPair, TokenLifetimes};
use crate::services::mail::MailServiceImpl;
use crate::services::user::UserServiceImpl;

use crate::infrastructure::mailers::smtp::SmtpMailer;
use crate::infrastructure::repositories::group::GroupRepositoryImpl;
use crate::infrastructure::repositories::user::UserRepositoryImpl;

pub struct Container {
    pub user_service: Arc<dyn UserService>,
    pub group_service: Arc<dyn GroupService>,
    pub mail_service: Arc<dyn MailService>,
    pub jsonwebtoken_service: Arc<dyn JsonWebTokenService>,
    pub web: WebConfig,
}

impl Container {
    pub fn new(conn: Surreal<Client>, keys: KeyPair, config: &AppConfig) -> Self {
        let db = Arc::new(conn);

        let user_repository: Arc<dyn UserRepository> =
            Arc::new(UserRepositoryImpl::new(db.clone()));
        let group_repository: Arc<dyn GroupRepository> =
            Arc::new(GroupRepositoryImpl::new(db.clone()));
        let mailer: Arc<dyn Mailer> = Arc::new(SmtpMailer::new(&config.smtp));

        let lifetimes = TokenLifetimes {
            access: Duration::minutes(config.jsonwebtoken.access_token_minutes),
            refresh: Duration::days(config.jsonwebtoken.refresh_token_days),
        };

        Container {
            user_service: Arc::new(UserServiceImpl::new(user_repository.clone())),
            group_service: Arc::new(GroupServiceImpl::new(group_repository)),
            mail_service: Arc::new(MailServiceImpl::new(user_repository, mailer)),
            jsonwebtoken_service: Arc::new(JsonWebTokenServiceImpl::new(keys, lifetimes)),
            web: config.web.clone(),
        }
    }
}
