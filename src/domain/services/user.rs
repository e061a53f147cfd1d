use async_trait::async_trait;

use crate::domain::error::AppResult;
use crate::domain::models::user::{Credentials, EmailAccount, NewUser, User};

#[async_trait]
pub trait UserService: 'static + Sync + Send {
    async fn register(&self, mut new_user: NewUser) -> AppResult<User>;
    async fn login(&self, credentials: Credentials) -> AppResult<User>;
    async fn profile(&self, id: &str) -> AppResult<User>;
    async fn update_email_accounts(
        &self,
        id: &str,
        email_accounts: Vec<EmailAccount>,
    ) -> AppResult<User>;
}
