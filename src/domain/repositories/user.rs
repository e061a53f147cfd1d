use async_trait::async_trait;

use crate::domain::models::user::{EmailAccount, NewUser, User};

use super::repository::RepositoryResult;

#[derive(Debug, Clone)]
pub enum FindByCol {
    Email(String),
}

impl FindByCol {
    pub fn value(self) -> String {
        match self {
            Self::Email(email) => email,
        }
    }
}

impl std::fmt::Display for FindByCol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Email(_) => write!(f, "email"),
        }
    }
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn is_user(&self, email: &str) -> RepositoryResult<bool>;
    async fn create(&self, new_user: NewUser) -> RepositoryResult<User>;
    async fn find_one(&self, column: FindByCol) -> RepositoryResult<Option<User>>;
    async fn find_by_id(&self, id: &str) -> RepositoryResult<Option<User>>;
    async fn update_email_accounts(
        &self,
        id: &str,
        email_accounts: Vec<EmailAccount>,
    ) -> RepositoryResult<Option<User>>;
}
