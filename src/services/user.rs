use std::sync::Arc;

use crate::domain::{
    error::{AppError, AppResult},
    models::user::{Credentials, EmailAccount, NewUser, User},
    repositories::{
        repository::RepositoryError,
        user::{FindByCol, UserRepository},
    },
    services::user::UserService,
};

use argon2::{
    Argon2,
    password_hash::{
        PasswordHash, PasswordHasher, PasswordVerifier, Result, SaltString, rand_core::OsRng,
    },
};

use async_trait::async_trait;

pub struct UserServiceImpl {
    repository: Arc<dyn UserRepository>,
}

impl UserServiceImpl {
    pub fn new(repository: Arc<dyn UserRepository>) -> Self {
        Self { repository }
    }

    async fn is_user(&self, email: &str) -> AppResult<bool> {
        Ok(self.repository.is_user(email).await?)
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        Ok(self
            .repository
            .find_one(FindByCol::Email(email.to_string()))
            .await?)
    }
}

#[async_trait]
impl UserService for UserServiceImpl {
    #[tracing::instrument(skip_all, fields(email = %new_user.email))]
    async fn register(&self, mut new_user: NewUser) -> AppResult<User> {
        new_user.email = new_user.email.trim().to_lowercase();

        if self.is_user(&new_user.email).await? {
            return Err(AppError::Conflict("User Already exists"));
        }

        new_user.password = encrypt_password(&new_user.password)?;

        let user = match self.repository.create(new_user).await {
            Err(RepositoryError::Duplicate(_)) => {
                return Err(AppError::Conflict("User Already exists"));
            }
            created => created?,
        };

        tracing::info!(user = %user.id, "user registered");

        Ok(user)
    }

    async fn login(&self, credentials: Credentials) -> AppResult<User> {
        let email = credentials.email.trim().to_lowercase();

        let user = match self.find_by_email(&email).await? {
            Some(user) => user,
            None => return Err(AppError::Unauthorized()),
        };

        verify_password(&credentials.password, &user.password)?;

        Ok(user)
    }

    async fn profile(&self, id: &str) -> AppResult<User> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found"))
    }

    async fn update_email_accounts(
        &self,
        id: &str,
        email_accounts: Vec<EmailAccount>,
    ) -> AppResult<User> {
        if email_accounts.is_empty() {
            return Err(AppError::BadRequest("emailAccounts is required"));
        }

        let email_accounts = email_accounts
            .into_iter()
            .map(|account| EmailAccount {
                email: account.email.trim().to_lowercase(),
                app_password: account.app_password,
            })
            .collect();

        self.repository
            .update_email_accounts(id, email_accounts)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found"))
    }
}

pub fn encrypt_password(password: &str) -> Result<String> {
    let argon2 = Argon2::default();
    let salt = SaltString::generate(&mut OsRng);

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
}

pub fn verify_password(password: &str, hash: &str) -> Result<()> {
    let argon2 = Argon2::default();
    let hash = PasswordHash::new(hash);

    argon2.verify_password(password.as_bytes(), &hash?)
}
