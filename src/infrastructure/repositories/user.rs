use std::sync::Arc;

use async_trait::async_trait;
use surrealdb::Surreal;
use surrealdb::engine::remote::ws::Client;

use crate::domain::models::user::{EmailAccount, NewUser, User};
use crate::domain::repositories::repository::{RepositoryError, RepositoryResult};
use crate::domain::repositories::user::{FindByCol, UserRepository};
use crate::infrastructure::models::user::{
    SurrealCount, SurrealEmailAccountsPatch, SurrealUser, SurrealUserCreate,
};

pub struct UserRepositoryImpl {
    db: Arc<Surreal<Client>>,
}

impl UserRepositoryImpl {
    pub fn new(db: Arc<Surreal<Client>>) -> Self {
        Self { db }
    }
}

const USER: &str = "user";

/// Remote connections only carry the server's message, so the index
/// violation is recognized by its text as well as by its variant.
fn duplicate_or_database(error: surrealdb::Error) -> RepositoryError {
    let duplicate = matches!(
        &error,
        surrealdb::Error::Db(surrealdb::error::Db::IndexExists { .. })
    ) || error.to_string().contains("already contains");

    if duplicate {
        RepositoryError::Duplicate(USER)
    } else {
        RepositoryError::Database(error)
    }
}

#[async_trait]
impl UserRepository for UserRepositoryImpl {
    async fn create(&self, new_user: NewUser) -> RepositoryResult<User> {
        let user: Option<SurrealUser> = self
            .db
            .create(USER)
            .content(SurrealUserCreate::from(new_user))
            .await
            .map_err(duplicate_or_database)?;

        user.map(Into::into).ok_or(RepositoryError::Missing(USER))
    }

    async fn is_user(&self, email: &str) -> RepositoryResult<bool> {
        let mut res = self
            .db
            .query("(SELECT count() FROM type::table($table) WHERE email = type::string($email) GROUP ALL)[0] or { count: 0 }")
            .bind(("table", USER))
            .bind(("email", email.to_owned()))
            .await?;

        let counter = res.take::<Option<SurrealCount>>(0)?;

        Ok(counter.is_some_and(|counter| counter.count > 0))
    }

    async fn find_one(&self, column: FindByCol) -> RepositoryResult<Option<User>> {
        let user: Option<SurrealUser> = self
            .db
            .query(format!(
                "SELECT * FROM type::table($table) WHERE {column} = type::string($value)"
            ))
            .bind(("table", USER))
            .bind(("value", column.value()))
            .await?
            .take(0)?;

        Ok(user.map(Into::into))
    }

    async fn find_by_id(&self, id: &str) -> RepositoryResult<Option<User>> {
        let user: Option<SurrealUser> = self.db.select((USER, id)).await?;

        Ok(user.map(Into::into))
    }

    async fn update_email_accounts(
        &self,
        id: &str,
        email_accounts: Vec<EmailAccount>,
    ) -> RepositoryResult<Option<User>> {
        let user: Option<SurrealUser> = self
            .db
            .update((USER, id))
            .merge(SurrealEmailAccountsPatch::from(email_accounts))
            .await?;

        Ok(user.map(Into::into))
    }
}

#[cfg(test)]
pub mod mock {
    use tokio::sync::Mutex;

    use super::*;

    pub struct UserRepositoryImpl {
        pub users: Mutex<Vec<User>>,
    }

    #[async_trait]
    impl UserRepository for UserRepositoryImpl {
        async fn is_user(&self, email: &str) -> RepositoryResult<bool> {
            let users = self.users.lock().await;
            Ok(users.iter().any(|u| u.email == email))
        }

        async fn create(&self, user: NewUser) -> RepositoryResult<User> {
            let mut users = self.users.lock().await;

            if users.iter().any(|u| u.email == user.email) {
                return Err(RepositoryError::Duplicate(USER));
            }

            let created = User {
                id: format!("u{}", users.len() + 1),
                full_name: user.full_name.to_owned(),
                email: user.email.to_owned(),
                password: user.password.to_owned(),
                email_accounts: Vec::new(),
            };

            users.push(created.clone());

            Ok(created)
        }

        async fn find_one(&self, column: FindByCol) -> RepositoryResult<Option<User>> {
            let users = self.users.lock().await;

            match column {
                FindByCol::Email(email) => Ok(users.iter().find(|u| u.email == email).cloned()),
            }
        }

        async fn find_by_id(&self, id: &str) -> RepositoryResult<Option<User>> {
            let users = self.users.lock().await;
            Ok(users.iter().find(|u| u.id == id).cloned())
        }

        async fn update_email_accounts(
            &self,
            id: &str,
            email_accounts: Vec<EmailAccount>,
        ) -> RepositoryResult<Option<User>> {
            let mut users = self.users.lock().await;

            Ok(users.iter_mut().find(|u| u.id == id).map(|user| {
                user.email_accounts = email_accounts;
                user.clone()
            }))
        }
    }
}
