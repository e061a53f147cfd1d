use serde::{Deserialize, Serialize};
use surrealdb::sql::Thing;

use crate::domain::models::user::{EmailAccount, NewUser, User};

#[derive(Debug, Deserialize)]
pub struct SurrealUser {
    id: Thing,
    full_name: String,
    email: String,
    password: String,
    #[serde(default)]
    email_accounts: Vec<SurrealEmailAccount>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SurrealEmailAccount {
    email: String,
    app_password: String,
}

#[derive(Serialize)]
pub struct SurrealUserCreate {
    full_name: String,
    email: String,
    password: String,
    email_accounts: Vec<SurrealEmailAccount>,
}

#[derive(Serialize)]
pub struct SurrealEmailAccountsPatch {
    email_accounts: Vec<SurrealEmailAccount>,
}

impl From<NewUser> for SurrealUserCreate {
    fn from(user: NewUser) -> Self {
        SurrealUserCreate {
            full_name: user.full_name,
            email: user.email,
            password: user.password,
            email_accounts: Vec::new(),
        }
    }
}

impl From<Vec<EmailAccount>> for SurrealEmailAccountsPatch {
    fn from(accounts: Vec<EmailAccount>) -> Self {
        SurrealEmailAccountsPatch {
            email_accounts: accounts
                .into_iter()
                .map(|account| SurrealEmailAccount {
                    email: account.email,
                    app_password: account.app_password,
                })
                .collect(),
        }
    }
}

impl From<SurrealUser> for User {
    fn from(user: SurrealUser) -> Self {
        User {
            id: user.id.id.to_raw(),
            full_name: user.full_name,
            email: user.email,
            password: user.password,
            email_accounts: user
                .email_accounts
                .into_iter()
                .map(|account| EmailAccount {
                    email: account.email,
                    app_password: account.app_password,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SurrealCount {
    pub count: i64,
}
