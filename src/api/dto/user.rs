use crate::api::dto::validation::{is_app_password, is_email, is_name, is_password};
use crate::domain::models::user::{Credentials, EmailAccount, NewUser, User};
use serde::Deserialize;
use serde::Serialize;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserDTO {
    id: String,
    full_name: String,
    user_email: String,
    email_accounts: Vec<SendingAccountDTO>,
}

/// A linked sending account as shown to its owner; the app password never
/// leaves the server.
#[derive(Debug, Serialize, ToSchema)]
pub struct SendingAccountDTO {
    #[schema(examples("sender@gmail.com"))]
    email: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UserResponseDTO {
    pub user: UserDTO,
}

#[derive(Debug, Validate, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterDTO {
    #[validate(custom(function = "is_name"))]
    #[schema(examples("your_name"))]
    pub full_name: String,

    #[validate(custom(function = "is_email"))]
    #[schema(examples("your@email.com"))]
    pub user_email: String,

    #[validate(custom(function = "is_password"))]
    #[schema(examples("stR0ngP4ssw0rd!"))]
    pub password: String,
}

#[derive(Debug, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LoginDTO {
    #[validate(custom(function = "is_email"))]
    #[schema(examples("your@email.com"))]
    pub user_email: String,

    #[schema(examples("stR0ngP4ssw0rd!"))]
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponseDTO {
    pub user_exist: UserDTO,
    #[schema(examples("eyJhbGciOiJSUzI1NiIsInR5cCI6IkpXVCJ9"))]
    pub access_token: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RefreshResponseDTO {
    #[schema(examples("eyJhbGciOiJSUzI1NiIsInR5cCI6IkpXVCJ9"))]
    pub access_token: String,
    pub user: UserDTO,
}

#[derive(Debug, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserDTO {
    #[validate(length(min = 1, message = "emailAccounts is required"), nested)]
    pub email_accounts: Vec<LinkAccountDTO>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LinkAccountDTO {
    #[validate(custom(function = "is_email"))]
    #[schema(examples("sender@gmail.com"))]
    pub email: String,

    #[validate(custom(function = "is_app_password"))]
    #[schema(examples("abcd efgh ijkl mnop"))]
    pub app_password: String,
}

impl From<User> for UserDTO {
    fn from(val: User) -> Self {
        UserDTO {
            id: val.id,
            full_name: val.full_name,
            user_email: val.email,
            email_accounts: val
                .email_accounts
                .into_iter()
                .map(|account| SendingAccountDTO {
                    email: account.email,
                })
                .collect(),
        }
    }
}

impl From<RegisterDTO> for NewUser {
    fn from(register: RegisterDTO) -> Self {
        NewUser {
            full_name: register.full_name,
            email: register.user_email,
            password: register.password,
        }
    }
}

impl From<LoginDTO> for Credentials {
    fn from(login: LoginDTO) -> Self {
        Credentials {
            email: login.user_email,
            password: login.password,
        }
    }
}

impl From<LinkAccountDTO> for EmailAccount {
    fn from(account: LinkAccountDTO) -> Self {
        EmailAccount {
            email: account.email,
            app_password: account.app_password,
        }
    }
}
