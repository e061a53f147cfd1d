#[derive(Debug, Clone)]
pub struct User {
    pub id: String,
    pub full_name: String,
    pub email: String,
    pub password: String,
    pub email_accounts: Vec<EmailAccount>,
}

/// A linked sending account: a Gmail address and its app password.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAccount {
    pub email: String,
    pub app_password: String,
}

#[derive(Clone)]
pub struct NewUser {
    pub full_name: String,
    pub email: String,
    pub password: String,
}

#[derive(Clone)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl User {
    pub fn sending_account(&self, email: &str) -> Option<&EmailAccount> {
        self.email_accounts
            .iter()
            .find(|account| account.email.eq_ignore_ascii_case(email.trim()))
    }
}
