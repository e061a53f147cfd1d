use async_trait::async_trait;
use thiserror::Error;

use crate::domain::models::mail::OutgoingMail;
use crate::domain::models::user::EmailAccount;

#[derive(Error, Debug)]
pub enum MailerError {
    #[error("Invalid address: {0}")]
    Address(#[from] lettre::address::AddressError),
    #[error("Invalid message: {0}")]
    Message(#[from] lettre::error::Error),
    #[error("{0}")]
    Transport(String),
}

/// Delivers a message on behalf of one of the user's sending accounts.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn deliver(&self, sender: &EmailAccount, mail: &OutgoingMail) -> Result<(), MailerError>;
}
