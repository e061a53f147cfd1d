use async_trait::async_trait;

use crate::domain::error::AppResult;
use crate::domain::models::mail::OutgoingMail;

#[async_trait]
pub trait MailService: 'static + Sync + Send {
    async fn send(&self, user_id: &str, mail: OutgoingMail) -> AppResult<()>;
}
