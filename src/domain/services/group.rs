use async_trait::async_trait;

use crate::domain::capacity::Admitted;
use crate::domain::error::AppResult;
use crate::domain::models::group::{AddEmail, EmailGroup, GroupBook, ImportEmails};

#[async_trait]
pub trait GroupService: 'static + Sync + Send {
    async fn groups(&self, user_id: &str) -> AppResult<GroupBook>;
    async fn add_email(&self, user_id: &str, request: AddEmail) -> AppResult<EmailGroup>;
    async fn import_emails(&self, user_id: &str, request: ImportEmails) -> AppResult<Admitted>;
}
