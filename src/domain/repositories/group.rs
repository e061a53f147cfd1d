use async_trait::async_trait;

use crate::domain::models::group::GroupBook;

use super::repository::RepositoryResult;

/// Storage for the single group document each user owns.
#[async_trait]
pub trait GroupRepository: Send + Sync {
    async fn find(&self, user_id: &str) -> RepositoryResult<GroupBook>;
    async fn save(&self, user_id: &str, book: GroupBook) -> RepositoryResult<GroupBook>;
}
