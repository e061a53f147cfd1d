use std::sync::Arc;

use async_trait::async_trait;
use surrealdb::Surreal;
use surrealdb::engine::remote::ws::Client;

use crate::domain::models::group::GroupBook;
use crate::domain::repositories::group::GroupRepository;
use crate::domain::repositories::repository::{RepositoryError, RepositoryResult};
use crate::infrastructure::models::group::{SurrealGroupBook, SurrealGroupBookContent};

pub struct GroupRepositoryImpl {
    db: Arc<Surreal<Client>>,
}

impl GroupRepositoryImpl {
    pub fn new(db: Arc<Surreal<Client>>) -> Self {
        Self { db }
    }
}

const SUBEMAILS: &str = "subemails";

#[async_trait]
impl GroupRepository for GroupRepositoryImpl {
    async fn find(&self, user_id: &str) -> RepositoryResult<GroupBook> {
        let book: Option<SurrealGroupBook> = self.db.select((SUBEMAILS, user_id)).await?;

        Ok(book.map(Into::into).unwrap_or_default())
    }

    async fn save(&self, user_id: &str, book: GroupBook) -> RepositoryResult<GroupBook> {
        let saved: Option<SurrealGroupBook> = self
            .db
            .upsert((SUBEMAILS, user_id))
            .content(SurrealGroupBookContent::from(book))
            .await?;

        saved.map(Into::into).ok_or(RepositoryError::Missing(SUBEMAILS))
    }
}
