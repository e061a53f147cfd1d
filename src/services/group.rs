use std::collections::HashMap;
use std::sync::{Arc, Mutex as StdMutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::domain::{
    capacity::{self, Admitted},
    error::AppResult,
    models::group::{AddEmail, EmailGroup, GroupBook, ImportEmails},
    repositories::group::GroupRepository,
    services::group::GroupService,
};

/// Hands out one async mutex per user so that the read-check-write cycle on
/// a user's group document never interleaves with another for that user.
/// An entry lives only while some task holds or waits for it.
#[derive(Default)]
pub struct UserLocks {
    locks: StdMutex<HashMap<String, Arc<Mutex<()>>>>,
}

/// Held for the duration of one group mutation.
pub struct UserLockGuard<'a> {
    locks: &'a UserLocks,
    user_id: String,
    guard: Option<OwnedMutexGuard<()>>,
}

impl UserLocks {
    fn table(&self) -> MutexGuard<'_, HashMap<String, Arc<Mutex<()>>>> {
        self.locks.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub async fn acquire(&self, user_id: &str) -> UserLockGuard<'_> {
        let lock = self
            .table()
            .entry(user_id.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();

        UserLockGuard {
            locks: self,
            user_id: user_id.to_string(),
            guard: Some(lock.lock_owned().await),
        }
    }

    fn prune(&self, user_id: &str) {
        let mut table = self.table();

        if table
            .get(user_id)
            .is_some_and(|lock| Arc::strong_count(lock) == 1)
        {
            table.remove(user_id);
        }
    }
}

impl Drop for UserLockGuard<'_> {
    fn drop(&mut self) {
        self.guard.take();
        self.locks.prune(&self.user_id);
    }
}

pub struct GroupServiceImpl {
    repository: Arc<dyn GroupRepository>,
    locks: UserLocks,
}

impl GroupServiceImpl {
    pub fn new(repository: Arc<dyn GroupRepository>) -> Self {
        Self {
            repository,
            locks: UserLocks::default(),
        }
    }
}

#[async_trait]
impl GroupService for GroupServiceImpl {
    async fn groups(&self, user_id: &str) -> AppResult<GroupBook> {
        Ok(self.repository.find(user_id).await?)
    }

    #[tracing::instrument(skip(self, request), fields(group))]
    async fn add_email(&self, user_id: &str, request: AddEmail) -> AppResult<EmailGroup> {
        let group_name = capacity::normalize_group_name(request.group_name.as_deref());
        let email = capacity::normalize_email(&request.email);

        tracing::Span::current().record("group", group_name.as_str());

        let _guard = self.locks.acquire(user_id).await;

        let mut book = self.repository.find(user_id).await?;
        let group = book.add_one(&group_name, email)?.clone();

        self.repository.save(user_id, book).await?;

        tracing::info!(size = group.emails.len(), "email added to group");

        Ok(group)
    }

    #[tracing::instrument(skip(self, request), fields(group))]
    async fn import_emails(&self, user_id: &str, request: ImportEmails) -> AppResult<Admitted> {
        let group_name = capacity::normalize_group_name(request.group_name.as_deref());
        let candidates = capacity::extract_candidates(&request.content);

        tracing::Span::current().record("group", group_name.as_str());

        let _guard = self.locks.acquire(user_id).await;

        let mut book = self.repository.find(user_id).await?;
        let admitted = book.add_many(&group_name, candidates)?;

        self.repository.save(user_id, book).await?;

        tracing::info!(
            added = admitted.added,
            skipped = admitted.skipped,
            "emails imported into group"
        );

        Ok(admitted)
    }
}
