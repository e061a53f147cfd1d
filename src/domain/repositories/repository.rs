use thiserror::Error;

#[derive(Error, Debug)]
pub enum RepositoryError {
    #[error(transparent)]
    Database(#[from] surrealdb::Error),
    #[error("{0} record was not returned by the database")]
    Missing(&'static str),
    #[error("{0} record violates a unique index")]
    Duplicate(&'static str),
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;
