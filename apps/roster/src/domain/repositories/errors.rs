use thiserror::Error;

/// Errors surfaced by repository implementations
///
/// Storage failures are passed through untouched in `Database`; the other
/// variants describe contract violations detected by the repository itself.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Query '{query}' expected at most one result but found {count}")]
    NonUniqueResult { query: String, count: usize },

    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: i64 },

    #[error("Invalid sort property: {0}")]
    InvalidSortProperty(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;
