use async_trait::async_trait;
use thiserror::Error;

use crate::domain::entities::Repository;
use crate::domain::value_objects::RepositoryId;
#[cfg(test)]
use mockall::{automock, predicate::*};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Record not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Port for repository persistence operations
#[cfg_attr(test, automock)]
#[async_trait]
pub trait RepositoryStore: Send + Sync {
    /// List all repositories ordered by id
    async fn list(&self) -> Result<Vec<Repository>, StoreError>;

    /// Find repository by ID
    async fn find_by_id(&self, id: RepositoryId) -> Result<Option<Repository>, StoreError>;

    /// Delete the repository record.
    ///
    /// Returns `Ok(false)` when the store refuses the removal, for example
    /// because tag records still reference the repository.
    async fn delete(&self, id: RepositoryId) -> Result<bool, StoreError>;
}
