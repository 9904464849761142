use async_trait::async_trait;
#[cfg(test)]
use mockall::{automock, predicate::*};

use crate::domain::entities::ActivityEntry;

/// Error type for activity trail operations
#[derive(Debug, thiserror::Error)]
pub enum ActivityError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Append-only trail of catalog events
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ActivityRepository: Send + Sync {
    async fn record(&self, entry: ActivityEntry) -> Result<(), ActivityError>;
}
