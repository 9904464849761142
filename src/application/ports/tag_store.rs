use async_trait::async_trait;

use super::StoreError;
use crate::domain::entities::Tag;
use crate::domain::value_objects::{RepositoryId, TagId};
#[cfg(test)]
use mockall::{automock, predicate::*};

/// Port for tag persistence operations
#[cfg_attr(test, automock)]
#[async_trait]
pub trait TagStore: Send + Sync {
    /// Tags of a repository in creation order
    async fn list_by_repository(&self, repository_id: RepositoryId)
        -> Result<Vec<Tag>, StoreError>;

    /// Find tag by ID
    async fn find_by_id(&self, id: TagId) -> Result<Option<Tag>, StoreError>;

    /// Delete the tag record, `Ok(false)` if nothing was removed
    async fn delete(&self, id: TagId) -> Result<bool, StoreError>;
}
