//! Error types shared by the catalog read use cases

use thiserror::Error;

use crate::application::ports::StoreError;
use crate::domain::value_objects::{RepositoryId, TagId};

/// Error type for repository and tag lookups
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Repository not found: {0}")]
    RepositoryNotFound(RepositoryId),

    #[error("Tag not found: {0}")]
    TagNotFound(TagId),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}
