use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

use crate::domain::entities::{Repository, Tag};
#[cfg(test)]
use mockall::{automock, predicate::*};

/// Failure reported by the remote image registry
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("registry unreachable: {0}")]
    Unreachable(String),

    #[error("registry did not answer within {0:?}")]
    Timeout(Duration),

    #[error("registry rejected the credentials: {0}")]
    Unauthorized(String),

    #[error("registry does not allow deleting manifests")]
    DeleteUnsupported,

    #[error("manifest not found for {0}")]
    ManifestNotFound(String),

    #[error("registry answered {status}: {message}")]
    Remote { status: u16, message: String },
}

/// Port for the image registry that physically holds the manifests
#[cfg_attr(test, automock)]
#[async_trait]
pub trait RegistryGateway: Send + Sync {
    /// Remove the manifest behind `tag` from the registry
    async fn delete(&self, repository: &Repository, tag: &Tag) -> Result<(), RegistryError>;
}
