use thiserror::Error;

use super::value_objects::RepositoryId;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid namespace: {0}")]
    InvalidNamespace(String),

    #[error("Invalid repository name: {0}")]
    InvalidRepositoryName(String),

    #[error("Invalid tag name: {0}")]
    InvalidTagName(String),

    #[error("Tag {tag} does not belong to repository {repository}")]
    ForeignTag { tag: String, repository: RepositoryId },
}
