use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{
    errors::DomainError,
    value_objects::{NamespaceRef, RepositoryId},
};

/// Repository aggregate root - an image name inside a namespace.
///
/// Tags are owned by the repository but loaded separately through the tag
/// store, so the aggregate itself only carries identity and naming.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Repository {
    id: RepositoryId,
    name: String,
    namespace: NamespaceRef,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Repository {
    const MAX_NAME_LENGTH: usize = 255;

    /// Create a new repository record
    pub fn new(
        id: RepositoryId,
        name: impl Into<String>,
        namespace: NamespaceRef,
    ) -> Result<Self, DomainError> {
        let name = name.into();
        Self::validate_name(&name)?;
        let now = Utc::now();
        Ok(Self {
            id,
            name,
            namespace,
            created_at: now,
            updated_at: now,
        })
    }

    /// Reconstruct from storage
    pub fn reconstruct(
        id: RepositoryId,
        name: String,
        namespace: NamespaceRef,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name,
            namespace,
            created_at,
            updated_at,
        }
    }

    fn validate_name(name: &str) -> Result<(), DomainError> {
        if name.is_empty() || name.len() > Self::MAX_NAME_LENGTH {
            return Err(DomainError::InvalidRepositoryName(format!(
                "length must be between 1 and {}",
                Self::MAX_NAME_LENGTH
            )));
        }

        let valid_chars = name.chars().all(|c| {
            c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '_' | '-' | '.' | '/')
        });
        let valid_edges = name
            .chars()
            .next()
            .zip(name.chars().last())
            .is_some_and(|(first, last)| first.is_ascii_alphanumeric() && last.is_ascii_alphanumeric());

        if !valid_chars || !valid_edges {
            return Err(DomainError::InvalidRepositoryName(name.to_string()));
        }

        Ok(())
    }

    /// Name used to address the repository in the registry
    pub fn full_name(&self) -> String {
        if self.namespace.is_global() {
            self.name.clone()
        } else {
            format!("{}/{}", self.namespace.name(), self.name)
        }
    }

    // Getters
    pub fn id(&self) -> RepositoryId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn namespace(&self) -> &NamespaceRef {
        &self.namespace
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}
