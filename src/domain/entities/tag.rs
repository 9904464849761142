use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{
    errors::DomainError,
    value_objects::{Digest, RepositoryId, TagId},
};

/// User who pushed a tag
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub id: i64,
    pub username: String,
}

impl Author {
    pub fn new(id: i64, username: impl Into<String>) -> Self {
        Self {
            id,
            username: username.into(),
        }
    }
}

/// A named reference to an image manifest inside one repository
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    id: TagId,
    name: String,
    digest: Digest,
    image_id: Option<String>,
    author: Author,
    repository_id: RepositoryId,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Tag {
    const MAX_NAME_LENGTH: usize = 128;

    pub fn new(
        id: TagId,
        name: impl Into<String>,
        digest: Digest,
        author: Author,
        repository_id: RepositoryId,
    ) -> Result<Self, DomainError> {
        let name = name.into();
        Self::validate_name(&name)?;
        let now = Utc::now();
        Ok(Self {
            id,
            name,
            digest,
            image_id: None,
            author,
            repository_id,
            created_at: now,
            updated_at: now,
        })
    }

    /// Reconstruct from storage
    #[allow(clippy::too_many_arguments)]
    pub fn reconstruct(
        id: TagId,
        name: String,
        digest: Digest,
        image_id: Option<String>,
        author: Author,
        repository_id: RepositoryId,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name,
            digest,
            image_id,
            author,
            repository_id,
            created_at,
            updated_at,
        }
    }

    // OCI tag grammar: [\w][\w.-]{0,127}
    fn validate_name(name: &str) -> Result<(), DomainError> {
        let mut chars = name.chars();
        let first_ok = chars
            .next()
            .is_some_and(|c| c.is_ascii_alphanumeric() || c == '_');
        let rest_ok = chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'));

        if !first_ok || !rest_ok || name.len() > Self::MAX_NAME_LENGTH {
            return Err(DomainError::InvalidTagName(name.to_string()));
        }

        Ok(())
    }

    pub fn with_image_id(mut self, image_id: impl Into<String>) -> Self {
        self.image_id = Some(image_id.into());
        self
    }

    pub fn with_updated_at(mut self, updated_at: DateTime<Utc>) -> Self {
        self.updated_at = updated_at;
        self
    }

    /// Ensure the tag is owned by the given repository
    pub fn ensure_belongs_to(&self, repository_id: RepositoryId) -> Result<(), DomainError> {
        if self.repository_id != repository_id {
            return Err(DomainError::ForeignTag {
                tag: self.name.clone(),
                repository: repository_id,
            });
        }
        Ok(())
    }

    // Getters
    pub fn id(&self) -> TagId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn digest(&self) -> &Digest {
        &self.digest
    }

    pub fn image_id(&self) -> Option<&str> {
        self.image_id.as_deref()
    }

    pub fn author(&self) -> &Author {
        &self.author
    }

    pub fn repository_id(&self) -> RepositoryId {
        self.repository_id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}
