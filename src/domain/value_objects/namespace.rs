use serde::{Deserialize, Serialize};

use super::Visibility;
use crate::domain::errors::DomainError;

/// Reference to the namespace that owns a repository
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NamespaceRef {
    id: i64,
    name: String,
    visibility: Visibility,
    global: bool,
}

impl NamespaceRef {
    const MAX_LENGTH: usize = 255;

    pub fn new(id: i64, name: impl Into<String>, visibility: Visibility) -> Result<Self, DomainError> {
        let name = name.into();
        Self::validate_name(&name)?;
        Ok(Self {
            id,
            name,
            visibility,
            global: false,
        })
    }

    /// The registry-wide namespace; its repositories have no name prefix
    pub fn global(id: i64, name: impl Into<String>) -> Result<Self, DomainError> {
        let mut namespace = Self::new(id, name, Visibility::Public)?;
        namespace.global = true;
        Ok(namespace)
    }

    /// Reconstruct from storage without re-validating
    pub fn reconstruct(id: i64, name: String, visibility: Visibility, global: bool) -> Self {
        Self {
            id,
            name,
            visibility,
            global,
        }
    }

    fn validate_name(name: &str) -> Result<(), DomainError> {
        if name.is_empty() {
            return Err(DomainError::InvalidNamespace(
                "Namespace cannot be empty".to_string(),
            ));
        }

        if name.len() > Self::MAX_LENGTH {
            return Err(DomainError::InvalidNamespace(format!(
                "Namespace too long: {} > {}",
                name.len(),
                Self::MAX_LENGTH
            )));
        }

        // Docker distribution path component rules
        if !name
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '_' | '-' | '.'))
        {
            return Err(DomainError::InvalidNamespace(format!(
                "Namespace must be lowercase alphanumeric with '.', '_' or '-': {}",
                name
            )));
        }

        Ok(())
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    pub fn is_global(&self) -> bool {
        self.global
    }
}

impl std::fmt::Display for NamespaceRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}
