use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::{Repository, Tag};

/// Kind of catalog event kept in the activity trail
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActivityKind {
    #[serde(rename = "repository.delete")]
    RepositoryDelete,
    #[serde(rename = "tag.delete")]
    TagDelete,
}

impl std::fmt::Display for ActivityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ActivityKind::RepositoryDelete => write!(f, "repository.delete"),
            ActivityKind::TagDelete => write!(f, "tag.delete"),
        }
    }
}

impl std::str::FromStr for ActivityKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "repository.delete" => Ok(ActivityKind::RepositoryDelete),
            "tag.delete" => Ok(ActivityKind::TagDelete),
            _ => Err(format!("Invalid activity kind: {}", s)),
        }
    }
}

/// One entry of the activity trail
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityEntry {
    pub kind: ActivityKind,
    /// Acting user
    pub owner_id: String,
    /// Name of the repository or tag the event is about
    pub trackable: String,
    pub namespace_id: i64,
    pub parameters: serde_json::Value,
    pub created_at: DateTime<Utc>,
}

impl ActivityEntry {
    pub fn repository_deleted(repository: &Repository, owner_id: &str) -> Self {
        Self {
            kind: ActivityKind::RepositoryDelete,
            owner_id: owner_id.to_string(),
            trackable: repository.full_name(),
            namespace_id: repository.namespace().id(),
            parameters: json!({
                "repository_id": repository.id(),
                "repository_name": repository.name(),
                "namespace_name": repository.namespace().name(),
            }),
            created_at: Utc::now(),
        }
    }

    pub fn tag_deleted(repository: &Repository, tag: &Tag, owner_id: &str) -> Self {
        Self {
            kind: ActivityKind::TagDelete,
            owner_id: owner_id.to_string(),
            trackable: format!("{}:{}", repository.full_name(), tag.name()),
            namespace_id: repository.namespace().id(),
            parameters: json!({
                "repository_id": repository.id(),
                "tag_id": tag.id(),
                "tag_name": tag.name(),
                "digest": tag.digest(),
            }),
            created_at: Utc::now(),
        }
    }
}
