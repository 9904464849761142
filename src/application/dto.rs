use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::ports::DeleteSettings;
use crate::domain::entities::{Author, Repository, Tag};

/// Owning namespace as shown inside repository payloads
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct NamespaceSummaryDto {
    pub id: i64,
    pub name: String,
}

/// Repository payload. Tags are served by their own endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct RepositoryDto {
    pub id: i64,
    pub name: String,
    pub full_name: String,
    pub namespace: NamespaceSummaryDto,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Repository> for RepositoryDto {
    fn from(repo: Repository) -> Self {
        Self {
            id: repo.id().as_i64(),
            full_name: repo.full_name(),
            namespace: NamespaceSummaryDto {
                id: repo.namespace().id(),
                name: repo.namespace().name().to_string(),
            },
            name: repo.name().to_string(),
            created_at: repo.created_at().to_rfc3339(),
            updated_at: repo.updated_at().to_rfc3339(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AuthorDto {
    pub id: i64,
    pub username: String,
}

impl From<&Author> for AuthorDto {
    fn from(author: &Author) -> Self {
        Self {
            id: author.id,
            username: author.username.clone(),
        }
    }
}

/// Tag payload. Only the parent id is embedded, never the parent's tag list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TagDto {
    pub id: i64,
    pub name: String,
    pub digest: String,
    pub image_id: Option<String>,
    pub author: AuthorDto,
    pub repository_id: i64,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Tag> for TagDto {
    fn from(tag: Tag) -> Self {
        Self {
            id: tag.id().as_i64(),
            name: tag.name().to_string(),
            digest: tag.digest().to_string(),
            image_id: tag.image_id().map(|i| i.to_string()),
            author: AuthorDto::from(tag.author()),
            repository_id: tag.repository_id().as_i64(),
            created_at: tag.created_at().to_rfc3339(),
            updated_at: tag.updated_at().to_rfc3339(),
        }
    }
}

/// Error body shared by every failing endpoint
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub message: String,
}

/// Current deletion settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DeleteSettingsDto {
    pub enabled: bool,
    pub concurrency: usize,
}

impl From<DeleteSettings> for DeleteSettingsDto {
    fn from(settings: DeleteSettings) -> Self {
        Self {
            enabled: settings.enabled,
            concurrency: settings.concurrency,
        }
    }
}

/// Body of `PUT /api/v1/settings/delete`
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UpdateDeleteSettingsRequest {
    pub enabled: bool,
}
