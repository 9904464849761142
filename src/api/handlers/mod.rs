pub mod health;
pub mod repositories;
pub mod settings;
pub mod tags;

use std::sync::Arc;

use crate::api::errors::ApiError;
use crate::application::ports::FeatureFlags;
use crate::application::use_cases::DeleteRepositoryUseCase;
use crate::domain::value_objects::{RepositoryId, TagId};

pub use health::{health_handler, readiness_handler};
pub use repositories::{delete_repository_handler, get_repository_handler, list_repositories_handler};
pub use settings::{get_delete_settings_handler, update_delete_settings_handler};
pub use tags::{get_tag_handler, grouped_tags_handler, list_tags_handler};

/// State of the delete route: the use case and where its settings come from
#[derive(Clone)]
pub struct DeleteState {
    pub use_case: Arc<DeleteRepositoryUseCase>,
    pub feature_flags: Arc<dyn FeatureFlags>,
}

/// Ids that are not numbers cannot name a record
fn parse_repository_id(raw: &str) -> Result<RepositoryId, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::not_found("Repository not found"))
}

fn parse_tag_id(raw: &str) -> Result<TagId, ApiError> {
    raw.parse().map_err(|_| ApiError::not_found("Tag not found"))
}
