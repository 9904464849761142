use axum::{
    extract::{Extension, Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use super::{parse_repository_id, DeleteState};
use crate::api::errors::ApiError;
use crate::application::dto::RepositoryDto;
use crate::application::use_cases::CatalogQueryService;
use crate::domain::authorization::UserContext;

/// GET /api/v1/repositories
/// List repositories visible to the caller
#[utoipa::path(
    get,
    path = "/api/v1/repositories",
    tag = "repositories",
    responses(
        (status = 200, description = "Visible repositories, ordered by id", body = [RepositoryDto]),
        (status = 401, description = "Authentication required", body = crate::application::dto::ErrorResponse)
    )
)]
pub async fn list_repositories_handler(
    State(catalog): State<Arc<CatalogQueryService>>,
    Extension(user): Extension<UserContext>,
) -> Result<Json<Vec<RepositoryDto>>, ApiError> {
    let repositories = catalog.list_repositories(&user).await?;
    Ok(Json(repositories))
}

/// GET /api/v1/repositories/{id}
#[utoipa::path(
    get,
    path = "/api/v1/repositories/{id}",
    tag = "repositories",
    params(("id" = i64, Path, description = "Repository id")),
    responses(
        (status = 200, description = "Repository detail", body = RepositoryDto),
        (status = 404, description = "Repository not found", body = crate::application::dto::ErrorResponse)
    )
)]
pub async fn get_repository_handler(
    State(catalog): State<Arc<CatalogQueryService>>,
    Path(id): Path<String>,
) -> Result<Json<RepositoryDto>, ApiError> {
    let repository_id = parse_repository_id(&id)?;
    Ok(Json(catalog.get_repository(repository_id).await?))
}

/// DELETE /api/v1/repositories/{id}
/// Delete a repository together with all of its tags.
///
/// The `delete.enabled` setting is read once, when the request arrives.
#[utoipa::path(
    delete,
    path = "/api/v1/repositories/{id}",
    tag = "repositories",
    params(("id" = i64, Path, description = "Repository id")),
    responses(
        (status = 204, description = "Repository and tags deleted"),
        (status = 401, description = "Authentication required", body = crate::application::dto::ErrorResponse),
        (status = 403, description = "Deletion is disabled", body = crate::application::dto::ErrorResponse),
        (status = 404, description = "Repository not found", body = crate::application::dto::ErrorResponse),
        (status = 422, description = "Some tags or the repository could not be removed", body = crate::application::dto::ErrorResponse),
        (status = 500, description = "Internal server error", body = crate::application::dto::ErrorResponse)
    )
)]
pub async fn delete_repository_handler(
    State(state): State<DeleteState>,
    Extension(user): Extension<UserContext>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let repository_id = parse_repository_id(&id)?;
    let settings = state.feature_flags.delete_settings();

    state
        .use_case
        .execute(&settings, &user, repository_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
