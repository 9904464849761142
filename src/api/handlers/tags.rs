use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;

use super::{parse_repository_id, parse_tag_id};
use crate::api::errors::ApiError;
use crate::application::dto::{ErrorResponse, TagDto};
use crate::application::use_cases::CatalogQueryService;

/// GET /api/v1/repositories/{id}/tags
#[utoipa::path(
    get,
    path = "/api/v1/repositories/{id}/tags",
    tag = "tags",
    params(("id" = i64, Path, description = "Repository id")),
    responses(
        (status = 200, description = "Tags in creation order", body = [TagDto]),
        (status = 404, description = "Repository not found", body = ErrorResponse)
    )
)]
pub async fn list_tags_handler(
    State(catalog): State<Arc<CatalogQueryService>>,
    Path(id): Path<String>,
) -> Result<Json<Vec<TagDto>>, ApiError> {
    let repository_id = parse_repository_id(&id)?;
    Ok(Json(catalog.list_tags(repository_id).await?))
}

/// GET /api/v1/repositories/{id}/tags/{tag_id}
#[utoipa::path(
    get,
    path = "/api/v1/repositories/{id}/tags/{tag_id}",
    tag = "tags",
    params(
        ("id" = i64, Path, description = "Repository id"),
        ("tag_id" = i64, Path, description = "Tag id")
    ),
    responses(
        (status = 200, description = "Tag detail", body = TagDto),
        (status = 404, description = "Repository or tag not found", body = ErrorResponse)
    )
)]
pub async fn get_tag_handler(
    State(catalog): State<Arc<CatalogQueryService>>,
    Path((id, tag_id)): Path<(String, String)>,
) -> Result<Json<TagDto>, ApiError> {
    let repository_id = parse_repository_id(&id)?;
    let tag_id = parse_tag_id(&tag_id)?;
    Ok(Json(catalog.get_tag(repository_id, tag_id).await?))
}

/// GET /api/v1/repositories/{id}/tags/grouped
/// Tags sharing a digest, newest group first
#[utoipa::path(
    get,
    path = "/api/v1/repositories/{id}/tags/grouped",
    tag = "tags",
    params(("id" = i64, Path, description = "Repository id")),
    responses(
        (status = 200, description = "Tags grouped by digest", body = Vec<Vec<TagDto>>),
        (status = 404, description = "Repository not found", body = ErrorResponse)
    )
)]
pub async fn grouped_tags_handler(
    State(catalog): State<Arc<CatalogQueryService>>,
    Path(id): Path<String>,
) -> Result<Json<Vec<Vec<TagDto>>>, ApiError> {
    let repository_id = parse_repository_id(&id)?;
    Ok(Json(catalog.grouped_tags(repository_id).await?))
}
