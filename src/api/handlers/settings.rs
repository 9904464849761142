use axum::{
    extract::{Extension, State},
    Json,
};
use std::sync::Arc;
use tracing::info;

use crate::api::errors::ApiError;
use crate::application::dto::{DeleteSettingsDto, UpdateDeleteSettingsRequest};
use crate::application::ports::FeatureFlags;
use crate::domain::authorization::UserContext;

/// GET /api/v1/settings/delete
#[utoipa::path(
    get,
    path = "/api/v1/settings/delete",
    tag = "settings",
    responses(
        (status = 200, description = "Current deletion settings", body = DeleteSettingsDto),
        (status = 401, description = "Authentication required", body = crate::application::dto::ErrorResponse)
    )
)]
pub async fn get_delete_settings_handler(
    State(flags): State<Arc<dyn FeatureFlags>>,
) -> Json<DeleteSettingsDto> {
    Json(flags.delete_settings().into())
}

/// PUT /api/v1/settings/delete
/// Turn `delete.enabled` on or off. Administrators only.
#[utoipa::path(
    put,
    path = "/api/v1/settings/delete",
    tag = "settings",
    request_body = UpdateDeleteSettingsRequest,
    responses(
        (status = 200, description = "Settings after the change", body = DeleteSettingsDto),
        (status = 401, description = "Authentication required", body = crate::application::dto::ErrorResponse),
        (status = 403, description = "Administrator role required", body = crate::application::dto::ErrorResponse)
    )
)]
pub async fn update_delete_settings_handler(
    State(flags): State<Arc<dyn FeatureFlags>>,
    Extension(user): Extension<UserContext>,
    Json(request): Json<UpdateDeleteSettingsRequest>,
) -> Result<Json<DeleteSettingsDto>, ApiError> {
    if !user.is_admin() {
        return Err(ApiError::forbidden("Administrator role required"));
    }

    flags.set_delete_enabled(request.enabled);
    info!(user_id = %user.user_id, enabled = request.enabled, "delete setting updated");

    Ok(Json(flags.delete_settings().into()))
}
