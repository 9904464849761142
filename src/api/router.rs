use axum::{
    http::header,
    middleware as axum_middleware,
    routing::{delete, get, put},
    Router,
};
use sqlx::PgPool;
use std::iter::once;
use std::sync::Arc;
use tower_http::sensitive_headers::SetSensitiveRequestHeadersLayer;

use crate::api::handlers::{
    delete_repository_handler, get_delete_settings_handler, get_repository_handler,
    get_tag_handler, grouped_tags_handler, health_handler, list_repositories_handler,
    list_tags_handler, readiness_handler, update_delete_settings_handler, DeleteState,
};
use crate::api::middleware::{auth, cors, metrics};
use crate::api::openapi::swagger_ui;
use crate::application::ports::FeatureFlags;
use crate::application::use_cases::{CatalogQueryService, DeleteRepositoryUseCase};
use crate::config::AuthConfig;

/// Application state container
pub struct AppState {
    /// Present when the catalog lives in PostgreSQL
    pub pool: Option<Arc<PgPool>>,
    pub catalog: Arc<CatalogQueryService>,
    pub delete_use_case: Arc<DeleteRepositoryUseCase>,
    pub feature_flags: Arc<dyn FeatureFlags>,
    pub auth: Arc<AuthConfig>,
    pub allowed_origins: Vec<String>,
}

/// Create router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    let catalog_state = Arc::clone(&state.catalog);
    let delete_state = DeleteState {
        use_case: Arc::clone(&state.delete_use_case),
        feature_flags: Arc::clone(&state.feature_flags),
    };

    // Protected API routes
    let api = Router::new()
        .route(
            "/repositories",
            get(list_repositories_handler).with_state(Arc::clone(&catalog_state)),
        )
        .route(
            "/repositories/{id}",
            get(get_repository_handler).with_state(Arc::clone(&catalog_state)),
        )
        .route(
            "/repositories/{id}",
            delete(delete_repository_handler).with_state(delete_state),
        )
        .route(
            "/repositories/{id}/tags",
            get(list_tags_handler).with_state(Arc::clone(&catalog_state)),
        )
        .route(
            "/repositories/{id}/tags/grouped",
            get(grouped_tags_handler).with_state(Arc::clone(&catalog_state)),
        )
        .route(
            "/repositories/{id}/tags/{tag_id}",
            get(get_tag_handler).with_state(catalog_state),
        )
        .route(
            "/settings/delete",
            get(get_delete_settings_handler).with_state(Arc::clone(&state.feature_flags)),
        )
        .route(
            "/settings/delete",
            put(update_delete_settings_handler).with_state(Arc::clone(&state.feature_flags)),
        )
        .route_layer(axum_middleware::from_fn_with_state(
            Arc::clone(&state.auth),
            auth::auth_middleware,
        ));

    Router::new()
        // Health check (no auth required)
        .route("/health", get(health_handler))
        .route(
            "/health/ready",
            get(readiness_handler).with_state(state.pool.clone()),
        )
        .nest("/api/v1", api)
        .merge(swagger_ui())
        .layer(axum_middleware::from_fn(metrics::metrics_middleware))
        .layer(cors::create_cors_layer(&state.allowed_origins))
        .layer(SetSensitiveRequestHeadersLayer::new(once(header::AUTHORIZATION)))
}
