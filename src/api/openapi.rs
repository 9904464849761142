use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::handlers::health::{HealthResponse, ReadinessResponse};
use crate::application::dto::{
    AuthorDto, DeleteSettingsDto, ErrorResponse, NamespaceSummaryDto, RepositoryDto, TagDto,
    UpdateDeleteSettingsRequest,
};

/// OpenAPI specification for the registry catalog API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Registry Catalog API",
        version = "1.0.0",
        description = "Browse container image repositories and tags, and delete repositories from the registry"
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server")
    ),
    paths(
        crate::api::handlers::health::health_handler,
        crate::api::handlers::health::readiness_handler,
        crate::api::handlers::repositories::list_repositories_handler,
        crate::api::handlers::repositories::get_repository_handler,
        crate::api::handlers::repositories::delete_repository_handler,
        crate::api::handlers::tags::list_tags_handler,
        crate::api::handlers::tags::grouped_tags_handler,
        crate::api::handlers::tags::get_tag_handler,
        crate::api::handlers::settings::get_delete_settings_handler,
        crate::api::handlers::settings::update_delete_settings_handler,
    ),
    components(
        schemas(
            RepositoryDto,
            NamespaceSummaryDto,
            TagDto,
            AuthorDto,
            DeleteSettingsDto,
            UpdateDeleteSettingsRequest,
            ErrorResponse,
            HealthResponse,
            ReadinessResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "repositories", description = "Repository catalog and deletion"),
        (name = "tags", description = "Tag listing and grouping"),
        (name = "settings", description = "Runtime settings")
    )
)]
pub struct ApiDoc;

/// Create the Swagger UI route
pub fn swagger_ui() -> SwaggerUi {
    SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi())
}
