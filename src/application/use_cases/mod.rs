mod catalog_queries;
mod delete_repository;

pub use catalog_queries::CatalogQueryService;
pub use delete_repository::{DeleteRepositoryError, DeleteRepositoryUseCase, DeletionOutcome};
