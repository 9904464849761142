mod memory_catalog;
mod postgres_activity_repository;
mod postgres_repository_store;
mod postgres_tag_store;

pub use memory_catalog::{InMemoryActivityRepository, InMemoryCatalog};
pub use postgres_activity_repository::PostgresActivityRepository;
pub use postgres_repository_store::PostgresRepositoryStore;
pub use postgres_tag_store::PostgresTagStore;
