//! # Registry Catalog
//!
//! Catalog of container image repositories and tags kept alongside a Docker
//! Registry v2, built on Clean Architecture principles.
//!
//! ## Architecture Layers
//!
//! - **Domain**: Repositories, tags, namespaces and digest grouping
//! - **Application**: Use cases and ports (interfaces)
//! - **Infrastructure**: PostgreSQL and in-memory stores, the registry client
//! - **API**: HTTP handlers and middleware
//!
//! ## Key Features
//!
//! - Repository and tag browsing filtered by namespace visibility
//! - Tags grouped by manifest digest, newest first
//! - Repository deletion that removes every tag from the registry first and
//!   reports the tags it could not remove
//! - JWT and API key authentication
//!
//! ## Example Usage
//!
//! ```no_run
//! use registry_catalog::{ApplicationBuilder, Config};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
//! let state = ApplicationBuilder::new(Config::from_env())
//!     .with_database()
//!     .await?
//!     .with_infrastructure()?
//!     .build()?;
//! let app = registry_catalog::api::create_router(state);
//! # let _ = app;
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

// Re-export key types explicitly to avoid ambiguity
pub use api::errors as api_errors;
pub use application::builder::ApplicationBuilder;
pub use application::{dto, ports, use_cases};
pub use config::Config;
pub use domain::errors as domain_errors;
pub use domain::{entities, value_objects};
