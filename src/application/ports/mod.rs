mod activity_repository;
mod feature_flags;
mod namespace_policy;
mod registry_gateway;
mod repository_store;
mod tag_store;

pub use activity_repository::{ActivityError, ActivityRepository};
pub use feature_flags::{DeleteSettings, FeatureFlags};
pub use namespace_policy::NamespacePolicy;
pub use registry_gateway::{RegistryError, RegistryGateway};
pub use repository_store::{RepositoryStore, StoreError};
pub use tag_store::TagStore;

#[cfg(test)]
pub use activity_repository::MockActivityRepository;
#[cfg(test)]
pub use registry_gateway::MockRegistryGateway;
#[cfg(test)]
pub use repository_store::MockRepositoryStore;
#[cfg(test)]
pub use tag_store::MockTagStore;
