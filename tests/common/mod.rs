//! Shared fixtures for the HTTP-level tests

#![allow(dead_code)]

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request};
use axum::Router;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;

use registry_catalog::{
    api::create_router,
    config::AuthConfig,
    domain::entities::{Author, Repository, Tag},
    domain::value_objects::{NamespaceRef, RepositoryId, TagId, Visibility},
    infrastructure::{
        persistence::{InMemoryActivityRepository, InMemoryCatalog},
        policy::RuntimeFeatureFlags,
    },
    ports::{DeleteSettings, RegistryError, RegistryGateway, RepositoryStore, StoreError},
    ApplicationBuilder, Config,
};

pub const API_KEY: &str = "test-key";
pub const JWT_SECRET: &str = "test-secret";

/// Registry double answering from a script keyed by tag name
#[derive(Default)]
pub struct ScriptedRegistry {
    failures: Mutex<HashMap<String, RegistryError>>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedRegistry {
    pub fn fail_tag(&self, tag: &str, error: RegistryError) {
        self.failures.lock().insert(tag.to_string(), error);
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }
}

#[async_trait]
impl RegistryGateway for ScriptedRegistry {
    async fn delete(&self, repository: &Repository, tag: &Tag) -> Result<(), RegistryError> {
        self.calls
            .lock()
            .push(format!("{}:{}", repository.full_name(), tag.name()));
        match self.failures.lock().get(tag.name()) {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }
}

/// Repository store whose deletes are always refused
pub struct RefusingRepositoryStore {
    inner: Arc<InMemoryCatalog>,
}

#[async_trait]
impl RepositoryStore for RefusingRepositoryStore {
    async fn list(&self) -> Result<Vec<Repository>, StoreError> {
        RepositoryStore::list(self.inner.as_ref()).await
    }

    async fn find_by_id(&self, id: RepositoryId) -> Result<Option<Repository>, StoreError> {
        RepositoryStore::find_by_id(self.inner.as_ref(), id).await
    }

    async fn delete(&self, _id: RepositoryId) -> Result<bool, StoreError> {
        Ok(false)
    }
}

pub struct TestApp {
    pub router: Router,
    pub catalog: Arc<InMemoryCatalog>,
    pub registry: Arc<ScriptedRegistry>,
    pub flags: Arc<RuntimeFeatureFlags>,
    pub activities: Arc<InMemoryActivityRepository>,
}

pub struct TestAppOptions {
    pub delete_enabled: bool,
    pub refuse_repository_delete: bool,
}

impl Default for TestAppOptions {
    fn default() -> Self {
        Self {
            delete_enabled: true,
            refuse_repository_delete: false,
        }
    }
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_options(TestAppOptions::default())
    }

    pub fn with_delete_disabled() -> Self {
        Self::with_options(TestAppOptions {
            delete_enabled: false,
            ..TestAppOptions::default()
        })
    }

    pub fn with_options(options: TestAppOptions) -> Self {
        let catalog = Arc::new(InMemoryCatalog::new());
        let registry = Arc::new(ScriptedRegistry::default());
        let activities = Arc::new(InMemoryActivityRepository::new());
        let flags = Arc::new(RuntimeFeatureFlags::new(DeleteSettings {
            enabled: options.delete_enabled,
            concurrency: DeleteSettings::DEFAULT_CONCURRENCY,
        }));

        let repository_store: Arc<dyn RepositoryStore> = if options.refuse_repository_delete {
            Arc::new(RefusingRepositoryStore {
                inner: catalog.clone(),
            })
        } else {
            catalog.clone()
        };

        let mut config = Config::default();
        config.auth = AuthConfig {
            api_keys: vec![API_KEY.to_string()],
            jwt_secret: Some(JWT_SECRET.to_string()),
            disable_auth: false,
        };

        let state = ApplicationBuilder::new(config)
            .with_stores(repository_store, catalog.clone())
            .with_registry(registry.clone())
            .with_feature_flags(flags.clone())
            .with_activity_repo(activities.clone())
            .with_infrastructure()
            .expect("infrastructure")
            .build()
            .expect("application state");

        Self {
            router: create_router(state),
            catalog,
            registry,
            flags,
            activities,
        }
    }

    /// Public namespace with one repository in it
    pub fn seed_repository(&self, name: &str) -> Repository {
        self.seed_repository_in(name, NamespaceRef::new(1, "public", Visibility::Public).unwrap())
    }

    pub fn seed_repository_in(&self, name: &str, namespace: NamespaceRef) -> Repository {
        self.catalog
            .create_repository(name, namespace)
            .expect("seed repository")
    }

    pub fn seed_tag(&self, repository_id: RepositoryId, name: &str, digest: &str) -> Tag {
        self.catalog
            .create_tag(repository_id, name, digest, Author::new(1, "admin"))
            .expect("seed tag")
    }

    pub async fn repository_exists(&self, id: RepositoryId) -> bool {
        RepositoryStore::find_by_id(self.catalog.as_ref(), id)
            .await
            .unwrap()
            .is_some()
    }

    pub async fn tag_exists(&self, id: TagId) -> bool {
        registry_catalog::ports::TagStore::find_by_id(self.catalog.as_ref(), id)
            .await
            .unwrap()
            .is_some()
    }
}

/// Request authenticated with the test API key
pub fn authenticated_request(method: Method, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("authorization", format!("ApiKey {}", API_KEY))
        .body(Body::empty())
        .unwrap()
}

/// Helper to extract JSON response
pub async fn extract_json_response(response: axum::response::Response) -> serde_json::Value {
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body_bytes).unwrap()
}
