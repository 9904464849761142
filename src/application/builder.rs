use std::sync::Arc;
use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use tracing::{info, warn};

use crate::api::router::AppState;
use crate::application::{
    ports::{
        ActivityRepository, FeatureFlags, NamespacePolicy, RegistryGateway, RepositoryStore,
        TagStore,
    },
    use_cases::{CatalogQueryService, DeleteRepositoryUseCase},
};
use crate::config::Config;
use crate::infrastructure::{
    persistence::{
        InMemoryActivityRepository, InMemoryCatalog, PostgresActivityRepository,
        PostgresRepositoryStore, PostgresTagStore,
    },
    policy::{RuntimeFeatureFlags, VisibilityPolicy},
    registry::HttpRegistryGateway,
};

pub type BuildError = Box<dyn std::error::Error + Send + Sync>;

/// Application builder for clean dependency injection and setup.
///
/// Anything injected through a `with_*` setter is kept; `with_infrastructure`
/// only fills the gaps from the configuration.
pub struct ApplicationBuilder {
    config: Config,
    pool: Option<sqlx::PgPool>,
    repository_store: Option<Arc<dyn RepositoryStore>>,
    tag_store: Option<Arc<dyn TagStore>>,
    activity_repo: Option<Arc<dyn ActivityRepository>>,
    registry: Option<Arc<dyn RegistryGateway>>,
    feature_flags: Option<Arc<dyn FeatureFlags>>,
    namespace_policy: Option<Arc<dyn NamespacePolicy>>,
}

impl ApplicationBuilder {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            pool: None,
            repository_store: None,
            tag_store: None,
            activity_repo: None,
            registry: None,
            feature_flags: None,
            namespace_policy: None,
        }
    }

    /// Initialize database connection pool with retry logic.
    /// Without `DATABASE_URL` this is a no-op.
    pub async fn with_database(mut self) -> Result<Self, BuildError> {
        let Some(database_url) = self.config.database_url.clone() else {
            info!("DATABASE_URL not set, catalog will be kept in memory");
            return Ok(self);
        };

        info!("Connecting to database");

        // Retry connection with exponential backoff
        let mut retries = 3;
        let mut delay = Duration::from_secs(1);
        let pool = loop {
            match PgPoolOptions::new()
                .max_connections(self.config.db_max_connections)
                .min_connections(self.config.db_min_connections)
                .acquire_timeout(Duration::from_secs(self.config.db_acquire_timeout_secs))
                .idle_timeout(Some(Duration::from_secs(self.config.db_idle_timeout_secs)))
                .max_lifetime(Some(Duration::from_secs(self.config.db_max_lifetime_secs)))
                .connect(&database_url)
                .await
            {
                Ok(pool) => break pool,
                Err(e) if retries > 0 => {
                    retries -= 1;
                    warn!(
                        "Database connection failed, retrying in {:?} ({} retries left): {}",
                        delay, retries, e
                    );
                    tokio::time::sleep(delay).await;
                    delay *= 2; // Exponential backoff
                }
                Err(e) => {
                    tracing::error!("Failed to connect to database after retries: {}", e);
                    return Err(Box::new(e));
                }
            }
        };

        info!(
            max = self.config.db_max_connections,
            min = self.config.db_min_connections,
            "Database pool configured"
        );

        info!("Running database migrations");
        sqlx::migrate!("./migrations").run(&pool).await.map_err(|e| {
            tracing::error!("Failed to run migrations: {}", e);
            e
        })?;

        self.pool = Some(pool);
        Ok(self)
    }

    /// Initialize infrastructure adapters that were not injected
    pub fn with_infrastructure(mut self) -> Result<Self, BuildError> {
        if self.repository_store.is_none() || self.tag_store.is_none() {
            match &self.pool {
                Some(pool) => {
                    self.repository_store =
                        Some(Arc::new(PostgresRepositoryStore::new(pool.clone())));
                    self.tag_store = Some(Arc::new(PostgresTagStore::new(pool.clone())));
                }
                None => {
                    let catalog = Arc::new(InMemoryCatalog::new());
                    self.repository_store = Some(catalog.clone());
                    self.tag_store = Some(catalog);
                }
            }
        }

        if self.activity_repo.is_none() {
            let activity_repo: Arc<dyn ActivityRepository> = match &self.pool {
                Some(pool) => Arc::new(PostgresActivityRepository::new(pool.clone())),
                None => Arc::new(InMemoryActivityRepository::new()),
            };
            self.activity_repo = Some(activity_repo);
        }

        if self.registry.is_none() {
            let registry = HttpRegistryGateway::new(
                &self.config.registry_url,
                self.config.registry_token.clone(),
                Duration::from_secs(self.config.registry_timeout_secs),
            )?;
            info!(registry_url = %self.config.registry_url, "Registry gateway configured");
            self.registry = Some(Arc::new(registry));
        }

        if self.feature_flags.is_none() {
            self.feature_flags = Some(Arc::new(RuntimeFeatureFlags::new(
                self.config.delete_settings(),
            )));
        }

        if self.namespace_policy.is_none() {
            self.namespace_policy = Some(Arc::new(VisibilityPolicy));
        }

        info!("Infrastructure layer initialized");
        Ok(self)
    }

    /// Use the given stores instead of PostgreSQL or the in-memory catalog
    pub fn with_stores(
        mut self,
        repository_store: Arc<dyn RepositoryStore>,
        tag_store: Arc<dyn TagStore>,
    ) -> Self {
        self.repository_store = Some(repository_store);
        self.tag_store = Some(tag_store);
        self
    }

    pub fn with_registry(mut self, registry: Arc<dyn RegistryGateway>) -> Self {
        self.registry = Some(registry);
        self
    }

    pub fn with_feature_flags(mut self, feature_flags: Arc<dyn FeatureFlags>) -> Self {
        self.feature_flags = Some(feature_flags);
        self
    }

    pub fn with_activity_repo(mut self, activity_repo: Arc<dyn ActivityRepository>) -> Self {
        self.activity_repo = Some(activity_repo);
        self
    }

    pub fn with_namespace_policy(mut self, namespace_policy: Arc<dyn NamespacePolicy>) -> Self {
        self.namespace_policy = Some(namespace_policy);
        self
    }

    /// Build application state with all use cases
    pub fn build(self) -> Result<AppState, BuildError> {
        let repository_store = self
            .repository_store
            .ok_or("Repository store not initialized")?;
        let tag_store = self.tag_store.ok_or("Tag store not initialized")?;
        let registry = self.registry.ok_or("Registry gateway not initialized")?;
        let feature_flags = self.feature_flags.ok_or("Feature flags not initialized")?;
        let namespace_policy = self
            .namespace_policy
            .ok_or("Namespace policy not initialized")?;

        // Initialize use cases (application layer)
        let catalog = Arc::new(CatalogQueryService::new(
            Arc::clone(&repository_store),
            Arc::clone(&tag_store),
            namespace_policy,
        ));

        let mut delete_use_case = DeleteRepositoryUseCase::new(repository_store, tag_store, registry);
        if let Some(activity_repo) = self.activity_repo {
            delete_use_case = delete_use_case.with_activity_repo(activity_repo);
        }

        info!("Application layer initialized");

        Ok(AppState {
            pool: self.pool.map(Arc::new),
            catalog,
            delete_use_case: Arc::new(delete_use_case),
            feature_flags,
            auth: Arc::new(self.config.auth.clone()),
            allowed_origins: self.config.allowed_origins.clone(),
        })
    }

    /// Get configuration
    pub fn config(&self) -> &Config {
        &self.config
    }
}
