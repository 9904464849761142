use std::collections::HashMap;

use crate::application::ports::DeleteSettings;

#[derive(Debug, Clone)]
pub struct Config {
    /// PostgreSQL URL; the in-memory catalog is used when absent
    pub database_url: Option<String>,
    pub listen_addr: String,
    // Database connection pool settings
    pub db_max_connections: u32,
    pub db_min_connections: u32,
    pub db_acquire_timeout_secs: u64,
    pub db_idle_timeout_secs: u64,
    pub db_max_lifetime_secs: u64,
    // Image registry
    pub registry_url: String,
    pub registry_token: Option<String>,
    pub registry_timeout_secs: u64,
    // delete.enabled and the per-request fan-out bound
    pub delete_enabled: bool,
    pub delete_concurrency: usize,
    /// CORS origins; any origin is allowed when empty
    pub allowed_origins: Vec<String>,
    pub auth: AuthConfig,
}

/// Credentials accepted by the auth middleware
#[derive(Debug, Clone, Default)]
pub struct AuthConfig {
    pub api_keys: Vec<String>,
    pub jwt_secret: Option<String>,
    /// Development switch: every request runs as an administrator
    pub disable_auth: bool,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from any key/value source
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|s| !s.trim().is_empty());

        Self {
            database_url: non_empty("DATABASE_URL"),
            listen_addr: lookup("LISTEN_ADDR").unwrap_or_else(|| "0.0.0.0:8080".to_string()),
            db_max_connections: parse_var(&lookup, "DB_MAX_CONNECTIONS").unwrap_or(20),
            db_min_connections: parse_var(&lookup, "DB_MIN_CONNECTIONS").unwrap_or(5),
            db_acquire_timeout_secs: parse_var(&lookup, "DB_ACQUIRE_TIMEOUT_SECS").unwrap_or(30),
            db_idle_timeout_secs: parse_var(&lookup, "DB_IDLE_TIMEOUT_SECS").unwrap_or(600), // 10 minutes
            db_max_lifetime_secs: parse_var(&lookup, "DB_MAX_LIFETIME_SECS").unwrap_or(1800), // 30 minutes
            registry_url: lookup("REGISTRY_URL")
                .unwrap_or_else(|| "http://localhost:5000".to_string()),
            registry_token: non_empty("REGISTRY_TOKEN"),
            registry_timeout_secs: parse_var(&lookup, "REGISTRY_TIMEOUT_SECS").unwrap_or(30),
            delete_enabled: lookup("DELETE_ENABLED")
                .map(|s| parse_bool(&s))
                .unwrap_or(false),
            delete_concurrency: parse_var(&lookup, "DELETE_CONCURRENCY")
                .unwrap_or(DeleteSettings::DEFAULT_CONCURRENCY),
            allowed_origins: lookup("ALLOWED_ORIGINS")
                .map(|s| split_list(&s))
                .unwrap_or_default(),
            auth: AuthConfig {
                api_keys: lookup("API_KEYS")
                    .map(|keys| split_list(&keys))
                    .unwrap_or_default(),
                jwt_secret: non_empty("JWT_SECRET"),
                disable_auth: lookup("DISABLE_AUTH")
                    .map(|s| parse_bool(&s))
                    .unwrap_or(false),
            },
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        // Validate database URL format
        if let Some(url) = &self.database_url {
            if !url.starts_with("postgres://") && !url.starts_with("postgresql://") {
                return Err(
                    "DATABASE_URL must start with postgres:// or postgresql://".to_string()
                );
            }
        }

        // Validate listen address
        if self.listen_addr.is_empty() {
            return Err("LISTEN_ADDR cannot be empty".to_string());
        }

        if self.db_min_connections > self.db_max_connections {
            return Err("DB_MIN_CONNECTIONS cannot exceed DB_MAX_CONNECTIONS".to_string());
        }

        if !self.registry_url.starts_with("http://") && !self.registry_url.starts_with("https://")
        {
            return Err("REGISTRY_URL must start with http:// or https://".to_string());
        }

        if self.registry_timeout_secs == 0 {
            return Err("REGISTRY_TIMEOUT_SECS must be at least 1 second".to_string());
        }

        if !(1..=64).contains(&self.delete_concurrency) {
            return Err("DELETE_CONCURRENCY must be between 1 and 64".to_string());
        }

        Ok(())
    }

    /// Initial value of the runtime deletion settings
    pub fn delete_settings(&self) -> DeleteSettings {
        DeleteSettings {
            enabled: self.delete_enabled,
            concurrency: self.delete_concurrency,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

fn parse_var<T, F>(lookup: &F, key: &str) -> Option<T>
where
    T: std::str::FromStr,
    F: Fn(&str) -> Option<String>,
{
    lookup(key).and_then(|s| s.trim().parse().ok())
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_bool(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

/// Lookup over a fixed set of pairs, for tests and tooling
pub fn lookup_from_pairs(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| map.get(key).cloned()
}
