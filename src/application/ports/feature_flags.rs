/// Snapshot of the deletion settings, taken once per request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeleteSettings {
    /// The `delete.enabled` flag
    pub enabled: bool,
    /// Upper bound of registry calls in flight for one request
    pub concurrency: usize,
}

impl DeleteSettings {
    pub const DEFAULT_CONCURRENCY: usize = 4;

    pub fn enabled() -> Self {
        Self {
            enabled: true,
            ..Self::default()
        }
    }

    pub fn disabled() -> Self {
        Self::default()
    }
}

impl Default for DeleteSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            concurrency: Self::DEFAULT_CONCURRENCY,
        }
    }
}

/// Port for runtime-configurable feature flags
pub trait FeatureFlags: Send + Sync {
    fn delete_settings(&self) -> DeleteSettings;

    /// Toggle `delete.enabled`; requests already running keep their snapshot
    fn set_delete_enabled(&self, enabled: bool);
}
