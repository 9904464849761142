use parking_lot::RwLock;
use tracing::info;

use crate::application::ports::{DeleteSettings, FeatureFlags};

/// Feature flags held in process memory, changeable while serving
pub struct RuntimeFeatureFlags {
    delete: RwLock<DeleteSettings>,
}

impl RuntimeFeatureFlags {
    pub fn new(settings: DeleteSettings) -> Self {
        Self {
            delete: RwLock::new(settings),
        }
    }

}

impl Default for RuntimeFeatureFlags {
    fn default() -> Self {
        Self::new(DeleteSettings::default())
    }
}

impl FeatureFlags for RuntimeFeatureFlags {
    fn delete_settings(&self) -> DeleteSettings {
        *self.delete.read()
    }

    fn set_delete_enabled(&self, enabled: bool) {
        let mut settings = self.delete.write();
        if settings.enabled != enabled {
            info!(enabled, "delete.enabled changed");
        }
        settings.enabled = enabled;
    }
}
