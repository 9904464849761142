mod runtime_feature_flags;
mod visibility_policy;

pub use runtime_feature_flags::RuntimeFeatureFlags;
pub use visibility_policy::VisibilityPolicy;
