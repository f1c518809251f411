//! Runtime feature handling for the Salonify application.
//!
//! ## Available Features
//!
//! - `openapi` (compile time): enables OpenAPI documentation generation
//! - `use_remote_api` (runtime): bookings and services are read from and
//!   written to the external appointment API instead of the embedded
//!   in-memory store

use salonify_config::AppConfig;

/// Check if a feature is enabled at runtime based on configuration.
///
/// A feature is on when its flag is set and its configuration section exists.
pub fn is_feature_enabled<T>(use_feature: bool, feature_config: Option<&T>) -> bool {
    use_feature && feature_config.is_some()
}

/// Check if the external appointment API should be used.
pub fn is_remote_api_enabled(config: &AppConfig) -> bool {
    is_feature_enabled(config.use_remote_api, config.remote_api.as_ref())
}
