// --- File: crates/salonify_common/src/lib.rs ---

// Declare modules within this crate
pub mod error; // Error handling
pub mod features; // Runtime feature handling
pub mod http; // HTTP utilities
pub mod logging; // Logging utilities
pub mod models; // Shared value types
pub mod routes; // Route definitions
pub mod services; // Service abstractions

// Re-export the routes function to be used by the main backend service
pub use routes::routes;

// Re-export error types and utilities for easier access
pub use error::{external_service_error, Context, HttpStatusCode, SalonifyError};

// Re-export HTTP utilities for easier access
pub use http::{client::create_client, map_json_error, IntoHttpResponse};

// Re-export logging utilities for easier access
pub use logging::{init, init_with_level, log_error};

pub use features::{is_feature_enabled, is_remote_api_enabled};
