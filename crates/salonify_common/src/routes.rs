// --- File: crates/salonify_common/src/routes.rs ---

use axum::{routing::get, Router};

/// Creates a router containing routes shared by every deployment.
///
/// # Returns
/// A router with a liveness probe at `/health`.
pub fn routes() -> Router {
    Router::new().route("/health", get(|| async { "ok" }))
}
