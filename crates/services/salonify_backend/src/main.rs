// File: services/salonify_backend/src/main.rs
use salonify_backend::AppState;
use salonify_common::Context;
use salonify_config::load_config;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    salonify_common::logging::init();

    let config = Arc::new(load_config()?);
    let state = AppState::new(config.clone())?;
    let app = state.router();

    // Bind and serve
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {}", addr))?;
    info!("Starting server at http://{}", addr);
    info!("API endpoints available at http://{}/api", addr);

    axum::serve(listener, app.into_make_service()).await?;
    Ok(())
}
