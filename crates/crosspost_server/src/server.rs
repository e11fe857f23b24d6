//! Router assembly and the listening loop.

use crate::routes::{generate, health, not_found, platforms, upload};
use crate::{AppState, ServerSettings};
use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use tower_http::trace::TraceLayer;
use tracing::info;

/// Build the API router.
pub fn router(state: AppState) -> Router {
    let max_body_bytes = state.max_body_bytes();
    Router::new()
        .route("/health", get(health::status))
        .route("/api/status", get(health::status))
        .route("/api/platforms", get(platforms::list))
        .route("/api/upload", post(upload::upload))
        .route("/api/generate", post(generate::generate))
        .fallback(not_found)
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serve the API until Ctrl+C.
pub async fn serve(settings: &ServerSettings, state: AppState) -> anyhow::Result<()> {
    tokio::fs::create_dir_all(state.upload_dir()).await?;

    let listener = tokio::net::TcpListener::bind(&settings.bind).await?;
    info!(
        addr = %listener.local_addr()?,
        upload_dir = %state.upload_dir().display(),
        "Crosspost server listening"
    );

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
}
