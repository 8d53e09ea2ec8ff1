//! hassprom exporter binary.
//!
//! - Loads `HASSPROM_CONFIG` (default `hassprom.yaml`)
//! - Serves `/metrics` plus event ingest endpoints
//! - Ctrl-C drains: stop accepting, unsubscribe, clear the registry

use std::net::SocketAddr;

use tracing_subscriber::{fmt, EnvFilter};

use hassprom_core::error::{HasspromError, Result};
use hassprom_exporter::{app_state, config, router};

const DEFAULT_CONFIG_PATH: &str = "hassprom.yaml";

#[tokio::main]
async fn main() {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    if let Err(e) = run().await {
        tracing::error!(error = %e, "hassprom-exporter failed");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let path = std::env::var("HASSPROM_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    let cfg = config::load_from_file(&path)?;
    // already checked by validate()
    let listen: SocketAddr = cfg
        .exporter
        .listen
        .parse()
        .map_err(|e| HasspromError::BadRequest(format!("exporter.listen: {e}")))?;

    let state = app_state::AppState::new(cfg)?;
    let app = router::build_router(state.clone());

    tracing::info!(%listen, config = %path, "hassprom-exporter starting");
    let listener = tokio::net::TcpListener::bind(listen)
        .await
        .map_err(|e| HasspromError::Internal(format!("bind {listen} failed: {e}")))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| HasspromError::Internal(format!("server failed: {e}")))?;

    state.shutdown();
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "ctrl-c handler unavailable");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
