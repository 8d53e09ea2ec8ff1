//! Axum router wiring.

use axum::{
    routing::{get, post},
    Router,
};

use crate::{app_state::AppState, ops};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(ops::healthz))
        .route("/readyz", get(ops::readyz))
        .route("/metrics", get(ops::metrics))
        .route("/api/prometheus", get(ops::metrics))
        .route("/api/events", post(ops::ingest_event))
        .route("/api/states", post(ops::ingest_states))
        .with_state(state)
}
