//! Operational and ingest HTTP endpoints.
//!
//! - `/healthz`        : liveness
//! - `/readyz`         : readiness (503 when shut down)
//! - `/metrics`        : Prometheus text format (bearer token when configured)
//! - `/api/events`     : POST one host event
//! - `/api/states`     : POST a batch of states (initial load)

use axum::{
    extract::{rejection::JsonRejection, State as AxState},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use hassprom_core::error::{ErrorCode, HasspromError};
use hassprom_core::metrics::CONTENT_TYPE;
use hassprom_core::{Event, State};

use crate::app_state::AppState;

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        ErrorCode::Unavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorCode::BadRequest
        | ErrorCode::LabelConflict
        | ErrorCode::KindMismatch
        | ErrorCode::UnsupportedVersion => StatusCode::BAD_REQUEST,
    }
}

fn error_response(err: HasspromError) -> Response {
    let code = err.code();
    (
        status_for(code),
        Json(json!({ "code": code.as_str(), "msg": err.to_string() })),
    )
        .into_response()
}

fn bad_body(rejection: JsonRejection) -> Response {
    error_response(HasspromError::BadRequest(rejection.body_text()))
}

pub async fn healthz() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}

pub async fn readyz(AxState(state): AxState<AppState>) -> impl IntoResponse {
    if state.is_draining() {
        (StatusCode::SERVICE_UNAVAILABLE, "draining")
    } else {
        (StatusCode::OK, "ready")
    }
}

pub async fn metrics(AxState(state): AxState<AppState>, headers: HeaderMap) -> Response {
    let auth = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok());
    if let Err(e) = state.authorize(auth) {
        tracing::debug!("metrics request rejected");
        return error_response(e);
    }

    let body = state.render_metrics();
    (StatusCode::OK, [(header::CONTENT_TYPE, CONTENT_TYPE)], body).into_response()
}

pub async fn ingest_event(
    AxState(state): AxState<AppState>,
    payload: std::result::Result<Json<Event>, JsonRejection>,
) -> Response {
    if state.is_draining() {
        return error_response(HasspromError::Draining);
    }
    let Json(event) = match payload {
        Ok(body) => body,
        Err(rejection) => return bad_body(rejection),
    };
    let handlers = state.publish(&event);
    (StatusCode::ACCEPTED, Json(json!({ "handlers": handlers }))).into_response()
}

pub async fn ingest_states(
    AxState(state): AxState<AppState>,
    payload: std::result::Result<Json<Vec<State>>, JsonRejection>,
) -> Response {
    if state.is_draining() {
        return error_response(HasspromError::Draining);
    }
    let Json(states) = match payload {
        Ok(body) => body,
        Err(rejection) => return bad_body(rejection),
    };
    let accepted = state.prime(&states);
    (
        StatusCode::ACCEPTED,
        Json(json!({ "accepted": accepted, "received": states.len() })),
    )
        .into_response()
}
