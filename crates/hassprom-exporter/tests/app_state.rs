//! Application wiring: bus subscriptions, auth, teardown, HTTP handlers.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use axum::body::{to_bytes, Body};
use axum::extract::{FromRequest, State as AxState};
use axum::http::{header, HeaderMap, HeaderValue, Request, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::Value;

use hassprom_core::error::ErrorCode;
use hassprom_core::model::EventType;
use hassprom_core::{Event, State};
use hassprom_exporter::app_state::AppState;
use hassprom_exporter::{config, ops};

fn app(yaml: &str) -> AppState {
    AppState::new(config::load_from_str(yaml).unwrap()).unwrap()
}

async fn json_body(resp: Response) -> Value {
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn json_request(body: &'static str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body))
        .unwrap()
}

#[test]
fn subscribes_to_both_event_types() {
    let state = app("version: 1\n");
    assert_eq!(state.bus().listener_count(EventType::StateChanged), 1);
    assert_eq!(state.bus().listener_count(EventType::EntityRegistryUpdated), 1);

    let ran = state.publish(&Event::state_changed(None, State::new("light.a", "on")));
    assert_eq!(ran, 1);
    assert_eq!(
        state.registry().value("light_brightness_percent", &["light.a", "light", ""]),
        Some(100.0)
    );
}

#[test]
fn authorize_with_and_without_token() {
    let open = app("version: 1\n");
    assert!(open.authorize(None).is_ok());
    assert!(open.authorize(Some("Bearer whatever")).is_ok());

    let locked = app("version: 1\nexporter:\n  auth_token: s3cret\n");
    assert!(locked.authorize(Some("Bearer s3cret")).is_ok());
    let err = locked.authorize(None).unwrap_err();
    assert_eq!(err.code(), ErrorCode::Unauthorized);
    assert!(locked.authorize(Some("Bearer nope")).is_err());
    assert!(locked.authorize(Some("s3cret")).is_err());
    assert!(locked.authorize(Some("Bearer  s3cret")).is_err());
    assert!(locked.authorize(Some("Bearer s3cret ")).is_err());
}

#[test]
fn render_includes_namespace_and_self_metrics() {
    let state = app("version: 1\nexporter:\n  namespace: hass\n");
    state.publish(&Event::state_changed(
        None,
        State::new("sensor.co2", "415").with_attr("unit_of_measurement", "ppm"),
    ));

    let text = state.render_metrics();
    assert!(text.contains("# TYPE hass_sensor_unit_ppm gauge"));
    assert!(text.contains(
        "hass_sensor_unit_ppm{entity=\"sensor.co2\",domain=\"sensor\",friendly_name=\"\"} 415.0"
    ));
    assert!(text.contains("# TYPE hass_state_change_total counter"));
    assert!(text.contains("hassprom_events_total{type=\"state_changed\"} 1"));
}

#[test]
fn shutdown_unsubscribes_and_clears() {
    let state = app("version: 1\n");
    state.prime(&[State::new("switch.a", "on"), State::new("switch.b", "off")]);
    assert_eq!(state.registry().entity_count(), 2);

    state.shutdown();
    assert!(state.is_draining());
    assert_eq!(state.registry().entity_count(), 0);
    assert_eq!(state.registry().family_count(), 0);
    assert_eq!(state.bus().listener_count(EventType::StateChanged), 0);

    let ran = state.publish(&Event::state_changed(None, State::new("switch.c", "on")));
    assert_eq!(ran, 0);
    assert_eq!(state.registry().entity_count(), 0);

    // second call is a no-op
    state.shutdown();
    assert!(state.is_draining());
}

#[test]
fn invalid_component_glob_fails_construction() {
    let cfg = config::load_from_str(
        "version: 1\ncomponent_config_glob:\n  \"  \":\n    override_metric: x\n",
    )
    .unwrap();
    assert!(AppState::new(cfg).is_err());
}

#[tokio::test]
async fn metrics_endpoint_status() {
    let state = app("version: 1\nexporter:\n  auth_token: s3cret\n");

    let resp = ops::metrics(AxState(state.clone()), HeaderMap::new()).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let mut headers = HeaderMap::new();
    headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer s3cret"));
    let resp = ops::metrics(AxState(state), headers).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers().get(header::CONTENT_TYPE).unwrap(),
        "text/plain; version=0.0.4; charset=utf-8"
    );
}

#[tokio::test]
async fn ingest_endpoints_and_drain() {
    let state = app("version: 1\n");

    let resp = ops::ingest_event(
        AxState(state.clone()),
        Ok(Json(Event::state_changed(None, State::new("lock.door", "locked")))),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::ACCEPTED);
    assert_eq!(state.registry().value("lock_state", &["lock.door", "lock", ""]), Some(1.0));

    let resp = ops::ingest_states(
        AxState(state.clone()),
        Ok(Json(vec![State::new("person.a", "home")])),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::ACCEPTED);

    let ready = ops::readyz(AxState(state.clone())).await.into_response();
    assert_eq!(ready.status(), StatusCode::OK);

    state.shutdown();
    let ready = ops::readyz(AxState(state.clone())).await.into_response();
    assert_eq!(ready.status(), StatusCode::SERVICE_UNAVAILABLE);

    let resp = ops::ingest_event(
        AxState(state.clone()),
        Ok(Json(Event::state_changed(None, State::new("lock.door", "unlocked")))),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body = json_body(resp).await;
    assert_eq!(body["code"], "UNAVAILABLE");
    assert!(body["msg"].as_str().unwrap().contains("draining"));

    let resp = ops::ingest_states(AxState(state.clone()), Ok(Json(vec![]))).await;
    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(json_body(resp).await["code"], "UNAVAILABLE");

    let health = ops::healthz().await.into_response();
    assert_eq!(health.status(), StatusCode::OK);
}

#[tokio::test]
async fn malformed_bodies_get_json_errors() {
    let state = app("version: 1\n");

    let payload = Json::<Event>::from_request(json_request("{\"event_type\": 7"), &()).await;
    assert!(payload.is_err());
    let resp = ops::ingest_event(AxState(state.clone()), payload).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = json_body(resp).await;
    assert_eq!(body["code"], "BAD_REQUEST");
    assert!(!body["msg"].as_str().unwrap().is_empty());

    let payload = Json::<Vec<State>>::from_request(json_request("{\"not\": \"a list\"}"), &()).await;
    let resp = ops::ingest_states(AxState(state.clone()), payload).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(resp).await["code"], "BAD_REQUEST");
    assert_eq!(state.registry().entity_count(), 0);
}

#[test]
fn prime_waits_for_in_flight_dispatch() {
    let state = app("version: 1\n");
    let released = Arc::new(AtomicBool::new(false));
    let (locked_tx, locked_rx) = mpsc::channel();

    let holder = {
        let bus = state.bus().clone();
        let released = Arc::clone(&released);
        thread::spawn(move || {
            bus.exclusive(|| {
                locked_tx.send(()).unwrap();
                thread::sleep(Duration::from_millis(100));
                released.store(true, Ordering::SeqCst);
            });
        })
    };

    locked_rx.recv().unwrap();
    let n = state.prime(&[State::new("switch.a", "on")]);
    assert!(released.load(Ordering::SeqCst));
    assert_eq!(n, 1);
    holder.join().unwrap();
}
