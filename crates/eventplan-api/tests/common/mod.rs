//! Shared test helpers for API integration tests.
#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use eventplan_catalog::seed::seed_catalog;
use eventplan_core::clock::Clock;
use eventplan_core::rng::DeterministicRng;
use eventplan_test_support::{FixedClock, SequenceRng};
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use eventplan_api::state::AppState;

/// Fixed timestamp used across all integration tests.
fn fixed_clock() -> Arc<dyn Clock + Send + Sync> {
    Arc::new(FixedClock(
        chrono::TimeZone::with_ymd_and_hms(&chrono::Utc, 2026, 1, 15, 10, 0, 0).unwrap(),
    ))
}

fn rng(rng: SequenceRng) -> Arc<Mutex<dyn DeterministicRng + Send>> {
    Arc::new(Mutex::new(rng))
}

/// Build the full app over in-memory repositories holding the default
/// catalog. Uses the same route structure as `main.rs`.
pub async fn build_test_app() -> Router {
    build_test_app_with_rng(SequenceRng::new(vec![])).await
}

/// Same as [`build_test_app`] with a custom `SequenceRng` for tests that
/// need a deterministic issue draw.
pub async fn build_test_app_with_rng(sequence: SequenceRng) -> Router {
    let state = AppState::in_memory(fixed_clock(), rng(sequence));
    seed_catalog(&state.catalog).await.unwrap();
    eventplan_api::app(state)
}

/// Build the full app over PostgreSQL repositories holding the default
/// catalog.
pub async fn build_pg_test_app(pool: &PgPool) -> Router {
    let state = AppState::postgres(pool, fixed_clock(), rng(SequenceRng::new(vec![])));
    seed_catalog(&state.catalog).await.unwrap();
    eventplan_api::app(state)
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if body_bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&body_bytes).unwrap()
    };

    (status, json)
}

/// Send a POST request with a JSON body and return the response.
pub async fn post_json(
    app: Router,
    uri: &str,
    body: &serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap();

    send(app, request).await
}

/// Send a POST request without a body and return the response.
pub async fn post_empty(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    send(app, request).await
}

/// Send a GET request and return the response.
pub async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    send(app, request).await
}

/// Send a DELETE request and return the response.
pub async fn delete(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("DELETE")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    send(app, request).await
}

/// Id of the entry of `kind` whose `field` is lowest (or highest when
/// `highest` is set).
pub async fn pick(app: Router, kind: &str, field: &str, highest: bool) -> String {
    let (status, json) = get_json(app, &format!("/api/v1/catalog/{kind}")).await;
    assert_eq!(status, StatusCode::OK);
    let entries = json.as_array().unwrap();
    let by_field = |e: &&serde_json::Value| e[field].as_i64().unwrap();
    let entry = if highest {
        entries.iter().max_by_key(by_field)
    } else {
        entries.iter().min_by_key(by_field)
    };
    entry.unwrap()["id"].as_str().unwrap().to_owned()
}
