//! Shared helpers for the HTTP integration tests.
//!
//! Tests drive the full router through `tower::ServiceExt::oneshot`, so the
//! whole stack (sessions, auth extractors, handlers) runs in-process without
//! binding a socket.

#![cfg_attr(not(test), forbid(unsafe_code))]
#![allow(clippy::unwrap_used, clippy::missing_panics_doc)]

use std::net::IpAddr;
use std::path::PathBuf;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response, StatusCode, header};
use budget_lunch_server::catalog::{Catalog, MemoryCatalog};
use budget_lunch_server::config::{CatalogBackend, ServerConfig, SupabaseConfig};
use budget_lunch_server::services::AuthGateway;
use budget_lunch_server::state::AppState;
use http_body_util::BodyExt;
use secrecy::SecretString;
use serde_json::Value;
use tower::ServiceExt;

/// Base configuration for tests: memory backend, local addresses, and the
/// real static asset directory resolved relative to this crate.
#[must_use]
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".parse::<IpAddr>().unwrap(),
        port: 0,
        base_url: "http://127.0.0.1:0".to_string(),
        assets_dir: PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../server/static"),
        backend: CatalogBackend::Memory,
        supabase: None,
        sentry_dsn: None,
        sentry_environment: None,
    }
}

/// Router with the default menu and no identity provider. All routes are
/// open, matching the fully local deployment.
#[must_use]
pub fn open_app() -> Router {
    let state = AppState::from_parts(
        test_config(),
        Catalog::Memory(MemoryCatalog::with_default_menu()),
        None,
    );
    budget_lunch_server::app(state)
}

/// Router with the default menu and an auth gateway against the identity
/// provider at `provider_url`.
#[must_use]
pub fn app_with_provider(provider_url: &str) -> Router {
    let supabase = SupabaseConfig {
        url: provider_url.to_string(),
        anon_key: SecretString::from("test-anon-key"),
    };
    let mut config = test_config();
    config.supabase = Some(supabase.clone());

    let state = AppState::from_parts(
        config,
        Catalog::Memory(MemoryCatalog::with_default_menu()),
        Some(AuthGateway::new(&supabase)),
    );
    budget_lunch_server::app(state)
}

/// Router with the default menu and an auth gateway pointed at an
/// unreachable provider. Protected routes reject everyone, because token
/// verification can never succeed; public routes keep working.
///
/// Port 9 is the discard service, which nothing listens on, so requests
/// fail fast with connection refused.
#[must_use]
pub fn guarded_app() -> Router {
    app_with_provider("http://127.0.0.1:9")
}

/// Send a request and return the raw response.
pub async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.unwrap()
}

/// GET a path, returning status and body text.
pub async fn get(app: Router, path: &str) -> (StatusCode, String) {
    let response = send(
        app,
        Request::get(path).body(Body::empty()).unwrap(),
    )
    .await;
    into_text(response).await
}

/// Send a bodyless request with the given method.
pub async fn call(app: Router, method: &str, path: &str) -> (StatusCode, String) {
    let response = send(
        app,
        Request::builder()
            .method(method)
            .uri(path)
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    into_text(response).await
}

/// Send a JSON request with the given method, returning status and body text.
pub async fn call_json(
    app: Router,
    method: &str,
    path: &str,
    body: &Value,
) -> (StatusCode, String) {
    let response = send(
        app,
        Request::builder()
            .method(method)
            .uri(path)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await;
    into_text(response).await
}

/// POST a JSON payload and parse the JSON response.
pub async fn post_json(app: Router, path: &str, body: &Value) -> (StatusCode, Value) {
    let (status, text) = call_json(app, "POST", path, body).await;
    (status, serde_json::from_str(&text).unwrap())
}

/// GET a path and parse the body as JSON.
pub async fn get_json(app: Router, path: &str) -> (StatusCode, Value) {
    let (status, text) = get(app, path).await;
    (status, serde_json::from_str(&text).unwrap())
}

/// Collect a response body into text.
pub async fn into_text(response: Response<Body>) -> (StatusCode, String) {
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

/// Names of the items in a JSON search/list response, in order.
#[must_use]
pub fn item_names(items: &Value) -> Vec<String> {
    items
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["name"].as_str().unwrap().to_string())
        .collect()
}
