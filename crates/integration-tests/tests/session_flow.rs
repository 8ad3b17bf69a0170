//! End-to-end tests for the authenticated session lifecycle.
//!
//! A stub identity provider runs on a local listener and answers the three
//! provider endpoints the gateway uses (password sign-in, token
//! verification, sign-out). That exercises the full login, check-auth and
//! logout round trip, including session-cookie persistence, without a live
//! Supabase project.

#![allow(clippy::unwrap_used)]

use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode, header};
use axum::routing::{get, post};
use axum::{Json, Router};
use budget_lunch_integration_tests::{app_with_provider, into_text, send};
use serde_json::{Value, json};

const STUB_EMAIL: &str = "diner@example.com";
const STUB_PASSWORD: &str = "longenough";
const STUB_USER_ID: &str = "00000000-0000-4000-8000-000000000001";
const STUB_ACCESS_TOKEN: &str = "stub-access-token";

async fn stub_token(Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    if body["email"] == STUB_EMAIL && body["password"] == STUB_PASSWORD {
        (
            StatusCode::OK,
            Json(json!({
                "access_token": STUB_ACCESS_TOKEN,
                "token_type": "bearer",
                "expires_in": 3600,
                "refresh_token": "stub-refresh-token",
                "user": {"id": STUB_USER_ID, "email": STUB_EMAIL},
            })),
        )
    } else {
        (
            StatusCode::BAD_REQUEST,
            Json(json!({"msg": "Invalid login credentials"})),
        )
    }
}

async fn stub_user(headers: HeaderMap) -> (StatusCode, Json<Value>) {
    let bearer = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "));

    if bearer == Some(STUB_ACCESS_TOKEN) {
        (
            StatusCode::OK,
            Json(json!({"id": STUB_USER_ID, "email": STUB_EMAIL})),
        )
    } else {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({"msg": "invalid JWT"})),
        )
    }
}

async fn stub_logout() -> StatusCode {
    StatusCode::NO_CONTENT
}

/// Spawn the stub provider on an ephemeral port and return its base URL.
async fn spawn_stub_provider() -> String {
    let stub = Router::new()
        .route("/auth/v1/token", post(stub_token))
        .route("/auth/v1/user", get(stub_user))
        .route("/auth/v1/logout", post(stub_logout));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, stub).await.unwrap();
    });

    format!("http://{addr}")
}

/// The session cookie from a response, ready to send back.
fn session_cookie(response: &axum::http::Response<Body>) -> String {
    response.headers()[header::SET_COOKIE]
        .to_str()
        .unwrap()
        .split(';')
        .next()
        .unwrap()
        .to_string()
}

async fn login(app: Router) -> (axum::http::Response<Body>, String) {
    let response = send(
        app,
        Request::post("/login")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(
                json!({"email": STUB_EMAIL, "password": STUB_PASSWORD}).to_string(),
            ))
            .unwrap(),
    )
    .await;
    let cookie = session_cookie(&response);
    (response, cookie)
}

async fn get_with_cookie(app: Router, path: &str, cookie: &str) -> (StatusCode, Value) {
    let response = send(
        app,
        Request::get(path)
            .header(header::COOKIE, cookie)
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    let (status, text) = into_text(response).await;
    (status, serde_json::from_str(&text).unwrap())
}

#[tokio::test]
async fn login_establishes_a_session_and_logout_ends_it() {
    let app = app_with_provider(&spawn_stub_provider().await);

    let (response, cookie) = login(app.clone()).await;
    let (status, text) = into_text(response).await;
    assert_eq!(status, StatusCode::OK);
    let body: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Login successful");
    assert_eq!(body["user"]["id"], STUB_USER_ID);
    assert_eq!(body["access_token"], STUB_ACCESS_TOKEN);

    let (status, body) = get_with_cookie(app.clone(), "/check-auth", &cookie).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["authenticated"], true);
    assert_eq!(body["user"]["id"], STUB_USER_ID);

    let response = send(
        app.clone(),
        Request::post("/logout")
            .header(header::COOKIE, &cookie)
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    let (status, text) = into_text(response).await;
    assert_eq!(status, StatusCode::OK);
    let body: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(body["success"], true);

    // The stored token is gone, so the same cookie is anonymous again.
    let (status, body) = get_with_cookie(app, "/check-auth", &cookie).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["authenticated"], false);
}

#[tokio::test]
async fn session_cookie_unlocks_protected_routes() {
    let app = app_with_provider(&spawn_stub_provider().await);

    let (_, cookie) = login(app.clone()).await;

    let (status, items) = get_with_cookie(app, "/list", &cookie).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(items.as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn bearer_token_works_without_a_session() {
    let app = app_with_provider(&spawn_stub_provider().await);

    let response = send(
        app,
        Request::get("/list")
            .header(header::AUTHORIZATION, format!("Bearer {STUB_ACCESS_TOKEN}"))
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn wrong_password_is_rejected_with_the_provider_message() {
    let app = app_with_provider(&spawn_stub_provider().await);

    let response = send(
        app,
        Request::post("/login")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(
                json!({"email": STUB_EMAIL, "password": "wrong-password"}).to_string(),
            ))
            .unwrap(),
    )
    .await;
    let (status, text) = into_text(response).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    let body: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Invalid email or password");
}
