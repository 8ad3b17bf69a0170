//! Static page handlers.
//!
//! Each route serves one fixed file from the configured assets directory
//! with a fixed MIME type. The admin page sits behind authentication; the
//! scripts and stylesheet are public so the login page can render.

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
};
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::middleware::RequireAuth;
use crate::state::AppState;

const HTML: &str = "text/html; charset=utf-8";
const CSS: &str = "text/css";
const JAVASCRIPT: &str = "application/javascript";

/// Serve one file from the assets directory with a fixed content type.
async fn serve_asset(state: &AppState, name: &str, content_type: &'static str) -> Result<Response> {
    let path = state.config().assets_dir.join(name);
    let body = tokio::fs::read(&path)
        .await
        .map_err(|_| AppError::NotFound(name.to_string()))?;

    Ok(([(header::CONTENT_TYPE, content_type)], body).into_response())
}

/// `GET /` - home page.
#[instrument(skip(state))]
pub async fn home(State(state): State<AppState>) -> Result<Response> {
    serve_asset(&state, "index.html", HTML).await
}

/// `GET /login` - login page.
#[instrument(skip(state))]
pub async fn login_page(State(state): State<AppState>) -> Result<Response> {
    serve_asset(&state, "login.html", HTML).await
}

/// `GET /admin.html` - catalog management page, requires auth.
#[instrument(skip(state, _auth))]
pub async fn admin_page(State(state): State<AppState>, _auth: RequireAuth) -> Result<Response> {
    serve_asset(&state, "admin.html", HTML).await
}

/// `GET /styles.css`
#[instrument(skip(state))]
pub async fn stylesheet(State(state): State<AppState>) -> Result<Response> {
    serve_asset(&state, "styles.css", CSS).await
}

/// `GET /script.js`
#[instrument(skip(state))]
pub async fn script(State(state): State<AppState>) -> Result<Response> {
    serve_asset(&state, "script.js", JAVASCRIPT).await
}

/// `GET /admin.js`
#[instrument(skip(state))]
pub async fn admin_script(State(state): State<AppState>) -> Result<Response> {
    serve_asset(&state, "admin.js", JAVASCRIPT).await
}

/// `GET /login.js`
#[instrument(skip(state))]
pub async fn login_script(State(state): State<AppState>) -> Result<Response> {
    serve_asset(&state, "login.js", JAVASCRIPT).await
}

/// `GET /hello` - greeting endpoint kept from the original service.
pub async fn hello() -> &'static str {
    "Welcome to Budget Lunch"
}
