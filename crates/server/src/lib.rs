//! Budget Lunch server library.
//!
//! A small food-ordering demo service: CRUD endpoints over a lunch-item
//! catalog, optionally gated by a Supabase-backed identity provider, plus a
//! handful of static pages.
//!
//! # Architecture
//!
//! - Axum web framework
//! - Catalog behind one capability set with two backends: in-process
//!   (mutex-guarded map) and Supabase Data API
//! - Authentication delegated to the Supabase Auth API; this service only
//!   holds opaque tokens in the session
//! - Best-effort auth policy: provider failures during verification and
//!   sign-out degrade to "anonymous", never to a failed request

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
pub mod supabase;

use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;

use state::AppState;

/// Build the application router: all routes, session layer, request
/// tracing, and the health endpoint.
///
/// The binary wraps this with Sentry layers; tests drive it directly.
pub fn app(state: AppState) -> Router {
    let session_layer = middleware::create_session_layer(state.config());

    Router::new()
        .route("/health", get(health))
        .merge(routes::routes())
        .layer(session_layer)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check the catalog
/// backend or the identity provider.
async fn health() -> &'static str {
    "ok"
}
