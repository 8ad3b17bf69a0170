//! Supabase API clients.
//!
//! # Architecture
//!
//! - Plain `reqwest` calls against the two Supabase surfaces this service
//!   uses; no SDK, no local sync
//! - Single-shot requests with a bounded client timeout, no retries; a slow
//!   remote call stalls only the request that made it
//!
//! # APIs
//!
//! ## Auth API (GoTrue)
//! - Sign-up, password sign-in, sign-out, token verification
//! - Authenticated with the project anon key plus a user bearer token
//!
//! ## Data API (PostgREST)
//! - Row operations on the `lunch_items` table
//! - Filtering is pushed to the server (`price=lte.X`, `id=eq.N`)

mod auth;
mod data;

pub use auth::{AuthClient, ProviderSession, ProviderUser};
pub use data::DataClient;

use axum::http::StatusCode;
use thiserror::Error;

/// Errors that can occur when talking to Supabase.
#[derive(Debug, Error)]
pub enum SupabaseError {
    /// HTTP request failed (network, timeout, TLS).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status returned by the API.
        status: StatusCode,
        /// Human-readable message extracted from the response body.
        message: String,
    },

    /// Response body could not be decoded.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

impl SupabaseError {
    /// The provider's error message, if this is an API error.
    ///
    /// Used by the auth service to pattern-match known provider messages
    /// ("already registered", "invalid login credentials", ...).
    #[must_use]
    pub fn api_message(&self) -> Option<&str> {
        match self {
            Self::Api { message, .. } => Some(message),
            _ => None,
        }
    }
}

/// Extract a human-readable message from a Supabase error body.
///
/// GoTrue and PostgREST disagree on the field name (`msg`, `message`,
/// `error_description`), so try each in turn before falling back to the raw
/// body.
fn error_message(body: &str) -> String {
    #[derive(serde::Deserialize, Default)]
    struct ErrorBody {
        msg: Option<String>,
        message: Option<String>,
        error_description: Option<String>,
    }

    let parsed: ErrorBody = serde_json::from_str(body).unwrap_or_default();

    parsed
        .msg
        .or(parsed.message)
        .or(parsed.error_description)
        .unwrap_or_else(|| body.trim().to_string())
}

/// Convert a non-success response into [`SupabaseError::Api`].
async fn response_error(response: reqwest::Response) -> SupabaseError {
    let status =
        StatusCode::from_u16(response.status().as_u16()).unwrap_or(StatusCode::BAD_GATEWAY);
    let body = response.text().await.unwrap_or_default();

    SupabaseError::Api {
        status,
        message: error_message(&body),
    }
}
