//! Authentication middleware and extractors.
//!
//! Provides extractors for requiring an authenticated identity in route
//! handlers. A request proves identity with a `Authorization: Bearer` token
//! or, failing that, with the access token stored in its session; either way
//! the token is verified against the identity provider on every request.

use axum::{
    Json,
    extract::FromRequestParts,
    http::{HeaderMap, StatusCode, header::AUTHORIZATION, request::Parts},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tower_sessions::Session;

use crate::models::{Identity, session_keys};
use crate::state::AppState;
use crate::supabase::ProviderSession;

/// Extractor that requires an authenticated identity.
///
/// If no identity resolves, the handler is never invoked and the request is
/// rejected with 401. When no identity provider is configured (local
/// memory-only deployment) the extractor admits every request with `None`.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(
///     RequireAuth(identity): RequireAuth,
/// ) -> impl IntoResponse {
///     // identity is None only when auth is disabled
/// }
/// ```
pub struct RequireAuth(pub Option<Identity>);

/// Rejection returned when authentication is required but missing.
pub struct AuthRejection;

#[derive(Serialize)]
struct AuthRejectionBody {
    error: &'static str,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        (
            StatusCode::UNAUTHORIZED,
            Json(AuthRejectionBody {
                error: "Authentication required",
            }),
        )
            .into_response()
    }
}

impl FromRequestParts<AppState> for RequireAuth {
    type Rejection = AuthRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if state.auth().is_none() {
            // Unauthenticated local variant: protected routes are open.
            return Ok(Self(None));
        }

        let OptionalAuth(identity) = match OptionalAuth::from_request_parts(parts, state).await {
            Ok(optional) => optional,
            Err(never) => match never {},
        };

        identity.map(Some).map(Self).ok_or(AuthRejection)
    }
}

/// Extractor that optionally resolves the current identity.
///
/// Unlike `RequireAuth`, this never rejects the request.
pub struct OptionalAuth(pub Option<Identity>);

impl FromRequestParts<AppState> for OptionalAuth {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Some(gateway) = state.auth() else {
            return Ok(Self(None));
        };

        let bearer = bearer_token(&parts.headers);
        let session_token = match parts.extensions.get::<Session>() {
            Some(session) => session
                .get::<String>(session_keys::ACCESS_TOKEN)
                .await
                .ok()
                .flatten(),
            None => None,
        };

        let identity = gateway
            .current_identity(bearer.as_deref(), session_token.as_deref())
            .await;

        Ok(Self(identity))
    }
}

/// Extract the token from a `Authorization: Bearer <token>` header.
fn bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::to_owned)
}

/// Persist a provider session's tokens and user id into the session.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn set_session_tokens(
    session: &Session,
    provider: &ProviderSession,
) -> Result<(), tower_sessions::session::Error> {
    session
        .insert(session_keys::ACCESS_TOKEN, &provider.access_token)
        .await?;
    session
        .insert(session_keys::REFRESH_TOKEN, &provider.refresh_token)
        .await?;
    session
        .insert(session_keys::USER_ID, &provider.user.id)
        .await
}

/// Clear all authentication data from the session (logout).
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn clear_session_tokens(
    session: &Session,
) -> Result<(), tower_sessions::session::Error> {
    session
        .remove::<String>(session_keys::ACCESS_TOKEN)
        .await?;
    session
        .remove::<String>(session_keys::REFRESH_TOKEN)
        .await?;
    session.remove::<String>(session_keys::USER_ID).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use axum::http::HeaderValue;

    #[test]
    fn test_bearer_token_extraction() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer abc.def"));
        assert_eq!(bearer_token(&headers), Some("abc.def".to_string()));
    }

    #[test]
    fn test_bearer_token_requires_bearer_scheme() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Basic abc"));
        assert_eq!(bearer_token(&headers), None);
    }

    #[test]
    fn test_bearer_token_missing_header() {
        assert_eq!(bearer_token(&HeaderMap::new()), None);
    }
}
