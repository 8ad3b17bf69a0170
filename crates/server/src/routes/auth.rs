//! Authentication route handlers.
//!
//! All auth endpoints answer JSON `{success, message, ...}` bodies with the
//! user-facing messages of the original service. Known provider rejections
//! get specific messages; anything else collapses to one generic message per
//! operation.

use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{instrument, warn};
use tower_sessions::Session;

use crate::middleware::{OptionalAuth, clear_session_tokens, set_session_tokens};
use crate::models::{Identity, session_keys};
use crate::services::AuthError;
use crate::state::AppState;

/// JSON body for sign-up and login.
#[derive(Debug, Deserialize)]
pub struct CredentialsPayload {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// User object echoed back on success.
#[derive(Debug, Serialize)]
pub struct UserPayload {
    pub id: String,
    pub email: Option<String>,
}

impl From<Identity> for UserPayload {
    fn from(identity: Identity) -> Self {
        Self {
            id: identity.id,
            email: identity.email,
        }
    }
}

/// Standard auth response body.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<UserPayload>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
}

impl AuthResponse {
    fn failure(message: &str) -> Self {
        Self {
            success: false,
            message: message.to_string(),
            user: None,
            access_token: None,
        }
    }
}

/// Response body for `GET /check-auth`.
#[derive(Debug, Serialize)]
pub struct CheckAuthResponse {
    pub authenticated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<UserPayload>,
}

fn auth_disabled() -> (StatusCode, Json<AuthResponse>) {
    (
        StatusCode::SERVICE_UNAVAILABLE,
        Json(AuthResponse::failure(
            "Authentication is not enabled on this server",
        )),
    )
}

/// `POST /signup` - create an account with the identity provider.
#[instrument(skip(state, payload))]
pub async fn signup(
    State(state): State<AppState>,
    Json(payload): Json<CredentialsPayload>,
) -> (StatusCode, Json<AuthResponse>) {
    let Some(gateway) = state.auth() else {
        return auth_disabled();
    };

    match gateway.sign_up(&payload.email, &payload.password).await {
        Ok(identity) => (
            StatusCode::OK,
            Json(AuthResponse {
                success: true,
                message: "Account created successfully! Please check your email to confirm \
                          your account."
                    .to_string(),
                user: Some(identity.into()),
                access_token: None,
            }),
        ),
        Err(err) => {
            let message = match &err {
                AuthError::MissingCredentials => "Email and password are required",
                AuthError::PasswordTooShort { .. } => {
                    "Password must be at least 6 characters long"
                }
                AuthError::InvalidEmail => "Please enter a valid email address",
                AuthError::AlreadyRegistered => "An account with this email already exists",
                _ => "Failed to create account. Please try again.",
            };
            if let AuthError::Provider(cause) = &err {
                warn!(error = %cause, "sign-up failed");
            }
            (StatusCode::BAD_REQUEST, Json(AuthResponse::failure(message)))
        }
    }
}

/// `POST /login` - verify credentials and establish a session.
#[instrument(skip(state, session, payload))]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<CredentialsPayload>,
) -> (StatusCode, Json<AuthResponse>) {
    let Some(gateway) = state.auth() else {
        return auth_disabled();
    };

    match gateway.sign_in(&payload.email, &payload.password).await {
        Ok((identity, provider_session)) => {
            if let Err(err) = set_session_tokens(&session, &provider_session).await {
                warn!(error = %err, "failed to persist session tokens");
                return (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(AuthResponse::failure("Login failed. Please try again.")),
                );
            }

            (
                StatusCode::OK,
                Json(AuthResponse {
                    success: true,
                    message: "Login successful".to_string(),
                    user: Some(identity.into()),
                    access_token: Some(provider_session.access_token),
                }),
            )
        }
        Err(AuthError::MissingCredentials) => (
            StatusCode::BAD_REQUEST,
            Json(AuthResponse::failure("Email and password are required")),
        ),
        Err(err) => {
            let message = match &err {
                AuthError::InvalidCredentials => "Invalid email or password",
                AuthError::EmailNotConfirmed => {
                    "Please check your email and confirm your account before logging in"
                }
                _ => "Login failed. Please try again.",
            };
            if let AuthError::Provider(cause) = &err {
                warn!(error = %cause, "sign-in failed");
            }
            (
                StatusCode::UNAUTHORIZED,
                Json(AuthResponse::failure(message)),
            )
        }
    }
}

/// `POST /logout` - revoke the provider session, clear local state.
///
/// Always reports success: local session tokens are cleared even when the
/// provider call fails.
#[instrument(skip(state, session))]
pub async fn logout(
    State(state): State<AppState>,
    session: Session,
) -> Json<AuthResponse> {
    let access_token = session
        .get::<String>(session_keys::ACCESS_TOKEN)
        .await
        .ok()
        .flatten();

    if let Some(gateway) = state.auth() {
        gateway.sign_out(access_token.as_deref()).await;
    }

    if let Err(err) = clear_session_tokens(&session).await {
        warn!(error = %err, "failed to clear session tokens");
    }

    Json(AuthResponse {
        success: true,
        message: "Logged out successfully".to_string(),
        user: None,
        access_token: None,
    })
}

/// `GET /check-auth` - report whether the request carries a valid identity.
#[instrument(skip(identity))]
pub async fn check_auth(OptionalAuth(identity): OptionalAuth) -> Json<CheckAuthResponse> {
    Json(CheckAuthResponse {
        authenticated: identity.is_some(),
        user: identity.map(UserPayload::from),
    })
}
