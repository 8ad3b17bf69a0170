//! Authentication gateway.
//!
//! A thin layer over the Supabase Auth API. Provider failures during
//! verification and sign-out are deliberately swallowed: a request is never
//! failed because the identity provider is unreachable, it is simply treated
//! as anonymous. The underlying cause is always logged.

mod error;

pub use error::AuthError;

use tracing::warn;

use budget_lunch_core::Email;

use crate::config::SupabaseConfig;
use crate::models::Identity;
use crate::supabase::{AuthClient, ProviderSession, ProviderUser, SupabaseError};

/// Minimum password length accepted at sign-up.
const MIN_PASSWORD_LENGTH: usize = 6;

/// Authentication gateway backed by the Supabase Auth API.
#[derive(Clone)]
pub struct AuthGateway {
    client: AuthClient,
}

impl AuthGateway {
    /// Create a gateway for the configured Supabase project.
    #[must_use]
    pub fn new(config: &SupabaseConfig) -> Self {
        Self {
            client: AuthClient::new(config),
        }
    }

    /// Verify an access token against the provider.
    ///
    /// Best-effort by contract: any failure (network, expired token, garbage
    /// input) yields `None` and a warning log, never an error.
    pub async fn verify(&self, token: &str) -> Option<Identity> {
        match self.client.get_user(token).await {
            Ok(user) => Some(identity_from(user)),
            Err(err) => {
                warn!(error = %err, "token verification failed");
                None
            }
        }
    }

    /// Resolve the current identity from a bearer token and/or a
    /// session-stored token.
    ///
    /// The explicit bearer token wins; the session token is the fallback.
    /// Returns the first one that verifies.
    pub async fn current_identity(
        &self,
        bearer_token: Option<&str>,
        session_token: Option<&str>,
    ) -> Option<Identity> {
        if let Some(token) = bearer_token
            && let Some(identity) = self.verify(token).await
        {
            return Some(identity);
        }

        if let Some(token) = session_token {
            return self.verify(token).await;
        }

        None
    }

    /// Create a new account with the provider.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::MissingCredentials` / `PasswordTooShort` /
    /// `InvalidEmail` on local validation failure, `AlreadyRegistered` or
    /// `InvalidEmail` when the provider rejects, and `Provider` otherwise.
    pub async fn sign_up(&self, email: &str, password: &str) -> Result<Identity, AuthError> {
        let email = email.trim();
        if email.is_empty() || password.is_empty() {
            return Err(AuthError::MissingCredentials);
        }
        if password.len() < MIN_PASSWORD_LENGTH {
            return Err(AuthError::PasswordTooShort {
                min: MIN_PASSWORD_LENGTH,
            });
        }
        let email = Email::parse(email).map_err(|_| AuthError::InvalidEmail)?;

        let user = self
            .client
            .sign_up(email.as_str(), password)
            .await
            .map_err(classify_sign_up_error)?;

        Ok(identity_from(user))
    }

    /// Verify credentials with the provider and return the issued session.
    ///
    /// The caller persists the returned tokens into the request session.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::MissingCredentials` on empty input,
    /// `InvalidCredentials` / `EmailNotConfirmed` on classified provider
    /// rejections, and `Provider` otherwise.
    pub async fn sign_in(
        &self,
        email: &str,
        password: &str,
    ) -> Result<(Identity, ProviderSession), AuthError> {
        let email = email.trim();
        if email.is_empty() || password.is_empty() {
            return Err(AuthError::MissingCredentials);
        }

        let session = self
            .client
            .sign_in(email, password)
            .await
            .map_err(classify_sign_in_error)?;

        Ok((identity_from(session.user.clone()), session))
    }

    /// Revoke the provider session behind a token, best-effort.
    ///
    /// Never fails: the caller clears local session state unconditionally,
    /// and a provider failure here is only worth a warning.
    pub async fn sign_out(&self, access_token: Option<&str>) {
        let Some(token) = access_token else {
            return;
        };

        if let Err(err) = self.client.sign_out(token).await {
            warn!(error = %err, "provider sign-out failed, clearing session anyway");
        }
    }
}

fn identity_from(user: ProviderUser) -> Identity {
    Identity {
        id: user.id,
        email: user.email,
    }
}

/// Map known sign-up rejection messages to specific errors.
fn classify_sign_up_error(err: SupabaseError) -> AuthError {
    if let Some(message) = err.api_message() {
        let message = message.to_lowercase();
        if message.contains("already registered") {
            return AuthError::AlreadyRegistered;
        }
        if message.contains("invalid email") {
            return AuthError::InvalidEmail;
        }
    }
    AuthError::Provider(err)
}

/// Map known sign-in rejection messages to specific errors.
fn classify_sign_in_error(err: SupabaseError) -> AuthError {
    if let Some(message) = err.api_message() {
        let message = message.to_lowercase();
        if message.contains("invalid login credentials") {
            return AuthError::InvalidCredentials;
        }
        if message.contains("email not confirmed") {
            return AuthError::EmailNotConfirmed;
        }
    }
    AuthError::Provider(err)
}

#[cfg(test)]
mod tests {
    use super::*;

    use axum::http::StatusCode;

    fn api_error(message: &str) -> SupabaseError {
        SupabaseError::Api {
            status: StatusCode::BAD_REQUEST,
            message: message.to_string(),
        }
    }

    #[test]
    fn test_classify_sign_up_already_registered() {
        let err = classify_sign_up_error(api_error("User already registered"));
        assert!(matches!(err, AuthError::AlreadyRegistered));
    }

    #[test]
    fn test_classify_sign_up_invalid_email() {
        let err = classify_sign_up_error(api_error("Unable to validate email: invalid email"));
        assert!(matches!(err, AuthError::InvalidEmail));
    }

    #[test]
    fn test_classify_sign_up_unknown_collapses_to_provider() {
        let err = classify_sign_up_error(api_error("quota exceeded"));
        assert!(matches!(err, AuthError::Provider(_)));
    }

    #[test]
    fn test_classify_sign_in_bad_credentials() {
        let err = classify_sign_in_error(api_error("Invalid login credentials"));
        assert!(matches!(err, AuthError::InvalidCredentials));
    }

    #[test]
    fn test_classify_sign_in_unconfirmed_email() {
        let err = classify_sign_in_error(api_error("Email not confirmed"));
        assert!(matches!(err, AuthError::EmailNotConfirmed));
    }

    #[test]
    fn test_classify_sign_in_network_error_stays_provider() {
        let err = classify_sign_in_error(SupabaseError::Api {
            status: StatusCode::SERVICE_UNAVAILABLE,
            message: "upstream timeout".to_string(),
        });
        assert!(matches!(err, AuthError::Provider(_)));
    }
}
