//! Supabase Auth API (GoTrue) client.
//!
//! Handles account creation, password sign-in, sign-out, and access-token
//! verification. Every call carries the project anon key; user-scoped calls
//! additionally carry the user's bearer token.

use std::sync::Arc;
use std::time::Duration;

use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};

use crate::config::SupabaseConfig;
use crate::supabase::{SupabaseError, response_error};

/// Request timeout for auth calls.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// A user record as returned by the Auth API.
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderUser {
    /// Provider-assigned user UUID.
    pub id: String,
    /// Email on the account.
    pub email: Option<String>,
}

/// A session issued by the Auth API at sign-in.
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderSession {
    pub access_token: String,
    pub refresh_token: String,
    pub user: ProviderUser,
}

#[derive(Debug, Serialize)]
struct CredentialsBody<'a> {
    email: &'a str,
    password: &'a str,
}

/// Some GoTrue deployments wrap the user in a session envelope on sign-up.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SignUpResponse {
    Session { user: ProviderUser },
    User(ProviderUser),
}

/// Client for the Supabase Auth API.
#[derive(Clone)]
pub struct AuthClient {
    inner: Arc<AuthClientInner>,
}

struct AuthClientInner {
    client: reqwest::Client,
    base_url: String,
    anon_key: String,
}

impl AuthClient {
    /// Create a new Auth API client.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client cannot be constructed.
    #[must_use]
    pub fn new(config: &SupabaseConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            inner: Arc::new(AuthClientInner {
                client,
                base_url: format!("{}/auth/v1", config.url.trim_end_matches('/')),
                anon_key: config.anon_key.expose_secret().to_string(),
            }),
        }
    }

    /// Create a new account.
    ///
    /// # Errors
    ///
    /// Returns [`SupabaseError::Api`] with the provider's message on
    /// rejection (already registered, invalid email, weak password).
    pub async fn sign_up(
        &self,
        email: &str,
        password: &str,
    ) -> Result<ProviderUser, SupabaseError> {
        let response = self
            .inner
            .client
            .post(format!("{}/signup", self.inner.base_url))
            .header("apikey", &self.inner.anon_key)
            .json(&CredentialsBody { email, password })
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(response_error(response).await);
        }

        match response.json::<SignUpResponse>().await? {
            SignUpResponse::Session { user } | SignUpResponse::User(user) => Ok(user),
        }
    }

    /// Sign in with email and password (password grant).
    ///
    /// # Errors
    ///
    /// Returns [`SupabaseError::Api`] on bad credentials or an unconfirmed
    /// email, with the provider's message intact for translation upstream.
    pub async fn sign_in(
        &self,
        email: &str,
        password: &str,
    ) -> Result<ProviderSession, SupabaseError> {
        let response = self
            .inner
            .client
            .post(format!(
                "{}/token?grant_type=password",
                self.inner.base_url
            ))
            .header("apikey", &self.inner.anon_key)
            .json(&CredentialsBody { email, password })
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(response_error(response).await);
        }

        Ok(response.json().await?)
    }

    /// Revoke the session behind an access token.
    ///
    /// # Errors
    ///
    /// Returns an error if the provider rejects the call. Callers treat this
    /// as best-effort and clear local state regardless.
    pub async fn sign_out(&self, access_token: &str) -> Result<(), SupabaseError> {
        let response = self
            .inner
            .client
            .post(format!("{}/logout", self.inner.base_url))
            .header("apikey", &self.inner.anon_key)
            .bearer_auth(access_token)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(response_error(response).await);
        }

        Ok(())
    }

    /// Fetch the user behind an access token.
    ///
    /// A rejected, expired, or garbage token surfaces as
    /// [`SupabaseError::Api`] with a 401 status.
    ///
    /// # Errors
    ///
    /// Returns an error on network failure or token rejection.
    pub async fn get_user(&self, access_token: &str) -> Result<ProviderUser, SupabaseError> {
        let response = self
            .inner
            .client
            .get(format!("{}/user", self.inner.base_url))
            .header("apikey", &self.inner.anon_key)
            .bearer_auth(access_token)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(response_error(response).await);
        }

        Ok(response.json().await?)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_up_response_plain_user() {
        let body = r#"{"id": "uuid-1", "email": "a@b.c", "aud": "authenticated"}"#;
        let parsed: SignUpResponse = serde_json::from_str(body).unwrap();
        let SignUpResponse::User(user) = parsed else {
            panic!("expected plain user");
        };
        assert_eq!(user.id, "uuid-1");
    }

    #[test]
    fn test_sign_up_response_session_envelope() {
        let body = r#"{"access_token": "t", "user": {"id": "uuid-2", "email": "a@b.c"}}"#;
        let parsed: SignUpResponse = serde_json::from_str(body).unwrap();
        let SignUpResponse::Session { user } = parsed else {
            panic!("expected session envelope");
        };
        assert_eq!(user.id, "uuid-2");
    }

    #[test]
    fn test_provider_session_decoding() {
        let body = r#"{
            "access_token": "header.payload.sig",
            "token_type": "bearer",
            "expires_in": 3600,
            "refresh_token": "refresh",
            "user": {"id": "uuid-3", "email": "a@b.c"}
        }"#;
        let session: ProviderSession = serde_json::from_str(body).unwrap();
        assert_eq!(session.access_token, "header.payload.sig");
        assert_eq!(session.refresh_token, "refresh");
        assert_eq!(session.user.email.as_deref(), Some("a@b.c"));
    }
}
