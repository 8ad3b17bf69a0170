//! Session-related types.
//!
//! Types stored in the session for authentication state. The session holds
//! only opaque provider tokens and the user id; the provider owns the actual
//! session lifecycle (creation at login, invalidation at logout, expiry).

use serde::{Deserialize, Serialize};

/// An authenticated identity as reported by the identity provider.
///
/// Opaque to this service: the id is the provider's user UUID.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Provider-assigned user id.
    pub id: String,
    /// Email address on the account, if the provider returned one.
    pub email: Option<String>,
}

/// Session keys for authentication data.
pub mod keys {
    /// Key for the provider access token.
    pub const ACCESS_TOKEN: &str = "access_token";

    /// Key for the provider refresh token.
    pub const REFRESH_TOKEN: &str = "refresh_token";

    /// Key for the provider user id.
    pub const USER_ID: &str = "user_id";
}
