//! Authentication error types.

use thiserror::Error;

use crate::supabase::SupabaseError;

/// Errors that can occur during authentication operations.
///
/// Known provider rejections are classified into their own variants so the
/// HTTP layer can show specific messages; everything else stays a generic
/// [`AuthError::Provider`].
#[derive(Debug, Error)]
pub enum AuthError {
    /// Email or password missing/empty.
    #[error("email and password are required")]
    MissingCredentials,

    /// Password shorter than the minimum length.
    #[error("password must be at least {min} characters long")]
    PasswordTooShort {
        /// Minimum accepted length.
        min: usize,
    },

    /// Email is structurally invalid, or the provider rejected it.
    #[error("invalid email address")]
    InvalidEmail,

    /// An account with this email already exists.
    #[error("email already registered")]
    AlreadyRegistered,

    /// Wrong email/password combination.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// The account exists but the email was never confirmed.
    #[error("email not confirmed")]
    EmailNotConfirmed,

    /// Unclassified provider failure.
    #[error("provider error: {0}")]
    Provider(#[from] SupabaseError),
}
