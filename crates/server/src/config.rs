//! Server configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `LUNCH_HOST` - Bind address (default: 127.0.0.1)
//! - `LUNCH_PORT` - Listen port (default: 5001)
//! - `LUNCH_BASE_URL` - Public URL (default: derived from host/port; an
//!   https URL turns on secure session cookies)
//! - `LUNCH_ASSETS_DIR` - Static asset directory (default: crates/server/static)
//! - `LUNCH_CATALOG_BACKEND` - `memory` or `supabase` (default: memory)
//! - `SUPABASE_URL` - Supabase project URL
//! - `SUPABASE_ANON_KEY` - Supabase anon API key
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//!
//! The `supabase` backend and the auth layer both need `SUPABASE_URL` and
//! `SUPABASE_ANON_KEY`. With the `memory` backend and no Supabase variables
//! the server runs fully local and unauthenticated, matching the original
//! local variant.

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use secrecy::SecretString;
use thiserror::Error;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Which catalog backend to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CatalogBackend {
    /// In-process catalog seeded with the default menu.
    #[default]
    Memory,
    /// Supabase Data API catalog.
    Supabase,
}

impl CatalogBackend {
    fn parse(value: &str) -> Result<Self, ConfigError> {
        match value {
            "memory" => Ok(Self::Memory),
            "supabase" => Ok(Self::Supabase),
            other => Err(ConfigError::InvalidEnvVar(
                "LUNCH_CATALOG_BACKEND".to_string(),
                format!("expected 'memory' or 'supabase', got '{other}'"),
            )),
        }
    }
}

/// Supabase project configuration.
///
/// Implements `Debug` manually to redact the anon key.
#[derive(Clone)]
pub struct SupabaseConfig {
    /// Project URL (e.g., `https://xyzcompany.supabase.co`).
    pub url: String,
    /// Anon API key, sent as the `apikey` header on every call.
    pub anon_key: SecretString,
}

impl std::fmt::Debug for SupabaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SupabaseConfig")
            .field("url", &self.url)
            .field("anon_key", &"[REDACTED]")
            .finish()
    }
}

/// Server application configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// IP address to bind the server to.
    pub host: IpAddr,
    /// Port to listen on.
    pub port: u16,
    /// Public base URL.
    pub base_url: String,
    /// Directory the static pages are served from.
    pub assets_dir: PathBuf,
    /// Catalog backend selection.
    pub backend: CatalogBackend,
    /// Supabase configuration, when the identity provider is available.
    pub supabase: Option<SupabaseConfig>,
    /// Sentry DSN for error tracking.
    pub sentry_dsn: Option<String>,
    /// Sentry environment name.
    pub sentry_environment: Option<String>,
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is malformed, or if the
    /// `supabase` backend is selected without Supabase credentials.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = get_env_or_default("LUNCH_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("LUNCH_HOST".to_string(), e.to_string()))?;
        let port = get_env_or_default("LUNCH_PORT", "5001")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("LUNCH_PORT".to_string(), e.to_string()))?;
        let base_url = get_optional_env("LUNCH_BASE_URL")
            .unwrap_or_else(|| format!("http://{host}:{port}"));
        let assets_dir =
            PathBuf::from(get_env_or_default("LUNCH_ASSETS_DIR", "crates/server/static"));
        let backend = CatalogBackend::parse(&get_env_or_default("LUNCH_CATALOG_BACKEND", "memory"))?;
        let supabase = supabase_from_env()?;

        if backend == CatalogBackend::Supabase && supabase.is_none() {
            return Err(ConfigError::MissingEnvVar("SUPABASE_URL".to_string()));
        }

        Ok(Self {
            host,
            port,
            base_url,
            assets_dir,
            backend,
            supabase,
            sentry_dsn: get_optional_env("SENTRY_DSN"),
            sentry_environment: get_optional_env("SENTRY_ENVIRONMENT"),
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

/// Load Supabase configuration when both variables are present.
///
/// One without the other is a misconfiguration, not a local deployment.
fn supabase_from_env() -> Result<Option<SupabaseConfig>, ConfigError> {
    let url = get_optional_env("SUPABASE_URL");
    let anon_key = get_optional_env("SUPABASE_ANON_KEY");

    match (url, anon_key) {
        (Some(url), Some(anon_key)) => Ok(Some(SupabaseConfig {
            url,
            anon_key: SecretString::from(anon_key),
        })),
        (None, None) => Ok(None),
        (Some(_), None) => Err(ConfigError::MissingEnvVar("SUPABASE_ANON_KEY".to_string())),
        (None, Some(_)) => Err(ConfigError::MissingEnvVar("SUPABASE_URL".to_string())),
    }
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_parse() {
        assert_eq!(CatalogBackend::parse("memory").unwrap(), CatalogBackend::Memory);
        assert_eq!(
            CatalogBackend::parse("supabase").unwrap(),
            CatalogBackend::Supabase
        );
        assert!(matches!(
            CatalogBackend::parse("redis"),
            Err(ConfigError::InvalidEnvVar(_, _))
        ));
    }

    #[test]
    fn test_socket_addr() {
        let config = ServerConfig {
            host: "127.0.0.1".parse().unwrap(),
            port: 5001,
            base_url: "http://127.0.0.1:5001".to_string(),
            assets_dir: PathBuf::from("crates/server/static"),
            backend: CatalogBackend::Memory,
            supabase: None,
            sentry_dsn: None,
            sentry_environment: None,
        };

        let addr = config.socket_addr();
        assert_eq!(addr.ip().to_string(), "127.0.0.1");
        assert_eq!(addr.port(), 5001);
    }

    #[test]
    fn test_supabase_config_debug_redacts_anon_key() {
        let config = SupabaseConfig {
            url: "https://project.supabase.co".to_string(),
            anon_key: SecretString::from("very-secret-anon-key"),
        };

        let debug_output = format!("{config:?}");
        assert!(debug_output.contains("project.supabase.co"));
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("very-secret-anon-key"));
    }
}
