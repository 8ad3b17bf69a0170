//! Application state shared across handlers.

use std::sync::Arc;

use crate::catalog::{Catalog, MemoryCatalog, RemoteCatalog};
use crate::config::{CatalogBackend, ConfigError, ServerConfig};
use crate::services::AuthGateway;

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`; holds the catalog backend, the optional
/// auth gateway, and the configuration.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ServerConfig,
    catalog: Catalog,
    auth: Option<AuthGateway>,
}

impl AppState {
    /// Build application state from configuration.
    ///
    /// The memory backend starts seeded with the default menu; the auth
    /// gateway exists whenever Supabase credentials are configured,
    /// independent of the catalog backend choice.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the `supabase` backend is selected without
    /// Supabase credentials.
    pub fn new(config: ServerConfig) -> Result<Self, ConfigError> {
        let catalog = match config.backend {
            CatalogBackend::Memory => Catalog::Memory(MemoryCatalog::with_default_menu()),
            CatalogBackend::Supabase => {
                let supabase = config
                    .supabase
                    .as_ref()
                    .ok_or_else(|| ConfigError::MissingEnvVar("SUPABASE_URL".to_string()))?;
                Catalog::Supabase(RemoteCatalog::new(supabase))
            }
        };

        let auth = config.supabase.as_ref().map(AuthGateway::new);

        Ok(Self::from_parts(config, catalog, auth))
    }

    /// Assemble state from explicit parts.
    ///
    /// Used by tests to wire a custom catalog or gateway.
    #[must_use]
    pub fn from_parts(config: ServerConfig, catalog: Catalog, auth: Option<AuthGateway>) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog,
                auth,
            }),
        }
    }

    /// Get a reference to the server configuration.
    #[must_use]
    pub fn config(&self) -> &ServerConfig {
        &self.inner.config
    }

    /// Get a reference to the catalog store.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.inner.catalog
    }

    /// Get the auth gateway, if an identity provider is configured.
    #[must_use]
    pub fn auth(&self) -> Option<&AuthGateway> {
        self.inner.auth.as_ref()
    }
}
