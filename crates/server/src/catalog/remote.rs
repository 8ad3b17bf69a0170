//! Supabase-backed catalog backend.
//!
//! A thin adapter over [`DataClient`]: ids are assigned by the remote
//! primary key, filtering happens server-side, and concurrency control is
//! delegated entirely to the remote service.

use budget_lunch_core::ItemId;

use crate::config::SupabaseConfig;
use crate::models::{Item, NewItem};
use crate::supabase::DataClient;

use super::CatalogError;

/// Catalog store backed by the Supabase Data API.
#[derive(Clone)]
pub struct RemoteCatalog {
    data: DataClient,
}

impl RemoteCatalog {
    /// Create a remote catalog for the configured Supabase project.
    #[must_use]
    pub fn new(config: &SupabaseConfig) -> Self {
        Self {
            data: DataClient::new(config),
        }
    }

    pub(super) async fn list(&self) -> Result<Vec<Item>, CatalogError> {
        Ok(self.data.list().await?)
    }

    pub(super) async fn search(&self, max_price: f64) -> Result<Vec<Item>, CatalogError> {
        Ok(self.data.list_at_most(max_price).await?)
    }

    pub(super) async fn add(&self, item: NewItem) -> Result<Item, CatalogError> {
        Ok(self.data.insert(&item).await?)
    }

    pub(super) async fn update(&self, id: ItemId, item: NewItem) -> Result<bool, CatalogError> {
        Ok(self.data.update(id, &item).await?)
    }

    pub(super) async fn delete(&self, id: ItemId) -> Result<bool, CatalogError> {
        Ok(self.data.delete(id).await?)
    }
}
