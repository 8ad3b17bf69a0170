//! Catalog store: priced lunch items behind one capability set.
//!
//! Two interchangeable backends expose the same operations
//! {list, search, add, update, delete}:
//!
//! - [`MemoryCatalog`] - in-process, mutex-guarded ordered map keyed by id
//! - [`RemoteCatalog`] - Supabase Data API, concurrency delegated to the
//!   remote service
//!
//! Both backends assign an integer id on creation, so item identity never
//! depends on list position. `search` is inclusive (`price <= max_price`);
//! zero and negative thresholds are valid and simply match fewer rows.
//! Update and delete report whether the id matched, and callers decide what
//! to do with a miss (the HTTP layer keeps the original silent "OK").

mod memory;
mod remote;

pub use memory::MemoryCatalog;
pub use remote::RemoteCatalog;

use thiserror::Error;

use budget_lunch_core::ItemId;

use crate::models::{Item, NewItem};
use crate::supabase::SupabaseError;

/// Errors from catalog operations.
///
/// The memory backend is infallible; every variant originates from the
/// remote backend.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The data API call failed.
    #[error("data API error: {0}")]
    Provider(#[from] SupabaseError),
}

/// A catalog backend.
///
/// Enum dispatch keeps the two backends behind one concrete type without a
/// boxed trait object in application state.
#[derive(Clone)]
pub enum Catalog {
    /// In-process catalog.
    Memory(MemoryCatalog),
    /// Supabase-backed catalog.
    Supabase(RemoteCatalog),
}

impl Catalog {
    /// Every item, in insertion (id-ascending) order.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Provider`] if the remote backend fails.
    pub async fn list(&self) -> Result<Vec<Item>, CatalogError> {
        match self {
            Self::Memory(store) => Ok(store.list()),
            Self::Supabase(store) => store.list().await,
        }
    }

    /// Items with `price <= max_price`.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Provider`] if the remote backend fails.
    pub async fn search(&self, max_price: f64) -> Result<Vec<Item>, CatalogError> {
        match self {
            Self::Memory(store) => Ok(store.search(max_price)),
            Self::Supabase(store) => store.search(max_price).await,
        }
    }

    /// Append a new item and return it with its assigned id.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Provider`] if the remote backend fails.
    pub async fn add(&self, item: NewItem) -> Result<Item, CatalogError> {
        match self {
            Self::Memory(store) => Ok(store.add(item)),
            Self::Supabase(store) => store.add(item).await,
        }
    }

    /// Replace all fields of the item matching `id`.
    ///
    /// Returns `false` when the id matched nothing.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Provider`] if the remote backend fails.
    pub async fn update(&self, id: ItemId, item: NewItem) -> Result<bool, CatalogError> {
        match self {
            Self::Memory(store) => Ok(store.update(id, item)),
            Self::Supabase(store) => store.update(id, item).await,
        }
    }

    /// Remove the item matching `id`.
    ///
    /// Returns `false` when the id matched nothing.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Provider`] if the remote backend fails.
    pub async fn delete(&self, id: ItemId) -> Result<bool, CatalogError> {
        match self {
            Self::Memory(store) => Ok(store.delete(id)),
            Self::Supabase(store) => store.delete(id).await,
        }
    }

    /// Name of the backend, for startup logging.
    #[must_use]
    pub const fn backend_name(&self) -> &'static str {
        match self {
            Self::Memory(_) => "memory",
            Self::Supabase(_) => "supabase",
        }
    }
}
