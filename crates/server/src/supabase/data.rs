//! Supabase Data API (PostgREST) client for the `lunch_items` table.
//!
//! Row filtering is expressed in PostgREST operator syntax (`price=lte.X`,
//! `id=eq.N`). Mutations ask for `return=representation` so the affected
//! rows come back in the response; an empty array on update/delete means the
//! id did not match anything.

use std::sync::Arc;
use std::time::Duration;

use secrecy::ExposeSecret;

use budget_lunch_core::ItemId;

use crate::config::SupabaseConfig;
use crate::models::{Item, NewItem};
use crate::supabase::{SupabaseError, response_error};

/// Request timeout for data calls.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Table holding the lunch catalog.
const TABLE: &str = "lunch_items";

/// Client for the Supabase Data API.
#[derive(Clone)]
pub struct DataClient {
    inner: Arc<DataClientInner>,
}

struct DataClientInner {
    client: reqwest::Client,
    table_url: String,
    anon_key: String,
}

impl DataClient {
    /// Create a new Data API client.
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
            inner: Arc::new(DataClientInner {
                client,
                table_url: format!("{}/rest/v1/{TABLE}", config.url.trim_end_matches('/')),
                anon_key: config.anon_key.expose_secret().to_string(),
            }),
        }
    }

    fn request(&self, method: reqwest::Method, query: &str) -> reqwest::RequestBuilder {
        let url = if query.is_empty() {
            self.inner.table_url.clone()
        } else {
            format!("{}?{query}", self.inner.table_url)
        };

        self.inner
            .client
            .request(method, url)
            .header("apikey", &self.inner.anon_key)
            .bearer_auth(&self.inner.anon_key)
    }

    async fn rows(&self, response: reqwest::Response) -> Result<Vec<Item>, SupabaseError> {
        if !response.status().is_success() {
            return Err(response_error(response).await);
        }
        Ok(response.json().await?)
    }

    /// Fetch every item, in id (insertion) order.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response is malformed.
    pub async fn list(&self) -> Result<Vec<Item>, SupabaseError> {
        let response = self
            .request(reqwest::Method::GET, "select=*&order=id.asc")
            .send()
            .await?;
        self.rows(response).await
    }

    /// Fetch items priced at or below `max_price`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response is malformed.
    pub async fn list_at_most(&self, max_price: f64) -> Result<Vec<Item>, SupabaseError> {
        let response = self
            .request(
                reqwest::Method::GET,
                &format!("select=*&price=lte.{max_price}&order=id.asc"),
            )
            .send()
            .await?;
        self.rows(response).await
    }

    /// Insert a new item and return it with its server-assigned id.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API returns no row.
    pub async fn insert(&self, item: &NewItem) -> Result<Item, SupabaseError> {
        let response = self
            .request(reqwest::Method::POST, "")
            .header("Prefer", "return=representation")
            .json(item)
            .send()
            .await?;

        let mut rows = self.rows(response).await?;
        rows.pop().ok_or(SupabaseError::Api {
            status: axum::http::StatusCode::BAD_GATEWAY,
            message: "insert returned no representation".to_string(),
        })
    }

    /// Replace the fields of the item matching `id`.
    ///
    /// Returns `false` when no row matched.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn update(&self, id: ItemId, item: &NewItem) -> Result<bool, SupabaseError> {
        let response = self
            .request(reqwest::Method::PATCH, &format!("id=eq.{id}"))
            .header("Prefer", "return=representation")
            .json(item)
            .send()
            .await?;

        let rows = self.rows(response).await?;
        Ok(!rows.is_empty())
    }

    /// Delete the item matching `id`.
    ///
    /// Returns `false` when no row matched.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn delete(&self, id: ItemId) -> Result<bool, SupabaseError> {
        let response = self
            .request(reqwest::Method::DELETE, &format!("id=eq.{id}"))
            .header("Prefer", "return=representation")
            .send()
            .await?;

        let rows = self.rows(response).await?;
        Ok(!rows.is_empty())
    }
}
