//! Catalog route handlers.
//!
//! Mutating routes and the full listing require authentication; the price
//! search is public. Mutations answer with plain-text `"OK"`, including when
//! an update or delete matched nothing (the miss is logged, not reported).

use axum::{
    Json,
    extract::{Path, Query, State},
    response::IntoResponse,
};
use serde::Deserialize;
use tracing::{debug, instrument};

use budget_lunch_core::ItemId;

use crate::error::{AppError, Result};
use crate::middleware::RequireAuth;
use crate::models::{Item, NewItem};
use crate::state::AppState;

/// Query parameters for the add route.
#[derive(Debug, Deserialize)]
pub struct AddQuery {
    pub imageurl: Option<String>,
}

/// JSON body for the update route. All three fields are required.
#[derive(Debug, Deserialize)]
pub struct UpdateBody {
    pub name: String,
    pub price: f64,
    pub imageurl: Option<String>,
}

/// Coerce a path segment into a price.
///
/// Failure surfaces as a server error, preserving the original service's
/// unguarded float conversion.
fn parse_price(raw: &str) -> Result<f64> {
    raw.parse()
        .map_err(|_| AppError::InvalidPrice(raw.to_string()))
}

/// `GET /search/{price}` - items priced at or below the threshold.
#[instrument(skip(state))]
pub async fn search(
    State(state): State<AppState>,
    Path(price): Path<String>,
) -> Result<Json<Vec<Item>>> {
    let max_price = parse_price(&price)?;
    Ok(Json(state.catalog().search(max_price).await?))
}

/// `GET|POST /add/{name}/{price}?imageurl=...` - append an item.
#[instrument(skip(state, _auth))]
pub async fn add(
    State(state): State<AppState>,
    _auth: RequireAuth,
    Path((name, price)): Path<(String, String)>,
    Query(query): Query<AddQuery>,
) -> Result<impl IntoResponse> {
    let price = parse_price(&price)?;

    state
        .catalog()
        .add(NewItem {
            name,
            price,
            imageurl: query.imageurl,
        })
        .await?;

    Ok("OK")
}

/// `PUT /update/{id}` - replace all fields of an item.
#[instrument(skip(state, _auth, body))]
pub async fn update(
    State(state): State<AppState>,
    _auth: RequireAuth,
    Path(id): Path<i64>,
    Json(body): Json<UpdateBody>,
) -> Result<impl IntoResponse> {
    let found = state
        .catalog()
        .update(
            ItemId::new(id),
            NewItem {
                name: body.name,
                price: body.price,
                imageurl: body.imageurl,
            },
        )
        .await?;

    if !found {
        debug!(id, "update matched no item");
    }

    Ok("OK")
}

/// `DELETE /delete/{id}` - remove an item.
#[instrument(skip(state, _auth))]
pub async fn delete(
    State(state): State<AppState>,
    _auth: RequireAuth,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    let found = state.catalog().delete(ItemId::new(id)).await?;

    if !found {
        debug!(id, "delete matched no item");
    }

    Ok("OK")
}

/// `GET /list` - every item in the catalog.
#[instrument(skip(state, _auth))]
pub async fn list(
    State(state): State<AppState>,
    _auth: RequireAuth,
) -> Result<Json<Vec<Item>>> {
    Ok(Json(state.catalog().list().await?))
}
