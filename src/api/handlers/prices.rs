//! Price read-surface handlers: latest price, history, last update.

use std::collections::BTreeMap;

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};

use crate::api::dto::{
    HistoryParams, LastUpdateResponse, LatestPricesParams, LatestPriceResponse,
    PricePointResponse,
};
use crate::app_state::AppState;
use crate::domain::ItemId;
use crate::error::{ErrorResponse, ServiceError};

/// `GET /items/:id/price` — Latest recorded price for an item.
///
/// # Errors
///
/// Returns [`ServiceError::PriceNotFound`] when the item has no
/// recorded history.
#[utoipa::path(
    get,
    path = "/api/v1/items/{id}/price",
    tag = "Prices",
    summary = "Latest price for an item",
    params(
        ("id" = i64, Path, description = "Item ID"),
    ),
    responses(
        (status = 200, description = "Latest price", body = LatestPriceResponse),
        (status = 404, description = "No price recorded", body = ErrorResponse),
    )
)]
pub async fn get_item_price(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ServiceError> {
    let price = state
        .store
        .latest_price(ItemId::new(id))
        .await?
        .ok_or(ServiceError::PriceNotFound(id))?;
    Ok(Json(LatestPriceResponse::from(price)))
}

/// `GET /items/:id/price-history` — Price observations over the
/// trailing window, oldest first.
///
/// # Errors
///
/// Returns a [`ServiceError`] on database failure.
#[utoipa::path(
    get,
    path = "/api/v1/items/{id}/price-history",
    tag = "Prices",
    summary = "Price history for an item",
    params(
        ("id" = i64, Path, description = "Item ID"),
        ("days" = i64, Query, description = "Trailing window in days (default 30)"),
    ),
    responses(
        (status = 200, description = "Price history", body = Vec<PricePointResponse>),
    )
)]
pub async fn get_price_history(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(params): Query<HistoryParams>,
) -> Result<impl IntoResponse, ServiceError> {
    let history = state.store.price_history(ItemId::new(id), params.days).await?;
    let response: Vec<PricePointResponse> =
        history.into_iter().map(PricePointResponse::from).collect();
    Ok(Json(response))
}

/// `GET /prices/latest?ids=1,2,3` — Latest price per requested item.
///
/// Every requested ID appears in the response map; items with no
/// history map to `null`.
///
/// # Errors
///
/// Returns [`ServiceError::InvalidRequest`] when `ids` is not a
/// comma-separated list of integers.
#[utoipa::path(
    get,
    path = "/api/v1/prices/latest",
    tag = "Prices",
    summary = "Latest prices for multiple items",
    params(
        ("ids" = String, Query, description = "Comma-separated item IDs"),
    ),
    responses(
        (status = 200, description = "Latest price keyed by item ID", body = serde_json::Value),
        (status = 400, description = "Malformed ids parameter", body = ErrorResponse),
    )
)]
pub async fn get_latest_prices(
    State(state): State<AppState>,
    Query(params): Query<LatestPricesParams>,
) -> Result<impl IntoResponse, ServiceError> {
    let ids = parse_ids(&params.ids)?;
    let rows = state.store.latest_prices(&ids).await?;

    let mut map: BTreeMap<i64, Option<LatestPriceResponse>> =
        ids.iter().map(|id| (*id, None)).collect();
    for row in rows {
        map.insert(row.item_id, Some(LatestPriceResponse::from(row)));
    }
    Ok(Json(map))
}

/// `GET /prices/last-update` — Timestamp of the most recent price row.
///
/// # Errors
///
/// Returns a [`ServiceError`] on database failure.
#[utoipa::path(
    get,
    path = "/api/v1/prices/last-update",
    tag = "Prices",
    summary = "When prices were last updated",
    responses(
        (status = 200, description = "Last update timestamp", body = LastUpdateResponse),
    )
)]
pub async fn get_last_update(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ServiceError> {
    let last_update = state.store.last_price_update().await?;
    Ok(Json(LastUpdateResponse { last_update }))
}

/// Price read routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/items/{id}/price", get(get_item_price))
        .route("/items/{id}/price-history", get(get_price_history))
        .route("/prices/latest", get(get_latest_prices))
        .route("/prices/last-update", get(get_last_update))
}

/// Parses a comma-separated ID list.
fn parse_ids(raw: &str) -> Result<Vec<i64>, ServiceError> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<i64>()
                .map_err(|_| ServiceError::InvalidRequest(format!("invalid item id: {s}")))
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn parse_ids_accepts_comma_separated_integers() {
        let ids = parse_ids("1, 2,3");
        let Ok(ids) = ids else {
            panic!("parse failed");
        };
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn parse_ids_rejects_garbage() {
        assert!(parse_ids("1,abc").is_err());
    }

    #[test]
    fn parse_ids_ignores_empty_segments() {
        let ids = parse_ids("1,,2,");
        let Ok(ids) = ids else {
            panic!("parse failed");
        };
        assert_eq!(ids, vec![1, 2]);
    }
}
