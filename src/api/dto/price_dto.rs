//! Price read-surface DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::persistence::models::{LatestPrice, PriceRecord};

/// Latest recorded price for an item.
#[derive(Debug, Serialize, ToSchema)]
pub struct LatestPriceResponse {
    /// Item the price belongs to.
    pub item_id: i64,
    /// Price in decimal currency units.
    pub price: f64,
    /// Price in cents.
    pub price_cents: i64,
    /// Observation timestamp.
    pub recorded_at: DateTime<Utc>,
    /// Pricing provider tag.
    pub source: String,
}

impl From<LatestPrice> for LatestPriceResponse {
    fn from(row: LatestPrice) -> Self {
        Self {
            item_id: row.item_id,
            price: row.price,
            price_cents: row.price_cents,
            recorded_at: row.recorded_at,
            source: row.source,
        }
    }
}

/// One observation in an item's price history.
#[derive(Debug, Serialize, ToSchema)]
pub struct PricePointResponse {
    /// Price in decimal currency units.
    pub price: f64,
    /// Price in cents.
    pub price_cents: i64,
    /// Observation timestamp.
    pub recorded_at: DateTime<Utc>,
    /// Pricing provider tag.
    pub source: String,
}

impl From<PriceRecord> for PricePointResponse {
    fn from(row: PriceRecord) -> Self {
        Self {
            price: row.price,
            price_cents: row.price_cents,
            recorded_at: row.recorded_at,
            source: row.source,
        }
    }
}

/// Query parameters for the price-history endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct HistoryParams {
    /// Trailing window in days. Defaults to 30.
    #[serde(default = "default_days")]
    pub days: i64,
}

fn default_days() -> i64 {
    30
}

/// Query parameters for the bulk latest-price endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct LatestPricesParams {
    /// Comma-separated item IDs, e.g. `ids=1,2,3`.
    pub ids: String,
}

/// Response for `GET /prices/last-update`.
#[derive(Debug, Serialize, ToSchema)]
pub struct LastUpdateResponse {
    /// Timestamp of the most recent price row, if any exists.
    pub last_update: Option<DateTime<Utc>>,
}
