//! Database models for price-history rows.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Converts a price in cents to its decimal display value.
///
/// The cents column is canonical; the decimal column exists for display
/// and must always equal `price_cents / 100`.
#[must_use]
pub fn price_from_cents(price_cents: i64) -> f64 {
    price_cents as f64 / 100.0
}

/// A full price-history row from the `item_prices` table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceRecord {
    /// Row identifier.
    pub id: Uuid,
    /// Item the observation belongs to.
    pub item_id: i64,
    /// Price in decimal currency units (`price_cents / 100`).
    pub price: f64,
    /// Price in cents. Canonical storage unit.
    pub price_cents: i64,
    /// Observation timestamp, defaulted by the store on insert.
    pub recorded_at: DateTime<Utc>,
    /// Pricing provider tag (e.g. `"csfloat"`).
    pub source: String,
}

/// The most recent price observation for an item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LatestPrice {
    /// Item the observation belongs to.
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

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn price_equals_cents_over_hundred() {
        assert!((price_from_cents(0) - 0.0).abs() < f64::EPSILON);
        assert!((price_from_cents(100) - 1.0).abs() < f64::EPSILON);
        assert!((price_from_cents(9_999) - 99.99).abs() < 1e-9);
        assert!((price_from_cents(1_250_000) - 12_500.0).abs() < f64::EPSILON);
    }

    #[test]
    fn conversion_is_exact_division_for_all_written_records() {
        for cents in [1_i64, 90, 1234, 56_789, 10_000_000] {
            let price = price_from_cents(cents);
            assert!((price - cents as f64 / 100.0).abs() < f64::EPSILON);
        }
    }
}
