//! Investment lots and their derived valuations.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::ItemId;

/// A purchase lot of a tracked item, as stored in the `investments`
/// table.
///
/// Totals are derived at read time from the latest recorded price —
/// they are never stored, so they always reflect current market data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Investment {
    /// Opaque row identifier.
    pub id: Uuid,
    /// The tracked item this lot holds.
    pub item_id: ItemId,
    /// Date of purchase.
    pub purchase_date: NaiveDate,
    /// Unit price paid at purchase time.
    pub purchase_price: f64,
    /// Number of units in the lot. Always positive.
    pub quantity: i32,
    /// Row creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl Investment {
    /// Total amount paid for the lot.
    #[must_use]
    pub fn total_investment(&self) -> f64 {
        self.purchase_price * f64::from(self.quantity)
    }

    /// Current value of the lot at the given unit price.
    #[must_use]
    pub fn total_current_value(&self, unit_price: f64) -> f64 {
        unit_price * f64::from(self.quantity)
    }
}
