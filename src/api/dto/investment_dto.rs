//! Investment DTOs, including read-time derived valuations.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::Investment;

/// Request body for `POST /investments`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateInvestmentRequest {
    /// The tracked item being purchased.
    pub item_id: i64,
    /// Date of purchase.
    pub purchase_date: NaiveDate,
    /// Unit price paid.
    pub purchase_price: f64,
    /// Number of units. Must be positive.
    pub quantity: i32,
}

/// An investment lot with valuations derived from the latest price.
#[derive(Debug, Serialize, ToSchema)]
pub struct InvestmentResponse {
    /// Lot identifier.
    pub id: Uuid,
    /// The tracked item this lot holds.
    pub item_id: i64,
    /// Date of purchase.
    pub purchase_date: NaiveDate,
    /// Unit price paid.
    pub purchase_price: f64,
    /// Number of units.
    pub quantity: i32,
    /// Row creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Latest recorded unit price, when history exists.
    pub current_price: Option<f64>,
    /// Amount paid for the lot.
    pub total_investment: f64,
    /// Lot value at the latest price, when history exists.
    pub total_current_value: Option<f64>,
}

impl InvestmentResponse {
    /// Builds the response for a lot given its latest unit price.
    #[must_use]
    pub fn with_price(investment: Investment, current_price: Option<f64>) -> Self {
        let total_investment = investment.total_investment();
        let total_current_value =
            current_price.map(|price| investment.total_current_value(price));
        Self {
            id: investment.id,
            item_id: investment.item_id.as_i64(),
            purchase_date: investment.purchase_date,
            purchase_price: investment.purchase_price,
            quantity: investment.quantity,
            created_at: investment.created_at,
            current_price,
            total_investment,
            total_current_value,
        }
    }
}
