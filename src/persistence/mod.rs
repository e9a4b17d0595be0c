//! Persistence layer: PostgreSQL catalog, price history, investments.
//!
//! Provides the [`PriceStore`] trait — the narrow surface the update
//! pipeline needs (load the item set, append a price row) — and the
//! concrete [`postgres::PostgresStore`] implementation over
//! `sqlx::PgPool`, which also carries the read surface the UI consumes.

pub mod models;
pub mod postgres;

use async_trait::async_trait;

use crate::domain::{CsItem, ItemId};
use crate::error::ServiceError;

/// Store operations the price-update pipeline depends on.
///
/// Kept deliberately small so tests can substitute an in-memory
/// implementation. The price history is append-only: repeated runs
/// insert new rows even when the price is unchanged.
#[async_trait]
pub trait PriceStore: Send + Sync {
    /// Loads the full tracked-item set, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::PersistenceError`] on database failure —
    /// run-fatal for the caller, since no items means no run.
    async fn list_items(&self) -> Result<Vec<CsItem>, ServiceError>;

    /// Appends one price-history row for `item_id`.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::PersistenceError`] on database failure —
    /// an item-level failure for the caller, never a run abort.
    async fn insert_price(&self, item_id: ItemId, price_cents: i64) -> Result<(), ServiceError>;
}
