//! PostgreSQL implementation of the persistence layer.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use super::PriceStore;
use super::models::{LatestPrice, PriceRecord, price_from_cents};
use crate::domain::{CsItem, Investment, ItemCategory, ItemId, NewItem};
use crate::error::ServiceError;

/// Provider tag written with every price row.
const PRICE_SOURCE: &str = "csfloat";

/// PostgreSQL-backed store using `sqlx::PgPool`.
#[derive(Debug, Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

type ItemTuple = (
    i64,
    Option<i64>,
    String,
    Option<i64>,
    Option<String>,
    Option<f64>,
    Option<f64>,
    i16,
    Option<String>,
    Option<String>,
    DateTime<Utc>,
);

fn item_from_tuple(row: ItemTuple) -> CsItem {
    let (
        id,
        def_index,
        def_name,
        paint_index,
        paint_name,
        min_float,
        max_float,
        category,
        market_hash_name,
        image_url,
        created_at,
    ) = row;
    CsItem {
        id: ItemId::new(id),
        def_index,
        def_name,
        paint_index,
        paint_name,
        min_float,
        max_float,
        category: ItemCategory::from_i16(category),
        market_hash_name,
        image_url,
        created_at,
    }
}

impl PostgresStore {
    /// Creates a new store with the given connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Inserts a new tracked item and returns the stored row.
    ///
    /// # Errors
    ///
    /// Returns a [`ServiceError::PersistenceError`] on database failure.
    pub async fn insert_item(&self, item: &NewItem) -> Result<CsItem, ServiceError> {
        let row = sqlx::query_as::<_, ItemTuple>(
            "INSERT INTO cs_items \
             (def_index, def_name, paint_index, paint_name, min_float, max_float, category, market_hash_name, image_url) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) \
             RETURNING id, def_index, def_name, paint_index, paint_name, min_float, max_float, category, market_hash_name, image_url, created_at",
        )
        .bind(item.def_index)
        .bind(&item.def_name)
        .bind(item.paint_index)
        .bind(&item.paint_name)
        .bind(item.min_float)
        .bind(item.max_float)
        .bind(item.category.as_i16())
        .bind(&item.market_hash_name)
        .bind(&item.image_url)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| ServiceError::PersistenceError(e.to_string()))?;

        Ok(item_from_tuple(row))
    }

    /// Loads all tracked items, newest first.
    ///
    /// # Errors
    ///
    /// Returns a [`ServiceError::PersistenceError`] on database failure.
    pub async fn load_items(&self) -> Result<Vec<CsItem>, ServiceError> {
        let rows = sqlx::query_as::<_, ItemTuple>(
            "SELECT id, def_index, def_name, paint_index, paint_name, min_float, max_float, category, market_hash_name, image_url, created_at \
             FROM cs_items ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| ServiceError::PersistenceError(e.to_string()))?;

        Ok(rows.into_iter().map(item_from_tuple).collect())
    }

    /// Appends one price observation. The decimal column is derived
    /// from the cents column; `recorded_at` is defaulted by the store.
    ///
    /// # Errors
    ///
    /// Returns a [`ServiceError::PersistenceError`] on database failure.
    pub async fn append_price(
        &self,
        item_id: ItemId,
        price_cents: i64,
    ) -> Result<(), ServiceError> {
        sqlx::query(
            "INSERT INTO item_prices (item_id, price, price_cents, source) VALUES ($1, $2, $3, $4)",
        )
        .bind(item_id.as_i64())
        .bind(price_from_cents(price_cents))
        .bind(price_cents)
        .bind(PRICE_SOURCE)
        .execute(&self.pool)
        .await
        .map_err(|e| ServiceError::PersistenceError(e.to_string()))?;

        Ok(())
    }

    /// Returns the latest price observation for one item, if any.
    ///
    /// # Errors
    ///
    /// Returns a [`ServiceError::PersistenceError`] on database failure.
    pub async fn latest_price(&self, item_id: ItemId) -> Result<Option<LatestPrice>, ServiceError> {
        let row = sqlx::query_as::<_, (i64, f64, i64, DateTime<Utc>, String)>(
            "SELECT item_id, price, price_cents, recorded_at, source FROM item_prices \
             WHERE item_id = $1 ORDER BY recorded_at DESC LIMIT 1",
        )
        .bind(item_id.as_i64())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| ServiceError::PersistenceError(e.to_string()))?;

        Ok(row.map(|(item_id, price, price_cents, recorded_at, source)| LatestPrice {
            item_id,
            price,
            price_cents,
            recorded_at,
            source,
        }))
    }

    /// Returns the latest price per item for the given IDs using
    /// `DISTINCT ON`. Items with no history are absent from the result.
    ///
    /// # Errors
    ///
    /// Returns a [`ServiceError::PersistenceError`] on database failure.
    pub async fn latest_prices(&self, item_ids: &[i64]) -> Result<Vec<LatestPrice>, ServiceError> {
        let rows = sqlx::query_as::<_, (i64, f64, i64, DateTime<Utc>, String)>(
            "SELECT DISTINCT ON (item_id) item_id, price, price_cents, recorded_at, source \
             FROM item_prices WHERE item_id = ANY($1) ORDER BY item_id, recorded_at DESC",
        )
        .bind(item_ids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| ServiceError::PersistenceError(e.to_string()))?;

        Ok(rows
            .into_iter()
            .map(|(item_id, price, price_cents, recorded_at, source)| LatestPrice {
                item_id,
                price,
                price_cents,
                recorded_at,
                source,
            })
            .collect())
    }

    /// Returns an item's price history over the trailing `days` days,
    /// oldest first.
    ///
    /// # Errors
    ///
    /// Returns a [`ServiceError::PersistenceError`] on database failure.
    pub async fn price_history(
        &self,
        item_id: ItemId,
        days: i64,
    ) -> Result<Vec<PriceRecord>, ServiceError> {
        let cutoff = Utc::now() - chrono::Duration::days(days.max(0));

        let rows = sqlx::query_as::<_, (Uuid, i64, f64, i64, DateTime<Utc>, String)>(
            "SELECT id, item_id, price, price_cents, recorded_at, source FROM item_prices \
             WHERE item_id = $1 AND recorded_at >= $2 ORDER BY recorded_at ASC",
        )
        .bind(item_id.as_i64())
        .bind(cutoff)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| ServiceError::PersistenceError(e.to_string()))?;

        Ok(rows
            .into_iter()
            .map(|(id, item_id, price, price_cents, recorded_at, source)| PriceRecord {
                id,
                item_id,
                price,
                price_cents,
                recorded_at,
                source,
            })
            .collect())
    }

    /// Returns the timestamp of the most recent price observation
    /// across all items, if any exist.
    ///
    /// # Errors
    ///
    /// Returns a [`ServiceError::PersistenceError`] on database failure.
    pub async fn last_price_update(&self) -> Result<Option<DateTime<Utc>>, ServiceError> {
        let row = sqlx::query_scalar::<_, Option<DateTime<Utc>>>(
            "SELECT MAX(recorded_at) FROM item_prices",
        )
        .fetch_one(&self.pool)
        .await
        .map_err(|e| ServiceError::PersistenceError(e.to_string()))?;

        Ok(row)
    }

    /// Loads all investments, most recent purchases first.
    ///
    /// # Errors
    ///
    /// Returns a [`ServiceError::PersistenceError`] on database failure.
    pub async fn list_investments(&self) -> Result<Vec<Investment>, ServiceError> {
        let rows = sqlx::query_as::<_, (Uuid, i64, NaiveDate, f64, i32, DateTime<Utc>)>(
            "SELECT id, item_id, purchase_date, purchase_price, quantity, created_at \
             FROM investments ORDER BY purchase_date DESC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| ServiceError::PersistenceError(e.to_string()))?;

        Ok(rows
            .into_iter()
            .map(
                |(id, item_id, purchase_date, purchase_price, quantity, created_at)| Investment {
                    id,
                    item_id: ItemId::new(item_id),
                    purchase_date,
                    purchase_price,
                    quantity,
                    created_at,
                },
            )
            .collect())
    }

    /// Inserts a new investment lot and returns the stored row.
    ///
    /// # Errors
    ///
    /// Returns a [`ServiceError::PersistenceError`] on database failure.
    pub async fn insert_investment(
        &self,
        item_id: ItemId,
        purchase_date: NaiveDate,
        purchase_price: f64,
        quantity: i32,
    ) -> Result<Investment, ServiceError> {
        let row = sqlx::query_as::<_, (Uuid, i64, NaiveDate, f64, i32, DateTime<Utc>)>(
            "INSERT INTO investments (item_id, purchase_date, purchase_price, quantity) \
             VALUES ($1, $2, $3, $4) \
             RETURNING id, item_id, purchase_date, purchase_price, quantity, created_at",
        )
        .bind(item_id.as_i64())
        .bind(purchase_date)
        .bind(purchase_price)
        .bind(quantity)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| ServiceError::PersistenceError(e.to_string()))?;

        let (id, item_id, purchase_date, purchase_price, quantity, created_at) = row;
        Ok(Investment {
            id,
            item_id: ItemId::new(item_id),
            purchase_date,
            purchase_price,
            quantity,
            created_at,
        })
    }

    /// Deletes an investment lot.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::InvestmentNotFound`] when no row matches,
    /// or a [`ServiceError::PersistenceError`] on database failure.
    pub async fn delete_investment(&self, id: Uuid) -> Result<(), ServiceError> {
        let result = sqlx::query("DELETE FROM investments WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| ServiceError::PersistenceError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(ServiceError::InvestmentNotFound(id));
        }
        Ok(())
    }
}

#[async_trait]
impl PriceStore for PostgresStore {
    async fn list_items(&self) -> Result<Vec<CsItem>, ServiceError> {
        self.load_items().await
    }

    async fn insert_price(&self, item_id: ItemId, price_cents: i64) -> Result<(), ServiceError> {
        self.append_price(item_id, price_cents).await
    }
}
