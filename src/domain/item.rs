//! Tracked catalog items and type-safe item identity.
//!
//! [`ItemId`] is a newtype wrapper around the database's bigint key so
//! item identifiers cannot be confused with other integers (price rows,
//! quantities). [`CsItem`] is the catalog aggregate the price pipeline
//! iterates over.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Unique identifier for a tracked item.
///
/// Wraps the `cs_items` bigserial primary key. Assigned by the store on
/// insert and immutable thereafter. Referenced by price-history rows and
/// investments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(i64);

impl ItemId {
    /// Creates an `ItemId` from a raw database key.
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Returns the inner database key.
    #[must_use]
    pub const fn as_i64(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for ItemId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl From<ItemId> for i64 {
    fn from(id: ItemId) -> Self {
        id.0
    }
}

/// Item category as understood by the CSFloat listings API.
///
/// Stored as a smallint and sent upstream as an integer query parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemCategory {
    /// Regular weapon skins.
    Weapon,
    /// Knives.
    Knife,
    /// Gloves.
    Glove,
    /// Stickers, cases, agents, everything else.
    Other,
}

impl ItemCategory {
    /// Returns the integer wire/storage representation.
    #[must_use]
    pub const fn as_i16(self) -> i16 {
        match self {
            Self::Weapon => 0,
            Self::Knife => 1,
            Self::Glove => 2,
            Self::Other => 3,
        }
    }

    /// Converts from the integer representation. Unknown values map to
    /// [`ItemCategory::Other`].
    #[must_use]
    pub const fn from_i16(value: i16) -> Self {
        match value {
            0 => Self::Weapon,
            1 => Self::Knife,
            2 => Self::Glove,
            _ => Self::Other,
        }
    }
}

/// A tracked catalog item, as loaded from the `cs_items` table.
///
/// `def_index` plus a float range is the minimum the pricing API needs
/// to identify a skin; items missing either are skipped by the update
/// pipeline rather than treated as failures.
#[derive(Debug, Clone)]
pub struct CsItem {
    /// Primary key.
    pub id: ItemId,
    /// CS2 weapon definition index. Required for pricing.
    pub def_index: Option<i64>,
    /// Human-readable definition name (e.g. `"AK-47"`).
    pub def_name: String,
    /// Paint (finish) index.
    pub paint_index: Option<i64>,
    /// Human-readable paint name (e.g. `"Redline"`).
    pub paint_name: Option<String>,
    /// Lower wear bound, in `[0, 1]`.
    pub min_float: Option<f64>,
    /// Upper wear bound, in `[0, 1]`.
    pub max_float: Option<f64>,
    /// Listings API category.
    pub category: ItemCategory,
    /// Steam market hash name, when known.
    pub market_hash_name: Option<String>,
    /// Icon URL for display.
    pub image_url: Option<String>,
    /// Row creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl CsItem {
    /// Renders the identifying label used in logs and run-report error
    /// messages, e.g. `"item 7 (AK-47)"`.
    #[must_use]
    pub fn label(&self) -> String {
        format!("item {} ({})", self.id, self.def_name)
    }
}

/// Attributes for creating a new tracked item.
#[derive(Debug, Clone)]
pub struct NewItem {
    /// CS2 weapon definition index.
    pub def_index: Option<i64>,
    /// Human-readable definition name.
    pub def_name: String,
    /// Paint (finish) index.
    pub paint_index: Option<i64>,
    /// Human-readable paint name.
    pub paint_name: Option<String>,
    /// Lower wear bound.
    pub min_float: Option<f64>,
    /// Upper wear bound.
    pub max_float: Option<f64>,
    /// Listings API category.
    pub category: ItemCategory,
    /// Steam market hash name.
    pub market_hash_name: Option<String>,
    /// Icon URL.
    pub image_url: Option<String>,
}
