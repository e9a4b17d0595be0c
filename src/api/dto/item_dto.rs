//! Item catalog DTOs for create and list operations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{CsItem, ItemCategory, NewItem};

/// Request body for `POST /items`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateItemRequest {
    /// CS2 weapon definition index. Required for the item to be priced.
    #[serde(default)]
    pub def_index: Option<i64>,
    /// Human-readable definition name.
    pub def_name: String,
    /// Paint (finish) index.
    #[serde(default)]
    pub paint_index: Option<i64>,
    /// Human-readable paint name.
    #[serde(default)]
    pub paint_name: Option<String>,
    /// Lower wear bound, in `[0, 1]`.
    #[serde(default)]
    pub min_float: Option<f64>,
    /// Upper wear bound, in `[0, 1]`.
    #[serde(default)]
    pub max_float: Option<f64>,
    /// Item category (0 = weapon, 1 = knife, 2 = glove, 3 = other).
    #[serde(default)]
    pub category: i16,
    /// Steam market hash name.
    #[serde(default)]
    pub market_hash_name: Option<String>,
    /// Icon URL for display.
    #[serde(default)]
    pub image_url: Option<String>,
}

impl CreateItemRequest {
    /// Converts the request into the store's insert attributes.
    #[must_use]
    pub fn into_new_item(self) -> NewItem {
        NewItem {
            def_index: self.def_index,
            def_name: self.def_name,
            paint_index: self.paint_index,
            paint_name: self.paint_name,
            min_float: self.min_float,
            max_float: self.max_float,
            category: ItemCategory::from_i16(self.category),
            market_hash_name: self.market_hash_name,
            image_url: self.image_url,
        }
    }
}

/// A tracked item as returned by the API.
#[derive(Debug, Serialize, ToSchema)]
pub struct ItemResponse {
    /// Item identifier.
    pub id: i64,
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
    /// Item category integer.
    pub category: i16,
    /// Steam market hash name.
    pub market_hash_name: Option<String>,
    /// Icon URL.
    pub image_url: Option<String>,
    /// Row creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl From<CsItem> for ItemResponse {
    fn from(item: CsItem) -> Self {
        Self {
            id: item.id.as_i64(),
            def_index: item.def_index,
            def_name: item.def_name,
            paint_index: item.paint_index,
            paint_name: item.paint_name,
            min_float: item.min_float,
            max_float: item.max_float,
            category: item.category.as_i16(),
            market_hash_name: item.market_hash_name,
            image_url: item.image_url,
            created_at: item.created_at,
        }
    }
}
