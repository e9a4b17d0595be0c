//! Listings request and response types for the CSFloat API.

use serde::{Deserialize, Serialize};

/// Parameters for one listings query.
///
/// `def_index` is mandatory — the API cannot identify an item without
/// it. Optional fields are omitted from the query string when unset.
#[derive(Debug, Clone, PartialEq)]
pub struct ListingsQuery {
    /// CS2 weapon definition index.
    pub def_index: i64,
    /// Paint (finish) index.
    pub paint_index: Option<i64>,
    /// Lower wear bound.
    pub min_float: Option<f64>,
    /// Upper wear bound.
    pub max_float: Option<f64>,
    /// Item category (integer wire value).
    pub category: Option<i16>,
    /// Maximum number of listings to return.
    pub limit: u32,
}

impl ListingsQuery {
    /// Renders the query string pairs for this request.
    ///
    /// Always asks for immediately purchasable listings sorted by
    /// ascending price, so the first element of the response is the
    /// lowest offer.
    #[must_use]
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("sort_by", "lowest_price".to_string()),
            ("type", "buy_now".to_string()),
            ("def_index", self.def_index.to_string()),
        ];
        if let Some(paint_index) = self.paint_index {
            params.push(("paint_index", paint_index.to_string()));
        }
        if let Some(min_float) = self.min_float {
            params.push(("min_float", min_float.to_string()));
        }
        if let Some(max_float) = self.max_float {
            params.push(("max_float", max_float.to_string()));
        }
        if let Some(category) = self.category {
            params.push(("category", category.to_string()));
        }
        params.push(("limit", self.limit.to_string()));
        params
    }
}

/// A single market listing.
///
/// Only `price` matters to the pipeline; the remaining fields are kept
/// for logging and future filtering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Listing {
    /// Upstream listing identifier.
    #[serde(default)]
    pub id: String,
    /// Asking price in cents (smallest currency unit).
    pub price: i64,
    /// Exact wear value of the listed skin.
    #[serde(default)]
    pub wear_value: Option<f64>,
    /// Definition index of the listed item.
    #[serde(default)]
    pub def_index: Option<i64>,
    /// Paint index of the listed item.
    #[serde(default)]
    pub paint_index: Option<i64>,
    /// Steam market hash name.
    #[serde(default)]
    pub market_hash_name: Option<String>,
}

/// Response envelope returned by the listings endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingsPage {
    /// Opaque pagination cursor, when more results exist.
    #[serde(default)]
    pub cursor: Option<String>,
    /// Listings ordered by ascending price.
    pub data: Vec<Listing>,
}
