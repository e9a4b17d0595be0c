//! Data Transfer Objects for REST request/response serialization.
//!
//! Prices travel in both representations: `price_cents` is canonical,
//! the decimal `price` is derived for display.

pub mod investment_dto;
pub mod item_dto;
pub mod price_dto;
pub mod update_dto;

pub use investment_dto::*;
pub use item_dto::*;
pub use price_dto::*;
pub use update_dto::*;
