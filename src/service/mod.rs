//! Service layer: the price-update pipeline.
//!
//! [`PriceUpdateService`] coordinates the per-item resolver, the
//! listings adapter, and the persistence writer into a paced batch run.

pub mod price_service;

pub use price_service::PriceUpdateService;
