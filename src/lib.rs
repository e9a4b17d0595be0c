//! # skinfolio-server
//!
//! REST API and price-ingestion service for tracking CS2 item investments.
//!
//! Users register item definitions and purchase lots; the service
//! periodically pulls market prices from the CSFloat listings API and
//! appends them to an immutable price history, from which portfolio
//! value and ROI are derived. All market data comes from CSFloat —
//! this service is a coordination layer over PostgreSQL and one
//! upstream HTTP API.
//!
//! ## Architecture
//!
//! ```text
//! Clients (HTTP)
//!     │
//!     ├── REST Handlers (api/)
//!     │
//!     ├── PriceUpdateService (service/)
//!     │       ├── ListingsSource → CsFloatClient (market/)
//!     │       └── PriceStore → PostgresStore (persistence/)
//!     │
//!     └── PostgreSQL (items, price history, investments)
//! ```

pub mod api;
pub mod app_state;
pub mod config;
pub mod domain;
pub mod error;
pub mod market;
pub mod persistence;
pub mod service;
