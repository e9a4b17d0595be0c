//! Market layer: CSFloat listings API adapter.
//!
//! [`ListingsSource`] is the seam the price pipeline depends on;
//! [`CsFloatClient`] is the production implementation over HTTP. One
//! outbound request per call, no retries — transport and status
//! failures propagate to the caller, which isolates them per item.

pub mod client;
pub mod listings;

pub use client::{CsFloatClient, ListingsSource};
pub use listings::{Listing, ListingsPage, ListingsQuery};
