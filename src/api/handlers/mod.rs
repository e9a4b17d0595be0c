//! REST endpoint handlers organized by resource.

pub mod investments;
pub mod items;
pub mod prices;
pub mod system;
pub mod updates;

use axum::Router;

use crate::app_state::AppState;

/// Composes all resource routes under `/api/v1`.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(items::routes())
        .merge(prices::routes())
        .merge(investments::routes())
        .merge(updates::routes())
}
