//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use crate::domain::PacingPolicy;
use crate::persistence::postgres::PostgresStore;
use crate::service::PriceUpdateService;

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Catalog, price history, and investment storage.
    pub store: Arc<PostgresStore>,
    /// Price-update pipeline shared by both trigger endpoints.
    pub updater: Arc<PriceUpdateService>,
    /// Bearer token the scheduled endpoint requires. `None` rejects all
    /// scheduled triggers.
    pub cron_secret: Option<String>,
    /// Pacing for the scheduled (batched, concurrent) run.
    pub scheduled_pacing: PacingPolicy,
    /// Pacing for manual (sequential, slow) runs.
    pub manual_pacing: PacingPolicy,
}
