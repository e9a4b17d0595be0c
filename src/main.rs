//! skinfolio-server entry point.
//!
//! Starts the Axum HTTP server with the catalog, price, investment,
//! and price-update endpoints.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use sqlx::postgres::PgPoolOptions;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use skinfolio_server::api;
use skinfolio_server::app_state::AppState;
use skinfolio_server::config::AppConfig;
use skinfolio_server::domain::PacingPolicy;
use skinfolio_server::market::{CsFloatClient, ListingsSource};
use skinfolio_server::persistence::PriceStore;
use skinfolio_server::persistence::postgres::PostgresStore;
use skinfolio_server::service::PriceUpdateService;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let config = AppConfig::from_env()?;
    tracing::info!(addr = %config.listen_addr, "starting skinfolio-server");

    // Connect to PostgreSQL and apply migrations
    let pool = PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .min_connections(config.database_min_connections)
        .acquire_timeout(Duration::from_secs(config.database_connect_timeout_secs))
        .connect(&config.database_url)
        .await?;
    sqlx::migrate!().run(&pool).await?;

    // Build persistence and market layers
    let store = Arc::new(PostgresStore::new(pool));
    let market: Arc<dyn ListingsSource> = Arc::new(CsFloatClient::new(
        config.csfloat_base_url.clone(),
        config.csfloat_api_key.clone(),
        Duration::from_secs(config.csfloat_timeout_secs),
    )?);

    // Build the update pipeline
    let price_store: Arc<dyn PriceStore> = store.clone();
    let updater = Arc::new(PriceUpdateService::new(
        market,
        price_store,
        config.price_listing_limit,
    ));

    // Build application state
    let app_state = AppState {
        store,
        updater,
        cron_secret: config.cron_secret.clone(),
        scheduled_pacing: PacingPolicy::concurrent(
            config.price_batch_size,
            Duration::from_millis(config.price_batch_pause_ms),
        ),
        manual_pacing: PacingPolicy::sequential(Duration::from_millis(
            config.price_manual_pause_ms,
        )),
    };

    // Build router
    let app = Router::new()
        .merge(api::build_router())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(app_state);

    // Start server
    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    tracing::info!(addr = %config.listen_addr, "server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
