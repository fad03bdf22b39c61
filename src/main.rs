//! Service binary for `Stocktally`.
//!
//! Boots the database, seeds configured warehouses, loads an initial stock
//! snapshot, and then keeps the aggregated view fresh on catalog update
//! signals until shut down with Ctrl-C.

use dotenvy::dotenv;
use std::sync::Arc;
use stocktally::config;
use stocktally::core::aggregate::format_stock_summary;
use stocktally::core::controller::StockController;
use stocktally::core::sync::SyncSignal;
use stocktally::core::{sync, warehouse};
use stocktally::errors::{Error, Result};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file (as early as possible)
    dotenv().ok(); // Make it non-fatal, env vars can be set externally
    info!("Attempted to load .env file.");

    // 3. Load the warehouse seed configuration
    let warehouse_config = config::warehouses::load_default_config()?;
    info!(
        "Loaded {} warehouse definition(s) from configuration.",
        warehouse_config.warehouses.len()
    );

    // 4. Initialize database
    let db = config::database::create_connection()
        .await
        .inspect(|_| info!("Database connection established."))
        .inspect_err(|e| error!("Failed to connect to database: {}", e))?;
    config::database::create_tables(&db).await?;

    // 5. Seed warehouses (if necessary)
    warehouse::seed_warehouses(&db, &warehouse_config.warehouses)
        .await
        .inspect_err(|e| error!("Failed to seed warehouses: {}", e))?;

    // 6. Resolve the owner scope and build the stock controller
    let scope = config::scope::get_default_owner_id();
    match &scope {
        Some(owner) => info!("Running scoped to owner {owner}."),
        None => info!("Running unscoped."),
    }
    let controller = Arc::new(StockController::new(db.clone(), scope));

    // 7. Subscribe the refresh loop to catalog update signals
    let signal = SyncSignal::new();
    let refresh_loop = tokio::spawn(Arc::clone(&controller).run(signal.subscribe()));

    // 8. Initial load and summary
    controller.refetch().await;
    let snapshot = controller.snapshot().await;
    if let Some(message) = &snapshot.error {
        warn!("Initial stock load failed: {message}");
    }
    info!("Loaded stock for {} product(s).", snapshot.data.len());
    for aggregate in &snapshot.data {
        info!("{}", format_stock_summary(aggregate));
    }
    if let Some(last_update) = sync::get_last_catalog_update(&db).await? {
        info!("Last catalog update: {last_update}");
    }

    // 9. Stay up, refreshing on every signal, until Ctrl-C
    info!("Watching for catalog updates. Press Ctrl-C to stop.");
    tokio::signal::ctrl_c().await.map_err(|e| Error::Config {
        message: format!("Failed to listen for shutdown signal: {e}"),
    })?;

    drop(signal); // Closes the channel and stops the refresh loop
    let _ = refresh_loop.await;
    info!("Shutting down.");

    Ok(())
}
