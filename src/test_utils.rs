//! Shared test utilities for `Stocktally`.
//!
//! This module provides common helper functions for setting up test databases
//! and creating test entities with sensible defaults.

use crate::{
    core::aggregate::AggregatedProductStock,
    core::{product, warehouse},
    entities,
    errors::Result,
};
use sea_orm::DatabaseConnection;

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Creates a test product with sensible defaults.
///
/// # Arguments
/// * `db` - Database connection
/// * `name` - Product name
/// * `sku` - Product SKU
///
/// # Defaults
/// * `product_type`: `single_item`
/// * `cost`: 10.0
/// * `sell_price`: None
/// * `images`: empty
/// * `owner_id`: None (visible to every tenant)
pub async fn create_test_product(
    db: &DatabaseConnection,
    name: &str,
    sku: &str,
) -> Result<entities::product::Model> {
    product::create_product(
        db,
        name.to_string(),
        sku.to_string(),
        product::TYPE_SINGLE_ITEM.to_string(),
        10.0,
        None,
        Vec::new(),
        None,
    )
    .await
}

/// Creates a test product with a custom type and owner.
/// Use this when type filtering or scope isolation is under test.
pub async fn create_custom_product(
    db: &DatabaseConnection,
    name: &str,
    sku: &str,
    product_type: &str,
    owner_id: Option<&str>,
) -> Result<entities::product::Model> {
    product::create_product(
        db,
        name.to_string(),
        sku.to_string(),
        product_type.to_string(),
        10.0,
        None,
        Vec::new(),
        owner_id.map(ToString::to_string),
    )
    .await
}

/// Creates a test warehouse with sensible defaults (no code, no owner).
pub async fn create_test_warehouse(
    db: &DatabaseConnection,
    name: &str,
) -> Result<entities::warehouse::Model> {
    warehouse::create_warehouse(db, name.to_string(), None, None).await
}

/// Sets up a complete test environment with one product and one warehouse.
/// Returns (db, product, warehouse) for stock-related tests.
pub async fn setup_with_product_and_warehouse() -> Result<(
    DatabaseConnection,
    entities::product::Model,
    entities::warehouse::Model,
)> {
    let db = setup_test_db().await?;
    let product = create_test_product(&db, "Tote Bag", "SKU-1").await?;
    let warehouse = create_test_warehouse(&db, "Berlin Main").await?;
    Ok((db, product, warehouse))
}

/// Builds a minimal aggregate for controller tests that bypass the fetcher.
#[must_use]
pub fn sample_aggregate(sku: &str) -> AggregatedProductStock {
    AggregatedProductStock {
        product_id: 1,
        name: "Sample".to_string(),
        sku: sku.to_string(),
        product_type: product::TYPE_SINGLE_ITEM.to_string(),
        cost: 10.0,
        sell_price: None,
        images: Vec::new(),
        total_current_stock: 0,
        total_reserved_stock: 0,
        total_available_stock: 0,
        stock_by_location: Vec::new(),
    }
}
