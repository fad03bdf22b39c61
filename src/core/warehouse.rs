//! Warehouse business logic - Handles all location-related operations.
//!
//! Provides functions for creating, retrieving, and seeding warehouses.
//! All functions are async and return Result types for error handling.

use crate::{
    config::warehouses::WarehouseConfig,
    entities::{Warehouse, warehouse},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};
use tracing::info;

/// Retrieves all active (non-deleted) warehouses, ordered alphabetically by name.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn get_all_active_warehouses(db: &DatabaseConnection) -> Result<Vec<warehouse::Model>> {
    Warehouse::find()
        .filter(warehouse::Column::IsDeleted.eq(false))
        .order_by_asc(warehouse::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Finds a specific warehouse by its name, returning None if not found or deleted.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn get_warehouse_by_name(
    db: &DatabaseConnection,
    name: &str,
) -> Result<Option<warehouse::Model>> {
    Warehouse::find()
        .filter(warehouse::Column::Name.eq(name))
        .filter(warehouse::Column::IsDeleted.eq(false))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Finds a warehouse by its unique ID.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn get_warehouse_by_id(
    db: &DatabaseConnection,
    warehouse_id: i64,
) -> Result<Option<warehouse::Model>> {
    Warehouse::find_by_id(warehouse_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Creates a new warehouse with the specified parameters, performing input validation.
///
/// # Errors
/// Returns an error if the name is empty or whitespace-only, or the insert fails.
pub async fn create_warehouse(
    db: &DatabaseConnection,
    name: String,
    code: Option<String>,
    owner_id: Option<String>,
) -> Result<warehouse::Model> {
    if name.trim().is_empty() {
        return Err(Error::Config {
            message: "Warehouse name cannot be empty".to_string(),
        });
    }

    let warehouse = warehouse::ActiveModel {
        name: Set(name.trim().to_string()),
        code: Set(code),
        owner_id: Set(owner_id),
        is_deleted: Set(false),
        ..Default::default()
    };

    let result = warehouse.insert(db).await?;
    Ok(result)
}

/// Seeds warehouses from configuration, skipping names that already exist.
///
/// Called once at startup so a fresh database comes up with the locations
/// defined in config.toml. Re-running is safe: existing names are left alone.
///
/// # Returns
/// The number of warehouses created.
///
/// # Errors
/// Returns an error if a lookup or insert fails.
pub async fn seed_warehouses(
    db: &DatabaseConnection,
    definitions: &[WarehouseConfig],
) -> Result<usize> {
    let mut created = 0;

    for definition in definitions {
        if get_warehouse_by_name(db, &definition.name).await?.is_some() {
            continue;
        }

        create_warehouse(
            db,
            definition.name.clone(),
            definition.code.clone(),
            definition.owner_id.clone(),
        )
        .await?;
        created += 1;
    }

    if created > 0 {
        info!("Seeded {created} warehouse(s) from configuration");
    }

    Ok(created)
}
