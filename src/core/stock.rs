//! Stock record business logic - Handles all stock mutations.
//!
//! This module provides functions for setting per-warehouse stock levels and for
//! the three allocation moves an order workflow needs: reserving stock for an
//! order, releasing a reservation, and receiving in-transit quantity. Mutations
//! run inside a database transaction so a partial update can never be observed.
//! Negative quantities are rejected at the boundary, but reserved exceeding
//! current is representable: over-allocation is a data state, not an error.

use crate::{
    entities::{Product, StockRecord, Warehouse, stock_record},
    errors::{Error, Result},
};
use sea_orm::{Set, TransactionTrait, prelude::*};

/// Retrieves all stock records for a product, one per stocked warehouse.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn get_stock_records_for_product(
    db: &DatabaseConnection,
    product_id: i64,
) -> Result<Vec<stock_record::Model>> {
    StockRecord::find()
        .filter(stock_record::Column::ProductId.eq(product_id))
        .all(db)
        .await
        .map_err(Into::into)
}

/// Sets the stock level of a product at a warehouse, creating the record if
/// none exists yet.
///
/// Quantities must be non-negative, but `reserved` may exceed `current`; the
/// aggregation layer reports the resulting negative availability as-is.
///
/// # Errors
/// Returns an error if:
/// - Any quantity is negative
/// - The product does not exist or is deleted
/// - The warehouse does not exist or is deleted
/// - A database operation fails
pub async fn set_stock_level(
    db: &DatabaseConnection,
    product_id: i64,
    warehouse_id: i64,
    current: i64,
    reserved: i64,
    in_transit: i64,
) -> Result<stock_record::Model> {
    for quantity in [current, reserved, in_transit] {
        if quantity < 0 {
            return Err(Error::InvalidQuantity { quantity });
        }
    }

    let txn = db.begin().await?;

    let product = Product::find_by_id(product_id)
        .one(&txn)
        .await?
        .ok_or_else(|| Error::ProductNotFound {
            name: product_id.to_string(),
        })?;
    if product.is_deleted {
        return Err(Error::ProductNotFound {
            name: product_id.to_string(),
        });
    }

    let warehouse = Warehouse::find_by_id(warehouse_id)
        .one(&txn)
        .await?
        .ok_or_else(|| Error::WarehouseNotFound {
            name: warehouse_id.to_string(),
        })?;
    if warehouse.is_deleted {
        return Err(Error::WarehouseNotFound {
            name: warehouse_id.to_string(),
        });
    }

    let now = chrono::Utc::now().naive_utc();
    let existing = StockRecord::find()
        .filter(stock_record::Column::ProductId.eq(product_id))
        .filter(stock_record::Column::WarehouseId.eq(warehouse_id))
        .one(&txn)
        .await?;

    let result = if let Some(record) = existing {
        let mut active: stock_record::ActiveModel = record.into();
        active.current = Set(Some(current));
        active.reserved = Set(Some(reserved));
        active.in_transit = Set(Some(in_transit));
        active.updated_at = Set(now);
        active.update(&txn).await?
    } else {
        let record = stock_record::ActiveModel {
            product_id: Set(product_id),
            warehouse_id: Set(warehouse_id),
            current: Set(Some(current)),
            reserved: Set(Some(reserved)),
            in_transit: Set(Some(in_transit)),
            updated_at: Set(now),
            ..Default::default()
        };
        record.insert(&txn).await?
    };

    txn.commit().await?;

    Ok(result)
}

/// Reserves quantity on a stock record for an open order.
///
/// # Errors
/// Returns an error if:
/// - The quantity is not strictly positive
/// - The record does not exist
/// - The requested quantity exceeds the available quantity (`current - reserved`)
/// - A database operation fails
pub async fn reserve_stock(
    db: &DatabaseConnection,
    record_id: i64,
    quantity: i64,
) -> Result<stock_record::Model> {
    if quantity <= 0 {
        return Err(Error::InvalidQuantity { quantity });
    }

    let txn = db.begin().await?;

    let record = find_record(&txn, record_id).await?;
    let available = record.current.unwrap_or(0) - record.reserved.unwrap_or(0);
    if quantity > available {
        return Err(Error::InsufficientStock {
            available,
            requested: quantity,
        });
    }

    let reserved = record.reserved.unwrap_or(0) + quantity;
    let mut active: stock_record::ActiveModel = record.into();
    active.reserved = Set(Some(reserved));
    active.updated_at = Set(chrono::Utc::now().naive_utc());
    let result = active.update(&txn).await?;

    txn.commit().await?;

    Ok(result)
}

/// Releases previously reserved quantity back to availability.
///
/// # Errors
/// Returns an error if:
/// - The quantity is not strictly positive
/// - The record does not exist
/// - The requested quantity exceeds the reserved quantity
/// - A database operation fails
pub async fn release_stock(
    db: &DatabaseConnection,
    record_id: i64,
    quantity: i64,
) -> Result<stock_record::Model> {
    if quantity <= 0 {
        return Err(Error::InvalidQuantity { quantity });
    }

    let txn = db.begin().await?;

    let record = find_record(&txn, record_id).await?;
    let reserved = record.reserved.unwrap_or(0);
    if quantity > reserved {
        return Err(Error::InsufficientStock {
            available: reserved,
            requested: quantity,
        });
    }

    let mut active: stock_record::ActiveModel = record.into();
    active.reserved = Set(Some(reserved - quantity));
    active.updated_at = Set(chrono::Utc::now().naive_utc());
    let result = active.update(&txn).await?;

    txn.commit().await?;

    Ok(result)
}

/// Receives in-transit quantity into on-hand stock.
///
/// Moves `quantity` from `in_transit` to `current` in one step.
///
/// # Errors
/// Returns an error if:
/// - The quantity is not strictly positive
/// - The record does not exist
/// - The requested quantity exceeds the in-transit quantity
/// - A database operation fails
pub async fn receive_in_transit(
    db: &DatabaseConnection,
    record_id: i64,
    quantity: i64,
) -> Result<stock_record::Model> {
    if quantity <= 0 {
        return Err(Error::InvalidQuantity { quantity });
    }

    let txn = db.begin().await?;

    let record = find_record(&txn, record_id).await?;
    let in_transit = record.in_transit.unwrap_or(0);
    if quantity > in_transit {
        return Err(Error::InsufficientStock {
            available: in_transit,
            requested: quantity,
        });
    }

    let current = record.current.unwrap_or(0) + quantity;
    let mut active: stock_record::ActiveModel = record.into();
    active.current = Set(Some(current));
    active.in_transit = Set(Some(in_transit - quantity));
    active.updated_at = Set(chrono::Utc::now().naive_utc());
    let result = active.update(&txn).await?;

    txn.commit().await?;

    Ok(result)
}

async fn find_record<C>(db: &C, record_id: i64) -> Result<stock_record::Model>
where
    C: ConnectionTrait,
{
    StockRecord::find_by_id(record_id)
        .one(db)
        .await?
        .ok_or(Error::StockRecordNotFound { id: record_id })
}
