//! Composite product + stock fetch.
//!
//! One read path joins stockable products to their per-warehouse stock rows
//! and warehouse names, optionally restricted to an owner scope. Two surfaces
//! are exposed: a raw `Result`-returning query for callers that need to observe
//! failure (the stock controller), and a fail-open wrapper that logs and
//! degrades to an empty list so listing views render "no data" instead of
//! crashing.

use crate::{
    core::aggregate::{
        AggregatedProductStock, ProductStockRow, RawStockRow, StockRelation,
        aggregate_product_stock,
    },
    core::product::STOCKABLE_TYPES,
    entities::{Product, StockRecord, Warehouse, product, stock_record, warehouse},
    errors::Result,
};
use sea_orm::{DatabaseConnection, QueryOrder, prelude::*};
use std::collections::HashMap;
use tracing::error;

/// Runs the composite query and returns one row per stockable product.
///
/// Products of type `single_item` or `variation_item` are included; kits and
/// variation-group parents have no direct stock and are excluded. When `scope`
/// is given, only products owned by that identifier are returned. The stock
/// join is ordered by warehouse name so downstream location lists are
/// deterministic; products with a single stock row arrive with the relation
/// collapsed to its bare-record shape, exactly as the remote join delivers it.
///
/// # Errors
/// Returns an error if either underlying query fails. Callers that must not
/// propagate failure use [`fetch_products_with_stock`] instead.
pub async fn query_product_stock_rows(
    db: &DatabaseConnection,
    scope: Option<&str>,
) -> Result<Vec<ProductStockRow>> {
    let mut query = Product::find()
        .filter(product::Column::IsDeleted.eq(false))
        .filter(product::Column::ProductType.is_in(STOCKABLE_TYPES))
        .order_by_asc(product::Column::Name);

    if let Some(owner) = scope {
        query = query.filter(product::Column::OwnerId.eq(owner));
    }

    let products = query.all(db).await?;
    if products.is_empty() {
        return Ok(Vec::new());
    }

    let product_ids: Vec<i64> = products.iter().map(|p| p.id).collect();
    let joined = StockRecord::find()
        .filter(stock_record::Column::ProductId.is_in(product_ids))
        .find_also_related(Warehouse)
        .order_by_asc(warehouse::Column::Name)
        .all(db)
        .await?;

    let mut records_by_product: HashMap<i64, Vec<RawStockRow>> = HashMap::new();
    for (record, warehouse) in joined {
        records_by_product
            .entry(record.product_id)
            .or_default()
            .push(RawStockRow {
                id: record.id,
                product_id: record.product_id,
                warehouse_id: record.warehouse_id,
                current: record.current,
                reserved: record.reserved,
                in_transit: record.in_transit,
                warehouse_name: warehouse.map(|w| w.name),
            });
    }

    Ok(products
        .into_iter()
        .map(|product| {
            let records = records_by_product.remove(&product.id).unwrap_or_default();
            ProductStockRow {
                product,
                stock: StockRelation::from_records(records),
            }
        })
        .collect())
}

/// Fail-open fetch used by listing surfaces.
///
/// Any query error is caught here, logged, and converted to an empty list: a
/// stock-fetch failure degrades the view to "no data" rather than crashing it.
pub async fn fetch_products_with_stock(
    db: &DatabaseConnection,
    scope: Option<&str>,
) -> Vec<ProductStockRow> {
    match query_product_stock_rows(db, scope).await {
        Ok(rows) => rows,
        Err(e) => {
            error!("Stock fetch failed, returning empty result: {e}");
            Vec::new()
        }
    }
}

/// Runs the full pipeline: composite query, then aggregation of every row.
///
/// # Errors
/// Propagates query failures; used by the controller, which surfaces them as
/// its error state while keeping the last-known-good data.
pub async fn fetch_aggregated_stock(
    db: &DatabaseConnection,
    scope: Option<&str>,
) -> Result<Vec<AggregatedProductStock>> {
    let rows = query_product_stock_rows(db, scope).await?;
    Ok(rows.into_iter().map(aggregate_product_stock).collect())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::core::product::{
        TYPE_KIT, TYPE_SINGLE_ITEM, TYPE_VARIATION_GROUP, TYPE_VARIATION_ITEM,
    };
    use crate::core::stock::set_stock_level;
    use crate::test_utils::*;
    use sea_orm::ConnectionTrait;

    #[tokio::test]
    async fn test_fetch_shapes_per_stock_count() -> Result<()> {
        let db = setup_test_db().await?;
        let w1 = create_test_warehouse(&db, "W1").await?;
        let w2 = create_test_warehouse(&db, "W2").await?;

        let none = create_test_product(&db, "Apron", "SKU-1").await?;
        let one = create_test_product(&db, "Mug", "SKU-2").await?;
        let two = create_test_product(&db, "Tote Bag", "SKU-3").await?;

        set_stock_level(&db, one.id, w1.id, 4, 0, 0).await?;
        set_stock_level(&db, two.id, w1.id, 10, 3, 0).await?;
        set_stock_level(&db, two.id, w2.id, 5, 5, 2).await?;

        let rows = query_product_stock_rows(&db, None).await?;
        assert_eq!(rows.len(), 3);

        // Ordered by product name: Apron, Mug, Tote Bag
        assert_eq!(rows[0].product.id, none.id);
        assert_eq!(rows[0].stock, StockRelation::Empty);

        assert_eq!(rows[1].product.id, one.id);
        assert!(matches!(rows[1].stock, StockRelation::One(_)));

        assert_eq!(rows[2].product.id, two.id);
        assert!(matches!(rows[2].stock, StockRelation::Many(_)));

        Ok(())
    }

    #[tokio::test]
    async fn test_fetch_joins_warehouse_names_in_order() -> Result<()> {
        let db = setup_test_db().await?;
        // Created out of name order on purpose
        let zurich = create_test_warehouse(&db, "Zurich").await?;
        let berlin = create_test_warehouse(&db, "Berlin").await?;

        let product = create_test_product(&db, "Tote Bag", "SKU-1").await?;
        set_stock_level(&db, product.id, zurich.id, 1, 0, 0).await?;
        set_stock_level(&db, product.id, berlin.id, 2, 0, 0).await?;

        let rows = query_product_stock_rows(&db, None).await?;
        let records = rows[0].stock.clone().into_records();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].warehouse_name.as_deref(), Some("Berlin"));
        assert_eq!(records[1].warehouse_name.as_deref(), Some("Zurich"));

        Ok(())
    }

    #[tokio::test]
    async fn test_fetch_excludes_non_stockable_types() -> Result<()> {
        let db = setup_test_db().await?;

        create_custom_product(&db, "Single", "SKU-1", TYPE_SINGLE_ITEM, None).await?;
        create_custom_product(&db, "Variant", "SKU-2", TYPE_VARIATION_ITEM, None).await?;
        create_custom_product(&db, "Bundle", "SKU-3", TYPE_KIT, None).await?;
        create_custom_product(&db, "Parent", "SKU-4", TYPE_VARIATION_GROUP, None).await?;

        let rows = query_product_stock_rows(&db, None).await?;
        let skus: Vec<&str> = rows.iter().map(|r| r.product.sku.as_str()).collect();
        assert_eq!(skus, vec!["SKU-1", "SKU-2"]);

        Ok(())
    }

    #[tokio::test]
    async fn test_fetch_scope_isolation() -> Result<()> {
        let db = setup_test_db().await?;

        create_custom_product(&db, "Mine", "SKU-1", TYPE_SINGLE_ITEM, Some("user-1")).await?;
        create_custom_product(&db, "Theirs", "SKU-2", TYPE_SINGLE_ITEM, Some("user-2")).await?;

        let scoped = query_product_stock_rows(&db, Some("user-1")).await?;
        assert_eq!(scoped.len(), 1);
        assert_eq!(scoped[0].product.sku, "SKU-1");

        let unscoped = query_product_stock_rows(&db, None).await?;
        assert_eq!(unscoped.len(), 2);

        Ok(())
    }

    #[tokio::test]
    async fn test_fetch_fail_open_returns_empty() -> Result<()> {
        // Scenario: the query layer fails (table dropped out from under us).
        // The listing fetcher swallows the error and degrades to "no data".
        let db = setup_test_db().await?;
        create_test_product(&db, "Tote Bag", "SKU-1").await?;
        db.execute_unprepared("DROP TABLE products").await?;

        let rows = fetch_products_with_stock(&db, None).await;
        assert!(rows.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn test_fetch_aggregated_stock_end_to_end() -> Result<()> {
        let db = setup_test_db().await?;
        let w1 = create_test_warehouse(&db, "W1").await?;
        let w2 = create_test_warehouse(&db, "W2").await?;

        let product = create_test_product(&db, "Tote Bag", "SKU-1").await?;
        set_stock_level(&db, product.id, w1.id, 10, 3, 0).await?;
        set_stock_level(&db, product.id, w2.id, 5, 5, 2).await?;

        let aggregates = fetch_aggregated_stock(&db, None).await?;
        assert_eq!(aggregates.len(), 1);

        let aggregate = &aggregates[0];
        assert_eq!(aggregate.total_current_stock, 15);
        assert_eq!(aggregate.total_reserved_stock, 8);
        assert_eq!(aggregate.total_available_stock, 7);
        assert_eq!(aggregate.stock_by_location.len(), 2);
        assert_eq!(aggregate.stock_by_location[0].warehouse_name, "W1");
        assert_eq!(aggregate.stock_by_location[0].available, 7);
        assert_eq!(aggregate.stock_by_location[1].warehouse_name, "W2");
        assert_eq!(aggregate.stock_by_location[1].available, 0);

        Ok(())
    }
}
