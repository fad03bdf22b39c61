//! Stock aggregation - turns raw product + stock join rows into UI-ready totals.
//!
//! The aggregation is a pure transform: no database access, no side effects.
//! The stock relation attached to a product can arrive in three shapes (absent,
//! a single bare record, or a list), so it is modeled as a tagged union and
//! normalized to a list before any arithmetic. Null quantities coerce to zero
//! here and nowhere else, so the arithmetic never sees a missing value.

use crate::entities::product;
use serde::{Deserialize, Serialize};

/// Label used when the warehouse join produced no name for a stock row.
pub const UNKNOWN_WAREHOUSE_LABEL: &str = "Unknown warehouse";

/// One raw stock row as returned by the composite fetch, with the warehouse
/// name denormalized from the join.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawStockRow {
    /// Stock record id
    pub id: i64,
    /// Owning product id
    pub product_id: i64,
    /// Owning warehouse id
    pub warehouse_id: i64,
    /// Physical quantity on hand, NULL representable
    pub current: Option<i64>,
    /// Quantity allocated to unfulfilled orders, NULL representable
    pub reserved: Option<i64>,
    /// Quantity incoming, NULL representable
    pub in_transit: Option<i64>,
    /// Warehouse display name, None when the join found no warehouse
    pub warehouse_name: Option<String>,
}

/// The stock relation of one product as delivered by the store.
///
/// A join can collapse to a bare object on single-match rows, or be absent
/// entirely, so all three shapes are representable. Callers normalize with
/// [`StockRelation::into_records`] before doing anything else; no code deeper
/// in the pipeline branches on the shape.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StockRelation {
    /// No stock records for this product
    #[default]
    Empty,
    /// The join collapsed to a single bare record
    One(Box<RawStockRow>),
    /// Zero or more records as a list
    Many(Vec<RawStockRow>),
}

impl StockRelation {
    /// Builds the narrowest shape for a list of records, mirroring how the
    /// remote join collapses single matches.
    #[must_use]
    pub fn from_records(mut records: Vec<RawStockRow>) -> Self {
        match records.len() {
            0 => Self::Empty,
            1 => Self::One(Box::new(records.remove(0))),
            _ => Self::Many(records),
        }
    }

    /// Normalizes the relation to a plain list.
    #[must_use]
    pub fn into_records(self) -> Vec<RawStockRow> {
        match self {
            Self::Empty => Vec::new(),
            Self::One(record) => vec![*record],
            Self::Many(records) => records,
        }
    }
}

/// One product together with its stock relation, as produced by the fetcher.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductStockRow {
    /// The product fields
    pub product: product::Model,
    /// The stock relation in whichever shape the store delivered
    pub stock: StockRelation,
}

/// Per-warehouse stock breakdown for one product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationStock {
    /// Stock record id
    pub stock_record_id: i64,
    /// Warehouse id
    pub warehouse_id: i64,
    /// Warehouse display name, or [`UNKNOWN_WAREHOUSE_LABEL`]
    pub warehouse_name: String,
    /// Quantity on hand
    pub current: i64,
    /// Quantity allocated to unfulfilled orders
    pub reserved: i64,
    /// Quantity incoming
    pub in_transit: i64,
    /// Sellable quantity at this location: `current - reserved`
    pub available: i64,
}

/// A product with its stock rolled up across all warehouses.
///
/// Recomputed on every fetch cycle and never persisted; consumers treat it as
/// a read-only snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregatedProductStock {
    /// Product id
    pub product_id: i64,
    /// Product display name
    pub name: String,
    /// Stock keeping unit
    pub sku: String,
    /// Product kind
    pub product_type: String,
    /// Unit cost
    pub cost: f64,
    /// Unit sell price, if set
    pub sell_price: Option<f64>,
    /// Image URLs
    pub images: Vec<String>,
    /// Sum of `current` across all locations
    pub total_current_stock: i64,
    /// Sum of `reserved` across all locations
    pub total_reserved_stock: i64,
    /// `total_current_stock - total_reserved_stock`; negative means over-allocation
    pub total_available_stock: i64,
    /// Per-warehouse breakdown, in join order
    pub stock_by_location: Vec<LocationStock>,
}

/// Aggregates one raw product + stock row into its rolled-up form.
///
/// The stock relation is normalized to a list first; totals treat NULL
/// quantities as zero. `total_available_stock` and each per-location
/// `available` are `current - reserved` and may go negative - over-allocation
/// is representable, not clamped.
#[must_use]
pub fn aggregate_product_stock(row: ProductStockRow) -> AggregatedProductStock {
    let product = row.product;
    let records = row.stock.into_records();

    let total_current_stock: i64 = records.iter().map(|r| r.current.unwrap_or(0)).sum();
    let total_reserved_stock: i64 = records.iter().map(|r| r.reserved.unwrap_or(0)).sum();
    let total_available_stock = total_current_stock - total_reserved_stock;

    let stock_by_location = records
        .into_iter()
        .map(|record| {
            let current = record.current.unwrap_or(0);
            let reserved = record.reserved.unwrap_or(0);
            LocationStock {
                stock_record_id: record.id,
                warehouse_id: record.warehouse_id,
                warehouse_name: record
                    .warehouse_name
                    .unwrap_or_else(|| UNKNOWN_WAREHOUSE_LABEL.to_string()),
                current,
                reserved,
                in_transit: record.in_transit.unwrap_or(0),
                available: current - reserved,
            }
        })
        .collect();

    AggregatedProductStock {
        product_id: product.id,
        name: product.name,
        sku: product.sku,
        product_type: product.product_type,
        cost: product.cost,
        sell_price: product.sell_price,
        images: product.images.0,
        total_current_stock,
        total_reserved_stock,
        total_available_stock,
        stock_by_location,
    }
}

/// Formats a one-line summary of an aggregate for logs and CLI output.
///
/// Example: `SKU-1 "Tote Bag" | current 15 | reserved 8 | available 7 | 2 location(s)`
#[must_use]
pub fn format_stock_summary(aggregate: &AggregatedProductStock) -> String {
    format!(
        "{} \"{}\" | current {} | reserved {} | available {} | {} location(s)",
        aggregate.sku,
        aggregate.name,
        aggregate.total_current_stock,
        aggregate.total_reserved_stock,
        aggregate.total_available_stock,
        aggregate.stock_by_location.len()
    )
}
