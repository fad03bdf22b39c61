//! Stock record entity - One row per product-per-warehouse pair.
//!
//! Quantity columns are nullable: the store may hand back NULLs, and those are
//! only coerced to zero inside the aggregation step, never at the schema.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Stock record database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "stock_records")]
pub struct Model {
    /// Unique identifier for the stock record
    #[sea_orm(primary_key)]
    pub id: i64,
    /// ID of the product this record counts
    pub product_id: i64,
    /// ID of the warehouse holding the quantity
    pub warehouse_id: i64,
    /// Physical quantity on hand
    pub current: Option<i64>,
    /// Quantity allocated to unfulfilled orders
    pub reserved: Option<i64>,
    /// Quantity dispatched toward this warehouse but not yet received
    pub in_transit: Option<i64>,
    /// When the record was last modified
    pub updated_at: DateTime,
}

/// Defines relationships between `StockRecord` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each stock record belongs to one product
    #[sea_orm(
        belongs_to = "super::product::Entity",
        from = "Column::ProductId",
        to = "super::product::Column::Id"
    )]
    Product,
    /// Each stock record belongs to one warehouse
    #[sea_orm(
        belongs_to = "super::warehouse::Entity",
        from = "Column::WarehouseId",
        to = "super::warehouse::Column::Id"
    )]
    Warehouse,
}

impl Related<super::product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Product.def()
    }
}

impl Related<super::warehouse::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Warehouse.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
