//! Warehouse entity - Represents one physical stock location.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Warehouse database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "warehouses")]
pub struct Model {
    /// Unique identifier for the warehouse
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Display name of the warehouse (e.g., "Berlin Main")
    pub name: String,
    /// Optional short code used on labels and exports
    pub code: Option<String>,
    /// Owning tenant/user id, None for shared locations
    pub owner_id: Option<String>,
    /// Soft delete flag - if true, warehouse is hidden but data is preserved
    pub is_deleted: bool,
}

/// Defines relationships between Warehouse and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One warehouse stocks many products
    #[sea_orm(has_many = "super::stock_record::Entity")]
    StockRecords,
}

impl Related<super::stock_record::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::StockRecords.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
