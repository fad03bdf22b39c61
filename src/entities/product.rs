//! Product entity - Represents one catalog item the back office sells.
//!
//! Only `single_item` and `variation_item` products carry stock of their own;
//! `kit` and `variation_group` products derive availability from their
//! children and are excluded from stock fetches.

use sea_orm::FromJsonQueryResult;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// JSON-backed list of image URLs attached to a product.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct ImageList(pub Vec<String>);

/// Product database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "products")]
pub struct Model {
    /// Unique identifier for the product
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Display name of the product (e.g., "Canvas Tote Bag")
    pub name: String,
    /// Stock keeping unit, unique per owner
    pub sku: String,
    /// Product kind: `"single_item"`, `"variation_item"`, `"kit"`, or `"variation_group"`
    pub product_type: String,
    /// Unit cost in the shop currency
    pub cost: f64,
    /// Unit sell price, if one has been set
    pub sell_price: Option<f64>,
    /// Image URLs for the product, stored as a JSON array
    #[sea_orm(column_type = "Json")]
    pub images: ImageList,
    /// Owning tenant/user id, None for rows visible to every tenant
    pub owner_id: Option<String>,
    /// Soft delete flag - if true, product is hidden but data is preserved
    pub is_deleted: bool,
    /// When the product was created
    pub created_at: DateTime,
    /// When the product was last modified
    pub updated_at: DateTime,
}

/// Defines relationships between Product and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One product has many per-warehouse stock records
    #[sea_orm(has_many = "super::stock_record::Entity")]
    StockRecords,
}

impl Related<super::stock_record::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::StockRecords.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
