//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the database tables and their relationships.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod product;
pub mod stock_record;
pub mod sync_state;
pub mod warehouse;

// Re-export specific types to avoid conflicts
pub use product::{Column as ProductColumn, Entity as Product, Model as ProductModel};
pub use stock_record::{
    Column as StockRecordColumn, Entity as StockRecord, Model as StockRecordModel,
};
pub use sync_state::{Column as SyncStateColumn, Entity as SyncState, Model as SyncStateModel};
pub use warehouse::{Column as WarehouseColumn, Entity as Warehouse, Model as WarehouseModel};
