//! Sync state entity - Stores key-value pairs for synchronization markers.
//! Used for recording the last catalog update timestamp that backs the
//! refresh signal, and other system-wide markers.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Sync state database model - stores key-value marker pairs
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "sync_state")]
pub struct Model {
    /// Unique identifier
    #[sea_orm(primary_key)]
    pub id: i32,
    /// Marker key (e.g., `"catalog_last_update"`)
    pub key: String,
    /// Marker value stored as string
    pub value: String,
    /// When this marker was last modified
    pub updated_at: DateTime,
}

/// `SyncState` has no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
