//! Unified error types for the whole crate.
//!
//! Every fallible operation returns [`Result`], built on one [`Error`] enum so
//! callers match on domain conditions instead of backend-specific errors.

use thiserror::Error;

/// All error conditions the crate can report.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration loading or parsing failed
    #[error("Configuration error: {message}")]
    Config {
        /// Human-readable description of what went wrong
        message: String,
    },

    /// Underlying database operation failed
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// Product lookup by name, SKU, or id produced no active row
    #[error("Product not found: {name}")]
    ProductNotFound {
        /// The name, SKU, or id used for the lookup
        name: String,
    },

    /// Warehouse lookup by name or id produced no active row
    #[error("Warehouse not found: {name}")]
    WarehouseNotFound {
        /// The name or id used for the lookup
        name: String,
    },

    /// Stock record lookup by id produced no row
    #[error("Stock record not found: {id}")]
    StockRecordNotFound {
        /// The stock record id used for the lookup
        id: i64,
    },

    /// A quantity argument was negative, zero where positive is required,
    /// or otherwise unusable
    #[error("Invalid quantity: {quantity}")]
    InvalidQuantity {
        /// The rejected quantity
        quantity: i64,
    },

    /// A stock mutation asked for more than the record can satisfy
    #[error("Insufficient stock: requested {requested}, available {available}")]
    InsufficientStock {
        /// Quantity the record can currently satisfy
        available: i64,
        /// Quantity the caller asked for
        requested: i64,
    },

    /// An unknown product type string was supplied
    #[error("Unknown product type: {product_type}")]
    UnknownProductType {
        /// The rejected product type
        product_type: String,
    },
}

/// Convenience `Result` type used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
