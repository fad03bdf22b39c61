/// Database configuration and connection management
pub mod database;

/// Default owner scope from environment variables
pub mod scope;

/// Warehouse configuration loading from config.toml
pub mod warehouses;
