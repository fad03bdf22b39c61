//! Warehouse configuration loading from config.toml
//!
//! This module provides functionality to load initial warehouse definitions
//! from a TOML configuration file. The warehouses defined in config.toml are
//! used to seed the database on first run or when locations are missing.

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Deserialize)]
pub struct Config {
    /// List of warehouse definitions to seed
    pub warehouses: Vec<WarehouseConfig>,
}

/// Configuration for a single warehouse
#[derive(Debug, Deserialize, Clone)]
pub struct WarehouseConfig {
    /// Name of the warehouse
    pub name: String,
    /// Optional short code used on labels and exports
    pub code: Option<String>,
    /// Owning tenant/user id, omitted for shared locations
    pub owner_id: Option<String>,
}

/// Loads warehouse configuration from a TOML file
///
/// # Arguments
/// * `path` - Path to the config.toml file
///
/// # Returns
/// * `Ok(Config)` - Successfully parsed configuration
/// * `Err(Error)` - Failed to read or parse the configuration file
///
/// # Errors
/// Returns an error if:
/// - The file cannot be read
/// - The TOML syntax is invalid
/// - Required fields are missing
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config> {
    let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| Error::Config {
        message: format!("Failed to read config file: {e}"),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })
}

/// Loads warehouse configuration from the default location (./config.toml)
///
/// # Returns
/// * `Ok(Config)` - Successfully parsed configuration
/// * `Err(Error)` - Failed to read or parse the configuration file
pub fn load_default_config() -> Result<Config> {
    load_config("config.toml")
}
