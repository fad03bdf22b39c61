//! Core business logic - framework-agnostic operations over the catalog,
//! warehouses, and stock records, plus the aggregation pipeline and its
//! refresh controller.

/// Stock aggregation - totals and per-location availability
pub mod aggregate;
/// Stock data controller - owns the aggregated snapshot and its refresh contract
pub mod controller;
/// Composite product + stock + warehouse fetch
pub mod fetch;
/// Product catalog operations
pub mod product;
/// Stock record mutations
pub mod stock;
/// Update signal and persisted sync markers
pub mod sync;
/// Warehouse operations
pub mod warehouse;
