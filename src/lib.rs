//! Menu Tally
//!
//! Aggregates a restaurant order log into per-item quantities and prices it
//! against a menu catalog.

pub mod catalog;
pub mod db;
pub mod error;
pub mod models;
pub mod order;

pub use catalog::{Catalog, sample_menu};
pub use error::{CatalogError, OrderError};
pub use models::{MenuItem, MenuItemId, OrderLine, OrderQuantities, OrderSummary};
pub use order::{aggregate, format_receipt, order_total, price, summarize_order};
