//! Typed errors for catalog loading and order entry

use std::path::PathBuf;

use crate::models::MenuItemId;

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Failed to read {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid menu JSON in {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Duplicate menu item id: {0}")]
    DuplicateId(MenuItemId),

    #[error("Menu item {0} has an empty name")]
    EmptyName(MenuItemId),

    #[error("Menu item {id} has invalid price {price}")]
    InvalidPrice { id: MenuItemId, price: f64 },
}

#[derive(Debug, thiserror::Error)]
pub enum OrderError {
    #[error("No menu item with id {0}")]
    UnknownItem(MenuItemId),
}
