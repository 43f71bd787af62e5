//! Menu catalog loading and validation
//!
//! Catalogs are JSON arrays of menu items. A directory is walked recursively
//! and every `*.json` file in it contributes items.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::CatalogError;
use crate::models::{MenuItem, MenuItemId};

/// Validated, read-only set of menu items
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    items: Vec<MenuItem>,
}

impl Catalog {
    pub fn new(items: Vec<MenuItem>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        for item in &items {
            if !seen.insert(item.id) {
                return Err(CatalogError::DuplicateId(item.id));
            }
            if item.name.trim().is_empty() {
                return Err(CatalogError::EmptyName(item.id));
            }
            if !item.price.is_finite() || item.price < 0.0 {
                return Err(CatalogError::InvalidPrice {
                    id: item.id,
                    price: item.price,
                });
            }
        }
        Ok(Self { items })
    }

    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let items = parse_items(json, Path::new("<inline>"))?;
        Self::new(items)
    }

    /// Load a catalog from a JSON file or a directory of JSON files
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let files = if path.is_dir() {
            find_catalog_files(path)
        } else {
            vec![path.to_path_buf()]
        };

        let mut items = Vec::new();
        for file in &files {
            let content = fs::read_to_string(file).map_err(|source| CatalogError::Io {
                path: file.clone(),
                source,
            })?;
            let parsed = parse_items(&content, file)?;
            tracing::info!(file = %file.display(), items = parsed.len(), "read menu file");
            items.extend(parsed);
        }

        Self::new(items)
    }

    pub fn get(&self, id: MenuItemId) -> Option<&MenuItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

fn parse_items(json: &str, path: &Path) -> Result<Vec<MenuItem>, CatalogError> {
    serde_json::from_str(json).map_err(|source| CatalogError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Find all *.json files under a directory, sorted by path
fn find_catalog_files(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .follow_links(true)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(err) => {
                tracing::warn!(error = %err, "skipping unreadable menu path");
                None
            }
        })
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .filter(|p| p.extension().is_some_and(|ext| ext == "json"))
        .collect();
    files.sort();
    files
}

/// The built-in diner menu
pub fn sample_menu() -> Vec<MenuItem> {
    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    vec![
        MenuItem {
            id: 0,
            name: "Pizza".to_string(),
            ingredients: strings(&["pepperoni", "mushrom", "mozarella"]),
            emoji: "🍕".to_string(),
            price: 14.0,
        },
        MenuItem {
            id: 1,
            name: "Hamburger".to_string(),
            ingredients: strings(&["beef", "cheese", "lettuce"]),
            emoji: "🍔".to_string(),
            price: 12.0,
        },
        MenuItem {
            id: 2,
            name: "Beer".to_string(),
            ingredients: strings(&["grain", "hops", "yeast", "water"]),
            emoji: "🍺".to_string(),
            price: 12.0,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_menu_is_valid() {
        let catalog = Catalog::new(sample_menu()).unwrap();
        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.get(1).map(|i| i.name.as_str()), Some("Hamburger"));
        assert!(catalog.get(3).is_none());
    }

    #[test]
    fn test_from_json_defaults() {
        let catalog = Catalog::from_json_str(r#"[{"id": 4, "name": "Water", "price": 0}]"#).unwrap();
        let water = catalog.get(4).unwrap();

        assert!(water.ingredients.is_empty());
        assert_eq!(water.emoji, "");
        assert_eq!(water.price, 0.0);
    }

    #[test]
    fn test_rejects_duplicate_ids() {
        let mut items = sample_menu();
        items[2].id = 0;
        assert!(matches!(Catalog::new(items), Err(CatalogError::DuplicateId(0))));
    }

    #[test]
    fn test_rejects_negative_price() {
        let result = Catalog::from_json_str(r#"[{"id": 1, "name": "Refund", "price": -3.5}]"#);
        assert!(matches!(result, Err(CatalogError::InvalidPrice { id: 1, .. })));
    }

    #[test]
    fn test_rejects_empty_name() {
        let result = Catalog::from_json_str(r#"[{"id": 8, "name": "  ", "price": 1}]"#);
        assert!(matches!(result, Err(CatalogError::EmptyName(8))));
    }

    #[test]
    fn test_rejects_malformed_json() {
        let result = Catalog::from_json_str(r#"{"id": 1}"#);
        assert!(matches!(result, Err(CatalogError::Parse { .. })));
    }

    #[test]
    fn test_load_directory_merges_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("food.json"),
            r#"[{"id": 0, "name": "Pizza", "price": 14, "emoji": "🍕"}]"#,
        )
        .unwrap();
        fs::create_dir(dir.path().join("drinks")).unwrap();
        fs::write(
            dir.path().join("drinks").join("bar.json"),
            r#"[{"id": 2, "name": "Beer", "price": 12}]"#,
        )
        .unwrap();
        fs::write(dir.path().join("notes.txt"), "not a menu").unwrap();

        let catalog = Catalog::load(dir.path()).unwrap();
        let ids: Vec<_> = catalog.items().iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![2, 0]);
    }

    #[cfg(unix)]
    #[test]
    fn test_load_directory_skips_broken_links() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("food.json"),
            r#"[{"id": 1, "name": "Hamburger", "price": 12}]"#,
        )
        .unwrap();
        std::os::unix::fs::symlink(dir.path().join("gone.json"), dir.path().join("ghost.json")).unwrap();

        let catalog = Catalog::load(dir.path()).unwrap();
        assert_eq!(catalog.len(), 1);
        assert!(catalog.get(1).is_some());
    }

    #[test]
    fn test_rejects_nan_price() {
        let mut items = sample_menu();
        items[1].price = f64::NAN;
        assert!(matches!(Catalog::new(items), Err(CatalogError::InvalidPrice { id: 1, .. })));
    }

    #[test]
    fn test_load_missing_file() {
        let result = Catalog::load(Path::new("/definitely/not/here.json"));
        assert!(matches!(result, Err(CatalogError::Io { .. })));
    }
}
