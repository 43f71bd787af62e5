//! Database schema and operations

use anyhow::Result;
use rusqlite::{Connection, OptionalExtension};

use crate::catalog::Catalog;
use crate::error::OrderError;
use crate::models::{MenuItem, MenuItemId};

/// Initialize the database schema
pub fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS menu_items (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            emoji TEXT NOT NULL DEFAULT '',
            price REAL NOT NULL
        );

        -- Ingredients keep their listing order
        CREATE TABLE IF NOT EXISTS menu_item_ingredients (
            menu_item_id INTEGER NOT NULL,
            position INTEGER NOT NULL,
            ingredient TEXT NOT NULL,
            PRIMARY KEY (menu_item_id, position)
        );

        -- Append-only order log, one row per unit ordered
        CREATE TABLE IF NOT EXISTS order_entries (
            seq INTEGER PRIMARY KEY AUTOINCREMENT,
            menu_item_id INTEGER NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_order_entries_item ON order_entries(menu_item_id);
        "#,
    )?;
    Ok(())
}

/// Insert or replace a menu item and its ingredients
pub fn upsert_menu_item(conn: &Connection, item: &MenuItem) -> Result<()> {
    let tx = conn.unchecked_transaction()?;
    write_menu_item(&tx, item)?;
    tx.commit()?;
    Ok(())
}

// Caller owns the transaction
fn write_menu_item(conn: &Connection, item: &MenuItem) -> Result<()> {
    conn.execute(
        "INSERT OR REPLACE INTO menu_items (id, name, emoji, price) VALUES (?1, ?2, ?3, ?4)",
        (item.id, &item.name, &item.emoji, item.price),
    )?;
    conn.execute(
        "DELETE FROM menu_item_ingredients WHERE menu_item_id = ?1",
        [item.id],
    )?;
    for (position, ingredient) in item.ingredients.iter().enumerate() {
        conn.execute(
            "INSERT INTO menu_item_ingredients (menu_item_id, position, ingredient) VALUES (?1, ?2, ?3)",
            (item.id, position as i64, ingredient),
        )?;
    }
    Ok(())
}

/// Remove all menu items (the order log is left alone)
pub fn clear_catalog(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        DELETE FROM menu_item_ingredients;
        DELETE FROM menu_items;
        "#,
    )?;
    Ok(())
}

/// Store a full catalog, optionally replacing the existing one
///
/// Either every item is written or the stored menu is left as it was.
pub fn save_catalog(conn: &Connection, catalog: &Catalog, clear: bool) -> Result<usize> {
    let tx = conn.unchecked_transaction()?;
    if clear {
        clear_catalog(&tx)?;
    }
    for item in catalog.items() {
        write_menu_item(&tx, item)?;
    }
    tx.commit()?;
    Ok(catalog.len())
}

fn get_ingredients(conn: &Connection, id: MenuItemId) -> Result<Vec<String>> {
    let mut stmt = conn.prepare(
        "SELECT ingredient FROM menu_item_ingredients WHERE menu_item_id = ?1 ORDER BY position",
    )?;

    let rows = stmt.query_map([id], |row| row.get(0))?;

    let mut results = Vec::new();
    for row in rows {
        results.push(row?);
    }
    Ok(results)
}

/// List all menu items ordered by id
pub fn list_menu_items(conn: &Connection) -> Result<Vec<MenuItem>> {
    let mut stmt = conn.prepare("SELECT id, name, emoji, price FROM menu_items ORDER BY id")?;

    let rows = stmt.query_map([], |row| {
        Ok(MenuItem {
            id: row.get(0)?,
            name: row.get(1)?,
            ingredients: Vec::new(),
            emoji: row.get(2)?,
            price: row.get(3)?,
        })
    })?;

    let mut results = Vec::new();
    for row in rows {
        let mut item = row?;
        item.ingredients = get_ingredients(conn, item.id)?;
        results.push(item);
    }
    Ok(results)
}

/// Get a single menu item by id
pub fn get_menu_item(conn: &Connection, id: MenuItemId) -> Result<Option<MenuItem>> {
    let item = conn
        .query_row(
            "SELECT id, name, emoji, price FROM menu_items WHERE id = ?1",
            [id],
            |row| {
                Ok(MenuItem {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    ingredients: Vec::new(),
                    emoji: row.get(2)?,
                    price: row.get(3)?,
                })
            },
        )
        .optional()?;

    match item {
        Some(mut item) => {
            item.ingredients = get_ingredients(conn, id)?;
            Ok(Some(item))
        }
        None => Ok(None),
    }
}

/// Append one unit of an item to the order log
pub fn append_order_entry(conn: &Connection, id: MenuItemId) -> Result<()> {
    conn.execute("INSERT INTO order_entries (menu_item_id) VALUES (?1)", [id])?;
    Ok(())
}

/// Append one unit per id, after checking every id is on the menu
///
/// Nothing is appended if any id is unknown.
pub fn add_to_order(conn: &Connection, ids: &[MenuItemId]) -> Result<usize> {
    for &id in ids {
        if get_menu_item(conn, id)?.is_none() {
            return Err(OrderError::UnknownItem(id).into());
        }
    }

    let tx = conn.unchecked_transaction()?;
    for &id in ids {
        append_order_entry(&tx, id)?;
    }
    tx.commit()?;
    Ok(ids.len())
}

/// Remove the most recently ordered unit of an item
///
/// Returns false if the item was not in the order.
pub fn remove_order_entry(conn: &Connection, id: MenuItemId) -> Result<bool> {
    let removed = conn.execute(
        "DELETE FROM order_entries WHERE seq = (
            SELECT MAX(seq) FROM order_entries WHERE menu_item_id = ?1
        )",
        [id],
    )?;
    Ok(removed > 0)
}

/// Empty the order log
pub fn clear_order(conn: &Connection) -> Result<()> {
    conn.execute("DELETE FROM order_entries", [])?;
    Ok(())
}

/// All order entries in the order they were placed
pub fn order_entries(conn: &Connection) -> Result<Vec<MenuItemId>> {
    let mut stmt = conn.prepare("SELECT menu_item_id FROM order_entries ORDER BY seq")?;

    let rows = stmt.query_map([], |row| row.get(0))?;

    let mut results = Vec::new();
    for row in rows {
        results.push(row?);
    }
    Ok(results)
}
