use std::fs;

use rusqlite::Connection;

use menu_tally::{Catalog, OrderError, aggregate, db, price, sample_menu, summarize_order};

fn setup_db(dir: &tempfile::TempDir) -> Connection {
    let conn = Connection::open(dir.path().join("menu_tally.db")).expect("Failed to open database");
    db::init_schema(&conn).expect("Failed to create schema");
    conn
}

#[test]
fn test_order_persists_across_connections() {
    let dir = tempfile::tempdir().unwrap();

    {
        let conn = setup_db(&dir);
        db::save_catalog(&conn, &Catalog::new(sample_menu()).unwrap(), true).unwrap();
        db::add_to_order(&conn, &[0, 2, 2, 1, 2]).unwrap();
    }

    let conn = setup_db(&dir);
    let entries = db::order_entries(&conn).unwrap();
    let menu = db::list_menu_items(&conn).unwrap();
    let summary = summarize_order(&entries, &menu);

    let lines: Vec<_> = summary
        .lines
        .iter()
        .map(|l| (l.name.as_str(), l.quantity, l.extended_price))
        .collect();
    assert_eq!(
        lines,
        vec![("Pizza", 1, 14.0), ("Beer", 3, 36.0), ("Hamburger", 1, 12.0)]
    );
    assert_eq!(summary.total_price, 62.0);
    assert_eq!(summary.total_units, 5);
}

#[test]
fn test_reimport_drops_stale_order_lines() {
    let dir = tempfile::tempdir().unwrap();
    let conn = setup_db(&dir);
    db::save_catalog(&conn, &Catalog::new(sample_menu()).unwrap(), true).unwrap();
    db::append_order_entry(&conn, 1).unwrap();
    db::append_order_entry(&conn, 2).unwrap();

    let menu_file = dir.path().join("menu.json");
    fs::write(
        &menu_file,
        r#"[{"id": 2, "name": "Craft Beer", "ingredients": ["hops"], "emoji": "🍺", "price": 6.5}]"#,
    )
    .unwrap();
    let catalog = Catalog::load(&menu_file).unwrap();
    db::save_catalog(&conn, &catalog, true).unwrap();

    let entries = db::order_entries(&conn).unwrap();
    let menu = db::list_menu_items(&conn).unwrap();
    let summary = summarize_order(&entries, &menu);

    assert_eq!(summary.lines.len(), 1);
    assert_eq!(summary.lines[0].name, "Craft Beer");
    assert_eq!(summary.lines[0].extended_price, 6.5);
    assert_eq!(summary.skipped, vec![1]);
}

#[test]
fn test_burger_example() {
    let catalog = Catalog::from_json_str(r#"[{"id": 1, "name": "Burger", "price": 5}]"#).unwrap();

    let lines = price(&aggregate(&[1, 1, 1]), catalog.items());
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].quantity, 3);
    assert_eq!(lines[0].extended_price, 15.0);

    assert!(price(&aggregate(&[99, 99]), catalog.items()).is_empty());
}

#[test]
fn test_unknown_item_leaves_order_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let conn = setup_db(&dir);
    db::save_catalog(&conn, &Catalog::new(sample_menu()).unwrap(), true).unwrap();
    db::add_to_order(&conn, &[1]).unwrap();

    let err = db::add_to_order(&conn, &[0, 42]).unwrap_err();
    assert!(matches!(err.downcast_ref::<OrderError>(), Some(OrderError::UnknownItem(42))));
    assert_eq!(db::order_entries(&conn).unwrap(), vec![1]);
}
