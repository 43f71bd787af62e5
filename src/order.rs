//! Order aggregation and pricing logic

use std::collections::HashMap;

use crate::models::{MenuItem, MenuItemId, OrderLine, OrderQuantities, OrderSummary};

/// Count repeated order entries into per-item quantities
///
/// Every distinct id in `entries` appears exactly once in the result, mapped to
/// its number of occurrences. Ids are not checked against the menu here.
pub fn aggregate(entries: &[MenuItemId]) -> OrderQuantities {
    let mut quantities = OrderQuantities::new();
    for &id in entries {
        quantities.record(id);
    }
    quantities
}

/// Price aggregated quantities against the menu
///
/// Lines come out in the iteration order of `quantities`. Ids missing from
/// `catalog` produce no line.
pub fn price(quantities: &OrderQuantities, catalog: &[MenuItem]) -> Vec<OrderLine> {
    let (lines, _) = price_indexed(quantities, &index_catalog(catalog));
    lines
}

/// Sum of extended prices
pub fn order_total(lines: &[OrderLine]) -> f64 {
    lines.iter().map(|l| l.extended_price).sum()
}

/// Aggregate and price an order log in one pass
pub fn summarize_order(entries: &[MenuItemId], catalog: &[MenuItem]) -> OrderSummary {
    let quantities = aggregate(entries);
    let (lines, skipped) = price_indexed(&quantities, &index_catalog(catalog));

    if !skipped.is_empty() {
        tracing::warn!(?skipped, "order references items no longer on the menu");
    }

    OrderSummary {
        total_units: lines.iter().map(|l| u64::from(l.quantity)).sum(),
        total_price: order_total(&lines),
        lines,
        skipped,
    }
}

// Priced lines plus the ids that had no menu entry, both in quantity order
fn price_indexed(
    quantities: &OrderQuantities,
    by_id: &HashMap<MenuItemId, &MenuItem>,
) -> (Vec<OrderLine>, Vec<MenuItemId>) {
    let mut lines = Vec::with_capacity(quantities.len());
    let mut skipped = Vec::new();

    for (id, quantity) in quantities.iter() {
        match by_id.get(&id) {
            Some(item) => lines.push(OrderLine {
                name: item.name.clone(),
                quantity,
                extended_price: item.price * f64::from(quantity),
            }),
            None => {
                tracing::debug!(id, quantity, "skipping order entry with no menu item");
                skipped.push(id);
            }
        }
    }

    (lines, skipped)
}

// First record wins when an id repeats
fn index_catalog(catalog: &[MenuItem]) -> HashMap<MenuItemId, &MenuItem> {
    let mut by_id = HashMap::with_capacity(catalog.len());
    for item in catalog {
        by_id.entry(item.id).or_insert(item);
    }
    by_id
}

/// Format order lines as receipt rows
pub fn format_order_lines(lines: &[OrderLine], currency: &str) -> String {
    let mut output = String::new();
    for line in lines {
        output.push_str(&format!(
            "  {:>3}x {:<24} {:>10}\n",
            line.quantity,
            line.name,
            format!("{}{:.2}", currency, line.extended_price)
        ));
    }
    output
}

/// Format a menu item as a single listing row
pub fn format_menu_item(item: &MenuItem, currency: &str) -> String {
    let emoji = if item.emoji.is_empty() { " " } else { item.emoji.as_str() };
    format!(
        "{:>3}  {} {:<20} {:>8}\n       {}",
        item.id,
        emoji,
        item.name,
        format!("{}{}", currency, item.price),
        item.ingredients.join(", ")
    )
}

/// Format an order summary as a plain-text receipt
pub fn format_receipt(summary: &OrderSummary, currency: &str) -> String {
    let mut output = String::from("=== Your Order ===\n");

    if summary.lines.is_empty() {
        output.push_str("No items ordered\n");
        return output;
    }

    output.push_str(&format_order_lines(&summary.lines, currency));
    output.push_str(&format!("{}\n", "-".repeat(42)));
    output.push_str(&format!(
        "  {:>3}  {:<24} {:>10}\n",
        summary.total_units,
        "Total price:",
        format!("{}{:.2}", currency, summary.total_price)
    ));

    output
}
