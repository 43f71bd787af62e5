//! Data models for menu items and orders

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

pub type MenuItemId = i64;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: MenuItemId,
    pub name: String,
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub emoji: String,
    pub price: f64,
}

/// Units ordered per menu item, iterated in the order items were first ordered
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderQuantities {
    counts: HashMap<MenuItemId, u32>,
    order: Vec<MenuItemId>,
}

impl OrderQuantities {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one unit of `id`
    pub fn record(&mut self, id: MenuItemId) {
        self.add(id, 1);
    }

    // Counts saturate at u32::MAX
    fn add(&mut self, id: MenuItemId, count: u32) {
        match self.counts.get_mut(&id) {
            Some(existing) => *existing = existing.saturating_add(count),
            None => {
                self.order.push(id);
                self.counts.insert(id, count);
            }
        }
    }

    pub fn get(&self, id: MenuItemId) -> Option<u32> {
        self.counts.get(&id).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (MenuItemId, u32)> + '_ {
        self.order.iter().map(|id| (*id, self.counts[id]))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn total_units(&self) -> u64 {
        self.counts.values().map(|&c| u64::from(c)).sum()
    }
}

impl FromIterator<(MenuItemId, u32)> for OrderQuantities {
    /// Zero counts are dropped; repeated ids accumulate
    fn from_iter<I: IntoIterator<Item = (MenuItemId, u32)>>(iter: I) -> Self {
        let mut quantities = OrderQuantities::new();
        for (id, count) in iter {
            if count > 0 {
                quantities.add(id, count);
            }
        }
        quantities
    }
}

/// A priced, named line of an order
#[derive(Debug, Clone, PartialEq)]
pub struct OrderLine {
    pub name: String,
    pub quantity: u32,
    pub extended_price: f64,
}

/// Result of pricing an order log against the menu
#[derive(Debug, Clone, PartialEq)]
pub struct OrderSummary {
    pub lines: Vec<OrderLine>,
    pub total_units: u64,
    pub total_price: f64,
    pub skipped: Vec<MenuItemId>, // ordered ids with no menu entry
}
