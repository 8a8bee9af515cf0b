//! Dashboard figures derived from the store.

use serde::Serialize;

use crate::clock::Clock;
use crate::persistence::KeyValueStore;
use crate::store::InventoryStore;

/// Headline numbers for the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InventorySummary {
    /// Number of distinct records.
    pub distinct_items: usize,
    /// Sum of quantities.
    pub total_quantity: u64,
    pub total_value: f64,
    pub low_stock_items: usize,
    pub low_stock_threshold: u32,
    pub categories: usize,
    pub locations: usize,
}

/// One category's slice of the total quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryShare {
    pub category: String,
    pub quantity: u64,
    /// Rounded percentage of all stock; `None` when there is no stock at all.
    pub percent: Option<u32>,
}

impl<P: KeyValueStore, C: Clock> InventoryStore<P, C> {
    pub fn summary(&self) -> InventorySummary {
        InventorySummary {
            distinct_items: self.items().len(),
            total_quantity: self.total_item_count(),
            total_value: self.total_value(),
            low_stock_items: self.low_stock_items().len(),
            low_stock_threshold: self.low_stock_threshold(),
            categories: self.categories().len(),
            locations: self.locations().len(),
        }
    }

    /// Per-category quantities with their share of the total.
    pub fn category_breakdown(&self) -> Vec<CategoryShare> {
        let total = self.total_item_count();
        self.items_by_category()
            .into_iter()
            .map(|(category, quantity)| CategoryShare {
                category,
                quantity,
                percent: (total > 0)
                    .then(|| ((quantity as f64 / total as f64) * 100.0).round() as u32),
            })
            .collect()
    }
}
