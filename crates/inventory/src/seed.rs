//! Sample dataset used on first run and whenever persisted state is unusable.

use chrono::NaiveDate;

use stockroom_core::ItemId;

use crate::item::Item;
use crate::persistence::DEFAULT_LOW_STOCK_THRESHOLD;
use crate::snapshot::AppData;

pub const SAMPLE_CATEGORIES: [&str; 5] = [
    "Electronics",
    "Parts",
    "Equipment",
    "Raw Materials",
    "Finished Goods",
];

pub const SAMPLE_LOCATIONS: [&str; 3] = ["Warehouse A", "Warehouse B", "Warehouse C"];

// (id, name, category, quantity, price, location, (year, month, day))
type SampleRow = (u64, &'static str, &'static str, u32, f64, &'static str, (i32, u32, u32));

const SAMPLE_ITEMS: [SampleRow; 5] = [
    (1, "Widget A", "Electronics", 150, 29.99, "Warehouse A", (2025, 4, 20)),
    (2, "Component B", "Parts", 432, 12.50, "Warehouse B", (2025, 4, 22)),
    (3, "Tool Set C", "Equipment", 28, 149.99, "Warehouse A", (2025, 4, 23)),
    (4, "Material D", "Raw Materials", 1250, 3.75, "Warehouse C", (2025, 4, 19)),
    (5, "Product E", "Finished Goods", 75, 89.99, "Warehouse B", (2025, 4, 24)),
];

pub fn sample_items() -> Vec<Item> {
    SAMPLE_ITEMS
        .iter()
        .filter_map(|&(id, name, category, quantity, price, location, (y, m, d))| {
            Some(Item {
                id: ItemId::new(id)?,
                name: name.to_string(),
                category: category.to_string(),
                quantity,
                price,
                location: location.to_string(),
                last_updated: NaiveDate::from_ymd_opt(y, m, d)?,
            })
        })
        .collect()
}

pub fn sample_categories() -> Vec<String> {
    SAMPLE_CATEGORIES.iter().map(|c| c.to_string()).collect()
}

pub fn sample_locations() -> Vec<String> {
    SAMPLE_LOCATIONS.iter().map(|l| l.to_string()).collect()
}

/// The complete sample state, threshold included.
pub fn sample_data() -> AppData {
    AppData {
        inventory: sample_items(),
        categories: sample_categories(),
        locations: sample_locations(),
        low_stock_threshold: DEFAULT_LOW_STOCK_THRESHOLD,
    }
}
