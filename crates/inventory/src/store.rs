//! The inventory store: single in-memory source of truth with write-through
//! persistence.

use indexmap::IndexMap;

use stockroom_core::{DomainError, DomainResult, Entity, ItemId};
use stockroom_csv::Quoting;

use crate::clock::{Clock, SystemClock};
use crate::coerce;
use crate::export;
use crate::filter::SearchFilters;
use crate::item::{Item, NewItem};
use crate::persistence::{self, KeyValueStore};
use crate::seed;
use crate::snapshot::AppData;

/// Owns items, known categories/locations and the low-stock threshold.
///
/// Every successful mutation is written to `P` before returning. A failed
/// write is logged and the in-memory change is kept; nothing here panics or
/// returns a storage error to the caller.
///
/// Mutations take `&mut self`, so there is never more than one in flight.
/// Callers sharing a store across threads must wrap it in a lock.
#[derive(Debug)]
pub struct InventoryStore<P, C = SystemClock> {
    persistence: P,
    clock: C,
    items: Vec<Item>,
    categories: Vec<String>,
    locations: Vec<String>,
    low_stock_threshold: u32,
}

impl<P: KeyValueStore> InventoryStore<P, SystemClock> {
    /// Load persisted state, falling back to the sample dataset.
    pub fn init(persistence: P) -> Self {
        Self::with_clock(persistence, SystemClock)
    }
}

impl<P: KeyValueStore, C: Clock> InventoryStore<P, C> {
    pub fn with_clock(persistence: P, clock: C) -> Self {
        let state = match persistence::load_state(&persistence) {
            Ok(state) => state,
            Err(err) => {
                tracing::error!(error = %err, "failed to load inventory; using sample data");
                seed::sample_data()
            }
        };

        tracing::info!(
            items = state.inventory.len(),
            categories = state.categories.len(),
            locations = state.locations.len(),
            threshold = state.low_stock_threshold,
            "inventory store initialized"
        );

        Self {
            persistence,
            clock,
            items: state.inventory,
            categories: state.categories,
            locations: state.locations,
            low_stock_threshold: state.low_stock_threshold,
        }
    }

    /// Owned copy of every item, in insertion order.
    pub fn inventory(&self) -> Vec<Item> {
        self.items.clone()
    }

    /// Borrowed view of every item, in insertion order.
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn get_item(&self, id: ItemId) -> Option<&Item> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn categories(&self) -> Vec<String> {
        self.categories.clone()
    }

    pub fn locations(&self) -> Vec<String> {
        self.locations.clone()
    }

    pub fn low_stock_threshold(&self) -> u32 {
        self.low_stock_threshold
    }

    pub fn set_low_stock_threshold(&mut self, value: u32) {
        self.low_stock_threshold = value;
        self.persist();
    }

    /// Set the threshold from user text, e.g. `"25"`.
    ///
    /// Text without a leading integer becomes 0, negatives become 0. Returns
    /// the value stored.
    pub fn set_low_stock_threshold_input(&mut self, input: &str) -> u32 {
        if coerce::leading_int(input).is_none() {
            tracing::warn!(input, "non-numeric low-stock threshold; using 0");
        }
        let value = coerce::non_negative_int(input);
        self.set_low_stock_threshold(value);
        value
    }

    /// Append a new item with a fresh id and today's date.
    ///
    /// Fails, changing nothing, when the largest id in use is `u64::MAX`.
    pub fn add_item(&mut self, item: NewItem) -> DomainResult<Item> {
        let stored = item.into_item(self.next_id()?, self.clock.today());
        self.register_labels(&stored.category, &stored.location);
        self.items.push(stored.clone());
        self.persist();

        tracing::debug!(id = %stored.id, name = %stored.name, "item added");
        Ok(stored)
    }

    /// Replace the item with the same id.
    ///
    /// Returns `false`, changing nothing, when no such item exists or the
    /// replacement is invalid (blank name/category/location, bad price).
    pub fn update_item(&mut self, mut item: Item) -> bool {
        let Some(index) = self.items.iter().position(|e| e.same_identity(&item)) else {
            tracing::debug!(id = %item.id, "update skipped: no such item");
            return false;
        };
        if let Err(err) = item.validate() {
            tracing::warn!(id = %item.id, error = %err, "rejecting invalid item update");
            return false;
        }

        item.last_updated = self.clock.today();
        self.register_labels(&item.category, &item.location);
        self.items[index] = item;
        self.persist();
        true
    }

    /// Remove the item with `id`. Persists only if something was removed.
    pub fn delete_item(&mut self, id: ItemId) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.id != id);

        let removed = self.items.len() < before;
        if removed {
            self.persist();
            tracing::debug!(%id, "item deleted");
        }
        removed
    }

    /// Items matching every filter, in inventory order.
    pub fn search_inventory(&self, filters: &SearchFilters) -> Vec<Item> {
        if filters.is_empty() {
            return self.items.clone();
        }
        self.items
            .iter()
            .filter(|item| filters.matches(item))
            .cloned()
            .collect()
    }

    /// Items whose quantity is at or below the threshold.
    pub fn low_stock_items(&self) -> Vec<Item> {
        self.items
            .iter()
            .filter(|item| item.is_low_stock(self.low_stock_threshold))
            .cloned()
            .collect()
    }

    /// Sum of quantities.
    pub fn total_item_count(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }

    /// Sum of quantity × price.
    pub fn total_value(&self) -> f64 {
        self.items.iter().map(Item::value).sum()
    }

    /// Quantity per known category, in known-category order. Categories
    /// without items map to 0.
    pub fn items_by_category(&self) -> IndexMap<String, u64> {
        let mut totals: IndexMap<String, u64> =
            self.categories.iter().map(|c| (c.clone(), 0)).collect();
        for item in &self.items {
            if let Some(total) = totals.get_mut(&item.category) {
                *total += u64::from(item.quantity);
            }
        }
        totals
    }

    /// Legacy export: canonical header, values written verbatim.
    pub fn export_to_csv(&self) -> String {
        self.export_to_csv_with(Quoting::Never)
    }

    pub fn export_to_csv_with(&self, quoting: Quoting) -> String {
        export::encode_items(&self.items, quoting)
    }

    /// Restore the sample items, categories and locations.
    ///
    /// The low-stock threshold is a user setting and is kept.
    pub fn reset_to_sample_data(&mut self) {
        self.items = seed::sample_items();
        self.categories = seed::sample_categories();
        self.locations = seed::sample_locations();
        self.persist();
        tracing::info!("inventory reset to sample data");
    }

    /// Copy of the whole state for the app-data bridge.
    pub fn snapshot(&self) -> AppData {
        AppData {
            inventory: self.items.clone(),
            categories: self.categories.clone(),
            locations: self.locations.clone(),
            low_stock_threshold: self.low_stock_threshold,
        }
    }

    /// Merge a saved snapshot by updating each contained item that still
    /// exists here. Returns the number of items updated.
    pub fn apply_app_data(&mut self, data: &AppData) -> usize {
        let mut updated = 0;
        for item in &data.inventory {
            if self.update_item(item.clone()) {
                updated += 1;
            }
        }
        tracing::info!(updated, offered = data.inventory.len(), "applied saved app data");
        updated
    }

    fn next_id(&self) -> DomainResult<ItemId> {
        match self.items.iter().map(Entity::id).max() {
            None => Ok(ItemId::FIRST),
            Some(max) => max
                .next()
                .ok_or_else(|| DomainError::invariant(format!("no item id left after {max}"))),
        }
    }

    fn register_labels(&mut self, category: &str, location: &str) {
        if !self.categories.iter().any(|c| c == category) {
            self.categories.push(category.to_string());
        }
        if !self.locations.iter().any(|l| l == location) {
            self.locations.push(location.to_string());
        }
    }

    fn persist(&self) -> bool {
        match persistence::save_state(
            &self.persistence,
            &self.items,
            &self.categories,
            &self.locations,
            self.low_stock_threshold,
        ) {
            Ok(()) => true,
            Err(err) => {
                tracing::error!(error = %err, "failed to persist inventory");
                false
            }
        }
    }
}
