//! Key-value persistence contract for the inventory store.
//!
//! State is kept as four named entries, mirroring a browser-style string
//! key-value store:
//!
//! | key                 | value                          |
//! |---------------------|--------------------------------|
//! | `inventory`         | JSON array of items            |
//! | `categories`        | JSON array of strings          |
//! | `locations`         | JSON array of strings          |
//! | `lowStockThreshold` | integer as decimal text        |
//!
//! A missing entry falls back to its sample value. An entry that does not
//! parse is treated as corruption of the whole state (see [`load_state`]).

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock};

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

use crate::coerce;
use crate::item::Item;
use crate::seed;
use crate::snapshot::AppData;

pub const INVENTORY_KEY: &str = "inventory";
pub const CATEGORIES_KEY: &str = "categories";
pub const LOCATIONS_KEY: &str = "locations";
pub const THRESHOLD_KEY: &str = "lowStockThreshold";

pub const DEFAULT_LOW_STOCK_THRESHOLD: u32 = 30;

/// Persistence operation error.
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// The backend could not be read or written.
    #[error("storage backend failure: {0}")]
    Backend(String),

    /// An entry exists but is not valid JSON of the expected shape.
    #[error("corrupt `{key}` entry: {source}")]
    Corrupt {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// An entry parsed but breaks a store invariant.
    #[error("invalid `{key}` entry: {reason}")]
    Invalid { key: String, reason: String },

    #[error("failed to encode `{key}` entry: {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

impl PersistenceError {
    pub fn backend(msg: impl Into<String>) -> Self {
        Self::Backend(msg.into())
    }
}

/// String key-value storage.
///
/// Writes go through `&self`; implementations use interior mutability so a
/// backend can be shared behind an `Arc`.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError>;
    fn set(&self, key: &str, value: &str) -> Result<(), PersistenceError>;
    fn remove(&self, key: &str) -> Result<(), PersistenceError>;
}

impl<S> KeyValueStore for Arc<S>
where
    S: KeyValueStore + ?Sized,
{
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), PersistenceError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), PersistenceError> {
        (**self).remove(key)
    }
}

/// In-memory key-value store for tests/dev.
#[derive(Debug, Default)]
pub struct InMemoryKeyValueStore {
    inner: RwLock<HashMap<String, String>>,
}

impl InMemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populated store.
    pub fn with_entries<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            inner: RwLock::new(
                entries
                    .into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
        }
    }
}

impl KeyValueStore for InMemoryKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        let map = self
            .inner
            .read()
            .map_err(|_| PersistenceError::backend("in-memory store lock poisoned"))?;
        Ok(map.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), PersistenceError> {
        let mut map = self
            .inner
            .write()
            .map_err(|_| PersistenceError::backend("in-memory store lock poisoned"))?;
        map.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), PersistenceError> {
        let mut map = self
            .inner
            .write()
            .map_err(|_| PersistenceError::backend("in-memory store lock poisoned"))?;
        map.remove(key);
        Ok(())
    }
}

/// Read the four entries.
///
/// Missing entries take their sample value (threshold: 30). Any read error,
/// JSON parse failure or invariant violation (duplicate ids, invalid item) is
/// returned as an error so the caller can fall back to the sample dataset as
/// a whole. An unreadable threshold string is not fatal; it reverts to 30.
pub fn load_state<S: KeyValueStore + ?Sized>(store: &S) -> Result<AppData, PersistenceError> {
    let inventory: Vec<Item> = match store.get(INVENTORY_KEY)? {
        Some(raw) => decode_entry(INVENTORY_KEY, &raw)?,
        None => seed::sample_items(),
    };
    check_items(&inventory)?;

    let categories: Vec<String> = match store.get(CATEGORIES_KEY)? {
        Some(raw) => decode_entry(CATEGORIES_KEY, &raw)?,
        None => seed::sample_categories(),
    };

    let locations: Vec<String> = match store.get(LOCATIONS_KEY)? {
        Some(raw) => decode_entry(LOCATIONS_KEY, &raw)?,
        None => seed::sample_locations(),
    };

    let low_stock_threshold = match store.get(THRESHOLD_KEY)? {
        Some(raw) => match coerce::leading_int(&raw) {
            Some(v) => v.clamp(0, i64::from(u32::MAX)) as u32,
            None => {
                tracing::warn!(value = %raw, "ignoring unreadable low-stock threshold");
                DEFAULT_LOW_STOCK_THRESHOLD
            }
        },
        None => DEFAULT_LOW_STOCK_THRESHOLD,
    };

    Ok(AppData {
        inventory,
        categories,
        locations,
        low_stock_threshold,
    })
}

/// Write all four entries.
pub fn save_state<S: KeyValueStore + ?Sized>(
    store: &S,
    inventory: &[Item],
    categories: &[String],
    locations: &[String],
    low_stock_threshold: u32,
) -> Result<(), PersistenceError> {
    store.set(INVENTORY_KEY, &encode_entry(INVENTORY_KEY, inventory)?)?;
    store.set(CATEGORIES_KEY, &encode_entry(CATEGORIES_KEY, categories)?)?;
    store.set(LOCATIONS_KEY, &encode_entry(LOCATIONS_KEY, locations)?)?;
    store.set(THRESHOLD_KEY, &low_stock_threshold.to_string())?;
    Ok(())
}

fn decode_entry<T: DeserializeOwned>(key: &str, raw: &str) -> Result<T, PersistenceError> {
    serde_json::from_str(raw).map_err(|source| PersistenceError::Corrupt {
        key: key.to_string(),
        source,
    })
}

fn encode_entry<T: Serialize + ?Sized>(key: &str, value: &T) -> Result<String, PersistenceError> {
    serde_json::to_string(value).map_err(|source| PersistenceError::Encode {
        key: key.to_string(),
        source,
    })
}

fn check_items(items: &[Item]) -> Result<(), PersistenceError> {
    let mut seen = HashSet::with_capacity(items.len());
    for item in items {
        if !seen.insert(item.id) {
            return Err(PersistenceError::Invalid {
                key: INVENTORY_KEY.to_string(),
                reason: format!("duplicate item id {}", item.id),
            });
        }
        item.validate().map_err(|e| PersistenceError::Invalid {
            key: INVENTORY_KEY.to_string(),
            reason: format!("item {}: {e}", item.id),
        })?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_backend_loads_sample_state() {
        let store = InMemoryKeyValueStore::new();
        let state = load_state(&store).unwrap();
        assert_eq!(state, seed::sample_data());
        for key in [INVENTORY_KEY, CATEGORIES_KEY, LOCATIONS_KEY, THRESHOLD_KEY] {
            assert_eq!(store.get(key).unwrap(), None, "loading must not write `{key}`");
        }
    }

    #[test]
    fn missing_entries_fall_back_individually() {
        let store = InMemoryKeyValueStore::with_entries([
            (CATEGORIES_KEY, r#"["Tools"]"#),
            (THRESHOLD_KEY, "12"),
        ]);
        let state = load_state(&store).unwrap();
        assert_eq!(state.inventory, seed::sample_items());
        assert_eq!(state.categories, vec!["Tools".to_string()]);
        assert_eq!(state.locations, seed::sample_locations());
        assert_eq!(state.low_stock_threshold, 12);
    }

    #[test]
    fn corrupt_entry_is_an_error() {
        let store = InMemoryKeyValueStore::with_entries([(LOCATIONS_KEY, "[not json")]);
        let err = load_state(&store).unwrap_err();
        assert!(matches!(err, PersistenceError::Corrupt { ref key, .. } if key == LOCATIONS_KEY));
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let item = &seed::sample_items()[0];
        let raw = serde_json::to_string(&vec![item.clone(), item.clone()]).unwrap();
        let store = InMemoryKeyValueStore::with_entries([(INVENTORY_KEY, raw)]);
        assert!(matches!(
            load_state(&store).unwrap_err(),
            PersistenceError::Invalid { .. }
        ));
    }

    #[test]
    fn unreadable_threshold_reverts_to_default() {
        let store = InMemoryKeyValueStore::with_entries([(THRESHOLD_KEY, "NaN")]);
        assert_eq!(load_state(&store).unwrap().low_stock_threshold, 30);
    }

    #[test]
    fn save_then_load_preserves_state() {
        let store = Arc::new(InMemoryKeyValueStore::new());
        let data = seed::sample_data();
        save_state(
            &store,
            &data.inventory[..2],
            &data.categories,
            &data.locations,
            7,
        )
        .unwrap();

        assert_eq!(store.get(THRESHOLD_KEY).unwrap().as_deref(), Some("7"));
        let loaded = load_state(&store).unwrap();
        assert_eq!(loaded.inventory, data.inventory[..2].to_vec());
        assert_eq!(loaded.low_stock_threshold, 7);
    }

    #[test]
    fn remove_deletes_entry() {
        let store = InMemoryKeyValueStore::with_entries([("k", "v")]);
        store.remove("k").unwrap();
        assert_eq!(store.get("k").unwrap(), None);
    }
}
