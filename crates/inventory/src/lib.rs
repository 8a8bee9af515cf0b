//! Inventory domain module.
//!
//! Owns the canonical item list together with the known categories, locations
//! and the low-stock threshold. Every successful mutation is written through an
//! injected [`KeyValueStore`]; reads that fail fall back to the sample dataset.
//!
//! CSV text handling lives in `stockroom-csv`; this crate maps items onto
//! CSV rows ([`export`]) and rows back onto new items ([`import`]).

pub mod clock;
pub mod coerce;
pub mod export;
pub mod filter;
pub mod import;
pub mod item;
pub mod persistence;
pub mod report;
pub mod seed;
pub mod snapshot;
pub mod store;

pub use clock::{Clock, FixedClock, SystemClock};
pub use export::CSV_HEADER;
pub use filter::SearchFilters;
pub use import::{import_csv, import_rows, ImportSummary, REQUIRED_FIELDS};
pub use item::{Item, ItemForm, NewItem};
pub use persistence::{InMemoryKeyValueStore, KeyValueStore, PersistenceError};
pub use report::{CategoryShare, InventorySummary};
pub use snapshot::{AppData, AppDataBridge};
pub use store::InventoryStore;

pub use stockroom_core::{DomainError, DomainResult, ItemId};
pub use stockroom_csv::Quoting;
