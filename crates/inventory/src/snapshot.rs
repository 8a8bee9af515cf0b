//! Whole-state snapshot exchanged with the desktop app-data file.

use serde::{Deserialize, Serialize};

use crate::item::Item;
use crate::persistence::PersistenceError;

/// Everything the store holds, in one serializable value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppData {
    pub inventory: Vec<Item>,
    pub categories: Vec<String>,
    pub locations: Vec<String>,
    pub low_stock_threshold: u32,
}

/// Host-side storage for [`AppData`], separate from the key-value entries.
///
/// The desktop shell saves a snapshot on a timer and at shutdown, and offers
/// the last snapshot back on startup.
pub trait AppDataBridge {
    fn save_app_data(&self, data: &AppData) -> Result<(), PersistenceError>;

    /// `Ok(None)` when nothing has been saved yet.
    fn load_app_data(&self) -> Result<Option<AppData>, PersistenceError>;
}

impl<B: AppDataBridge + ?Sized> AppDataBridge for &B {
    fn save_app_data(&self, data: &AppData) -> Result<(), PersistenceError> {
        (**self).save_app_data(data)
    }

    fn load_app_data(&self) -> Result<Option<AppData>, PersistenceError> {
        (**self).load_app_data()
    }
}
