//! Whole-state snapshot files: the app-data file written at shutdown
//! (`inventory-data.json`) and the user's manual backup
//! (`inventory-backup.json`).

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use stockroom_inventory::{AppData, AppDataBridge, PersistenceError};

use crate::file_store::{io_error, write_atomically};

pub const APP_DATA_FILE: &str = "inventory-data.json";
pub const BACKUP_FILE: &str = "inventory-backup.json";

/// Stores the whole-state snapshot as one compact JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileBridge {
    path: PathBuf,
}

impl JsonFileBridge {
    /// Bridge writing `inventory-data.json` inside `data_dir`.
    pub fn in_dir(data_dir: impl AsRef<Path>) -> Self {
        Self::at(data_dir.as_ref().join(APP_DATA_FILE))
    }

    /// Bridge writing `inventory-backup.json` inside `data_dir`.
    pub fn backup_in(data_dir: impl AsRef<Path>) -> Self {
        Self::at(data_dir.as_ref().join(BACKUP_FILE))
    }

    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl AppDataBridge for JsonFileBridge {
    fn save_app_data(&self, data: &AppData) -> Result<(), PersistenceError> {
        let bytes = serde_json::to_vec(data).map_err(|source| PersistenceError::Encode {
            key: self.path.display().to_string(),
            source,
        })?;
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|err| io_error("create", parent, err))?;
        }
        write_atomically(&self.path, &bytes).map_err(|err| io_error("write", &self.path, err))?;

        tracing::debug!(path = %self.path.display(), items = data.inventory.len(), "app data saved");
        Ok(())
    }

    fn load_app_data(&self) -> Result<Option<AppData>, PersistenceError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(io_error("read", &self.path, err)),
        };

        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|source| PersistenceError::Corrupt {
                key: self.path.display().to_string(),
                source,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stockroom_inventory::seed;

    #[test]
    fn nothing_saved_loads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let bridge = JsonFileBridge::in_dir(dir.path());
        assert!(bridge.load_app_data().unwrap().is_none());
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let bridge = JsonFileBridge::in_dir(dir.path().join("app"));
        let data = seed::sample_data();

        bridge.save_app_data(&data).unwrap();
        assert_eq!(bridge.path().file_name().unwrap(), APP_DATA_FILE);
        assert_eq!(bridge.load_app_data().unwrap(), Some(data));
    }

    #[test]
    fn backup_and_app_data_are_separate_files() {
        let dir = tempfile::tempdir().unwrap();
        let app_data = JsonFileBridge::in_dir(dir.path());
        let backup = JsonFileBridge::backup_in(dir.path());

        backup.save_app_data(&seed::sample_data()).unwrap();
        assert_eq!(backup.path().file_name().unwrap(), BACKUP_FILE);
        assert!(app_data.load_app_data().unwrap().is_none());
    }

    #[test]
    fn garbage_file_is_reported_as_corrupt() {
        let dir = tempfile::tempdir().unwrap();
        let bridge = JsonFileBridge::in_dir(dir.path());
        fs::write(bridge.path(), "not json").unwrap();
        assert!(matches!(
            bridge.load_app_data(),
            Err(PersistenceError::Corrupt { .. })
        ));
    }
}
