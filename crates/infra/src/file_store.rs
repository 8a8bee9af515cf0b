//! Directory-backed key-value store.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::Context;

use stockroom_inventory::{KeyValueStore, PersistenceError};

/// One file per key (`<dir>/<key>.json`).
///
/// Writes go to a temporary sibling first and are renamed into place, so a
/// crash mid-write leaves the previous value intact.
#[derive(Debug)]
pub struct FileKeyValueStore {
    dir: PathBuf,
    write_lock: Mutex<()>,
}

impl FileKeyValueStore {
    /// Open (creating if needed) the store rooted at `dir`.
    pub fn open(dir: impl Into<PathBuf>) -> anyhow::Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)
            .with_context(|| format!("failed to create data directory at {}", dir.display()))?;
        tracing::debug!(dir = %dir.display(), "opened file key-value store");
        Ok(Self {
            dir,
            write_lock: Mutex::new(()),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn entry_path(&self, key: &str) -> Result<PathBuf, PersistenceError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(PersistenceError::backend(format!("invalid key `{key}`")));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl KeyValueStore for FileKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        let path = self.entry_path(key)?;
        match fs::read_to_string(&path) {
            Ok(raw) => Ok(Some(raw)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(io_error("read", &path, err)),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), PersistenceError> {
        let path = self.entry_path(key)?;
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| PersistenceError::backend("file store lock poisoned"))?;
        write_atomically(&path, value.as_bytes()).map_err(|err| io_error("write", &path, err))
    }

    fn remove(&self, key: &str) -> Result<(), PersistenceError> {
        let path = self.entry_path(key)?;
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| PersistenceError::backend("file store lock poisoned"))?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(io_error("remove", &path, err)),
        }
    }
}

/// Write `bytes` to `path` via a temporary file in the same directory.
pub(crate) fn write_atomically(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let tmp = path.with_extension("tmp");
    {
        let mut file = fs::File::create(&tmp)?;
        file.write_all(bytes)?;
        file.sync_all()?;
    }
    fs::rename(&tmp, path)
}

pub(crate) fn io_error(op: &str, path: &Path, err: io::Error) -> PersistenceError {
    PersistenceError::backend(format!("failed to {op} {}: {err}", path.display()))
}
