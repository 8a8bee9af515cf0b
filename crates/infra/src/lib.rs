//! Infrastructure layer: filesystem persistence, the desktop app-data file,
//! autosave scheduling and configuration.

pub mod app_data;
pub mod autosave;
pub mod config;
pub mod file_store;

pub use app_data::JsonFileBridge;
pub use autosave::Autosave;
pub use config::{AppConfig, ConfigError};
pub use file_store::FileKeyValueStore;
