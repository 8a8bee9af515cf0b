//! Configuration loading and representation.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use stockroom_inventory::Quoting;
use stockroom_observability::LogFormat;

use crate::autosave::DEFAULT_AUTOSAVE_INTERVAL;

pub const DATA_DIR_VAR: &str = "STOCKROOM_DATA_DIR";
pub const AUTOSAVE_SECS_VAR: &str = "STOCKROOM_AUTOSAVE_SECS";
pub const CSV_QUOTING_VAR: &str = "STOCKROOM_CSV_QUOTING";
pub const LOG_FORMAT_VAR: &str = "STOCKROOM_LOG_FORMAT";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var}={value:?} is invalid: {reason}")]
    InvalidValue {
        var: &'static str,
        value: String,
        reason: String,
    },
}

impl ConfigError {
    fn invalid(var: &'static str, value: &str, reason: impl ToString) -> Self {
        Self::InvalidValue {
            var,
            value: value.to_string(),
            reason: reason.to_string(),
        }
    }
}

/// Runtime settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Holds the key-value entries and the app-data file.
    pub data_dir: PathBuf,
    pub autosave_interval: Duration,
    /// Quoting used by CSV export.
    pub csv_quoting: Quoting,
    pub log_format: LogFormat,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            autosave_interval: DEFAULT_AUTOSAVE_INTERVAL,
            csv_quoting: Quoting::default(),
            log_format: LogFormat::default(),
        }
    }
}

impl AppConfig {
    /// Read settings from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Read settings through `lookup`; unset variables take defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        match lookup(DATA_DIR_VAR) {
            Some(dir) if !dir.trim().is_empty() => config.data_dir = PathBuf::from(dir),
            _ => tracing::debug!(
                dir = %config.data_dir.display(),
                "{} not set; using default data directory",
                DATA_DIR_VAR
            ),
        }

        if let Some(raw) = lookup(AUTOSAVE_SECS_VAR) {
            let secs: u64 = raw
                .trim()
                .parse()
                .map_err(|e| ConfigError::invalid(AUTOSAVE_SECS_VAR, &raw, e))?;
            if secs == 0 {
                return Err(ConfigError::invalid(AUTOSAVE_SECS_VAR, &raw, "must be positive"));
            }
            config.autosave_interval = Duration::from_secs(secs);
        }

        if let Some(raw) = lookup(CSV_QUOTING_VAR) {
            config.csv_quoting = raw
                .parse()
                .map_err(|e| ConfigError::invalid(CSV_QUOTING_VAR, &raw, e))?;
        }

        config.log_format = Self::log_format_from_lookup(&lookup)?;

        Ok(config)
    }

    /// Just the log format, so logging can be installed before the rest of
    /// the configuration is read.
    pub fn log_format_from_env() -> Result<LogFormat, ConfigError> {
        Self::log_format_from_lookup(|var| std::env::var(var).ok())
    }

    pub fn log_format_from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<LogFormat, ConfigError> {
        match lookup(LOG_FORMAT_VAR) {
            Some(raw) => raw
                .parse()
                .map_err(|e| ConfigError::invalid(LOG_FORMAT_VAR, &raw, e)),
            None => Ok(LogFormat::default()),
        }
    }
}

/// `<platform data dir>/stockroom`, or `./.stockroom` when the platform has
/// none.
pub fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join("stockroom"))
        .unwrap_or_else(|| PathBuf::from(".stockroom"))
}
