//! Configuration loading from environment variables.

use std::path::PathBuf;

use thiserror::Error;

use stockroom_observability::{LogFormat, UnknownLogFormat};

use crate::export::{ExportFormat, Exporter, UnknownExportFormat};

pub const EXPORT_DIR: &str = "STOCKROOM_EXPORT_DIR";
pub const EXPORT_FORMAT: &str = "STOCKROOM_EXPORT_FORMAT";
pub const LOG_FORMAT: &str = "STOCKROOM_LOG_FORMAT";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid {}", EXPORT_FORMAT)]
    ExportFormat(#[source] UnknownExportFormat),

    #[error("invalid {}", LOG_FORMAT)]
    LogFormat(#[source] UnknownLogFormat),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StockroomConfig {
    /// Directory export files are written into.
    pub export_dir: PathBuf,
    pub export_format: ExportFormat,
    pub log_format: LogFormat,
}

impl Default for StockroomConfig {
    fn default() -> Self {
        Self {
            export_dir: PathBuf::from("."),
            export_format: ExportFormat::default(),
            log_format: LogFormat::default(),
        }
    }
}

impl StockroomConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through `lookup`; unset or blank keys keep their
    /// defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(dir) = get(EXPORT_DIR) {
            config.export_dir = PathBuf::from(dir.trim());
        }
        if let Some(format) = get(EXPORT_FORMAT) {
            config.export_format = format
                .parse::<ExportFormat>()
                .map_err(ConfigError::ExportFormat)?;
        }
        if let Some(format) = get(LOG_FORMAT) {
            config.log_format = format
                .parse::<LogFormat>()
                .map_err(ConfigError::LogFormat)?;
        }

        Ok(config)
    }

    pub fn exporter(&self) -> Exporter {
        Exporter::new(self.export_dir.clone(), self.export_format)
    }
}
