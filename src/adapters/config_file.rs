//! JSON file configuration adapter.
//!
//! Implements [`ConfigPort`] over a single pretty-printed JSON document.
//! Values are validated on the way in and on the way out.

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use log::{info, warn};

use crate::app::ports::{ConfigError, ConfigPort};
use crate::config::MonitorConfig;

pub struct JsonFileConfig {
    path: PathBuf,
}

impl JsonFileConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ConfigPort for JsonFileConfig {
    fn load(&self) -> Result<MonitorConfig, ConfigError> {
        let text = fs::read_to_string(&self.path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => ConfigError::NotFound,
            _ => {
                warn!("config: read {} failed: {e}", self.path.display());
                ConfigError::IoError
            }
        })?;
        let config: MonitorConfig = serde_json::from_str(&text).map_err(|e| {
            warn!("config: {} is not valid: {e}", self.path.display());
            ConfigError::Corrupted
        })?;
        config.validate()?;
        info!("config: loaded {}", self.path.display());
        Ok(config)
    }

    fn save(&self, config: &MonitorConfig) -> Result<(), ConfigError> {
        config.validate()?;
        let text = serde_json::to_string_pretty(config).map_err(|_| ConfigError::Corrupted)?;
        fs::write(&self.path, text).map_err(|e| {
            warn!("config: write {} failed: {e}", self.path.display());
            ConfigError::IoError
        })
    }
}
