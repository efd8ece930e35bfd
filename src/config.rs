//! Configuration for newslog
//!
//! Centralized configuration with sensible defaults.

use std::path::PathBuf;

/// Main configuration for a newslog store instance
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Storage Configuration
    // -------------------------------------------------------------------------
    /// Path of the log file. One file per logical collection; created on
    /// first append if it does not exist.
    pub log_path: PathBuf,

    // -------------------------------------------------------------------------
    // Durability Configuration
    // -------------------------------------------------------------------------
    /// Whether to fsync after every append (safest, slowest)
    pub sync_on_append: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_path: PathBuf::from("./newslog.db"),
            sync_on_append: true,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the log file path
    pub fn log_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.log_path = path.into();
        self
    }

    /// Set whether appends fsync before returning
    pub fn sync_on_append(mut self, sync: bool) -> Self {
        self.config.sync_on_append = sync;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
