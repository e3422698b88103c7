//! Process configuration from environment variables.
//!
//! The core consumes configuration as data; this module only gathers
//! it. CLI flags override anything read here.

use std::env;
use std::path::PathBuf;

use log::LevelFilter;

const DEFAULT_DATA_FILE: &str = "data/manuscripts.json";

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Snapshot file path (`DATA_FILE`).
    pub data_file: PathBuf,
    /// Log verbosity (`LOG_LEVEL`), defaults to info.
    pub log_level: LevelFilter,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let data_file = env::var("DATA_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_DATA_FILE));
        let log_level = env::var("LOG_LEVEL")
            .ok()
            .and_then(|value| value.parse().ok())
            .unwrap_or(LevelFilter::Info);

        Self {
            data_file,
            log_level,
        }
    }
}
