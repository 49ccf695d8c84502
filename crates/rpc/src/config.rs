//! Application configuration
//!
//! Values come from `SPLITBILL_*` environment variables, then CLI flags
//! override them. Missing or unparsable variables fall back to the defaults.

use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

use splitbill_store::SNAPSHOT_FILE;

pub const ENV_DATA_DIR: &str = "SPLITBILL_DATA_DIR";
pub const ENV_HOST: &str = "SPLITBILL_HOST";
pub const ENV_PORT: &str = "SPLITBILL_PORT";
pub const ENV_LOG_LEVEL: &str = "SPLITBILL_LOG_LEVEL";

/// Runtime configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Directory holding `bills.json`
    pub data_dir: PathBuf,
    pub host: String,
    pub port: u16,
    /// Default tracing filter when `RUST_LOG` is unset
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./data"),
            host: "127.0.0.1".to_string(),
            port: 3000,
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Load config from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load config from any key lookup (the environment in production)
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        Self {
            data_dir: lookup(ENV_DATA_DIR)
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from)
                .unwrap_or(defaults.data_dir),
            host: lookup(ENV_HOST)
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(defaults.host),
            port: lookup(ENV_PORT)
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(defaults.port),
            log_level: lookup(ENV_LOG_LEVEL)
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(defaults.log_level),
        }
    }

    /// Full bind address, e.g. `127.0.0.1:3000`
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Path of the ledger snapshot
    pub fn bills_file(&self) -> PathBuf {
        self.data_dir.join(SNAPSHOT_FILE)
    }
}
