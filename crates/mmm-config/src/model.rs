use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Stores user-configurable preferences for the MMM app.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Optional custom directory for the ledger blobs. Defaults to the
    /// platform data dir under `mmm`.
    pub data_dir: Option<PathBuf>,
    #[serde(default = "Config::default_currency_symbol")]
    pub currency_symbol: String,
    #[serde(default = "Config::default_recent_limit")]
    pub recent_limit: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: None,
            currency_symbol: Self::default_currency_symbol(),
            recent_limit: Self::default_recent_limit(),
        }
    }
}

impl Config {
    pub fn default_currency_symbol() -> String {
        "฿".into()
    }

    pub fn default_recent_limit() -> usize {
        5
    }

    pub fn resolve_data_dir(&self) -> PathBuf {
        if let Some(path) = &self.data_dir {
            return path.clone();
        }

        let base = dirs::data_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."));

        base.join("mmm")
    }
}
