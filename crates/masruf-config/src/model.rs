use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Stores user-configurable preferences and ledger amounts.
///
/// Every field carries a serde default so configuration files written by
/// older builds keep deserializing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "Config::default_currency")]
    pub currency: String,
    /// Budget a brand-new book starts with.
    #[serde(default = "Config::default_initial_budget")]
    pub initial_budget: f64,
    /// Amount added by the once-per-day top-up.
    #[serde(default = "Config::default_daily_top_up")]
    pub daily_top_up: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Optional custom root directory for book files. Defaults to
    /// `~/Documents/Masruf`.
    pub data_root: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            currency: Self::default_currency(),
            initial_budget: Self::default_initial_budget(),
            daily_top_up: Self::default_daily_top_up(),
            data_root: None,
        }
    }
}

impl Config {
    pub fn default_currency() -> String {
        "IQD".into()
    }

    pub fn default_initial_budget() -> f64 {
        1_000_000.0
    }

    pub fn default_daily_top_up() -> f64 {
        1_000_000.0
    }

    pub fn resolve_data_root(&self) -> PathBuf {
        if let Some(path) = &self.data_root {
            return path.clone();
        }

        let base = dirs::document_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."));

        base.join("Masruf")
    }
}
