//! Shelf configuration resolved from command-line flags.
//!
//! Every flag can also come from the environment (`PAROKIOS_STORE_PATH`,
//! `PAROKIOS_RECENTS_LIMIT`, `PAROKIOS_COUNTRY_CODE`, `PAROKIOS_ORIGIN`); clap
//! merges those before the values reach [`ShelfConfig::resolve`].

use std::path::PathBuf;

use shelf::DEFAULT_RECENTS_LIMIT;
use wa::{NumberPlan, PlanError};

pub const DEFAULT_STORE_PATH: &str = "parokios-shelf.json";
pub const DEFAULT_ORIGIN: &str = "https://parokios.id";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid recents limit: {0} (expected an integer >= 1)")]
    InvalidRecentsLimit(usize),
    #[error("invalid country code: {0}")]
    InvalidCountryCode(#[from] PlanError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShelfConfig {
    pub store_path: PathBuf,
    pub recents_limit: usize,
    pub number_plan: NumberPlan,
    /// Site origin without a trailing slash.
    pub origin: String,
}

impl Default for ShelfConfig {
    fn default() -> Self {
        Self {
            store_path: PathBuf::from(DEFAULT_STORE_PATH),
            recents_limit: DEFAULT_RECENTS_LIMIT,
            number_plan: NumberPlan::default(),
            origin: DEFAULT_ORIGIN.to_string(),
        }
    }
}

impl ShelfConfig {
    /// Build typed config, falling back to defaults for anything unset.
    ///
    /// Defaults:
    /// - store path: `parokios-shelf.json`
    /// - recents limit: 12 (must be >= 1)
    /// - country code: `62`
    /// - origin: `https://parokios.id`
    pub fn resolve(
        store_path: Option<PathBuf>,
        recents_limit: Option<usize>,
        country_code: Option<&str>,
        origin: Option<&str>,
    ) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Some(path) = store_path {
            config.store_path = path;
        }
        if let Some(limit) = recents_limit {
            if limit == 0 {
                return Err(ConfigError::InvalidRecentsLimit(limit));
            }
            config.recents_limit = limit;
        }
        if let Some(code) = country_code {
            config.number_plan = NumberPlan::with_country_code(code)?;
        }
        if let Some(origin) = origin {
            config.origin = origin.trim().trim_end_matches('/').to_string();
        }
        Ok(config)
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;
