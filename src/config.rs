//! Runtime configuration, read from `CIDR_CALC_*` environment variables.
//!
//! Call `dotenv::dotenv()` first to pick up a `.env` file.

use crate::error::{Error, Result};
use crate::index::{IndexOptions, DEFAULT_BATCH_SIZE};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

pub const ENV_DOCUMENTS_DIR: &str = "CIDR_CALC_DOCUMENTS_DIR";
pub const ENV_INDEX_FILE: &str = "CIDR_CALC_INDEX_FILE";
pub const ENV_CATALOG_FILE: &str = "CIDR_CALC_CATALOG_FILE";
pub const ENV_REINDEX_INTERVAL_SECS: &str = "CIDR_CALC_REINDEX_INTERVAL_SECS";
pub const ENV_BATCH_SIZE: &str = "CIDR_CALC_BATCH_SIZE";
pub const ENV_PERSIST_UPSERTS: &str = "CIDR_CALC_PERSIST_UPSERTS";

const DEFAULT_DOCUMENTS_DIR: &str = "networks";
const DEFAULT_INDEX_FILE: &str = "networks.index.json";
const DEFAULT_CATALOG_FILE: &str = "ip-ranges.json";
const DEFAULT_REINDEX_INTERVAL: Duration = Duration::from_secs(300);

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Directory of source documents, one JSON file per network.
    pub documents_dir: PathBuf,
    /// Snapshot file of the last good index build. Empty value disables it.
    pub index_file: Option<PathBuf>,
    pub catalog_file: PathBuf,
    pub reindex_interval: Duration,
    pub batch_size: usize,
    /// Write computed descriptors back to `documents_dir`.
    pub persist_upserts: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            documents_dir: PathBuf::from(DEFAULT_DOCUMENTS_DIR),
            index_file: Some(PathBuf::from(DEFAULT_INDEX_FILE)),
            catalog_file: PathBuf::from(DEFAULT_CATALOG_FILE),
            reindex_interval: DEFAULT_REINDEX_INTERVAL,
            batch_size: DEFAULT_BATCH_SIZE,
            persist_upserts: true,
        }
    }
}

impl Config {
    /// Load from the process environment.
    pub fn from_env() -> Result<Config> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from any key lookup, unset keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Config>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();
        if let Some(dir) = lookup(ENV_DOCUMENTS_DIR) {
            config.documents_dir = PathBuf::from(dir);
        }
        if let Some(file) = lookup(ENV_INDEX_FILE) {
            config.index_file = match file.trim() {
                "" => None,
                f => Some(PathBuf::from(f)),
            };
        }
        if let Some(file) = lookup(ENV_CATALOG_FILE) {
            config.catalog_file = PathBuf::from(file);
        }
        if let Some(secs) = lookup(ENV_REINDEX_INTERVAL_SECS) {
            config.reindex_interval =
                Duration::from_secs(parse_positive(ENV_REINDEX_INTERVAL_SECS, &secs)?);
        }
        if let Some(size) = lookup(ENV_BATCH_SIZE) {
            config.batch_size = parse_positive(ENV_BATCH_SIZE, &size)?;
        }
        if let Some(flag) = lookup(ENV_PERSIST_UPSERTS) {
            config.persist_upserts = parse_bool(ENV_PERSIST_UPSERTS, &flag)?;
        }
        log::debug!("Config loaded: {config:?}");
        Ok(config)
    }

    /// Index settings derived from this configuration.
    pub fn index_options(&self) -> IndexOptions {
        IndexOptions {
            batch_size: self.batch_size,
            index_file: self.index_file.clone(),
            documents_dir: self
                .persist_upserts
                .then(|| self.documents_dir.clone()),
        }
    }
}

fn parse_positive<T>(key: &str, value: &str) -> Result<T>
where
    T: FromStr + PartialOrd + Default,
{
    match value.trim().parse::<T>() {
        Ok(n) if n > T::default() => Ok(n),
        Ok(_) => Err(Error::config(key, value, "must be greater than 0")),
        Err(_) => Err(Error::config(key, value, "not a number")),
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(Error::config(key, value, "expected true or false")),
    }
}
