//! Global giftlist configuration.

use std::path::{Path, PathBuf};
use std::time::Duration;

use ::config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::error::{GiftError, GiftResult};
use crate::store::JsonFileStore;

static DEFAULT_DATA_FILE: &str = "~/.giftlist/gifts.json";
static DEFAULT_CHECK_INTERVAL: &str = "1h";

fn default_data_file() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_FILE)
}

fn default_check_interval() -> String {
    DEFAULT_CHECK_INTERVAL.to_string()
}

/// Configuration at ~/.config/giftlist/config.toml
///
/// Every key can also be set through a `GIFTLIST_`-prefixed environment
/// variable, e.g. `GIFTLIST_DATA_FILE`.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct GiftlistConfig {
    /// Where the gift list is stored.
    #[serde(default = "default_data_file")]
    pub data_file: PathBuf,

    /// How often `watch` re-checks reminders, e.g. "1h" or "30m".
    #[serde(default = "default_check_interval")]
    pub check_interval: String,
}

impl Default for GiftlistConfig {
    fn default() -> Self {
        GiftlistConfig {
            data_file: default_data_file(),
            check_interval: default_check_interval(),
        }
    }
}

impl GiftlistConfig {
    pub fn config_path() -> GiftResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| GiftError::Config("Could not determine config directory".into()))?
            .join("giftlist");

        Ok(config_dir.join("config.toml"))
    }

    /// Load from the default location, creating a commented-out config file
    /// on first run.
    pub fn load() -> GiftResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        Self::load_from(&config_path)
    }

    pub fn load_from(path: &Path) -> GiftResult<Self> {
        let config: GiftlistConfig = Config::builder()
            .add_source(File::from(path.to_path_buf()).required(false))
            .add_source(Environment::with_prefix("GIFTLIST"))
            .build()
            .map_err(|e| GiftError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| GiftError::Config(e.to_string()))?;

        // Surface a bad interval at load time rather than when `watch` starts.
        config.check_interval()?;
        Ok(config)
    }

    /// The data file with `~` expanded.
    pub fn data_path(&self) -> PathBuf {
        let full_path_str = shellexpand::tilde(&self.data_file.to_string_lossy()).into_owned();
        PathBuf::from(full_path_str)
    }

    pub fn store(&self) -> JsonFileStore {
        JsonFileStore::new(self.data_path())
    }

    pub fn check_interval(&self) -> GiftResult<Duration> {
        let interval = humantime::parse_duration(self.check_interval.trim()).map_err(|e| {
            GiftError::Config(format!(
                "Invalid check_interval '{}': {}",
                self.check_interval, e
            ))
        })?;

        if interval.is_zero() {
            return Err(GiftError::Config("check_interval must be positive".into()));
        }
        Ok(interval)
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> GiftResult<()> {
        let contents = format!(
            "\
# giftlist configuration

# Where your gift list is stored:
# data_file = \"{}\"

# How often `giftlist watch` checks for upcoming reminders:
# check_interval = \"{}\"
",
            DEFAULT_DATA_FILE, DEFAULT_CHECK_INTERVAL
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                GiftError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| GiftError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}
