//! Global sailings configuration.

use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::error::{ScheduleError, ScheduleResult};
use crate::rules::RuleSet;
use crate::store::FileStore;

static DEFAULT_STORE_PATH: &str = "~/.local/share/sailings/entries.json";

fn default_store_path() -> PathBuf {
    PathBuf::from(DEFAULT_STORE_PATH)
}

/// Configuration at ~/.config/sailings/config.toml, overridable through
/// `SAILINGS_*` environment variables.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SailingsConfig {
    /// JSON file holding stored sailings
    #[serde(default = "default_store_path")]
    pub store_path: PathBuf,

    /// TOML file with the weekly sailing rules; the standard week is used when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rules_path: Option<PathBuf>,
}

impl Default for SailingsConfig {
    fn default() -> Self {
        SailingsConfig {
            store_path: default_store_path(),
            rules_path: None,
        }
    }
}

impl SailingsConfig {
    pub fn config_path() -> ScheduleResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| ScheduleError::Config("Could not determine config directory".into()))?
            .join("sailings");

        Ok(config_dir.join("config.toml"))
    }

    /// Load the global config, writing a commented default file on first use.
    pub fn load() -> ScheduleResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        Self::load_from(&config_path)
    }

    pub fn load_from(path: &Path) -> ScheduleResult<Self> {
        Config::builder()
            .add_source(File::from(path).required(false))
            .add_source(Environment::with_prefix("SAILINGS"))
            .build()
            .map_err(|e| ScheduleError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| ScheduleError::Config(e.to_string()))
    }

    pub fn store_path(&self) -> PathBuf {
        expand(&self.store_path)
    }

    pub fn store(&self) -> FileStore {
        FileStore::new(self.store_path())
    }

    /// The configured weekly rules, or the standard week.
    pub fn rules(&self) -> ScheduleResult<RuleSet> {
        match &self.rules_path {
            Some(path) => RuleSet::load(&expand(path)),
            None => Ok(RuleSet::reference()),
        }
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> ScheduleResult<()> {
        let contents = format!(
            "\
# sailings configuration

# Where stored sailings are kept:
# store_path = \"{}\"

# Weekly sailing rules (TOML, one [[sailing]] table per weekday):
# rules_path = \"~/.config/sailings/rules.toml\"
",
            DEFAULT_STORE_PATH
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                ScheduleError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| ScheduleError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}

fn expand(path: &Path) -> PathBuf {
    PathBuf::from(shellexpand::tilde(&path.to_string_lossy()).into_owned())
}
