use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::debug;

use crate::{
    errors::{LuminaError, Result},
    utils::{
        paths::{self, ensure_dir, write_atomic},
        persistence::{StorageKeys, DEFAULT_EXPENSES_KEY, DEFAULT_SALARY_KEY},
    },
};

/// Process-wide settings: display currency and where state is persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "Config::default_currency")]
    pub currency: String,
    #[serde(default = "Config::default_expenses_key")]
    pub expenses_key: String,
    #[serde(default = "Config::default_salary_key")]
    pub salary_key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Optional custom directory for persisted entries. Defaults to `<base>/data`.
    pub data_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            currency: Self::default_currency(),
            expenses_key: Self::default_expenses_key(),
            salary_key: Self::default_salary_key(),
            data_dir: None,
        }
    }
}

impl Config {
    pub fn default_currency() -> String {
        "₹".into()
    }

    pub fn default_expenses_key() -> String {
        DEFAULT_EXPENSES_KEY.into()
    }

    pub fn default_salary_key() -> String {
        DEFAULT_SALARY_KEY.into()
    }

    pub fn storage_keys(&self) -> StorageKeys {
        StorageKeys {
            expenses: self.expenses_key.clone(),
            salary: self.salary_key.clone(),
        }
    }

    pub fn resolve_data_dir(&self, base: &Path) -> PathBuf {
        self.data_dir
            .clone()
            .unwrap_or_else(|| paths::data_dir_in(base))
    }
}

/// Loads and saves [`Config`] as a JSON file under the application directory.
#[derive(Debug, Clone)]
pub struct ConfigManager {
    base: PathBuf,
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self> {
        Self::with_base_dir(paths::app_data_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self> {
        ensure_dir(&base)?;
        Ok(Self {
            path: paths::config_file_in(&base),
            base,
        })
    }

    pub fn load(&self) -> Result<Config> {
        if self.path.exists() {
            let data = fs::read_to_string(&self.path)?;
            serde_json::from_str(&data).map_err(|err| {
                LuminaError::Config(format!("{}: {err}", self.path.display()))
            })
        } else {
            debug!(path = %self.path.display(), "no config file, using defaults");
            Ok(Config::default())
        }
    }

    pub fn save(&self, config: &Config) -> Result<()> {
        let json = serde_json::to_string_pretty(config)?;
        write_atomic(&self.path, &json)?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn base_dir(&self) -> &Path {
        &self.base
    }
}
