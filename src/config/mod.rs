use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::{debug, warn};

use crate::{
    core::utils::{ensure_dir, PathResolver},
    currency,
    errors::{LedgerError, StorageError},
    storage::json_backend::{tmp_path, write_atomic},
};

/// User preferences persisted next to the ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Currency label stamped on new transactions.
    #[serde(default = "Config::default_currency")]
    pub currency: String,
    /// Overrides the ledger file location.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            currency: Self::default_currency(),
            data_file: None,
        }
    }
}

impl Config {
    fn default_currency() -> String {
        currency::DEFAULT_CURRENCY.to_string()
    }

    /// Selects the active currency by label or code.
    pub fn set_currency(&mut self, query: &str) -> Result<&str, LedgerError> {
        let label = currency::find(query)
            .ok_or_else(|| LedgerError::Config(format!("unsupported currency `{}`", query)))?;
        self.currency = label.to_string();
        Ok(&self.currency)
    }

    /// Ledger file to use, relative paths resolved against `base`.
    pub fn data_file_in(&self, base: &Path) -> PathBuf {
        match &self.data_file {
            Some(path) if path.is_absolute() => path.clone(),
            Some(path) => base.join(path),
            None => PathResolver::data_file_in(base),
        }
    }
}

pub struct ConfigManager {
    base: PathBuf,
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self, LedgerError> {
        Self::from_base(PathResolver::base_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self, LedgerError> {
        Self::from_base(base)
    }

    fn from_base(base: PathBuf) -> Result<Self, LedgerError> {
        ensure_dir(&base).map_err(|source| StorageError::WriteFailure {
            path: base.clone(),
            source,
        })?;
        Ok(Self {
            path: PathResolver::config_file_in(&base),
            base,
        })
    }

    pub fn load(&self) -> Result<Config, LedgerError> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "no config file, using defaults");
            return Ok(Config::default());
        }
        let data = fs::read_to_string(&self.path).map_err(|source| StorageError::ReadFailure {
            path: self.path.clone(),
            source,
        })?;
        let mut config: Config =
            serde_json::from_str(&data).map_err(|source| StorageError::MalformedData {
                path: self.path.clone(),
                source,
            })?;
        if !currency::is_supported(&config.currency) {
            let fallback = currency::find(&config.currency).unwrap_or(currency::DEFAULT_CURRENCY);
            warn!(
                configured = %config.currency,
                using = fallback,
                "unsupported currency in config"
            );
            config.currency = fallback.to_string();
        }
        Ok(config)
    }

    pub fn save(&self, config: &Config) -> Result<(), LedgerError> {
        let write_failure = |source: std::io::Error| StorageError::WriteFailure {
            path: self.path.clone(),
            source,
        };
        let json = serde_json::to_string_pretty(config).map_err(|err| write_failure(err.into()))?;
        let tmp = tmp_path(&self.path);
        let written = write_atomic(&tmp, &json).and_then(|_| fs::rename(&tmp, &self.path));
        if let Err(source) = written {
            let _ = fs::remove_file(&tmp);
            return Err(write_failure(source).into());
        }
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn base_dir(&self) -> &Path {
        &self.base
    }
}
