use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::currency::CurrencySettings;
use crate::errors::{BookkeepingError, Result};
use crate::utils::paths::{app_data_dir, config_file_in, ensure_dir, write_atomic};

/// Terminal columns per tree level.
const TERMINAL_INDENT: u16 = 2;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub currency: CurrencySettings,
    #[serde(default = "default_indent")]
    pub indent_width: u16,
    /// Value amount fields fall back to when left empty or unparseable.
    #[serde(default)]
    pub default_amount: f64,
    #[serde(default)]
    pub plain_mode: bool,
}

fn default_indent() -> u16 {
    TERMINAL_INDENT
}

impl Default for Config {
    fn default() -> Self {
        Self {
            currency: CurrencySettings::default(),
            indent_width: TERMINAL_INDENT,
            default_amount: 0.0,
            plain_mode: false,
        }
    }
}

impl Config {
    fn validate(&self) -> Result<()> {
        if !self.default_amount.is_finite() {
            return Err(BookkeepingError::Config(
                "default_amount must be a finite number".into(),
            ));
        }
        if self.currency.max_fraction_digits > 6 {
            return Err(BookkeepingError::Config(format!(
                "max_fraction_digits {} is out of range (0-6)",
                self.currency.max_fraction_digits
            )));
        }
        Ok(())
    }
}

pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self> {
        Self::with_base_dir(app_data_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self> {
        ensure_dir(&base)?;
        Ok(Self {
            path: config_file_in(&base),
        })
    }

    /// Loads the stored configuration, or defaults when none was saved yet.
    pub fn load(&self) -> Result<Config> {
        if !self.path.exists() {
            return Ok(Config::default());
        }
        let data = fs::read_to_string(&self.path)?;
        let config: Config = serde_json::from_str(&data)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self, config: &Config) -> Result<()> {
        config.validate()?;
        let json = serde_json::to_string_pretty(config)?;
        write_atomic(&self.path, &json)?;
        tracing::debug!("configuration saved to {}", self.path.display());
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
