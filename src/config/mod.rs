use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};
use thiserror::Error;

use crate::{
    charts::palette::{Color, Palette},
    core::utils::{app_data_dir, config_file_in, ensure_dir, tmp_path, write_atomic},
    currency::{AmountFormatter, LocaleConfig},
    errors::ReportError,
};

const DEFAULT_SHORT_LABEL_LEN: usize = 8;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(String),
    #[error("Invalid palette color `{0}`")]
    Color(String),
}

impl From<ConfigError> for ReportError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Io(io) => ReportError::Storage(io.to_string()),
            other => ReportError::Config(other.to_string()),
        }
    }
}

/// User preferences applied to charts and exported reports.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReportConfig {
    #[serde(default)]
    pub locale: LocaleConfig,
    #[serde(default = "ReportConfig::default_currency")]
    pub currency: String,
    #[serde(default = "ReportConfig::default_title")]
    pub report_title: String,
    #[serde(default = "ReportConfig::default_short_label_len")]
    pub short_label_len: usize,
    /// Hex colors (`#RRGGBB`) replacing the built-in palette when non-empty.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub palette: Vec<String>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            locale: LocaleConfig::default(),
            currency: Self::default_currency(),
            report_title: Self::default_title(),
            short_label_len: DEFAULT_SHORT_LABEL_LEN,
            palette: Vec::new(),
        }
    }
}

impl ReportConfig {
    fn default_currency() -> String {
        "RUB".into()
    }

    fn default_title() -> String {
        "User payments report".into()
    }

    fn default_short_label_len() -> usize {
        DEFAULT_SHORT_LABEL_LEN
    }

    pub fn formatter(&self) -> AmountFormatter {
        AmountFormatter::new(self.locale.clone(), self.currency.clone())
    }

    /// Resolves the configured palette, falling back to the built-in colors.
    pub fn palette(&self) -> Result<Palette, ConfigError> {
        if self.palette.is_empty() {
            return Ok(Palette::default());
        }
        let colors = self
            .palette
            .iter()
            .map(|hex| Color::from_hex(hex).ok_or_else(|| ConfigError::Color(hex.clone())))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Palette::new(colors))
    }
}

/// Handles persistence of [`ReportConfig`].
#[derive(Debug, Clone)]
pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Manager rooted at the application data directory.
    pub fn new_default() -> Self {
        Self::with_base_dir(&app_data_dir())
    }

    pub fn with_base_dir(base: &Path) -> Self {
        Self::new(config_file_in(base))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<ReportConfig, ConfigError> {
        if self.path.exists() {
            let data = fs::read_to_string(&self.path)?;
            serde_json::from_str(&data).map_err(|err| ConfigError::Serde(err.to_string()))
        } else {
            Ok(ReportConfig::default())
        }
    }

    pub fn save(&self, config: &ReportConfig) -> Result<(), ConfigError> {
        if let Some(parent) = self.path.parent() {
            ensure_dir(parent)?;
        }
        let json = serde_json::to_string_pretty(config)
            .map_err(|err| ConfigError::Serde(err.to_string()))?;
        let tmp = tmp_path(&self.path);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}
