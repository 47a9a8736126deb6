//! Configuration loading and config file resolution
//!
//! Config file resolution priority:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable (`PVF_CONFIG`)
//! 3. Per-user config file (`~/.config/pvf/config.toml` on Linux)
//! 4. Compiled defaults (fallback)
//!
//! A missing config file is never fatal; the filter runs with compiled defaults.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Environment variable naming an explicit config file
pub const CONFIG_ENV_VAR: &str = "PVF_CONFIG";

/// Top-level TOML configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TomlConfig {
    /// Record filter rules
    #[serde(default)]
    pub filter: FilterConfig,

    /// Logging configuration (optional)
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Tunable inputs of the validation rules
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterConfig {
    /// Accepted domain codes, matched exactly
    #[serde(default = "default_domains")]
    pub domains: Vec<String>,

    /// Titles always excluded
    #[serde(default = "default_special_pages")]
    pub special_pages: Vec<String>,

    /// File extensions (with leading dot) excluded, ASCII case-insensitive
    #[serde(default = "default_rejected_extensions")]
    pub rejected_extensions: Vec<String>,

    /// Trailing marker identifying disambiguation pages
    #[serde(default = "default_disambiguation_marker")]
    pub disambiguation_marker: String,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            domains: default_domains(),
            special_pages: default_special_pages(),
            rejected_extensions: default_rejected_extensions(),
            disambiguation_marker: default_disambiguation_marker(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_domains() -> Vec<String> {
    vec!["en".to_string(), "en.m".to_string()]
}

fn default_special_pages() -> Vec<String> {
    vec!["Main_Page".to_string(), "-".to_string()]
}

fn default_rejected_extensions() -> Vec<String> {
    [".png", ".jpg", ".jpeg", ".gif", ".ico"]
        .iter()
        .map(|ext| ext.to_string())
        .collect()
}

fn default_disambiguation_marker() -> String {
    "(disambiguation)".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Read and parse a TOML config file
///
/// # Errors
///
/// Returns error if the file cannot be read or is not valid TOML for [`TomlConfig`].
pub fn load_toml_config(path: &Path) -> Result<TomlConfig> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("Failed to read config file {:?}: {}", path, e)))?;
    let config: TomlConfig = toml::from_str(&content)?;
    config.filter.validate()?;
    Ok(config)
}

impl FilterConfig {
    /// Reject values that would make a rule match every title
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] for an empty domain list, an empty
    /// disambiguation marker, or an empty rejected extension.
    pub fn validate(&self) -> Result<()> {
        if self.domains.is_empty() {
            return Err(Error::Config("filter.domains must not be empty".to_string()));
        }
        if self.disambiguation_marker.trim().is_empty() {
            return Err(Error::Config(
                "filter.disambiguation_marker must not be empty".to_string(),
            ));
        }
        if self.rejected_extensions.iter().any(|ext| ext.trim().is_empty()) {
            return Err(Error::Config(
                "filter.rejected_extensions must not contain empty entries".to_string(),
            ));
        }
        Ok(())
    }
}

/// Where the active configuration came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Parsed from this file
    File(PathBuf),
    /// No usable file; compiled defaults
    Defaults,
}

/// Locates and loads the config file following the priority order above
#[derive(Debug, Clone)]
pub struct ConfigResolver {
    cli_path: Option<PathBuf>,
}

impl ConfigResolver {
    pub fn new(cli_path: Option<PathBuf>) -> Self {
        Self { cli_path }
    }

    /// Path of the config file to use, if any exists
    pub fn config_path(&self) -> Option<PathBuf> {
        if let Some(path) = &self.cli_path {
            return Some(path.clone());
        }

        if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
            if !path.is_empty() {
                return Some(PathBuf::from(path));
            }
        }

        default_config_path().filter(|path| path.exists())
    }

    /// Load the resolved config file, falling back to compiled defaults
    ///
    /// An explicitly requested file (CLI or environment) that fails to parse is
    /// an error. A file that does not exist only produces a warning.
    ///
    /// # Errors
    ///
    /// Returns error if an existing config file cannot be read, parsed or
    /// validated.
    pub fn load(&self) -> Result<TomlConfig> {
        self.resolve().map(|(config, _)| config)
    }

    /// Like [`ConfigResolver::load`], also reporting which source was used
    ///
    /// # Errors
    ///
    /// See [`ConfigResolver::load`].
    pub fn resolve(&self) -> Result<(TomlConfig, ConfigSource)> {
        let Some(path) = self.config_path() else {
            info!("No config file found, using compiled defaults");
            return Ok((TomlConfig::default(), ConfigSource::Defaults));
        };

        if !path.exists() {
            warn!("Config file {:?} not found, using compiled defaults", path);
            return Ok((TomlConfig::default(), ConfigSource::Defaults));
        }

        let config = load_toml_config(&path)?;
        info!("Loaded configuration from {:?}", path);
        Ok((config, ConfigSource::File(path)))
    }
}

/// Per-user config file location for the platform
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("pvf").join("config.toml"))
}
