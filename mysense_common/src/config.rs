//! Configuration loading traits and types.
//!
//! This module provides a standardized way to load TOML configuration files
//! across all MySense applications.
//!
//! # Usage
//!
//! ```rust,no_run
//! use mysense_common::config::{AppConfig, ConfigLoader, ConfigError};
//! use std::path::Path;
//!
//! fn main() -> Result<(), ConfigError> {
//!     let config = AppConfig::load(Path::new("config.toml"))?;
//!     config.validate()?;
//!     println!("Service: {}", config.system.service_name);
//!     Ok(())
//! }
//! ```

use crate::consts::DEFAULT_POLL_INTERVAL_MS;
use crate::log::Severity;
use crate::module::schema::{ConfigSource, ConfigValue, ValueType};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Error type for configuration loading and resolution.
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    /// Configuration file not found at specified path.
    #[error("Configuration file not found")]
    FileNotFound,

    /// TOML parsing failed.
    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    /// Semantic validation failed.
    #[error("Configuration validation failed: {0}")]
    ValidationError(String),

    /// A configured value does not have the declared type.
    #[error("[{section}] {key}: expected {expected}")]
    TypeMismatch {
        /// Configuration section
        section: String,
        /// Key within the section
        key: String,
        /// Declared value type
        expected: ValueType,
    },

    /// A schema default literal cannot be parsed as its declared type.
    #[error("[{section}] {key}: default '{literal}' is not a valid {expected}")]
    InvalidDefault {
        /// Configuration section
        section: String,
        /// Key within the section
        key: String,
        /// Default literal from the schema
        literal: String,
        /// Declared value type
        expected: ValueType,
    },
}

/// System-wide settings from the `[system]` table.
///
/// # TOML Example
///
/// ```toml
/// [system]
/// service_name = "mysense-01"
/// log_level = "debug"
/// modules = ["input_datetime", "input_hcsr04"]
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemConfig {
    /// Device instance identifier.
    pub service_name: String,

    /// Dispatcher threshold applied at startup.
    #[serde(default)]
    pub log_level: Severity,

    /// Whether the console sink stamps lines.
    #[serde(default)]
    pub timestamps: bool,

    /// Interval between polls in milliseconds.
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    /// Directory backing the persistent sink. In-memory when absent.
    #[serde(default)]
    pub persist_dir: Option<PathBuf>,

    /// Module configuration sections to instantiate, in order.
    #[serde(default)]
    pub modules: Vec<String>,
}

fn default_poll_interval_ms() -> u64 {
    DEFAULT_POLL_INTERVAL_MS
}

impl SystemConfig {
    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ValidationError` if:
    /// - `service_name` is empty
    /// - `poll_interval_ms` is zero
    /// - a module section is listed twice
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.service_name.is_empty() {
            return Err(ConfigError::ValidationError(
                "service_name cannot be empty".to_string(),
            ));
        }
        if self.poll_interval_ms == 0 {
            return Err(ConfigError::ValidationError(
                "poll_interval_ms must be greater than zero".to_string(),
            ));
        }
        let mut seen = HashSet::new();
        for name in &self.modules {
            if !seen.insert(name.as_str()) {
                return Err(ConfigError::ValidationError(format!(
                    "module '{name}' listed more than once"
                )));
            }
        }
        Ok(())
    }
}

/// Whole application configuration: the `[system]` table plus one table per
/// module section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// System-wide settings.
    pub system: SystemConfig,

    /// Remaining tables, keyed by module section name.
    #[serde(flatten)]
    pub sections: toml::Table,
}

impl AppConfig {
    /// Parse configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.system.validate()
    }
}

impl ConfigSource for AppConfig {
    fn get(&self, section: &str, key: &str) -> Option<ConfigValue> {
        ConfigSource::get(&self.sections, section, key)
    }
}

/// Trait for loading configuration from TOML files.
///
/// This trait provides a default implementation that works with any type
/// implementing `serde::de::DeserializeOwned`.
///
/// # Contract
///
/// - Returns `ConfigError::FileNotFound` if the file does not exist
/// - Returns `ConfigError::ParseError` if TOML syntax is invalid
pub trait ConfigLoader: Sized + serde::de::DeserializeOwned {
    /// Load configuration from a TOML file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the TOML configuration file
    fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ConfigError::FileNotFound
            } else {
                ConfigError::ParseError(e.to_string())
            }
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::ParseError(e.to_string()))
    }
}

// Blanket implementation for all types that implement DeserializeOwned.
impl<T: serde::de::DeserializeOwned> ConfigLoader for T {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_system_config_defaults() {
        let config = AppConfig::from_toml(
            r#"
[system]
service_name = "unit"
"#,
        )
        .unwrap();
        assert_eq!(config.system.log_level, Severity::Info);
        assert!(!config.system.timestamps);
        assert_eq!(config.system.poll_interval_ms, DEFAULT_POLL_INTERVAL_MS);
        assert!(config.system.persist_dir.is_none());
        assert!(config.system.modules.is_empty());
        assert!(config.sections.is_empty());
    }

    #[test]
    fn test_sections_are_collected() {
        let config = AppConfig::from_toml(
            r#"
[system]
service_name = "unit"
modules = ["input_hcsr04"]

[input_hcsr04]
pin_echo = 5
"#,
        )
        .unwrap();
        assert_eq!(
            config.get("input_hcsr04", "pin_echo"),
            Some(ConfigValue::Int(5))
        );
        assert_eq!(config.get("input_hcsr04", "samples"), None);
        assert_eq!(config.get("system", "service_name"), None);
    }

    #[test]
    fn test_validation_empty_service_name() {
        let config = AppConfig::from_toml("[system]\nservice_name = \"\"\n").unwrap();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn test_validation_duplicate_module() {
        let config = AppConfig::from_toml(
            "[system]\nservice_name = \"x\"\nmodules = [\"a\", \"a\"]\n",
        )
        .unwrap();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("more than once"));
    }

    #[test]
    fn test_validation_zero_interval() {
        let config =
            AppConfig::from_toml("[system]\nservice_name = \"x\"\npoll_interval_ms = 0\n")
                .unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_loader_file_not_found() {
        let result = AppConfig::load(Path::new("/nonexistent/path/config.toml"));
        assert!(matches!(result, Err(ConfigError::FileNotFound)));
    }

    #[test]
    fn test_config_loader_parse_error() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "invalid toml {{{{").unwrap();

        let result = AppConfig::load(file.path());
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_config_loader_success() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[system]
service_name = "test-device"
log_level = "debug"
timestamps = true
"#
        )
        .unwrap();
        file.flush().unwrap();

        let config = AppConfig::load(file.path()).unwrap();
        assert_eq!(config.system.service_name, "test-device");
        assert_eq!(config.system.log_level, Severity::Debug);
        assert!(config.system.timestamps);
    }
}
