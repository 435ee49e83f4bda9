//! Configuration schema declared by input modules.
//!
//! A module declares a [`ConfigDefinition`]: a section name, a description
//! and an ordered list of entries `(key, default literal, description, type)`.
//! At construction time the definition is resolved against a
//! [`ConfigSource`] into [`ModuleSettings`], where every key holds either the
//! configured value or its parsed default, checked against the declared type.

use crate::config::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// Type of a configuration value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    /// Unsigned integer.
    Uint,
    /// Signed integer.
    Int,
    /// Floating point number.
    Float,
    /// Boolean.
    Bool,
    /// Free text.
    String,
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Uint => "uint",
            Self::Int => "int",
            Self::Float => "float",
            Self::Bool => "bool",
            Self::String => "string",
        };
        f.write_str(name)
    }
}

/// A typed configuration value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConfigValue {
    /// Unsigned integer.
    Uint(u64),
    /// Signed integer.
    Int(i64),
    /// Floating point number.
    Float(f64),
    /// Boolean.
    Bool(bool),
    /// Free text.
    Str(String),
}

impl ConfigValue {
    /// Convert to `ty`, if the value is representable as that type.
    ///
    /// Integers are accepted where a float is declared; non-negative signed
    /// integers are accepted where an unsigned one is declared.
    pub fn coerce(self, ty: ValueType) -> Option<ConfigValue> {
        match (ty, self) {
            (ValueType::Uint, v @ ConfigValue::Uint(_)) => Some(v),
            (ValueType::Uint, ConfigValue::Int(i)) => u64::try_from(i).ok().map(ConfigValue::Uint),
            (ValueType::Int, v @ ConfigValue::Int(_)) => Some(v),
            (ValueType::Int, ConfigValue::Uint(u)) => i64::try_from(u).ok().map(ConfigValue::Int),
            (ValueType::Float, v @ ConfigValue::Float(_)) => Some(v),
            (ValueType::Float, ConfigValue::Int(i)) => Some(ConfigValue::Float(i as f64)),
            (ValueType::Float, ConfigValue::Uint(u)) => Some(ConfigValue::Float(u as f64)),
            (ValueType::Bool, v @ ConfigValue::Bool(_)) => Some(v),
            (ValueType::String, v @ ConfigValue::Str(_)) => Some(v),
            _ => None,
        }
    }

    /// Parse a schema default literal as `ty`.
    pub fn parse_literal(literal: &str, ty: ValueType) -> Option<ConfigValue> {
        let literal = literal.trim();
        match ty {
            ValueType::Uint => literal.parse().ok().map(ConfigValue::Uint),
            ValueType::Int => literal.parse().ok().map(ConfigValue::Int),
            ValueType::Float => literal.parse().ok().map(ConfigValue::Float),
            ValueType::Bool => match literal.to_ascii_lowercase().as_str() {
                "true" | "1" => Some(ConfigValue::Bool(true)),
                "false" | "0" => Some(ConfigValue::Bool(false)),
                _ => None,
            },
            ValueType::String => Some(ConfigValue::Str(literal.to_string())),
        }
    }
}

impl fmt::Display for ConfigValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Uint(v) => write!(f, "{v}"),
            Self::Int(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Bool(v) => write!(f, "{v}"),
            Self::Str(v) => f.write_str(v),
        }
    }
}

impl From<&toml::Value> for ConfigValue {
    fn from(value: &toml::Value) -> Self {
        match value {
            toml::Value::Integer(i) => ConfigValue::Int(*i),
            toml::Value::Float(v) => ConfigValue::Float(*v),
            toml::Value::Boolean(b) => ConfigValue::Bool(*b),
            toml::Value::String(s) => ConfigValue::Str(s.clone()),
            // Arrays, tables and datetimes only ever satisfy a string entry.
            other => ConfigValue::Str(other.to_string()),
        }
    }
}

/// One configurable key of a module.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfigEntry {
    /// Key within the module's section.
    pub key: &'static str,
    /// Default literal, parsed according to `value_type`.
    pub default: &'static str,
    /// Human-readable description.
    pub description: &'static str,
    /// Declared type.
    pub value_type: ValueType,
}

impl ConfigEntry {
    /// Declare an entry.
    pub const fn new(
        key: &'static str,
        default: &'static str,
        description: &'static str,
        value_type: ValueType,
    ) -> Self {
        Self {
            key,
            default,
            description,
            value_type,
        }
    }
}

/// Configuration schema of a module type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfigDefinition {
    /// Configuration section name, e.g. `input_hcsr04`.
    pub section: &'static str,
    /// Human-readable description of the module.
    pub description: &'static str,
    /// Ordered entries.
    pub entries: &'static [ConfigEntry],
}

impl ConfigDefinition {
    /// Declare a schema.
    pub const fn new(
        section: &'static str,
        description: &'static str,
        entries: &'static [ConfigEntry],
    ) -> Self {
        Self {
            section,
            description,
            entries,
        }
    }

    /// Look up an entry by key.
    pub fn entry(&self, key: &str) -> Option<&'static ConfigEntry> {
        let entries: &'static [ConfigEntry] = self.entries;
        entries.iter().find(|e| e.key == key)
    }

    /// Resolve every entry against `source`, falling back to defaults.
    ///
    /// # Errors
    ///
    /// - `ConfigError::TypeMismatch` if a configured value has the wrong type
    /// - `ConfigError::InvalidDefault` if a default literal does not parse
    pub fn resolve(&self, source: &dyn ConfigSource) -> Result<ModuleSettings, ConfigError> {
        let mut values = Vec::with_capacity(self.entries.len());
        for entry in self.entries {
            let value = match source.get(self.section, entry.key) {
                Some(raw) => {
                    raw.coerce(entry.value_type)
                        .ok_or_else(|| ConfigError::TypeMismatch {
                            section: self.section.to_string(),
                            key: entry.key.to_string(),
                            expected: entry.value_type,
                        })?
                }
                None => {
                    debug!(
                        "[{}] {} not configured, using default '{}'",
                        self.section, entry.key, entry.default
                    );
                    ConfigValue::parse_literal(entry.default, entry.value_type).ok_or_else(
                        || ConfigError::InvalidDefault {
                            section: self.section.to_string(),
                            key: entry.key.to_string(),
                            literal: entry.default.to_string(),
                            expected: entry.value_type,
                        },
                    )?
                }
            };
            values.push((entry.key, value));
        }
        Ok(ModuleSettings {
            section: self.section,
            values,
        })
    }
}

/// Configuration collaborator: yields raw values by section and key.
pub trait ConfigSource {
    /// Value configured for `key` in `section`, if any.
    fn get(&self, section: &str, key: &str) -> Option<ConfigValue>;
}

impl ConfigSource for toml::Table {
    fn get(&self, section: &str, key: &str) -> Option<ConfigValue> {
        self.get(section)?
            .as_table()?
            .get(key)
            .map(ConfigValue::from)
    }
}

/// A source with nothing configured; every entry takes its default.
#[derive(Debug, Clone, Copy, Default)]
pub struct Defaults;

impl ConfigSource for Defaults {
    fn get(&self, _section: &str, _key: &str) -> Option<ConfigValue> {
        None
    }
}

/// Resolved, type-checked settings of one module.
#[derive(Debug, Clone, PartialEq)]
pub struct ModuleSettings {
    section: &'static str,
    values: Vec<(&'static str, ConfigValue)>,
}

impl ModuleSettings {
    /// Section the settings were resolved from.
    pub fn section(&self) -> &'static str {
        self.section
    }

    /// Raw resolved value for `key`.
    pub fn value(&self, key: &str) -> Option<&ConfigValue> {
        self.values.iter().find(|(k, _)| *k == key).map(|(_, v)| v)
    }

    /// Unsigned integer value for `key`.
    pub fn get_uint(&self, key: &str) -> Result<u64, ConfigError> {
        match self.value(key) {
            Some(ConfigValue::Uint(v)) => Ok(*v),
            other => Err(self.wrong_type(key, ValueType::Uint, other)),
        }
    }

    /// Signed integer value for `key`.
    pub fn get_int(&self, key: &str) -> Result<i64, ConfigError> {
        match self.value(key) {
            Some(ConfigValue::Int(v)) => Ok(*v),
            other => Err(self.wrong_type(key, ValueType::Int, other)),
        }
    }

    /// Float value for `key`.
    pub fn get_float(&self, key: &str) -> Result<f64, ConfigError> {
        match self.value(key) {
            Some(ConfigValue::Float(v)) => Ok(*v),
            other => Err(self.wrong_type(key, ValueType::Float, other)),
        }
    }

    /// Boolean value for `key`.
    pub fn get_bool(&self, key: &str) -> Result<bool, ConfigError> {
        match self.value(key) {
            Some(ConfigValue::Bool(v)) => Ok(*v),
            other => Err(self.wrong_type(key, ValueType::Bool, other)),
        }
    }

    /// String value for `key`.
    pub fn get_str(&self, key: &str) -> Result<&str, ConfigError> {
        match self.value(key) {
            Some(ConfigValue::Str(v)) => Ok(v),
            other => Err(self.wrong_type(key, ValueType::String, other)),
        }
    }

    fn wrong_type(&self, key: &str, expected: ValueType, found: Option<&ConfigValue>) -> ConfigError {
        match found {
            None => ConfigError::ValidationError(format!(
                "[{}] {key}: no such setting",
                self.section
            )),
            Some(_) => ConfigError::TypeMismatch {
                section: self.section.to_string(),
                key: key.to_string(),
                expected,
            },
        }
    }
}
