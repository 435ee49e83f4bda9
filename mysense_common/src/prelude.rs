//! Prelude module for common re-exports.
//!
//! # Usage
//!
//! ```rust
//! use mysense_common::prelude::*;
//! ```

// ─── Logging ────────────────────────────────────────────────────────
pub use crate::log::{RawSeverity, Severity};

// ─── Configuration ──────────────────────────────────────────────────
pub use crate::config::{AppConfig, ConfigError, ConfigLoader, SystemConfig};
pub use crate::module::schema::{
    ConfigDefinition, ConfigEntry, ConfigSource, ConfigValue, ModuleSettings, ValueType,
};

// ─── Modules ────────────────────────────────────────────────────────
pub use crate::module::codec::{CodecError, FieldSpec, FieldValue, Reading, ReadingLayout};
pub use crate::module::descriptor::{DecodedReading, DecodedValue, ModuleDescriptor, ModuleId};
pub use crate::module::error::{DriverError, ModuleError};
pub use crate::module::input::InputModule;

// ─── Time ───────────────────────────────────────────────────────────
pub use crate::time::{LocalTime, TimeSource};

// ─── System Constants ───────────────────────────────────────────────
pub use crate::consts::MAX_READING_WIDTH;
