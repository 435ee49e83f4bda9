//! System-wide constants for the MySense workspace.
//!
//! Single source of truth for numeric limits and default paths.

/// Maximum width in bytes of a single module reading.
pub const MAX_READING_WIDTH: usize = 32;

/// Maximum width in bytes of a single encoded field.
pub const MAX_FIELD_WIDTH: usize = 8;

/// Key under which the persistent sink stores the last severe message.
pub const PERSISTENT_LOG_KEY: &str = "elog";

/// Epoch year the date/time reading is encoded against.
pub const EPOCH_YEAR: i32 = 1970;

/// Default configuration file path.
pub const DEFAULT_CONFIG_PATH: &str = "/etc/mysense/config.toml";

/// Default interval between polls in milliseconds.
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 1000;
