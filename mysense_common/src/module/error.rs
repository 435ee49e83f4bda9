//! Error types for input modules and their driver collaborators.

use crate::config::ConfigError;
use crate::module::codec::CodecError;
use std::time::Duration;
use thiserror::Error;

/// Failure reported by a driver collaborator.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DriverError {
    /// The measurement could not be taken.
    #[error("measurement failed: {0}")]
    Measurement(String),

    /// The sensor did not answer in time.
    #[error("sensor timed out after {0:?}")]
    Timeout(Duration),

    /// The driver has not been set up or was misconfigured.
    #[error("driver not ready: {0}")]
    NotReady(String),
}

/// Error types for input module operations.
#[derive(Debug, Clone, Error)]
pub enum ModuleError {
    /// The driver collaborator failed during a read.
    #[error("{module}: driver failure: {source}")]
    Driver {
        /// Module name
        module: &'static str,
        /// Driver error
        source: DriverError,
    },

    /// The reading could not be packed.
    #[error("{module}: encode failed: {source}")]
    Encode {
        /// Module name
        module: &'static str,
        /// Codec error
        source: CodecError,
    },

    /// The buffer could not be unpacked.
    #[error("{module}: decode failed: {source}")]
    Decode {
        /// Module name
        module: &'static str,
        /// Codec error
        source: CodecError,
    },

    /// A measured value lies outside what its field can carry.
    #[error("{module}: {field} value {value} is outside the encodable range")]
    OutOfRange {
        /// Module name
        module: &'static str,
        /// Field name
        field: &'static str,
        /// Offending value, rendered
        value: String,
    },

    /// Module settings could not be resolved.
    #[error("module configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl ModuleError {
    /// Name of the module that failed, when known.
    pub fn module(&self) -> Option<&'static str> {
        match self {
            Self::Driver { module, .. }
            | Self::Encode { module, .. }
            | Self::Decode { module, .. }
            | Self::OutOfRange { module, .. } => Some(*module),
            Self::Config(_) => None,
        }
    }
}
