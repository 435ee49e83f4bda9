//! Error types for the log dispatcher and its collaborators

use thiserror::Error;

/// Errors raised by the dispatcher lifecycle
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LogError {
    /// A dispatcher was already installed or lazily created
    #[error("log dispatcher already initialized")]
    AlreadyInitialized,
}

/// Errors raised by key/value persistence
#[derive(Error, Debug)]
pub enum StoreError {
    /// Key is empty or would escape the store
    #[error("Invalid store key: {key}")]
    InvalidKey {
        /// Rejected key
        key: String,
    },

    /// IO error
    #[error("IO error: {source}")]
    Io {
        /// Source IO error
        #[from]
        source: std::io::Error,
    },
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;
