//! MySense Common Library
//!
//! This crate provides the shared vocabulary of the MySense workspace: the
//! severity model used by logging, the input module contract, the fixed-width
//! field codec and the configuration loading utilities.
//!
//! # Module Structure
//!
//! - [`consts`] - Workspace-wide limits and defaults
//! - [`config`] - Configuration loading traits and types
//! - [`log`] - Severity model shared by the dispatcher and its sinks
//! - [`module`] - Input module contract, descriptors, codec and schema
//! - [`time`] - Six-field local time and the time source capability
//! - [`prelude`] - Common re-exports for convenience
//!
//! # Usage
//!
//! ```rust
//! use mysense_common::prelude::*;
//!
//! assert!(Severity::Error.is_at_least(Severity::Info));
//! ```

pub mod config;
pub mod consts;
pub mod log;
pub mod module;
pub mod prelude;
pub mod time;
