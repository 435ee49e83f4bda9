//! # MySense Input Modules
//!
//! Module registry, built-in sensor modules and the driver collaborators
//! they wrap. The `mysense` binary polls the configured modules and prints
//! decoded readings.
//!
//! # Module Structure
//!
//! - [`catalog`] - Section name to module factory mapping
//! - [`registry`] - Live modules ordered by id
//! - [`modules`] - Built-in DateTime and HC-SR04 modules
//! - [`drivers`] - Clock and range sensor collaborators
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                        mysense_modules                           │
//! │  ┌─────────────┐    ┌──────────────┐    ┌─────────────────────┐  │
//! │  │  AppConfig  │───►│ModuleCatalog │───►│  ModuleRegistry     │  │
//! │  │  (TOML)     │    │ (factories)  │    │  (ordered by id)    │  │
//! │  └─────────────┘    └──────────────┘    └─────────┬───────────┘  │
//! │                                                   │              │
//! │                                                   ▼              │
//! │                                          ┌────────────────┐      │
//! │                                          │  InputModule   │      │
//! │                                          │  trait objects │      │
//! │                                          └───────┬────────┘      │
//! │                                                  ▼               │
//! │                                          Clock / RangeSensor     │
//! └──────────────────────────────────────────────────────────────────┘
//! ```

#![deny(missing_docs)]

pub mod catalog;
pub mod drivers;
pub mod error;
pub mod modules;
pub mod registry;

pub use crate::catalog::{ModuleCatalog, ModuleFactory};
pub use crate::error::RegistryError;
pub use crate::registry::ModuleRegistry;
