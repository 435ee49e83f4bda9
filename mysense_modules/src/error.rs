//! Error types for module assembly and the registry.

use mysense_common::config::ConfigError;
use mysense_common::module::descriptor::ModuleId;
use mysense_common::module::error::ModuleError;
use thiserror::Error;

/// Errors raised while building or querying the module registry.
#[derive(Error, Debug)]
pub enum RegistryError {
    /// Two modules claim the same identity.
    #[error("Module id {id} is already registered by '{existing}'")]
    DuplicateId {
        /// Contested identity.
        id: ModuleId,
        /// Name of the module already holding it.
        existing: &'static str,
    },

    /// No module with this identity is registered.
    #[error("No module registered with id {0}")]
    UnknownModule(ModuleId),

    /// The configuration names a section no catalog entry provides.
    #[error("Unknown module section '{0}'")]
    UnknownSection(String),

    /// A configuration section is registered twice in the catalog.
    #[error("Module section '{0}' is already in the catalog")]
    DuplicateSection(&'static str),

    /// Settings could not be resolved.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A module failed to construct, read or decode.
    #[error(transparent)]
    Module(#[from] ModuleError),
}
