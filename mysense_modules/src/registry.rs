//! Registry of live input modules.
//!
//! Modules are kept ordered by id. The registry is the join point between a
//! stored reading and the module able to decode it: a reading produced by
//! module `id` is only ever decoded by the module registered under `id`.

use crate::error::RegistryError;
use mysense_common::module::codec::Reading;
use mysense_common::module::descriptor::{DecodedReading, ModuleId};
use mysense_common::module::error::ModuleError;
use mysense_common::module::input::InputModule;
use std::collections::BTreeMap;
use tracing::debug;

/// Live modules keyed by identity.
#[derive(Default)]
pub struct ModuleRegistry {
    modules: BTreeMap<ModuleId, Box<dyn InputModule>>,
}

impl ModuleRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a module.
    ///
    /// # Errors
    /// `RegistryError::DuplicateId` if another module already holds the id.
    pub fn register(&mut self, module: Box<dyn InputModule>) -> Result<(), RegistryError> {
        let id = module.id();
        if let Some(existing) = self.modules.get(&id) {
            return Err(RegistryError::DuplicateId {
                id,
                existing: existing.descriptor().name,
            });
        }
        debug!("Registered module {} '{}'", id, module.descriptor().name);
        self.modules.insert(id, module);
        Ok(())
    }

    /// Module registered under `id`.
    pub fn get(&self, id: ModuleId) -> Option<&dyn InputModule> {
        self.modules.get(&id).map(|m| m.as_ref())
    }

    /// Mutable access to the module registered under `id`.
    pub fn get_mut(&mut self, id: ModuleId) -> Option<&mut (dyn InputModule + 'static)> {
        self.modules.get_mut(&id).map(|m| m.as_mut())
    }

    /// Registered ids, ascending.
    pub fn ids(&self) -> Vec<ModuleId> {
        self.modules.keys().copied().collect()
    }

    /// Number of registered modules.
    pub fn len(&self) -> usize {
        self.modules.len()
    }

    /// Whether no module is registered.
    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    /// Read the module registered under `id`.
    pub fn read(&mut self, id: ModuleId) -> Result<Reading, RegistryError> {
        let module = self
            .modules
            .get_mut(&id)
            .ok_or(RegistryError::UnknownModule(id))?;
        Ok(module.read()?)
    }

    /// Decode `bytes` with the module registered under `id`.
    pub fn decode(&self, id: ModuleId, bytes: &[u8]) -> Result<DecodedReading, RegistryError> {
        let module = self
            .modules
            .get(&id)
            .ok_or(RegistryError::UnknownModule(id))?;
        Ok(module.decode(bytes)?)
    }

    /// Read every module once, in id order.
    ///
    /// A failing module does not stop the poll; its error is returned in
    /// its slot, unlogged and not retried.
    pub fn poll_all(&mut self) -> Vec<(ModuleId, Result<Reading, ModuleError>)> {
        self.modules
            .iter_mut()
            .map(|(id, module)| (*id, module.read()))
            .collect()
    }

    /// Run every module's self-test, in id order.
    pub fn self_test_all(&mut self) -> Vec<(ModuleId, Result<(), ModuleError>)> {
        self.modules
            .iter_mut()
            .map(|(id, module)| (*id, module.self_test()))
            .collect()
    }
}
