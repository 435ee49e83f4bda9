//! Module catalog.
//!
//! Maps configuration section names to module factories. The catalog is
//! built at startup and turns the `[system] modules` list into a populated
//! [`ModuleRegistry`]. No global state.

use crate::error::RegistryError;
use crate::modules::{DATETIME, HCSR04, datetime, hcsr04};
use crate::registry::ModuleRegistry;
use mysense_common::module::error::ModuleError;
use mysense_common::module::input::InputModule;
use mysense_common::module::schema::{
    ConfigDefinition, ConfigSource, ConfigValue, ModuleSettings, ValueType,
};
use std::fmt::Write as _;
use tracing::{debug, info};

/// Factory function type for creating module instances from resolved
/// settings.
pub type ModuleFactory = fn(&ModuleSettings) -> Result<Box<dyn InputModule>, ModuleError>;

#[derive(Clone, Copy)]
struct CatalogEntry {
    definition: &'static ConfigDefinition,
    factory: ModuleFactory,
}

/// Available module types, keyed by configuration section.
#[derive(Clone, Default)]
pub struct ModuleCatalog {
    entries: Vec<CatalogEntry>,
}

impl ModuleCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog with every built-in module.
    pub fn builtin() -> Self {
        Self {
            entries: vec![
                CatalogEntry {
                    definition: &DATETIME.config,
                    factory: datetime::create_module,
                },
                CatalogEntry {
                    definition: &HCSR04.config,
                    factory: hcsr04::create_module,
                },
            ],
        }
    }

    /// Register a module type under its schema's section.
    ///
    /// # Errors
    /// `RegistryError::DuplicateSection` if the section is already present.
    pub fn register(
        &mut self,
        definition: &'static ConfigDefinition,
        factory: ModuleFactory,
    ) -> Result<(), RegistryError> {
        if self.definition(definition.section).is_some() {
            return Err(RegistryError::DuplicateSection(definition.section));
        }
        self.entries.push(CatalogEntry {
            definition,
            factory,
        });
        Ok(())
    }

    /// Schema registered under `section`.
    pub fn definition(&self, section: &str) -> Option<&'static ConfigDefinition> {
        self.entries
            .iter()
            .find(|e| e.definition.section == section)
            .map(|e| e.definition)
    }

    /// Every registered section, in registration order.
    pub fn sections(&self) -> Vec<&'static str> {
        self.entries.iter().map(|e| e.definition.section).collect()
    }

    /// Construct one module from `source`.
    ///
    /// # Errors
    /// `UnknownSection` if nothing is registered under `section`; `Config`
    /// if the settings do not resolve; `Module` if construction fails.
    pub fn create(
        &self,
        section: &str,
        source: &dyn ConfigSource,
    ) -> Result<Box<dyn InputModule>, RegistryError> {
        let entry = self
            .entries
            .iter()
            .find(|e| e.definition.section == section)
            .ok_or_else(|| RegistryError::UnknownSection(section.to_string()))?;
        let settings = entry.definition.resolve(source)?;
        debug!("Creating module for [{}]", section);
        Ok((entry.factory)(&settings)?)
    }

    /// Construct every module named in `sections` into a registry.
    ///
    /// # Errors
    /// The first construction or registration failure.
    pub fn build<S: AsRef<str>>(
        &self,
        sections: &[S],
        source: &dyn ConfigSource,
    ) -> Result<ModuleRegistry, RegistryError> {
        let mut registry = ModuleRegistry::new();
        for section in sections {
            let module = self.create(section.as_ref(), source)?;
            registry.register(module)?;
        }
        info!("Built {} input module(s)", registry.len());
        Ok(registry)
    }

    /// Commented TOML template with every registered section at its defaults.
    pub fn template(&self) -> String {
        let mut out = String::new();
        for entry in &self.entries {
            let def = entry.definition;
            let _ = writeln!(out, "# {}", def.description);
            let _ = writeln!(out, "[{}]", def.section);
            for item in def.entries {
                let _ = writeln!(out, "# {} ({})", item.description, item.value_type);
                let _ = writeln!(
                    out,
                    "{} = {}",
                    item.key,
                    toml_literal(item.default, item.value_type)
                );
            }
            out.push('\n');
        }
        out
    }
}

fn toml_literal(default: &str, ty: ValueType) -> String {
    match ConfigValue::parse_literal(default, ty) {
        Some(ConfigValue::Str(s)) => toml::Value::String(s).to_string(),
        Some(ConfigValue::Float(v)) => toml::Value::Float(v).to_string(),
        Some(other) => other.to_string(),
        None => toml::Value::String(default.to_string()).to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mysense_common::module::descriptor::ModuleId;
    use mysense_common::module::schema::Defaults;

    #[test]
    fn test_builtin_sections() {
        let catalog = ModuleCatalog::builtin();
        assert_eq!(catalog.sections(), vec!["input_datetime", "input_hcsr04"]);
        assert!(catalog.definition("input_hcsr04").is_some());
        assert!(catalog.definition("input_missing").is_none());
    }

    #[test]
    fn test_duplicate_section_rejected() {
        let mut catalog = ModuleCatalog::builtin();
        let result = catalog.register(&HCSR04.config, hcsr04::create_module);
        assert!(matches!(
            result,
            Err(RegistryError::DuplicateSection("input_hcsr04"))
        ));
    }

    #[test]
    fn test_build_orders_by_id() {
        let catalog = ModuleCatalog::builtin();
        let registry = catalog
            .build(&["input_hcsr04", "input_datetime"], &Defaults)
            .unwrap();
        assert_eq!(registry.ids(), vec![ModuleId(0), ModuleId(1)]);
    }

    #[test]
    fn test_build_unknown_section() {
        let catalog = ModuleCatalog::builtin();
        let result = catalog.build(&["input_bme280"], &Defaults);
        assert!(matches!(result, Err(RegistryError::UnknownSection(s)) if s == "input_bme280"));
    }

    #[test]
    fn test_build_duplicate_module() {
        let catalog = ModuleCatalog::builtin();
        let result = catalog.build(&["input_datetime", "input_datetime"], &Defaults);
        assert!(matches!(
            result,
            Err(RegistryError::DuplicateId {
                id: ModuleId(0),
                existing: "DateTime"
            })
        ));
    }

    #[test]
    fn test_template_lists_defaults() {
        let template = ModuleCatalog::builtin().template();
        assert!(template.contains("# Adds support for the HCSR04 distance sensor.\n[input_hcsr04]\n"));
        assert!(template.contains("# Defines the echo pin. (uint)\npin_echo = 20\n"));
        assert!(template.contains("[input_datetime]\n"));

        let parsed: toml::Table = toml::from_str(&template).unwrap();
        let samples = parsed
            .get("input_hcsr04")
            .and_then(|section| section.get("samples"))
            .and_then(toml::Value::as_integer);
        assert_eq!(samples, Some(20));
    }
}
