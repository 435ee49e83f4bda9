//! Module descriptors and decoded readings.
//!
//! A [`ModuleDescriptor`] is the immutable, `'static` metadata of a module
//! type: its numeric identity, the byte layout of its reading and its
//! configuration schema. The identity is the join key between a stored
//! reading and the module able to decode it.

use crate::module::codec::{FieldValue, Reading, ReadingLayout};
use crate::module::error::ModuleError;
use crate::module::schema::ConfigDefinition;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Numeric module identity, unique within a running system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModuleId(pub u16);

impl fmt::Display for ModuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Static metadata of one module type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModuleDescriptor {
    /// Unique identity.
    pub id: ModuleId,
    /// Display name used when decoding.
    pub name: &'static str,
    /// Byte layout of a reading.
    pub layout: ReadingLayout,
    /// Configuration schema.
    pub config: ConfigDefinition,
}

impl ModuleDescriptor {
    /// Declare a descriptor.
    ///
    /// # Panics
    /// Panics if the layout fails [`ReadingLayout::validate`]. Descriptors
    /// are declared as `static` or `const` items, so a bad layout is a
    /// compile error.
    pub const fn new(
        id: ModuleId,
        name: &'static str,
        layout: ReadingLayout,
        config: ConfigDefinition,
    ) -> Self {
        if layout.validate().is_err() {
            panic!("invalid reading layout in module descriptor");
        }
        Self {
            id,
            name,
            layout,
            config,
        }
    }

    /// Width in bytes of a reading.
    pub const fn width(&self) -> usize {
        self.layout.width
    }

    /// Pack field values into a reading, tagging failures with this module.
    pub fn encode(&self, values: &[FieldValue]) -> Result<Reading, ModuleError> {
        self.layout.encode(values).map_err(|source| ModuleError::Encode {
            module: self.name,
            source,
        })
    }

    /// Unpack a reading into labeled values, tagging failures with this module.
    pub fn decode(&self, bytes: &[u8]) -> Result<DecodedReading, ModuleError> {
        let values = self.layout.decode(bytes).map_err(|source| ModuleError::Decode {
            module: self.name,
            source,
        })?;
        Ok(DecodedReading::from_fields(self, &values))
    }
}

/// Decoded value of one field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum DecodedValue {
    /// Unsigned integer.
    Unsigned(u64),
    /// Signed integer.
    Signed(i64),
    /// Scaled or fractional quantity.
    Float(f64),
}

impl From<FieldValue> for DecodedValue {
    fn from(value: FieldValue) -> Self {
        match value {
            FieldValue::Unsigned(v) => Self::Unsigned(v),
            FieldValue::Signed(v) => Self::Signed(v),
        }
    }
}

impl fmt::Display for DecodedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unsigned(v) => write!(f, "{v}"),
            Self::Signed(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
        }
    }
}

/// One labeled field of a decoded reading.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DecodedField {
    /// Field label.
    pub name: &'static str,
    /// Decoded value.
    pub value: DecodedValue,
}

/// A reading turned back into labeled values.
///
/// `Display` renders the nested text block:
///
/// ```text
///     "HCSR04":
///     {
///         "distance_cm": 42
///     }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecodedReading {
    /// Module display name.
    pub module: &'static str,
    /// Fields in layout order.
    pub fields: Vec<DecodedField>,
}

impl DecodedReading {
    /// Label raw field values with the descriptor's field names.
    pub fn from_fields(descriptor: &ModuleDescriptor, values: &[FieldValue]) -> Self {
        Self {
            module: descriptor.name,
            fields: descriptor
                .layout
                .fields
                .iter()
                .zip(values)
                .map(|(spec, value)| DecodedField {
                    name: spec.name,
                    value: (*value).into(),
                })
                .collect(),
        }
    }

    /// Value of the field called `name`.
    pub fn get(&self, name: &str) -> Option<DecodedValue> {
        self.fields.iter().find(|f| f.name == name).map(|f| f.value)
    }

    /// Replace the value of the field called `name`.
    pub fn set(&mut self, name: &str, value: DecodedValue) {
        if let Some(field) = self.fields.iter_mut().find(|f| f.name == name) {
            field.value = value;
        }
    }
}

impl fmt::Display for DecodedReading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "\t\"{}\":", self.module)?;
        writeln!(f, "\t{{")?;
        let last = self.fields.len().saturating_sub(1);
        for (i, field) in self.fields.iter().enumerate() {
            let sep = if i == last { "" } else { "," };
            writeln!(f, "\t\t\"{}\": {}{}", field.name, field.value, sep)?;
        }
        write!(f, "\t}}")
    }
}
