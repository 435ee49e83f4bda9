//! Date/time input module.

use crate::drivers::Clock;
use mysense_common::consts::EPOCH_YEAR;
use mysense_common::module::codec::{FieldSpec, FieldValue, Reading, ReadingLayout};
use mysense_common::module::descriptor::{
    DecodedReading, DecodedValue, ModuleDescriptor, ModuleId,
};
use mysense_common::module::error::ModuleError;
use mysense_common::module::input::InputModule;
use mysense_common::module::schema::{ConfigDefinition, ModuleSettings};
use mysense_common::time::SystemClock;

const LAYOUT: ReadingLayout = ReadingLayout::new(
    6,
    &[
        FieldSpec::unsigned("year", 0, 1),
        FieldSpec::unsigned("month", 1, 1),
        FieldSpec::unsigned("day", 2, 1),
        FieldSpec::unsigned("hour", 3, 1),
        FieldSpec::unsigned("minute", 4, 1),
        FieldSpec::unsigned("second", 5, 1),
    ],
);

/// Descriptor of the DateTime module.
pub static DATETIME: ModuleDescriptor = ModuleDescriptor::new(
    ModuleId(0),
    "DateTime",
    LAYOUT,
    ConfigDefinition::new(
        "input_datetime",
        "Adds the current date and time to every measurement.",
        &[],
    ),
);

/// Reports the clock's local time.
///
/// The year is stored as an offset from 1970 in one byte, so only years
/// 1970 through 2225 can be encoded.
pub struct DateTimeModule<C = SystemClock> {
    clock: C,
}

impl<C: Clock> DateTimeModule<C> {
    /// Wrap a clock.
    pub fn new(clock: C) -> Self {
        Self { clock }
    }

    /// The wrapped clock.
    pub fn clock(&self) -> &C {
        &self.clock
    }
}

impl<C: Clock> InputModule for DateTimeModule<C> {
    fn descriptor(&self) -> &'static ModuleDescriptor {
        &DATETIME
    }

    fn read(&mut self) -> Result<Reading, ModuleError> {
        let now = self.clock.read().map_err(|source| ModuleError::Driver {
            module: DATETIME.name,
            source,
        })?;
        let offset = u64::try_from(now.year - EPOCH_YEAR).map_err(|_| ModuleError::OutOfRange {
            module: DATETIME.name,
            field: "year",
            value: now.year.to_string(),
        })?;
        DATETIME.encode(&[
            FieldValue::Unsigned(offset),
            FieldValue::Unsigned(now.month.into()),
            FieldValue::Unsigned(now.day.into()),
            FieldValue::Unsigned(now.hour.into()),
            FieldValue::Unsigned(now.minute.into()),
            FieldValue::Unsigned(now.second.into()),
        ])
    }

    fn decode(&self, bytes: &[u8]) -> Result<DecodedReading, ModuleError> {
        let mut decoded = DATETIME.decode(bytes)?;
        if let Some(DecodedValue::Unsigned(offset)) = decoded.get("year") {
            decoded.set("year", DecodedValue::Unsigned(offset + EPOCH_YEAR as u64));
        }
        Ok(decoded)
    }
}

/// Catalog factory: DateTime module on the system clock.
pub fn create_module(_settings: &ModuleSettings) -> Result<Box<dyn InputModule>, ModuleError> {
    Ok(Box::new(DateTimeModule::new(SystemClock)))
}
