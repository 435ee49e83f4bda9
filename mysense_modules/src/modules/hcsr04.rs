//! HC-SR04 ultrasonic distance module.

use crate::drivers::{RangeSensor, RangeSensorConfig, SimulatedRangeSensor};
use mysense_common::module::codec::{FieldSpec, FieldValue, Reading, ReadingLayout};
use mysense_common::module::descriptor::{ModuleDescriptor, ModuleId};
use mysense_common::module::error::ModuleError;
use mysense_common::module::input::InputModule;
use mysense_common::module::schema::{ConfigDefinition, ConfigEntry, ModuleSettings, ValueType};
use tracing::debug;

const LAYOUT: ReadingLayout = ReadingLayout::new(2, &[FieldSpec::unsigned("distance_cm", 0, 2)]);

const ENTRIES: &[ConfigEntry] = &[
    ConfigEntry::new("pin_echo", "20", "Defines the echo pin.", ValueType::Uint),
    ConfigEntry::new("pin_trigger", "21", "Defines the trigger pin.", ValueType::Uint),
    ConfigEntry::new(
        "samples",
        "20",
        "Defines how many samples should be taken.",
        ValueType::Uint,
    ),
];

/// Descriptor of the HC-SR04 module.
pub static HCSR04: ModuleDescriptor = ModuleDescriptor::new(
    ModuleId(1),
    "HCSR04",
    LAYOUT,
    ConfigDefinition::new(
        "input_hcsr04",
        "Adds support for the HCSR04 distance sensor.",
        ENTRIES,
    ),
);

/// Reports the distance measured by a range sensor, in whole centimetres.
pub struct Hcsr04Module<S = SimulatedRangeSensor> {
    sensor: S,
}

impl<S: RangeSensor> Hcsr04Module<S> {
    /// Wrap a sensor.
    pub fn new(sensor: S) -> Self {
        Self { sensor }
    }

    /// The wrapped sensor.
    pub fn sensor(&self) -> &S {
        &self.sensor
    }
}

impl<S: RangeSensor> InputModule for Hcsr04Module<S> {
    fn descriptor(&self) -> &'static ModuleDescriptor {
        &HCSR04
    }

    fn read(&mut self) -> Result<Reading, ModuleError> {
        let cm = self.sensor.measure().map_err(|source| ModuleError::Driver {
            module: HCSR04.name,
            source,
        })?;
        let rounded = cm.round();
        if !rounded.is_finite() || rounded < 0.0 || rounded > f64::from(u16::MAX) {
            return Err(ModuleError::OutOfRange {
                module: HCSR04.name,
                field: "distance_cm",
                value: cm.to_string(),
            });
        }
        HCSR04.encode(&[FieldValue::Unsigned(rounded as u64)])
    }
}

/// Catalog factory: HC-SR04 module on a simulated sensor wired per `settings`.
pub fn create_module(settings: &ModuleSettings) -> Result<Box<dyn InputModule>, ModuleError> {
    let config = RangeSensorConfig::from_settings(settings)?;
    debug!(
        "HCSR04 on echo pin {}, trigger pin {}, {} samples",
        config.pin_echo, config.pin_trigger, config.samples
    );
    Ok(Box::new(Hcsr04Module::new(SimulatedRangeSensor::new(config))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use mysense_common::module::descriptor::DecodedValue;
    use mysense_common::module::error::DriverError;
    use mysense_common::module::schema::Defaults;

    fn module(distances: &[f64]) -> Hcsr04Module {
        Hcsr04Module::new(
            SimulatedRangeSensor::new(RangeSensorConfig::default())
                .with_script(distances.iter().copied()),
        )
    }

    #[test]
    fn test_read_is_little_endian() {
        let mut module = module(&[42.0, 300.0]);
        assert_eq!(module.read().unwrap().as_slice(), &[0x2A, 0x00]);
        assert_eq!(module.read().unwrap().as_slice(), &[0x2C, 0x01]);
    }

    #[test]
    fn test_measurement_is_rounded() {
        let mut module = module(&[12.4, 12.5, 0.2]);
        assert_eq!(module.read().unwrap().as_slice(), &[12, 0]);
        assert_eq!(module.read().unwrap().as_slice(), &[13, 0]);
        assert_eq!(module.read().unwrap().as_slice(), &[0, 0]);
    }

    #[test]
    fn test_limits() {
        let mut module = module(&[65535.0, 65536.0, -3.0, f64::NAN]);
        assert_eq!(module.read().unwrap().as_slice(), &[0xFF, 0xFF]);
        for _ in 0..3 {
            assert!(matches!(
                module.read(),
                Err(ModuleError::OutOfRange {
                    field: "distance_cm",
                    ..
                })
            ));
        }
    }

    #[test]
    fn test_driver_failure_is_not_retried() {
        let mut module = module(&[]);
        let mut sensor = SimulatedRangeSensor::new(RangeSensorConfig::default());
        sensor.fail_next(DriverError::Timeout(std::time::Duration::from_millis(38)));
        module.sensor = sensor;

        assert!(matches!(
            module.read(),
            Err(ModuleError::Driver { module: "HCSR04", .. })
        ));
        assert_eq!(module.sensor().measurements(), 1);
    }

    #[test]
    fn test_decode() {
        let module = module(&[]);
        let decoded = module.decode(&[0x2A, 0x00]).unwrap();
        assert_eq!(decoded.get("distance_cm"), Some(DecodedValue::Unsigned(42)));
        assert_eq!(
            decoded.to_string(),
            "\t\"HCSR04\":\n\t{\n\t\t\"distance_cm\": 42\n\t}"
        );
        assert!(matches!(module.decode(&[0x2A]), Err(ModuleError::Decode { .. })));
    }

    #[test]
    fn test_schema_is_stable() {
        let a = module(&[]);
        let b = module(&[1.0]);
        assert_eq!(a.config_schema(), a.config_schema());
        assert!(std::ptr::eq(a.config_schema(), b.config_schema()));

        let schema = a.config_schema();
        assert_eq!(schema.section, "input_hcsr04");
        assert_eq!(schema.description, "Adds support for the HCSR04 distance sensor.");
        let keys: Vec<_> = schema.entries.iter().map(|e| (e.key, e.default)).collect();
        assert_eq!(
            keys,
            vec![("pin_echo", "20"), ("pin_trigger", "21"), ("samples", "20")]
        );
        assert!(schema.entries.iter().all(|e| e.value_type == ValueType::Uint));
    }

    #[test]
    fn test_factory_uses_settings() {
        let settings = HCSR04.config.resolve(&Defaults).unwrap();
        let mut module = create_module(&settings).unwrap();
        assert_eq!(module.id(), ModuleId(1));
        module.self_test().unwrap();
    }
}
