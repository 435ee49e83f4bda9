//! Simulated range sensor.
//!
//! Replays a scripted sequence of measurements, then settles on a nominal
//! distance. Scripted failures let tests exercise the error path without
//! hardware.

use super::RangeSensor;
use mysense_common::config::ConfigError;
use mysense_common::module::error::DriverError;
use mysense_common::module::schema::ModuleSettings;
use std::collections::VecDeque;
use tracing::trace;

/// Distance reported once the script is exhausted.
pub const NOMINAL_DISTANCE_CM: f64 = 100.0;

/// Wiring and sampling parameters of a range sensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeSensorConfig {
    /// Echo pin number.
    pub pin_echo: u32,
    /// Trigger pin number.
    pub pin_trigger: u32,
    /// Samples averaged per measurement.
    pub samples: u32,
}

impl RangeSensorConfig {
    /// Extract the parameters from resolved module settings.
    ///
    /// # Errors
    /// `ConfigError::ValidationError` if a value does not fit, the pins
    /// coincide or `samples` is zero.
    pub fn from_settings(settings: &ModuleSettings) -> Result<Self, ConfigError> {
        let config = Self {
            pin_echo: narrow(settings, "pin_echo")?,
            pin_trigger: narrow(settings, "pin_trigger")?,
            samples: narrow(settings, "samples")?,
        };
        config.validate(settings.section())?;
        Ok(config)
    }

    fn validate(&self, section: &str) -> Result<(), ConfigError> {
        if self.pin_echo == self.pin_trigger {
            return Err(ConfigError::ValidationError(format!(
                "[{section}] pin_echo and pin_trigger must differ (both {})",
                self.pin_echo
            )));
        }
        if self.samples == 0 {
            return Err(ConfigError::ValidationError(format!(
                "[{section}] samples must be at least 1"
            )));
        }
        Ok(())
    }
}

impl Default for RangeSensorConfig {
    fn default() -> Self {
        Self {
            pin_echo: 20,
            pin_trigger: 21,
            samples: 20,
        }
    }
}

fn narrow(settings: &ModuleSettings, key: &str) -> Result<u32, ConfigError> {
    let value = settings.get_uint(key)?;
    u32::try_from(value).map_err(|_| {
        ConfigError::ValidationError(format!(
            "[{}] {key} = {value} is out of range",
            settings.section()
        ))
    })
}

/// Software range sensor.
#[derive(Debug, Clone)]
pub struct SimulatedRangeSensor {
    config: RangeSensorConfig,
    script: VecDeque<Result<f64, DriverError>>,
    measurements: u64,
}

impl SimulatedRangeSensor {
    /// Sensor that always reports [`NOMINAL_DISTANCE_CM`].
    pub fn new(config: RangeSensorConfig) -> Self {
        Self {
            config,
            script: VecDeque::new(),
            measurements: 0,
        }
    }

    /// Builder: replay `distances` before settling on the nominal value.
    pub fn with_script<I>(mut self, distances: I) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        self.script.extend(distances.into_iter().map(Ok));
        self
    }

    /// Queue a failure for the next measurement.
    pub fn fail_next(&mut self, error: DriverError) {
        self.script.push_front(Err(error));
    }

    /// Wiring and sampling parameters.
    pub fn config(&self) -> &RangeSensorConfig {
        &self.config
    }

    /// Number of measurements taken so far, failed ones included.
    pub fn measurements(&self) -> u64 {
        self.measurements
    }
}

impl RangeSensor for SimulatedRangeSensor {
    fn measure(&mut self) -> Result<f64, DriverError> {
        self.measurements += 1;
        let result = self.script.pop_front().unwrap_or(Ok(NOMINAL_DISTANCE_CM));
        trace!(
            "simulated range sensor (echo {}, trigger {}, {} samples): {:?}",
            self.config.pin_echo, self.config.pin_trigger, self.config.samples, result
        );
        result
    }
}
