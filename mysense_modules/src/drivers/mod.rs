//! Driver collaborators wrapped by the built-in modules.
//!
//! Modules never talk to hardware directly. They hold a driver behind one of
//! the narrow traits below:
//!
//! - [`Clock`] - six-field local time, consumed by the DateTime module
//! - [`RangeSensor`] - distance in centimetres, consumed by the HC-SR04 module
//!
//! [`simulation`] provides software stand-ins for development and testing.

pub mod simulation;

use mysense_common::module::error::DriverError;
use mysense_common::time::{LocalTime, TimeSource};

pub use simulation::{RangeSensorConfig, SimulatedRangeSensor};

/// Real-time clock.
pub trait Clock: Send {
    /// Current local time.
    fn read(&mut self) -> Result<LocalTime, DriverError>;
}

impl<T: TimeSource> Clock for T {
    fn read(&mut self) -> Result<LocalTime, DriverError> {
        Ok(self.now())
    }
}

/// Distance sensor.
pub trait RangeSensor: Send {
    /// Take one measurement, in centimetres.
    ///
    /// Implementations may average several samples internally.
    fn measure(&mut self) -> Result<f64, DriverError>;
}
