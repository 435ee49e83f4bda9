//! Six-field local time and the time source capability.
//!
//! The console sink reads a [`TimeSource`] to stamp lines and the date/time
//! input module reads one to produce its reading. [`SystemClock`] is the host
//! implementation; [`FixedClock`] always reports the same instant.

use chrono::{Datelike, Local, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A local wall-clock time broken into six fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct LocalTime {
    /// Full year, e.g. 2024.
    pub year: i32,
    /// Month, 1-12.
    pub month: u8,
    /// Day of month, 1-31.
    pub day: u8,
    /// Hour, 0-23.
    pub hour: u8,
    /// Minute, 0-59.
    pub minute: u8,
    /// Second, 0-59.
    pub second: u8,
}

impl LocalTime {
    /// Build a time from its six fields.
    pub const fn new(year: i32, month: u8, day: u8, hour: u8, minute: u8, second: u8) -> Self {
        Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
        }
    }

    /// Render as `YY/MM/DD-HH:MM:SS`, each field zero-padded to two digits.
    pub fn stamp(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for LocalTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}/{:02}/{:02}-{:02}:{:02}:{:02}",
            self.year.rem_euclid(100),
            self.month,
            self.day,
            self.hour,
            self.minute,
            self.second
        )
    }
}

/// Source of local wall-clock time.
pub trait TimeSource: Send + Sync {
    /// Read the current local time.
    fn now(&self) -> LocalTime;
}

/// Host clock backed by the operating system's local time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl TimeSource for SystemClock {
    fn now(&self) -> LocalTime {
        let now = Local::now();
        LocalTime {
            year: now.year(),
            month: now.month() as u8,
            day: now.day() as u8,
            hour: now.hour() as u8,
            minute: now.minute() as u8,
            second: now.second() as u8,
        }
    }
}

/// Clock frozen at a single instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub LocalTime);

impl TimeSource for FixedClock {
    fn now(&self) -> LocalTime {
        self.0
    }
}
