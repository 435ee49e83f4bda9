//! Built-in input modules.
//!
//! | Id | Module | Section | Reading |
//! |----|--------|---------|---------|
//! | 0 | [`DateTimeModule`] | `input_datetime` | 6 bytes, years since 1970 then month, day, hour, minute, second |
//! | 1 | [`Hcsr04Module`] | `input_hcsr04` | 2 bytes, little-endian `distance_cm` |

pub mod datetime;
pub mod hcsr04;

pub use datetime::{DATETIME, DateTimeModule};
pub use hcsr04::{HCSR04, Hcsr04Module};
