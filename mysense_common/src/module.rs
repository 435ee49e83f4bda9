//! Input module contract.
//!
//! This module contains:
//! - `input`: The `InputModule` capability every sensor module implements.
//! - `descriptor`: Static per-module-type metadata and decoded readings.
//! - `codec`: Schema-driven fixed-width field encoding.
//! - `schema`: Configuration schema declared by modules and its resolution.
//! - `error`: Module, driver and codec error types.

pub mod codec;
pub mod descriptor;
pub mod error;
pub mod input;
pub mod schema;
