//! # MySense Log Dispatcher
//!
//! A process-wide log dispatcher that fans every message out to an ordered
//! set of sinks. Each sink applies its own severity threshold; the dispatcher
//! itself does not filter.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐     ┌──────────────────────────────────────────────┐
//! │   callers    │────►│ Logger (singleton, Mutex-guarded)            │
//! └──────────────┘     │   level / timestamps ──► sinks[0] (primary)  │
//!                      └──────┬──────────────┬──────────────┬─────────┘
//!                             ▼              ▼              ▼
//!                      ┌────────────┐ ┌──────────────┐ ┌─────────────┐
//!                      │ConsoleSink │ │PersistentSink│ │ TracingSink │
//!                      │ OutputStream│ │KeyValueStore │ │  tracing    │
//!                      │ TimeSource │ └──────────────┘ └─────────────┘
//!                      └────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use mysense_log::{ConsoleSink, Logger, MemoryOutput};
//! use mysense_common::log::Severity;
//! use mysense_common::time::SystemClock;
//!
//! let output = MemoryOutput::new();
//! let logger = Logger::with_sinks(vec![Box::new(ConsoleSink::new(output.clone(), SystemClock))]);
//! logger.set_level(Severity::Debug);
//! logger.debug("sensor warmed up");
//! assert_eq!(output.lines(), vec!["Debug:   sensor warmed up".to_string()]);
//! ```
//!
//! Reconfiguring the dispatcher's level or timestamp flag also reconfigures
//! the first sink, and only the first sink.

pub mod console;
pub mod dispatcher;
pub mod error;
pub mod output;
pub mod persistent;
pub mod sink;
pub mod store;
pub mod tracing_sink;

pub use console::ConsoleSink;
pub use dispatcher::Logger;
pub use error::{LogError, StoreError};
pub use output::{MemoryOutput, OutputStream, StdoutStream};
pub use persistent::PersistentSink;
pub use sink::{LogMessage, LogSink, render_line};
pub use store::{FileStore, KeyValueStore, MemoryStore};
pub use tracing_sink::TracingSink;
