//! The process-wide log dispatcher.
//!
//! [`Logger`] owns an ordered, append-only set of sinks and fans every
//! message out to all of them in insertion order. It never filters; each
//! sink applies its own threshold.
//!
//! The dispatcher's level and timestamp flag are mirrored into the first
//! (primary) sink whenever they are set. Other sinks are configured
//! individually.
//!
//! # Lifecycle
//!
//! ```text
//! Logger::init(custom) ──► installed ◄── Logger::instance() (lazy default)
//! ```
//!
//! Exactly one dispatcher exists per process. Whichever of `init` and
//! `instance` runs first decides which one.

use crate::console::ConsoleSink;
use crate::error::LogError;
use crate::persistent::PersistentSink;
use crate::sink::{LogMessage, LogSink};
use crate::store::MemoryStore;
use mysense_common::log::{RawSeverity, Severity};
use parking_lot::Mutex;
use std::fmt;
use std::sync::OnceLock;
use tracing::debug;

static LOGGER: OnceLock<Logger> = OnceLock::new();

struct LoggerState {
    sinks: Vec<Box<dyn LogSink>>,
    level: Severity,
    timestamps: bool,
}

impl LoggerState {
    fn primary(&mut self) -> Option<&mut Box<dyn LogSink>> {
        self.sinks.first_mut()
    }
}

/// Fan-out log dispatcher.
///
/// All operations lock one mutex, so dispatch, sink registration and
/// reconfiguration are serialized. Sinks must not log through the
/// dispatcher from inside `accept`.
pub struct Logger {
    state: Mutex<LoggerState>,
}

impl Logger {
    /// Dispatcher without sinks, level Info, timestamps off.
    pub fn new() -> Self {
        Self::with_sinks(Vec::new())
    }

    /// Dispatcher over the given sinks, level Info, timestamps off.
    ///
    /// The sinks keep whatever level they were built with until the
    /// dispatcher's level is set.
    pub fn with_sinks(sinks: Vec<Box<dyn LogSink>>) -> Self {
        Self {
            state: Mutex::new(LoggerState {
                sinks,
                level: Severity::Info,
                timestamps: false,
            }),
        }
    }

    /// Default sink set: console on stdout, then a persistent sink over an
    /// in-memory store.
    pub fn with_default_sinks() -> Self {
        Self::with_sinks(vec![
            Box::new(ConsoleSink::stdout()),
            Box::new(PersistentSink::new(MemoryStore::new())),
        ])
    }

    /// Install `logger` as the process-wide dispatcher.
    ///
    /// # Errors
    /// `LogError::AlreadyInitialized` if a dispatcher was already installed
    /// or lazily created by [`Logger::instance`].
    pub fn init(logger: Logger) -> Result<&'static Logger, LogError> {
        let mut candidate = Some(logger);
        let installed = LOGGER.get_or_init(|| {
            debug!("Installing custom log dispatcher");
            candidate.take().unwrap_or_default()
        });
        if candidate.is_some() {
            return Err(LogError::AlreadyInitialized);
        }
        Ok(installed)
    }

    /// The process-wide dispatcher, built with the default sinks on first
    /// access.
    pub fn instance() -> &'static Logger {
        LOGGER.get_or_init(|| {
            debug!("Creating default log dispatcher");
            Logger::with_default_sinks()
        })
    }

    /// The process-wide dispatcher if one exists, without creating it.
    pub fn try_instance() -> Option<&'static Logger> {
        LOGGER.get()
    }

    /// Append a sink. No duplicate detection.
    pub fn add_sink(&self, sink: Box<dyn LogSink>) {
        self.state.lock().sinks.push(sink);
    }

    /// Dispatch `text` at `level` to every sink in insertion order.
    pub fn log(&self, level: impl Into<RawSeverity>, text: &str) {
        self.log_message(&LogMessage::new(level, text));
    }

    /// Dispatch a prepared message to every sink in insertion order.
    pub fn log_message(&self, message: &LogMessage<'_>) {
        let mut state = self.state.lock();
        for sink in state.sinks.iter_mut() {
            sink.accept(message);
        }
    }

    /// Dispatcher's stored level. Does not consult any sink.
    pub fn level(&self) -> Severity {
        self.state.lock().level
    }

    /// Store `level` and force the primary sink's threshold to match.
    pub fn set_level(&self, level: Severity) {
        let mut state = self.state.lock();
        state.level = level;
        if let Some(primary) = state.primary() {
            primary.set_level(level);
        }
    }

    /// Dispatcher's stored timestamp flag. Does not consult any sink.
    pub fn timestamps(&self) -> bool {
        self.state.lock().timestamps
    }

    /// Store `enabled` and force the primary sink's flag to match.
    pub fn set_timestamps(&self, enabled: bool) {
        let mut state = self.state.lock();
        state.timestamps = enabled;
        if let Some(primary) = state.primary() {
            primary.set_timestamps(enabled);
        }
    }

    /// Number of registered sinks.
    pub fn sink_count(&self) -> usize {
        self.state.lock().sinks.len()
    }

    /// Threshold of the sink at `index`, if it exists and has one.
    pub fn sink_level(&self, index: usize) -> Option<Severity> {
        self.state.lock().sinks.get(index).and_then(|s| s.level())
    }

    /// Timestamp flag of the sink at `index`, if it exists and has one.
    pub fn sink_timestamps(&self, index: usize) -> Option<bool> {
        self.state.lock().sinks.get(index).and_then(|s| s.timestamps())
    }

    // ─── Convenience ────────────────────────────────────────────────

    /// Log at Fatal.
    pub fn fatal(&self, text: &str) {
        self.log(Severity::Fatal, text);
    }

    /// Log at Error.
    pub fn error(&self, text: &str) {
        self.log(Severity::Error, text);
    }

    /// Log at Warning.
    pub fn warning(&self, text: &str) {
        self.log(Severity::Warning, text);
    }

    /// Log at Info.
    pub fn info(&self, text: &str) {
        self.log(Severity::Info, text);
    }

    /// Log at Debug.
    pub fn debug(&self, text: &str) {
        self.log(Severity::Debug, text);
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.lock();
        f.debug_struct("Logger")
            .field("sinks", &state.sinks.len())
            .field("level", &state.level)
            .field("timestamps", &state.timestamps)
            .finish()
    }
}
