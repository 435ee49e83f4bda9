//! Log sink capability and message rendering.
//!
//! A sink accepts `(level, text)` and renders or stores it. Sinks own their
//! threshold; the dispatcher hands every message to every sink.

use mysense_common::log::{RawSeverity, Severity};
use mysense_common::time::LocalTime;

/// A message in flight through the dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogMessage<'a> {
    /// Numeric severity, possibly outside the known set.
    pub level: RawSeverity,
    /// Message text.
    pub text: &'a str,
    /// Time the message was raised, when the caller supplies one.
    pub timestamp: Option<LocalTime>,
}

impl<'a> LogMessage<'a> {
    /// A message without a timestamp.
    pub fn new(level: impl Into<RawSeverity>, text: &'a str) -> Self {
        Self {
            level: level.into(),
            text,
            timestamp: None,
        }
    }

    /// Attach a timestamp.
    pub fn with_timestamp(mut self, timestamp: LocalTime) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// Whether this message passes a sink configured with `threshold`.
    pub fn passes(&self, threshold: Severity) -> bool {
        self.level.is_at_least(threshold)
    }
}

/// Render `[YY/MM/DD-HH:MM:SS] <Label> <text>`, the stamp only when given.
pub fn render_line(level: RawSeverity, text: &str, stamp: Option<LocalTime>) -> String {
    match stamp {
        Some(t) => format!("[{t}] {} {text}", level.label()),
        None => format!("{} {text}", level.label()),
    }
}

/// Destination that renders or stores log messages.
///
/// Only `accept` is required. Sinks without a configurable threshold or
/// timestamp flag keep the default no-op setters; the dispatcher pushes its
/// level and timestamp flag into the first sink through them.
///
/// `accept` must not call back into the dispatcher.
pub trait LogSink: Send {
    /// Render or store one message. Never fails.
    fn accept(&mut self, message: &LogMessage<'_>);

    /// Current threshold, if this sink has one.
    fn level(&self) -> Option<Severity> {
        None
    }

    /// Change the threshold. Default: no-op.
    fn set_level(&mut self, _level: Severity) {}

    /// Current timestamp flag, if this sink stamps lines.
    fn timestamps(&self) -> Option<bool> {
        None
    }

    /// Change the timestamp flag. Default: no-op.
    fn set_timestamps(&mut self, _enabled: bool) {}
}
