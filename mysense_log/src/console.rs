//! Console sink: threshold-filtered, optionally stamped lines on an output
//! stream.

use crate::output::{OutputStream, StdoutStream};
use crate::sink::{LogMessage, LogSink, render_line};
use mysense_common::log::Severity;
use mysense_common::time::{SystemClock, TimeSource};
use tracing::debug;

/// Renders accepted messages as single lines.
///
/// A message is written when its level is at least as severe as the sink's
/// threshold. With timestamps on, the message's own timestamp is used when
/// present, otherwise the clock is read.
pub struct ConsoleSink<O = StdoutStream, T = SystemClock> {
    output: O,
    clock: T,
    level: Severity,
    timestamps: bool,
}

impl ConsoleSink {
    /// Console sink on standard output with the system clock.
    pub fn stdout() -> Self {
        Self::new(StdoutStream, SystemClock)
    }
}

impl<O: OutputStream, T: TimeSource> ConsoleSink<O, T> {
    /// Create a sink with threshold Info and timestamps off.
    pub fn new(output: O, clock: T) -> Self {
        Self {
            output,
            clock,
            level: Severity::Info,
            timestamps: false,
        }
    }

    /// Builder: set the threshold.
    pub fn with_level(mut self, level: Severity) -> Self {
        self.level = level;
        self
    }

    /// Builder: set the timestamp flag.
    pub fn with_timestamps(mut self, enabled: bool) -> Self {
        self.timestamps = enabled;
        self
    }
}

impl<O: OutputStream, T: TimeSource> LogSink for ConsoleSink<O, T> {
    fn accept(&mut self, message: &LogMessage<'_>) {
        if !message.passes(self.level) {
            return;
        }
        let stamp = if self.timestamps {
            Some(message.timestamp.unwrap_or_else(|| self.clock.now()))
        } else {
            None
        };
        let line = render_line(message.level, message.text, stamp);
        if let Err(e) = self.output.write_line(&line) {
            debug!("console sink write failed: {e}");
        }
    }

    fn level(&self) -> Option<Severity> {
        Some(self.level)
    }

    fn set_level(&mut self, level: Severity) {
        self.level = level;
    }

    fn timestamps(&self) -> Option<bool> {
        Some(self.timestamps)
    }

    fn set_timestamps(&mut self, enabled: bool) {
        self.timestamps = enabled;
    }
}
