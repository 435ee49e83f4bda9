//! Bridge from the dispatcher into `tracing`.

use crate::sink::{LogMessage, LogSink};
use mysense_common::log::Severity;
use tracing::{debug, error, info, trace, warn};

/// Forwards accepted messages to the `tracing` subscriber.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink {
    level: Severity,
}

impl TracingSink {
    /// Sink with the given threshold.
    pub fn new(level: Severity) -> Self {
        Self { level }
    }
}

impl LogSink for TracingSink {
    fn accept(&mut self, message: &LogMessage<'_>) {
        if !message.passes(self.level) {
            return;
        }
        let text = message.text;
        match message.level.severity() {
            Some(Severity::Fatal) => error!(fatal = true, "{text}"),
            Some(Severity::Error) => error!("{text}"),
            Some(Severity::Warning) => warn!("{text}"),
            Some(Severity::Info) => info!("{text}"),
            Some(Severity::Debug) => debug!("{text}"),
            Some(Severity::All) | None => trace!(raw_level = message.level.0, "{text}"),
        }
    }

    fn level(&self) -> Option<Severity> {
        Some(self.level)
    }

    fn set_level(&mut self, level: Severity) {
        self.level = level;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_is_configurable() {
        let mut sink = TracingSink::default();
        assert_eq!(sink.level(), Some(Severity::Info));
        sink.set_level(Severity::Debug);
        assert_eq!(sink.level(), Some(Severity::Debug));
        assert_eq!(sink.timestamps(), None);
    }

    #[test]
    fn test_accept_without_subscriber() {
        let mut sink = TracingSink::new(Severity::All);
        for level in Severity::LEVELS {
            sink.accept(&LogMessage::new(level, "no subscriber installed"));
        }
    }
}
