//! Persistent diagnostic sink: keeps the last severe message across restarts.

use crate::sink::{LogMessage, LogSink};
use crate::store::{KeyValueStore, MemoryStore};
use mysense_common::consts::PERSISTENT_LOG_KEY;
use mysense_common::log::Severity;
use tracing::warn;

/// Most lenient level that is still persisted.
pub const PERSIST_CUTOFF: Severity = Severity::Error;

/// Single-slot sink over a key/value store.
///
/// Fatal and Error messages overwrite the value under
/// [`PERSISTENT_LOG_KEY`]. Everything else is dropped. There is no
/// threshold or timestamp to configure.
#[derive(Debug, Clone, Default)]
pub struct PersistentSink<S = MemoryStore> {
    store: S,
}

impl<S: KeyValueStore> PersistentSink<S> {
    /// Wrap a store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Backing store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Last persisted message, if any.
    pub fn last(&self) -> Option<String> {
        match self.store.get(PERSISTENT_LOG_KEY) {
            Ok(value) => value,
            Err(e) => {
                warn!("Failed to read persisted log: {e}");
                None
            }
        }
    }
}

impl<S: KeyValueStore> LogSink for PersistentSink<S> {
    fn accept(&mut self, message: &LogMessage<'_>) {
        if !message.passes(PERSIST_CUTOFF) {
            return;
        }
        if let Err(e) = self.store.set(PERSISTENT_LOG_KEY, message.text) {
            warn!("Failed to persist log message: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::FileStore;
    use mysense_common::log::RawSeverity;
    use tempfile::TempDir;

    #[test]
    fn test_only_two_most_severe_levels_persist() {
        for level in Severity::LEVELS {
            let store = MemoryStore::new();
            let mut sink = PersistentSink::new(store.clone());
            sink.accept(&LogMessage::new(level, "msg"));
            let expected = matches!(level, Severity::Fatal | Severity::Error);
            assert_eq!(
                store.get(PERSISTENT_LOG_KEY).unwrap().is_some(),
                expected,
                "{level:?}"
            );
        }
    }

    #[test]
    fn test_overwrites_previous_value() {
        let mut sink = PersistentSink::new(MemoryStore::new());
        sink.accept(&LogMessage::new(Severity::Error, "first"));
        sink.accept(&LogMessage::new(Severity::Warning, "ignored"));
        sink.accept(&LogMessage::new(Severity::Fatal, "second"));
        assert_eq!(sink.last().as_deref(), Some("second"));
    }

    #[test]
    fn test_unknown_level_is_not_persisted() {
        let mut sink = PersistentSink::new(MemoryStore::new());
        sink.accept(&LogMessage::new(RawSeverity(200), "odd"));
        assert_eq!(sink.last(), None);
    }

    #[test]
    fn test_has_no_threshold() {
        let mut sink = PersistentSink::new(MemoryStore::new());
        sink.set_level(Severity::All);
        sink.set_timestamps(true);
        assert_eq!(sink.level(), None);
        assert_eq!(sink.timestamps(), None);
        sink.accept(&LogMessage::new(Severity::Info, "still ignored"));
        assert_eq!(sink.last(), None);
    }

    #[test]
    fn test_file_store_survives_restart() {
        let dir = TempDir::new().unwrap();
        {
            let mut sink = PersistentSink::new(FileStore::new(dir.path()));
            sink.accept(&LogMessage::new(Severity::Error, "bus fault"));
        }
        let sink = PersistentSink::new(FileStore::new(dir.path()));
        assert_eq!(sink.last().as_deref(), Some("bus fault"));
    }
}
