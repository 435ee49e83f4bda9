//! Explicitly installed process-wide dispatcher.
//!
//! Runs in its own process so no other test can create the default first.

use mysense_common::log::Severity;
use mysense_common::time::{FixedClock, LocalTime};
use mysense_log::{ConsoleSink, LogError, Logger, MemoryOutput, TracingSink};
use std::ptr;

#[test]
fn installed_dispatcher_is_returned_by_instance() {
    let output = MemoryOutput::new();
    let clock = FixedClock(LocalTime::new(2024, 1, 1, 0, 0, 0));
    let custom = Logger::with_sinks(vec![Box::new(ConsoleSink::new(output.clone(), clock))]);

    let installed = Logger::init(custom).unwrap();
    assert!(ptr::eq(installed, Logger::instance()));
    assert_eq!(Logger::instance().sink_count(), 1);

    Logger::instance().add_sink(Box::new(TracingSink::new(Severity::Info)));
    assert_eq!(installed.sink_count(), 2);

    Logger::instance().set_level(Severity::Debug);
    assert_eq!(installed.sink_level(0), Some(Severity::Debug));
    assert_eq!(installed.sink_level(1), Some(Severity::Info));

    installed.debug("calibrating");
    installed.log(Severity::All, "noise");
    assert_eq!(output.lines(), vec!["Debug:   calibrating"]);

    assert_eq!(
        Logger::init(Logger::new()).unwrap_err(),
        LogError::AlreadyInitialized
    );
}
