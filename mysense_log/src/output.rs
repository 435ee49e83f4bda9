//! Output stream collaborator consumed by the console sink.

use parking_lot::Mutex;
use std::io::{self, Write};
use std::sync::Arc;

/// A single write-line primitive.
pub trait OutputStream: Send {
    /// Write `line` followed by a newline.
    fn write_line(&mut self, line: &str) -> io::Result<()>;
}

/// Writes lines to the process's standard output.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdoutStream;

impl OutputStream for StdoutStream {
    fn write_line(&mut self, line: &str) -> io::Result<()> {
        let mut out = io::stdout().lock();
        writeln!(out, "{line}")
    }
}

/// Collects lines in memory. Clones share the same buffer.
#[derive(Debug, Clone, Default)]
pub struct MemoryOutput {
    lines: Arc<Mutex<Vec<String>>>,
}

impl MemoryOutput {
    /// Create an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every line written so far.
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().clone()
    }

    /// Number of lines written so far.
    pub fn len(&self) -> usize {
        self.lines.lock().len()
    }

    /// Whether nothing has been written.
    pub fn is_empty(&self) -> bool {
        self.lines.lock().is_empty()
    }

    /// Drop every collected line.
    pub fn clear(&self) {
        self.lines.lock().clear();
    }
}

impl OutputStream for MemoryOutput {
    fn write_line(&mut self, line: &str) -> io::Result<()> {
        self.lines.lock().push(line.to_string());
        Ok(())
    }
}
