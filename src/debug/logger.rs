// Logger - Event logging for the hardware abstraction layer
//
// Provides:
// - Configurable log levels
// - Typed entries for controller hot-plug and frame presentation
// - Log output to memory, file, or stderr

use crate::input::DeviceId;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Log level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LogLevel {
    /// No logging
    None,
    /// Error messages only
    Error,
    /// Warnings and errors
    Warning,
    /// Info, warnings, and errors
    Info,
    /// Debug information
    Debug,
    /// Verbose per-frame logging
    Trace,
}

/// Trace entry
///
/// Represents a single log entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TraceEntry {
    /// A controller became the active device
    ControllerAttached(DeviceId),
    /// A controller was unplugged
    ControllerDetached(DeviceId),
    /// A frame was shown; carries the running frame count
    FramePresented(u64),
    /// Custom message
    Message(String),
}

impl std::fmt::Display for TraceEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TraceEntry::ControllerAttached(id) => write!(f, "Controller {} attached", id),
            TraceEntry::ControllerDetached(id) => write!(f, "Controller {} detached", id),
            TraceEntry::FramePresented(n) => write!(f, "Frame {} presented", n),
            TraceEntry::Message(msg) => write!(f, "{}", msg),
        }
    }
}

/// Logger
///
/// Keeps a bounded in-memory buffer and can mirror entries to a file and to
/// stderr.
pub struct Logger {
    /// Current log level
    log_level: LogLevel,

    /// In-memory trace buffer
    trace_buffer: Vec<TraceEntry>,

    /// Maximum number of entries in trace buffer (0 = unlimited)
    max_buffer_size: usize,

    /// Output file
    output_file: Option<File>,

    /// Echo entries to stderr
    echo: bool,
}

impl Logger {
    /// Create a new logger
    ///
    /// Logging is off until a level is set.
    pub fn new() -> Self {
        Logger {
            log_level: LogLevel::None,
            trace_buffer: Vec::new(),
            max_buffer_size: 10000,
            output_file: None,
            echo: false,
        }
    }

    /// Create a logger at the given level
    pub fn with_level(level: LogLevel) -> Self {
        let mut logger = Self::new();
        logger.set_log_level(level);
        logger
    }

    /// Set the log level
    pub fn set_log_level(&mut self, level: LogLevel) {
        self.log_level = level;
    }

    /// Get the current log level
    pub fn log_level(&self) -> LogLevel {
        self.log_level
    }

    /// Whether entries at `level` are recorded
    pub fn enabled(&self, level: LogLevel) -> bool {
        level != LogLevel::None && level <= self.log_level
    }

    /// Mirror entries to stderr
    pub fn set_echo(&mut self, echo: bool) {
        self.echo = echo;
    }

    /// Set maximum trace buffer size
    ///
    /// When the buffer exceeds this size, old entries are removed.
    /// Set to 0 for unlimited size.
    pub fn set_max_buffer_size(&mut self, size: usize) {
        self.max_buffer_size = size;

        if size > 0 && self.trace_buffer.len() > size {
            self.trace_buffer.drain(0..self.trace_buffer.len() - size);
        }
    }

    /// Open a log file for output
    pub fn open_log_file<P: AsRef<Path>>(&mut self, path: P) -> std::io::Result<()> {
        let file = File::create(path)?;
        self.output_file = Some(file);
        Ok(())
    }

    /// Record `entry` if `level` is enabled
    pub fn log(&mut self, level: LogLevel, entry: TraceEntry) {
        if !self.enabled(level) {
            return;
        }
        self.add_entry(entry);
    }

    /// Log a message
    pub fn log_message(&mut self, level: LogLevel, message: String) {
        self.log(level, TraceEntry::Message(message));
    }

    fn add_entry(&mut self, entry: TraceEntry) {
        if let Some(ref mut file) = self.output_file {
            let _ = writeln!(file, "{}", entry);
        }
        if self.echo {
            eprintln!("[nes-hal] {}", entry);
        }

        self.trace_buffer.push(entry);

        if self.max_buffer_size > 0 && self.trace_buffer.len() > self.max_buffer_size {
            self.trace_buffer.remove(0);
        }
    }

    /// All entries in the buffer
    pub fn trace_buffer(&self) -> &[TraceEntry] {
        &self.trace_buffer
    }

    /// Clear the trace buffer
    pub fn clear_buffer(&mut self) {
        self.trace_buffer.clear();
    }

    /// The last `count` entries
    pub fn last_entries(&self, count: usize) -> &[TraceEntry] {
        let start = self.trace_buffer.len().saturating_sub(count);
        &self.trace_buffer[start..]
    }

    /// Format the entire trace buffer, one entry per line
    pub fn format_trace_buffer(&self) -> String {
        let mut output = String::new();

        for entry in &self.trace_buffer {
            output.push_str(&format!("{}\n", entry));
        }

        output
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}
