// Debug module - Diagnostics for the hardware abstraction layer
//
// Logging of controller hot-plug, quit requests and presented frames, with
// configurable log levels. Disabled levels cost a single comparison.

pub mod logger;

pub use logger::{LogLevel, Logger, TraceEntry};
