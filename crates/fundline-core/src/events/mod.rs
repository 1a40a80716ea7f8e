//! Structured diagnostic events.
//!
//! - [`LogLevel`]: ordered severity
//! - [`LogEntry`]: the record callers submit
//! - [`EventLogger`]: threshold filter and line writer
//! - [`MemorySink`]: in-memory capture target

mod entry;
mod level;
mod logger;
mod sink;

pub use entry::{Details, LogEntry};
pub use level::LogLevel;
pub use logger::EventLogger;
pub use sink::MemorySink;
