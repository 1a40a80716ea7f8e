//! Level-filtered structured event logger.
//!
//! [`EventLogger`] writes one JSON object per line to a diagnostic sink.
//! In production that sink is stderr: stdout belongs to the protocol
//! transport and nothing here ever touches it.
//!
//! # Wire format
//!
//! ```text
//! {"ts":"2026-01-01T00:00:00.000Z","level":"warn","event":"y","tool":"fetch","details":{...}}
//! ```
//!
//! `tool` and `details` are omitted when absent; `details` is also omitted
//! when empty.
//!
//! # Failure model
//!
//! `log` never returns an error and never panics. Serialization problems
//! degrade the record, write problems drop it.

use std::io::{self, Write};
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::{Mutex, PoisonError};

use chrono::{SecondsFormat, Utc};
use serde::Serialize;

use super::entry::{Details, LogEntry};
use super::level::LogLevel;

/// Wire form of one record. Field order is the canonical output order.
#[derive(Serialize)]
struct EmittedRecord<'a> {
    ts: &'a str,
    level: LogLevel,
    event: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    tool: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<&'a Details>,
}

/// Structured logger owning the minimum-severity threshold.
///
/// Construct one at startup and share it by `Arc`. The threshold can be
/// changed later with [`set_minimum_level`](Self::set_minimum_level);
/// `log` calls that start after that store observe the new value.
pub struct EventLogger {
    threshold: AtomicU8,
    sink: Mutex<Box<dyn Write + Send>>,
}

impl EventLogger {
    /// Creates a logger writing to an arbitrary sink.
    pub fn new(min_level: LogLevel, sink: impl Write + Send + 'static) -> Self {
        Self {
            threshold: AtomicU8::new(min_level.rank()),
            sink: Mutex::new(Box::new(sink)),
        }
    }

    /// Creates a logger writing to stderr.
    pub fn stderr(min_level: LogLevel) -> Self {
        Self::new(min_level, io::stderr())
    }

    /// Replaces the minimum severity.
    pub fn set_minimum_level(&self, level: LogLevel) {
        self.threshold.store(level.rank(), Ordering::Release);
    }

    /// Current minimum severity.
    pub fn minimum_level(&self) -> LogLevel {
        // Only ranks produced by `LogLevel::rank` are ever stored.
        LogLevel::from_rank(self.threshold.load(Ordering::Acquire)).unwrap_or_default()
    }

    /// Whether an entry at `level` would be written.
    pub fn is_enabled(&self, level: LogLevel) -> bool {
        level.rank() >= self.threshold.load(Ordering::Acquire)
    }

    /// Writes `entry` as one line if it meets the threshold.
    pub fn log(&self, entry: LogEntry) {
        if !self.is_enabled(entry.level) {
            return;
        }

        let ts = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
        let Some(line) = format_record(&entry, &ts) else {
            return;
        };

        let mut sink = self.sink.lock().unwrap_or_else(PoisonError::into_inner);
        if sink.write_all(&line).is_ok() {
            let _ = sink.flush();
        }
    }

    /// Logs a bare debug event.
    pub fn debug(&self, event: &str) {
        if self.is_enabled(LogLevel::Debug) {
            self.log(LogEntry::debug(event));
        }
    }

    /// Logs a bare info event.
    pub fn info(&self, event: &str) {
        if self.is_enabled(LogLevel::Info) {
            self.log(LogEntry::info(event));
        }
    }

    /// Logs a bare warn event.
    pub fn warn(&self, event: &str) {
        if self.is_enabled(LogLevel::Warn) {
            self.log(LogEntry::warn(event));
        }
    }

    /// Logs a bare error event.
    pub fn error(&self, event: &str) {
        if self.is_enabled(LogLevel::Error) {
            self.log(LogEntry::error(event));
        }
    }
}

impl std::fmt::Debug for EventLogger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventLogger")
            .field("minimum_level", &self.minimum_level())
            .finish_non_exhaustive()
    }
}

/// Serializes `entry` into a newline-terminated record.
fn format_record(entry: &LogEntry, ts: &str) -> Option<Vec<u8>> {
    let record = EmittedRecord {
        ts,
        level: entry.level,
        event: &entry.event,
        tool: entry.tool.as_deref(),
        details: entry.normalized_details(),
    };

    let mut line = serde_json::to_vec(&record).ok()?;
    line.push(b'\n');
    Some(line)
}
