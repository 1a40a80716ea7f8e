//! The record a caller submits to the event logger.

use serde::Serialize;
use serde_json::{Map, Value};

use super::level::LogLevel;

/// Structured payload attached to an event.
pub type Details = Map<String, Value>;

/// One diagnostic event as submitted by a caller.
///
/// Built with [`LogEntry::new`] or a level shorthand, then extended with
/// the `with_*` builders:
///
/// ```
/// use fundline_core::events::{LogEntry, LogLevel};
///
/// let entry = LogEntry::warn("tool.invoke.error")
///     .with_tool("funding_request")
///     .with_detail("attempt", 2);
///
/// assert_eq!(entry.level, LogLevel::Warn);
/// assert_eq!(entry.tool.as_deref(), Some("funding_request"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct LogEntry {
    /// Severity.
    pub level: LogLevel,

    /// Short machine-stable identifier, e.g. `"tool.invoke.start"`.
    pub event: String,

    /// Tool or operation that produced the event.
    pub tool: Option<String>,

    /// Contextual payload. An empty map is treated as absent.
    pub details: Option<Details>,
}

impl LogEntry {
    /// Creates an entry with no tool and no details.
    pub fn new(level: LogLevel, event: impl Into<String>) -> Self {
        Self {
            level,
            event: event.into(),
            tool: None,
            details: None,
        }
    }

    /// Creates a debug entry.
    pub fn debug(event: impl Into<String>) -> Self {
        Self::new(LogLevel::Debug, event)
    }

    /// Creates an info entry.
    pub fn info(event: impl Into<String>) -> Self {
        Self::new(LogLevel::Info, event)
    }

    /// Creates a warn entry.
    pub fn warn(event: impl Into<String>) -> Self {
        Self::new(LogLevel::Warn, event)
    }

    /// Creates an error entry.
    pub fn error(event: impl Into<String>) -> Self {
        Self::new(LogLevel::Error, event)
    }

    /// Sets the originating tool.
    pub fn with_tool(mut self, tool: impl Into<String>) -> Self {
        self.tool = Some(tool.into());
        self
    }

    /// Adds one detail.
    ///
    /// Never fails: a value that cannot be represented as JSON is stored
    /// as a `"<unserializable: ...>"` string instead.
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Serialize) -> Self {
        let value = serde_json::to_value(value)
            .unwrap_or_else(|e| Value::String(format!("<unserializable: {e}>")));
        self.details
            .get_or_insert_with(Map::new)
            .insert(key.into(), value);
        self
    }

    /// Replaces the whole details map.
    pub fn with_details(mut self, details: Details) -> Self {
        self.details = Some(details);
        self
    }

    /// The details map, or `None` when absent or empty.
    pub fn normalized_details(&self) -> Option<&Details> {
        self.details.as_ref().filter(|d| !d.is_empty())
    }
}
