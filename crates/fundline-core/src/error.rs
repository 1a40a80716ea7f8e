//! Error types for Fundline operations.
//!
//! This module provides a common `Error` type and `Result<T>` alias used across
//! all Fundline crates. Uses `thiserror` for derive macros.
//!
//! The event logger never returns these errors; it absorbs its own failures.
//! Registry and provider failures are surfaced through this type.

use thiserror::Error;

/// Errors that can occur in Fundline operations.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A log level string outside `debug`, `info`, `warn`, `error`.
    #[error("Invalid log level: {0}")]
    InvalidLogLevel(String),

    /// A funding provider name outside the closed set.
    ///
    /// Reaching this means either untyped input was not validated, or the
    /// provider enumeration grew without the registry being updated.
    #[error("Unsupported funding provider: {0}")]
    UnsupportedFundingProvider(String),

    /// A destination address that is not `0x`-prefixed hex.
    #[error("Invalid hex address: {0}")]
    InvalidAddress(String),

    /// A funding request that fails validation.
    #[error("Invalid funding request: {0}")]
    InvalidRequest(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Protocol transport failure.
    #[error("Transport error: {0}")]
    Transport(String),
}

impl Error {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create an invalid log level error.
    pub fn invalid_log_level(value: impl Into<String>) -> Self {
        Self::InvalidLogLevel(value.into())
    }

    /// Create an unsupported funding provider error.
    pub fn unsupported_provider(value: impl Into<String>) -> Self {
        Self::UnsupportedFundingProvider(value.into())
    }

    /// Create an invalid address error.
    pub fn invalid_address(value: impl Into<String>) -> Self {
        Self::InvalidAddress(value.into())
    }

    /// Create an invalid request error.
    pub fn invalid_request(msg: impl Into<String>) -> Self {
        Self::InvalidRequest(msg.into())
    }

    /// Create a transport error.
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    /// Whether the error was caused by caller-supplied input.
    pub fn is_caller_fault(&self) -> bool {
        matches!(
            self,
            Self::InvalidLogLevel(_)
                | Self::UnsupportedFundingProvider(_)
                | Self::InvalidAddress(_)
                | Self::InvalidRequest(_)
        )
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

/// Result type alias using Fundline's Error type.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_provider_names_value() {
        let err = Error::unsupported_provider("stripe");
        assert!(err.to_string().contains("stripe"));
    }

    #[test]
    fn test_caller_fault_classification() {
        assert!(Error::invalid_address("0xZZ").is_caller_fault());
        assert!(Error::invalid_request("amount").is_caller_fault());
        assert!(Error::unsupported_provider("x").is_caller_fault());
        assert!(!Error::config("missing").is_caller_fault());
        assert!(!Error::Serialization("bad".into()).is_caller_fault());
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: Error = io.into();
        assert!(matches!(err, Error::Io(_)));
    }
}
