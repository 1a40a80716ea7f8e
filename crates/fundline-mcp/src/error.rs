//! Mapping from core errors to MCP protocol errors.

use fundline_core::Error;
use rmcp::ErrorData;

/// Converts a Fundline error into an MCP error response.
pub trait McpErrorExt {
    /// Caller faults become `invalid_params`; everything else is
    /// `internal_error`. The message always carries the original text.
    fn to_mcp_error(&self) -> ErrorData;
}

impl McpErrorExt for Error {
    fn to_mcp_error(&self) -> ErrorData {
        if self.is_caller_fault() {
            ErrorData::invalid_params(self.to_string(), None)
        } else {
            ErrorData::internal_error(self.to_string(), None)
        }
    }
}
