//! MCP server over stdio.
//!
//! Stdout carries JSON-RPC frames and nothing else. All diagnostics go to
//! the event logger held in [`AppState`], which writes to stderr.

use std::sync::Arc;

use fundline_core::events::LogEntry;
use fundline_core::{AppState, Error, Result};
use rmcp::model::{
    CallToolRequestParams, CallToolResult, ListToolsResult, PaginatedRequestParams,
    ServerCapabilities, ServerInfo, Tool,
};
use rmcp::service::RequestContext;
use rmcp::{ErrorData, RoleServer, ServerHandler, ServiceExt};
use serde_json::Value;

use crate::registry::{CompositeRegistry, ToolRegistry};
use crate::tools::FundingTools;

const INSTRUCTIONS: &str = "Funding tools. Call `funding_providers` to see which \
providers are available, `funding_request` to fund a 0x-prefixed hex address, and \
`validate_addresses` to check addresses before funding.";

/// Fundline MCP server.
///
/// Cheap to clone; clones share the tool registry and state.
#[derive(Clone)]
pub struct FundlineServer {
    name: String,
    version: String,
    registry: Arc<CompositeRegistry>,
    state: AppState,
}

impl FundlineServer {
    /// Creates a server exposing the funding tools.
    pub fn new(state: AppState) -> Self {
        let registry = CompositeRegistry::new().add(FundingTools::new(state.clone()));
        Self::with_registry(state, registry)
    }

    /// Creates a server over a caller-assembled registry.
    pub fn with_registry(state: AppState, registry: CompositeRegistry) -> Self {
        Self {
            name: "fundline".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            registry: Arc::new(registry),
            state,
        }
    }

    /// Overrides the advertised server name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Overrides the advertised version.
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Shared state.
    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Tools advertised to clients.
    pub fn tool_list(&self) -> Vec<Tool> {
        self.registry.tools()
    }

    /// Runs one tool call by name.
    ///
    /// Unknown names are rejected with `invalid_params` naming the tool.
    pub async fn dispatch(
        &self,
        name: &str,
        args: Value,
    ) -> std::result::Result<CallToolResult, ErrorData> {
        match self.registry.call(name, args) {
            Some(future) => future.await,
            None => {
                self.state
                    .logger()
                    .log(LogEntry::warn("tool.unknown").with_tool(name));
                Err(ErrorData::invalid_params(format!("Unknown tool: {name}"), None))
            }
        }
    }

    /// Serves MCP on stdin/stdout until the client disconnects.
    pub async fn serve_stdio(self) -> Result<()> {
        let logger = self.state.logger_arc();
        logger.log(
            LogEntry::info("server.start")
                .with_detail("transport", "stdio")
                .with_detail("tools", self.registry.tool_count())
                .with_detail("default_provider", self.state.default_provider_name()),
        );

        tracing::debug!(server = %self.name, version = %self.version, "starting stdio transport");
        let service = self
            .serve(rmcp::transport::stdio())
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "MCP initialisation failed");
                Error::transport(e.to_string())
            })?;
        let reason = service
            .waiting()
            .await
            .map_err(|e| Error::transport(e.to_string()))?;
        tracing::debug!(?reason, "stdio transport closed");

        logger.log(LogEntry::info("server.stop").with_detail("reason", format!("{reason:?}")));
        Ok(())
    }
}

impl ServerHandler for FundlineServer {
    fn get_info(&self) -> ServerInfo {
        let mut info = ServerInfo::default();
        info.capabilities = ServerCapabilities::builder().enable_tools().build();
        info.server_info.name = self.name.clone();
        info.server_info.version = self.version.clone();
        info.instructions = Some(INSTRUCTIONS.to_string());
        info
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<ListToolsResult, ErrorData> {
        Ok(ListToolsResult::with_all_items(self.tool_list()))
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParams,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<CallToolResult, ErrorData> {
        let args = Value::Object(request.arguments.unwrap_or_default());
        self.dispatch(&request.name, args).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use fundline_core::events::{EventLogger, LogLevel, MemorySink};
    use fundline_core::funding::FundingProviderName;
    use rmcp::model::ErrorCode;

    fn test_server() -> (FundlineServer, MemorySink) {
        let sink = MemorySink::new();
        let logger = EventLogger::new(LogLevel::Debug, sink.clone());
        let state = AppState::new(logger, FundingProviderName::Mock);
        (FundlineServer::new(state), sink)
    }

    #[test]
    fn test_server_info() {
        let (server, _) = test_server();
        let server = server.with_name("funds").with_version("9.9.9");
        let info = server.get_info();
        assert_eq!(info.server_info.name, "funds");
        assert_eq!(info.server_info.version, "9.9.9");
        assert!(info.capabilities.tools.is_some());
        assert!(info.instructions.unwrap().contains("funding_request"));
    }

    #[test]
    fn test_tool_list() {
        let (server, _) = test_server();
        let names: Vec<String> = server
            .tool_list()
            .iter()
            .map(|t| t.name.to_string())
            .collect();
        assert_eq!(
            names,
            vec!["funding_providers", "funding_request", "validate_addresses"]
        );
    }

    #[tokio::test]
    async fn test_dispatch_known_tool() {
        let (server, _) = test_server();
        let result = server
            .dispatch(
                "funding_request",
                serde_json::json!({"address": "0xfeed", "amount": 4}),
            )
            .await
            .unwrap();
        assert_eq!(result.is_error, Some(false));
        assert_eq!(server.state().providers().mock().history().await.len(), 1);
    }

    #[tokio::test]
    async fn test_dispatch_unknown_tool() {
        let (server, sink) = test_server();
        let err = server
            .dispatch("drain_wallet", serde_json::json!({}))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::INVALID_PARAMS);
        assert!(err.message.contains("drain_wallet"));

        let records = sink.records();
        assert_eq!(records[0]["event"], "tool.unknown");
        assert_eq!(records[0]["tool"], "drain_wallet");
    }

    #[test]
    fn test_server_clone_shares_registry() {
        let (server, _) = test_server();
        let cloned = server.clone();
        assert!(Arc::ptr_eq(&server.registry, &cloned.registry));
    }
}
