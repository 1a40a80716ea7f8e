//! MCP tools for funding operations.
//!
//! Provides `FundingTools`, a `ToolRegistry` that delegates to the
//! provider registry held in [`AppState`]. Every call is bracketed by
//! `tool.invoke.*` events on the event logger.

use std::sync::Arc;
use std::time::Instant;

use fundline_core::events::LogEntry;
use fundline_core::funding::{FundingProvider, FundingRequest};
use fundline_core::{AddressReport, AppState, HexAddress};
use rmcp::ErrorData;
use rmcp::model::{CallToolResult, Content, Tool};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::McpErrorExt;
use crate::registry::{ToolRegistry, ToolResult};

/// Lists the available funding providers.
pub const FUNDING_PROVIDERS: &str = "funding_providers";

/// Sends a funding request through a provider.
pub const FUNDING_REQUEST: &str = "funding_request";

/// Checks a batch of candidate addresses.
pub const VALIDATE_ADDRESSES: &str = "validate_addresses";

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Convert a `serde_json::Value::Object` to an `Arc<serde_json::Map>`.
fn json_schema(value: Value) -> Arc<serde_json::Map<String, Value>> {
    match value {
        Value::Object(map) => Arc::new(map),
        _ => Arc::new(serde_json::Map::new()),
    }
}

/// Serialize a value to a successful `CallToolResult`.
fn serialize_response<T: Serialize>(value: &T) -> Result<CallToolResult, ErrorData> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| ErrorData::internal_error(e.to_string(), None))?;
    Ok(CallToolResult::success(vec![Content::text(json)]))
}

/// Build a `Tool` with a JSON schema.
pub(crate) fn make_tool(name: &str, description: &str, schema: Value) -> Tool {
    Tool::new(
        name.to_string(),
        description.to_string(),
        json_schema(schema),
    )
}

fn parse_args<T: for<'de> Deserialize<'de>>(args: Value) -> Result<T, ErrorData> {
    serde_json::from_value(args).map_err(|e| ErrorData::invalid_params(e.to_string(), None))
}

// ---------------------------------------------------------------------------
// Argument and response types
// ---------------------------------------------------------------------------

/// Arguments for the `funding_request` tool.
#[derive(Debug, Deserialize)]
pub struct FundingRequestArgs {
    /// Provider name; the configured default when omitted.
    pub provider: Option<String>,
    /// Destination address.
    pub address: String,
    /// Amount in base units.
    pub amount: u64,
    /// Optional memo.
    pub memo: Option<String>,
}

/// Arguments for the `validate_addresses` tool.
#[derive(Debug, Deserialize)]
pub struct ValidateAddressesArgs {
    /// Candidate addresses.
    pub addresses: Vec<String>,
}

/// One entry of the `funding_providers` listing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProviderInfo {
    /// Provider name.
    pub name: String,
    /// Provider description.
    pub description: String,
    /// Whether this is the configured default.
    pub default: bool,
}

// ---------------------------------------------------------------------------
// FundingTools
// ---------------------------------------------------------------------------

/// MCP tools backed by the funding provider registry.
///
/// Generates three tools:
/// - `funding_providers`: list providers
/// - `funding_request`: fund an address through a provider
/// - `validate_addresses`: check hex addresses
#[derive(Clone)]
pub struct FundingTools {
    state: AppState,
}

impl FundingTools {
    /// Create funding tools over shared state.
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    fn owns(name: &str) -> bool {
        matches!(name, FUNDING_PROVIDERS | FUNDING_REQUEST | VALIDATE_ADDRESSES)
    }
}

impl ToolRegistry for FundingTools {
    fn tools(&self) -> Vec<Tool> {
        vec![
            make_tool(
                FUNDING_PROVIDERS,
                "List available funding providers",
                serde_json::json!({
                    "type": "object",
                    "properties": {}
                }),
            ),
            make_tool(
                FUNDING_REQUEST,
                "Fund a hex address through a funding provider",
                serde_json::json!({
                    "type": "object",
                    "properties": {
                        "provider": {
                            "type": "string",
                            "description": "Provider name (defaults to the configured provider)"
                        },
                        "address": {
                            "type": "string",
                            "description": "Destination address (0x-prefixed hex)"
                        },
                        "amount": {
                            "type": "integer",
                            "minimum": 1,
                            "description": "Amount in base units"
                        },
                        "memo": {
                            "type": "string",
                            "description": "Optional note carried with the request"
                        }
                    },
                    "required": ["address", "amount"]
                }),
            ),
            make_tool(
                VALIDATE_ADDRESSES,
                "Check which addresses are 0x-prefixed hex",
                serde_json::json!({
                    "type": "object",
                    "properties": {
                        "addresses": {
                            "type": "array",
                            "items": { "type": "string" },
                            "description": "Candidate addresses"
                        }
                    },
                    "required": ["addresses"]
                }),
            ),
        ]
    }

    fn call(&self, name: &str, args: Value) -> Option<ToolResult> {
        if !Self::owns(name) {
            return None;
        }
        let state = self.state.clone();
        let tool = name.to_string();

        Some(Box::pin(async move {
            state
                .logger()
                .log(LogEntry::debug("tool.invoke.start").with_tool(&tool));
            let started = Instant::now();

            let result = run_tool(&state, &tool, args).await;

            let elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
            match &result {
                Ok(_) => state.logger().log(
                    LogEntry::info("tool.invoke.finish")
                        .with_tool(&tool)
                        .with_detail("elapsed_ms", elapsed_ms),
                ),
                Err(e) => state.logger().log(
                    LogEntry::warn("tool.invoke.error")
                        .with_tool(&tool)
                        .with_detail("elapsed_ms", elapsed_ms)
                        .with_detail("message", e.message.to_string()),
                ),
            }
            result
        }))
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

async fn run_tool(state: &AppState, tool: &str, args: Value) -> Result<CallToolResult, ErrorData> {
    match tool {
        FUNDING_PROVIDERS => list_providers(state),
        FUNDING_REQUEST => request_funding(state, args).await,
        VALIDATE_ADDRESSES => validate_addresses(args),
        _ => Err(ErrorData::invalid_params(format!("Unknown tool: {tool}"), None)),
    }
}

fn list_providers(state: &AppState) -> Result<CallToolResult, ErrorData> {
    let default = state.default_provider_name();
    let providers: Vec<ProviderInfo> = state
        .providers()
        .names()
        .map(|name| {
            let provider = state.providers().get(name);
            ProviderInfo {
                name: name.to_string(),
                description: provider.description().to_string(),
                default: name == default,
            }
        })
        .collect();
    serialize_response(&providers)
}

async fn request_funding(state: &AppState, args: Value) -> Result<CallToolResult, ErrorData> {
    let args: FundingRequestArgs = parse_args(args)?;

    let provider: Arc<dyn FundingProvider> = match args.provider.as_deref() {
        Some(raw) => state.providers().resolve(raw).map_err(|e| e.to_mcp_error())?,
        None => state.default_provider(),
    };
    let address = HexAddress::parse(args.address).map_err(|e| e.to_mcp_error())?;

    let mut request = FundingRequest::new(address, args.amount);
    request.memo = args.memo;

    state.logger().log(
        LogEntry::debug("funding.dispatch")
            .with_tool(FUNDING_REQUEST)
            .with_detail("provider", provider.name())
            .with_detail("amount", request.amount),
    );

    let outcome = provider.fund(request).await.map_err(|e| e.to_mcp_error())?;
    serialize_response(&outcome)
}

fn validate_addresses(args: Value) -> Result<CallToolResult, ErrorData> {
    let args: ValidateAddressesArgs = parse_args(args)?;
    serialize_response(&AddressReport::check(args.addresses))
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use fundline_core::events::{EventLogger, LogLevel, MemorySink};
    use fundline_core::funding::FundingProviderName;
    use rmcp::model::ErrorCode;

    fn test_tools(default: FundingProviderName) -> (FundingTools, AppState, MemorySink) {
        let sink = MemorySink::new();
        let logger = EventLogger::new(LogLevel::Debug, sink.clone());
        let state = AppState::new(logger, default);
        (FundingTools::new(state.clone()), state, sink)
    }

    fn text_of(result: &CallToolResult) -> Value {
        let text = &result.content[0].as_text().unwrap().text;
        serde_json::from_str(text).unwrap()
    }

    #[test]
    fn test_funding_tools_listing() {
        let (tools, _, _) = test_tools(FundingProviderName::Skipped);
        let list = tools.tools();
        assert_eq!(list.len(), 3);
        assert_eq!(list[0].name, FUNDING_PROVIDERS);
        assert_eq!(list[1].name, FUNDING_REQUEST);
        assert_eq!(list[2].name, VALIDATE_ADDRESSES);
        assert!(tools.has_tool(FUNDING_REQUEST));
        assert!(!tools.has_tool("funding_refund"));
    }

    #[test]
    fn test_funding_tools_unknown_name() {
        let (tools, _, _) = test_tools(FundingProviderName::Skipped);
        assert!(tools.call("funding_refund", serde_json::json!({})).is_none());
    }

    #[tokio::test]
    async fn test_run_tool_rejects_unhandled_name() {
        let (_, state, _) = test_tools(FundingProviderName::Mock);
        let err = run_tool(&state, "funding_refund", serde_json::json!({"addresses": ["0x1"]}))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::INVALID_PARAMS);
        assert!(err.message.contains("funding_refund"));
    }

    #[tokio::test]
    async fn test_list_providers_marks_default() {
        let (tools, _, _) = test_tools(FundingProviderName::Mock);
        let result = tools
            .call(FUNDING_PROVIDERS, serde_json::json!({}))
            .unwrap()
            .await
            .unwrap();
        let providers: Vec<ProviderInfo> = serde_json::from_value(text_of(&result)).unwrap();
        assert_eq!(providers.len(), 2);
        assert!(providers.iter().any(|p| p.name == "mock" && p.default));
        assert!(providers.iter().any(|p| p.name == "skipped" && !p.default));
    }

    #[tokio::test]
    async fn test_request_uses_default_provider() {
        let (tools, _, _) = test_tools(FundingProviderName::Skipped);
        let result = tools
            .call(
                FUNDING_REQUEST,
                serde_json::json!({"address": "0xabc", "amount": 10}),
            )
            .unwrap()
            .await
            .unwrap();
        let outcome = text_of(&result);
        assert_eq!(outcome["status"], "skipped");
        assert_eq!(outcome["provider"], "skipped");
    }

    #[tokio::test]
    async fn test_request_explicit_provider_shares_state() {
        let (tools, state, _) = test_tools(FundingProviderName::Skipped);
        let args = serde_json::json!({"provider": "mock", "address": "0xabc", "amount": 10, "memo": "m"});

        tools.call(FUNDING_REQUEST, args.clone()).unwrap().await.unwrap();
        let result = tools.call(FUNDING_REQUEST, args).unwrap().await.unwrap();

        let outcome = text_of(&result);
        assert_eq!(outcome["status"], "funded");
        assert_eq!(outcome["reference"], "mock-000002");
        let history = state.providers().mock().history().await;
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].memo.as_deref(), Some("m"));
    }

    #[tokio::test]
    async fn test_request_unknown_provider_is_error_naming_value() {
        let (tools, _, sink) = test_tools(FundingProviderName::Skipped);
        let err = tools
            .call(
                FUNDING_REQUEST,
                serde_json::json!({"provider": "stripe", "address": "0xabc", "amount": 1}),
            )
            .unwrap()
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::INVALID_PARAMS);
        assert!(err.message.contains("stripe"));

        let records = sink.records();
        let last = records.last().unwrap();
        assert_eq!(last["event"], "tool.invoke.error");
        assert_eq!(last["level"], "warn");
        assert!(last["details"]["message"].as_str().unwrap().contains("stripe"));
    }

    #[tokio::test]
    async fn test_request_bad_address() {
        let (tools, _, _) = test_tools(FundingProviderName::Mock);
        let err = tools
            .call(
                FUNDING_REQUEST,
                serde_json::json!({"address": "abc", "amount": 1}),
            )
            .unwrap()
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::INVALID_PARAMS);
        assert!(err.message.contains("abc"));
    }

    #[tokio::test]
    async fn test_request_zero_amount() {
        let (tools, state, _) = test_tools(FundingProviderName::Mock);
        let err = tools
            .call(FUNDING_REQUEST, serde_json::json!({"address": "0x1", "amount": 0}))
            .unwrap()
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::INVALID_PARAMS);
        assert!(state.providers().mock().history().await.is_empty());
    }

    #[tokio::test]
    async fn test_request_missing_fields() {
        let (tools, _, _) = test_tools(FundingProviderName::Mock);
        let err = tools
            .call(FUNDING_REQUEST, serde_json::json!({"amount": 5}))
            .unwrap()
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::INVALID_PARAMS);
    }

    #[tokio::test]
    async fn test_validate_addresses() {
        let (tools, _, _) = test_tools(FundingProviderName::Skipped);
        let result = tools
            .call(
                VALIDATE_ADDRESSES,
                serde_json::json!({"addresses": ["0x1", "zz", "0xFf"]}),
            )
            .unwrap()
            .await
            .unwrap();
        let report: AddressReport = serde_json::from_value(text_of(&result)).unwrap();
        assert_eq!(report.valid, vec!["0x1", "0xFf"]);
        assert_eq!(report.invalid, vec!["zz"]);
    }

    #[tokio::test]
    async fn test_invocation_events_bracket_call() {
        let (tools, _, sink) = test_tools(FundingProviderName::Skipped);
        tools
            .call(FUNDING_PROVIDERS, serde_json::json!({}))
            .unwrap()
            .await
            .unwrap();

        let records = sink.records();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["event"], "tool.invoke.start");
        assert_eq!(records[0]["level"], "debug");
        assert_eq!(records[0]["tool"], FUNDING_PROVIDERS);
        assert!(records[0].get("details").is_none());
        assert_eq!(records[1]["event"], "tool.invoke.finish");
        assert!(records[1]["details"]["elapsed_ms"].is_u64());
    }

    #[tokio::test]
    async fn test_invocation_events_respect_threshold() {
        let (tools, state, sink) = test_tools(FundingProviderName::Skipped);
        state.logger().set_minimum_level(LogLevel::Warn);
        tools
            .call(FUNDING_PROVIDERS, serde_json::json!({}))
            .unwrap()
            .await
            .unwrap();
        assert!(sink.is_empty());
    }
}
