//! Tool registration and name-based dispatch.

use std::future::Future;
use std::pin::Pin;

use rmcp::ErrorData;
use rmcp::model::{CallToolResult, Tool};
use serde_json::Value;

/// Boxed future returned by a tool call.
pub type ToolResult = Pin<Box<dyn Future<Output = Result<CallToolResult, ErrorData>> + Send>>;

/// A set of MCP tools that share a backend.
///
/// `call` returns `None` when `name` is not one of this registry's tools,
/// so registries can be chained.
pub trait ToolRegistry: Send + Sync {
    /// Tool descriptors advertised to the client.
    fn tools(&self) -> Vec<Tool>;

    /// Starts the named tool, or returns `None` if it is not ours.
    fn call(&self, name: &str, args: Value) -> Option<ToolResult>;

    /// Number of tools.
    fn tool_count(&self) -> usize {
        self.tools().len()
    }

    /// Whether `name` is one of this registry's tools.
    fn has_tool(&self, name: &str) -> bool {
        self.tools().iter().any(|t| t.name == name)
    }
}

/// Several registries behind one dispatch surface.
///
/// Lookup goes in insertion order; the first registry that claims a name
/// handles it.
#[derive(Default)]
pub struct CompositeRegistry {
    registries: Vec<Box<dyn ToolRegistry>>,
}

impl CompositeRegistry {
    /// Creates an empty composite.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a registry.
    pub fn add<R: ToolRegistry + 'static>(mut self, registry: R) -> Self {
        self.registries.push(Box::new(registry));
        self
    }
}

impl ToolRegistry for CompositeRegistry {
    fn tools(&self) -> Vec<Tool> {
        self.registries.iter().flat_map(|r| r.tools()).collect()
    }

    fn call(&self, name: &str, args: Value) -> Option<ToolResult> {
        self.registries
            .iter()
            .find_map(|r| r.call(name, args.clone()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::tools::make_tool;
    use rmcp::model::Content;

    struct Echo(&'static str);

    impl ToolRegistry for Echo {
        fn tools(&self) -> Vec<Tool> {
            vec![make_tool(self.0, "echo", serde_json::json!({"type": "object"}))]
        }

        fn call(&self, name: &str, args: Value) -> Option<ToolResult> {
            if name != self.0 {
                return None;
            }
            let tag = self.0;
            Some(Box::pin(async move {
                Ok(CallToolResult::success(vec![Content::text(format!(
                    "{tag}:{args}"
                ))]))
            }))
        }
    }

    #[test]
    fn test_composite_lists_all_tools() {
        let composite = CompositeRegistry::new().add(Echo("a")).add(Echo("b"));
        assert_eq!(composite.tool_count(), 2);
        assert!(composite.has_tool("a"));
        assert!(composite.has_tool("b"));
        assert!(!composite.has_tool("c"));
    }

    #[tokio::test]
    async fn test_composite_dispatches_by_name() {
        let composite = CompositeRegistry::new().add(Echo("a")).add(Echo("b"));
        let result = composite
            .call("b", serde_json::json!({}))
            .unwrap()
            .await
            .unwrap();
        assert_eq!(result.is_error, Some(false));
        assert!(composite.call("missing", Value::Null).is_none());
    }
}
