//! Tool host trait.

use crate::model::ToolSpec;
use crate::tools::ToolError;
use mcp::CallToolResult;
use serde_json::Value;
use std::future::Future;

/// Trait for tool execution hosts.
///
/// Implementations expose a catalog fetched once at connect time and execute
/// named calls. This is the boundary between the orchestration loop and side
/// effects.
pub trait ToolHost: Send + Sync {
    /// The catalog of available tools. Read-only for the host's lifetime.
    fn catalog(&self) -> &[ToolSpec];

    /// Invoke a tool by name with JSON arguments.
    fn invoke(
        &self,
        name: &str,
        arguments: &Value,
    ) -> impl Future<Output = Result<CallToolResult, ToolError>> + Send;
}
