//! MCP-backed tool host.

use super::{ToolError, ToolHost};
use crate::error::Result;
use crate::model::ToolSpec;
use mcp::{CallToolResult, Server, ServerConfig, Tool};
use serde_json::Value;
use tracing::{debug, warn};

/// Tool host backed by a single MCP server process.
pub struct McpToolHost {
    server: Server,
    specs: Vec<ToolSpec>,
}

impl From<Tool> for ToolSpec {
    fn from(tool: Tool) -> Self {
        Self {
            name: tool.name,
            description: tool.description.unwrap_or_default(),
            schema: tool.input_schema,
        }
    }
}

impl McpToolHost {
    /// Spawn the MCP server, perform the handshake, and cache the catalog.
    pub async fn spawn(config: ServerConfig) -> Result<Self> {
        let server = Server::spawn(config).await?;
        server.initialize().await?;

        let specs: Vec<ToolSpec> = server.tools().await.into_iter().map(ToolSpec::from).collect();
        debug!(
            server = server.name(),
            tools = specs.len(),
            "connected to MCP server"
        );

        Ok(Self { server, specs })
    }

    /// Release the tool channel and kill the server process.
    pub async fn shutdown(self) {
        let name = self.server.name().to_string();
        if let Err(e) = self.server.shutdown().await {
            warn!(server = %name, error = %e, "MCP server shutdown failed");
        }
    }
}

impl ToolHost for McpToolHost {
    fn catalog(&self) -> &[ToolSpec] {
        &self.specs
    }

    async fn invoke(&self, name: &str, arguments: &Value) -> Result<CallToolResult, ToolError> {
        self.server
            .call_tool(name, Some(arguments.clone()))
            .await
            .map_err(|e| ToolError::Execution(e.to_string()))
    }
}
