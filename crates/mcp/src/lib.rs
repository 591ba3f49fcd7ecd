//! MCP (Model Context Protocol) plumbing over stdio.
//!
//! This crate covers both ends of the channel: [`Server`] is the client-side
//! handle to a spawned server process, and [`Service`] hosts tools behind the
//! same line-delimited JSON-RPC protocol.
//!
//! # Client example
//!
//! ```no_run
//! use mcp::{Server, ServerConfig};
//! use std::collections::HashMap;
//!
//! # async fn example() -> mcp::Result<()> {
//! let config = ServerConfig {
//!     name: "weather".to_string(),
//!     command: "node".to_string(),
//!     args: vec!["weather-server.js".to_string()],
//!     env: HashMap::new(),
//! };
//!
//! let server = Server::spawn(config).await?;
//! server.initialize().await?;
//!
//! for tool in server.tools().await {
//!     println!("Tool: {}", tool.name);
//! }
//!
//! let result = server.call_tool("get-temperature", Some(serde_json::json!({}))).await?;
//! server.shutdown().await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Service example
//!
//! ```no_run
//! use mcp::{CallToolResult, Service};
//!
//! # async fn example() -> mcp::Result<()> {
//! Service::new("greeter", "1.0.0")
//!     .tool("greet", "Say hello", serde_json::json!({"type": "object"}), |_args| async {
//!         CallToolResult::text("hello")
//!     })
//!     .run()
//!     .await
//! # }
//! ```

mod error;
mod protocol;
mod server;
mod service;

pub use error::{Error, Result};
pub use protocol::{
    CallToolParams, CallToolResult, InitializeParams, InitializeResult, JsonRpcError,
    JsonRpcIncoming, JsonRpcRequest, JsonRpcResponse, ListToolsResult, PROTOCOL_VERSION, PeerInfo,
    RequestId, ServerCapabilities, Tool, ToolContent,
};
pub use server::{DEFAULT_TIMEOUT, MAX_OUTPUT_SIZE, Server, ServerConfig};
pub use service::Service;
