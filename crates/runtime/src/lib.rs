//! Monsoon runtime — model transport, tool host, and the orchestration loop.
//!
//! The runtime is organized around these concepts:
//!
//! - **Session**: owns one model backend and one tool channel, with the tool
//!   catalog fetched once at connect time.
//! - **Orchestrator**: the fixed-depth loop that turns one prompt into a
//!   transcript, dispatching at most one level of tool calls.
//! - **Backend**: a trait abstracting the model endpoint (Anthropic
//!   messages API provided).
//! - **ToolHost**: a trait abstracting tool execution (MCP subprocess
//!   provided).
//!
//! # Example
//!
//! ```ignore
//! use runtime::{AnthropicBackend, LauncherSet, Session};
//!
//! # async fn example() -> runtime::Result<()> {
//! let backend = AnthropicBackend::builder("sk-ant-api01-...", "claude-sonnet-4-20250514").build();
//! let mut session = Session::open("weather-server.py", backend, &LauncherSet::default()).await?;
//!
//! let transcript = session.invoke("What is Singapore weather now?").await;
//! session.close().await;
//! println!("{}", transcript?);
//! # Ok(())
//! # }
//! ```

mod error;
mod launcher;
pub mod model;
mod orchestrator;
mod session;
pub mod tools;

pub use error::{Error, Result};
pub use launcher::{Launcher, LauncherSet};
pub use model::{
    AnthropicBackend, AnthropicBackendBuilder, Backend, Message, ModelError, ModelRequest,
    ModelResponse, Part, Role, ToolCall, ToolSpec, Usage,
};
pub use orchestrator::Orchestrator;
pub use session::Session;
pub use tools::{McpToolHost, ToolError, ToolHost};
