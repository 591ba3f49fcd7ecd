use crate::model::ModelError;
use crate::tools::ToolError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// The tool endpoint locator is not usable (bad extension, bad path).
    #[error("config error: {0}")]
    Config(String),

    /// The tool channel could not be established or broke down.
    #[error("connection error: {0}")]
    Connection(#[from] mcp::Error),

    /// The model transport failed or returned a malformed body.
    #[error(transparent)]
    Model(#[from] ModelError),

    /// Unknown tool name, or the tool process reported an error.
    #[error("tool error: {0}")]
    Tool(#[from] ToolError),

    /// Structurally valid but semantically empty response where content was
    /// required.
    #[error("protocol error: {0}")]
    Protocol(String),

    /// The session's tool channel has already been released.
    #[error("session is closed")]
    Closed,
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
