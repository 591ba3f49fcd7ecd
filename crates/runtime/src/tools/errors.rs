use thiserror::Error;

/// Errors from tool invocation.
#[derive(Debug, Clone, Error)]
pub enum ToolError {
    /// The requested name is not in the session's catalog.
    #[error("tool not found: {0}")]
    NotFound(String),

    /// The tool process reported an internal error.
    #[error("execution failed: {0}")]
    Execution(String),
}
