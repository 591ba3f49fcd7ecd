use thiserror::Error;

/// Errors from LLM provider calls.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ModelError {
    /// A network error occurred during the API call.
    #[error("network: {0}")]
    Network(String),

    /// The provider returned an error response (includes auth and quota).
    #[error("provider api: {0}")]
    Api(String),

    /// The provider response body could not be parsed.
    #[error("invalid provider response: {0}")]
    InvalidResponse(String),
}
