//! Model provider backends.

mod anthropic;

pub use anthropic::{AnthropicBackend, AnthropicBackendBuilder};
