//! The tool-invocation orchestration loop.
//!
//! The loop is fixed-depth by contract: one model call with the catalog
//! attached, at most one tool dispatch per returned block, and one plain
//! follow-up completion per dispatch. A tool call requested by the follow-up
//! response is never resolved. This keeps the whole run a function of
//! (prompt, catalog) with no termination heuristic.

use crate::error::{Error, Result};
use crate::model::{Backend, Message, ModelRequest, Part};
use crate::tools::{ToolError, ToolHost};
use tracing::debug;

/// Drives one round of "ask model, branch on content, optionally call a tool,
/// ask again with the result" and assembles the transcript.
pub struct Orchestrator<'a, B: Backend, T: ToolHost> {
    backend: &'a B,
    tools: &'a T,
}

impl<'a, B: Backend, T: ToolHost> Orchestrator<'a, B, T> {
    pub fn new(backend: &'a B, tools: &'a T) -> Self {
        Self { backend, tools }
    }

    /// Answer a prompt, resolving at most one level of tool calls.
    ///
    /// Returns the transcript: the model's text blocks, an audit line for
    /// every tool dispatched, and the follow-up text, joined with newlines.
    pub async fn run(&self, prompt: &str) -> Result<String> {
        let catalog = self.tools.catalog();

        let opening = [Message::user(prompt)];
        let request = ModelRequest {
            messages: &opening,
            tools: catalog,
        };
        let response = self.backend.complete(request).await?;

        let mut transcript: Vec<String> = Vec::new();

        for part in &response.message.parts {
            match part {
                Part::Text(text) => transcript.push(text.clone()),
                Part::ToolCall(call) => {
                    // The catalog is checked before anything is dispatched.
                    if !catalog.iter().any(|spec| spec.name == call.name) {
                        return Err(ToolError::NotFound(call.name.clone()).into());
                    }

                    debug!(tool = %call.name, "dispatching tool call");
                    let result = self.tools.invoke(&call.name, &call.input).await?;

                    // Audit line: what was called, not the model's answer.
                    transcript.push(format!(
                        "[Called tool {} with args {}]",
                        call.name, call.input
                    ));

                    let result_text = result
                        .content
                        .first()
                        .ok_or_else(|| Error::Protocol("empty tool result content".into()))?
                        .as_text()
                        .ok_or_else(|| {
                            Error::Protocol("tool result content is not text".into())
                        })?
                        .to_string();

                    // The follow-up is a plain completion with no catalog
                    // attached; a tool call in its response stays unresolved.
                    let followup = [Message::user(result_text)];
                    let request = ModelRequest {
                        messages: &followup,
                        tools: &[],
                    };
                    let response = self.backend.complete(request).await?;

                    // A non-text first block here is dropped, not a fault.
                    if let Some(Part::Text(text)) = response.message.parts.first() {
                        transcript.push(text.clone());
                    }
                }
                // Model responses carry text and tool calls only.
                Part::ToolResult { .. } => {}
            }
        }

        Ok(transcript.join("\n"))
    }
}
