//! Server-side MCP service: a tool registry behind a stdio JSON-RPC loop.

use std::future::Future;
use std::pin::Pin;

use serde_json::Value;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{debug, warn};

use crate::error::Result;
use crate::protocol::{
    CallToolParams, CallToolResult, InitializeResult, JsonRpcError, JsonRpcIncoming,
    JsonRpcResponse, ListToolsResult, PROTOCOL_VERSION, PeerInfo, RequestId, ServerCapabilities,
    Tool, ToolsCapability,
};

type ToolFuture = Pin<Box<dyn Future<Output = CallToolResult> + Send + 'static>>;
type ToolHandler = Box<dyn Fn(Option<Value>) -> ToolFuture + Send + Sync>;

struct RegisteredTool {
    tool: Tool,
    handler: ToolHandler,
}

/// An MCP service hosting a set of tools over stdio.
///
/// Registration order is preserved in `tools/list`. Stdout carries the
/// protocol; anything else (logging) must go to stderr.
pub struct Service {
    info: PeerInfo,
    tools: Vec<RegisteredTool>,
}

impl Service {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            info: PeerInfo {
                name: name.into(),
                version: Some(version.into()),
            },
            tools: Vec::new(),
        }
    }

    /// Register a tool with its async handler.
    pub fn tool<F, Fut>(
        mut self,
        name: impl Into<String>,
        description: impl Into<String>,
        input_schema: Value,
        handler: F,
    ) -> Self
    where
        F: Fn(Option<Value>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = CallToolResult> + Send + 'static,
    {
        self.tools.push(RegisteredTool {
            tool: Tool {
                name: name.into(),
                description: Some(description.into()),
                input_schema,
            },
            handler: Box::new(move |args| Box::pin(handler(args))),
        });
        self
    }

    /// Serve over the process's stdin/stdout until EOF.
    pub async fn run(self) -> Result<()> {
        let stdin = BufReader::new(tokio::io::stdin());
        let stdout = tokio::io::stdout();
        self.serve(stdin, stdout).await
    }

    /// Serve over an arbitrary channel. One JSON message per line.
    pub async fn serve<R, W>(self, mut reader: R, mut writer: W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut line = String::new();
        loop {
            line.clear();
            let bytes_read = reader.read_line(&mut line).await?;
            if bytes_read == 0 {
                return Ok(());
            }
            if line.trim().is_empty() {
                continue;
            }

            let incoming: JsonRpcIncoming = match serde_json::from_str(&line) {
                Ok(msg) => msg,
                Err(e) => {
                    warn!(error = %e, "discarding unparseable message");
                    continue;
                }
            };

            // Notifications carry no ID and get no reply.
            let Some(id) = incoming.id.clone() else {
                debug!(method = %incoming.method, "notification received");
                continue;
            };

            let response = self.dispatch(id, &incoming.method, incoming.params).await;
            let response_json = serde_json::to_string(&response)?;
            writer.write_all(response_json.as_bytes()).await?;
            writer.write_all(b"\n").await?;
            writer.flush().await?;
        }
    }

    async fn dispatch(&self, id: RequestId, method: &str, params: Option<Value>) -> JsonRpcResponse {
        match method {
            "initialize" => {
                let result = InitializeResult {
                    protocol_version: PROTOCOL_VERSION.to_string(),
                    capabilities: ServerCapabilities {
                        tools: Some(ToolsCapability::default()),
                    },
                    server_info: self.info.clone(),
                };
                Self::to_success(id, &result)
            }
            "tools/list" => {
                let result = ListToolsResult {
                    tools: self.tools.iter().map(|r| r.tool.clone()).collect(),
                };
                Self::to_success(id, &result)
            }
            "tools/call" => {
                let params: CallToolParams = match params
                    .ok_or_else(|| JsonRpcError::invalid_params("missing params"))
                    .and_then(|p| {
                        serde_json::from_value(p)
                            .map_err(|e| JsonRpcError::invalid_params(e.to_string()))
                    }) {
                    Ok(p) => p,
                    Err(e) => return JsonRpcResponse::failure(id, e),
                };

                let Some(registered) = self.tools.iter().find(|r| r.tool.name == params.name)
                else {
                    return JsonRpcResponse::failure(
                        id,
                        JsonRpcError::invalid_params(format!("unknown tool: {}", params.name)),
                    );
                };

                debug!(tool = %params.name, "dispatching tool call");
                let result = (registered.handler)(params.arguments).await;
                Self::to_success(id, &result)
            }
            other => JsonRpcResponse::failure(id, JsonRpcError::method_not_found(other)),
        }
    }

    fn to_success(id: RequestId, result: &impl serde::Serialize) -> JsonRpcResponse {
        match serde_json::to_value(result) {
            Ok(value) => JsonRpcResponse::success(id, value),
            Err(e) => JsonRpcResponse::failure(id, JsonRpcError::internal(e.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn demo_service() -> Service {
        Service::new("test-service", "0.0.0").tool(
            "echo",
            "Echo the input back",
            json!({"type": "object"}),
            |args| async move {
                let text = args
                    .and_then(|a| a.get("text").and_then(|t| t.as_str().map(String::from)))
                    .unwrap_or_default();
                CallToolResult::text(text)
            },
        )
    }

    async fn roundtrip(service: Service, input: &str) -> Vec<JsonRpcResponse> {
        let mut output = Vec::new();
        service
            .serve(input.as_bytes(), &mut output)
            .await
            .unwrap();
        String::from_utf8(output)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect()
    }

    #[tokio::test]
    async fn initialize_handshake() {
        let input = r#"{"jsonrpc":"2.0","id":1,"method":"initialize","params":{"protocolVersion":"2024-11-05","clientInfo":{"name":"c"}}}"#.to_string() + "\n";
        let responses = roundtrip(demo_service(), &input).await;
        assert_eq!(responses.len(), 1);
        let result = responses[0].clone().into_result().unwrap();
        assert_eq!(result["protocolVersion"], "2024-11-05");
        assert_eq!(result["serverInfo"]["name"], "test-service");
    }

    #[tokio::test]
    async fn list_then_call() {
        let input = concat!(
            r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#,
            "\n",
            r#"{"jsonrpc":"2.0","id":2,"method":"tools/list"}"#,
            "\n",
            r#"{"jsonrpc":"2.0","id":3,"method":"tools/call","params":{"name":"echo","arguments":{"text":"hi"}}}"#,
            "\n",
        );
        let responses = roundtrip(demo_service(), input).await;
        // The notification gets no reply.
        assert_eq!(responses.len(), 2);

        let tools = responses[0].clone().into_result().unwrap();
        assert_eq!(tools["tools"][0]["name"], "echo");

        let call = responses[1].clone().into_result().unwrap();
        assert_eq!(call["content"][0]["text"], "hi");
    }

    #[tokio::test]
    async fn unknown_tool_is_an_error() {
        let input = r#"{"jsonrpc":"2.0","id":4,"method":"tools/call","params":{"name":"nope"}}"#
            .to_string()
            + "\n";
        let responses = roundtrip(demo_service(), &input).await;
        let err = responses[0].clone().into_result().unwrap_err();
        assert_eq!(err.code, JsonRpcError::INVALID_PARAMS);
    }

    #[tokio::test]
    async fn unknown_method_is_an_error() {
        let input = r#"{"jsonrpc":"2.0","id":5,"method":"resources/list"}"#.to_string() + "\n";
        let responses = roundtrip(demo_service(), &input).await;
        let err = responses[0].clone().into_result().unwrap_err();
        assert_eq!(err.code, JsonRpcError::METHOD_NOT_FOUND);
    }
}
