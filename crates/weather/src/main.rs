//! Singapore temperature MCP server.
//!
//! Exposes one tool, `get-temperature`, over stdio. Stdout is the protocol
//! channel, so all logging goes to stderr.

mod datagov;

use datagov::TemperatureClient;
use mcp::{CallToolResult, Service};
use serde_json::json;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const FETCH_FAILED_TEXT: &str = "Failed to retrieve weather data";

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run().await {
        eprintln!("Fatal error: {e}");
        std::process::exit(1);
    }
}

async fn run() -> mcp::Result<()> {
    let temperatures = TemperatureClient::new();

    let service = Service::new("monsoon-weather", env!("CARGO_PKG_VERSION")).tool(
        "get-temperature",
        "Get the current air temperature in Singapore",
        json!({"type": "object", "properties": {}, "required": []}),
        move |_args| {
            let temperatures = temperatures.clone();
            async move {
                match temperatures.current_report().await {
                    Ok(report) => CallToolResult::text(report),
                    Err(e) => {
                        // A failed fetch is still a well-formed tool result.
                        warn!(error = %e, "temperature fetch failed");
                        CallToolResult::text(FETCH_FAILED_TEXT)
                    }
                }
            }
        },
    );

    info!("weather MCP server running on stdio");
    service.run().await
}
