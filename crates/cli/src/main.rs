mod config;
mod error;

use std::path::PathBuf;

use clap::{CommandFactory, Parser};
use runtime::{AnthropicBackend, Launcher, LauncherSet, Session};
use tracing_subscriber::EnvFilter;

use config::Config;
use error::{Error, Result};

const DEFAULT_PROMPT: &str = "What is Singapore weather now?";
const CONFIG_FILE: &str = "monsoon.toml";

#[derive(Parser)]
#[command(name = "monsoon")]
#[command(about = "Ask a model a question, with tools from an MCP server", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to the tool server script (.js or .py by default)
    server: Option<PathBuf>,

    /// The prompt to answer
    #[arg(short, long, default_value = DEFAULT_PROMPT)]
    prompt: String,

    /// Model to use (overrides the config file)
    #[arg(short, long)]
    model: Option<String>,

    /// Extra launcher kind, e.g. --launcher rb=ruby (repeatable)
    #[arg(long, value_name = "EXT=COMMAND", value_parser = parse_launcher)]
    launcher: Vec<(String, String)>,

    /// Config file path (default: monsoon.toml when present)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn parse_launcher(s: &str) -> std::result::Result<(String, String), String> {
    match s.split_once('=') {
        Some((ext, cmd)) if !ext.is_empty() && !cmd.is_empty() => {
            Ok((ext.trim_start_matches('.').to_string(), cmd.to_string()))
        }
        _ => Err(format!("expected EXT=COMMAND, got {s:?}")),
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let Some(server) = cli.server.clone() else {
        // Missing locator prints usage; that is not a failure.
        let _ = Cli::command().print_help();
        return;
    };

    // Completed runs exit zero even when the invocation failed; the fault is
    // logged and cleanup has already run.
    if let Err(e) = run(cli, server).await {
        eprintln!("\nError: {e}");
    }
}

async fn run(cli: Cli, server: PathBuf) -> Result<()> {
    let config = load_config(cli.config.as_deref())?;

    let api_key = config
        .backend
        .api_key
        .clone()
        .or_else(|| std::env::var("ANTHROPIC_API_KEY").ok())
        .ok_or(Error::MissingApiKey)?;

    let model = cli.model.unwrap_or_else(|| config.backend.model.clone());

    let backend = AnthropicBackend::builder(api_key, &model)
        .max_tokens(config.backend.max_tokens)
        .build();

    let mut launchers = LauncherSet::default();
    for (ext, command) in &config.launchers {
        launchers.register(Launcher::new(ext, command));
    }
    for (ext, command) in &cli.launcher {
        launchers.register(Launcher::new(ext, command));
    }

    println!("Prompt: {}", cli.prompt);
    println!("Model: {model}");

    let mut session = Session::open(&server, backend, &launchers).await?;
    println!(
        "Connected to server with tools: {:?}",
        session
            .catalog()
            .iter()
            .map(|t| t.name.as_str())
            .collect::<Vec<_>>()
    );

    // Close on every exit path, success or failure.
    let outcome = session.invoke(&cli.prompt).await;
    session.close().await;
    let transcript = outcome?;

    println!("\n{}", "-".repeat(50));
    println!("{transcript}");

    Ok(())
}

fn load_config(path: Option<&std::path::Path>) -> Result<Config> {
    match path {
        Some(path) => Ok(Config::load(path)?),
        None => {
            let default = std::path::Path::new(CONFIG_FILE);
            if default.exists() {
                Ok(Config::load(default)?)
            } else {
                Ok(Config::default())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn launcher_flag_parses() {
        assert_eq!(
            parse_launcher("rb=ruby").unwrap(),
            ("rb".to_string(), "ruby".to_string())
        );
        assert_eq!(
            parse_launcher(".ts=deno").unwrap(),
            ("ts".to_string(), "deno".to_string())
        );
        assert!(parse_launcher("ruby").is_err());
        assert!(parse_launcher("=ruby").is_err());
    }

    #[test]
    fn cli_parses_positional_server() {
        let cli = Cli::parse_from(["monsoon", "build/server.js"]);
        assert_eq!(cli.server.unwrap(), PathBuf::from("build/server.js"));
        assert_eq!(cli.prompt, DEFAULT_PROMPT);
    }

    #[test]
    fn cli_allows_missing_server() {
        let cli = Cli::parse_from(["monsoon"]);
        assert!(cli.server.is_none());
    }
}
