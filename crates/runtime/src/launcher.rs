//! Endpoint locator validation and interpreter selection.
//!
//! A tool endpoint is a filesystem path whose extension selects the
//! interpreter that launches it. The recognized set is a configuration point:
//! the defaults cover Node and Python scripts, and deployments may register
//! additional kinds.

use crate::error::{Error, Result};
use mcp::ServerConfig;
use std::collections::HashMap;
use std::path::Path;

/// One recognized script kind: an extension and the command that runs it.
#[derive(Debug, Clone)]
pub struct Launcher {
    pub extension: String,
    pub command: String,
}

impl Launcher {
    pub fn new(extension: impl Into<String>, command: impl Into<String>) -> Self {
        Self {
            extension: extension.into(),
            command: command.into(),
        }
    }
}

/// The set of recognized script kinds.
#[derive(Debug, Clone)]
pub struct LauncherSet {
    entries: Vec<Launcher>,
}

impl Default for LauncherSet {
    fn default() -> Self {
        Self {
            entries: vec![
                Launcher::new("js", "node"),
                Launcher::new("py", python_command()),
            ],
        }
    }
}

fn python_command() -> &'static str {
    if cfg!(windows) { "python" } else { "python3" }
}

impl LauncherSet {
    /// Register a kind, replacing any existing entry for the same extension.
    pub fn register(&mut self, launcher: Launcher) {
        self.entries.retain(|l| l.extension != launcher.extension);
        self.entries.push(launcher);
    }

    /// Resolve a script path into a spawnable server configuration.
    ///
    /// Fails before any process is spawned if the extension is not a
    /// recognized kind or the path is not valid UTF-8.
    pub fn resolve(&self, script: impl AsRef<Path>) -> Result<ServerConfig> {
        let script = script.as_ref();

        let extension = script
            .extension()
            .and_then(|e| e.to_str())
            .ok_or_else(|| {
                Error::Config(format!(
                    "server script has no extension: {}",
                    script.display()
                ))
            })?;

        let launcher = self
            .entries
            .iter()
            .find(|l| l.extension == extension)
            .ok_or_else(|| {
                let known = self
                    .entries
                    .iter()
                    .map(|l| format!(".{}", l.extension))
                    .collect::<Vec<_>>()
                    .join(", ");
                Error::Config(format!(
                    "unrecognized server script kind .{extension} (expected one of: {known})"
                ))
            })?;

        let script_path = script
            .to_str()
            .ok_or_else(|| {
                Error::Config(format!(
                    "server script path is not valid UTF-8: {}",
                    script.display()
                ))
            })?
            .to_string();

        let name = script
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("server")
            .to_string();

        Ok(ServerConfig {
            name,
            command: launcher.command.clone(),
            args: vec![script_path],
            env: HashMap::new(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn js_resolves_to_node() {
        let config = LauncherSet::default().resolve("build/server.js").unwrap();
        assert_eq!(config.command, "node");
        assert_eq!(config.args, vec!["build/server.js"]);
        assert_eq!(config.name, "server");
    }

    #[test]
    fn py_resolves_to_python() {
        let config = LauncherSet::default().resolve("weather.py").unwrap();
        assert!(config.command.starts_with("python"));
    }

    #[test]
    fn unrecognized_kind_is_a_config_error() {
        let err = LauncherSet::default().resolve("server.rb").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
        assert!(err.to_string().contains(".rb"));
    }

    #[test]
    fn missing_extension_is_a_config_error() {
        let err = LauncherSet::default().resolve("server").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn registered_kind_overrides_default() {
        let mut set = LauncherSet::default();
        set.register(Launcher::new("js", "deno"));
        set.register(Launcher::new("rb", "ruby"));

        assert_eq!(set.resolve("a.js").unwrap().command, "deno");
        assert_eq!(set.resolve("a.rb").unwrap().command, "ruby");
    }
}
