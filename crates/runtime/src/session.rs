//! Session lifecycle: connect, invoke, release.

use crate::error::{Error, Result};
use crate::launcher::LauncherSet;
use crate::model::{Backend, ToolSpec};
use crate::orchestrator::Orchestrator;
use crate::tools::{McpToolHost, ToolHost};
use std::path::Path;
use tracing::info;

/// A single client session: one model backend, one exclusively-owned tool
/// channel, one catalog fetched at connect time.
pub struct Session<B: Backend> {
    backend: B,
    tools: Option<McpToolHost>,
}

impl<B: Backend> Session<B> {
    /// Validate the endpoint locator, spawn the tool server, and fetch the
    /// catalog.
    pub async fn open(
        script: impl AsRef<Path>,
        backend: B,
        launchers: &LauncherSet,
    ) -> Result<Self> {
        let config = launchers.resolve(script)?;
        let tools = McpToolHost::spawn(config).await?;

        info!(
            tools = ?tools.catalog().iter().map(|t| t.name.as_str()).collect::<Vec<_>>(),
            "session connected"
        );

        Ok(Self {
            backend,
            tools: Some(tools),
        })
    }

    /// The tool catalog fetched at connect time. Empty once closed.
    pub fn catalog(&self) -> &[ToolSpec] {
        self.tools.as_ref().map(McpToolHost::catalog).unwrap_or(&[])
    }

    /// Answer one prompt through the orchestration loop.
    pub async fn invoke(&self, prompt: &str) -> Result<String> {
        let tools = self.tools.as_ref().ok_or(Error::Closed)?;
        Orchestrator::new(&self.backend, tools).run(prompt).await
    }

    /// Release the tool channel.
    ///
    /// Never fails and may be called repeatedly; it must run even after a
    /// failed invoke.
    pub async fn close(&mut self) {
        if let Some(tools) = self.tools.take() {
            tools.shutdown().await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ModelError, ModelRequest, ModelResponse};

    struct UnreachableBackend;

    impl Backend for UnreachableBackend {
        async fn complete(
            &self,
            _request: ModelRequest<'_>,
        ) -> std::result::Result<ModelResponse, ModelError> {
            Err(ModelError::Network("unreachable".into()))
        }
    }

    fn closed_session() -> Session<UnreachableBackend> {
        Session {
            backend: UnreachableBackend,
            tools: None,
        }
    }

    #[tokio::test]
    async fn close_is_idempotent() {
        let mut session = closed_session();
        session.close().await;
        session.close().await;
    }

    #[tokio::test]
    async fn invoke_after_close_is_an_error() {
        let mut session = closed_session();
        session.close().await;
        let err = session.invoke("hi").await.unwrap_err();
        assert!(matches!(err, Error::Closed));
    }

    #[tokio::test]
    async fn closed_session_has_empty_catalog() {
        assert!(closed_session().catalog().is_empty());
    }

    #[tokio::test]
    async fn open_with_bad_locator_fails_before_spawn() {
        let result = Session::open("server.rb", UnreachableBackend, &LauncherSet::default()).await;
        assert!(matches!(result, Err(Error::Config(_))));
    }
}
