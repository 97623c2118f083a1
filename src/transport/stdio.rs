//! Stdio transport.
//!
//! Stdout carries the protocol, so nothing else may write to it.

use crate::config::DatabaseConfig;
use crate::error::{DbError, DbResult};
use crate::mcp::TablesService;
use crate::transport::Transport;
use rmcp::{ServiceExt, transport::stdio};
use std::sync::Arc;
use tracing::{Span, info, warn};

/// Serves one MCP session over the process's stdin/stdout.
pub struct StdioTransport {
    config: Arc<DatabaseConfig>,
    span: Span,
}

impl StdioTransport {
    pub fn new(config: Arc<DatabaseConfig>, span: Span) -> Self {
        Self { config, span }
    }
}

/// Why the session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SessionEnd {
    ClientClosed,
    Signal(&'static str),
}

impl Transport for StdioTransport {
    fn name(&self) -> &'static str {
        "stdio"
    }

    async fn run(self) -> DbResult<()> {
        let Self { config, span } = self;
        let service = TablesService::new(config, span.clone());

        let session = service
            .serve(stdio())
            .await
            .map_err(|e| DbError::internal(format!("Failed to start stdio session: {}", e)))?;
        info!(parent: &span, "Stdio session started");

        let end = tokio::select! {
            outcome = session.waiting() => {
                outcome.map_err(|e| DbError::internal(format!("Stdio session failed: {}", e)))?;
                SessionEnd::ClientClosed
            }
            name = shutdown_signal() => SessionEnd::Signal(name),
        };

        match end {
            SessionEnd::ClientClosed => {
                info!(parent: &span, "Client closed the stdio session");
                Ok(())
            }
            SessionEnd::Signal(name) => {
                // The blocking stdin reader would keep the runtime alive
                info!(parent: &span, signal = name, "Stopping on signal");
                std::process::exit(0)
            }
        }
    }
}

/// Resolve with the name of the first termination signal received.
async fn shutdown_signal() -> &'static str {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => tokio::select! {
                _ = interrupt() => "SIGINT",
                _ = sigterm.recv() => "SIGTERM",
            },
            Err(e) => {
                warn!(error = %e, "SIGTERM handler unavailable");
                interrupt().await;
                "SIGINT"
            }
        }
    }

    #[cfg(not(unix))]
    {
        interrupt().await;
        "Ctrl+C"
    }
}

/// Wait for Ctrl+C; never resolves if the handler cannot be installed.
async fn interrupt() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Ctrl+C handler unavailable");
        std::future::pending::<()>().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stdio_transport_name() {
        let config = Arc::new(DatabaseConfig::sqlite("app.db"));
        let transport = StdioTransport::new(config, Span::none());
        assert_eq!(transport.name(), "stdio");
    }
}
