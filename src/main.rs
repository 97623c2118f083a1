//! SQL Tables MCP Server - Main entry point.
//!
//! This server provides an MCP (Model Context Protocol) tool for AI assistants
//! to list the tables of a MySQL/MariaDB or SQLite database.

use sql_tables_mcp::config::Config;
use sql_tables_mcp::transport::{StdioTransport, Transport};
use std::sync::Arc;
use tracing::{error, info, info_span};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Initialize the tracing subscriber for logging.
///
/// Logs go to stderr; stdout carries the MCP protocol.
fn init_tracing(config: &Config) {
    if !config.enable_logs {
        return;
    }

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let subscriber = tracing_subscriber::registry().with(filter);

    if config.json_logs {
        subscriber
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        subscriber
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_thread_ids(false),
            )
            .init();
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse configuration from command line and environment
    let config = Config::parse_args();

    init_tracing(&config);

    let db_config = config.database_config();
    let root = info_span!("sql_tables_mcp", db_type = %db_config.db_type);

    info!(
        parent: &root,
        target_db = %db_config.masked_connection_string(),
        "Starting SQL Tables MCP Server v{}",
        env!("CARGO_PKG_VERSION")
    );

    let transport = StdioTransport::new(Arc::new(db_config), root.clone());
    info!(parent: &root, transport = transport.name(), "Using stdio transport");

    if let Err(e) = transport.run().await {
        error!(parent: &root, error = %e, "Server error");
        return Err(e.into());
    }

    info!(parent: &root, "Server shutdown complete");
    Ok(())
}
