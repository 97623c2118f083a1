//! MCP transports.
//!
//! Only stdio is served: the client launches the server as a child process
//! and exchanges JSON-RPC over its stdin/stdout.

pub mod stdio;

pub use stdio::StdioTransport;

use crate::error::DbResult;
use std::future::Future;

/// A way of serving [`TablesService`](crate::mcp::TablesService) to a client.
pub trait Transport: Send {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Serve the session until the client disconnects or the process is asked to stop.
    fn run(self) -> impl Future<Output = DbResult<()>> + Send
    where
        Self: Sized;
}
