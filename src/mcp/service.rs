//! MCP service implementation using rmcp.
//!
//! This module defines the TablesService struct exposing the table listing
//! tool via the MCP protocol using the rmcp framework's macros.

use crate::config::DatabaseConfig;
use crate::tools::show_tables::{ShowTablesInput, ShowTablesToolHandler};
use rmcp::{
    ErrorData as McpError, ServerHandler,
    handler::server::tool::ToolRouter,
    handler::server::wrapper::Parameters,
    model::{CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router,
};
use std::sync::Arc;
use tracing::Span;

#[derive(Clone)]
pub struct TablesService {
    /// Default connection settings; calls may override the database name
    config: Arc<DatabaseConfig>,
    /// Parent span handed to every tool call
    span: Span,
    /// Tool router for MCP tool dispatch (auto-generated)
    tool_router: ToolRouter<Self>,
}

impl TablesService {
    /// Create a new TablesService instance.
    ///
    /// # Arguments
    ///
    /// * `config` - Database settings used by every tool call
    /// * `span` - Span under which tool calls are logged
    pub fn new(config: Arc<DatabaseConfig>, span: Span) -> Self {
        Self {
            config,
            span,
            tool_router: Self::tool_router(),
        }
    }
}

#[tool_router]
impl TablesService {
    #[tool(
        description = "List tables in the database with pagination.\nOptional `table_name` keeps tables whose name contains it (case-insensitive).\nEach table includes its comment (MySQL: table comment; SQLite: first /* ... */ block of its CREATE statement).\nDefaults: page=1, page_size=20. `database_name` overrides the configured database (a file path for SQLite)."
    )]
    async fn show_tables(
        &self,
        Parameters(input): Parameters<ShowTablesInput>,
    ) -> Result<CallToolResult, McpError> {
        let handler = ShowTablesToolHandler::new(self.config.clone(), self.span.clone());
        let output = handler.show_tables(input).await;

        let content = vec![Content::json(&output)?];
        if output.is_error() {
            Ok(CallToolResult::error(content))
        } else {
            Ok(CallToolResult::success(content))
        }
    }
}

#[tool_handler]
impl ServerHandler for TablesService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2025_03_26,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "sql-tables-mcp".to_owned(),
                title: Some("SQL Tables MCP Server".to_owned()),
                version: env!("CARGO_PKG_VERSION").to_owned(),
                icons: None,
                website_url: None,
            },
            instructions: Some(format!(
                "Lists tables of the configured {} database.\n\
                \n\
                ## Workflow\n\
                1. Call `show_tables` to get the first page of tables with their comments\n\
                2. Follow `total_pages` to request further pages\n\
                3. Narrow large schemas with `table_name` (substring, case-insensitive)\n\
                \n\
                ## Errors\n\
                Failures return `error: true` with `error_type` set to `ConnectionError` \
                (cannot reach or log in to the database) or `GenericError`.\n\
                A table whose comment cannot be read is still listed, with an `error` field.",
                self.config.db_type
            )),
        }
    }
}
