//! MCP server integration module.
//!
//! This module connects the MCP protocol to the table listing tool using the
//! rmcp framework.

pub mod service;

pub use service::TablesService;
