//! SQL Tables MCP Server Library
//!
//! This library provides an MCP (Model Context Protocol) tool that lists the
//! tables of a MySQL/MariaDB or SQLite database, with name filtering,
//! pagination and table comments.

pub mod config;
pub mod db;
pub mod error;
pub mod mcp;
pub mod models;
pub mod tools;
pub mod transport;

pub use config::{Config, DatabaseConfig};
pub use error::DbError;
pub use mcp::TablesService;
