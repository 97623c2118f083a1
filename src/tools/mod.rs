//! MCP tool implementations.
//!
//! This module contains the table listing tool:
//! - `show_tables`: List tables with pagination, name filtering and comments
//! - `paging`: Filtering and pagination helpers used by `show_tables`

pub mod paging;
pub mod show_tables;

pub use paging::{DEFAULT_PAGE, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE, PageRequest};
pub use show_tables::{ShowTablesInput, ShowTablesToolHandler, TablePage, collect_page};
