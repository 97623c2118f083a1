//! Database abstraction layer.
//!
//! This module provides database access functionality:
//! - Single-use connections per tool call
//! - Schema introspection per dialect
//! - Parsing of table definitions

pub mod connection;
pub mod ddl;
pub mod schema;

pub use connection::DbConnection;
pub use ddl::extract_block_comment;
pub use schema::{ConnectionIntrospector, MySqlIntrospector, SchemaIntrospector, SqliteIntrospector};
