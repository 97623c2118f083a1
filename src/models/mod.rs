//! Data models for the table listing server.
//!
//! This module re-exports all model types used throughout the application.

pub mod connection;
pub mod tables;

// Re-export commonly used types
pub use connection::Dialect;
pub use tables::{ErrorResult, ErrorType, PageResult, ShowTablesOutput, TableEntry};
