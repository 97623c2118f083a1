//! Table listing data models.
//!
//! This module defines the payloads returned by the `show_tables` tool.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// One listed table and its comment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct TableEntry {
    pub table_name: String,
    /// Empty when the table has no comment or the lookup failed
    pub table_comment: String,
    /// Present only when the comment lookup for this table failed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl TableEntry {
    /// Create an entry with a resolved comment.
    pub fn new(table_name: impl Into<String>, table_comment: impl Into<String>) -> Self {
        Self {
            table_name: table_name.into(),
            table_comment: table_comment.into(),
            error: None,
        }
    }

    /// Create an entry whose comment lookup failed.
    pub fn failed(table_name: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            table_name: table_name.into(),
            table_comment: String::new(),
            error: Some(error.into()),
        }
    }

    pub fn is_failed(&self) -> bool {
        self.error.is_some()
    }
}

/// A page of tables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct PageResult {
    /// Human-readable "page X of Y, Z tables total" summary
    pub message: String,
    /// Effective database name
    pub database: String,
    /// Number of tables after filtering
    pub total_tables: u64,
    pub page: u64,
    pub page_size: u64,
    pub total_pages: u64,
    pub tables: Vec<TableEntry>,
    /// Effective name filter, null when none was given
    pub table_name_filter: Option<String>,
}

/// Classification of a failed call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum ErrorType {
    /// Connectivity, authentication or driver failure
    ConnectionError,
    /// Any other failure
    GenericError,
}

impl std::fmt::Display for ErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ConnectionError => write!(f, "ConnectionError"),
            Self::GenericError => write!(f, "GenericError"),
        }
    }
}

/// Structured error returned instead of a page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ErrorResult {
    pub message: String,
    /// Always true
    pub error: bool,
    pub error_type: ErrorType,
    /// Hint on how to resolve the failure
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl ErrorResult {
    pub fn new(error_type: ErrorType, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            error: true,
            error_type,
            suggestion: None,
        }
    }

    /// Attach a resolution hint.
    pub fn with_suggestion(mut self, suggestion: Option<&str>) -> Self {
        self.suggestion = suggestion.map(str::to_string);
        self
    }
}

/// Return shape of the `show_tables` tool: either a page or an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum ShowTablesOutput {
    Page(PageResult),
    Error(ErrorResult),
}

impl ShowTablesOutput {
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }

    pub fn as_page(&self) -> Option<&PageResult> {
        match self {
            Self::Page(page) => Some(page),
            Self::Error(_) => None,
        }
    }

    pub fn as_error(&self) -> Option<&ErrorResult> {
        match self {
            Self::Page(_) => None,
            Self::Error(err) => Some(err),
        }
    }
}

impl From<PageResult> for ShowTablesOutput {
    fn from(page: PageResult) -> Self {
        Self::Page(page)
    }
}

impl From<ErrorResult> for ShowTablesOutput {
    fn from(err: ErrorResult) -> Self {
        Self::Error(err)
    }
}
