//! Table listing tool.
//!
//! This module implements the `show_tables` MCP tool: open a connection,
//! enumerate tables for the dialect, filter and paginate them, then resolve
//! comments for the tables on the requested page only.

use crate::config::DatabaseConfig;
use crate::db::{ConnectionIntrospector, DbConnection, SchemaIntrospector};
use crate::error::{DbError, DbResult};
use crate::models::{ErrorResult, ErrorType, PageResult, ShowTablesOutput, TableEntry};
use crate::tools::paging::{
    DEFAULT_PAGE, DEFAULT_PAGE_SIZE, PageRequest, filter_tables, page_message, page_slice,
    total_pages,
};
use schemars::JsonSchema;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{Instrument, Span, debug, error, info, info_span, warn};

/// Input for the show_tables tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ShowTablesInput {
    /// Database to list. Defaults to the configured database (the file path for SQLite).
    #[serde(default)]
    pub database_name: Option<String>,
    /// Page number starting at 1. Values below 1 are treated as 1. Default: 1
    #[serde(default = "default_page")]
    pub page: i64,
    /// Tables per page. Values below 1 are treated as 20; at most 1000. Default: 20
    #[serde(default = "default_page_size")]
    pub page_size: i64,
    /// Case-insensitive substring filter on table names
    #[serde(default)]
    pub table_name: Option<String>,
}

fn default_page() -> i64 {
    DEFAULT_PAGE as i64
}

fn default_page_size() -> i64 {
    DEFAULT_PAGE_SIZE as i64
}

impl Default for ShowTablesInput {
    fn default() -> Self {
        Self {
            database_name: None,
            page: default_page(),
            page_size: default_page_size(),
            table_name: None,
        }
    }
}

/// Filtered and paginated tables, before the result message is assembled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TablePage {
    /// Count after filtering
    pub total_tables: u64,
    pub total_pages: u64,
    pub tables: Vec<TableEntry>,
}

/// Enumerate, filter and paginate tables, then resolve comments for the page.
///
/// A failing comment lookup is recorded on that table's entry and does not
/// abort the listing. Failing to enumerate tables does.
pub async fn collect_page<I: SchemaIntrospector>(
    introspector: &mut I,
    request: &PageRequest,
) -> DbResult<TablePage> {
    let all_tables = introspector.list_tables().await?;
    let catalog_count = all_tables.len();

    let tables = filter_tables(all_tables, request.filter.as_deref());
    let total_tables = tables.len() as u64;
    let total_pages = total_pages(total_tables, request.page_size);

    let selected = page_slice(&tables, request);
    let mut entries = Vec::with_capacity(selected.len());
    for name in selected {
        let entry = match introspector.table_comment(name).await {
            Ok(comment) => TableEntry::new(name.as_str(), comment),
            Err(e) => {
                warn!(table = %name, error = %e, "Failed to resolve table comment");
                TableEntry::failed(name.as_str(), e.to_string())
            }
        };
        entries.push(entry);
    }

    debug!(
        dialect = %introspector.dialect(),
        catalog_count,
        total_tables,
        returned = entries.len(),
        "Collected table page"
    );

    Ok(TablePage {
        total_tables,
        total_pages,
        tables: entries,
    })
}

/// Convert a call-level failure into the structured error payload.
pub fn error_result(err: &DbError) -> ErrorResult {
    let error_type = err.error_type();
    let message = match error_type {
        ErrorType::ConnectionError => format!("数据库连接失败: {}", err),
        ErrorType::GenericError => format!("操作失败: {}", err),
    };
    ErrorResult::new(error_type, message).with_suggestion(err.suggestion())
}

pub struct ShowTablesToolHandler {
    config: Arc<DatabaseConfig>,
    /// Parent span for every call handled here
    span: Span,
}

impl ShowTablesToolHandler {
    pub fn new(config: Arc<DatabaseConfig>, span: Span) -> Self {
        Self { config, span }
    }

    /// List one page of tables.
    ///
    /// Never fails: every error is reported as an [`ErrorResult`].
    pub async fn show_tables(&self, input: ShowTablesInput) -> ShowTablesOutput {
        let config = self.config.with_database(input.database_name.as_deref());
        let request = PageRequest::new(input.page, input.page_size, input.table_name);

        let span = info_span!(
            parent: &self.span,
            "show_tables",
            db_type = %config.db_type,
            database = %config.database_label(),
            page = request.page,
            page_size = request.page_size
        );

        async move {
            match self.list_page(&config, &request).await {
                Ok(page) => {
                    info!(
                        total_tables = page.total_tables,
                        returned = page.tables.len(),
                        filter = ?page.table_name_filter,
                        "Listed tables"
                    );
                    page.into()
                }
                Err(e) => {
                    error!(error = %e, error_type = %e.error_type(), "Failed to list tables");
                    error_result(&e).into()
                }
            }
        }
        .instrument(span)
        .await
    }

    async fn list_page(
        &self,
        config: &DatabaseConfig,
        request: &PageRequest,
    ) -> DbResult<PageResult> {
        let mut conn = DbConnection::open(config).await?;

        let result = {
            let mut introspector = ConnectionIntrospector::new(&mut conn);
            collect_page(&mut introspector, request).await
        };

        // Released on both paths before the result is inspected
        conn.close().await;
        let page = result?;

        Ok(PageResult {
            message: page_message(request.page, page.total_pages, page.total_tables),
            database: config.database_label().to_string(),
            total_tables: page.total_tables,
            page: request.page,
            page_size: request.page_size,
            total_pages: page.total_pages,
            tables: page.tables,
            table_name_filter: request.filter.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Dialect;

    /// In-memory catalog that records comment lookups.
    struct FakeIntrospector {
        dialect: Dialect,
        tables: Vec<String>,
        failing: Vec<String>,
        lookups: Vec<String>,
    }

    impl FakeIntrospector {
        fn server(count: usize) -> Self {
            Self {
                dialect: Dialect::MySql,
                tables: (0..count).map(|i| format!("table_{i:02}")).collect(),
                failing: Vec::new(),
                lookups: Vec::new(),
            }
        }

        fn with_tables(names: &[&str]) -> Self {
            Self {
                tables: names.iter().map(|n| n.to_string()).collect(),
                ..Self::server(0)
            }
        }
    }

    impl SchemaIntrospector for FakeIntrospector {
        fn dialect(&self) -> Dialect {
            self.dialect
        }

        async fn list_tables(&mut self) -> DbResult<Vec<String>> {
            Ok(self.tables.clone())
        }

        async fn table_comment(&mut self, table: &str) -> DbResult<String> {
            self.lookups.push(table.to_string());
            if self.failing.iter().any(|t| t == table) {
                return Err(DbError::database(
                    "Table metadata unavailable",
                    None,
                    "Check permissions",
                ));
            }
            Ok(format!("{table} comment"))
        }
    }

    struct BrokenCatalog;

    impl SchemaIntrospector for BrokenCatalog {
        fn dialect(&self) -> Dialect {
            Dialect::MySql
        }

        async fn list_tables(&mut self) -> DbResult<Vec<String>> {
            Err(DbError::database(
                "You have an error in your SQL syntax",
                Some("42000".to_string()),
                "Check the SQL syntax",
            ))
        }

        async fn table_comment(&mut self, _table: &str) -> DbResult<String> {
            unreachable!("comments are never looked up when listing fails")
        }
    }

    #[tokio::test]
    async fn test_second_page_of_45_tables() {
        let mut catalog = FakeIntrospector::server(45);
        let page = collect_page(&mut catalog, &PageRequest::new(2, 20, None))
            .await
            .unwrap();

        assert_eq!(page.total_tables, 45);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.tables.len(), 20);
        assert_eq!(page.tables[0].table_name, "table_20");
        assert_eq!(page.tables[19].table_name, "table_39");
        assert_eq!(page.tables[0].table_comment, "table_20 comment");
    }

    #[tokio::test]
    async fn test_comments_only_fetched_for_current_page() {
        let mut catalog = FakeIntrospector::server(45);
        collect_page(&mut catalog, &PageRequest::new(3, 20, None))
            .await
            .unwrap();

        assert_eq!(catalog.lookups.len(), 5);
        assert_eq!(catalog.lookups[0], "table_40");
    }

    #[tokio::test]
    async fn test_failed_comment_is_isolated() {
        let mut catalog = FakeIntrospector::with_tables(&["orders", "users", "audit"]);
        catalog.failing.push("users".to_string());

        let page = collect_page(&mut catalog, &PageRequest::default())
            .await
            .unwrap();

        assert_eq!(page.tables.len(), 3);
        let users = &page.tables[1];
        assert_eq!(users.table_name, "users");
        assert_eq!(users.table_comment, "");
        assert!(users.error.as_deref().unwrap().contains("metadata unavailable"));

        assert_eq!(page.tables[0], TableEntry::new("orders", "orders comment"));
        assert_eq!(page.tables[2], TableEntry::new("audit", "audit comment"));
    }

    #[tokio::test]
    async fn test_filter_counts_after_filtering() {
        let mut catalog =
            FakeIntrospector::with_tables(&["users", "orders", "users_log", "UserRoles"]);
        let request = PageRequest::new(1, 20, Some("User".to_string()));

        let page = collect_page(&mut catalog, &request).await.unwrap();

        assert_eq!(page.total_tables, 3);
        assert_eq!(page.total_pages, 1);
        let names: Vec<&str> = page.tables.iter().map(|t| t.table_name.as_str()).collect();
        assert_eq!(names, vec!["users", "users_log", "UserRoles"]);
    }

    #[tokio::test]
    async fn test_page_beyond_last_is_empty_not_error() {
        let mut catalog = FakeIntrospector::server(5);
        let page = collect_page(&mut catalog, &PageRequest::new(9, 20, None))
            .await
            .unwrap();

        assert!(page.tables.is_empty());
        assert_eq!(page.total_tables, 5);
        assert_eq!(page.total_pages, 1);
        assert!(catalog.lookups.is_empty());
    }

    #[tokio::test]
    async fn test_empty_catalog() {
        let mut catalog = FakeIntrospector::server(0);
        let page = collect_page(&mut catalog, &PageRequest::default())
            .await
            .unwrap();

        assert_eq!(page.total_tables, 0);
        assert_eq!(page.total_pages, 0);
        assert!(page.tables.is_empty());
    }

    #[tokio::test]
    async fn test_listing_failure_propagates() {
        let err = collect_page(&mut BrokenCatalog, &PageRequest::default())
            .await
            .unwrap_err();
        assert_eq!(err.error_type(), ErrorType::GenericError);
    }

    #[test]
    fn test_error_result_messages() {
        let conn = error_result(&DbError::connection("Access denied", "Verify DB_PASS"));
        assert_eq!(conn.error_type, ErrorType::ConnectionError);
        assert!(conn.error);
        assert!(conn.message.starts_with("数据库连接失败: "));
        assert!(conn.message.contains("Access denied"));
        assert_eq!(conn.suggestion.as_deref(), Some("Verify DB_PASS"));

        let generic = error_result(&DbError::internal("decode failed"));
        assert_eq!(generic.error_type, ErrorType::GenericError);
        assert!(generic.message.starts_with("操作失败: "));
        assert_eq!(generic.suggestion, None);
    }

    #[test]
    fn test_input_defaults() {
        let input: ShowTablesInput = serde_json::from_str("{}").unwrap();
        assert_eq!(input.page, 1);
        assert_eq!(input.page_size, 20);
        assert!(input.database_name.is_none());
        assert!(input.table_name.is_none());
    }

    #[test]
    fn test_input_accepts_non_positive_paging() {
        let input: ShowTablesInput =
            serde_json::from_str(r#"{"page": 0, "page_size": -5, "table_name": "user"}"#).unwrap();
        let request = PageRequest::new(input.page, input.page_size, input.table_name);
        assert_eq!(request, PageRequest::new(1, 20, Some("user".to_string())));
    }

    #[tokio::test]
    async fn test_handler_reports_connection_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.db");
        let config = Arc::new(DatabaseConfig::sqlite(missing.to_string_lossy()));
        let handler = ShowTablesToolHandler::new(config, Span::none());

        let output = handler.show_tables(ShowTablesInput::default()).await;

        let err = output.as_error().expect("expected an error result");
        assert_eq!(err.error_type, ErrorType::ConnectionError);
        assert!(err.suggestion.as_deref().unwrap().contains("file exists"));
    }
}
