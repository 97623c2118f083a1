//! Schema introspection module.
//!
//! This module lists tables and resolves table comments for SQLite and MySQL.
//!
//! # Architecture
//!
//! SQL queries are organized in the `queries` submodule with constants for each
//! database type. Each dialect has an introspector implementing
//! [`SchemaIntrospector`] over a borrowed connection, so the paging pipeline
//! never branches on the dialect itself.

use crate::db::connection::DbConnection;
use crate::db::ddl::extract_block_comment;
use crate::error::{DbError, DbResult};
use crate::models::Dialect;
use sqlx::mysql::{MySqlConnection, MySqlRow};
use sqlx::sqlite::SqliteConnection;
use sqlx::Row;
use std::future::Future;
use tracing::debug;

/// Read-only access to a database catalog.
pub trait SchemaIntrospector: Send {
    /// Dialect whose catalog is being read.
    fn dialect(&self) -> Dialect;

    /// List every user table, in catalog order.
    fn list_tables(&mut self) -> impl Future<Output = DbResult<Vec<String>>> + Send;

    /// Resolve the comment of one table. Tables without a comment yield `""`.
    fn table_comment(&mut self, table: &str) -> impl Future<Output = DbResult<String>> + Send;
}

/// Introspector for whichever dialect a [`DbConnection`] speaks.
pub enum ConnectionIntrospector<'c> {
    MySql(MySqlIntrospector<'c>),
    Sqlite(SqliteIntrospector<'c>),
}

impl<'c> ConnectionIntrospector<'c> {
    pub fn new(conn: &'c mut DbConnection) -> Self {
        match conn {
            DbConnection::MySql(c) => Self::MySql(MySqlIntrospector::new(c)),
            DbConnection::Sqlite(c) => Self::Sqlite(SqliteIntrospector::new(c)),
        }
    }
}

impl SchemaIntrospector for ConnectionIntrospector<'_> {
    fn dialect(&self) -> Dialect {
        match self {
            Self::MySql(i) => i.dialect(),
            Self::Sqlite(i) => i.dialect(),
        }
    }

    async fn list_tables(&mut self) -> DbResult<Vec<String>> {
        match self {
            Self::MySql(i) => i.list_tables().await,
            Self::Sqlite(i) => i.list_tables().await,
        }
    }

    async fn table_comment(&mut self, table: &str) -> DbResult<String> {
        match self {
            Self::MySql(i) => i.table_comment(table).await,
            Self::Sqlite(i) => i.table_comment(table).await,
        }
    }
}

// =============================================================================
// SQL Query Templates
// =============================================================================

mod queries {
    pub mod mysql {
        pub const LIST_TABLES: &str = "SHOW TABLES";

        pub const TABLE_COMMENT: &str = r#"
            SELECT CONVERT(TABLE_COMMENT USING utf8mb4) AS TABLE_COMMENT
            FROM information_schema.TABLES
            WHERE TABLE_SCHEMA = DATABASE()
            AND TABLE_NAME = ?
            "#;
    }

    pub mod sqlite {
        pub const LIST_TABLES: &str = r#"
            SELECT name FROM sqlite_master
            WHERE type = 'table'
            AND name NOT LIKE 'sqlite_%'
            "#;

        pub const TABLE_DDL: &str = r#"
            SELECT sql FROM sqlite_master
            WHERE type = 'table'
            AND name = ?
            "#;
    }
}

// =============================================================================
// MySQL
// =============================================================================

/// Introspector backed by `SHOW TABLES` and `information_schema`.
pub struct MySqlIntrospector<'c> {
    conn: &'c mut MySqlConnection,
}

impl<'c> MySqlIntrospector<'c> {
    pub fn new(conn: &'c mut MySqlConnection) -> Self {
        Self { conn }
    }
}

/// Get an optional string from a MySQL row by index.
/// MySQL may return VARBINARY instead of VARCHAR depending on charset configuration.
fn mysql_string_at(row: &MySqlRow, index: usize) -> DbResult<Option<String>> {
    decode_text(row.try_get::<Option<String>, _>(index), || {
        row.try_get::<Option<Vec<u8>>, _>(index)
    })
}

/// Resolve a text column, falling back to its binary form.
///
/// Fails when neither form decodes or the bytes are not UTF-8.
fn decode_text(
    text: Result<Option<String>, sqlx::Error>,
    bytes: impl FnOnce() -> Result<Option<Vec<u8>>, sqlx::Error>,
) -> DbResult<Option<String>> {
    let text_err = match text {
        Ok(value) => return Ok(value),
        Err(e) => e,
    };
    match bytes() {
        Ok(None) => Ok(None),
        Ok(Some(raw)) => String::from_utf8(raw)
            .map(Some)
            .map_err(|e| DbError::internal(format!("Column is not valid UTF-8: {}", e))),
        Err(_) => Err(text_err.into()),
    }
}

impl SchemaIntrospector for MySqlIntrospector<'_> {
    fn dialect(&self) -> Dialect {
        Dialect::MySql
    }

    async fn list_tables(&mut self) -> DbResult<Vec<String>> {
        let rows = sqlx::query(queries::mysql::LIST_TABLES)
            .fetch_all(&mut *self.conn)
            .await?;

        // SHOW TABLES returns a single column "Tables_in_<database>"
        let mut tables = Vec::with_capacity(rows.len());
        for row in &rows {
            if let Some(name) = mysql_string_at(row, 0)?.filter(|name| !name.is_empty()) {
                tables.push(name);
            }
        }

        debug!(count = tables.len(), "Listed MySQL tables");
        Ok(tables)
    }

    async fn table_comment(&mut self, table: &str) -> DbResult<String> {
        let row = sqlx::query(queries::mysql::TABLE_COMMENT)
            .bind(table)
            .fetch_optional(&mut *self.conn)
            .await?;

        match row {
            Some(row) => Ok(mysql_string_at(&row, 0)?.unwrap_or_default()),
            None => Ok(String::new()),
        }
    }
}

// =============================================================================
// SQLite
// =============================================================================

/// Introspector backed by `sqlite_master`.
///
/// Comments are read from the `/* ... */` block of each table's `CREATE` statement.
pub struct SqliteIntrospector<'c> {
    conn: &'c mut SqliteConnection,
}

impl<'c> SqliteIntrospector<'c> {
    pub fn new(conn: &'c mut SqliteConnection) -> Self {
        Self { conn }
    }

    /// Fetch the `CREATE TABLE` statement of a table, if the table exists.
    pub async fn table_ddl(&mut self, table: &str) -> DbResult<Option<String>> {
        let ddl: Option<Option<String>> = sqlx::query_scalar(queries::sqlite::TABLE_DDL)
            .bind(table)
            .fetch_optional(&mut *self.conn)
            .await?;
        Ok(ddl.flatten())
    }
}

impl SchemaIntrospector for SqliteIntrospector<'_> {
    fn dialect(&self) -> Dialect {
        Dialect::Sqlite
    }

    async fn list_tables(&mut self) -> DbResult<Vec<String>> {
        let rows = sqlx::query(queries::sqlite::LIST_TABLES)
            .fetch_all(&mut *self.conn)
            .await?;

        let tables = rows
            .iter()
            .map(|row| row.try_get::<String, _>("name"))
            .collect::<Result<Vec<_>, _>>()?;

        debug!(count = tables.len(), "Listed SQLite tables");
        Ok(tables)
    }

    async fn table_comment(&mut self, table: &str) -> DbResult<String> {
        let ddl = self.table_ddl(table).await?;
        Ok(ddl
            .as_deref()
            .and_then(extract_block_comment)
            .unwrap_or_default())
    }
}
