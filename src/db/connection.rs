//! Single-use database connections.
//!
//! Each tool call opens its own connection from the configured settings
//! and closes it when the call finishes. No pooling is involved.

use crate::config::DatabaseConfig;
use crate::error::{DbError, DbResult};
use crate::models::Dialect;
use sqlx::mysql::{MySqlConnectOptions, MySqlConnection};
use sqlx::sqlite::{SqliteConnectOptions, SqliteConnection};
use sqlx::{ConnectOptions, Connection};
use std::str::FromStr;
use tracing::{debug, info};

/// Dialect-specific connection (avoids AnyConnection limitations).
#[derive(Debug)]
pub enum DbConnection {
    MySql(MySqlConnection),
    Sqlite(SqliteConnection),
}

impl DbConnection {
    /// Open a connection for the given configuration.
    ///
    /// Every driver failure here is reported as a connection error, including
    /// a MySQL URL the driver cannot parse. SQLite files are opened read-only
    /// by path and are never created.
    pub async fn open(config: &DatabaseConfig) -> DbResult<Self> {
        match config.db_type {
            Dialect::MySql => {
                let connection_string = config.connection_string()?;
                log_target(config);

                let mut options = MySqlConnectOptions::from_str(&connection_string).map_err(|e| {
                    DbError::connection(
                        format!("Invalid MySQL connection string: {}", e),
                        "Check DB_HOST, DB_PORT, DB_USER and DB_PASS",
                    )
                })?;
                if !config.charset.is_empty() {
                    options = options.charset(&config.charset);
                }

                let conn = options.connect().await.map_err(|e| {
                    DbError::connection(
                        format!("Failed to connect: {}", e),
                        connection_suggestion(config.db_type, &e),
                    )
                })?;
                Ok(Self::MySql(conn))
            }
            Dialect::Sqlite => {
                // Raw file name; never parsed as a URL
                let options = SqliteConnectOptions::new()
                    .filename(config.sqlite_path()?)
                    .read_only(true)
                    .create_if_missing(false);
                log_target(config);

                let conn = options.connect().await.map_err(|e| {
                    DbError::connection(
                        format!("Failed to connect: {}", e),
                        connection_suggestion(config.db_type, &e),
                    )
                })?;
                Ok(Self::Sqlite(conn))
            }
        }
    }

    /// Get the dialect of this connection.
    pub fn dialect(&self) -> Dialect {
        match self {
            Self::MySql(_) => Dialect::MySql,
            Self::Sqlite(_) => Dialect::Sqlite,
        }
    }

    /// Close the connection, logging rather than returning close failures.
    pub async fn close(self) {
        let dialect = self.dialect();
        let result = match self {
            Self::MySql(conn) => conn.close().await,
            Self::Sqlite(conn) => conn.close().await,
        };
        match result {
            Ok(()) => debug!(db_type = %dialect, "Connection closed"),
            Err(e) => debug!(db_type = %dialect, error = %e, "Error while closing connection"),
        }
    }
}

fn log_target(config: &DatabaseConfig) {
    info!(
        db_type = %config.db_type,
        target = %config.masked_connection_string(),
        "Connecting to database"
    );
}

/// Build an actionable hint from a connect failure.
fn connection_suggestion(db_type: Dialect, error: &sqlx::Error) -> String {
    let error_str = error.to_string().to_lowercase();

    if error_str.contains("connection refused") {
        return format!(
            "Check that the {} server is running and accessible",
            db_type
        );
    }

    if error_str.contains("access denied") || error_str.contains("password") {
        return "Verify DB_USER and DB_PASS".to_string();
    }

    if error_str.contains("unknown database") {
        return "Check that the database name exists".to_string();
    }

    if error_str.contains("tls") || error_str.contains("ssl") {
        return "Check TLS/SSL configuration or try disabling it".to_string();
    }

    match db_type {
        Dialect::MySql => "Verify DB_HOST and DB_PORT point to a MySQL server".to_string(),
        Dialect::Sqlite => "Verify the database file exists and is readable".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ErrorType;

    #[test]
    fn test_suggestion_for_refused_connection() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "Connection refused");
        let suggestion = connection_suggestion(Dialect::MySql, &sqlx::Error::Io(io));
        assert!(suggestion.contains("MySQL server is running"));
    }

    #[test]
    fn test_suggestion_falls_back_per_dialect() {
        let err = sqlx::Error::Protocol("unexpected packet".to_string());
        assert!(connection_suggestion(Dialect::Sqlite, &err).contains("file exists"));
        assert!(connection_suggestion(Dialect::MySql, &err).contains("DB_HOST"));
    }

    #[tokio::test]
    async fn test_open_missing_sqlite_file_is_connection_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.db");
        let config = DatabaseConfig::sqlite(path.to_string_lossy());

        let err = DbConnection::open(&config).await.unwrap_err();
        assert_eq!(err.error_type(), ErrorType::ConnectionError);
        assert!(!path.exists(), "read-only open must not create the file");
    }

    #[tokio::test]
    async fn test_open_empty_sqlite_path_is_generic_error() {
        let err = DbConnection::open(&DatabaseConfig::sqlite(""))
            .await
            .unwrap_err();
        assert_eq!(err.error_type(), ErrorType::GenericError);
    }

    #[tokio::test]
    async fn test_open_and_close_sqlite() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let config = DatabaseConfig::sqlite(file.path().to_string_lossy());

        let conn = DbConnection::open(&config).await.unwrap();
        assert_eq!(conn.dialect(), Dialect::Sqlite);
        conn.close().await;
    }
}
