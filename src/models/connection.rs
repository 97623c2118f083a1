//! Connection-related data models.
//!
//! This module defines the SQL dialects the table lister understands.

use clap::ValueEnum;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Supported SQL dialects.
///
/// The dialect decides which introspection statements are issued when
/// listing tables and resolving table comments.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    /// Includes MariaDB
    #[value(name = "mysql", alias = "mariadb")]
    MySql,
    /// Embedded, file-based database
    #[value(name = "sqlite")]
    Sqlite,
}

impl Dialect {
    /// Parse a dialect from a configuration tag such as `mysql` or `SQLite`.
    pub fn from_tag(tag: &str) -> Option<Self> {
        <Self as ValueEnum>::from_str(tag.trim(), true).ok()
    }

    /// Get the display name for this dialect.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::MySql => "MySQL",
            Self::Sqlite => "SQLite",
        }
    }

    /// Get the default port for this dialect.
    pub fn default_port(&self) -> Option<u16> {
        match self {
            Self::MySql => Some(3306),
            Self::Sqlite => None,
        }
    }
}

impl std::fmt::Display for Dialect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_tag() {
        assert_eq!(Dialect::from_tag("mysql"), Some(Dialect::MySql));
        assert_eq!(Dialect::from_tag("MySQL"), Some(Dialect::MySql));
        assert_eq!(Dialect::from_tag("mariadb"), Some(Dialect::MySql));
        assert_eq!(Dialect::from_tag(" sqlite "), Some(Dialect::Sqlite));
        assert_eq!(Dialect::from_tag("postgres"), None);
        assert_eq!(Dialect::from_tag(""), None);
    }

    #[test]
    fn test_default_port() {
        assert_eq!(Dialect::MySql.default_port(), Some(3306));
        assert_eq!(Dialect::Sqlite.default_port(), None);
    }

    #[test]
    fn test_serde_lowercase() {
        assert_eq!(serde_json::to_string(&Dialect::MySql).unwrap(), "\"mysql\"");
        let parsed: Dialect = serde_json::from_str("\"sqlite\"").unwrap();
        assert_eq!(parsed, Dialect::Sqlite);
    }

    #[test]
    fn test_display() {
        assert_eq!(Dialect::MySql.to_string(), "MySQL");
        assert_eq!(Dialect::Sqlite.to_string(), "SQLite");
    }
}
