//! Helpers for reading table definitions.
//!
//! SQLite has no native table comments, so a comment is conventionally stored
//! as a `/* ... */` block inside the `CREATE TABLE` statement.

use regex::Regex;
use std::sync::LazyLock;

// `.` does not cross newlines, so a block spanning lines is not a comment.
static BLOCK_COMMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"/\*\s*(.*?)\s*\*/").expect("Invalid block comment pattern")
});

/// Extract the first `/* ... */` block from DDL text.
///
/// Returns the inner text with surrounding whitespace removed, or `None`
/// when the statement has no single-line block comment.
///
/// # Examples
///
/// ```
/// use sql_tables_mcp::db::ddl::extract_block_comment;
///
/// let ddl = "CREATE TABLE orders /* Customer orders */ (id INTEGER)";
/// assert_eq!(extract_block_comment(ddl).as_deref(), Some("Customer orders"));
/// assert_eq!(extract_block_comment("CREATE TABLE t (id INTEGER)"), None);
/// ```
pub fn extract_block_comment(ddl: &str) -> Option<String> {
    if !ddl.contains("/*") || !ddl.contains("*/") {
        return None;
    }
    BLOCK_COMMENT
        .captures(ddl)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}
