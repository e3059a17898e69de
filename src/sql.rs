//! MySQL statement formatting for the seed file.
//!
//! Table and column names are embedded unquoted, so callers must pass names
//! that satisfy [`is_identifier`]; [`crate::config::ConverterConfig::validate`]
//! enforces this before a run starts.

use once_cell::sync::Lazy;
use regex::Regex;

static IDENTIFIER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("valid identifier regex"));

/// True if `name` can be used as a bare table or column name.
pub fn is_identifier(name: &str) -> bool {
    IDENTIFIER_RE.is_match(name)
}

/// Escape a value for a single-quoted SQL string literal by doubling quotes.
pub fn escape_literal(value: &str) -> String {
    value.replace('\'', "''")
}

/// A one-column value tuple, e.g. `('O''Brien')`.
pub fn value_tuple(value: &str) -> String {
    format!("('{}')", escape_literal(value))
}

/// Table definition written at the top of the seed file.
pub fn create_table_statement(table: &str, column: &str, max_length: usize) -> String {
    format!(
        "CREATE TABLE IF NOT EXISTS {table} (\n    \
         id BIGINT AUTO_INCREMENT PRIMARY KEY,\n    \
         {column} VARCHAR({max_length}) NOT NULL UNIQUE,\n    \
         INDEX idx_{column} ({column})\n\
         );\n"
    )
}

/// One multi-row insert covering every tuple in `tuples`.
///
/// `INSERT IGNORE` lets the database drop rows that collide with the unique
/// constraint on `column`, so loading the same file into a table that already
/// holds some of the words succeeds and leaves existing rows untouched.
pub fn insert_ignore_statement(table: &str, column: &str, tuples: &[String]) -> String {
    format!(
        "INSERT IGNORE INTO {table} ({column}) VALUES {};\n",
        tuples.join(",")
    )
}
