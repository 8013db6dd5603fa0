//! Shared helper functions for SQL dialect implementations.
//!
//! This module provides reusable building blocks that dialects can compose
//! to implement the `SqlDialect` trait with minimal duplication.

use chrono::{DateTime, FixedOffset};

use crate::sql::expr::PathSegment;
use crate::sql::token::{Token, TokenStream};

// =============================================================================
// Identifier Quoting
// =============================================================================

/// Quote identifier with double quotes (ANSI style).
/// Used by: Postgres, Snowflake, Db2
pub fn quote_double(ident: &str) -> String {
    format!("\"{}\"", ident.replace('"', "\"\""))
}

/// Quote identifier with backticks.
/// Used by: MySQL, MariaDB, SQLite
pub fn quote_backtick(ident: &str) -> String {
    format!("`{}`", ident.replace('`', "``"))
}

/// Quote identifier with square brackets.
/// Used by: T-SQL (SQL Server, Azure SQL)
pub fn quote_bracket(ident: &str) -> String {
    format!("[{}]", ident.replace(']', "]]"))
}

// =============================================================================
// String Quoting
// =============================================================================

/// Quote string with single quotes (standard SQL).
/// Used by: SQLite, Snowflake, Db2
pub fn quote_string_single(s: &str) -> String {
    format!("'{}'", s.replace('\'', "''"))
}

/// Quote string with single quotes, switching to an `E'…'` escape string
/// when the text holds a backslash or NUL.
///
/// Plain literals follow `standard_conforming_strings`, so a backslash is
/// only an escape inside `E'…'`. NUL is written as the three-digit octal
/// `\000` so a following digit is never read as part of the escape.
/// Used by: Postgres
pub fn quote_string_escape_syntax(s: &str) -> String {
    if !s.contains(['\\', '\0']) {
        return quote_string_single(s);
    }
    let mut out = String::with_capacity(s.len() + 3);
    out.push_str("E'");
    for c in s.chars() {
        match c {
            '\0' => out.push_str("\\000"),
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("''"),
            other => out.push(other),
        }
    }
    out.push('\'');
    out
}

/// Quote string with N prefix for Unicode (T-SQL).
pub fn quote_string_unicode(s: &str) -> String {
    format!("N'{}'", s.replace('\'', "''"))
}

/// Quote string using backslash escapes.
/// Used by: MySQL, MariaDB
pub fn quote_string_backslash(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('\'');
    for c in s.chars() {
        match c {
            '\0' => out.push_str("\\0"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\u{8}' => out.push_str("\\b"),
            '\t' => out.push_str("\\t"),
            '\u{1a}' => out.push_str("\\Z"),
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '"' => out.push_str("\\\""),
            other => out.push(other),
        }
    }
    out.push('\'');
    out
}

// =============================================================================
// Boolean Formatting
// =============================================================================

/// Format boolean as literal true/false.
/// Used by: Postgres, MySQL, MariaDB, Snowflake, Db2
pub fn format_bool_literal(b: bool) -> &'static str {
    if b {
        "true"
    } else {
        "false"
    }
}

/// Format boolean as numeric 1/0.
/// Used by: T-SQL, SQLite
pub fn format_bool_numeric(b: bool) -> &'static str {
    if b {
        "1"
    } else {
        "0"
    }
}

// =============================================================================
// Dates and Binary
// =============================================================================

/// `YYYY-MM-DD HH:MM:SS.mmm +HH:MM`
pub fn format_date_with_offset(ts: &DateTime<FixedOffset>) -> String {
    ts.format("%Y-%m-%d %H:%M:%S%.3f %:z").to_string()
}

/// `YYYY-MM-DD HH:MM:SS.mmm`
pub fn format_date_millis(ts: &DateTime<FixedOffset>) -> String {
    ts.format("%Y-%m-%d %H:%M:%S%.3f").to_string()
}

/// `YYYY-MM-DD HH:MM:SS`
pub fn format_date_seconds(ts: &DateTime<FixedOffset>) -> String {
    ts.format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Lowercase hex encoding of a byte slice.
pub fn hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

/// `X'…'` hex literal.
/// Used by: MySQL, MariaDB, SQLite, Snowflake
pub fn format_buffer_hex(bytes: &[u8]) -> String {
    format!("X'{}'", hex(bytes))
}

// =============================================================================
// JSON Paths
// =============================================================================

/// Postgres text-array path: `{a,b,0}`.
pub fn pg_path_array(path: &[PathSegment]) -> String {
    let parts: Vec<String> = path
        .iter()
        .map(|seg| match seg {
            PathSegment::Key(k) if needs_pg_array_quoting(k) => {
                format!("\"{}\"", k.replace('\\', "\\\\").replace('"', "\\\""))
            }
            PathSegment::Key(k) => k.clone(),
            PathSegment::Index(i) => i.to_string(),
        })
        .collect();
    format!("{{{}}}", parts.join(","))
}

fn needs_pg_array_quoting(key: &str) -> bool {
    key.is_empty()
        || key
            .chars()
            .any(|c| matches!(c, ',' | '{' | '}' | '"' | '\\') || c.is_whitespace())
}

/// JSONPath expression `$.a.b[0]`; with `quote_keys`, members are written as `$."a"."b"`.
pub fn json_path_expression(path: &[PathSegment], quote_keys: bool) -> String {
    let mut out = String::from("$");
    for seg in path {
        match seg {
            PathSegment::Key(k) if quote_keys => {
                out.push_str(".\"");
                out.push_str(&k.replace('"', "\\\""));
                out.push('"');
            }
            PathSegment::Key(k) => {
                out.push('.');
                out.push_str(k);
            }
            PathSegment::Index(i) => {
                out.push_str(&format!("[{}]", i));
            }
        }
    }
    out
}

/// `fn_name(base,'<path>')`
pub fn emit_json_extract(fn_name: &str, base: TokenStream, path: String) -> TokenStream {
    let mut ts = TokenStream::new();
    ts.push(Token::FunctionName(fn_name.into()))
        .lparen()
        .append(&base)
        .comma()
        .push(Token::PathLiteral(path))
        .rparen();
    ts
}

/// `json_unquote(json_extract(base,'<path>'))`
pub fn emit_json_unquote_extract(base: TokenStream, path: String) -> TokenStream {
    let mut ts = TokenStream::new();
    ts.push(Token::FunctionName("json_unquote".into()))
        .lparen()
        .append(&emit_json_extract("json_extract", base, path))
        .rparen();
    ts
}
