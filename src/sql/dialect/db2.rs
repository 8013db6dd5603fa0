//! IBM Db2 SQL dialect.
//!
//! - ANSI identifier quoting (`"`)
//! - Second-precision timestamp literals
//! - `BLOB('…')` binary literals, `BLOB(X'…')` when the bytes are not UTF-8
//! - No arrays, ranges, regular expressions or JSON path operators

use chrono::{DateTime, FixedOffset};

use super::helpers;
use super::SqlDialect;

/// Db2 SQL dialect.
#[derive(Debug, Clone, Copy)]
pub struct Db2;

impl SqlDialect for Db2 {
    fn name(&self) -> &'static str {
        "db2"
    }

    fn quote_identifier(&self, ident: &str) -> String {
        helpers::quote_double(ident)
    }

    fn format_bool(&self, b: bool) -> &'static str {
        helpers::format_bool_literal(b)
    }

    fn format_date(&self, ts: &DateTime<FixedOffset>) -> String {
        helpers::format_date_seconds(ts)
    }

    fn format_buffer(&self, bytes: &[u8]) -> String {
        match std::str::from_utf8(bytes) {
            Ok(text) => format!("BLOB({})", self.quote_string(text)),
            Err(_) => format!("BLOB({})", helpers::format_buffer_hex(bytes)),
        }
    }
}
