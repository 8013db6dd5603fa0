//! T-SQL (SQL Server / Azure SQL) dialect.
//!
//! T-SQL has significant differences from ANSI:
//! - Square bracket identifier quoting (`[name]`)
//! - No native boolean (1/0)
//! - N'...' prefix on every string literal
//! - `0x…` binary literals
//! - `@pN` bind parameters
//! - No arrays, ranges, regular expressions or JSON path operators

use super::helpers;
use super::SqlDialect;

/// T-SQL (SQL Server) dialect.
#[derive(Debug, Clone, Copy)]
pub struct TSql;

impl SqlDialect for TSql {
    fn name(&self) -> &'static str {
        "mssql"
    }

    fn quote_identifier(&self, ident: &str) -> String {
        helpers::quote_bracket(ident)
    }

    fn quote_string(&self, s: &str) -> String {
        helpers::quote_string_unicode(s)
    }

    fn format_bool(&self, b: bool) -> &'static str {
        helpers::format_bool_numeric(b)
    }

    fn format_buffer(&self, bytes: &[u8]) -> String {
        format!("0x{}", helpers::hex(bytes))
    }

    fn placeholder(&self, index: usize) -> String {
        format!("@p{}", index)
    }
}
