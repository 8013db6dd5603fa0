//! SQLite SQL dialect.
//!
//! SQLite features:
//! - Backtick identifier quoting
//! - No boolean type (1/0)
//! - `json_extract(col,'$.a.b')`
//! - Dates stored as ISO-8601 text inside JSON documents

use super::helpers;
use super::{JsonCoercion, JsonValueKind, SqlDialect};
use crate::sql::expr::PathSegment;
use crate::sql::token::TokenStream;

/// SQLite SQL dialect.
#[derive(Debug, Clone, Copy)]
pub struct Sqlite;

impl SqlDialect for Sqlite {
    fn name(&self) -> &'static str {
        "sqlite"
    }

    fn quote_identifier(&self, ident: &str) -> String {
        helpers::quote_backtick(ident)
    }

    fn format_bool(&self, b: bool) -> &'static str {
        helpers::format_bool_numeric(b)
    }

    fn supports_json(&self) -> bool {
        true
    }

    fn emit_json_path(&self, base: TokenStream, path: &[PathSegment]) -> Option<TokenStream> {
        let path = self.quote_string(&helpers::json_path_expression(path, false));
        Some(helpers::emit_json_extract("json_extract", base, path))
    }

    fn json_coercion(&self, kind: JsonValueKind) -> JsonCoercion {
        match kind {
            JsonValueKind::Text => JsonCoercion::None,
            JsonValueKind::Number => JsonCoercion::Cast("DOUBLE PRECISION"),
            JsonValueKind::Boolean => JsonCoercion::Cast("BOOLEAN"),
            JsonValueKind::Date => JsonCoercion::CompareAsText,
        }
    }
}
