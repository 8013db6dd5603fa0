//! PostgreSQL SQL dialect.
//!
//! PostgreSQL features:
//! - ANSI identifier quoting (`"`)
//! - Native boolean type (true/false)
//! - `E'\\x…'` bytea literals
//! - Arrays, range types and `tsvector` full-text matching
//! - POSIX regular expression operators (`~`, `~*`)
//! - `#>>` JSON path extraction

use super::helpers;
use super::{JsonCoercion, JsonValueKind, SqlDialect};
use crate::sql::expr::PathSegment;
use crate::sql::operator::Op;
use crate::sql::token::{Token, TokenStream};

/// PostgreSQL SQL dialect.
#[derive(Debug, Clone, Copy)]
pub struct Postgres;

impl SqlDialect for Postgres {
    fn name(&self) -> &'static str {
        "postgres"
    }

    fn quote_identifier(&self, ident: &str) -> String {
        helpers::quote_double(ident)
    }

    fn quote_string(&self, s: &str) -> String {
        helpers::quote_string_escape_syntax(s)
    }

    fn format_bool(&self, b: bool) -> &'static str {
        helpers::format_bool_literal(b)
    }

    fn format_buffer(&self, bytes: &[u8]) -> String {
        format!("E'\\\\x{}'", helpers::hex(bytes))
    }

    fn placeholder(&self, index: usize) -> String {
        format!("${}", index)
    }

    fn supports_arrays(&self) -> bool {
        true
    }

    fn supports_ranges(&self) -> bool {
        true
    }

    fn supports_regexp(&self) -> bool {
        true
    }

    fn supports_iregexp(&self) -> bool {
        true
    }

    fn supports_ilike(&self) -> bool {
        true
    }

    fn supports_json(&self) -> bool {
        true
    }

    fn supports_json_containment(&self) -> bool {
        true
    }

    fn supports_tsvector(&self) -> bool {
        true
    }

    fn operator_token(&self, op: Op) -> &'static str {
        match op {
            Op::Regexp => "~",
            Op::NotRegexp => "!~",
            Op::IRegexp => "~*",
            Op::NotIRegexp => "!~*",
            other => other.token(),
        }
    }

    fn emit_json_path(&self, base: TokenStream, path: &[PathSegment]) -> Option<TokenStream> {
        let mut ts = TokenStream::new();
        ts.lparen()
            .append(&base)
            .push(Token::Operator("#>>"))
            .push(Token::PathLiteral(self.quote_string(&helpers::pg_path_array(path))))
            .rparen();
        Some(ts)
    }

    fn json_coercion(&self, kind: JsonValueKind) -> JsonCoercion {
        match kind {
            JsonValueKind::Text => JsonCoercion::None,
            JsonValueKind::Number => JsonCoercion::Cast("DOUBLE PRECISION"),
            JsonValueKind::Boolean => JsonCoercion::Cast("BOOLEAN"),
            JsonValueKind::Date => JsonCoercion::Cast("TIMESTAMPTZ"),
        }
    }
}
