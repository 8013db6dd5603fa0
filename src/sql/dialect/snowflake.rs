//! Snowflake SQL dialect.
//!
//! Snowflake features:
//! - ANSI identifier quoting (`"`)
//! - Second-precision timestamp literals
//! - `REGEXP` and `ILIKE`
//! - Semi-structured access through `col:"a"."b"` virtual columns

use chrono::{DateTime, FixedOffset};

use super::helpers;
use super::{JsonCoercion, JsonValueKind, SqlDialect};
use crate::sql::expr::PathSegment;
use crate::sql::token::{Token, TokenStream};

/// Snowflake SQL dialect.
#[derive(Debug, Clone, Copy)]
pub struct Snowflake;

impl SqlDialect for Snowflake {
    fn name(&self) -> &'static str {
        "snowflake"
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

    fn supports_regexp(&self) -> bool {
        true
    }

    fn supports_ilike(&self) -> bool {
        true
    }

    fn supports_json(&self) -> bool {
        true
    }

    fn emit_json_path(&self, base: TokenStream, path: &[PathSegment]) -> Option<TokenStream> {
        let mut ts = TokenStream::new();
        ts.append(&base);
        for (i, seg) in path.iter().enumerate() {
            match seg {
                PathSegment::Key(k) => {
                    ts.push(if i == 0 { Token::Colon } else { Token::Dot });
                    ts.push(Token::Ident(k.clone()));
                }
                PathSegment::Index(idx) => {
                    ts.push(Token::Raw(format!("[{}]", idx)));
                }
            }
        }
        Some(ts)
    }

    fn json_coercion(&self, kind: JsonValueKind) -> JsonCoercion {
        match kind {
            JsonValueKind::Text => JsonCoercion::Cast("VARCHAR"),
            JsonValueKind::Number => JsonCoercion::Cast("DOUBLE"),
            JsonValueKind::Boolean => JsonCoercion::Cast("BOOLEAN"),
            JsonValueKind::Date => JsonCoercion::Cast("TIMESTAMP_TZ"),
        }
    }
}
