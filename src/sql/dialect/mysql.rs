//! MySQL SQL dialect.
//!
//! MySQL features:
//! - Backtick identifier quoting (`` ` ``)
//! - Backslash escapes inside string literals
//! - Second-precision DATETIME literals without offset
//! - `REGEXP` / `NOT REGEXP`
//! - `json_unquote(json_extract(...))` with quoted path members
//! - A reduced CAST target set (`DECIMAL`, `CHAR`, `DATETIME`, ...)

use chrono::{DateTime, FixedOffset};

use super::helpers;
use super::{JsonCoercion, JsonValueKind, SqlDialect};
use crate::sql::expr::PathSegment;
use crate::sql::token::TokenStream;

/// MySQL SQL dialect.
#[derive(Debug, Clone, Copy)]
pub struct MySql;

impl SqlDialect for MySql {
    fn name(&self) -> &'static str {
        "mysql"
    }

    fn quote_identifier(&self, ident: &str) -> String {
        helpers::quote_backtick(ident)
    }

    fn quote_string(&self, s: &str) -> String {
        helpers::quote_string_backslash(s)
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

    fn supports_json(&self) -> bool {
        true
    }

    fn cast_type_name(&self, ty: &str) -> String {
        remap_cast_type(ty)
    }

    fn emit_json_path(&self, base: TokenStream, path: &[PathSegment]) -> Option<TokenStream> {
        let path = self.quote_string(&helpers::json_path_expression(path, true));
        Some(helpers::emit_json_unquote_extract(base, path))
    }

    fn json_coercion(&self, kind: JsonValueKind) -> JsonCoercion {
        json_coercion(kind)
    }
}

/// CAST targets understood by MySQL and MariaDB.
pub(super) fn remap_cast_type(ty: &str) -> String {
    let upper = ty.trim().to_uppercase();
    match upper.as_str() {
        "INTEGER" | "INT" | "BIGINT" | "SMALLINT" | "TINYINT" | "FLOAT" | "DOUBLE"
        | "DOUBLE PRECISION" | "REAL" | "NUMBER" | "NUMERIC" => "DECIMAL".into(),
        "TEXT" | "STRING" | "VARCHAR" => "CHAR".into(),
        "TIMESTAMP" | "TIMESTAMPTZ" => "DATETIME".into(),
        _ => upper,
    }
}

pub(super) fn json_coercion(kind: JsonValueKind) -> JsonCoercion {
    match kind {
        JsonValueKind::Text => JsonCoercion::None,
        JsonValueKind::Number => JsonCoercion::Cast("DECIMAL"),
        JsonValueKind::Boolean => JsonCoercion::CompareAsText,
        JsonValueKind::Date => JsonCoercion::Cast("DATETIME"),
    }
}
