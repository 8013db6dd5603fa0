//! MariaDB SQL dialect.
//!
//! Shares MySQL's quoting, escaping and CAST targets. Differences:
//! - Millisecond DATETIME literals
//! - Unquoted JSON path members (`$.a.b`)

use chrono::{DateTime, FixedOffset};

use super::helpers;
use super::mysql;
use super::{JsonCoercion, JsonValueKind, SqlDialect};
use crate::sql::expr::PathSegment;
use crate::sql::token::TokenStream;

/// MariaDB SQL dialect.
#[derive(Debug, Clone, Copy)]
pub struct MariaDb;

impl SqlDialect for MariaDb {
    fn name(&self) -> &'static str {
        "mariadb"
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
        helpers::format_date_millis(ts)
    }

    fn supports_regexp(&self) -> bool {
        true
    }

    fn supports_json(&self) -> bool {
        true
    }

    fn cast_type_name(&self, ty: &str) -> String {
        mysql::remap_cast_type(ty)
    }

    fn emit_json_path(&self, base: TokenStream, path: &[PathSegment]) -> Option<TokenStream> {
        let path = self.quote_string(&helpers::json_path_expression(path, false));
        Some(helpers::emit_json_unquote_extract(base, path))
    }

    fn json_coercion(&self, kind: JsonValueKind) -> JsonCoercion {
        mysql::json_coercion(kind)
    }
}
