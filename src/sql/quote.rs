//! Identifier quoting for attribute references.
//!
//! Every segment is quoted on its own. Association segments are joined with
//! the dialect's association separator inside a single identifier
//! (`[offer->user]`), which is then joined to the column with the member
//! access dot (`[offer->user].[organizationId]`).

use std::sync::LazyLock;

use regex::Regex;

use super::attribute::{AttributeRef, Prefix};
use super::token::{Token, TokenStream};

/// Type names accepted after `::`; they are written into the SQL verbatim.
static CAST_TYPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_ ]*(\(\d+(\s*,\s*\d+)?\))?(\[\])*$").unwrap()
});

/// Tokens for an attribute reference.
///
/// The table prefix only applies to attributes of the current table; an
/// association path already names the table the column lives on.
pub fn attribute_tokens(attr: &AttributeRef) -> TokenStream {
    let mut ts = TokenStream::new();
    if attr.path.is_empty() {
        match &attr.table {
            Some(Prefix::Table(table)) => {
                ts.push(Token::Ident(table.clone())).push(Token::Dot);
            }
            Some(Prefix::Raw(sql)) => {
                ts.push(Token::Raw(sql.clone())).push(Token::Dot);
            }
            None => {}
        }
    } else {
        ts.push(Token::AssociationIdent(attr.path.clone()))
            .push(Token::Dot);
    }
    ts.push(Token::Ident(attr.column_name().to_string()));
    ts
}

/// A condition key split into its parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedKey {
    /// Dot-separated segments; never empty.
    pub segments: Vec<String>,
    /// `::type` suffix.
    pub cast: Option<String>,
    /// Key was written as `$a.b$`.
    pub cross_join: bool,
}

/// Split `a.b.c`, `$a.b$` and `attr::type` keys.
///
/// A suffix that is not a plain type name stays part of the key.
pub fn parse_key(key: &str) -> ParsedKey {
    let (body, cast) = match key.split_once("::") {
        Some((body, ty)) if CAST_TYPE.is_match(ty) => (body, Some(ty.to_string())),
        _ => (key, None),
    };

    let (body, cross_join) = match body
        .strip_prefix('$')
        .and_then(|rest| rest.strip_suffix('$'))
    {
        Some(inner) if !inner.is_empty() => (inner, true),
        _ => (body, false),
    };

    ParsedKey {
        segments: body.split('.').map(str::to_string).collect(),
        cast,
        cross_join,
    }
}

/// Reference named by `col("a.b.c")` or an `$col` operand: everything but the
/// last segment is the association path.
pub fn column_ref(name: &str) -> AttributeRef {
    let parsed = parse_key(name);
    let mut segments = parsed.segments;
    let column = segments.pop().unwrap_or_default();
    let mut attr = AttributeRef::new(column).with_path(segments);
    attr.cross_join = parsed.cross_join;
    attr
}
