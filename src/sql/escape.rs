//! Literal escaping.
//!
//! Pure functions turning [`Literal`] values into dialect-correct SQL text.
//! String quoting, boolean tokens and date formats come from the dialect;
//! this module decides which of those applies to each literal kind.

use chrono::{DateTime, FixedOffset, Utc};

use super::dialect::{helpers, SqlDialect};
use super::expr::{Literal, RangeBound, RangeBounds};

/// Render a literal inline.
pub fn escape_literal(dialect: &dyn SqlDialect, lit: &Literal, tz: &FixedOffset) -> String {
    match lit {
        Literal::Null => dialect.format_null().into(),
        Literal::Bool(b) => dialect.format_bool(*b).into(),
        Literal::Int(n) => n.to_string(),
        Literal::Float(f) => {
            if f.is_finite() {
                format_float(*f)
            } else {
                // Only reachable through hand-built trees; conditions reject these.
                dialect.quote_string(&non_finite_text(*f))
            }
        }
        Literal::String(s) => dialect.quote_string(s),
        Literal::Date(d) => helpers::quote_string_single(&dialect.format_date(&d.with_timezone(tz))),
        Literal::Buffer(bytes) => dialect.format_buffer(bytes),
        Literal::Json(value) => dialect.quote_string(&value.to_string()),
    }
}

/// Shortest round-tripping decimal form; integral values drop the `.0`.
pub fn format_float(f: f64) -> String {
    let mut buf = ryu::Buffer::new();
    let text = buf.format_finite(f);
    text.strip_suffix(".0").unwrap_or(text).to_string()
}

fn non_finite_text(f: f64) -> String {
    if f.is_nan() {
        "NaN".into()
    } else if f.is_sign_negative() {
        "-infinity".into()
    } else {
        "infinity".into()
    }
}

/// Range text without the outer quotes: `[1,4)`, `["2000-02-01 …",)`.
pub fn format_range(dialect: &dyn SqlDialect, range: &RangeBounds, tz: &FixedOffset) -> String {
    format!(
        "{}{},{}{}",
        if range.lower.inclusive { '[' } else { '(' },
        format_bound(dialect, &range.lower, tz),
        format_bound(dialect, &range.upper, tz),
        if range.upper.inclusive { ']' } else { ')' },
    )
}

fn format_bound(dialect: &dyn SqlDialect, bound: &RangeBound, tz: &FixedOffset) -> String {
    match &bound.value {
        Literal::Null => String::new(),
        Literal::Float(f) if !f.is_finite() => non_finite_text(*f),
        Literal::Float(f) => format_float(*f),
        Literal::Int(n) => n.to_string(),
        Literal::Bool(b) => b.to_string(),
        Literal::Date(d) => quote_range_element(&dialect.format_date(&d.with_timezone(tz))),
        Literal::String(s) => quote_range_element(s),
        Literal::Buffer(bytes) => quote_range_element(&helpers::hex(bytes)),
        Literal::Json(value) => quote_range_element(&value.to_string()),
    }
}

/// Double-quote a range element, escaping `"` and `\`.
fn quote_range_element(s: &str) -> String {
    format!("\"{}\"", s.replace('\\', "\\\\").replace('"', "\\\""))
}

/// ISO-8601 text with millisecond precision, as stored inside JSON documents.
pub fn iso_date(d: &DateTime<Utc>) -> String {
    d.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()
}
