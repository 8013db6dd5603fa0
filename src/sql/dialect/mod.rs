//! SQL Dialect definitions and formatting rules.
//!
//! This module provides a trait-based abstraction for SQL dialect differences.
//! Each dialect implements `SqlDialect` to handle its specific syntax:
//!
//! - Identifier quoting: `"` (PG/Snowflake/Db2), `` ` `` (MySQL/MariaDB/SQLite), `[]` (T-SQL)
//! - String literals: `''` doubling, backslash escapes, `N'...'`
//! - Boolean literals: true/false vs 1/0
//! - Date and binary literal formats
//! - JSON path extraction and the cast applied before comparing extracted values
//! - Capability flags for arrays, ranges, regular expressions and JSON
//!
//! # Usage
//!
//! ```ignore
//! use sieve::sql::dialect::{Dialect, SqlDialect};
//!
//! let dialect = Dialect::Postgres;
//! let quoted = dialect.quote_identifier("user");  // "user"
//! ```
//!
//! # Capabilities
//!
//! | Capability | postgres | mysql | mariadb | sqlite | mssql | snowflake | db2 |
//! |------------|----------|-------|---------|--------|-------|-----------|-----|
//! | ARRAY | ✓ | ❌ | ❌ | ❌ | ❌ | ❌ | ❌ |
//! | RANGE | ✓ | ❌ | ❌ | ❌ | ❌ | ❌ | ❌ |
//! | REGEXP | ✓ | ✓ | ✓ | ❌ | ❌ | ✓ | ❌ |
//! | IREGEXP | ✓ | ❌ | ❌ | ❌ | ❌ | ❌ | ❌ |
//! | ILIKE | ✓ | ❌ | ❌ | ❌ | ❌ | ✓ | ❌ |
//! | JSON | ✓ | ✓ | ✓ | ✓ | ❌ | ✓ | ❌ |
//! | JSONB | ✓ | ❌ | ❌ | ❌ | ❌ | ❌ | ❌ |
//! | TSVECTOR | ✓ | ❌ | ❌ | ❌ | ❌ | ❌ | ❌ |
//!
//! The compiler checks `supports()` before emitting an operator that needs
//! one of these and fails with `UnsupportedFeature` otherwise.

mod db2;
pub mod helpers;
mod mariadb;
mod mysql;
mod postgres;
mod snowflake;
mod sqlite;
mod tsql;

pub use db2::Db2;
pub use mariadb::MariaDb;
pub use mysql::MySql;
pub use postgres::Postgres;
pub use snowflake::Snowflake;
pub use sqlite::Sqlite;
pub use tsql::TSql;

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use super::expr::PathSegment;
use super::operator::{Capability, Op};
use super::token::TokenStream;

/// Runtime type of the value a JSON path is compared against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsonValueKind {
    Text,
    Number,
    Boolean,
    Date,
}

/// How an extracted JSON value is prepared for comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsonCoercion {
    /// Compare the extracted text as-is.
    None,
    /// Wrap the extraction in `CAST(... AS <type>)`.
    Cast(&'static str),
    /// Leave the extraction alone and compare against the value's text form.
    CompareAsText,
}

/// SQL dialect trait - defines how WHERE-clause constructs are rendered.
///
/// Implementations handle dialect-specific syntax differences.
/// The default implementations follow ANSI SQL where possible.
pub trait SqlDialect: fmt::Debug + Send + Sync {
    /// Dialect name for display/logging.
    fn name(&self) -> &'static str;

    // =========================================================================
    // Identifier and Literal Quoting
    // =========================================================================

    /// Quote an identifier (table, column, alias).
    ///
    /// - PostgreSQL/Snowflake/Db2: `"identifier"`
    /// - MySQL/MariaDB/SQLite: `` `identifier` ``
    /// - T-SQL: `[identifier]`
    fn quote_identifier(&self, ident: &str) -> String;

    /// Token joining association path segments inside one quoted identifier.
    fn association_separator(&self) -> &'static str {
        "->"
    }

    /// Quote a string literal.
    ///
    /// Defaults to single quotes with `''` for escaping.
    fn quote_string(&self, s: &str) -> String {
        helpers::quote_string_single(s)
    }

    /// Format a boolean literal.
    ///
    /// - PostgreSQL/MySQL: `true`/`false`
    /// - T-SQL/SQLite: `1`/`0`
    fn format_bool(&self, b: bool) -> &'static str;

    /// Format a NULL literal.
    fn format_null(&self) -> &'static str {
        "NULL"
    }

    /// Date text placed inside a plain single-quoted literal.
    fn format_date(&self, ts: &DateTime<FixedOffset>) -> String {
        helpers::format_date_with_offset(ts)
    }

    /// Binary literal.
    fn format_buffer(&self, bytes: &[u8]) -> String {
        helpers::format_buffer_hex(bytes)
    }

    /// Bind placeholder for the 1-based parameter `index`.
    fn placeholder(&self, index: usize) -> String {
        let _ = index;
        "?".into()
    }

    // =========================================================================
    // Capabilities
    // =========================================================================

    fn supports_arrays(&self) -> bool {
        false
    }

    fn supports_ranges(&self) -> bool {
        false
    }

    fn supports_regexp(&self) -> bool {
        false
    }

    /// Case-insensitive regular expressions (`~*`).
    fn supports_iregexp(&self) -> bool {
        false
    }

    fn supports_ilike(&self) -> bool {
        false
    }

    /// Path extraction from JSON columns.
    fn supports_json(&self) -> bool {
        false
    }

    /// JSON document containment (`@>` with an object).
    fn supports_json_containment(&self) -> bool {
        false
    }

    /// Full-text `@@` matching.
    fn supports_tsvector(&self) -> bool {
        false
    }

    /// Dispatch a capability to its flag.
    fn supports(&self, capability: Capability) -> bool {
        match capability {
            Capability::Array => self.supports_arrays(),
            Capability::Range => self.supports_ranges(),
            Capability::Regexp => self.supports_regexp(),
            Capability::CaseInsensitiveRegexp => self.supports_iregexp(),
            Capability::ILike => self.supports_ilike(),
            Capability::Json => self.supports_json(),
            Capability::JsonContainment => self.supports_json_containment(),
            Capability::TsVector => self.supports_tsvector(),
        }
    }

    // =========================================================================
    // Operators and Casts
    // =========================================================================

    /// SQL token for a comparison operator.
    fn operator_token(&self, op: Op) -> &'static str {
        op.token()
    }

    /// Type name used inside `CAST(... AS <type>)`.
    fn cast_type_name(&self, ty: &str) -> String {
        ty.trim().to_uppercase()
    }

    // =========================================================================
    // JSON
    // =========================================================================

    /// Wrap `base` in this dialect's JSON path extraction.
    ///
    /// Returns `None` when the dialect cannot address into JSON values.
    fn emit_json_path(&self, base: TokenStream, path: &[PathSegment]) -> Option<TokenStream> {
        let _ = (base, path);
        None
    }

    /// Coercion applied to an extracted value compared against `kind`.
    fn json_coercion(&self, kind: JsonValueKind) -> JsonCoercion {
        let _ = kind;
        JsonCoercion::None
    }
}

/// Supported SQL dialects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    #[default]
    Postgres,
    #[serde(rename = "mysql")]
    MySql,
    #[serde(rename = "mariadb")]
    MariaDb,
    Sqlite,
    #[serde(rename = "mssql", alias = "tsql")]
    TSql,
    Snowflake,
    Db2,
}

impl Dialect {
    /// Every supported dialect.
    pub const ALL: [Dialect; 7] = [
        Dialect::Postgres,
        Dialect::MySql,
        Dialect::MariaDb,
        Dialect::Sqlite,
        Dialect::TSql,
        Dialect::Snowflake,
        Dialect::Db2,
    ];

    /// Get the dialect implementation.
    pub fn dialect(&self) -> &'static dyn SqlDialect {
        match self {
            Dialect::Postgres => &Postgres,
            Dialect::MySql => &MySql,
            Dialect::MariaDb => &MariaDb,
            Dialect::Sqlite => &Sqlite,
            Dialect::TSql => &TSql,
            Dialect::Snowflake => &Snowflake,
            Dialect::Db2 => &Db2,
        }
    }
}

// Implement SqlDialect for Dialect enum by delegating to concrete types
impl SqlDialect for Dialect {
    fn name(&self) -> &'static str {
        self.dialect().name()
    }

    fn quote_identifier(&self, ident: &str) -> String {
        self.dialect().quote_identifier(ident)
    }

    fn association_separator(&self) -> &'static str {
        self.dialect().association_separator()
    }

    fn quote_string(&self, s: &str) -> String {
        self.dialect().quote_string(s)
    }

    fn format_bool(&self, b: bool) -> &'static str {
        self.dialect().format_bool(b)
    }

    fn format_null(&self) -> &'static str {
        self.dialect().format_null()
    }

    fn format_date(&self, ts: &DateTime<FixedOffset>) -> String {
        self.dialect().format_date(ts)
    }

    fn format_buffer(&self, bytes: &[u8]) -> String {
        self.dialect().format_buffer(bytes)
    }

    fn placeholder(&self, index: usize) -> String {
        self.dialect().placeholder(index)
    }

    fn supports_arrays(&self) -> bool {
        self.dialect().supports_arrays()
    }

    fn supports_ranges(&self) -> bool {
        self.dialect().supports_ranges()
    }

    fn supports_regexp(&self) -> bool {
        self.dialect().supports_regexp()
    }

    fn supports_iregexp(&self) -> bool {
        self.dialect().supports_iregexp()
    }

    fn supports_ilike(&self) -> bool {
        self.dialect().supports_ilike()
    }

    fn supports_json(&self) -> bool {
        self.dialect().supports_json()
    }

    fn supports_json_containment(&self) -> bool {
        self.dialect().supports_json_containment()
    }

    fn supports_tsvector(&self) -> bool {
        self.dialect().supports_tsvector()
    }

    fn operator_token(&self, op: Op) -> &'static str {
        self.dialect().operator_token(op)
    }

    fn cast_type_name(&self, ty: &str) -> String {
        self.dialect().cast_type_name(ty)
    }

    fn emit_json_path(&self, base: TokenStream, path: &[PathSegment]) -> Option<TokenStream> {
        self.dialect().emit_json_path(base, path)
    }

    fn json_coercion(&self, kind: JsonValueKind) -> JsonCoercion {
        self.dialect().json_coercion(kind)
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.dialect().name())
    }
}

/// Error returned when a dialect name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unsupported dialect: {0}")]
pub struct UnknownDialect(pub String);

impl FromStr for Dialect {
    type Err = UnknownDialect;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "postgres" | "postgresql" | "pg" => Ok(Dialect::Postgres),
            "mysql" => Ok(Dialect::MySql),
            "mariadb" => Ok(Dialect::MariaDb),
            "sqlite" | "sqlite3" => Ok(Dialect::Sqlite),
            "mssql" | "tsql" | "sqlserver" => Ok(Dialect::TSql),
            "snowflake" => Ok(Dialect::Snowflake),
            "db2" => Ok(Dialect::Db2),
            other => Err(UnknownDialect(other.to_string())),
        }
    }
}
