//! SQL-level attribute types.
//!
//! The compiler only needs to know a few things about an attribute's type:
//! whether it is JSON (dotted keys and nested maps become JSON paths),
//! an array (typed array literals get a `::T[]` suffix), a range (two-element
//! lists become range literals) or temporal (integers are epoch milliseconds).
//! [`DataType`] carries enough detail to answer those questions and to print
//! the element and subtype names those renderings need.

use std::fmt;

/// SQL-level attribute type.
///
/// # Examples
///
/// ```ignore
/// use sieve::sql::types::DataType;
///
/// assert_eq!(DataType::parse("array(integer)"), Some(DataType::Array(Box::new(DataType::Int32))));
/// assert_eq!(DataType::parse("range(date)"), Some(DataType::Range(Box::new(DataType::Date))));
/// assert_eq!(DataType::parse("jsonb"), Some(DataType::Jsonb));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DataType {
    Bool,
    Int8,
    Int16,
    Int32,
    Int64,
    Float32,
    Float64,

    /// Fixed-precision decimal (precision, scale).
    Decimal(u8, u8),

    /// Unbounded text (TEXT).
    String,
    Char(u16),
    Varchar(u16),

    Date,
    Time,
    Timestamp,
    TimestampTz,

    Binary,
    Json,
    /// Binary JSON; the only JSON flavour supporting document containment.
    Jsonb,
    Uuid,

    /// Array of the inner type.
    Array(Box<DataType>),
    /// Range over the inner subtype.
    Range(Box<DataType>),
}

impl DataType {
    /// Parse a type name.
    ///
    /// Besides plain SQL names this accepts the attribute-declaration forms
    /// `array(T)`, `T[]`, `range(T)` and bare `range` (an integer range).
    /// `string` is a bounded `VARCHAR(255)`; `text` is unbounded.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim().to_lowercase();

        if let Some(inner) = s.strip_suffix("[]") {
            return DataType::parse(inner).map(|t| DataType::Array(Box::new(t)));
        }
        if let Some(inner) = extract_parens(&s, "array") {
            return DataType::parse(&inner).map(|t| DataType::Array(Box::new(t)));
        }
        if let Some(inner) = extract_parens(&s, "range") {
            if inner.trim().is_empty() {
                return Some(DataType::Range(Box::new(DataType::Int32)));
            }
            return DataType::parse(&inner).map(|t| DataType::Range(Box::new(t)));
        }

        if let Some(inner) = extract_parens(&s, "decimal")
            .or_else(|| extract_parens(&s, "numeric"))
        {
            return parse_decimal_params(&inner);
        }

        if let Some(inner) = extract_parens(&s, "varchar")
            .or_else(|| extract_parens(&s, "string"))
            .or_else(|| extract_parens(&s, "nvarchar"))
        {
            return parse_length_param(&inner).map(DataType::Varchar);
        }

        if let Some(inner) = extract_parens(&s, "char") {
            return parse_length_param(&inner).map(DataType::Char);
        }

        match s.as_str() {
            "bool" | "boolean" => Some(DataType::Bool),

            "tinyint" => Some(DataType::Int8),
            "smallint" => Some(DataType::Int16),
            "int" | "integer" | "int4" => Some(DataType::Int32),
            "bigint" | "int8" => Some(DataType::Int64),

            "real" | "float4" => Some(DataType::Float32),
            "double" | "float8" | "double precision" | "float" => Some(DataType::Float64),

            "decimal" | "numeric" => Some(DataType::Decimal(10, 2)),

            "text" => Some(DataType::String),
            "string" | "varchar" => Some(DataType::Varchar(255)),
            "char" => Some(DataType::Char(255)),

            "date" | "dateonly" => Some(DataType::Date),
            "time" => Some(DataType::Time),
            "timestamp" | "datetime" => Some(DataType::Timestamp),
            "timestamptz" | "timestamp with time zone" => Some(DataType::TimestampTz),

            "blob" | "bytea" | "binary" => Some(DataType::Binary),

            "json" => Some(DataType::Json),
            "jsonb" => Some(DataType::Jsonb),

            "uuid" => Some(DataType::Uuid),

            "range" => Some(DataType::Range(Box::new(DataType::Int32))),

            _ => None,
        }
    }

    pub fn is_json(&self) -> bool {
        matches!(self, DataType::Json | DataType::Jsonb)
    }

    pub fn is_array(&self) -> bool {
        matches!(self, DataType::Array(_))
    }

    pub fn is_range(&self) -> bool {
        matches!(self, DataType::Range(_))
    }

    /// Date or time types. Integer operands of these are epoch milliseconds.
    pub fn is_temporal(&self) -> bool {
        matches!(
            self,
            DataType::Date | DataType::Time | DataType::Timestamp | DataType::TimestampTz
        )
    }

    /// Element type of an array.
    pub fn element_type(&self) -> Option<&DataType> {
        match self {
            DataType::Array(inner) => Some(inner),
            _ => None,
        }
    }

    /// Postgres name of a range's subtype, used to cast a single element
    /// compared against the range (`'…'::timestamptz`).
    pub fn range_subtype_name(&self) -> Option<&'static str> {
        let DataType::Range(inner) = self else {
            return None;
        };
        Some(match inner.as_ref() {
            DataType::TimestampTz => "timestamptz",
            DataType::Timestamp => "timestamp",
            DataType::Date => "date",
            DataType::Int64 => "bigint",
            DataType::Decimal(_, _) | DataType::Float32 | DataType::Float64 => "numeric",
            _ => "integer",
        })
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataType::Bool => write!(f, "BOOLEAN"),
            DataType::Int8 => write!(f, "TINYINT"),
            DataType::Int16 => write!(f, "SMALLINT"),
            DataType::Int32 => write!(f, "INTEGER"),
            DataType::Int64 => write!(f, "BIGINT"),
            DataType::Float32 => write!(f, "REAL"),
            DataType::Float64 => write!(f, "DOUBLE PRECISION"),
            DataType::Decimal(p, s) => write!(f, "DECIMAL({},{})", p, s),
            DataType::String => write!(f, "TEXT"),
            DataType::Char(n) => write!(f, "CHAR({})", n),
            DataType::Varchar(n) => write!(f, "VARCHAR({})", n),
            DataType::Date => write!(f, "DATE"),
            DataType::Time => write!(f, "TIME"),
            DataType::Timestamp => write!(f, "TIMESTAMP"),
            DataType::TimestampTz => write!(f, "TIMESTAMP WITH TIME ZONE"),
            DataType::Binary => write!(f, "BYTEA"),
            DataType::Json => write!(f, "JSON"),
            DataType::Jsonb => write!(f, "JSONB"),
            DataType::Uuid => write!(f, "UUID"),
            DataType::Array(inner) => write!(f, "{}[]", inner),
            DataType::Range(inner) => match inner.as_ref() {
                DataType::Int64 => write!(f, "INT8RANGE"),
                DataType::Decimal(_, _) | DataType::Float32 | DataType::Float64 => {
                    write!(f, "NUMRANGE")
                }
                DataType::Timestamp => write!(f, "TSRANGE"),
                DataType::TimestampTz => write!(f, "TSTZRANGE"),
                DataType::Date => write!(f, "DATERANGE"),
                _ => write!(f, "INT4RANGE"),
            },
        }
    }
}

/// Extract content inside parentheses for a given type prefix.
/// e.g., extract_parens("array(integer)", "array") returns Some("integer")
fn extract_parens(s: &str, prefix: &str) -> Option<String> {
    let rest = s.trim().strip_prefix(prefix)?.trim();
    let inner = rest.strip_prefix('(')?.strip_suffix(')')?;
    Some(inner.to_string())
}

/// Parse decimal parameters "precision,scale".
fn parse_decimal_params(inner: &str) -> Option<DataType> {
    let (precision, scale) = inner.split_once(',')?;
    Some(DataType::Decimal(
        precision.trim().parse().ok()?,
        scale.trim().parse().ok()?,
    ))
}

fn parse_length_param(inner: &str) -> Option<u16> {
    inner.trim().parse().ok()
}
