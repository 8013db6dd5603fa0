//! Condition input model.
//!
//! A [`Condition`] is the caller-facing, loosely shaped description of a
//! filter: scalars, lists and ordered maps whose keys are attribute names or
//! operators, plus explicit helper nodes (`literal`, `col`, `fn`, `cast`,
//! `where`, `json`). The normalizer turns it into a canonical
//! [`Expr`](super::expr::Expr) tree.
//!
//! # Example
//!
//! ```ignore
//! use sieve::sql::condition::{or, Condition};
//! use sieve::sql::operator::Op;
//!
//! let cond = Condition::map()
//!     .entry("name", "a project")
//!     .entry("id", Condition::map().entry(Op::Gt, 10));
//! let either = or(vec![
//!     Condition::map().entry("group_id", 1),
//!     Condition::map().entry("user_id", 2),
//! ]);
//! ```

use chrono::{DateTime, Utc};

use super::attribute::AttributeMeta;
use super::operator::Op;

/// Map key: an attribute (plain, dotted or `$a.b$`) or an operator.
#[derive(Debug, Clone, PartialEq)]
pub enum Key {
    Attr(String),
    Op(Op),
}

impl Key {
    pub fn as_op(&self) -> Option<Op> {
        match self {
            Key::Op(op) => Some(*op),
            Key::Attr(_) => None,
        }
    }

    /// Text used in error messages.
    pub fn label(&self) -> String {
        match self {
            Key::Attr(name) => name.clone(),
            Key::Op(op) => op.spec().alias.to_string(),
        }
    }
}

impl From<&str> for Key {
    /// `$gt`-style aliases become operators; `$a.b$` stays an attribute.
    fn from(s: &str) -> Self {
        if s.len() > 1 && s.starts_with('$') && !s.ends_with('$') {
            if let Some(op) = Op::from_alias(s) {
                return Key::Op(op);
            }
        }
        Key::Attr(s.to_string())
    }
}

impl From<String> for Key {
    fn from(s: String) -> Self {
        Key::from(s.as_str())
    }
}

impl From<Op> for Key {
    fn from(op: Op) -> Self {
        Key::Op(op)
    }
}

/// A filter condition before normalization.
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    /// Missing value. Always rejected.
    Undefined,
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    Date(DateTime<Utc>),
    Buffer(Vec<u8>),
    List(Vec<Condition>),
    /// Ordered key/value entries.
    Map(Vec<(Key, Condition)>),

    /// `literal(sql)`: caller-supplied SQL written verbatim.
    Raw(String),
    /// `col(name)`: column reference, dotted names qualify it.
    Col(String),
    /// `fn(name, args)`
    Fn { name: String, args: Vec<Condition> },
    /// `cast(value, type)`
    Cast { value: Box<Condition>, ty: String },
    /// `where(left, op, right)`; without an operator the right side decides.
    Where {
        left: Box<Condition>,
        op: Option<Op>,
        right: Box<Condition>,
    },
    /// `json("column.a.b", value)`
    JsonPath { path: String, value: Box<Condition> },
    /// `json({column: {a: value}})`
    JsonObject(Box<Condition>),
    /// A declared attribute used as an operand.
    Attribute(AttributeMeta),
}

impl Condition {
    /// Empty map, to be filled with [`Condition::entry`].
    pub fn map() -> Self {
        Condition::Map(Vec::new())
    }

    /// Append an entry to a map; other variants are returned unchanged.
    pub fn entry(self, key: impl Into<Key>, value: impl Into<Condition>) -> Self {
        match self {
            Condition::Map(mut entries) => {
                entries.push((key.into(), value.into()));
                Condition::Map(entries)
            }
            other => other,
        }
    }

    pub fn buffer(bytes: impl Into<Vec<u8>>) -> Self {
        Condition::Buffer(bytes.into())
    }

    /// Scalar values that may stand alone as a comparison operand.
    pub fn is_scalar(&self) -> bool {
        matches!(
            self,
            Condition::Null
                | Condition::Bool(_)
                | Condition::Int(_)
                | Condition::Float(_)
                | Condition::String(_)
                | Condition::Date(_)
                | Condition::Buffer(_)
        )
    }
}

// =============================================================================
// Helper constructors
// =============================================================================

/// Caller-supplied SQL, written without escaping.
pub fn literal(sql: impl Into<String>) -> Condition {
    Condition::Raw(sql.into())
}

pub fn col(name: impl Into<String>) -> Condition {
    Condition::Col(name.into())
}

/// Function call; the name is written verbatim.
pub fn func(name: impl Into<String>, args: Vec<Condition>) -> Condition {
    Condition::Fn {
        name: name.into(),
        args,
    }
}

pub fn cast(value: impl Into<Condition>, ty: impl Into<String>) -> Condition {
    Condition::Cast {
        value: Box::new(value.into()),
        ty: ty.into(),
    }
}

pub fn and(items: Vec<Condition>) -> Condition {
    Condition::map().entry(Op::And, Condition::List(items))
}

pub fn or(items: Vec<Condition>) -> Condition {
    Condition::map().entry(Op::Or, Condition::List(items))
}

pub fn not(item: impl Into<Condition>) -> Condition {
    Condition::map().entry(Op::Not, item.into())
}

pub fn where_(left: impl Into<Condition>, op: Op, right: impl Into<Condition>) -> Condition {
    Condition::Where {
        left: Box::new(left.into()),
        op: Some(op),
        right: Box::new(right.into()),
    }
}

/// `where(left, right)`: `IS` for null, `=` otherwise.
pub fn where_value(left: impl Into<Condition>, right: impl Into<Condition>) -> Condition {
    Condition::Where {
        left: Box::new(left.into()),
        op: None,
        right: Box::new(right.into()),
    }
}

pub fn json_path(path: impl Into<String>, value: impl Into<Condition>) -> Condition {
    Condition::JsonPath {
        path: path.into(),
        value: Box::new(value.into()),
    }
}

pub fn json(object: impl Into<Condition>) -> Condition {
    Condition::JsonObject(Box::new(object.into()))
}

// =============================================================================
// Conversions
// =============================================================================

impl From<bool> for Condition {
    fn from(b: bool) -> Self {
        Condition::Bool(b)
    }
}

impl From<i32> for Condition {
    fn from(n: i32) -> Self {
        Condition::Int(n.into())
    }
}

impl From<i64> for Condition {
    fn from(n: i64) -> Self {
        Condition::Int(n)
    }
}

impl From<f64> for Condition {
    fn from(f: f64) -> Self {
        Condition::Float(f)
    }
}

impl From<&str> for Condition {
    fn from(s: &str) -> Self {
        Condition::String(s.to_string())
    }
}

impl From<String> for Condition {
    fn from(s: String) -> Self {
        Condition::String(s)
    }
}

impl From<DateTime<Utc>> for Condition {
    fn from(d: DateTime<Utc>) -> Self {
        Condition::Date(d)
    }
}

impl From<AttributeMeta> for Condition {
    fn from(meta: AttributeMeta) -> Self {
        Condition::Attribute(meta)
    }
}

impl<T: Into<Condition>> From<Vec<T>> for Condition {
    fn from(items: Vec<T>) -> Self {
        Condition::List(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Condition>> From<Option<T>> for Condition {
    fn from(value: Option<T>) -> Self {
        value.map_or(Condition::Null, Into::into)
    }
}

impl From<serde_json::Value> for Condition {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value;

        match value {
            Value::Null => Condition::Null,
            Value::Bool(b) => Condition::Bool(b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => Condition::Int(i),
                None => Condition::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            Value::String(s) => Condition::String(s),
            Value::Array(items) => Condition::List(items.into_iter().map(Condition::from).collect()),
            Value::Object(entries) => Condition::Map(
                entries
                    .into_iter()
                    .map(|(k, v)| (Key::from(k), Condition::from(v)))
                    .collect(),
            ),
        }
    }
}
