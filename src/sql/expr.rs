//! Canonical expression tree.
//!
//! The normalizer resolves every shorthand form of a condition into this
//! tree; the compiler walks it without looking at input shapes again. A
//! `Comparison`'s right operand is always fully resolved: nested operator
//! maps have already become `Column`, `Quantified`, `Array`, `Range`, and so on.

use chrono::{DateTime, Utc};

use super::attribute::AttributeRef;
use super::operator::Op;

// =============================================================================
// Expression AST
// =============================================================================

/// A canonical WHERE expression.
///
/// Every variant must be handled by the compiler - exhaustive matching
/// enforces this.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// `left <op> right`
    Comparison {
        left: Box<Expr>,
        op: Op,
        right: Box<Expr>,
    },

    /// AND / OR over operands, or NOT over a single operand.
    Logical { op: LogicalOp, operands: Vec<Expr> },

    /// Resolved attribute reference.
    Column(AttributeRef),

    /// Function call: name(args...)
    Function { name: String, args: Vec<Expr> },

    /// `CAST(inner AS target)` or `inner::target`
    Cast {
        inner: Box<Expr>,
        target: String,
        style: CastStyle,
    },

    /// Extraction of a value nested inside a JSON column.
    JsonPath {
        base: Box<Expr>,
        path: Vec<PathSegment>,
    },

    /// Literal value.
    Literal(Literal),

    /// Raw SQL passed directly to output without escaping.
    ///
    /// # Security Warning
    ///
    /// **Never pass user input to this variant.** Only caller-supplied
    /// `literal(...)` fragments end up here.
    Raw(String),

    /// Parenthesised value list for IN / NOT IN; bound pair for BETWEEN.
    List(Vec<Expr>),

    /// `ARRAY[a,b]` with an optional `::T[]` element cast.
    Array {
        elements: Vec<Expr>,
        element_type: Option<String>,
    },

    /// Range literal `'[lo,hi)'`.
    Range(RangeBounds),

    /// `VALUES (a), (b)` operand of ANY / ALL.
    Values(Vec<Expr>),

    /// `ANY (...)` / `ALL (...)`
    Quantified {
        quantifier: Quantifier,
        operand: Box<Expr>,
    },
}

/// Literal values.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    Date(DateTime<Utc>),
    Buffer(Vec<u8>),
    /// JSON document, written as its compact text.
    Json(serde_json::Value),
}

/// One step of a JSON path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CastStyle {
    /// `CAST(x AS T)`, with the dialect's type remapping.
    Function,
    /// `x::T`, written verbatim.
    Postfix,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicalOp {
    And,
    Or,
    Not,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quantifier {
    Any,
    All,
}

/// One side of a range. `Literal::Null` is an unbounded side; an infinite
/// float is written as `-infinity` / `infinity`.
#[derive(Debug, Clone, PartialEq)]
pub struct RangeBound {
    pub value: Literal,
    pub inclusive: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RangeBounds {
    pub lower: RangeBound,
    pub upper: RangeBound,
}

impl RangeBounds {
    /// `[lower, upper)`, the default range shape.
    pub fn half_open(lower: Literal, upper: Literal) -> Self {
        Self {
            lower: RangeBound {
                value: lower,
                inclusive: true,
            },
            upper: RangeBound {
                value: upper,
                inclusive: false,
            },
        }
    }
}

impl Literal {
    pub fn is_null(&self) -> bool {
        matches!(self, Literal::Null)
    }
}

impl Expr {
    pub fn is_null(&self) -> bool {
        matches!(self, Expr::Literal(Literal::Null))
    }

    /// Whether this node is an explicit logical group.
    pub fn is_logical(&self) -> bool {
        matches!(self, Expr::Logical { .. })
    }

    /// First literal of a scalar or list operand; used to infer JSON casts.
    pub fn leading_literal(&self) -> Option<&Literal> {
        match self {
            Expr::Literal(lit) => Some(lit),
            Expr::List(items) => items.first().and_then(Expr::leading_literal),
            _ => None,
        }
    }
}

// =============================================================================
// Builders
// =============================================================================

pub fn comparison(left: Expr, op: Op, right: Expr) -> Expr {
    Expr::Comparison {
        left: Box::new(left),
        op,
        right: Box::new(right),
    }
}

pub fn and(operands: Vec<Expr>) -> Expr {
    Expr::Logical {
        op: LogicalOp::And,
        operands,
    }
}

pub fn or(operands: Vec<Expr>) -> Expr {
    Expr::Logical {
        op: LogicalOp::Or,
        operands,
    }
}

pub fn not(operand: Expr) -> Expr {
    Expr::Logical {
        op: LogicalOp::Not,
        operands: vec![operand],
    }
}

pub fn lit(literal: Literal) -> Expr {
    Expr::Literal(literal)
}

pub fn lit_null() -> Expr {
    Expr::Literal(Literal::Null)
}

pub fn raw_sql(sql: &str) -> Expr {
    Expr::Raw(sql.to_string())
}

impl From<Literal> for Expr {
    fn from(lit: Literal) -> Self {
        Expr::Literal(lit)
    }
}

impl From<AttributeRef> for Expr {
    fn from(attr: AttributeRef) -> Self {
        Expr::Column(attr)
    }
}

impl From<i64> for Literal {
    fn from(n: i64) -> Self {
        Literal::Int(n)
    }
}

impl From<&str> for Literal {
    fn from(s: &str) -> Self {
        Literal::String(s.to_string())
    }
}

impl From<bool> for Literal {
    fn from(b: bool) -> Self {
        Literal::Bool(b)
    }
}
