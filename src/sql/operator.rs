//! Operator registry.
//!
//! Every operator a condition can use is a variant of the closed [`Op`] enum.
//! The static [`OPERATORS`] table maps each variant to its name, its JSON
//! alias (`$gt`), its kind and arity, the default SQL token, and the dialect
//! capability it needs. Indexing is by discriminant, so lookups never hash
//! or compare strings.

use std::fmt;
use std::str::FromStr;

/// Abstract condition operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    // Logical
    And,
    Or,
    Not,
    // Comparison
    Eq,
    Ne,
    Gt,
    Gte,
    Lt,
    Lte,
    Between,
    NotBetween,
    In,
    NotIn,
    Is,
    // LIKE family
    Like,
    NotLike,
    ILike,
    NotILike,
    StartsWith,
    EndsWith,
    Substring,
    // REGEXP family
    Regexp,
    NotRegexp,
    IRegexp,
    NotIRegexp,
    // Structural
    Col,
    Any,
    All,
    Values,
    // Array / range
    Contains,
    Contained,
    Overlap,
    Adjacent,
    StrictLeft,
    StrictRight,
    NoExtendLeft,
    NoExtendRight,
    // Full-text
    Match,
}

/// Broad operator category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpKind {
    /// AND / OR / NOT
    Logical,
    /// Binary comparison between an attribute and an operand.
    Comparison,
    /// Operand markers (`col`, `any`, `all`, `values`).
    Structural,
    /// Array or range containment / ordering.
    ArrayRange,
}

/// Shape of the operand an operator expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    /// Any number of sub-conditions.
    Variadic,
    /// A single operand.
    Unary,
    /// Exactly two values (BETWEEN bounds, range bounds).
    Pair,
    /// A list of values.
    List,
}

/// Dialect capability an operator depends on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    Array,
    Range,
    Regexp,
    CaseInsensitiveRegexp,
    ILike,
    Json,
    JsonContainment,
    TsVector,
}

impl Capability {
    pub fn name(self) -> &'static str {
        match self {
            Capability::Array => "ARRAY",
            Capability::Range => "RANGE",
            Capability::Regexp => "REGEXP",
            Capability::CaseInsensitiveRegexp => "IREGEXP",
            Capability::ILike => "ILIKE",
            Capability::Json => "JSON",
            Capability::JsonContainment => "JSONB",
            Capability::TsVector => "TSVECTOR",
        }
    }
}

/// Static description of one operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperatorSpec {
    pub op: Op,
    pub name: &'static str,
    pub alias: &'static str,
    pub kind: OpKind,
    pub arity: Arity,
    pub token: &'static str,
    pub capability: Option<Capability>,
}

const fn spec(
    op: Op,
    name: &'static str,
    alias: &'static str,
    kind: OpKind,
    arity: Arity,
    token: &'static str,
    capability: Option<Capability>,
) -> OperatorSpec {
    OperatorSpec {
        op,
        name,
        alias,
        kind,
        arity,
        token,
        capability,
    }
}

use Arity::*;
use OpKind::*;

/// The registry, ordered by [`Op`] discriminant.
pub static OPERATORS: &[OperatorSpec] = &[
    spec(Op::And, "and", "$and", Logical, Variadic, "AND", None),
    spec(Op::Or, "or", "$or", Logical, Variadic, "OR", None),
    spec(Op::Not, "not", "$not", Logical, Unary, "IS NOT", None),
    spec(Op::Eq, "eq", "$eq", Comparison, Unary, "=", None),
    spec(Op::Ne, "ne", "$ne", Comparison, Unary, "!=", None),
    spec(Op::Gt, "gt", "$gt", Comparison, Unary, ">", None),
    spec(Op::Gte, "gte", "$gte", Comparison, Unary, ">=", None),
    spec(Op::Lt, "lt", "$lt", Comparison, Unary, "<", None),
    spec(Op::Lte, "lte", "$lte", Comparison, Unary, "<=", None),
    spec(Op::Between, "between", "$between", Comparison, Pair, "BETWEEN", None),
    spec(Op::NotBetween, "notBetween", "$notBetween", Comparison, Pair, "NOT BETWEEN", None),
    spec(Op::In, "in", "$in", Comparison, List, "IN", None),
    spec(Op::NotIn, "notIn", "$notIn", Comparison, List, "NOT IN", None),
    spec(Op::Is, "is", "$is", Comparison, Unary, "IS", None),
    spec(Op::Like, "like", "$like", Comparison, Unary, "LIKE", None),
    spec(Op::NotLike, "notLike", "$notLike", Comparison, Unary, "NOT LIKE", None),
    spec(Op::ILike, "iLike", "$iLike", Comparison, Unary, "ILIKE", Some(Capability::ILike)),
    spec(Op::NotILike, "notILike", "$notILike", Comparison, Unary, "NOT ILIKE", Some(Capability::ILike)),
    spec(Op::StartsWith, "startsWith", "$startsWith", Comparison, Unary, "LIKE", None),
    spec(Op::EndsWith, "endsWith", "$endsWith", Comparison, Unary, "LIKE", None),
    spec(Op::Substring, "substring", "$substring", Comparison, Unary, "LIKE", None),
    spec(Op::Regexp, "regexp", "$regexp", Comparison, Unary, "REGEXP", Some(Capability::Regexp)),
    spec(Op::NotRegexp, "notRegexp", "$notRegexp", Comparison, Unary, "NOT REGEXP", Some(Capability::Regexp)),
    spec(Op::IRegexp, "iRegexp", "$iRegexp", Comparison, Unary, "~*", Some(Capability::CaseInsensitiveRegexp)),
    spec(Op::NotIRegexp, "notIRegexp", "$notIRegexp", Comparison, Unary, "!~*", Some(Capability::CaseInsensitiveRegexp)),
    spec(Op::Col, "col", "$col", Structural, Unary, "=", None),
    spec(Op::Any, "any", "$any", Structural, List, "ANY", Some(Capability::Array)),
    spec(Op::All, "all", "$all", Structural, List, "ALL", Some(Capability::Array)),
    spec(Op::Values, "values", "$values", Structural, List, "VALUES", Some(Capability::Array)),
    spec(Op::Contains, "contains", "$contains", ArrayRange, Unary, "@>", None),
    spec(Op::Contained, "contained", "$contained", ArrayRange, Unary, "<@", None),
    spec(Op::Overlap, "overlap", "$overlap", ArrayRange, Unary, "&&", None),
    spec(Op::Adjacent, "adjacent", "$adjacent", ArrayRange, Pair, "-|-", Some(Capability::Range)),
    spec(Op::StrictLeft, "strictLeft", "$strictLeft", ArrayRange, Pair, "<<", Some(Capability::Range)),
    spec(Op::StrictRight, "strictRight", "$strictRight", ArrayRange, Pair, ">>", Some(Capability::Range)),
    spec(Op::NoExtendLeft, "noExtendLeft", "$noExtendLeft", ArrayRange, Pair, "&>", Some(Capability::Range)),
    spec(Op::NoExtendRight, "noExtendRight", "$noExtendRight", ArrayRange, Pair, "&<", Some(Capability::Range)),
    spec(Op::Match, "match", "$match", Comparison, Unary, "@@", Some(Capability::TsVector)),
];

impl Op {
    /// Registry entry for this operator.
    pub fn spec(self) -> &'static OperatorSpec {
        &OPERATORS[self as usize]
    }

    pub fn name(self) -> &'static str {
        self.spec().name
    }

    /// Default SQL token. Dialects may override it.
    pub fn token(self) -> &'static str {
        self.spec().token
    }

    pub fn kind(self) -> OpKind {
        self.spec().kind
    }

    pub fn capability(self) -> Option<Capability> {
        self.spec().capability
    }

    /// Look up an operator by its JSON alias (`$gt`) or bare name (`gt`).
    pub fn from_alias(alias: &str) -> Option<Op> {
        OPERATORS
            .iter()
            .find(|s| s.alias == alias || s.name == alias)
            .map(|s| s.op)
    }

    pub fn is_logical(self) -> bool {
        self.kind() == OpKind::Logical
    }

    /// Operators whose two-element list operand is always a range bound pair.
    pub fn requires_range_pair(self) -> bool {
        self.kind() == OpKind::ArrayRange && self.spec().arity == Arity::Pair
    }

    /// Operators that read a two-element list as a range when the attribute is range-typed.
    pub fn accepts_range(self) -> bool {
        self.kind() == OpKind::ArrayRange
    }

    /// Pattern prefix/suffix for the LIKE sugar operators.
    pub fn like_affixes(self) -> Option<(&'static str, &'static str)> {
        match self {
            Op::StartsWith => Some(("", "%")),
            Op::EndsWith => Some(("%", "")),
            Op::Substring => Some(("%", "%")),
            _ => None,
        }
    }

    pub fn is_like_family(self) -> bool {
        matches!(
            self,
            Op::Like
                | Op::NotLike
                | Op::ILike
                | Op::NotILike
                | Op::StartsWith
                | Op::EndsWith
                | Op::Substring
        )
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when an operator name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown operator: {0}")]
pub struct UnknownOperator(pub String);

impl FromStr for Op {
    type Err = UnknownOperator;

    /// Accepts comparison symbols (`>=`, `<>`), aliases (`$gte`) and names (`gte`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let op = match s {
            "=" | "==" => Op::Eq,
            "!=" | "<>" => Op::Ne,
            ">" => Op::Gt,
            ">=" => Op::Gte,
            "<" => Op::Lt,
            "<=" => Op::Lte,
            other => Op::from_alias(other).ok_or_else(|| UnknownOperator(other.to_string()))?,
        };
        Ok(op)
    }
}
