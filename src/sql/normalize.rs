//! Condition normalization.
//!
//! Resolves every shorthand form of a [`Condition`] into the canonical
//! [`Expr`] tree:
//!
//! - implicit operators (`=` for scalars, `IN` for lists, `IS` for null)
//! - nested operator maps under an attribute
//! - dotted and `$a.b$` keys (association paths or JSON paths)
//! - `::type` key suffixes
//! - operator-dependent reading of two-element lists (BETWEEN pairs,
//!   range bounds, arrays, IN lists)
//!
//! All shape ambiguity is settled here; the compiler never inspects input
//! shapes.

use chrono::DateTime;
use tracing::trace;

use super::attribute::{AttributeLookup, AttributeRef, Prefix};
use super::condition::{Condition, Key};
use super::expr::{
    self, CastStyle, Expr, Literal, PathSegment, Quantifier, RangeBound, RangeBounds,
};
use super::operator::Op;
use super::quote::{column_ref, parse_key};
use super::types::DataType;
use crate::error::{WhereError, WhereResult};

/// Context shared by one normalization call.
#[derive(Debug, Clone, Copy, Default)]
pub struct NormalizeContext<'a> {
    /// Table qualifier for attribute keys.
    pub prefix: Option<&'a Prefix>,
    /// Type of the attribute under compilation when no model is given.
    pub attribute_type: Option<&'a DataType>,
    /// Model metadata; when present, plain attribute keys must exist in it.
    pub model: Option<&'a dyn AttributeLookup>,
}

/// Normalize a top-level condition into conjuncts joined by a bare ` AND `.
pub fn normalize(cond: &Condition, ctx: &NormalizeContext<'_>) -> WhereResult<Vec<Expr>> {
    Normalizer { ctx: *ctx }.root(cond)
}

/// Left-hand side currently being compared, with how to reach into it.
#[derive(Debug, Clone)]
struct Target {
    base: Expr,
    ty: Option<DataType>,
    json_path: Vec<PathSegment>,
    cast: Option<String>,
    label: String,
}

impl Target {
    fn plain(base: Expr, ty: Option<DataType>, label: impl Into<String>) -> Self {
        Self {
            base,
            ty,
            json_path: Vec::new(),
            cast: None,
            label: label.into(),
        }
    }

    /// Expression for the compared value.
    fn left(&self) -> Expr {
        let mut left = self.base.clone();
        if !self.json_path.is_empty() {
            left = Expr::JsonPath {
                base: Box::new(left),
                path: self.json_path.clone(),
            };
        }
        if let Some(ty) = &self.cast {
            left = Expr::Cast {
                inner: Box::new(left),
                target: ty.clone(),
                style: CastStyle::Function,
            };
        }
        left
    }

    fn compare(&self, op: Op, right: Expr) -> Expr {
        expr::comparison(self.left(), op, right)
    }

    /// Type of the compared value; JSON members are untyped.
    fn value_type(&self) -> Option<&DataType> {
        if self.json_path.is_empty() {
            self.ty.as_ref()
        } else {
            None
        }
    }

    /// Child target one JSON key deeper.
    fn descend(&self, key: &str) -> Self {
        let parsed = parse_key(key);
        let mut child = self.clone();
        child
            .json_path
            .extend(parsed.segments.iter().map(|s| path_segment(s)));
        if parsed.cast.is_some() {
            child.cast = parsed.cast;
        }
        child.label = format!("{}.{}", self.label, key);
        trace!(path = %child.label, "json descent");
        child
    }
}

fn path_segment(s: &str) -> PathSegment {
    if !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()) {
        if let Ok(i) = s.parse() {
            return PathSegment::Index(i);
        }
    }
    PathSegment::Key(s.to_string())
}

struct Normalizer<'a> {
    ctx: NormalizeContext<'a>,
}

impl Normalizer<'_> {
    // =========================================================================
    // Top level and logical groups
    // =========================================================================

    fn root(&self, cond: &Condition) -> WhereResult<Vec<Expr>> {
        match cond {
            Condition::Map(entries) => entries
                .iter()
                .map(|(key, value)| self.entry(key, value))
                .collect(),
            Condition::List(items) if items.is_empty() => Ok(Vec::new()),
            Condition::List(_) => Ok(vec![self.group_item(cond)?]),
            Condition::JsonObject(object) => self.json_object(object),
            Condition::Undefined => Err(WhereError::undefined("")),
            Condition::Raw(_)
            | Condition::Where { .. }
            | Condition::JsonPath { .. } => Ok(vec![self.group_item(cond)?]),
            _ => Err(WhereError::malformed(
                "",
                "must be a map, a list or an explicit condition helper",
            )),
        }
    }

    /// One `key: value` entry without an attribute context.
    fn entry(&self, key: &Key, value: &Condition) -> WhereResult<Expr> {
        if let Condition::Undefined = value {
            return Err(WhereError::undefined(key.label()));
        }
        match key {
            Key::Op(op @ (Op::And | Op::Or)) => self.logical_group(*op, key, value),
            Key::Op(Op::Not) => {
                let inner = match value {
                    Condition::Map(_) | Condition::List(_) => {
                        expr::and(self.group_operands(key, value)?)
                    }
                    other => self.group_item(other)?,
                };
                Ok(expr::not(inner))
            }
            Key::Op(op) => Err(WhereError::malformed(
                key.label(),
                format!("operator \"{}\" must be applied to an attribute", op),
            )),
            Key::Attr(name) => {
                let target = self.resolve_attribute(name)?;
                self.value(&target, value)
            }
        }
    }

    fn logical_group(&self, op: Op, key: &Key, value: &Condition) -> WhereResult<Expr> {
        let operands = self.group_operands(key, value)?;
        Ok(match op {
            Op::Or => expr::or(operands),
            _ => expr::and(operands),
        })
    }

    /// Operands of an AND / OR / NOT group without an attribute context.
    fn group_operands(&self, key: &Key, value: &Condition) -> WhereResult<Vec<Expr>> {
        match value {
            Condition::List(items) => items
                .iter()
                .filter(|item| !matches!(item, Condition::Map(entries) if entries.is_empty()))
                .map(|item| self.group_item(item))
                .collect(),
            Condition::Map(entries) => entries
                .iter()
                .map(|(k, v)| self.entry(k, v))
                .collect(),
            _ => Err(WhereError::malformed(
                key.label(),
                "expects a list or a map of conditions",
            )),
        }
    }

    /// A standalone sub-condition: maps become AND groups.
    fn group_item(&self, item: &Condition) -> WhereResult<Expr> {
        match item {
            Condition::Map(entries) => Ok(expr::and(
                entries
                    .iter()
                    .map(|(k, v)| self.entry(k, v))
                    .collect::<WhereResult<_>>()?,
            )),
            Condition::List(items) => Ok(expr::and(
                items
                    .iter()
                    .map(|i| self.group_item(i))
                    .collect::<WhereResult<_>>()?,
            )),
            Condition::Raw(sql) => Ok(Expr::Raw(sql.clone())),
            Condition::Where { left, op, right } => self.where_condition(left, *op, right),
            Condition::JsonPath { path, value } => self.json_path(path, value),
            Condition::JsonObject(object) => Ok(expr::and(self.json_object(object)?)),
            Condition::Undefined => Err(WhereError::undefined("")),
            _ => Err(WhereError::malformed(
                "",
                "group members must be maps or explicit condition helpers",
            )),
        }
    }

    // =========================================================================
    // Attribute resolution
    // =========================================================================

    fn resolve_attribute(&self, key: &str) -> WhereResult<Target> {
        let parsed = parse_key(key);
        let head = &parsed.segments[0];
        let meta = self.ctx.model.and_then(|m| m.attribute(head));
        let ty = match meta {
            Some(meta) => meta.ty.clone(),
            None => self.ctx.attribute_type.cloned(),
        };
        let json_head = ty.as_ref().is_some_and(DataType::is_json);

        if parsed.cross_join || (parsed.segments.len() > 1 && !json_head) {
            let mut attr = column_ref(key.split("::").next().unwrap_or(key));
            attr.cross_join = parsed.cross_join;
            let mut target = Target::plain(Expr::Column(attr), None, key);
            target.cast = parsed.cast;
            return Ok(target);
        }

        if self.ctx.model.is_some() && meta.is_none() {
            return Err(WhereError::unknown_attribute(head.clone()));
        }

        let mut attr = AttributeRef::new(head.clone())
            .with_prefix(self.ctx.prefix.cloned())
            .with_type(ty.clone());
        if let Some(meta) = meta {
            attr = attr.with_meta(meta);
        }

        Ok(Target {
            base: Expr::Column(attr),
            ty,
            json_path: parsed.segments[1..].iter().map(|s| path_segment(s)).collect(),
            cast: parsed.cast,
            label: key.to_string(),
        })
    }

    // =========================================================================
    // Values under an attribute
    // =========================================================================

    fn value(&self, target: &Target, value: &Condition) -> WhereResult<Expr> {
        match value {
            Condition::Undefined => Err(WhereError::undefined(&target.label)),
            Condition::Map(entries) => {
                if entries.is_empty() {
                    return Err(WhereError::malformed(&target.label, "has an empty condition map"));
                }
                let mut leaves = Vec::new();
                self.collect(target, entries, &mut leaves)?;
                Ok(single_or_and(leaves))
            }
            Condition::List(_) => self.operator(target, Op::In, value),
            Condition::Null => Ok(target.compare(Op::Is, expr::lit_null())),
            _ => Ok(target.compare(Op::Eq, self.operand(target, value)?)),
        }
    }

    /// Flatten a nested map: plain keys descend into JSON, operator keys
    /// apply to the current path.
    fn collect(
        &self,
        target: &Target,
        entries: &[(Key, Condition)],
        out: &mut Vec<Expr>,
    ) -> WhereResult<()> {
        for (key, value) in entries {
            match key {
                Key::Op(op) => out.push(self.operator(target, *op, value)?),
                Key::Attr(name) => {
                    let child = target.descend(name);
                    match value {
                        Condition::Map(inner) if !inner.is_empty() => {
                            self.collect(&child, inner, out)?
                        }
                        other => out.push(self.value(&child, other)?),
                    }
                }
            }
        }
        Ok(())
    }

    /// `attr: {op: value}`
    fn operator(&self, target: &Target, op: Op, value: &Condition) -> WhereResult<Expr> {
        if let Condition::Undefined = value {
            return Err(WhereError::undefined(&target.label));
        }

        match op {
            Op::And | Op::Or => {
                let operands = match value {
                    Condition::List(items) => items
                        .iter()
                        .filter(|item| !matches!(item, Condition::Map(e) if e.is_empty()))
                        .map(|item| self.value(target, item))
                        .collect::<WhereResult<Vec<_>>>()?,
                    Condition::Map(entries) => entries
                        .iter()
                        .map(|(k, v)| {
                            let mut leaves = Vec::new();
                            self.collect(target, std::slice::from_ref(&(k.clone(), v.clone())), &mut leaves)?;
                            Ok(single_or_and(leaves))
                        })
                        .collect::<WhereResult<Vec<_>>>()?,
                    _ => {
                        return Err(WhereError::malformed(
                            &target.label,
                            format!("\"{}\" expects a list or a map", op),
                        ))
                    }
                };
                Ok(if op == Op::Or {
                    expr::or(operands)
                } else {
                    expr::and(operands)
                })
            }

            Op::Not => match value {
                Condition::Null => Ok(target.compare(Op::Not, expr::lit_null())),
                Condition::Bool(b) => Ok(target.compare(Op::Not, expr::lit(Literal::Bool(*b)))),
                Condition::Map(_) | Condition::List(_) => Ok(expr::not(self.value(target, value)?)),
                other => Ok(target.compare(Op::Ne, self.operand(target, other)?)),
            },

            Op::Is => match value {
                Condition::Null => Ok(target.compare(Op::Is, expr::lit_null())),
                Condition::Bool(b) => Ok(target.compare(Op::Is, expr::lit(Literal::Bool(*b)))),
                _ => Err(WhereError::malformed(
                    &target.label,
                    "\"is\" only accepts null or a boolean",
                )),
            },

            Op::Eq | Op::Ne | Op::Gt | Op::Gte | Op::Lt | Op::Lte => {
                let right = match value {
                    Condition::List(items) => self.array(target, items)?,
                    other => self.operand(target, other)?,
                };
                Ok(target.compare(op, right))
            }

            Op::Between | Op::NotBetween => match value {
                Condition::List(items) if items.len() == 2 => {
                    trace!(attribute = %target.label, "between pair");
                    let pair = items
                        .iter()
                        .map(|i| self.operand(target, i))
                        .collect::<WhereResult<Vec<_>>>()?;
                    Ok(target.compare(op, Expr::List(pair)))
                }
                _ => Err(WhereError::malformed(
                    &target.label,
                    format!("\"{}\" expects exactly two values", op),
                )),
            },

            Op::In | Op::NotIn => {
                let right = match value {
                    Condition::List(items) => Expr::List(
                        items
                            .iter()
                            .map(|i| self.operand(target, i))
                            .collect::<WhereResult<_>>()?,
                    ),
                    Condition::Raw(sql) => Expr::Raw(sql.clone()),
                    Condition::Map(_) => {
                        return Err(WhereError::malformed(
                            &target.label,
                            format!("\"{}\" expects a list of values", op),
                        ))
                    }
                    other => Expr::List(vec![self.operand(target, other)?]),
                };
                Ok(target.compare(op, right))
            }

            Op::StartsWith | Op::EndsWith | Op::Substring => {
                let text = match value {
                    Condition::String(s) | Condition::Raw(s) => s,
                    _ => {
                        return Err(WhereError::malformed(
                            &target.label,
                            format!("\"{}\" expects a string", op),
                        ))
                    }
                };
                let (before, after) = op.like_affixes().unwrap_or(("", ""));
                let pattern = format!("{}{}{}", before, text, after);
                Ok(target.compare(op, expr::lit(Literal::String(pattern))))
            }

            Op::Col => match value {
                Condition::String(name) => Ok(target.compare(Op::Eq, Expr::Column(column_ref(name)))),
                _ => Err(WhereError::malformed(
                    &target.label,
                    "\"col\" expects a column name",
                )),
            },

            Op::Any | Op::All => Ok(target.compare(Op::Eq, self.quantified(target, op, value)?)),

            Op::Values => Err(WhereError::malformed(
                &target.label,
                "\"values\" must be nested under \"any\" or \"all\"",
            )),

            Op::Contains | Op::Contained | Op::Overlap => {
                let right = self.containment(target, op, value)?;
                Ok(target.compare(op, right))
            }

            Op::Adjacent | Op::StrictLeft | Op::StrictRight | Op::NoExtendLeft | Op::NoExtendRight => {
                match value {
                    Condition::List(items) if items.len() == 2 => {
                        Ok(target.compare(op, self.range(target, items)?))
                    }
                    _ => Err(WhereError::malformed(
                        &target.label,
                        format!("\"{}\" expects a pair of range bounds", op),
                    )),
                }
            }

            Op::Like
            | Op::NotLike
            | Op::ILike
            | Op::NotILike
            | Op::Regexp
            | Op::NotRegexp
            | Op::IRegexp
            | Op::NotIRegexp
            | Op::Match => Ok(target.compare(op, self.operand(target, value)?)),
        }
    }

    // =========================================================================
    // Operands
    // =========================================================================

    /// Right-hand operand of a binary comparison.
    fn operand(&self, target: &Target, value: &Condition) -> WhereResult<Expr> {
        match value {
            Condition::Map(entries) => match entries.as_slice() {
                [(Key::Op(Op::Col), Condition::String(name))] => Ok(Expr::Column(column_ref(name))),
                [(Key::Op(op @ (Op::Any | Op::All)), inner)] => self.quantified(target, *op, inner),
                _ => Err(WhereError::malformed(
                    &target.label,
                    "has a nested map where a single value is expected",
                )),
            },
            Condition::List(_) => Err(WhereError::malformed(
                &target.label,
                "has a list where a single value is expected",
            )),
            other if other.is_scalar() => Ok(expr::lit(self.literal(target, other)?)),
            other => self.helper(other, &target.label),
        }
    }

    /// Explicit helper nodes (`col`, `fn`, `cast`, `literal`, attributes) and scalars.
    fn helper(&self, value: &Condition, label: &str) -> WhereResult<Expr> {
        match value {
            Condition::Raw(sql) => Ok(Expr::Raw(sql.clone())),
            Condition::Col(name) => Ok(Expr::Column(column_ref(name))),
            Condition::Fn { name, args } => Ok(Expr::Function {
                name: name.clone(),
                args: args
                    .iter()
                    .map(|a| self.helper(a, label))
                    .collect::<WhereResult<_>>()?,
            }),
            Condition::Cast { value, ty } => Ok(Expr::Cast {
                inner: Box::new(self.helper(value, label)?),
                target: ty.clone(),
                style: CastStyle::Function,
            }),
            Condition::Attribute(meta) => Ok(Expr::Column(AttributeRef::from(meta))),
            Condition::Undefined => Err(WhereError::undefined(label)),
            other if other.is_scalar() => Ok(expr::lit(scalar_literal(other, None, label)?)),
            _ => Err(WhereError::malformed(label, "cannot be used as an operand")),
        }
    }

    fn literal(&self, target: &Target, value: &Condition) -> WhereResult<Literal> {
        scalar_literal(value, target.value_type(), &target.label)
    }

    /// `ARRAY[...]`, typed when the attribute is an array.
    fn array(&self, target: &Target, items: &[Condition]) -> WhereResult<Expr> {
        let element_type = target
            .value_type()
            .and_then(DataType::element_type)
            .map(ToString::to_string);
        let elements = items
            .iter()
            .map(|i| {
                let lit = scalar_literal(i, None, &target.label)?;
                Ok(expr::lit(lit))
            })
            .collect::<WhereResult<_>>()?;
        Ok(Expr::Array {
            elements,
            element_type,
        })
    }

    /// `ANY (...)` / `ALL (...)` over an array, a VALUES list or raw SQL.
    fn quantified(&self, target: &Target, op: Op, value: &Condition) -> WhereResult<Expr> {
        let quantifier = if op == Op::All {
            Quantifier::All
        } else {
            Quantifier::Any
        };
        let operand = match value {
            Condition::List(items) => self.array(target, items)?,
            Condition::Raw(sql) => Expr::Raw(sql.clone()),
            Condition::Map(entries) => match entries.as_slice() {
                [(Key::Op(Op::Values), Condition::List(items))] => Expr::Values(
                    items
                        .iter()
                        .map(|i| Ok(expr::lit(scalar_literal(i, None, &target.label)?)))
                        .collect::<WhereResult<_>>()?,
                ),
                _ => {
                    return Err(WhereError::malformed(
                        &target.label,
                        format!("\"{}\" expects a list, \"values\" or a literal", op),
                    ))
                }
            },
            _ => {
                return Err(WhereError::malformed(
                    &target.label,
                    format!("\"{}\" expects a list, \"values\" or a literal", op),
                ))
            }
        };
        Ok(Expr::Quantified {
            quantifier,
            operand: Box::new(operand),
        })
    }

    /// Right side of `@>`, `<@` and `&&`.
    fn containment(&self, target: &Target, op: Op, value: &Condition) -> WhereResult<Expr> {
        let range_type = target.value_type().filter(|t| t.is_range());

        match (value, range_type) {
            (Condition::List(items), Some(_)) if items.len() == 2 && op.accepts_range() => {
                self.range(target, items)
            }
            (Condition::List(items), _) => self.array(target, items),
            (Condition::Map(entries), _) if entries.iter().all(|(k, _)| k.as_op().is_none()) => {
                Ok(expr::lit(Literal::Json(condition_to_json(value, &target.label)?)))
            }
            (other, Some(range)) if other.is_scalar() => {
                let element = expr::lit(self.literal(target, other)?);
                Ok(match range.range_subtype_name() {
                    Some(subtype) => Expr::Cast {
                        inner: Box::new(element),
                        target: subtype.to_string(),
                        style: CastStyle::Postfix,
                    },
                    None => element,
                })
            }
            (other, _) => self.operand(target, other),
        }
    }

    fn range(&self, target: &Target, items: &[Condition]) -> WhereResult<Expr> {
        trace!(attribute = %target.label, "range bound pair");
        let lower = range_bound(&items[0], true, &target.label)?;
        let upper = range_bound(&items[1], false, &target.label)?;
        Ok(Expr::Range(RangeBounds { lower, upper }))
    }

    // =========================================================================
    // Helpers: where(), json()
    // =========================================================================

    fn where_condition(
        &self,
        left: &Condition,
        op: Option<Op>,
        right: &Condition,
    ) -> WhereResult<Expr> {
        let (base, ty) = match left {
            Condition::String(name) => (Expr::Column(column_ref(name)), None),
            Condition::Attribute(meta) => (Expr::Column(AttributeRef::from(meta)), meta.ty.clone()),
            other => (self.helper(other, "where")?, None),
        };
        let target = Target::plain(base, ty, "where");
        match op {
            Some(op) => self.operator(&target, op, right),
            None => self.value(&target, right),
        }
    }

    /// `json("column.a.b", value)`. The column is never table-prefixed.
    fn json_path(&self, path: &str, value: &Condition) -> WhereResult<Expr> {
        let target = self.json_target(path)?;
        self.value(&target, value)
    }

    /// `json({column: {a: value}})`: every leaf becomes its own conjunct.
    fn json_object(&self, object: &Condition) -> WhereResult<Vec<Expr>> {
        let Condition::Map(entries) = object else {
            return Err(WhereError::malformed("json", "expects a map"));
        };
        let mut leaves = Vec::new();
        for (key, value) in entries {
            let Key::Attr(name) = key else {
                return Err(WhereError::malformed(key.label(), "json keys must be columns"));
            };
            let target = self.json_target(name)?;
            match value {
                Condition::Map(inner) if !inner.is_empty() => {
                    self.collect(&target, inner, &mut leaves)?
                }
                other => leaves.push(self.value(&target, other)?),
            }
        }
        Ok(leaves)
    }

    fn json_target(&self, path: &str) -> WhereResult<Target> {
        let parsed = parse_key(path);
        let head = &parsed.segments[0];
        let mut attr = AttributeRef::new(head.clone());
        if let Some(meta) = self.ctx.model.and_then(|m| m.attribute(head)) {
            attr = attr.with_meta(meta);
        }
        Ok(Target {
            base: Expr::Column(attr),
            ty: Some(DataType::Json),
            json_path: parsed.segments[1..].iter().map(|s| path_segment(s)).collect(),
            cast: parsed.cast,
            label: path.to_string(),
        })
    }
}

fn single_or_and(mut leaves: Vec<Expr>) -> Expr {
    if leaves.len() == 1 {
        leaves.remove(0)
    } else {
        expr::and(leaves)
    }
}

/// Scalar to literal. Integers compared with temporal attributes are epoch
/// milliseconds.
fn scalar_literal(value: &Condition, ty: Option<&DataType>, label: &str) -> WhereResult<Literal> {
    Ok(match value {
        Condition::Null => Literal::Null,
        Condition::Bool(b) => Literal::Bool(*b),
        Condition::Int(n) if ty.is_some_and(DataType::is_temporal) => {
            match DateTime::from_timestamp_millis(*n) {
                Some(d) => Literal::Date(d),
                None => return Err(WhereError::malformed(label, "has an out-of-range timestamp")),
            }
        }
        Condition::Int(n) => Literal::Int(*n),
        Condition::Float(f) if !f.is_finite() => {
            return Err(WhereError::malformed(label, "has a non-finite number"))
        }
        Condition::Float(f) => Literal::Float(*f),
        Condition::String(s) => Literal::String(s.clone()),
        Condition::Date(d) => Literal::Date(*d),
        Condition::Buffer(b) => Literal::Buffer(b.clone()),
        Condition::Undefined => return Err(WhereError::undefined(label)),
        _ => return Err(WhereError::malformed(label, "expects a scalar value")),
    })
}

/// One side of a range: scalar, null (unbounded), ±infinity or
/// `{value, inclusive}`.
fn range_bound(value: &Condition, lower: bool, label: &str) -> WhereResult<RangeBound> {
    match value {
        Condition::Float(f) if f.is_infinite() => Ok(RangeBound {
            value: Literal::Float(*f),
            inclusive: lower,
        }),
        Condition::Map(entries) => {
            let mut bound = RangeBound {
                value: Literal::Null,
                inclusive: lower,
            };
            for (key, v) in entries {
                match (key, v) {
                    (Key::Attr(k), v) if k == "value" => {
                        bound.value = range_bound(v, lower, label)?.value;
                    }
                    (Key::Attr(k), Condition::Bool(b)) if k == "inclusive" => bound.inclusive = *b,
                    _ => {
                        return Err(WhereError::malformed(
                            label,
                            "range bounds accept only \"value\" and \"inclusive\"",
                        ))
                    }
                }
            }
            Ok(bound)
        }
        other => Ok(RangeBound {
            value: scalar_literal(other, None, label)?,
            inclusive: lower,
        }),
    }
}

/// JSON document for containment checks.
fn condition_to_json(value: &Condition, label: &str) -> WhereResult<serde_json::Value> {
    use serde_json::Value;

    Ok(match value {
        Condition::Null => Value::Null,
        Condition::Bool(b) => Value::Bool(*b),
        Condition::Int(n) => Value::from(*n),
        Condition::Float(f) => serde_json::Number::from_f64(*f)
            .map(Value::Number)
            .ok_or_else(|| WhereError::malformed(label, "has a non-finite number"))?,
        Condition::String(s) => Value::String(s.clone()),
        Condition::Date(d) => Value::String(super::escape::iso_date(d)),
        Condition::List(items) => Value::Array(
            items
                .iter()
                .map(|i| condition_to_json(i, label))
                .collect::<WhereResult<_>>()?,
        ),
        Condition::Map(entries) => {
            let mut object = serde_json::Map::new();
            for (key, v) in entries {
                let Key::Attr(k) = key else {
                    return Err(WhereError::malformed(label, "JSON documents cannot contain operators"));
                };
                object.insert(k.clone(), condition_to_json(v, label)?);
            }
            Value::Object(object)
        }
        Condition::Undefined => return Err(WhereError::undefined(label)),
        _ => return Err(WhereError::malformed(label, "cannot be written as JSON")),
    })
}
