//! Expression compiler - canonical [`Expr`] trees to dialect token streams.
//!
//! The compiler never looks at caller input shapes; every decision here is
//! driven by the expression node and the dialect:
//!
//! - `IS NULL` / `IS NOT NULL` for null comparisons
//! - vanishing operands (`NOT IN ()` compiles to nothing) and always-false
//!   empty groups (`0 = 1`)
//! - capability checks before any dialect-specific construct is emitted
//! - JSON extraction plus the cast needed to compare the extracted value

use super::dialect::{Dialect, JsonCoercion, JsonValueKind, SqlDialect};
use super::escape::iso_date;
use super::expr::{CastStyle, Expr, Literal, LogicalOp, Quantifier};
use super::operator::{Capability, Op};
use super::quote::attribute_tokens;
use super::token::{Token, TokenStream};
use crate::error::{WhereError, WhereResult};

/// Compiled boolean fragment.
#[derive(Debug, Clone, PartialEq)]
pub struct Fragment {
    pub tokens: TokenStream,
    /// Already wrapped in parentheses as a multi-operand group.
    pub grouped: bool,
}

impl Fragment {
    fn bare(tokens: TokenStream) -> Self {
        Self {
            tokens,
            grouped: false,
        }
    }
}

/// Compiles expressions for one dialect.
#[derive(Debug, Clone, Copy)]
pub struct Compiler {
    dialect: Dialect,
}

impl Compiler {
    pub fn new(dialect: Dialect) -> Self {
        Self { dialect }
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    /// Compile top-level conjuncts joined by a bare ` AND `.
    ///
    /// Conjuncts that vanish are skipped; an empty result means no filter.
    pub fn compile_conjuncts(&self, exprs: &[Expr]) -> WhereResult<TokenStream> {
        let mut ts = TokenStream::new();
        for expr in exprs {
            if let Some(fragment) = self.compile(expr)? {
                if !ts.is_empty() {
                    ts.space().push(Token::And).space();
                }
                ts.append(&fragment.tokens);
            }
        }
        Ok(ts)
    }

    /// Compile a boolean expression. `None` means the expression vanished
    /// and imposes no constraint.
    pub fn compile(&self, expr: &Expr) -> WhereResult<Option<Fragment>> {
        match expr {
            Expr::Logical { op, operands } => self.logical(*op, operands),
            Expr::Comparison { left, op, right } => self.comparison(left, *op, right),
            other => Ok(Some(Fragment::bare(self.operand(other)?))),
        }
    }

    // =========================================================================
    // Logical groups
    // =========================================================================

    fn logical(&self, op: LogicalOp, operands: &[Expr]) -> WhereResult<Option<Fragment>> {
        if operands.is_empty() {
            return Ok(Some(always_false()));
        }

        if op == LogicalOp::Not {
            if let Some(Expr::Logical { operands: inner, op: inner_op }) = operands.first() {
                if inner.is_empty() && *inner_op != LogicalOp::Not {
                    return Ok(Some(always_false()));
                }
            }
            return Ok(Some(match self.compile(&operands[0])? {
                None => always_false(),
                Some(fragment) => {
                    let mut ts = TokenStream::new();
                    ts.push(Token::Not).space();
                    if fragment.grouped {
                        ts.append(&fragment.tokens);
                    } else {
                        ts.lparen().append(&fragment.tokens).rparen();
                    }
                    Fragment::bare(ts)
                }
            }));
        }

        let mut parts = Vec::with_capacity(operands.len());
        for operand in operands {
            match self.compile(operand)? {
                Some(fragment) => parts.push(fragment),
                // An always-true operand makes the whole OR always true.
                None if op == LogicalOp::Or => return Ok(None),
                None => {}
            }
        }

        match parts.len() {
            0 => Ok(None),
            1 => Ok(parts.pop()),
            _ => {
                let joiner = if op == LogicalOp::Or { Token::Or } else { Token::And };
                let mut ts = TokenStream::new();
                ts.lparen();
                for (i, part) in parts.iter().enumerate() {
                    if i > 0 {
                        ts.space().push(joiner.clone()).space();
                    }
                    ts.append(&part.tokens);
                }
                ts.rparen();
                Ok(Some(Fragment {
                    tokens: ts,
                    grouped: true,
                }))
            }
        }
    }

    // =========================================================================
    // Comparisons
    // =========================================================================

    fn comparison(&self, left: &Expr, op: Op, right: &Expr) -> WhereResult<Option<Fragment>> {
        self.require_operator(op)?;

        let (left_ts, right) = self.coerce_json(left, right)?;
        let right = right.as_ref();
        let mut ts = left_ts;

        match (op, right) {
            (Op::Eq | Op::Is, r) if r.is_null() => {
                ts.space().push(Token::Is).space().push(Token::Null);
            }
            (Op::Ne | Op::Not, r) if r.is_null() => {
                ts.space()
                    .push(Token::Is)
                    .space()
                    .push(Token::Not)
                    .space()
                    .push(Token::Null);
            }
            (Op::Is, Expr::Literal(Literal::Bool(b))) => {
                ts.space().push(Token::Is).space().push(Token::BoolKeyword(*b));
            }
            (Op::Not, Expr::Literal(Literal::Bool(b))) => {
                ts.space()
                    .push(Token::Is)
                    .space()
                    .push(Token::Not)
                    .space()
                    .push(Token::BoolKeyword(*b));
            }
            (Op::Is | Op::Not, _) => {
                return Err(WhereError::malformed(
                    op.name(),
                    "only compares against null or a boolean",
                ))
            }

            (Op::In | Op::NotIn, Expr::List(items)) => {
                if items.is_empty() {
                    if op == Op::NotIn {
                        return Ok(None);
                    }
                    ts.operator(self.dialect.operator_token(op))
                        .lparen()
                        .push(Token::Null)
                        .rparen();
                } else {
                    ts.operator(self.dialect.operator_token(op));
                    ts.append(&self.list(items)?);
                }
            }
            (Op::In | Op::NotIn, Expr::Raw(sql)) => {
                ts.operator(self.dialect.operator_token(op))
                    .push(Token::Raw(sql.clone()));
            }

            (Op::Between | Op::NotBetween, Expr::List(bounds)) if bounds.len() == 2 => {
                ts.operator(self.dialect.operator_token(op))
                    .append(&self.operand(&bounds[0])?)
                    .space()
                    .push(Token::And)
                    .space()
                    .append(&self.operand(&bounds[1])?);
            }
            (Op::Between | Op::NotBetween, _) => {
                return Err(WhereError::malformed(
                    op.name(),
                    "expects exactly two values",
                ))
            }

            (op, right) => {
                let right_ts = self.operand(right)?;
                ts.operator(self.dialect.operator_token(op)).append(&right_ts);
            }
        }

        Ok(Some(Fragment::bare(ts)))
    }

    /// Left side of a comparison and the possibly rewritten right side.
    ///
    /// A bare JSON path compared with a typed literal is cast (or the literal
    /// is written as text) the way the dialect compares extracted values.
    fn coerce_json<'e>(
        &self,
        left: &Expr,
        right: &'e Expr,
    ) -> WhereResult<(TokenStream, std::borrow::Cow<'e, Expr>)> {
        use std::borrow::Cow;

        let left_ts = self.operand(left)?;
        if !matches!(left, Expr::JsonPath { .. }) {
            return Ok((left_ts, Cow::Borrowed(right)));
        }

        let kind = match right.leading_literal() {
            Some(Literal::Int(_) | Literal::Float(_)) => JsonValueKind::Number,
            Some(Literal::Bool(_)) => JsonValueKind::Boolean,
            Some(Literal::Date(_)) => JsonValueKind::Date,
            Some(Literal::String(_)) => JsonValueKind::Text,
            _ => return Ok((left_ts, Cow::Borrowed(right))),
        };

        match self.dialect.json_coercion(kind) {
            JsonCoercion::None => Ok((left_ts, Cow::Borrowed(right))),
            JsonCoercion::Cast(ty) => {
                let mut ts = TokenStream::new();
                ts.push(Token::Cast)
                    .lparen()
                    .append(&left_ts)
                    .space()
                    .push(Token::As)
                    .space()
                    .push(Token::TypeName(ty.to_string()))
                    .rparen();
                Ok((ts, Cow::Borrowed(right)))
            }
            JsonCoercion::CompareAsText => Ok((left_ts, Cow::Owned(as_text(right)))),
        }
    }

    fn require(&self, capability: Capability) -> WhereResult<()> {
        if self.dialect.supports(capability) {
            Ok(())
        } else {
            Err(WhereError::unsupported(capability.name(), &self.dialect))
        }
    }

    fn require_operator(&self, op: Op) -> WhereResult<()> {
        match op.capability() {
            Some(capability) => self.require(capability),
            None => Ok(()),
        }
    }

    // =========================================================================
    // Operands
    // =========================================================================

    /// Tokens for a value expression.
    pub fn operand(&self, expr: &Expr) -> WhereResult<TokenStream> {
        let mut ts = TokenStream::new();
        match expr {
            Expr::Literal(Literal::Json(value)) => {
                self.require(Capability::JsonContainment)?;
                ts.push(Token::Lit(Literal::Json(value.clone())));
            }
            Expr::Literal(lit) => {
                ts.push(Token::Lit(lit.clone()));
            }
            Expr::Column(attr) => {
                ts.append(&attribute_tokens(attr));
            }
            Expr::Raw(sql) => {
                ts.push(Token::Raw(sql.clone()));
            }
            Expr::Function { name, args } => {
                ts.push(Token::FunctionName(name.clone())).lparen();
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        ts.comma().space();
                    }
                    ts.append(&self.operand(arg)?);
                }
                ts.rparen();
            }
            Expr::Cast {
                inner,
                target,
                style: CastStyle::Function,
            } => {
                ts.push(Token::Cast)
                    .lparen()
                    .append(&self.operand(inner)?)
                    .space()
                    .push(Token::As)
                    .space()
                    .push(Token::TypeName(self.dialect.cast_type_name(target)))
                    .rparen();
            }
            Expr::Cast {
                inner,
                target,
                style: CastStyle::Postfix,
            } => {
                self.require(Capability::Range)?;
                ts.append(&self.operand(inner)?)
                    .push(Token::DoubleColon)
                    .push(Token::TypeName(target.clone()));
            }
            Expr::JsonPath { base, path } => {
                self.require(Capability::Json)?;
                let base = self.operand(base)?;
                match self.dialect.emit_json_path(base, path) {
                    Some(path_ts) => {
                        ts.append(&path_ts);
                    }
                    None => return Err(WhereError::unsupported("JSON", &self.dialect)),
                }
            }
            Expr::List(items) => {
                ts.append(&self.list(items)?);
            }
            Expr::Array {
                elements,
                element_type,
            } => {
                self.require(Capability::Array)?;
                ts.push(Token::Array).push(Token::LBracket);
                for (i, element) in elements.iter().enumerate() {
                    if i > 0 {
                        ts.comma();
                    }
                    ts.append(&self.operand(element)?);
                }
                ts.push(Token::RBracket);
                if let Some(ty) = element_type {
                    ts.push(Token::DoubleColon)
                        .push(Token::TypeName(format!("{}[]", ty)));
                }
            }
            Expr::Range(bounds) => {
                self.require(Capability::Range)?;
                ts.push(Token::Range(bounds.clone()));
            }
            Expr::Values(items) => {
                self.require(Capability::Array)?;
                ts.push(Token::Values).space();
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        ts.comma().space();
                    }
                    ts.lparen().append(&self.operand(item)?).rparen();
                }
            }
            Expr::Quantified {
                quantifier,
                operand,
            } => {
                self.require(Capability::Array)?;
                ts.push(match quantifier {
                    Quantifier::Any => Token::Any,
                    Quantifier::All => Token::All,
                })
                .space()
                .lparen()
                .append(&self.operand(operand)?)
                .rparen();
            }
            Expr::Comparison { .. } | Expr::Logical { .. } => match self.compile(expr)? {
                Some(fragment) if fragment.grouped => {
                    ts.append(&fragment.tokens);
                }
                Some(fragment) => {
                    ts.lparen().append(&fragment.tokens).rparen();
                }
                None => {
                    ts.append(&always_true());
                }
            },
        }
        Ok(ts)
    }

    /// `(a, b, c)`
    fn list(&self, items: &[Expr]) -> WhereResult<TokenStream> {
        let mut ts = TokenStream::new();
        ts.lparen();
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                ts.comma().space();
            }
            ts.append(&self.operand(item)?);
        }
        ts.rparen();
        Ok(ts)
    }
}

/// `0 = 1`
fn always_false() -> Fragment {
    let mut ts = TokenStream::new();
    ts.push(Token::Raw("0".into()))
        .operator("=")
        .push(Token::Raw("1".into()));
    Fragment::bare(ts)
}

/// `1 = 1`
fn always_true() -> TokenStream {
    let mut ts = TokenStream::new();
    ts.push(Token::Raw("1".into()))
        .operator("=")
        .push(Token::Raw("1".into()));
    ts
}

/// Literal operands rewritten for text comparison against extracted JSON.
fn as_text(expr: &Expr) -> Expr {
    match expr {
        Expr::Literal(Literal::Bool(b)) => Expr::Literal(Literal::String(b.to_string())),
        Expr::Literal(Literal::Date(d)) => Expr::Literal(Literal::String(iso_date(d))),
        Expr::List(items) => Expr::List(items.iter().map(as_text).collect()),
        other => other.clone(),
    }
}
