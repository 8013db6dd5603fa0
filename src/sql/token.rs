//! SQL Tokens - the atomic units of SQL output.
//!
//! Tokens are dialect-agnostic representations that serialize
//! to dialect-specific strings. Value tokens ([`Token::Lit`], [`Token::Range`])
//! are either escaped inline or replaced by bind placeholders, depending on
//! the [`BindMode`] passed to [`TokenStream::render`]. Structural text such as
//! identifiers, JSON paths and type names is always written inline.

use chrono::{FixedOffset, Offset, Utc};
use serde::{Deserialize, Serialize};

use super::dialect::{Dialect, SqlDialect};
use super::escape;
use super::expr::{Literal, RangeBounds};

/// SQL Token - every element a WHERE fragment can contain.
///
/// Adding a new variant here will cause compile errors everywhere
/// it needs to be handled (exhaustive matching).
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    // === Keywords ===
    And,
    Or,
    Not,
    Is,
    In,
    Between,
    Null,
    Any,
    All,
    Array,
    Values,
    Cast,
    As,

    // === Punctuation ===
    Comma,
    Dot,
    Colon,
    DoubleColon,
    LParen,
    RParen,
    LBracket,
    RBracket,
    Space,

    // === Operators ===
    /// Infix operator text (`=`, `!=`, `@>`, `NOT LIKE`, ...).
    Operator(&'static str),

    // === Dynamic Content ===
    /// Simple identifier (table, column, JSON member).
    Ident(String),
    /// Association path joined by the dialect's separator inside one identifier.
    AssociationIdent(Vec<String>),
    /// Value literal; bound as a parameter in parameterized mode.
    Lit(Literal),
    /// Range literal; bound as its text form in parameterized mode.
    Range(RangeBounds),
    /// Boolean written in keyword position (`IS NOT true`); never bound.
    BoolKeyword(bool),
    /// Pre-quoted path text for JSON extraction; never bound.
    PathLiteral(String),
    /// Type name written verbatim.
    TypeName(String),
    /// Function name written verbatim.
    FunctionName(String),

    // === Escape Hatch ===
    /// Raw SQL passed directly to output without escaping.
    ///
    /// # Security Warning
    ///
    /// **Never pass user input to this variant.** Raw SQL is not sanitized
    /// and can lead to SQL injection vulnerabilities. Only use with:
    /// - Trusted, static SQL fragments
    /// - Caller-supplied `literal(...)` conditions
    ///
    /// For user-provided values, use `Token::Lit`, which escapes or binds the
    /// value for the target dialect.
    Raw(String),
}

/// How value literals are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BindMode {
    /// Escape every value into the SQL text.
    #[default]
    Inline,
    /// Emit placeholders and collect values in emission order.
    Parameterized,
}

/// Options controlling how a token stream becomes text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    pub bind_mode: BindMode,
    /// Offset used when writing date literals.
    pub timezone: FixedOffset,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            bind_mode: BindMode::Inline,
            timezone: Utc.fix(),
        }
    }
}

/// SQL text plus bind values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Rendered {
    pub sql: String,
    pub binds: Vec<Literal>,
}

impl Token {
    /// Serialize this token with inline literals.
    pub fn serialize(&self, dialect: Dialect) -> String {
        let mut binds = Vec::new();
        self.render(dialect, &RenderOptions::default(), &mut binds)
    }

    fn render(&self, dialect: Dialect, opts: &RenderOptions, binds: &mut Vec<Literal>) -> String {
        match self {
            // Keywords
            Token::And => "AND".into(),
            Token::Or => "OR".into(),
            Token::Not => "NOT".into(),
            Token::Is => "IS".into(),
            Token::In => "IN".into(),
            Token::Between => "BETWEEN".into(),
            Token::Null => dialect.format_null().into(),
            Token::Any => "ANY".into(),
            Token::All => "ALL".into(),
            Token::Array => "ARRAY".into(),
            Token::Values => "VALUES".into(),
            Token::Cast => "CAST".into(),
            Token::As => "AS".into(),

            // Punctuation
            Token::Comma => ",".into(),
            Token::Dot => ".".into(),
            Token::Colon => ":".into(),
            Token::DoubleColon => "::".into(),
            Token::LParen => "(".into(),
            Token::RParen => ")".into(),
            Token::LBracket => "[".into(),
            Token::RBracket => "]".into(),
            Token::Space => " ".into(),

            Token::Operator(op) => (*op).into(),

            // Dynamic - dialect-specific formatting
            Token::Ident(name) => dialect.quote_identifier(name),
            Token::AssociationIdent(path) => {
                dialect.quote_identifier(&path.join(dialect.association_separator()))
            }
            Token::Lit(lit) => match opts.bind_mode {
                BindMode::Inline => escape::escape_literal(&dialect, lit, &opts.timezone),
                BindMode::Parameterized => {
                    binds.push(lit.clone());
                    dialect.placeholder(binds.len())
                }
            },
            Token::Range(range) => {
                let text = escape::format_range(&dialect, range, &opts.timezone);
                match opts.bind_mode {
                    BindMode::Inline => dialect.quote_string(&text),
                    BindMode::Parameterized => {
                        binds.push(Literal::String(text));
                        dialect.placeholder(binds.len())
                    }
                }
            }
            Token::BoolKeyword(b) => dialect.format_bool(*b).into(),
            Token::PathLiteral(path) => path.clone(),
            Token::TypeName(name) => name.clone(),
            Token::FunctionName(name) => name.clone(),

            // Escape hatch
            Token::Raw(s) => s.clone(),
        }
    }
}

/// A stream of tokens that can be serialized to SQL.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TokenStream {
    tokens: Vec<Token>,
}

impl TokenStream {
    /// Create an empty token stream.
    pub fn new() -> Self {
        Self { tokens: vec![] }
    }

    /// Push a single token.
    pub fn push(&mut self, token: Token) -> &mut Self {
        self.tokens.push(token);
        self
    }

    /// Append another token stream.
    pub fn append(&mut self, other: &TokenStream) -> &mut Self {
        self.tokens.extend(other.tokens.iter().cloned());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Render to SQL text, collecting bind values in emission order.
    pub fn render(&self, dialect: Dialect, opts: &RenderOptions) -> Rendered {
        let mut binds = Vec::new();
        let sql = self
            .tokens
            .iter()
            .map(|t| t.render(dialect, opts, &mut binds))
            .collect();
        Rendered { sql, binds }
    }

    /// Serialize all tokens to a SQL string with inline literals.
    pub fn serialize(&self, dialect: Dialect) -> String {
        self.render(dialect, &RenderOptions::default()).sql
    }

    // Convenience methods for common tokens
    pub fn space(&mut self) -> &mut Self {
        self.push(Token::Space)
    }
    pub fn comma(&mut self) -> &mut Self {
        self.push(Token::Comma)
    }
    pub fn lparen(&mut self) -> &mut Self {
        self.push(Token::LParen)
    }
    pub fn rparen(&mut self) -> &mut Self {
        self.push(Token::RParen)
    }
    /// ` <op> ` with surrounding spaces.
    pub fn operator(&mut self, op: &'static str) -> &mut Self {
        self.space().push(Token::Operator(op)).space()
    }
}
