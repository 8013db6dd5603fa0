//! Public compilation entry points.
//!
//! [`compile_where`] turns a [`Condition`] into a WHERE fragment (without the
//! `WHERE` keyword); [`where_query`] adds the keyword when the fragment is
//! non-empty. Both are pure: the same condition and options always give the
//! same text and binds.

use std::fmt;
use std::sync::Arc;

use chrono::{FixedOffset, Offset, Utc};
use tracing::debug;

use crate::error::WhereResult;
use crate::sql::attribute::{AttributeLookup, Prefix};
use crate::sql::compiler::Compiler;
use crate::sql::condition::Condition;
use crate::sql::dialect::Dialect;
use crate::sql::expr::Literal;
use crate::sql::normalize::{normalize, NormalizeContext};
use crate::sql::token::{BindMode, RenderOptions};
use crate::sql::types::DataType;

/// Options for one compilation.
#[derive(Debug, Clone)]
#[must_use = "options have no effect until passed to compile_where"]
pub struct CompileOptions {
    pub dialect: Dialect,
    /// Qualifier for attributes of the current table.
    pub prefix: Option<Prefix>,
    /// Type of the attribute under compilation when no model is given.
    pub attribute: Option<DataType>,
    /// Declared attributes; when set, plain keys must resolve against it.
    pub model: Option<Arc<dyn AttributeLookup>>,
    pub bind_mode: BindMode,
    /// Offset used to write date literals.
    pub timezone: FixedOffset,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            dialect: Dialect::default(),
            prefix: None,
            attribute: None,
            model: None,
            bind_mode: BindMode::Inline,
            timezone: Utc.fix(),
        }
    }
}

impl CompileOptions {
    pub fn new(dialect: Dialect) -> Self {
        Self {
            dialect,
            ..Self::default()
        }
    }

    pub fn with_dialect(mut self, dialect: Dialect) -> Self {
        self.dialect = dialect;
        self
    }

    /// Qualify attributes with a quoted table name.
    pub fn with_table_prefix(mut self, table: impl Into<String>) -> Self {
        self.prefix = Some(Prefix::Table(table.into()));
        self
    }

    /// Qualify attributes with pre-quoted SQL (`"yolo"."User"`).
    pub fn with_raw_prefix(mut self, sql: impl Into<String>) -> Self {
        self.prefix = Some(Prefix::Raw(sql.into()));
        self
    }

    pub fn with_attribute_type(mut self, ty: DataType) -> Self {
        self.attribute = Some(ty);
        self
    }

    pub fn with_model(mut self, model: Arc<dyn AttributeLookup>) -> Self {
        self.model = Some(model);
        self
    }

    /// Emit placeholders and return values as binds.
    pub fn parameterized(mut self) -> Self {
        self.bind_mode = BindMode::Parameterized;
        self
    }

    pub fn with_timezone(mut self, timezone: FixedOffset) -> Self {
        self.timezone = timezone;
        self
    }

    fn render_options(&self) -> RenderOptions {
        RenderOptions {
            bind_mode: self.bind_mode,
            timezone: self.timezone,
        }
    }
}

/// Compiled SQL text with its bind values.
#[derive(Debug, Clone, PartialEq)]
pub struct CompileOutput {
    pub sql: String,
    /// Values for the placeholders, in emission order. Empty in inline mode.
    pub binds: Vec<Literal>,
    pub dialect: Dialect,
}

impl CompileOutput {
    pub fn is_empty(&self) -> bool {
        self.sql.is_empty()
    }
}

impl fmt::Display for CompileOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.sql)
    }
}

/// Compile a condition to a WHERE fragment.
///
/// An empty condition, or one whose every part vanishes, yields an empty
/// string.
pub fn compile_where(cond: &Condition, opts: &CompileOptions) -> WhereResult<CompileOutput> {
    debug!(dialect = %opts.dialect, bind_mode = ?opts.bind_mode, "compiling where clause");

    let ctx = NormalizeContext {
        prefix: opts.prefix.as_ref(),
        attribute_type: opts.attribute.as_ref(),
        model: opts.model.as_deref(),
    };
    let exprs = normalize(cond, &ctx)?;
    let tokens = Compiler::new(opts.dialect).compile_conjuncts(&exprs)?;
    let rendered = tokens.render(opts.dialect, &opts.render_options());

    debug!(
        dialect = %opts.dialect,
        binds = rendered.binds.len(),
        empty = rendered.sql.is_empty(),
        "compiled where clause"
    );

    Ok(CompileOutput {
        sql: rendered.sql,
        binds: rendered.binds,
        dialect: opts.dialect,
    })
}

/// Like [`compile_where`], prefixed with `WHERE ` unless empty.
pub fn where_query(cond: &Condition, opts: &CompileOptions) -> WhereResult<CompileOutput> {
    let mut output = compile_where(cond, opts)?;
    if !output.sql.is_empty() {
        output.sql.insert_str(0, "WHERE ");
    }
    Ok(output)
}
