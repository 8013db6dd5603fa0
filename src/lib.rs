//! # Sieve
//!
//! A WHERE-clause compiler: structured filter conditions in, dialect-correct
//! SQL predicates out.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │                Condition (caller input)                  │
//! │  (maps, lists, operators, literal/col/fn/cast/where/json)│
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [normalize]
//! ┌─────────────────────────────────────────────────────────┐
//! │                  Canonical Expr tree                     │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [compiler + dialect]
//! ┌─────────────────────────────────────────────────────────┐
//! │                    TokenStream                           │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [render: inline or parameterized]
//! ┌─────────────────────────────────────────────────────────┐
//! │                 SQL fragment + binds                     │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```ignore
//! use sieve::prelude::*;
//!
//! let cond = Condition::map()
//!     .entry("name", "a project")
//!     .entry("id", Condition::map().entry(Op::Gt, 10));
//! let out = compile_where(&cond, &CompileOptions::new(Dialect::TSql))?;
//! assert_eq!(out.sql, "[name] = N'a project' AND [id] > 10");
//! ```

pub mod compile;
pub mod config;
pub mod error;
pub mod sql;

// Re-export SQL submodules at crate level for convenience
pub use sql::condition;
pub use sql::dialect;
pub use sql::expr;
pub use sql::operator;
pub use sql::token;

/// Re-exports for convenient usage.
pub mod prelude {
    pub use crate::compile::{compile_where, where_query, CompileOptions, CompileOutput};
    pub use crate::condition::{
        and, cast, col, func, json, json_path, literal, not, or, where_, where_value, Condition,
        Key,
    };
    pub use crate::dialect::{Dialect, SqlDialect};
    pub use crate::error::{WhereError, WhereResult};
    pub use crate::expr::Literal;
    pub use crate::operator::Op;
    pub use crate::sql::attribute::{AttributeLookup, AttributeMeta, ModelAttributes};
    pub use crate::sql::types::DataType;
    pub use crate::token::BindMode;
}

// Also export at crate root for convenience
pub use compile::{compile_where, where_query, CompileOptions, CompileOutput};
pub use condition::Condition;
pub use dialect::Dialect;
pub use error::{WhereError, WhereResult};
pub use operator::Op;
