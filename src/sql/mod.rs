//! WHERE-clause compilation.
//!
//! Conditions flow through three stages:
//!
//! - [`condition`] - the loosely shaped caller input
//! - [`normalize`] - resolution into the canonical [`expr::Expr`] tree
//! - [`compiler`] - dialect-specific token streams, rendered by [`token`]
//!
//! Supporting modules:
//!
//! - [`operator`] - the operator registry
//! - [`dialect`] - SQL dialect implementations and capabilities
//! - [`attribute`] - model metadata and column references
//! - [`types`] - attribute data types
//! - [`escape`] / [`quote`] - literal escaping and identifier quoting

pub mod attribute;
pub mod compiler;
pub mod condition;
pub mod dialect;
pub mod escape;
pub mod expr;
pub mod normalize;
pub mod operator;
pub mod quote;
pub mod token;
pub mod types;


// Re-export commonly used types at the sql module level
pub use attribute::{AttributeLookup, AttributeMeta, AttributeRef, ModelAttributes, Prefix};
pub use compiler::Compiler;
pub use condition::{Condition, Key};
pub use dialect::{Dialect, SqlDialect};
pub use expr::{Expr, Literal};
pub use operator::Op;
pub use token::{BindMode, Token, TokenStream};
pub use types::DataType;
