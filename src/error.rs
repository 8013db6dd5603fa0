//! Error types surfaced by WHERE-clause compilation.
//!
//! Errors fall into two families:
//!
//! - **Input errors** ([`WhereError::MalformedCondition`], [`WhereError::UnknownAttribute`])
//!   describe a condition value that cannot be turned into a canonical expression.
//! - **Capability errors** ([`WhereError::UnsupportedFeature`]) describe a valid
//!   condition that the selected dialect cannot express.
//!
//! Compilation is all-or-nothing: the first error aborts the whole call.

use crate::sql::dialect::SqlDialect;

/// Errors that can occur while normalizing or compiling a condition.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum WhereError {
    /// The condition value has a shape that cannot be interpreted.
    #[error("WHERE parameter \"{key}\" {reason}")]
    MalformedCondition { key: String, reason: String },

    /// The operator needs a dialect capability that is missing.
    #[error("{operator} is not supported by the {dialect} dialect")]
    UnsupportedFeature {
        operator: String,
        dialect: &'static str,
    },

    /// An attribute key does not exist in the supplied model.
    #[error("Unknown attribute: {path}")]
    UnknownAttribute { path: String },
}

pub type WhereResult<T> = Result<T, WhereError>;

impl WhereError {
    pub(crate) fn malformed(key: impl Into<String>, reason: impl Into<String>) -> Self {
        WhereError::MalformedCondition {
            key: key.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn undefined(key: impl Into<String>) -> Self {
        Self::malformed(key, "has invalid \"undefined\" value")
    }

    pub(crate) fn unsupported(operator: impl Into<String>, dialect: &dyn SqlDialect) -> Self {
        WhereError::UnsupportedFeature {
            operator: operator.into(),
            dialect: dialect.name(),
        }
    }

    pub(crate) fn unknown_attribute(path: impl Into<String>) -> Self {
        WhereError::UnknownAttribute { path: path.into() }
    }

    /// Whether this is a capability error rather than an input error.
    pub fn is_capability_error(&self) -> bool {
        matches!(self, WhereError::UnsupportedFeature { .. })
    }
}
