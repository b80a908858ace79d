//! Error types for pgqb

use thiserror::Error;

/// Result type alias for pgqb operations
pub type QbResult<T> = Result<T, QbError>;

/// Errors raised while building or rendering a statement.
///
/// Construction-time misuse (an empty AND/OR, a join without its ON
/// predicate, an unencodable literal) is reported at the offending call.
/// Builder misuse that can only be detected once the statement is complete
/// is recorded on the statement and reported when it is rendered.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QbError {
    /// A host value has no SQL literal representation
    #[error("Unsupported literal: {0}")]
    UnsupportedLiteral(String),

    /// AND/OR called without operands
    #[error("{op} requires at least one operand")]
    EmptyLogical { op: &'static str },

    /// Anonymous argument rendered in named-placeholder mode
    #[error("Anonymous arguments are not allowed with named placeholders")]
    AnonymousArgument,

    /// Non-natural join without an ON predicate
    #[error("{kind} requires an ON predicate")]
    MissingJoinPredicate { kind: &'static str },

    /// Natural join given an ON predicate
    #[error("{kind} does not take an ON predicate")]
    UnexpectedJoinPredicate { kind: &'static str },

    /// Statement builder misuse detected at render time
    #[error("Build error: {0}")]
    Build(String),

    /// Model has no column with the requested name
    #[error("Unknown column '{column}' in table '{table}'")]
    UnknownColumn { table: String, column: String },

    /// No value bound for a rendered argument
    #[error("Missing value for argument '{0}'")]
    MissingArgument(String),
}

impl QbError {
    /// Create a build error
    pub fn build(message: impl Into<String>) -> Self {
        Self::Build(message.into())
    }

    /// Create an unsupported literal error
    pub fn unsupported_literal(message: impl Into<String>) -> Self {
        Self::UnsupportedLiteral(message.into())
    }

    /// Create an unknown column error
    pub fn unknown_column(table: impl Into<String>, column: impl Into<String>) -> Self {
        Self::UnknownColumn {
            table: table.into(),
            column: column.into(),
        }
    }

    /// Check if this is a deferred build error
    pub fn is_build(&self) -> bool {
        matches!(self, Self::Build(_))
    }

    /// Check if this error came from a missing argument binding
    pub fn is_missing_argument(&self) -> bool {
        matches!(self, Self::MissingArgument(_))
    }
}
