//! Error types for sqlfield

use thiserror::Error;

/// Result type alias for sqlfield operations
pub type ExprResult<T> = Result<T, ExprError>;

/// Construction-time contract violations.
///
/// Rendering itself never fails; these errors come from building an
/// expression tree incorrectly (unknown operator, empty range, asking a
/// computed expression for its column, ...).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExprError {
    /// Operator string not recognised by [`Op`](crate::Op)
    #[error("Unknown comparison operator: {0}")]
    UnknownOperator(String),

    /// Range helper called with neither bound
    #[error("Range requires at least one of `from` / `to`")]
    EmptyRange,

    /// `to_column` called on a computed expression
    #[error("Expression is not a plain column: {0}")]
    NotAColumn(String),

    /// Identifier failed validation
    #[error("Invalid identifier: {0}")]
    InvalidIdentifier(String),

    /// Rendered statement has more placeholders than bound parameters
    #[error("Statement has {placeholders} placeholders but only {params} params")]
    PlaceholderMismatch { placeholders: usize, params: usize },
}

impl ExprError {
    /// Create an unknown operator error
    pub fn unknown_operator(op: impl Into<String>) -> Self {
        Self::UnknownOperator(op.into())
    }

    /// Create a not-a-column error carrying the rendered SQL
    pub fn not_a_column(sql: impl Into<String>) -> Self {
        Self::NotAColumn(sql.into())
    }

    /// Create an invalid identifier error
    pub fn invalid_identifier(message: impl Into<String>) -> Self {
        Self::InvalidIdentifier(message.into())
    }

    /// Check if this is an unknown operator error
    pub fn is_unknown_operator(&self) -> bool {
        matches!(self, Self::UnknownOperator(_))
    }

    /// Check if this is a not-a-column error
    pub fn is_not_a_column(&self) -> bool {
        matches!(self, Self::NotAColumn(_))
    }

    /// Check if this is an invalid identifier error
    pub fn is_invalid_identifier(&self) -> bool {
        matches!(self, Self::InvalidIdentifier(_))
    }
}
