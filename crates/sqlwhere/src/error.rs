//! Error types for sqlwhere

use thiserror::Error;

/// Result type alias for sqlwhere operations
pub type WhereResult<T> = Result<T, WhereError>;

/// Errors raised while building or checking expressions.
///
/// Rendering itself never fails; these errors come from the fallible
/// constructors (`try_*`), dialect lookup and [`crate::Expression::check`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WhereError {
    /// An argument does not have the shape the operation requires.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// No dialect is known by this name.
    #[error("Unknown dialect: {0}")]
    UnknownDialect(String),

    /// A condition's placeholders and arguments disagree.
    #[error(
        "Placeholder mismatch in '{predicate}': {expected} '?' placeholders but {actual} arguments"
    )]
    PlaceholderMismatch {
        predicate: String,
        expected: usize,
        actual: usize,
    },
}

impl WhereError {
    /// Create an invalid argument error
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    /// Create an unknown dialect error
    pub fn unknown_dialect(name: impl Into<String>) -> Self {
        Self::UnknownDialect(name.into())
    }

    /// Check if this is an invalid argument error
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument(_))
    }

    /// Check if this is a placeholder mismatch
    pub fn is_placeholder_mismatch(&self) -> bool {
        matches!(self, Self::PlaceholderMismatch { .. })
    }
}
