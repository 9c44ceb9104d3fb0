//! Rich diagnostic error types for adterm.
//!
//! Each subsystem defines its own error type with miette `#[diagnostic]` derives,
//! providing error codes, help text, and source spans so users know exactly what
//! went wrong and how to fix it.

use miette::Diagnostic;
use thiserror::Error;

pub use crate::compare::CompareError;
pub use crate::config::ConfigError;
pub use crate::term::TermError;

/// Top-level error type for adterm.
///
/// Each variant wraps a subsystem-specific error, preserving the full diagnostic
/// chain (error codes, help text, source spans) through to the user.
#[derive(Debug, Error, Diagnostic)]
pub enum AdtError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Term(#[from] TermError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Compare(CompareError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),
}

impl From<CompareError> for AdtError {
    /// Malformed input surfaces as [`AdtError::Term`] wherever it was found.
    fn from(err: CompareError) -> Self {
        match err {
            CompareError::Term(term) => Self::Term(term),
            other => Self::Compare(other),
        }
    }
}

/// Result type alias for adterm operations.
pub type AdtResult<T> = std::result::Result<T, AdtError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compare_term_errors_are_flattened() {
        let err: AdtError = CompareError::Term(TermError::Empty).into();
        assert!(matches!(err, AdtError::Term(TermError::Empty)));
    }

    #[test]
    fn diagnostic_codes_pass_through() {
        let err: AdtError = CompareError::DepthExceeded { max_depth: 4 }.into();
        let code = err.code().map(|c| c.to_string());
        assert_eq!(code.as_deref(), Some("adterm::compare::depth_exceeded"));
    }
}
