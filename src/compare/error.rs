//! Error types for the comparison subsystem.

use miette::Diagnostic;
use thiserror::Error;

use crate::term::TermError;

/// Errors that abort a comparison.
///
/// Divergent terms are not errors; they produce a non-equivalent result.
#[derive(Debug, Error, Diagnostic)]
pub enum CompareError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Term(#[from] TermError),

    #[error("nesting depth exceeded maximum of {max_depth}")]
    #[diagnostic(
        code(adterm::compare::depth_exceeded),
        help(
            "The terms nest deeper than the configured limit. Raise `max_depth` \
             in the config file if such deep trees are expected."
        )
    )]
    DepthExceeded { max_depth: usize },
}

/// Result type for comparison operations.
pub type CompareResult<T> = std::result::Result<T, CompareError>;
