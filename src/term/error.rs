//! Rich diagnostic error types for malformed ADTerm input.
//!
//! Every variant carries `#[diagnostic(code(...), help(...))]` and, where a
//! position is known, the offending source text with a labelled span so the
//! CLI can point at the exact character.

use miette::{Diagnostic, SourceSpan};
use thiserror::Error;

use super::Span;

/// Errors produced while scanning an ADTerm.
///
/// A malformed term is never reported as "not equivalent": scanning fails
/// and the whole comparison is aborted with one of these.
#[derive(Debug, Error, Diagnostic)]
pub enum TermError {
    #[error("empty ADTerm")]
    #[diagnostic(
        code(adterm::term::empty),
        help(
            "An ADTerm is either a quoted label like \"door\" or a gate applied \
             to children like ∧[\"a\",\"b\"]. Provide a non-empty term."
        )
    )]
    Empty,

    #[error("unbalanced `]` at byte {offset}")]
    #[diagnostic(
        code(adterm::term::unbalanced_close),
        help("This `]` closes a bracket that was never opened. Remove it or add the missing `[`.")
    )]
    UnbalancedClose {
        offset: usize,
        #[source_code]
        src: String,
        #[label("no matching `[`")]
        span: SourceSpan,
    },

    #[error("unclosed `[` at byte {offset}")]
    #[diagnostic(
        code(adterm::term::unclosed_bracket),
        help("Every `[` opened after a gate symbol needs a matching `]`.")
    )]
    UnclosedBracket {
        offset: usize,
        #[source_code]
        src: String,
        #[label("opened here, never closed")]
        span: SourceSpan,
    },

    #[error("unterminated label starting at byte {offset}")]
    #[diagnostic(
        code(adterm::term::unterminated_label),
        help(
            "A label ends at a `\"` followed by `,`, `]` or the end of the term. \
             Add the closing quote."
        )
    )]
    UnterminatedLabel {
        offset: usize,
        #[source_code]
        src: String,
        #[label("label starts here")]
        span: SourceSpan,
    },

    #[error("counter-measure marker at byte {offset} is not followed by `[`")]
    #[diagnostic(
        code(adterm::term::dangling_counter),
        help(
            "The counter marker `c` (optionally with a player subscript, e.g. `cp`) \
             must wrap its children: c[∧[\"attack\"],\"defense\"]."
        )
    )]
    DanglingCounter {
        offset: usize,
        #[source_code]
        src: String,
        #[label("expected `[` after this")]
        span: SourceSpan,
    },

    #[error("unexpected character {ch:?} at byte {offset}")]
    #[diagnostic(
        code(adterm::term::unexpected_char),
        help(
            "Outside of quoted labels an ADTerm may only contain `∧`, `∨`, `c` \
             (each with an optional one-character player subscript), brackets, \
             commas and whitespace. Quote leaf labels: \"{ch}...\"."
        )
    )]
    UnexpectedCharacter {
        ch: char,
        offset: usize,
        #[source_code]
        src: String,
        #[label("not part of the ADTerm grammar")]
        span: SourceSpan,
    },
}

impl TermError {
    pub(crate) fn unbalanced_close(src: &str, span: Span) -> Self {
        Self::UnbalancedClose {
            offset: span.start,
            src: src.to_string(),
            span: span.into(),
        }
    }

    pub(crate) fn unclosed_bracket(src: &str, span: Span) -> Self {
        Self::UnclosedBracket {
            offset: span.start,
            src: src.to_string(),
            span: span.into(),
        }
    }

    pub(crate) fn unterminated_label(src: &str, span: Span) -> Self {
        Self::UnterminatedLabel {
            offset: span.start,
            src: src.to_string(),
            span: span.into(),
        }
    }

    pub(crate) fn dangling_counter(src: &str, span: Span) -> Self {
        Self::DanglingCounter {
            offset: span.start,
            src: src.to_string(),
            span: span.into(),
        }
    }

    pub(crate) fn unexpected_character(src: &str, ch: char, span: Span) -> Self {
        Self::UnexpectedCharacter {
            ch,
            offset: span.start,
            src: src.to_string(),
            span: span.into(),
        }
    }
}

/// Result type for term scanning.
pub type TermResult<T> = std::result::Result<T, TermError>;
