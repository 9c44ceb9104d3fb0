//! ADTerm lexing and level scanning.
//!
//! An ADTerm is the serialized form of an Attack-Defense Tree:
//!
//! ```text
//! term   := label | symbol '[' term (',' term)* ']'
//! label  := '"' chars '"'
//! symbol := ('∧' | '∨' | 'c') subscript?
//! ```
//!
//! The optional one-character subscript names the player owning the node
//! (`p` proponent, `o` opponent), as in `∧p["a","b"]` or `cp[∧p["a"],"d"]`.
//!
//! Every scanner in this crate works on the token stream produced by
//! [`tokenize`], so bracket depth and label boundaries are interpreted the
//! same way by the item scanner, the level selector and the splitter.

pub mod error;
pub mod scan;
pub mod stats;

pub use error::{TermError, TermResult};
pub use scan::{Item, node_labels, owner_symbol, scan_items, select_level, split_entries};
pub use stats::TermStats;

use miette::SourceSpan;

/// Conjunctive refinement glyph.
pub const AND: char = '∧';
/// Disjunctive refinement glyph.
pub const OR: char = '∨';
/// Counter-measure marker.
pub const COUNTER: char = 'c';
/// Label delimiter.
pub const QUOTE: char = '"';

/// Byte-level source span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// The slice of `src` covered by this span.
    pub fn text<'a>(&self, src: &'a str) -> &'a str {
        &src[self.start..self.end]
    }
}

impl From<Span> for SourceSpan {
    fn from(span: Span) -> Self {
        (span.start, span.len()).into()
    }
}

/// Lexical class of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// `[`
    Open,
    /// `]`
    Close,
    /// `,`
    Comma,
    /// A single whitespace character.
    Space,
    /// A quoted label, delimiters included.
    Label,
    /// `∧` or `∨` with its optional subscript.
    Gate,
    /// `c` with its optional subscript.
    Counter,
}

/// A single lexical token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    /// The surface text of this token.
    pub fn text<'a>(&self, src: &'a str) -> &'a str {
        self.span.text(src)
    }

    /// Whether this token is a separator (`,` or whitespace).
    pub fn is_separator(&self) -> bool {
        matches!(self.kind, TokenKind::Comma | TokenKind::Space)
    }
}

/// Tokenize an ADTerm, validating brackets, labels and counter markers.
///
/// Labels are recognized at every depth: a label ends at the first `"`
/// whose next non-whitespace character is `,`, `]` or the end of input, so
/// interior quotes and brackets are literal label content.
pub fn tokenize(src: &str) -> TermResult<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut open_brackets: Vec<Span> = Vec::new();
    let mut pos = 0;

    while let Some(ch) = src[pos..].chars().next() {
        let start = pos;
        let kind = match ch {
            '[' => {
                pos += 1;
                open_brackets.push(Span::new(start, pos));
                TokenKind::Open
            }
            ']' => {
                pos += 1;
                if open_brackets.pop().is_none() {
                    return Err(TermError::unbalanced_close(src, Span::new(start, pos)));
                }
                TokenKind::Close
            }
            ',' => {
                pos += 1;
                TokenKind::Comma
            }
            QUOTE => {
                pos = label_end(src, start).ok_or_else(|| {
                    TermError::unterminated_label(src, Span::new(start, start + 1))
                })?;
                TokenKind::Label
            }
            AND | OR => {
                pos = after_subscript(src, start + ch.len_utf8());
                TokenKind::Gate
            }
            COUNTER => {
                pos = after_subscript(src, start + 1);
                if !src[pos..].starts_with('[') {
                    return Err(TermError::dangling_counter(src, Span::new(start, pos)));
                }
                TokenKind::Counter
            }
            c if c.is_whitespace() => {
                pos += c.len_utf8();
                TokenKind::Space
            }
            other => {
                return Err(TermError::unexpected_character(
                    src,
                    other,
                    Span::new(start, start + other.len_utf8()),
                ));
            }
        };
        tokens.push(Token {
            kind,
            span: Span::new(start, pos),
        });
    }

    if let Some(&span) = open_brackets.last() {
        return Err(TermError::unclosed_bracket(src, span));
    }

    Ok(tokens)
}

/// Check that `src` is a well-formed ADTerm without keeping the tokens.
pub fn validate(src: &str) -> TermResult<()> {
    if src.trim().is_empty() {
        return Err(TermError::Empty);
    }
    tokenize(src).map(|_| ())
}

/// Byte offset just past the closing quote of the label opening at `start`.
fn label_end(src: &str, start: usize) -> Option<usize> {
    let body = start + QUOTE.len_utf8();
    src[body..]
        .match_indices(QUOTE)
        .map(|(i, _)| body + i + QUOTE.len_utf8())
        .find(|&end| matches!(src[end..].trim_start().chars().next(), None | Some(',' | ']')))
}

/// Skip an optional single-character player subscript.
fn after_subscript(src: &str, pos: usize) -> usize {
    match src[pos..].chars().next() {
        Some(c) if c.is_ascii_alphanumeric() => pos + 1,
        _ => pos,
    }
}
