//! Level scanners: flatten one nesting level of an ADTerm.
//!
//! - [`scan_items`]: the comparable items (labels and symbols) at depth 0
//! - [`select_level`]: the inner text of every depth-0 sub-expression
//! - [`split_entries`]: depth-0 comma-separated entries
//! - [`owner_symbol`] / [`node_labels`]: per-entry helpers for the
//!   parent-child check

use super::error::TermResult;
use super::{QUOTE, Token, TokenKind, tokenize};

/// One comparable unit on a single level of an ADTerm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Item<'a> {
    /// A quoted label, delimiters included.
    Label(&'a str),
    /// A gate or counter symbol, possibly a fused `c[∧` group.
    Symbol(&'a str),
}

impl<'a> Item<'a> {
    pub fn text(&self) -> &'a str {
        match self {
            Item::Label(s) | Item::Symbol(s) => s,
        }
    }

    pub fn is_label(&self) -> bool {
        matches!(self, Item::Label(_))
    }
}

/// Scan the depth-0 items of `level`.
///
/// A counter immediately followed by `[` and a gate is emitted as one fused
/// symbol (`cp[∧p`), keeping a counter-measure that wraps a gate together as
/// a single comparable unit. Deeper content is skipped.
pub fn scan_items(level: &str) -> TermResult<Vec<Item<'_>>> {
    let tokens = tokenize(level)?;
    let mut items = Vec::new();
    let mut depth = 0usize;

    for (i, tok) in tokens.iter().enumerate() {
        match tok.kind {
            TokenKind::Open => depth += 1,
            TokenKind::Close => depth -= 1,
            TokenKind::Label if depth == 0 => items.push(Item::Label(tok.text(level))),
            TokenKind::Gate if depth == 0 => items.push(Item::Symbol(tok.text(level))),
            TokenKind::Counter if depth == 0 => {
                let end = match (tokens.get(i + 1), tokens.get(i + 2)) {
                    (Some(open), Some(gate))
                        if open.kind == TokenKind::Open && gate.kind == TokenKind::Gate =>
                    {
                        gate.span.end
                    }
                    _ => tok.span.end,
                };
                items.push(Item::Symbol(&level[tok.span.start..end]));
            }
            _ => {}
        }
    }

    Ok(items)
}

/// Select the next level down: the inner text of every depth-0 bracketed
/// sub-expression, concatenated.
///
/// Siblings keep the separator run that directly followed the earlier one
/// (`"a", "b"`); when there was none a single `,` is inserted. An empty
/// result means the level has no further nesting.
pub fn select_level(level: &str) -> TermResult<String> {
    let tokens = tokenize(level)?;
    let mut selected = String::new();
    let mut depth = 0usize;
    let mut inner_start = 0;
    let mut captured_any = false;
    // Separator run after the last capture; stops growing at the first
    // non-separator token.
    let mut between = false;
    let mut separator = (0, 0);

    for tok in &tokens {
        match tok.kind {
            TokenKind::Open => {
                if depth == 0 {
                    if captured_any {
                        let (start, end) = separator;
                        if start < end {
                            selected.push_str(&level[start..end]);
                        } else {
                            selected.push(',');
                        }
                    }
                    inner_start = tok.span.end;
                    between = false;
                }
                depth += 1;
            }
            TokenKind::Close => {
                depth -= 1;
                if depth == 0 {
                    selected.push_str(&level[inner_start..tok.span.start]);
                    captured_any = true;
                    between = true;
                    separator = (tok.span.end, tok.span.end);
                }
            }
            _ if depth == 0 && between => {
                if tok.is_separator() {
                    separator.1 = tok.span.end;
                } else {
                    between = false;
                }
            }
            _ => {}
        }
    }

    Ok(selected)
}

/// Split `level` into its depth-0 comma-separated entries, trimmed.
///
/// Empty entries are dropped, so an empty level yields no entries.
pub fn split_entries(level: &str) -> TermResult<Vec<&str>> {
    let tokens = tokenize(level)?;
    let mut entries = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;

    for tok in &tokens {
        match tok.kind {
            TokenKind::Open => depth += 1,
            TokenKind::Close => depth -= 1,
            TokenKind::Comma if depth == 0 => {
                push_entry(&mut entries, &level[start..tok.span.start]);
                start = tok.span.end;
            }
            _ => {}
        }
    }
    push_entry(&mut entries, &level[start..]);

    Ok(entries)
}

fn push_entry<'a>(entries: &mut Vec<&'a str>, raw: &'a str) {
    let entry = raw.trim();
    if !entry.is_empty() {
        entries.push(entry);
    }
}

/// The symbol owning `entry`: everything before its first `[`.
///
/// Bare label entries have no owner symbol and yield `""`.
pub fn owner_symbol(entry: &str) -> &str {
    if entry.starts_with(QUOTE) {
        return "";
    }
    entry.find('[').map_or("", |i| entry[..i].trim_end())
}

/// Every quoted label in `term`, at any depth, in order.
pub fn node_labels(term: &str) -> TermResult<Vec<&str>> {
    Ok(tokenize(term)?
        .iter()
        .filter(|t| t.kind == TokenKind::Label)
        .map(|t: &Token| t.text(term))
        .collect())
}
