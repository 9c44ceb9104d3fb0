//! Fuzzy label matching by Levenshtein distance.

use strsim::levenshtein;

use crate::config::Threshold;
use crate::term::QUOTE;

/// The closest acceptable label found in a pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LabelMatch<'a> {
    /// Position of the match in the pool as iterated.
    pub index: usize,
    /// The matched label, delimiters included.
    pub label: &'a str,
    /// Levenshtein distance to the candidate.
    pub distance: usize,
}

/// Whether `text` is a quoted label.
pub fn is_label_shaped(text: &str) -> bool {
    text.len() >= 2 && text.starts_with(QUOTE) && text.ends_with(QUOTE)
}

/// Find the pool label closest to `candidate` within `threshold`.
///
/// Non-label pool entries are skipped. Ties go to the first label in pool
/// order. `None` means no label was close enough, which is an ordinary
/// outcome and not an error.
pub fn closest_label<'a, I>(
    candidate: &str,
    pool: I,
    threshold: Threshold,
) -> Option<LabelMatch<'a>>
where
    I: IntoIterator<Item = &'a str>,
{
    let candidate_len = candidate.chars().count();
    let mut best: Option<LabelMatch<'a>> = None;

    for (index, label) in pool.into_iter().enumerate() {
        if !is_label_shaped(label) {
            continue;
        }
        let accept = threshold.max_distance(candidate_len, label.chars().count());
        let distance = levenshtein(candidate, label);
        if distance > accept {
            continue;
        }
        if best.is_none_or(|b| distance < b.distance) {
            best = Some(LabelMatch {
                index,
                label,
                distance,
            });
        }
    }

    best
}
