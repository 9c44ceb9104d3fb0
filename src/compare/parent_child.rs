//! Parent-child validation between two adjacent levels.
//!
//! Each deeper entry is paired with the symbol of every current-level entry
//! containing it, and the pairs of both terms are compared. Pairs without an
//! identical counterpart fall back to fuzzy label matching.

use crate::config::Threshold;
use crate::term::{TermResult, node_labels, owner_symbol, split_entries};

use super::label::closest_label;
use super::multiset::bag_eq;

/// The labels of one deeper sub-expression and the symbol owning it.
#[derive(Debug, Clone)]
pub struct ParentChildPair<'a> {
    pub labels: Vec<&'a str>,
    pub owner: &'a str,
}

impl PartialEq for ParentChildPair<'_> {
    /// Same owner symbol and the same label multiset.
    fn eq(&self, other: &Self) -> bool {
        self.owner == other.owner && bag_eq(&self.labels, &other.labels)
    }
}

impl<'a> ParentChildPair<'a> {
    /// Whether `other` has a fuzzy match for every label of `self`, anchored
    /// on the first label.
    fn fuzzy_matches(&self, other: &ParentChildPair<'_>, threshold: Threshold) -> bool {
        let Some((&first, rest)) = self.labels.split_first() else {
            return false;
        };
        let within =
            |label: &str| closest_label(label, other.labels.iter().copied(), threshold).is_some();
        within(first) && rest.iter().filter(|&&l| l != first).all(|&l| within(l))
    }
}

/// Pair every deeper entry with the owner symbol of each current entry that
/// contains it verbatim.
pub fn build_pairs<'a>(
    deeper_entries: &[&'a str],
    current_entries: &[&'a str],
) -> TermResult<Vec<ParentChildPair<'a>>> {
    let mut pairs = Vec::new();
    for &deeper in deeper_entries {
        for &current in current_entries.iter().filter(|c| c.contains(deeper)) {
            pairs.push(ParentChildPair {
                labels: node_labels(deeper)?,
                owner: owner_symbol(current),
            });
        }
    }
    Ok(pairs)
}

/// Check that the parent-child relationships between `current_*` and
/// `deeper_*` agree for both terms.
///
/// A pair of `a` that has no identical counterpart in `b` is accepted when
/// some pair of `b` fuzzily contains all of its labels. With
/// `same_owner_only` that pair must also have the same owner symbol, which
/// rejects leaves that moved under a different gate.
pub fn parent_child_check(
    current_a: &str,
    current_b: &str,
    deeper_a: &str,
    deeper_b: &str,
    threshold: Threshold,
    same_owner_only: bool,
) -> TermResult<bool> {
    let pairs_a = build_pairs(&split_entries(deeper_a)?, &split_entries(current_a)?)?;
    let pairs_b = build_pairs(&split_entries(deeper_b)?, &split_entries(current_b)?)?;

    for pair in &pairs_a {
        if pairs_b.contains(pair) {
            continue;
        }
        let found = pairs_b
            .iter()
            .filter(|candidate| !same_owner_only || candidate.owner == pair.owner)
            .any(|candidate| pair.fuzzy_matches(candidate, threshold));
        if !found {
            tracing::trace!(
                owner = pair.owner,
                labels = ?pair.labels,
                "parent-child pair unmatched"
            );
            return Ok(false);
        }
    }

    Ok(true)
}
