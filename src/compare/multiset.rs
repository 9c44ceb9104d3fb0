//! Single-level multiset equivalence with fuzzy label matching.

use std::collections::HashMap;
use std::hash::Hash;

use crate::config::Threshold;
use crate::term::{Item, TermResult, scan_items};

use super::label::closest_label;

/// Outcome of comparing one level of two terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelMatch {
    pub equivalent: bool,
    /// Summed distance of the label matches; `0` when not equivalent.
    pub distance: usize,
}

impl LevelMatch {
    pub fn matched(distance: usize) -> Self {
        Self {
            equivalent: true,
            distance,
        }
    }

    pub fn mismatched() -> Self {
        Self {
            equivalent: false,
            distance: 0,
        }
    }
}

/// Multiset equality: same elements with the same multiplicities.
pub fn bag_eq<T: Eq + Hash>(left: &[T], right: &[T]) -> bool {
    if left.len() != right.len() {
        return false;
    }
    let mut counts: HashMap<&T, isize> = HashMap::with_capacity(left.len());
    for item in left {
        *counts.entry(item).or_default() += 1;
    }
    for item in right {
        match counts.get_mut(item) {
            Some(n) if *n > 0 => *n -= 1,
            _ => return false,
        }
    }
    true
}

/// Compare the depth-0 items of two levels.
///
/// Every label of `left` must find its closest acceptable match among the
/// items of `right`; the matched item is then overwritten with the left label
/// in a working copy, so the final bag comparison treats fuzzily equal labels
/// as identical and still checks the symbols. Only `left` drives the
/// matching, so swapping the arguments can change the result when label
/// multiplicities differ.
pub fn multiset_equivalence<'a>(
    left: &'a str,
    right: &'a str,
    threshold: Threshold,
) -> TermResult<LevelMatch> {
    let left_items = scan_items(left)?;
    let mut right_items: Vec<Item<'a>> = scan_items(right)?;
    let mut distance = 0;

    for item in &left_items {
        let Item::Label(label) = *item else {
            continue;
        };
        let Some(found) = closest_label(label, right_items.iter().map(Item::text), threshold) else {
            tracing::trace!(label, "no label within threshold");
            return Ok(LevelMatch::mismatched());
        };
        distance += found.distance;
        right_items[found.index] = *item;
    }

    if bag_eq(&left_items, &right_items) {
        Ok(LevelMatch::matched(distance))
    } else {
        tracing::trace!(left, right, "item multisets differ");
        Ok(LevelMatch::mismatched())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn threshold(v: f64) -> Threshold {
        Threshold::new(v).unwrap()
    }

    #[test]
    fn bag_eq_ignores_order() {
        assert!(bag_eq(&[1, 2, 2, 3], &[2, 3, 2, 1]));
        assert!(!bag_eq(&[1, 2, 2], &[1, 1, 2]));
        assert!(!bag_eq(&[1], &[1, 1]));
        assert!(bag_eq::<u8>(&[], &[]));
    }

    #[test]
    fn reordered_labels_match() {
        let m = multiset_equivalence(r#""a","b""#, r#""b","a""#, Threshold::EXACT).unwrap();
        assert_eq!(m, LevelMatch::matched(0));
    }

    #[test]
    fn fuzzy_labels_accumulate_distance() {
        let m = multiset_equivalence(r#""apple","pear""#, r#""peer","appel""#, threshold(0.5))
            .unwrap();
        assert_eq!(m, LevelMatch::matched(3));
    }

    #[test]
    fn symbol_mismatch_fails_bag_check() {
        let m = multiset_equivalence(r#"∧["x"]"#, r#"∨["x"]"#, Threshold::DEFAULT).unwrap();
        assert_eq!(m, LevelMatch::mismatched());
    }

    #[test]
    fn unmatched_label_short_circuits() {
        let m = multiset_equivalence(r#""door","x""#, r#""window","x""#, Threshold::DEFAULT)
            .unwrap();
        assert!(!m.equivalent);
        assert_eq!(m.distance, 0);
    }

    #[test]
    fn extra_right_item_fails() {
        let m = multiset_equivalence(r#""a""#, r#""a","b""#, Threshold::EXACT).unwrap();
        assert!(!m.equivalent);
    }

    #[test]
    fn duplicate_left_label_cannot_reuse_one_right_label() {
        let m = multiset_equivalence(r#""a","a""#, r#""a","b""#, Threshold::EXACT).unwrap();
        assert!(!m.equivalent);
    }

    #[test]
    fn matching_is_driven_by_the_left_side() {
        let a = r#""aaaa","aabb""#;
        let b = r#""aaab","aaaa""#;
        assert_eq!(
            multiset_equivalence(a, b, threshold(0.5)).unwrap(),
            LevelMatch::matched(1)
        );
        assert_eq!(
            multiset_equivalence(b, a, threshold(0.5)).unwrap(),
            LevelMatch::mismatched()
        );
    }

    #[test]
    fn malformed_right_side_is_an_error() {
        assert!(multiset_equivalence(r#""a""#, r#""a"]"#, Threshold::EXACT).is_err());
    }
}
