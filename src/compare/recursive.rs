//! Two-pass recursive comparison: descend level by level, then validate
//! parent-child relationships while unwinding.

use crate::config::Threshold;
use crate::term::select_level;

use super::error::{CompareError, CompareResult};
use super::multiset::multiset_equivalence;
use super::parent_child::parent_child_check;
use super::{Divergence, DivergenceReason};

/// Result of descending from one level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Descent {
    /// The level selected from this frame's input.
    pub selected_a: String,
    pub selected_b: String,
    /// Distance accumulated at this level and below; `0` on divergence.
    pub distance: usize,
    /// Where the comparison stopped being equivalent, if it did.
    pub divergence: Option<Divergence>,
}

impl Descent {
    pub fn is_equivalent(&self) -> bool {
        self.divergence.is_none()
    }
}

/// Drives the level-by-level comparison of two terms.
#[derive(Debug, Clone, Copy)]
pub struct RecursiveComparator {
    threshold: Threshold,
    max_depth: usize,
    same_owner_only: bool,
}

impl RecursiveComparator {
    pub fn new(threshold: Threshold, max_depth: usize) -> Self {
        Self {
            threshold,
            max_depth,
            same_owner_only: false,
        }
    }

    /// Only accept fuzzy parent-child matches under the same owner symbol.
    pub fn with_same_owner_only(mut self, same_owner_only: bool) -> Self {
        self.same_owner_only = same_owner_only;
        self
    }

    /// Compare the levels nested below `sub_a` and `sub_b`.
    ///
    /// Each frame selects one level down on both sides. When both are
    /// exhausted the branch is done; otherwise the selected levels must be
    /// multiset-equivalent before descending further. On the way back up the
    /// selected levels and the levels below them are checked for consistent
    /// parent-child relationships.
    pub fn descend(&self, sub_a: &str, sub_b: &str, depth: usize) -> CompareResult<Descent> {
        if depth > self.max_depth {
            return Err(CompareError::DepthExceeded {
                max_depth: self.max_depth,
            });
        }

        let selected_a = select_level(sub_a)?;
        let selected_b = select_level(sub_b)?;

        if selected_a.is_empty() && selected_b.is_empty() {
            tracing::trace!(depth, "both terms exhausted");
            return Ok(Descent {
                selected_a,
                selected_b,
                distance: 0,
                divergence: None,
            });
        }

        let level = multiset_equivalence(&selected_a, &selected_b, self.threshold)?;
        if !level.equivalent {
            tracing::debug!(depth, a = %selected_a, b = %selected_b, "level multisets diverge");
            return Ok(Descent {
                selected_a,
                selected_b,
                distance: 0,
                divergence: Some(Divergence::new(depth, DivergenceReason::LevelMismatch)),
            });
        }

        let deeper = self.descend(&selected_a, &selected_b, depth + 1)?;
        let mut divergence = deeper.divergence;
        if divergence.is_none()
            && !parent_child_check(
                &selected_a,
                &selected_b,
                &deeper.selected_a,
                &deeper.selected_b,
                self.threshold,
                self.same_owner_only,
            )?
        {
            tracing::debug!(depth, "parent-child relationships diverge");
            divergence = Some(Divergence::new(depth, DivergenceReason::ParentChildMismatch));
        }

        let distance = match divergence {
            None => deeper.distance + level.distance,
            Some(_) => 0,
        };
        Ok(Descent {
            selected_a,
            selected_b,
            distance,
            divergence,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn comparator(threshold: f64) -> RecursiveComparator {
        RecursiveComparator::new(Threshold::new(threshold).unwrap(), 64)
    }

    #[test]
    fn nested_reordering_is_equivalent() {
        let d = comparator(0.0)
            .descend(r#"∧[∨["a","b"],"c"]"#, r#"∧["c",∨["b","a"]]"#, 0)
            .unwrap();
        assert!(d.is_equivalent());
        assert_eq!(d.distance, 0);
        assert_eq!(d.selected_a, r#"∨["a","b"],"c""#);
    }

    #[test]
    fn distances_sum_across_levels() {
        let d = comparator(0.5)
            .descend(
                r#"∧[∨["apple","pear"],"door"]"#,
                r#"∧["dor",∨["pear","appel"]]"#,
                0,
            )
            .unwrap();
        assert!(d.is_equivalent());
        // "door"/"dor" at depth 0, "apple"/"appel" at depth 1.
        assert_eq!(d.distance, 3);
    }

    #[test]
    fn divergence_records_level_and_reason() {
        let d = comparator(0.2)
            .descend(r#"∧[∨["a"],"b"]"#, r#"∧[∧["a"],"b"]"#, 0)
            .unwrap();
        assert_eq!(
            d.divergence,
            Some(Divergence::new(0, DivergenceReason::LevelMismatch))
        );
        assert_eq!(d.distance, 0);
    }

    #[test]
    fn deeper_divergence_propagates_up() {
        let d = comparator(0.0)
            .descend(r#"∧[∨["a","b"]]"#, r#"∧[∨["a","x"]]"#, 0)
            .unwrap();
        assert_eq!(
            d.divergence,
            Some(Divergence::new(1, DivergenceReason::LevelMismatch))
        );
    }

    #[test]
    fn moved_leaf_passes_by_default() {
        let d = comparator(0.5)
            .descend(
                r#"∧[∨["apple"],∧["pear"]]"#,
                r#"∧[∨["pear"],∧["appel"]]"#,
                0,
            )
            .unwrap();
        assert!(d.is_equivalent());
        assert_eq!(d.distance, 2);
    }

    #[test]
    fn moved_leaf_fails_with_same_owner_only() {
        let d = comparator(0.5)
            .with_same_owner_only(true)
            .descend(
                r#"∧[∨["apple"],∧["pear"]]"#,
                r#"∧[∨["pear"],∧["appel"]]"#,
                0,
            )
            .unwrap();
        assert_eq!(
            d.divergence,
            Some(Divergence::new(0, DivergenceReason::ParentChildMismatch))
        );
    }

    #[test]
    fn depth_limit_is_enforced() {
        let shallow = RecursiveComparator::new(Threshold::DEFAULT, 1);
        let err = shallow
            .descend(r#"∧[∧[∧["a"]]]"#, r#"∧[∧[∧["a"]]]"#, 0)
            .unwrap_err();
        assert!(matches!(err, CompareError::DepthExceeded { max_depth: 1 }));
    }
}
