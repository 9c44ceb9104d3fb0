//! Structural equivalence of ADTerms.
//!
//! Two terms are equivalent when, level by level, their items form equal
//! multisets (leaf labels compared fuzzily by Levenshtein distance) and the
//! leaves of every nested level hang under the same gate symbols.
//!
//! ## Architecture
//!
//! ```text
//! CompareEngine ──→ RecursiveComparator ──→ multiset_equivalence ──→ closest_label
//!   (root check)        │   (top-down)                                   (strsim)
//!                       └──→ parent_child_check (bottom-up)
//! ```

pub mod error;
pub mod label;
pub mod multiset;
pub mod parent_child;
pub mod recursive;

pub use error::{CompareError, CompareResult};
pub use label::{LabelMatch, closest_label, is_label_shaped};
pub use multiset::{LevelMatch, bag_eq, multiset_equivalence};
pub use parent_child::{ParentChildPair, build_pairs, parent_child_check};
pub use recursive::{Descent, RecursiveComparator};

use serde::Serialize;

/// Why a comparison stopped being equivalent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DivergenceReason {
    /// The root symbols or root labels differ.
    RootMismatch,
    /// A nested level's items are not multiset-equivalent.
    LevelMismatch,
    /// Leaves are attached to different gates than in the other term.
    ParentChildMismatch,
}

impl std::fmt::Display for DivergenceReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::RootMismatch => write!(f, "root mismatch"),
            Self::LevelMismatch => write!(f, "level mismatch"),
            Self::ParentChildMismatch => write!(f, "parent-child mismatch"),
        }
    }
}

/// The level at which two terms diverged.
///
/// Depth `0` is the first bracketed level below the root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Divergence {
    pub depth: usize,
    pub reason: DivergenceReason,
}

impl Divergence {
    pub fn new(depth: usize, reason: DivergenceReason) -> Self {
        Self { depth, reason }
    }
}

impl std::fmt::Display for Divergence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} at depth {}", self.reason, self.depth)
    }
}
