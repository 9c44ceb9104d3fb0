//! Engine facade: top-level API for comparing ADTerms.
//!
//! The [`CompareEngine`] owns the comparison configuration and exposes the
//! public entry points: single and batch comparison and the threshold setter.

use std::borrow::Cow;

use rayon::prelude::*;
use serde::Serialize;
use unicode_normalization::UnicodeNormalization;

use crate::compare::{Divergence, DivergenceReason, RecursiveComparator, multiset_equivalence};
use crate::config::{CompareConfig, Threshold};
use crate::error::AdtResult;
use crate::term::{self, TermError};

/// Outcome of comparing two ADTerms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ComparisonResult {
    pub equivalent: bool,
    /// Summed Levenshtein distance of all fuzzy label matches; `0` when not
    /// equivalent.
    pub distance: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub divergence: Option<Divergence>,
}

impl ComparisonResult {
    pub fn equivalent(distance: usize) -> Self {
        Self {
            equivalent: true,
            distance,
            divergence: None,
        }
    }

    pub fn diverged(divergence: Divergence) -> Self {
        Self {
            equivalent: false,
            distance: 0,
            divergence: Some(divergence),
        }
    }

    /// The accumulated distance, only meaningful for equivalent terms.
    pub fn edit_distance(&self) -> Option<usize> {
        self.equivalent.then_some(self.distance)
    }
}

impl std::fmt::Display for ComparisonResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.divergence {
            None => write!(f, "equivalent (edit distance {})", self.distance),
            Some(d) => write!(f, "not equivalent: {d}"),
        }
    }
}

/// Compares ADTerms under one configuration.
///
/// Comparisons borrow the engine immutably, so a single engine can serve
/// many threads; only [`set_threshold`](Self::set_threshold) needs `&mut`.
#[derive(Debug, Clone, Default)]
pub struct CompareEngine {
    config: CompareConfig,
}

impl CompareEngine {
    /// Create a new engine with the given configuration.
    pub fn new(config: CompareConfig) -> Self {
        tracing::debug!(
            threshold = %config.threshold,
            normalize_unicode = config.normalize_unicode,
            max_depth = config.max_depth,
            strict_parent_child = config.strict_parent_child,
            "initializing compare engine"
        );
        Self { config }
    }

    /// Get the engine configuration.
    pub fn config(&self) -> &CompareConfig {
        &self.config
    }

    pub fn threshold(&self) -> Threshold {
        self.config.threshold
    }

    /// Change the equivalence threshold.
    ///
    /// Values outside `[0.0, 1.0]` are rejected and leave the engine unchanged.
    pub fn set_threshold(&mut self, value: f64) -> AdtResult<()> {
        self.config.threshold = Threshold::new(value)?;
        tracing::debug!(threshold = value, "equivalence threshold changed");
        Ok(())
    }

    /// Decide whether `a` and `b` describe the same tree.
    ///
    /// Both terms are validated first: malformed input is an error, never a
    /// non-equivalent result. When neither term starts with `[` the root
    /// items are compared before descending into the nested levels.
    pub fn compare(&self, a: &str, b: &str) -> AdtResult<ComparisonResult> {
        let a = self.prepare(a)?;
        let b = self.prepare(b)?;
        let threshold = self.config.threshold;
        let mut distance = 0;

        if !a.starts_with('[') && !b.starts_with('[') {
            let root = multiset_equivalence(&a, &b, threshold)?;
            if !root.equivalent {
                tracing::debug!(a = %a, b = %b, "root items diverge");
                return Ok(ComparisonResult::diverged(Divergence::new(
                    0,
                    DivergenceReason::RootMismatch,
                )));
            }
            distance += root.distance;
        }

        let descent = RecursiveComparator::new(threshold, self.config.max_depth)
            .with_same_owner_only(self.config.strict_parent_child)
            .descend(&a, &b, 0)?;
        let result = match descent.divergence {
            Some(divergence) => ComparisonResult::diverged(divergence),
            None => ComparisonResult::equivalent(distance + descent.distance),
        };

        tracing::debug!(
            equivalent = result.equivalent,
            distance = result.distance,
            "compared ADTerms"
        );
        Ok(result)
    }

    /// Compare many pairs in parallel.
    ///
    /// Each pair gets its own result; a malformed pair does not affect the
    /// others.
    pub fn compare_batch<S>(&self, pairs: &[(S, S)]) -> Vec<AdtResult<ComparisonResult>>
    where
        S: AsRef<str> + Sync,
    {
        tracing::debug!(pairs = pairs.len(), "comparing batch");
        pairs
            .par_iter()
            .map(|(a, b)| self.compare(a.as_ref(), b.as_ref()))
            .collect()
    }

    /// Trim, optionally normalize, and validate one input term.
    fn prepare<'a>(&self, raw: &'a str) -> AdtResult<Cow<'a, str>> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(TermError::Empty.into());
        }
        let prepared = if self.config.normalize_unicode {
            Cow::Owned(trimmed.nfc().collect::<String>())
        } else {
            Cow::Borrowed(trimmed)
        };
        term::validate(&prepared)?;
        Ok(prepared)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AdtError;

    #[test]
    fn default_engine_uses_default_threshold() {
        let engine = CompareEngine::default();
        assert_eq!(engine.threshold(), Threshold::DEFAULT);
    }

    #[test]
    fn set_threshold_rejects_out_of_range() {
        let mut engine = CompareEngine::default();
        assert!(engine.set_threshold(0.7).is_ok());
        assert_eq!(engine.threshold().get(), 0.7);

        let err = engine.set_threshold(1.01).unwrap_err();
        assert!(matches!(err, AdtError::Config(_)));
        assert_eq!(engine.threshold().get(), 0.7);
    }

    #[test]
    fn bare_labels_compare_at_the_root() {
        let engine = CompareEngine::default();
        assert_eq!(
            engine.compare(r#""door""#, r#""door""#).unwrap(),
            ComparisonResult::equivalent(0)
        );
        let result = engine.compare(r#""door""#, r#""window""#).unwrap();
        assert_eq!(
            result.divergence,
            Some(Divergence::new(0, DivergenceReason::RootMismatch))
        );
    }

    #[test]
    fn surrounding_whitespace_is_ignored() {
        let engine = CompareEngine::default();
        let result = engine.compare("  ∧[\"a\"]\n", "∧[\"a\"]").unwrap();
        assert!(result.equivalent);
    }

    #[test]
    fn empty_input_is_an_error() {
        let engine = CompareEngine::default();
        assert!(matches!(
            engine.compare("", r#""a""#),
            Err(AdtError::Term(TermError::Empty))
        ));
    }

    #[test]
    fn normalization_unifies_composed_and_decomposed_labels() {
        let composed = "∧[\"caf\u{e9}\"]";
        let decomposed = "∧[\"cafe\u{301}\"]";

        let exact = CompareEngine::new(CompareConfig::with_threshold(0.0).unwrap());
        assert!(!exact.compare(composed, decomposed).unwrap().equivalent);

        let normalizing = CompareEngine::new(CompareConfig {
            threshold: Threshold::EXACT,
            normalize_unicode: true,
            ..Default::default()
        });
        assert_eq!(
            normalizing.compare(composed, decomposed).unwrap(),
            ComparisonResult::equivalent(0)
        );
    }

    #[test]
    fn leaves_may_swap_gates_unless_strict() {
        let a = r#"∧[∨["x"],∧["y"]]"#;
        let b = r#"∧[∨["y"],∧["x"]]"#;

        let lenient = CompareEngine::new(CompareConfig::with_threshold(0.0).unwrap());
        assert_eq!(lenient.compare(a, b).unwrap(), ComparisonResult::equivalent(0));

        let strict = CompareEngine::new(CompareConfig {
            threshold: Threshold::EXACT,
            strict_parent_child: true,
            ..Default::default()
        });
        assert_eq!(
            strict.compare(a, b).unwrap().divergence,
            Some(Divergence::new(0, DivergenceReason::ParentChildMismatch))
        );
    }

    #[test]
    fn edit_distance_only_for_equivalent_results() {
        assert_eq!(ComparisonResult::equivalent(3).edit_distance(), Some(3));
        let diverged = ComparisonResult::diverged(Divergence::new(
            1,
            DivergenceReason::LevelMismatch,
        ));
        assert_eq!(diverged.edit_distance(), None);
        assert_eq!(diverged.to_string(), "not equivalent: level mismatch at depth 1");
    }
}
