//! Property-based tests for ADTerm comparison.
//!
//! Trees are generated structurally and rendered to terms, so every
//! generated term is well formed by construction.

use adterm::config::CompareConfig;
use adterm::engine::{CompareEngine, ComparisonResult};
use adterm::error::AdtError;
use adterm::term::{TermError, TermStats};
use proptest::prelude::*;

// =============================================================================
// Tree model
// =============================================================================

#[derive(Debug, Clone)]
enum Tree {
    Leaf(String),
    Gate(char, Vec<Tree>),
    Counter(Vec<Tree>),
}

impl Tree {
    fn render(&self) -> String {
        self.render_with(false)
    }

    /// Render with the children of every gate in reverse order.
    fn render_reversed(&self) -> String {
        self.render_with(true)
    }

    fn render_with(&self, reverse_gates: bool) -> String {
        match self {
            Tree::Leaf(label) => format!("\"{label}\""),
            Tree::Gate(symbol, children) if reverse_gates => {
                format!("{symbol}[{}]", render_children(children.iter().rev(), true))
            }
            Tree::Gate(symbol, children) => {
                format!("{symbol}[{}]", render_children(children.iter(), reverse_gates))
            }
            Tree::Counter(children) => {
                format!("c[{}]", render_children(children.iter(), reverse_gates))
            }
        }
    }

    fn leaves(&self) -> usize {
        match self {
            Tree::Leaf(_) => 1,
            Tree::Gate(_, children) | Tree::Counter(children) => {
                children.iter().map(Tree::leaves).sum()
            }
        }
    }
}

fn render_children<'a>(children: impl Iterator<Item = &'a Tree>, reverse_gates: bool) -> String {
    children
        .map(|c| c.render_with(reverse_gates))
        .collect::<Vec<_>>()
        .join(",")
}

/// Tree shape without labels; labels are assigned afterwards by position.
#[derive(Debug, Clone)]
enum Shape {
    Leaf,
    Gate(char, Vec<Shape>),
}

fn label_leaves(shape: &Shape, next: &mut usize) -> Tree {
    match shape {
        Shape::Leaf => {
            *next += 1;
            Tree::Leaf(format!("leaf{next}"))
        }
        Shape::Gate(symbol, children) => Tree::Gate(
            *symbol,
            children.iter().map(|c| label_leaves(c, next)).collect(),
        ),
    }
}

// =============================================================================
// Strategies
// =============================================================================

fn gate_symbol() -> impl Strategy<Value = char> {
    prop_oneof![Just('∧'), Just('∨')]
}

fn label() -> impl Strategy<Value = String> {
    "[a-z][a-z ]{0,7}"
}

/// Arbitrary trees, labels may repeat, counter-measures included.
fn arbitrary_tree() -> impl Strategy<Value = Tree> {
    let leaf = label().prop_map(Tree::Leaf);
    leaf.prop_recursive(4, 32, 4, |inner| {
        prop_oneof![
            3 => (gate_symbol(), prop::collection::vec(inner.clone(), 1..=4))
                .prop_map(|(symbol, children)| Tree::Gate(symbol, children)),
            1 => prop::collection::vec(inner, 1..=2).prop_map(Tree::Counter),
        ]
    })
}

/// Gate-only trees whose leaf labels are unique.
fn unique_label_tree() -> impl Strategy<Value = Tree> {
    let leaf = Just(Shape::Leaf);
    let shape = leaf.prop_recursive(4, 32, 4, |inner| {
        (gate_symbol(), prop::collection::vec(inner, 1..=4))
            .prop_map(|(symbol, children)| Shape::Gate(symbol, children))
    });
    shape.prop_map(|s| label_leaves(&s, &mut 0))
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #[test]
    fn every_term_equals_itself(tree in arbitrary_tree()) {
        let engine = CompareEngine::default();
        let term = tree.render();
        prop_assert_eq!(engine.compare(&term, &term).unwrap(), ComparisonResult::equivalent(0));
    }

    #[test]
    fn gate_children_order_is_irrelevant(tree in unique_label_tree()) {
        let engine = CompareEngine::new(CompareConfig::with_threshold(0.0).unwrap());
        let a = tree.render();
        let b = tree.render_reversed();
        prop_assert_eq!(engine.compare(&a, &b).unwrap(), ComparisonResult::equivalent(0));
        prop_assert_eq!(engine.compare(&b, &a).unwrap(), ComparisonResult::equivalent(0));
    }

    #[test]
    fn stats_count_generated_leaves(tree in arbitrary_tree()) {
        let stats = TermStats::from_term(&tree.render()).unwrap();
        prop_assert_eq!(stats.leaves, tree.leaves());
    }

    #[test]
    fn truncated_terms_are_rejected(
        symbol in gate_symbol(),
        children in prop::collection::vec(arbitrary_tree(), 1..=3),
    ) {
        let term = Tree::Gate(symbol, children).render();
        let truncated = &term[..term.len() - 1];
        let engine = CompareEngine::default();
        let result = engine.compare(truncated, &term);
        prop_assert!(
            matches!(result, Err(AdtError::Term(TermError::UnclosedBracket { .. }))),
            "expected unclosed bracket for {}",
            truncated
        );
    }
}
