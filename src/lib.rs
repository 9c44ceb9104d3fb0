// thiserror's #[error("...{field}...")] format strings reference struct fields,
// but the compiler doesn't see through the derive macro and reports false positives.
#![allow(unused_assignments)]

//! # adterm
//!
//! Structural equivalence of Attack-Defense Tree terms (ADTerms), tolerant of
//! sibling reordering and of small spelling differences in leaf labels.
//!
//! ## Architecture
//!
//! - **Terms** (`term`): shared lexer, level scanners and term statistics
//! - **Comparison** (`compare`): fuzzy multiset matching, recursive descent and
//!   parent-child validation
//! - **Configuration** (`config`): validated threshold and TOML config files
//! - **Engine** (`engine`): the comparison facade, single and batch
//!
//! ## Library usage
//!
//! ```no_run
//! use adterm::config::CompareConfig;
//! use adterm::engine::CompareEngine;
//!
//! let mut engine = CompareEngine::new(CompareConfig::default());
//! engine.set_threshold(0.5).unwrap();
//! let result = engine.compare(r#"∧["apple","door"]"#, r#"∧["dor","appel"]"#).unwrap();
//! assert!(result.equivalent);
//! ```

pub mod compare;
pub mod config;
pub mod engine;
pub mod error;
pub mod term;
