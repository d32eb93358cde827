//! # proctor-drift
//!
//! Scores how well a free-text activity summary matches the user's configured
//! goal categories, using the static keyword table from `proctor-lexicon`.
//! The score is purely lexical: no model calls, no embeddings, deterministic
//! for a given summary and category list.

pub mod assessor;

pub use assessor::{assess_summary, DriftAssessment, DriftAssessor, DriftLevel};
