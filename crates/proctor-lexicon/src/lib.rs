//! # proctor-lexicon
//!
//! Shared lexical primitives for Proctor.
//!
//! Policy target matching, drift assessment, and session scoring all reduce
//! free text to the same token stream and compare tokens against keywords the
//! same way. Keeping the primitives in one crate keeps the three consumers in
//! agreement about what "matches" means.

pub mod categories;
pub mod tokens;

pub use categories::{category_keywords, CATEGORY_NAMES};
pub use tokens::{bidirectional_contains, contains_ci, tokenize, tokenize_min, MIN_TOKEN_LEN};
