//! # proctor-policy
//!
//! Evaluates proposed actions against the configured policy.
//!
//! Rule groups run in a fixed order — spending, contacts, domains, blocked
//! action types, custom rules — and the first hard block ends evaluation.
//! Warnings never stop evaluation; they flag the action for confirmation and
//! let the remaining groups run. The evaluator also owns the only mutable
//! policy state: the daily spend accumulator, which resets when the local
//! calendar date changes.

pub mod evaluator;
pub mod spend;

pub use evaluator::{ActionRequest, PolicyCheck, PolicyEvaluator};
pub use spend::DailySpendState;
