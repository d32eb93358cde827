//! # proctor-review
//!
//! Deterministic end-of-session scoring. Given the ordered action history of
//! one session and the user's goal configuration, produces a
//! [`SessionReview`]: three sub-scores (goal alignment, security compliance,
//! constraint adherence), an overall grade, highlight lists, and a set of
//! plain-language insights. Reviews are persisted as JSON by [`ReviewStore`]
//! and summarized into a rolling markdown log by [`InsightsLog`].

pub mod error;
pub mod insights;
pub mod scorer;
pub mod store;

pub use error::ReviewError;
pub use insights::InsightsLog;
pub use scorer::{
    score_session, ActionHighlight, ActionSummary, BlockedHighlight, Grade, Highlights,
    ScoreBreakdown, SessionReview,
};
pub use store::ReviewStore;
