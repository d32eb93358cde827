//! # proctor-config
//!
//! User-authored configuration for Proctor: the policy document (spending
//! limits, contact/domain lists, blocked actions, custom rules) and the goal
//! document (goals, priorities, constraints, goal categories).
//!
//! Loading is forgiving. A missing or malformed file falls back to built-in
//! defaults with a logged warning — a broken config must never take the
//! verification path down with it. Callers that need individual values use
//! dotted-path lookup with a caller-supplied default.

pub mod error;
pub mod goals;
pub mod policy;
pub mod store;

pub use error::ConfigError;
pub use goals::{GoalConfig, Priority};
pub use policy::{
    CustomRule, ListMode, PolicyConfig, RuleAction, RuleCondition, RuleField, RuleOperator,
    SpendingLimits, TargetRules,
};
pub use store::{lookup_or, write_default_files, ConfigStore};
