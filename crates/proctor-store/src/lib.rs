//! # proctor-store
//!
//! Action records and the append-only action history log.
//!
//! Every verified action becomes one [`ActionRecord`]: what was proposed,
//! what the policy decided, and whether the caller held a valid verification
//! token at the time. Records are append-only JSONL — one JSON object per
//! line — and are never mutated after being written. Session scoring reads
//! them back ordered by timestamp.

pub mod error;
pub mod log;
pub mod record;

pub use error::StoreError;
pub use log::ActionLog;
pub use record::{ActionRecord, ActionType, Verdict};
