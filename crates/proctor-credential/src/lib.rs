//! # proctor-credential
//!
//! The rotating verification token scheme.
//!
//! A single 256-bit secret is generated once and persisted beside the policy
//! configuration with owner-only permissions. Tokens are derived, never
//! stored: the current time maps to a window index, and the token for a
//! window is a truncated HMAC of the decimal window index under the secret.
//! Validation accepts the current window and the immediately preceding one,
//! absorbing boundary races between token issuance and action execution.

pub mod error;
pub mod rotator;
pub mod secret;

pub use error::CredentialError;
pub use rotator::{CredentialRotator, DEFAULT_ROTATION_MINUTES, TOKEN_LEN};
pub use secret::{load_or_create, SECRET_LEN};
