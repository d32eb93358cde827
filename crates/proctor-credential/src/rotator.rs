// rotator.rs — Time-windowed rotating token derivation.
//
// Window index = floor(now_ms / (rotation_minutes * 60_000)). The token for
// a window is the first 16 hex characters of HMAC-SHA256(secret, decimal
// window index). A token is valid for its own window and the one after it —
// equivalently, validation accepts the current window and the immediately
// preceding one. Anything older fails. Derivation is pure given (secret,
// now, rotation_minutes); nothing is cached and no token is ever stored.

use std::path::Path;

use chrono::Utc;
use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::error::CredentialError;
use crate::secret::{self, SECRET_LEN};

type HmacSha256 = Hmac<Sha256>;

/// Token length in hex characters.
pub const TOKEN_LEN: usize = 16;

/// Rotation period used when the config does not specify one.
pub const DEFAULT_ROTATION_MINUTES: u64 = 15;

const MS_PER_MINUTE: i64 = 60_000;

/// Derives and validates rotating verification tokens.
#[derive(Clone)]
pub struct CredentialRotator {
    secret: [u8; SECRET_LEN],
    rotation_minutes: u64,
}

impl CredentialRotator {
    /// A rotation period of zero is clamped to one minute.
    pub fn new(secret: [u8; SECRET_LEN], rotation_minutes: u64) -> Self {
        Self {
            secret,
            rotation_minutes: rotation_minutes.max(1),
        }
    }

    /// Load (or create) the secret file at `path` and build a rotator on it.
    pub fn from_secret_file(path: &Path, rotation_minutes: u64) -> Result<Self, CredentialError> {
        Ok(Self::new(secret::load_or_create(path)?, rotation_minutes))
    }

    pub fn rotation_minutes(&self) -> u64 {
        self.rotation_minutes
    }

    /// The token for the current window.
    pub fn generate_token(&self) -> String {
        self.token_for_window(self.window_at(now_ms()))
    }

    /// True iff `token` matches the current window or the immediately
    /// preceding one. Malformed input is simply invalid, never an error.
    pub fn validate_token(&self, token: &str) -> bool {
        self.validate_at(token, now_ms())
    }

    /// The current window index.
    pub fn current_window(&self) -> i64 {
        self.window_at(now_ms())
    }

    /// Milliseconds until the current window rolls over.
    pub fn ms_until_rotation(&self) -> i64 {
        let window_ms = self.rotation_minutes as i64 * MS_PER_MINUTE;
        let now = now_ms();
        (self.window_at(now) + 1) * window_ms - now
    }

    fn window_at(&self, now_ms: i64) -> i64 {
        now_ms.div_euclid(self.rotation_minutes as i64 * MS_PER_MINUTE)
    }

    fn token_for_window(&self, window: i64) -> String {
        // HMAC-SHA256 accepts keys of any length, so this cannot fail for a
        // 32-byte secret.
        let Ok(mut mac) = HmacSha256::new_from_slice(&self.secret) else {
            return String::new();
        };
        mac.update(window.to_string().as_bytes());
        let digest = mac.finalize().into_bytes();
        hex::encode(digest)[..TOKEN_LEN].to_string()
    }

    fn validate_at(&self, token: &str, now_ms: i64) -> bool {
        if token.len() != TOKEN_LEN {
            return false;
        }
        let current = self.window_at(now_ms);
        constant_time_eq(token.as_bytes(), self.token_for_window(current).as_bytes())
            || constant_time_eq(
                token.as_bytes(),
                self.token_for_window(current - 1).as_bytes(),
            )
    }
}

/// Length-guarded constant-time byte comparison.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut diff = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        diff |= x ^ y;
    }
    diff == 0
}

fn now_ms() -> i64 {
    Utc::now().timestamp_millis()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rotator() -> CredentialRotator {
        CredentialRotator::new([7u8; SECRET_LEN], 10)
    }

    #[test]
    fn freshly_generated_token_validates() {
        let rotator = rotator();
        let token = rotator.generate_token();
        assert!(rotator.validate_token(&token));
    }

    #[test]
    fn token_shape_is_sixteen_lowercase_hex_chars() {
        let token = rotator().generate_token();
        assert_eq!(token.len(), TOKEN_LEN);
        assert!(token.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn token_is_valid_in_its_own_and_the_next_window() {
        let rotator = rotator();
        let window_ms = 10 * MS_PER_MINUTE;
        // An instant inside window 500, and the token issued there.
        let issued_at = 500 * window_ms + 1_234;
        let token = rotator.token_for_window(rotator.window_at(issued_at));

        // Same window: valid.
        assert!(rotator.validate_at(&token, issued_at + 5_000));
        // Next window: still valid (grace for boundary races).
        assert!(rotator.validate_at(&token, 501 * window_ms + 1));
        // Two windows later: expired.
        assert!(!rotator.validate_at(&token, 502 * window_ms + 1));
        assert!(!rotator.validate_at(&token, 503 * window_ms + 1));
    }

    #[test]
    fn adjacent_windows_produce_different_tokens() {
        let rotator = rotator();
        assert_ne!(rotator.token_for_window(500), rotator.token_for_window(501));
    }

    #[test]
    fn different_secrets_produce_different_tokens() {
        let a = CredentialRotator::new([1u8; SECRET_LEN], 10);
        let b = CredentialRotator::new([2u8; SECRET_LEN], 10);
        assert_ne!(a.token_for_window(42), b.token_for_window(42));
    }

    #[test]
    fn malformed_tokens_are_invalid_not_errors() {
        let rotator = rotator();
        assert!(!rotator.validate_token(""));
        assert!(!rotator.validate_token("zzzzzzzzzzzzzzzz"));
        assert!(!rotator.validate_token("abc123"));
        assert!(!rotator.validate_token("0123456789abcdef0123456789abcdef"));
    }

    #[test]
    fn rotation_period_of_zero_is_clamped() {
        let rotator = CredentialRotator::new([7u8; SECRET_LEN], 0);
        assert_eq!(rotator.rotation_minutes(), 1);
        let token = rotator.generate_token();
        assert!(rotator.validate_token(&token));
    }

    #[test]
    fn rotator_from_secret_file_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("secret.key");
        let first = CredentialRotator::from_secret_file(&path, 10).unwrap();
        let second = CredentialRotator::from_secret_file(&path, 10).unwrap();
        // Same persisted secret: same tokens.
        assert_eq!(first.token_for_window(9), second.token_for_window(9));
    }

    #[test]
    fn ms_until_rotation_is_within_one_window() {
        let rotator = rotator();
        let remaining = rotator.ms_until_rotation();
        assert!(remaining > 0);
        assert!(remaining <= 10 * MS_PER_MINUTE);
    }
}
