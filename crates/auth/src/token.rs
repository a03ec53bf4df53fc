//! Opaque session-token generation and digesting.
//!
//! Tokens are bearer credentials handed to clients verbatim; the server only
//! ever stores the SHA-256 digest, so a leaked session store does not leak
//! usable tokens. Logout deletes the digest record, which invalidates the
//! token immediately.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use sha2::{Digest, Sha256};

/// Generate a cryptographically random opaque session token
/// (32 bytes → base64url-encoded, no padding).
pub fn generate_token() -> String {
    let mut rng = rand::rng();
    let bytes: [u8; 32] = rand::Rng::random(&mut rng);
    URL_SAFE_NO_PAD.encode(bytes)
}

/// SHA-256 digest of a raw session token, hex-encoded.
///
/// This is the value the session store keys on.
pub fn token_digest(raw: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(raw.as_bytes());
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_are_url_safe() {
        let token = generate_token();
        assert!(token
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
        // 32 bytes → 43 base64url chars.
        assert_eq!(token.len(), 43);
    }

    #[test]
    fn tokens_are_unique() {
        assert_ne!(generate_token(), generate_token());
    }

    #[test]
    fn digest_is_deterministic() {
        let raw = "some-session-token";
        assert_eq!(token_digest(raw), token_digest(raw));
        assert_ne!(token_digest(raw), token_digest("other"));
    }
}
