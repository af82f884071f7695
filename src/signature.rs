//! Webhook signature verification.
//!
//! The platform signs webhook deliveries with HMAC-SHA256 over the raw
//! request body, keyed by the webhook's shared secret, and sends the digest
//! as lowercase hex.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use tracing::warn;

type HmacSha256 = Hmac<Sha256>;

/// Verifies a webhook signature.
///
/// `payload` must be the body exactly as received; re-serializing JSON
/// changes its bytes and breaks the signature. Returns `false` on any
/// mismatch and never fails.
///
/// # Example
///
/// ```
/// use mesh_sdk::signature::{sign_payload, verify_signature};
///
/// let signature = sign_payload("hello", "s");
/// assert!(verify_signature("hello", &signature, "s"));
/// assert!(!verify_signature("hello!", &signature, "s"));
/// ```
pub fn verify_signature(payload: impl AsRef<[u8]>, signature: &str, secret: &str) -> bool {
    let Some(expected) = hex_digest(payload.as_ref(), secret) else {
        warn!("webhook secret rejected as HMAC key");
        return false;
    };
    let valid = constant_time_compare(&expected, signature);

    if !valid {
        warn!(
            expected_length = expected.len(),
            actual_length = signature.len(),
            "webhook signature mismatch"
        );
    }

    valid
}

/// Computes the hex-encoded HMAC-SHA256 of `payload` keyed by `secret`.
///
/// HMAC accepts keys of any length, so the result is never empty in
/// practice; an empty string stands in for a rejected key.
#[must_use]
pub fn sign_payload(payload: impl AsRef<[u8]>, secret: &str) -> String {
    hex_digest(payload.as_ref(), secret).unwrap_or_default()
}

fn hex_digest(payload: &[u8], secret: &str) -> Option<String> {
    let mut mac = <HmacSha256 as Mac>::new_from_slice(secret.as_bytes()).ok()?;
    mac.update(payload);
    Some(hex::encode(mac.finalize().into_bytes()))
}

/// Compares without short-circuiting on the first differing byte.
fn constant_time_compare(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut result = 0u8;
    for (x, y) in a.bytes().zip(b.bytes()) {
        result |= x ^ y;
    }
    result == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    // HMAC-SHA256("hello", key = "s")
    const HELLO_S: &str = "8a06a64224d83d1bf0a2140fab7d5b462cf3f450592c7963910ed331e9031056";

    #[test]
    fn matches_known_vector() {
        assert_eq!(sign_payload("hello", "s"), HELLO_S);
        assert!(verify_signature("hello", HELLO_S, "s"));
    }

    #[test]
    fn accepts_own_signature() {
        let signature = sign_payload("hello", "s");

        assert!(verify_signature("hello", &signature, "s"));
        assert!(verify_signature(b"hello".as_slice(), &signature, "s"));
    }

    #[test]
    fn rejects_any_single_character_flip() {
        let signature = sign_payload("hello", "s");

        for i in 0..signature.len() {
            let mut flipped = signature.clone().into_bytes();
            flipped[i] = if flipped[i] == b'0' { b'1' } else { b'0' };
            let flipped = String::from_utf8(flipped).unwrap();

            assert!(
                !verify_signature("hello", &flipped, "s"),
                "flip at {i} accepted"
            );
        }
    }

    #[test]
    fn rejects_wrong_secret() {
        let signature = sign_payload("hello", "s");

        assert!(!verify_signature("hello", &signature, "t"));
    }

    #[test]
    fn rejects_length_mismatch() {
        let signature = sign_payload("hello", "s");

        assert!(!verify_signature("hello", &signature[..63], "s"));
        assert!(!verify_signature("hello", "", "s"));
    }

    #[test]
    fn uppercase_hex_is_rejected() {
        let signature = sign_payload("hello", "s").to_ascii_uppercase();

        assert!(!verify_signature("hello", &signature, "s"));
    }

    #[test]
    fn payload_bytes_are_not_normalized() {
        let signature = sign_payload(r#"{"a": 1}"#, "s");

        assert!(!verify_signature(r#"{"a":1}"#, &signature, "s"));
    }

    #[test]
    fn empty_secret_still_signs() {
        let signature = sign_payload("hello", "");

        assert!(verify_signature("hello", &signature, ""));
    }

    #[test]
    fn long_secret_digest_matches_sign_payload() {
        let secret = "k".repeat(200);

        let digest = hex_digest(b"hello", &secret).unwrap();

        assert_eq!(digest.len(), 64);
        assert_eq!(sign_payload("hello", &secret), digest);
        assert!(verify_signature("hello", &digest, &secret));
    }

    #[test]
    fn constant_time_compare_cases() {
        assert!(constant_time_compare("abc", "abc"));
        assert!(!constant_time_compare("abc", "abd"));
        assert!(!constant_time_compare("abc", "abcd"));
    }
}
