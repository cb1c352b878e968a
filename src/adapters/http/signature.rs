//! Webhook payload signature verification.
//!
//! The transport signs every delivery with HMAC-SHA256 over the raw body
//! and sends the result as `X-Hub-Signature-256: sha256=<hex>`. Comparison
//! is constant-time.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

type HmacSha256 = Hmac<Sha256>;

const SCHEME_PREFIX: &str = "sha256=";

/// Checks a signature header against the payload. Any malformed header
/// fails closed.
pub fn verify_signature(app_secret: &[u8], payload: &[u8], header_value: &str) -> bool {
    let Some(hex_digest) = header_value.strip_prefix(SCHEME_PREFIX) else {
        return false;
    };
    let Some(claimed) = hex_decode(hex_digest) else {
        return false;
    };

    // HMAC accepts keys of any length, so new_from_slice cannot fail.
    let Ok(mut mac) = HmacSha256::new_from_slice(app_secret) else {
        return false;
    };
    mac.update(payload);
    let expected = mac.finalize().into_bytes();

    expected.ct_eq(claimed.as_slice()).into()
}

fn hex_decode(hex: &str) -> Option<Vec<u8>> {
    if hex.len() % 2 != 0 {
        return None;
    }
    (0..hex.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&hex[i..i + 2], 16).ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &[u8] = b"test-app-secret";
    const PAYLOAD: &[u8] = br#"{"object":"whatsapp_business_account"}"#;
    const SIGNATURE: &str =
        "sha256=b6978b21c4467654c466607663db9b43fae44b71083568df403e0a077089208e";

    #[test]
    fn accepts_a_valid_signature() {
        assert!(verify_signature(SECRET, PAYLOAD, SIGNATURE));
    }

    #[test]
    fn rejects_a_tampered_payload() {
        assert!(!verify_signature(SECRET, b"{\"object\":\"tampered\"}", SIGNATURE));
    }

    #[test]
    fn rejects_the_wrong_secret() {
        assert!(!verify_signature(b"other-secret", PAYLOAD, SIGNATURE));
    }

    #[test]
    fn rejects_malformed_headers() {
        assert!(!verify_signature(SECRET, PAYLOAD, "md5=abcdef"));
        assert!(!verify_signature(SECRET, PAYLOAD, "sha256=not-hex"));
        assert!(!verify_signature(SECRET, PAYLOAD, "sha256=abc"));
        assert!(!verify_signature(SECRET, PAYLOAD, ""));
    }
}
