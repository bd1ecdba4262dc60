//! The shared HMAC-SHA256 primitive: used both to derive/verify service
//! credentials and, by the webhook ingestor, to verify inbound signatures.
//! A single constant-time comparison path means neither caller can
//! accidentally regress to a timing-unsafe `==` on the digest.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

type HmacSha256 = Hmac<Sha256>;

/// Computes `hex(HMAC-SHA256(secret, message))`.
pub fn compute_hmac_hex(secret: &[u8], message: &[u8]) -> String {
    let mut mac = HmacSha256::new_from_slice(secret).expect("HMAC accepts keys of any length");
    mac.update(message);
    let digest = mac.finalize().into_bytes();
    hex_encode(&digest)
}

/// Verifies `presented_hex` against `HMAC-SHA256(secret, message)` in constant time.
///
/// Returns `false` (rather than erroring) on malformed hex, since a
/// malformed signature is just another way to fail verification.
pub fn verify_hmac_hex(secret: &[u8], message: &[u8], presented_hex: &str) -> bool {
    let Some(presented) = hex_decode(presented_hex) else {
        return false;
    };

    let mut mac = HmacSha256::new_from_slice(secret).expect("HMAC accepts keys of any length");
    mac.update(message);
    let expected = mac.finalize().into_bytes();

    if expected.len() != presented.len() {
        return false;
    }
    expected.as_slice().ct_eq(&presented).into()
}

fn hex_encode(bytes: &[u8]) -> String {
    use std::fmt::Write;
    let mut out = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        write!(out, "{b:02x}").expect("writing to a String cannot fail");
    }
    out
}

fn hex_decode(s: &str) -> Option<Vec<u8>> {
    if s.len() % 2 != 0 {
        return None;
    }
    (0..s.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&s[i..i + 2], 16).ok())
        .collect()
}
