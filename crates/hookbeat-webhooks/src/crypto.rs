//! HMAC-SHA256 computation and verification for webhook payloads.

use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Scheme prefix carried in signature headers.
pub const SIGNATURE_SCHEME_PREFIX: &str = "sha256=";

/// Compute the HMAC-SHA256 signature of `body` keyed by `secret`.
///
/// Returns a lowercase hex digest. Deterministic; an empty secret is
/// permitted and produces a valid (weak) signature.
pub fn sign(body: &[u8], secret: &[u8]) -> String {
    let mut mac =
        <HmacSha256 as Mac>::new_from_slice(secret).expect("HMAC can take key of any size");
    mac.update(body);
    hex::encode(mac.finalize().into_bytes())
}

/// Verify a candidate signature against the digest recomputed from `body`.
///
/// An optional `sha256=` scheme prefix is stripped before comparison, and
/// hex digits match case-insensitively. A malformed candidate (wrong
/// length, non-hex) simply fails verification. The comparison itself runs
/// in constant time.
pub fn verify(body: &[u8], secret: &[u8], candidate: &str) -> bool {
    let candidate = candidate
        .strip_prefix(SIGNATURE_SCHEME_PREFIX)
        .unwrap_or(candidate)
        .to_ascii_lowercase();

    let expected = sign(body, secret);
    constant_time_eq(expected.as_bytes(), candidate.as_bytes())
}

/// Constant-time byte comparison to prevent timing attacks.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    use subtle::ConstantTimeEq;
    a.ct_eq(b).into()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
