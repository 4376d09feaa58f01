//! Webhook signature verification
//!
//! The messaging platform signs every webhook body with HMAC-SHA256 keyed by
//! the channel secret and sends the base64 digest in `x-line-signature`.

use base64::{engine::general_purpose::STANDARD, Engine};
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Header carrying the body signature
pub const SIGNATURE_HEADER: &str = "x-line-signature";

/// Checks webhook bodies against the channel secret
#[derive(Clone)]
pub struct SignatureVerifier {
    secret: Vec<u8>,
}

impl SignatureVerifier {
    pub fn new(secret: impl AsRef<[u8]>) -> Self {
        Self {
            secret: secret.as_ref().to_vec(),
        }
    }

    /// Verify `body` against a header value.
    ///
    /// Never fails loudly: a missing header, bad base64 or an empty secret all
    /// yield `false`. The digest comparison is constant-time.
    pub fn verify(&self, body: &[u8], signature: Option<&str>) -> bool {
        let Some(signature) = signature else {
            return false;
        };
        if self.secret.is_empty() {
            return false;
        }
        let Ok(expected) = STANDARD.decode(signature.trim()) else {
            return false;
        };
        let Some(mac) = self.mac(body) else {
            return false;
        };
        mac.verify_slice(&expected).is_ok()
    }

    /// Base64 HMAC-SHA256 of `body`; empty when no secret is configured
    pub fn sign(&self, body: &[u8]) -> String {
        self.mac(body)
            .map(|mac| STANDARD.encode(mac.finalize().into_bytes()))
            .unwrap_or_default()
    }

    fn mac(&self, body: &[u8]) -> Option<HmacSha256> {
        if self.secret.is_empty() {
            return None;
        }
        let mut mac = HmacSha256::new_from_slice(&self.secret).ok()?;
        mac.update(body);
        Some(mac)
    }
}

impl std::fmt::Debug for SignatureVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignatureVerifier")
            .field("secret", &"[redacted]")
            .finish()
    }
}
