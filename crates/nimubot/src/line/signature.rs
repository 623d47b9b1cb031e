//! `X-Line-Signature` verification.
//!
//! The signature is the base64 HMAC-SHA256 of the raw request body keyed with
//! the channel secret.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use hmac::{digest::InvalidLength, Hmac, Mac};
use sha2::Sha256;

pub const SIGNATURE_HEADER: &str = "x-line-signature";

type HmacSha256 = Hmac<Sha256>;

/// Compute the signature LINE would send for `body`
pub fn sign(channel_secret: &str, body: &[u8]) -> Result<String, InvalidLength> {
    let mut mac = HmacSha256::new_from_slice(channel_secret.as_bytes())?;
    mac.update(body);
    Ok(STANDARD.encode(mac.finalize().into_bytes()))
}

/// Check a received signature in constant time
pub fn verify(channel_secret: &str, body: &[u8], signature: &str) -> bool {
    let Ok(expected) = STANDARD.decode(signature.trim()) else {
        return false;
    };
    let Ok(mut mac) = HmacSha256::new_from_slice(channel_secret.as_bytes()) else {
        return false;
    };
    mac.update(body);
    mac.verify_slice(&expected).is_ok()
}
