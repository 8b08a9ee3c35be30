// Compact HS256 tokens (JWT wire format)

use anyhow::{Context, Result};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use thiserror::Error;
use uuid::Uuid;

type HmacSha256 = Hmac<Sha256>;

/// Token payload. The subject is the stable user id; the username rides
/// along for downstream consumers. No expiry or nonce: signing the same
/// claims with the same secret yields the same token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub username: String,
}

#[derive(Error, Debug)]
pub enum TokenError {
    #[error("Malformed token")]
    Malformed,

    #[error("Invalid token signature")]
    InvalidSignature,
}

/// Sign claims into a compact `header.payload.signature` token
pub fn sign(claims: &Claims, secret: &[u8]) -> Result<String> {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
    let payload = URL_SAFE_NO_PAD.encode(
        serde_json::to_vec(claims).context("Failed to serialize token claims")?,
    );
    let signing_input = format!("{header}.{payload}");

    let mut mac = HmacSha256::new_from_slice(secret)
        .context("Failed to initialize token signer")?;
    mac.update(signing_input.as_bytes());
    let signature = URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes());

    Ok(format!("{signing_input}.{signature}"))
}

/// Verify a compact token and return its claims.
/// The signature check is constant-time via the mac verifier.
pub fn verify(token: &str, secret: &[u8]) -> Result<Claims, TokenError> {
    let mut parts = token.split('.');
    let (header, payload, signature) = match (parts.next(), parts.next(), parts.next(), parts.next()) {
        (Some(header), Some(payload), Some(signature), None) => (header, payload, signature),
        _ => return Err(TokenError::Malformed),
    };

    let signature_bytes = URL_SAFE_NO_PAD
        .decode(signature)
        .map_err(|_| TokenError::Malformed)?;

    let mut mac = HmacSha256::new_from_slice(secret).map_err(|_| TokenError::Malformed)?;
    mac.update(header.as_bytes());
    mac.update(b".");
    mac.update(payload.as_bytes());
    mac.verify_slice(&signature_bytes)
        .map_err(|_| TokenError::InvalidSignature)?;

    let payload_bytes = URL_SAFE_NO_PAD
        .decode(payload)
        .map_err(|_| TokenError::Malformed)?;

    serde_json::from_slice(&payload_bytes).map_err(|_| TokenError::Malformed)
}
