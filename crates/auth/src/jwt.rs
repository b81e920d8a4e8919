//! Compact HS256 token codec
//!
//! Tokens are `base64url(header).base64url(payload).base64url(signature)`
//! with no padding. The signature is HMAC-SHA256 over the literal
//! `header.payload` string.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use hmac::{Hmac, Mac};
use serde::{de::DeserializeOwned, Serialize};
use sha2::Sha256;

use crate::error::AuthError;

type HmacSha256 = Hmac<Sha256>;

#[derive(Serialize)]
struct TokenHeader {
    alg: &'static str,
    typ: &'static str,
}

const HEADER: TokenHeader = TokenHeader {
    alg: "HS256",
    typ: "JWT",
};

fn mac(secret: &str) -> Result<HmacSha256, AuthError> {
    HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|e| AuthError::TokenSigning(e.to_string()))
}

/// Sign `claims` with `secret`.
pub fn sign<C: Serialize>(claims: &C, secret: &str) -> Result<String, AuthError> {
    let header = serde_json::to_vec(&HEADER).map_err(|e| AuthError::TokenSigning(e.to_string()))?;
    let payload =
        serde_json::to_vec(claims).map_err(|e| AuthError::TokenSigning(e.to_string()))?;

    let signing_input = format!(
        "{}.{}",
        URL_SAFE_NO_PAD.encode(header),
        URL_SAFE_NO_PAD.encode(payload)
    );

    let mut mac = mac(secret)?;
    mac.update(signing_input.as_bytes());
    let signature = URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes());

    Ok(format!("{signing_input}.{signature}"))
}

/// Verify `token` against `secret` at the current time.
///
/// Returns `None` for anything that is not a well-formed, correctly signed,
/// unexpired token. Never panics on hostile input.
pub fn verify<C: DeserializeOwned>(token: &str, secret: &str) -> Option<C> {
    verify_at(token, secret, chrono::Utc::now().timestamp())
}

/// Verify `token` as of `now` (epoch seconds).
pub fn verify_at<C: DeserializeOwned>(token: &str, secret: &str, now: i64) -> Option<C> {
    let mut segments = token.split('.');
    let (Some(header), Some(payload), Some(signature), None) = (
        segments.next(),
        segments.next(),
        segments.next(),
        segments.next(),
    ) else {
        tracing::debug!("Rejected token: wrong segment count");
        return None;
    };

    let signature = URL_SAFE_NO_PAD.decode(signature).ok()?;

    let mut mac = mac(secret).ok()?;
    mac.update(header.as_bytes());
    mac.update(b".");
    mac.update(payload.as_bytes());
    // verify_slice compares in constant time
    if mac.verify_slice(&signature).is_err() {
        tracing::debug!("Rejected token: bad signature");
        return None;
    }

    let payload = URL_SAFE_NO_PAD.decode(payload).ok()?;
    let payload: serde_json::Value = serde_json::from_slice(&payload).ok()?;

    match payload.get("exp") {
        None | Some(serde_json::Value::Null) => {}
        Some(exp) => {
            let exp = exp.as_f64()?;
            if exp <= now as f64 {
                tracing::debug!(exp, now, "Rejected token: expired");
                return None;
            }
        }
    }

    serde_json::from_value(payload).ok()
}
