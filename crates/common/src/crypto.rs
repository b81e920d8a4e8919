//! Credential hashing
//!
//! Passwords are stored as `hex(sha256(password))`: deterministic and
//! unsalted, matching the lab's reference data. A deployment that is not a
//! training target should swap this for a salted, slow KDF behind the same
//! two functions.

use sha2::{Digest, Sha256};

/// Hash a password into its stored digest
pub fn hash_password(password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(password.as_bytes());
    hex::encode(hasher.finalize())
}

/// Verify a password against a stored digest using constant-time comparison.
pub fn verify_password(password: &str, stored_digest: &str) -> bool {
    let candidate = hash_password(password);
    constant_time_eq(candidate.as_bytes(), stored_digest.as_bytes())
}

/// Compare two byte strings without early exit on the first mismatch
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut result = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        result |= x ^ y;
    }
    result == 0
}
