//! Total predicates for checking values received from untrusted peers.
//!
//! None of these fail; anything malformed is simply `false`.

use tracing::debug;

use crate::challenge::{s256, validate_challenge, validate_verifier};

pub fn is_valid_verifier(value: &str) -> bool {
    validate_verifier(value).is_ok()
}

pub fn is_valid_challenge(value: &str) -> bool {
    validate_challenge(value).is_ok()
}

/// Returns `true` when `challenge` is the S256 challenge of `verifier`.
pub fn verify_pair(verifier: &str, challenge: &str) -> bool {
    if let Err(err) = validate_verifier(verifier) {
        debug!(error = %err, "pkce verification rejected verifier");
        return false;
    }
    let matches = s256(verifier) == challenge;
    if !matches {
        debug!("pkce verifier does not match challenge");
    }
    matches
}
