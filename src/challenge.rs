use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use sha2::{Digest, Sha256};
use tracing::debug;

use crate::PkceError;
use crate::constants::{
    CHALLENGE_MAX_LEN, CHALLENGE_MIN_LEN, VERIFIER_MAX_LEN, VERIFIER_MIN_LEN, is_challenge_char,
    is_verifier_char,
};

/// Checks a verifier against RFC 7636 §4.1, reporting the first violation.
///
/// Checks run in order: presence, minimum length, maximum length, then each
/// character. Lengths and positions count characters, not bytes.
pub fn validate_verifier(verifier: &str) -> Result<(), PkceError> {
    if verifier.is_empty() {
        return Err(PkceError::MissingVerifier);
    }

    let len = verifier.chars().count();
    if len < VERIFIER_MIN_LEN {
        return Err(PkceError::VerifierTooShort {
            len,
            min: VERIFIER_MIN_LEN,
        });
    }
    if len > VERIFIER_MAX_LEN {
        return Err(PkceError::VerifierTooLong {
            len,
            max: VERIFIER_MAX_LEN,
        });
    }

    if let Some((position, character)) = verifier
        .chars()
        .enumerate()
        .find(|(_, c)| !is_verifier_char(*c))
    {
        return Err(PkceError::InvalidVerifierCharacter {
            character,
            position,
        });
    }

    Ok(())
}

/// Checks that a value is shaped like an S256 challenge: unpadded base64url
/// of plausible length.
pub fn validate_challenge(challenge: &str) -> Result<(), PkceError> {
    let len = challenge.chars().count();
    if !(CHALLENGE_MIN_LEN..=CHALLENGE_MAX_LEN).contains(&len) {
        return Err(PkceError::InvalidChallengeLength {
            len,
            min: CHALLENGE_MIN_LEN,
            max: CHALLENGE_MAX_LEN,
        });
    }

    if let Some((position, character)) = challenge
        .chars()
        .enumerate()
        .find(|(_, c)| !is_challenge_char(*c))
    {
        return Err(PkceError::InvalidChallengeCharacter {
            character,
            position,
        });
    }

    Ok(())
}

/// Derives the S256 code challenge: `BASE64URL(SHA256(ASCII(verifier)))`
/// without padding.
pub fn derive_challenge(verifier: &str) -> Result<String, PkceError> {
    if let Err(err) = validate_verifier(verifier) {
        debug!(error = %err, "rejected code verifier");
        return Err(err);
    }
    Ok(s256(verifier))
}

pub(crate) fn s256(verifier: &str) -> String {
    let digest = Sha256::digest(verifier.as_bytes());
    URL_SAFE_NO_PAD.encode(digest)
}
