use serde::{Deserialize, Serialize};

use crate::challenge::{derive_challenge, s256};
use crate::generator::VerifierGenerator;
use crate::validate::verify_pair;
use crate::{ChallengeMethod, PkceError};

/// A code verifier together with its S256 challenge.
///
/// Serialises with the OAuth parameter names `code_verifier`,
/// `code_challenge` and `code_challenge_method`. Deserialising re-derives the
/// challenge, so a `PkcePair` always holds a valid verifier and its own
/// challenge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawPkcePair")]
pub struct PkcePair {
    #[serde(rename = "code_verifier")]
    verifier: String,
    #[serde(rename = "code_challenge")]
    challenge: String,
    #[serde(rename = "code_challenge_method")]
    method: ChallengeMethod,
}

#[derive(Deserialize)]
struct RawPkcePair {
    code_verifier: String,
    code_challenge: String,
    code_challenge_method: ChallengeMethod,
}

impl TryFrom<RawPkcePair> for PkcePair {
    type Error = PkceError;

    fn try_from(raw: RawPkcePair) -> Result<Self, Self::Error> {
        let pair = Self::from_verifier(raw.code_verifier)?;
        if pair.challenge != raw.code_challenge {
            return Err(PkceError::ChallengeMismatch);
        }
        Ok(Self {
            method: raw.code_challenge_method,
            ..pair
        })
    }
}

impl PkcePair {
    pub fn generate() -> Self {
        Self::generate_with(&VerifierGenerator::default())
    }

    pub fn generate_with(generator: &VerifierGenerator) -> Self {
        let verifier = generator.generate();
        // generated verifiers always satisfy the verifier checks
        let challenge = s256(&verifier);
        Self {
            verifier,
            challenge,
            method: ChallengeMethod::S256,
        }
    }

    pub fn from_verifier(verifier: impl Into<String>) -> Result<Self, PkceError> {
        let verifier = verifier.into();
        let challenge = derive_challenge(&verifier)?;
        Ok(Self {
            verifier,
            challenge,
            method: ChallengeMethod::S256,
        })
    }

    /// The secret kept by the client until the token request.
    pub fn verifier(&self) -> &str {
        &self.verifier
    }

    pub fn challenge(&self) -> &str {
        &self.challenge
    }

    pub fn method(&self) -> ChallengeMethod {
        self.method
    }

    pub fn into_parts(self) -> (String, String, ChallengeMethod) {
        (self.verifier, self.challenge, self.method)
    }

    /// Re-derives the challenge from the verifier and compares.
    pub fn verify(&self) -> bool {
        verify_pair(&self.verifier, &self.challenge)
    }
}

/// Generates a verifier and its S256 challenge in one step.
pub fn generate_pair() -> PkcePair {
    PkcePair::generate()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{is_valid_challenge, is_valid_verifier};

    const RFC_VERIFIER: &str = "dBjftJeZ4CVP-mB92K27uhbUJU1p1r_wW1gFWFOEjXk";
    const RFC_CHALLENGE: &str = "E9Melhoa2OwvFrEMTJguCHaoeK1t8URWbuGJSstw-cM";

    #[test]
    fn generates_url_safe_pkce() {
        let pkce = generate_pair();
        for value in [pkce.verifier(), pkce.challenge()] {
            assert!(!value.contains('='), "pkce values should be unpadded");
            assert!(!value.contains('+'), "pkce values should be url safe");
            assert!(!value.contains('/'), "pkce values should be url safe");
        }
        assert!(is_valid_verifier(pkce.verifier()));
        assert!(is_valid_challenge(pkce.challenge()));
        assert_eq!(pkce.challenge().len(), 43);
        assert_eq!(pkce.method().as_str(), "S256");
    }

    #[test]
    fn generated_pair_rederives_same_challenge() {
        for _ in 0..100 {
            let pkce = PkcePair::generate();
            assert_eq!(derive_challenge(pkce.verifier()).unwrap(), pkce.challenge());
            assert!(pkce.verify());
        }
    }

    #[test]
    fn generate_with_respects_generator_length() {
        let generator = VerifierGenerator::new().with_length(43).unwrap();
        let pkce = PkcePair::generate_with(&generator);
        assert_eq!(pkce.verifier().len(), 43);
        assert!(pkce.verify());
    }

    #[test]
    fn from_verifier_uses_rfc_vector() {
        let pkce = PkcePair::from_verifier(RFC_VERIFIER).unwrap();
        assert_eq!(pkce.challenge(), RFC_CHALLENGE);
        assert_eq!(pkce.method(), ChallengeMethod::S256);
    }

    #[test]
    fn from_verifier_rejects_invalid_input() {
        assert!(matches!(
            PkcePair::from_verifier(""),
            Err(PkceError::MissingVerifier)
        ));
    }

    #[test]
    fn challenge_of_another_pair_does_not_verify() {
        let pkce = PkcePair::generate();
        let other = PkcePair::generate();
        assert!(!verify_pair(pkce.verifier(), other.challenge()));
    }

    #[test]
    fn into_parts_returns_fields() {
        let (verifier, challenge, method) = PkcePair::from_verifier(RFC_VERIFIER)
            .unwrap()
            .into_parts();
        assert_eq!(verifier, RFC_VERIFIER);
        assert_eq!(challenge, RFC_CHALLENGE);
        assert_eq!(method, ChallengeMethod::S256);
    }

    #[test]
    fn serializes_with_oauth_parameter_names() {
        let pkce = PkcePair::from_verifier(RFC_VERIFIER).unwrap();
        let value = serde_json::to_value(&pkce).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "code_verifier": RFC_VERIFIER,
                "code_challenge": RFC_CHALLENGE,
                "code_challenge_method": "S256",
            })
        );

        let parsed: PkcePair = serde_json::from_value(value).unwrap();
        assert_eq!(parsed, pkce);
    }

    #[test]
    fn deserializing_invalid_verifier_fails() {
        let json = r#"{"code_verifier":"x","code_challenge":"y+/=","code_challenge_method":"S256"}"#;
        let err = serde_json::from_str::<PkcePair>(json).unwrap_err();
        assert!(err.to_string().contains("verifier too short"));
    }

    #[test]
    fn deserializing_mismatched_challenge_fails() {
        let other = PkcePair::generate();
        let value = serde_json::json!({
            "code_verifier": RFC_VERIFIER,
            "code_challenge": other.challenge(),
            "code_challenge_method": "S256",
        });
        let err = serde_json::from_value::<PkcePair>(value).unwrap_err();
        assert!(err.to_string().contains("does not match"));
    }
}
