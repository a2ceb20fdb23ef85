use thiserror::Error;

#[derive(Debug, Error)]
pub enum PkceError {
    #[error("verifier is required")]
    MissingVerifier,

    #[error("verifier too short: {len} characters, minimum is {min}")]
    VerifierTooShort { len: usize, min: usize },

    #[error("verifier too long: {len} characters, maximum is {max}")]
    VerifierTooLong { len: usize, max: usize },

    #[error("invalid character '{character}' at position {position}")]
    InvalidVerifierCharacter { character: char, position: usize },

    #[error("challenge length {len} is outside {min}..={max}")]
    InvalidChallengeLength { len: usize, min: usize, max: usize },

    #[error("invalid challenge character '{character}' at position {position}")]
    InvalidChallengeCharacter { character: char, position: usize },

    #[error("unsupported code challenge method: {0}")]
    UnsupportedMethod(String),

    #[error("invalid verifier length range {min}..={max}")]
    InvalidLengthRange { min: usize, max: usize },

    #[error("os rng error: {message}")]
    OsRng { message: String },

    #[error("code challenge does not match verifier")]
    ChallengeMismatch,
}
