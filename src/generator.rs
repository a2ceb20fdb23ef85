use rand::rngs::OsRng;
use rand::{CryptoRng, Rng, TryRngCore};
use tracing::debug;

use crate::PkceError;
use crate::constants::{VERIFIER_ALPHABET, VERIFIER_MAX_LEN, VERIFIER_MIN_LEN};

const OS_BUFFER_LEN: usize = 256;

/// Produces code verifiers with a length drawn uniformly from a configured
/// range and characters drawn uniformly from [`VERIFIER_ALPHABET`].
///
/// The default range is the full RFC 7636 range, `43..=128`. Narrower ranges
/// can be configured but never ones that leave it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VerifierGenerator {
    min_len: usize,
    max_len: usize,
}

impl Default for VerifierGenerator {
    fn default() -> Self {
        Self {
            min_len: VERIFIER_MIN_LEN,
            max_len: VERIFIER_MAX_LEN,
        }
    }
}

impl VerifierGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_length(self, len: usize) -> Result<Self, PkceError> {
        self.with_length_range(len, len)
    }

    pub fn with_length_range(mut self, min: usize, max: usize) -> Result<Self, PkceError> {
        if min < VERIFIER_MIN_LEN || max > VERIFIER_MAX_LEN || min > max {
            return Err(PkceError::InvalidLengthRange { min, max });
        }
        self.min_len = min;
        self.max_len = max;
        Ok(self)
    }

    pub fn min_len(&self) -> usize {
        self.min_len
    }

    pub fn max_len(&self) -> usize {
        self.max_len
    }

    /// Generates a verifier from the thread-local CSPRNG.
    pub fn generate(&self) -> String {
        self.generate_with_rng(&mut rand::rng())
    }

    pub fn generate_with_rng<R: CryptoRng>(&self, rng: &mut R) -> String {
        let len = rng.random_range(self.min_len..=self.max_len);
        let verifier: String = (0..len)
            .map(|_| VERIFIER_ALPHABET[rng.random_range(0..VERIFIER_ALPHABET.len())] as char)
            .collect();
        debug!(len, "generated code verifier");
        verifier
    }

    /// Generates a verifier straight from the operating system's entropy
    /// source, reporting failure instead of panicking.
    pub fn try_generate(&self) -> Result<String, PkceError> {
        let mut source = OsBytes::new();
        let len = self.min_len + source.below(self.max_len - self.min_len + 1)?;
        let mut verifier = String::with_capacity(len);
        for _ in 0..len {
            let index = source.below(VERIFIER_ALPHABET.len())?;
            verifier.push(VERIFIER_ALPHABET[index] as char);
        }
        debug!(len, "generated code verifier from os rng");
        Ok(verifier)
    }
}

/// Buffered OS randomness with rejection sampling for small bounds.
struct OsBytes {
    buffer: [u8; OS_BUFFER_LEN],
    cursor: usize,
}

impl OsBytes {
    fn new() -> Self {
        Self {
            buffer: [0u8; OS_BUFFER_LEN],
            cursor: OS_BUFFER_LEN,
        }
    }

    fn next_byte(&mut self) -> Result<u8, PkceError> {
        if self.cursor == OS_BUFFER_LEN {
            OsRng
                .try_fill_bytes(&mut self.buffer)
                .map_err(|err| PkceError::OsRng {
                    message: err.to_string(),
                })?;
            self.cursor = 0;
        }
        let byte = self.buffer[self.cursor];
        self.cursor += 1;
        Ok(byte)
    }

    /// Uniform value in `0..bound`; `bound` must be in `1..=256`.
    fn below(&mut self, bound: usize) -> Result<usize, PkceError> {
        let zone = 256 - 256 % bound;
        loop {
            let byte = usize::from(self.next_byte()?);
            if byte < zone {
                return Ok(byte % bound);
            }
        }
    }
}

/// Generates a fresh RFC 7636 code verifier.
pub fn generate_verifier() -> String {
    VerifierGenerator::default().generate()
}

pub fn generate_verifier_with_rng<R: CryptoRng>(rng: &mut R) -> String {
    VerifierGenerator::default().generate_with_rng(rng)
}

pub fn try_generate_verifier() -> Result<String, PkceError> {
    VerifierGenerator::default().try_generate()
}
