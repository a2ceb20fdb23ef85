//! RFC 7636 PKCE helpers.
//!
//! Generates code verifiers, derives their S256 code challenges and checks
//! both, either loudly (`Result`) or as plain predicates suitable for
//! untrusted input. Everything here is stateless and safe to call from any
//! thread.

mod challenge;
pub mod constants;
mod error;
mod generator;
mod method;
mod pair;
mod validate;

pub use challenge::{derive_challenge, validate_challenge, validate_verifier};
pub use error::PkceError;
pub use generator::{
    VerifierGenerator, generate_verifier, generate_verifier_with_rng, try_generate_verifier,
};
pub use method::ChallengeMethod;
pub use pair::{PkcePair, generate_pair};
pub use validate::{is_valid_challenge, is_valid_verifier, verify_pair};
