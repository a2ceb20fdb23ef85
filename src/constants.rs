//! RFC 7636 bounds and character sets.

/// Shortest verifier RFC 7636 §4.1 allows.
pub const VERIFIER_MIN_LEN: usize = 43;
/// Longest verifier RFC 7636 §4.1 allows.
pub const VERIFIER_MAX_LEN: usize = 128;

// Looser than the 43 characters an S256 digest encodes to, so challenges
// produced elsewhere still pass the shape check.
pub const CHALLENGE_MIN_LEN: usize = 20;
pub const CHALLENGE_MAX_LEN: usize = 100;

/// The unreserved characters of RFC 3986 §2.3.
pub const VERIFIER_ALPHABET: &[u8; 66] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-._~";

pub const S256: &str = "S256";

pub fn is_verifier_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '.' | '_' | '~')
}

/// base64url without padding.
pub fn is_challenge_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '_')
}
