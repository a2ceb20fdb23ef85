use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::PkceError;
use crate::constants::S256;

/// Hash applied to a verifier to obtain its challenge.
///
/// Only `S256` is produced or accepted; `plain` is deliberately absent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChallengeMethod {
    #[default]
    S256,
}

impl ChallengeMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::S256 => S256,
        }
    }
}

impl fmt::Display for ChallengeMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChallengeMethod {
    type Err = PkceError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            S256 => Ok(Self::S256),
            other => Err(PkceError::UnsupportedMethod(other.to_string())),
        }
    }
}
