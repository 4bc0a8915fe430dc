//! Digest strategies used by the digest handler.

use std::fmt;
use std::str::FromStr;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use sha2::{Digest, Sha256};

use crate::error::{ChainError, DigestError};

/// Placeholder digest appended by the reference pipeline.
pub const REFERENCE_DIGEST: &str = "CZVMYTgc3iiOdJjFP+6dhQ==";

/// Computes a digest string over a payload.
///
/// Implementations may fail; `CreateDigest` then appends an empty digest
/// instead of propagating the error.
pub trait DigestStrategy {
    fn digest(&self, payload: &str) -> Result<String, DigestError>;
}

/// Always returns the same digest, regardless of payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedDigest {
    value: String,
}

impl FixedDigest {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }
}

impl Default for FixedDigest {
    fn default() -> Self {
        Self::new(REFERENCE_DIGEST)
    }
}

impl DigestStrategy for FixedDigest {
    fn digest(&self, _payload: &str) -> Result<String, DigestError> {
        Ok(self.value.clone())
    }
}

/// Standard base64 of the SHA-256 hash of the payload bytes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Sha256Digest;

impl DigestStrategy for Sha256Digest {
    fn digest(&self, payload: &str) -> Result<String, DigestError> {
        let mut hasher = Sha256::new();
        hasher.update(payload.as_bytes());
        Ok(STANDARD.encode(hasher.finalize()))
    }
}

/// Digest strategies selectable by name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DigestAlgorithm {
    /// [`REFERENCE_DIGEST`] for every payload.
    #[default]
    Fixed,
    /// [`Sha256Digest`].
    Sha256,
}

impl DigestAlgorithm {
    pub fn name(&self) -> &'static str {
        match self {
            DigestAlgorithm::Fixed => "fixed",
            DigestAlgorithm::Sha256 => "sha256",
        }
    }
}

impl DigestStrategy for DigestAlgorithm {
    fn digest(&self, payload: &str) -> Result<String, DigestError> {
        match self {
            DigestAlgorithm::Fixed => FixedDigest::default().digest(payload),
            DigestAlgorithm::Sha256 => Sha256Digest.digest(payload),
        }
    }
}

impl fmt::Display for DigestAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DigestAlgorithm {
    type Err = ChainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fixed" => Ok(DigestAlgorithm::Fixed),
            "sha256" | "sha-256" => Ok(DigestAlgorithm::Sha256),
            _ => Err(ChainError::UnknownDigest(s.to_string())),
        }
    }
}
