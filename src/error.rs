//! Error types for request chains.

use thiserror::Error;

/// A digest strategy could not produce a digest.
///
/// `CreateDigest` never lets this escape; it substitutes an empty digest.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DigestError {
    #[error("{algorithm} digest failed: {reason}")]
    Failed {
        algorithm: &'static str,
        reason: String,
    },
}

/// Errors raised while assembling a chain from text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChainError {
    #[error("chain has no stages")]
    EmptyChain,

    #[error("unknown handler '{name}' at stage {position} (try transaction, digest, or request)")]
    UnknownHandler { name: String, position: usize },

    #[error("unknown digest algorithm '{0}' (try fixed or sha256)")]
    UnknownDigest(String),
}
