//! Error types for the canonical codec.

use thiserror::Error;

/// Result type for codec operations.
pub type CodecResult<T> = Result<T, CodecError>;

/// Errors that can occur while encoding or decoding canonical text.
#[derive(Debug, Error)]
pub enum CodecError {
    /// A container was reached again while it was still being encoded.
    #[error("converting circular structure to canonical text")]
    CircularStructure,

    /// The input is not valid canonical text.
    #[error("malformed canonical text: {0}")]
    Malformed(#[from] serde_json::Error),

    /// The reserved `__map` shape was present but its pairs were not.
    #[error("malformed ordered-pairs map: {0}")]
    MalformedMap(String),

    /// The value or text nests deeper than [`MAX_DEPTH`](crate::MAX_DEPTH).
    #[error("nesting exceeds {limit} levels")]
    TooDeep { limit: usize },

    /// A parsed number has no `f64` representation. Only reachable when
    /// `serde_json`'s `arbitrary_precision` feature is unified into the build.
    #[error("unrepresentable number: {0}")]
    UnrepresentableNumber(String),
}
