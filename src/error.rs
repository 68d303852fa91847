//! Error taxonomy for the threshold RSA core.
//!
//! Every failure mode named in the design is a distinct variant so callers
//! can match on *why* an operation failed rather than parsing a message.

use thiserror::Error;

/// Errors produced by the threshold RSA core.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum Error {
    /// `l`, `k`, or `keysize` were out of range at setup.
    #[error("invalid setup parameters: {0}")]
    InvalidParameters(String),

    /// The entropy source failed. Fatal; setup cannot proceed.
    #[error("random number generation failed: {0}")]
    RngFailure(String),

    /// A share's NIZK proof did not verify, or its id was out of range.
    ///
    /// Carries the message digest (hex-encoded SHA-256 of the signed
    /// message) and the id of the participant that produced the share, so
    /// callers can report exactly which message and share failed.
    #[error("share from participant {id} for message {message_digest} failed verification")]
    InvalidShare {
        message_digest: String,
        id: usize,
    },

    /// `combine` was called with fewer than `k` accepted shares.
    #[error("insufficient shares: need {required}, have {available}")]
    InsufficientShares { required: usize, available: usize },

    /// `combine` produced a candidate signature that does not satisfy
    /// `y^e == H(msg) (mod n)`. Indicates tampering or an implementation
    /// bug among the *input* shares; aborts the combine, not the session.
    #[error("combine produced an inconsistent signature")]
    CombineFailed,

    /// A participant id was not in `1..=l`.
    #[error("participant id {id} out of range 1..={l}")]
    OutOfRange { id: usize, l: usize },
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
