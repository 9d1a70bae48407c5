//! Error types for the protocol layer.

use thiserror::Error;

/// Errors raised while generating parameters, signing, verifying or running
/// the key agreement.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProtocolError {
    /// Failure in the arithmetic or curve layer.
    #[error(transparent)]
    Curve(#[from] curve::Error),

    /// The pairing of the two identity points was degenerate.
    ///
    /// This happens when an identity key or hashed identity is the point at
    /// infinity, which honest parties never produce.
    #[error("pairing is degenerate")]
    DegeneratePairing,

    /// A received value failed the target-group membership test.
    #[error("value is not in the target group")]
    NotInGroup,

    /// A key is out of range, at infinity, or inconsistent with the
    /// parameters.
    #[error("invalid key")]
    InvalidKey,

    /// A parameter or signature file could not be read.
    #[error("parse error: {0}")]
    Parse(String),
}

pub type Result<T> = core::result::Result<T, ProtocolError>;
