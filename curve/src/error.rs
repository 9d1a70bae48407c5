//! Error type shared by the arithmetic, curve and pairing layers.

use thiserror::Error;

/// Errors raised by the numeric core.
///
/// Every variant is a domain failure of the current operation. None of them
/// is retried internally; callers decide whether to pick new inputs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Division or remainder by zero.
    #[error("division by zero")]
    DivisionByZero,

    /// A modular operation was given a modulus that is not positive, or a
    /// field was requested over a modulus it cannot support (e.g. an even one).
    #[error("modulus must be a positive odd integer greater than two")]
    InvalidModulus,

    /// The operand shares a factor with the modulus (or is zero in a field).
    #[error("element is not invertible")]
    NotInvertible,

    /// Coordinates do not satisfy the curve equation.
    #[error("point is not on the curve")]
    NotOnCurve,

    /// Hash-and-map ran out of candidate x-coordinates.
    #[error("no curve point found after {probes} hash probes")]
    HashToPointExhausted { probes: usize },

    /// Curve or tower parameters are inconsistent.
    #[error("invalid parameters: {0}")]
    InvalidParameters(&'static str),

    /// A textual number could not be parsed.
    #[error("cannot parse number: {0}")]
    Parse(String),

    /// A byte or coefficient slice has the wrong length.
    #[error("input has the wrong length")]
    InvalidLength,
}

pub type Result<T> = core::result::Result<T, Error>;
