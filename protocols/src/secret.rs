//! Wire form of secret scalars.
//!
//! Signing keys and the authority's master secret serialize as a bare
//! integer. Decoding rejects values below one; the upper bound is the group
//! order, which the decoder does not know, so [`check_scalar`] repeats the
//! full range check where the order is available.

use curve::BigInt;
use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::errors::{ProtocolError, Result};

#[derive(Clone, Zeroize, ZeroizeOnDrop, Serialize, Deserialize)]
pub struct SecretScalar(BigInt);

impl SecretScalar {
    pub(crate) fn new(value: &BigInt) -> Self {
        SecretScalar(value.clone())
    }

    /// The decoded value, when it is at least one.
    pub(crate) fn positive(&self) -> Result<BigInt> {
        if self.0 <= BigInt::zero() {
            return Err(ProtocolError::InvalidKey);
        }
        Ok(self.0.clone())
    }
}

/// `InvalidKey` unless `1 <= value < order`.
pub(crate) fn check_scalar(value: &BigInt, order: &BigInt) -> Result<()> {
    if *value <= BigInt::zero() || value >= order {
        return Err(ProtocolError::InvalidKey);
    }
    Ok(())
}
