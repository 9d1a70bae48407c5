//! Defaults for parameter generation.

/// Bit length of the DSA modulus p.
pub const DSA_P_BITS: usize = 1024;

/// Bit length of the DSA subgroup order q.
pub const DSA_Q_BITS: usize = 160;

/// Miller-Rabin witnesses used when generating or validating primes.
pub(crate) const MILLER_RABIN_ROUNDS: usize = 25;

/// Retries for a signing nonce before giving up; each retry happens with
/// probability about `1/q`.
pub(crate) const MAX_SIGNING_ATTEMPTS: usize = 32;
