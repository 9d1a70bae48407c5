//! DSA over the order-q subgroup of `Z_p^*`.

use core::fmt::{self, Debug, Formatter};

use curve::{random_scalar, BigInt, Error};
use log::{debug, trace};
use rand::Rng;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use crate::constants::{MAX_SIGNING_ATTEMPTS, MILLER_RABIN_ROUNDS};
use crate::errors::{ProtocolError, Result};
use crate::secret::{check_scalar, SecretScalar};

/// Public parameters `(p, q, g)`: q is prime, q divides p - 1 and g has
/// order q modulo p.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DsaParams {
    p: BigInt,
    q: BigInt,
    g: BigInt,
}

/// A secret DSA key `x` in `[1, q)`.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop, Serialize, Deserialize)]
#[serde(try_from = "SecretScalar", into = "SecretScalar")]
pub struct DsaSigningKey {
    x: BigInt,
}

/// A public DSA key `y = g^x mod p`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DsaVerifyingKey {
    y: BigInt,
}

/// A DSA signature `(r, s)`, both in `[1, q)` when valid.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DsaSignature {
    pub r: BigInt,
    pub s: BigInt,
}

/// SHA-256 of `msg` as an integer, cut to the leftmost `bits` bits.
pub(crate) fn truncated_digest(msg: &[u8], bits: usize) -> BigInt {
    let digest = Sha256::digest(msg);
    let h = BigInt::from_bytes_be(&digest);
    let digest_bits = 8 * digest.len();
    if bits < digest_bits {
        h >> (digest_bits - bits)
    } else {
        h
    }
}

/// Random prime of exactly `bits` bits.
fn random_prime<R: Rng + ?Sized>(rng: &mut R, bits: usize) -> BigInt {
    let mut attempts = 0usize;
    loop {
        attempts += 1;
        let mut candidate = BigInt::random_bits(rng, bits);
        if candidate.is_even() {
            candidate += &BigInt::one();
        }
        if candidate.bits() == bits && candidate.is_probable_prime(MILLER_RABIN_ROUNDS, rng) {
            trace!("found a {}-bit prime after {} candidates", bits, attempts);
            return candidate;
        }
    }
}

impl DsaParams {
    /// Wrap `(p, q, g)` after the checks that need no primality test: q
    /// divides p - 1, `1 < g < p` and `g^q = 1 mod p`.
    pub fn new(p: BigInt, q: BigInt, g: BigInt) -> Result<Self> {
        let one = BigInt::one();
        if q <= one || p <= q {
            return Err(Error::InvalidParameters("need 1 < q < p").into());
        }
        let p_minus_one = &p - &one;
        if !p_minus_one.modulo(&q)?.is_zero() {
            return Err(Error::InvalidParameters("q does not divide p - 1").into());
        }
        if g <= one || g >= p || !g.pow_mod(&q, &p)?.is_one() {
            return Err(Error::InvalidParameters("g does not have order q").into());
        }
        Ok(DsaParams { p, q, g })
    }

    /// Generate a `q_bits`-bit prime q, a `p_bits`-bit prime `p = kq + 1`
    /// and `g = h^((p - 1) / q)` for the first `h >= 2` with `g != 1`.
    pub fn generate<R: Rng + ?Sized>(rng: &mut R, p_bits: usize, q_bits: usize) -> Result<Self> {
        if q_bits < 16 || p_bits <= q_bits + 1 {
            return Err(Error::InvalidParameters("p must be longer than q").into());
        }
        let q = random_prime(rng, q_bits);
        let two_q = &q + &q;

        let mut attempts = 0usize;
        let p = loop {
            attempts += 1;
            let candidate = BigInt::random_bits(rng, p_bits);
            let p = &(&candidate - &candidate.modulo(&two_q)?) + &BigInt::one();
            if p.bits() == p_bits && p.is_probable_prime(MILLER_RABIN_ROUNDS, rng) {
                trace!("found p = kq + 1 after {} candidates", attempts);
                break p;
            }
        };

        let (cofactor, _) = (&p - &BigInt::one()).div_rem(&q)?;
        let mut h = BigInt::from(2u64);
        let g = loop {
            let g = h.pow_mod(&cofactor, &p)?;
            if !g.is_one() {
                break g;
            }
            h += &BigInt::one();
        };

        debug!("generated DSA parameters with {}-bit p and {}-bit q", p_bits, q_bits);
        Self::new(p, q, g)
    }

    /// Full check including probable primality of p and q.
    pub fn validate<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<()> {
        if !self.q.is_probable_prime(MILLER_RABIN_ROUNDS, rng) {
            return Err(Error::InvalidParameters("q is not prime").into());
        }
        if !self.p.is_probable_prime(MILLER_RABIN_ROUNDS, rng) {
            return Err(Error::InvalidParameters("p is not prime").into());
        }
        Self::new(self.p.clone(), self.q.clone(), self.g.clone()).map(|_| ())
    }

    pub fn p(&self) -> &BigInt {
        &self.p
    }

    pub fn q(&self) -> &BigInt {
        &self.q
    }

    pub fn g(&self) -> &BigInt {
        &self.g
    }

    /// Bit length of p.
    pub fn bits(&self) -> usize {
        self.p.bits()
    }
}

impl DsaSigningKey {
    pub fn random<R: Rng + ?Sized>(params: &DsaParams, rng: &mut R) -> Result<Self> {
        Ok(DsaSigningKey {
            x: random_scalar(rng, &params.q)?,
        })
    }

    pub fn from_scalar(params: &DsaParams, x: BigInt) -> Result<Self> {
        check_scalar(&x, &params.q)?;
        Ok(DsaSigningKey { x })
    }

    pub fn verifying_key(&self, params: &DsaParams) -> Result<DsaVerifyingKey> {
        check_scalar(&self.x, &params.q)?;
        Ok(DsaVerifyingKey {
            y: params.g.pow_mod(&self.x, &params.p)?,
        })
    }

    /// `r = (g^k mod p) mod q`, `s = k^-1 (h + x r) mod q` with a fresh k;
    /// a zero r or s draws a new k. Every value derived from k or x is
    /// wiped before it is dropped.
    pub fn sign<R: Rng + ?Sized>(&self, params: &DsaParams, rng: &mut R, msg: &[u8]) -> Result<DsaSignature> {
        let q = &params.q;
        check_scalar(&self.x, q)?;
        let h = truncated_digest(msg, q.bits());

        for _ in 0..MAX_SIGNING_ATTEMPTS {
            let k = Zeroizing::new(random_scalar(rng, q)?);
            let r = params.g.pow_mod(&k, &params.p)?.modulo(q)?;
            if r.is_zero() {
                continue;
            }
            let k_inv = Zeroizing::new(k.mod_inverse(q)?);
            let xr = Zeroizing::new(&self.x * &r);
            let sum = Zeroizing::new(&h + &*xr);
            let unreduced = Zeroizing::new(&*k_inv * &*sum);
            let s = unreduced.modulo(q)?;
            if !s.is_zero() {
                return Ok(DsaSignature { r, s });
            }
        }
        Err(ProtocolError::InvalidKey)
    }
}

impl TryFrom<SecretScalar> for DsaSigningKey {
    type Error = ProtocolError;

    fn try_from(value: SecretScalar) -> Result<Self> {
        Ok(DsaSigningKey { x: value.positive()? })
    }
}

impl From<DsaSigningKey> for SecretScalar {
    fn from(key: DsaSigningKey) -> Self {
        SecretScalar::new(&key.x)
    }
}

impl Debug for DsaSigningKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("DsaSigningKey(..)")
    }
}

impl DsaVerifyingKey {
    pub fn from_value(params: &DsaParams, y: BigInt) -> Result<Self> {
        if y <= BigInt::one() || y >= params.p || !y.pow_mod(&params.q, &params.p)?.is_one() {
            return Err(ProtocolError::InvalidKey);
        }
        Ok(DsaVerifyingKey { y })
    }

    pub fn value(&self) -> &BigInt {
        &self.y
    }

    /// `Ok(false)` for a wrong signature, including components outside
    /// `[1, q)`.
    pub fn verify(&self, params: &DsaParams, msg: &[u8], sig: &DsaSignature) -> Result<bool> {
        let q = &params.q;
        let zero = BigInt::zero();
        if sig.r <= zero || sig.s <= zero || sig.r >= *q || sig.s >= *q {
            return Ok(false);
        }

        let h = truncated_digest(msg, q.bits());
        let w = sig.s.mod_inverse(q)?;
        let u1 = (&h * &w).modulo(q)?;
        let u2 = (&sig.r * &w).modulo(q)?;
        // g^u1 * y^u2 mod p, then mod q
        let v = BigInt::pow2_mod(&params.g, &u1, &self.y, &u2, &params.p)?.modulo(q)?;
        Ok(v == sig.r)
    }
}
