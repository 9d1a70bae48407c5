//! ECDSA on binary-field curves `y^2 + xy = x^3 + Ax^2 + B` over GF(2^m).

use core::fmt::{self, Debug, Formatter};
use std::sync::Arc;

use curve::{double_scalar_mul, random_scalar, BigInt, BinaryCurve, BinaryField, BinaryPoint, Error, Gf2m, Group};
use rand::Rng;
use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use crate::constants::MAX_SIGNING_ATTEMPTS;
use crate::dsa::truncated_digest;
use crate::errors::{ProtocolError, Result};
use crate::secret::{check_scalar, SecretScalar};

/// Curve, base point and reduction polynomial.
///
/// The reduction polynomial is `t^m + t^a + 1` when `b = c = 0` and
/// `t^m + t^a + t^b + t^c + 1` otherwise. `q` is the prime order of the base
/// point `(x, y)`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EcdsaParams {
    pub(crate) m: usize,
    pub(crate) a: BigInt,
    pub(crate) b: BigInt,
    pub(crate) q: BigInt,
    pub(crate) x: BigInt,
    pub(crate) y: BigInt,
    pub(crate) basis: [usize; 3],
}

/// Secret scalar `d` in `[1, q)`.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop, Serialize, Deserialize)]
#[serde(try_from = "SecretScalar", into = "SecretScalar")]
pub struct EcdsaSigningKey {
    d: BigInt,
}

/// Public point `Q = dG`, stored by its coordinates.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EcdsaVerifyingKey {
    x: BigInt,
    y: BigInt,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EcdsaSignature {
    pub r: BigInt,
    pub s: BigInt,
}

impl EcdsaParams {
    /// Build and check the parameters: the base point must lie on the curve
    /// and have order q.
    pub fn new(m: usize, a: BigInt, b: BigInt, q: BigInt, x: BigInt, y: BigInt, basis: [usize; 3]) -> Result<Self> {
        let params = EcdsaParams {
            m,
            a,
            b,
            q,
            x,
            y,
            basis,
        };
        if params.q <= BigInt::one() {
            return Err(Error::InvalidParameters("group order must exceed one").into());
        }
        let g = params.generator()?;
        if g.is_infinity() || !(&g * &params.q).is_infinity() {
            return Err(Error::InvalidParameters("base point does not have order q").into());
        }
        Ok(params)
    }

    fn field(&self) -> Result<Arc<BinaryField>> {
        Ok(BinaryField::new(self.m, self.basis[0], self.basis[1], self.basis[2])?)
    }

    pub fn curve(&self) -> Result<Arc<BinaryCurve>> {
        let field = self.field()?;
        let a = Gf2m::from_bigint(&field, &self.a);
        let b = Gf2m::from_bigint(&field, &self.b);
        Ok(BinaryCurve::new(&field, a, b)?)
    }

    pub fn generator(&self) -> Result<BinaryPoint> {
        let curve = self.curve()?;
        let field = curve.field();
        let x = Gf2m::from_bigint(field, &self.x);
        let y = Gf2m::from_bigint(field, &self.y);
        Ok(BinaryPoint::new(&curve, x, y)?)
    }

    pub fn order(&self) -> &BigInt {
        &self.q
    }

    pub fn degree(&self) -> usize {
        self.m
    }
}

/// `x(point)` as an integer reduced modulo q.
fn x_mod_q(point: &BinaryPoint, q: &BigInt) -> Result<BigInt> {
    Ok(point.x().to_bigint().modulo(q)?)
}

impl EcdsaSigningKey {
    pub fn random<R: Rng + ?Sized>(params: &EcdsaParams, rng: &mut R) -> Result<Self> {
        Ok(EcdsaSigningKey {
            d: random_scalar(rng, &params.q)?,
        })
    }

    pub fn from_scalar(params: &EcdsaParams, d: BigInt) -> Result<Self> {
        check_scalar(&d, &params.q)?;
        Ok(EcdsaSigningKey { d })
    }

    pub fn verifying_key(&self, params: &EcdsaParams) -> Result<EcdsaVerifyingKey> {
        check_scalar(&self.d, &params.q)?;
        let point = &params.generator()? * &self.d;
        Ok(EcdsaVerifyingKey {
            x: point.x().to_bigint(),
            y: point.y().to_bigint(),
        })
    }

    /// `r = x(kG) mod q`, `s = k^-1 (h + d r) mod q`.
    pub fn sign<R: Rng + ?Sized>(&self, params: &EcdsaParams, rng: &mut R, msg: &[u8]) -> Result<EcdsaSignature> {
        let q = &params.q;
        check_scalar(&self.d, q)?;
        let g = params.generator()?;
        let h = truncated_digest(msg, q.bits());

        for _ in 0..MAX_SIGNING_ATTEMPTS {
            let k = Zeroizing::new(random_scalar(rng, q)?);
            let r = x_mod_q(&(&g * &*k), q)?;
            if r.is_zero() {
                continue;
            }
            let k_inv = Zeroizing::new(k.mod_inverse(q)?);
            let dr = Zeroizing::new(&self.d * &r);
            let sum = Zeroizing::new(&h + &*dr);
            let unreduced = Zeroizing::new(&*k_inv * &*sum);
            let s = unreduced.modulo(q)?;
            if !s.is_zero() {
                return Ok(EcdsaSignature { r, s });
            }
        }
        Err(ProtocolError::InvalidKey)
    }
}

impl TryFrom<SecretScalar> for EcdsaSigningKey {
    type Error = ProtocolError;

    fn try_from(value: SecretScalar) -> Result<Self> {
        Ok(EcdsaSigningKey { d: value.positive()? })
    }
}

impl From<EcdsaSigningKey> for SecretScalar {
    fn from(key: EcdsaSigningKey) -> Self {
        SecretScalar::new(&key.d)
    }
}

impl Debug for EcdsaSigningKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("EcdsaSigningKey(..)")
    }
}

impl EcdsaVerifyingKey {
    /// Decode the public point; it must be on the curve and not at infinity.
    pub fn point(&self, params: &EcdsaParams) -> Result<BinaryPoint> {
        let curve = params.curve()?;
        let field = curve.field();
        let x = Gf2m::from_bigint(field, &self.x);
        let y = Gf2m::from_bigint(field, &self.y);
        BinaryPoint::new(&curve, x, y).map_err(|_| ProtocolError::InvalidKey)
    }

    pub fn verify(&self, params: &EcdsaParams, msg: &[u8], sig: &EcdsaSignature) -> Result<bool> {
        let q = &params.q;
        let zero = BigInt::zero();
        if sig.r <= zero || sig.s <= zero || sig.r >= *q || sig.s >= *q {
            return Ok(false);
        }
        let public = self.point(params)?;
        let g = params.generator()?;

        let h = truncated_digest(msg, q.bits());
        let w = sig.s.mod_inverse(q)?;
        let u1 = (&h * &w).modulo(q)?;
        let u2 = (&sig.r * &w).modulo(q)?;
        let point = double_scalar_mul(&g, &u1, &public, &u2);
        if point.is_identity() {
            return Ok(false);
        }
        Ok(x_mod_q(&point, q)? == sig.r)
    }
}
