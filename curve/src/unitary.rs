//! Elements of norm one over the half-degree subfield.
//!
//! For such an element `conj(f) * f = 1`, so inversion is a conjugation. The
//! wrapper can only be built through the checked constructor or by the soft
//! part of the final exponentiation, and every operation on it keeps the
//! property, so no runtime flag is needed to track it.

use core::fmt::{self, Debug, Formatter};
use core::ops::Mul;
use std::sync::Arc;

use zeroize::Zeroize;

use crate::bigint::BigInt;
use crate::field::FieldElement;
use crate::group::Group;
use crate::quadratic::{Quadratic, QuadraticContext};

#[derive(Clone, PartialEq, Eq)]
pub struct Unitary<F: FieldElement>(F);

impl<F: FieldElement> Unitary<F> {
    /// Wrap `value` when `value * conj(value) == 1`.
    pub fn from_norm_one(value: F) -> Option<Self> {
        value
            .mul(&value.conjugate())
            .is_one()
            .then_some(Unitary(value))
    }

    pub(crate) fn new_unchecked(value: F) -> Self {
        Unitary(value)
    }

    pub fn one(ctx: &Arc<F::Context>) -> Self {
        Unitary(F::one(ctx))
    }

    #[inline]
    pub fn context(&self) -> &Arc<F::Context> {
        self.0.context()
    }

    #[inline]
    pub fn value(&self) -> &F {
        &self.0
    }

    pub fn into_inner(self) -> F {
        self.0
    }

    pub fn is_one(&self) -> bool {
        self.0.is_one()
    }

    pub fn square(&self) -> Self {
        Unitary(self.0.square())
    }

    pub fn inverse(&self) -> Self {
        Unitary(self.0.conjugate())
    }

    pub fn frobenius(&self) -> Self {
        Unitary(self.0.frobenius())
    }

    pub fn frobenius_pow(&self, k: usize) -> Self {
        Unitary(self.0.frobenius_pow(k))
    }

    /// Signed exponentiation; a negative exponent inverts for free.
    pub fn pow(&self, exponent: &BigInt) -> Self {
        self.scalar_mul(exponent)
    }
}

impl<B: FieldElement> Unitary<Quadratic<B>> {
    /// Torus compression: the single base-field value `(1 + c0) / c1`.
    ///
    /// `+1` and `-1` have no compressed form and give `None`.
    pub fn compress(&self) -> Option<B> {
        let c1_inv = self.0.c1().invert().ok()?;
        Some(self.0.c0().add(&B::one(c1_inv.context())).mul(&c1_inv))
    }

    /// Inverse of [`compress`](Self::compress):
    /// `(m^2 + xi + 2 m u) / (m^2 - xi)`.
    pub fn decompress(ctx: &Arc<QuadraticContext<B>>, m: &B) -> Option<Self> {
        let xi = ctx.nonresidue();
        let m2 = m.square();
        let denominator = m2.sub(xi).invert().ok()?;
        let value = Quadratic::new(ctx, m2.add(xi).mul(&denominator), m.double().mul(&denominator));
        Some(Unitary(value))
    }
}

impl<F: FieldElement> Group for Unitary<F> {
    fn identity_like(&self) -> Self {
        Unitary(F::one(self.0.context()))
    }

    #[inline]
    fn is_identity(&self) -> bool {
        self.0.is_one()
    }

    #[inline]
    fn combine(&self, other: &Self) -> Self {
        Unitary(self.0.mul(&other.0))
    }

    #[inline]
    fn double(&self) -> Self {
        self.square()
    }

    #[inline]
    fn negate(&self) -> Self {
        self.inverse()
    }
}

impl<F: FieldElement> Mul for Unitary<F> {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        Unitary(self.0.mul(&rhs.0))
    }
}

impl<F: FieldElement> Mul<&Unitary<F>> for &Unitary<F> {
    type Output = Unitary<F>;

    fn mul(self, rhs: &Unitary<F>) -> Unitary<F> {
        Unitary(self.0.mul(&rhs.0))
    }
}

/// Leaves zero behind, which is not unitary; only drop the value afterwards.
impl<F: FieldElement + Zeroize> Zeroize for Unitary<F> {
    fn zeroize(&mut self) {
        self.0.zeroize();
    }
}

impl<F: FieldElement> Debug for Unitary<F> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Unitary({:?})", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bls24::standard_modulus;
    use crate::random::RandomField;
    use crate::tower::{Bls24Tower, Fp8};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    // conj(a) / a has norm one
    fn random_unitary(tower: &Bls24Tower, rng: &mut StdRng) -> Unitary<Fp8> {
        let a = Fp8::random(&tower.fp8, rng);
        let value = a.conjugate().mul(&a.invert().unwrap());
        Unitary::from_norm_one(value).unwrap()
    }

    #[test]
    fn test_from_norm_one_rejects_general_element() {
        let tower = Bls24Tower::new(&standard_modulus()).unwrap();
        let mut rng = StdRng::seed_from_u64(42);
        let a = Fp8::random(&tower.fp8, &mut rng);
        assert!(Unitary::from_norm_one(a).is_none());
    }

    #[test]
    fn test_inverse_is_conjugate() {
        let tower = Bls24Tower::new(&standard_modulus()).unwrap();
        let mut rng = StdRng::seed_from_u64(42);
        let u = random_unitary(&tower, &mut rng);
        assert!((&u * &u.inverse()).is_one());
        assert_eq!(u.inverse().into_inner(), u.value().invert().unwrap());
    }

    #[test]
    fn test_signed_pow() {
        let tower = Bls24Tower::new(&standard_modulus()).unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        let u = random_unitary(&tower, &mut rng);
        let e = BigInt::from(12345u64);
        let neg = u.pow(&-&e);
        assert_eq!(neg, u.pow(&e).inverse());
        assert_eq!(u.pow(&e), u.scalar_mul_windowed(&e));
        assert!(u.pow(&BigInt::zero()).is_one());
    }

    #[test]
    fn test_compress_round_trip() {
        let tower = Bls24Tower::new(&standard_modulus()).unwrap();
        let mut rng = StdRng::seed_from_u64(9);
        for _ in 0..5 {
            let u = random_unitary(&tower, &mut rng);
            let m = u.compress().unwrap();
            assert_eq!(Unitary::decompress(&tower.fp8, &m).unwrap(), u);
        }
        assert!(Unitary::one(&tower.fp8).compress().is_none());
    }

    #[test]
    fn test_zeroize_wipes_value() {
        let tower = Bls24Tower::new(&standard_modulus()).unwrap();
        let mut rng = StdRng::seed_from_u64(5);
        let mut u = random_unitary(&tower, &mut rng);
        assert!(!u.value().is_zero());
        u.zeroize();
        assert!(u.value().is_zero());
    }
}
