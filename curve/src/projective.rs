use core::fmt::{self, Debug, Formatter};
use core::ops::{Add, Mul, Neg, Sub};
use std::sync::Arc;

use crate::affine::{Affine, Curve};
use crate::bigint::BigInt;
use crate::field::FieldElement;
use crate::group::Group;

/// Point in Jacobian coordinates (X:Y:Z), where (x,y) = (X/Z^2, Y/Z^3).
/// The point at infinity is represented with Z = 0.
#[derive(Clone)]
pub struct Projective<F: FieldElement> {
    x: F,
    y: F,
    z: F,
    curve: Arc<Curve<F>>,
}

impl<F: FieldElement> Projective<F> {
    /// The point at infinity (identity element): (1:1:0)
    pub fn identity(curve: &Arc<Curve<F>>) -> Self {
        let one = F::one(curve.field());
        Projective {
            x: one.clone(),
            y: one,
            z: F::zero(curve.field()),
            curve: Arc::clone(curve),
        }
    }

    /// Build from raw Jacobian coordinates. The caller guarantees the point
    /// is on the curve.
    pub fn from_jacobian(curve: &Arc<Curve<F>>, x: F, y: F, z: F) -> Self {
        Projective {
            x,
            y,
            z,
            curve: Arc::clone(curve),
        }
    }

    /// Convert from affine coordinates.
    pub fn from_affine(point: &Affine<F>) -> Self {
        if point.is_infinity() {
            return Self::identity(point.curve());
        }
        let one = F::one(point.curve().field());
        Self::from_jacobian(point.curve(), point.x().clone(), point.y().clone(), one)
    }

    /// Convert to affine coordinates.
    pub fn to_affine(&self) -> Affine<F> {
        let z_inv = match self.z.invert() {
            Ok(z_inv) => z_inv,
            Err(_) => return Affine::identity(&self.curve),
        };
        let z_inv2 = z_inv.square();
        let x = self.x.mul(&z_inv2);
        let y = self.y.mul(&z_inv2.mul(&z_inv));
        Affine::new_unchecked(&self.curve, x, y)
    }

    /// Batch normalization: convert multiple projective points to affine.
    pub fn batch_normalize(points: &[Self]) -> Vec<Affine<F>> {
        points.iter().map(Self::to_affine).collect()
    }

    #[inline]
    pub fn x(&self) -> &F {
        &self.x
    }

    #[inline]
    pub fn y(&self) -> &F {
        &self.y
    }

    #[inline]
    pub fn z(&self) -> &F {
        &self.z
    }

    #[inline]
    pub fn curve(&self) -> &Arc<Curve<F>> {
        &self.curve
    }

    /// Check if this point is the point at infinity.
    #[inline]
    pub fn is_infinity(&self) -> bool {
        self.z.is_zero()
    }

    /// Check if a point is on the curve: Y^2 = X^3 + a*X*Z^4 + b*Z^6.
    pub fn is_on_curve(&self) -> bool {
        if self.is_infinity() {
            return true;
        }
        let z2 = self.z.square();
        let z4 = z2.square();
        let z6 = z4.mul(&z2);
        let rhs = self
            .x
            .square()
            .mul(&self.x)
            .add(&self.curve.a().mul(&self.x).mul(&z4))
            .add(&self.curve.b().mul(&z6));
        self.y.square() == rhs
    }

    fn with(&self, x: F, y: F, z: F) -> Self {
        Self::from_jacobian(&self.curve, x, y, z)
    }

    /// Point doubling (dbl-2007-bl).
    pub fn double(&self) -> Self {
        if self.is_infinity() || self.y.is_zero() {
            return Self::identity(&self.curve);
        }

        let xx = self.x.square();
        let yy = self.y.square();
        let yyyy = yy.square();
        let s = self.x.mul(&yy).double().double();
        let mut m = xx.double().add(&xx);
        if !self.curve.a_is_zero() {
            m = m.add(&self.curve.a().mul(&self.z.square().square()));
        }

        let x3 = m.square().sub(&s.double());
        let y3 = m.mul(&s.sub(&x3)).sub(&yyyy.double().double().double());
        let z3 = self.y.mul(&self.z).double();
        self.with(x3, y3, z3)
    }

    /// Negate a point.
    pub fn negate(&self) -> Self {
        if self.is_infinity() {
            return self.clone();
        }
        self.with(self.x.clone(), self.y.neg(), self.z.clone())
    }

    /// Mixed addition with an affine point (madd-2007-bl).
    pub fn add_affine(&self, other: &Affine<F>) -> Self {
        if other.is_infinity() {
            return self.clone();
        }
        if self.is_infinity() {
            return Self::from_affine(other);
        }

        let z1z1 = self.z.square();
        let u2 = other.x().mul(&z1z1);
        let s2 = other.y().mul(&self.z).mul(&z1z1);
        let h = u2.sub(&self.x);
        let r = s2.sub(&self.y).double();

        if h.is_zero() {
            return if r.is_zero() {
                self.double()
            } else {
                Self::identity(&self.curve)
            };
        }

        let hh = h.square();
        let i = hh.double().double();
        let j = h.mul(&i);
        let v = self.x.mul(&i);

        let x3 = r.square().sub(&j).sub(&v.double());
        let y3 = r.mul(&v.sub(&x3)).sub(&self.y.mul(&j).double());
        let z3 = self.z.mul(&h).double();
        self.with(x3, y3, z3)
    }

    /// General addition (add-2007-bl).
    pub fn add_projective(&self, other: &Self) -> Self {
        if self.is_infinity() {
            return other.clone();
        }
        if other.is_infinity() {
            return self.clone();
        }

        let z1z1 = self.z.square();
        let z2z2 = other.z.square();
        let u1 = self.x.mul(&z2z2);
        let u2 = other.x.mul(&z1z1);
        let s1 = self.y.mul(&other.z).mul(&z2z2);
        let s2 = other.y.mul(&self.z).mul(&z1z1);
        let h = u2.sub(&u1);
        let r = s2.sub(&s1).double();

        if h.is_zero() {
            return if r.is_zero() {
                self.double()
            } else {
                Self::identity(&self.curve)
            };
        }

        let i = h.double().square();
        let j = h.mul(&i);
        let v = u1.mul(&i);

        let x3 = r.square().sub(&j).sub(&v.double());
        let y3 = r.mul(&v.sub(&x3)).sub(&s1.mul(&j).double());
        let z3 = self.z.mul(&other.z).mul(&h).double();
        self.with(x3, y3, z3)
    }
}

impl<F: FieldElement> Group for Projective<F> {
    fn identity_like(&self) -> Self {
        Self::identity(&self.curve)
    }

    #[inline]
    fn is_identity(&self) -> bool {
        self.is_infinity()
    }

    #[inline]
    fn combine(&self, other: &Self) -> Self {
        self.add_projective(other)
    }

    #[inline]
    fn double(&self) -> Self {
        Self::double(self)
    }

    #[inline]
    fn negate(&self) -> Self {
        Self::negate(self)
    }
}

// Equal when X1 Z2^2 = X2 Z1^2 and Y1 Z2^3 = Y2 Z1^3
impl<F: FieldElement> PartialEq for Projective<F> {
    fn eq(&self, other: &Self) -> bool {
        match (self.is_infinity(), other.is_infinity()) {
            (true, true) => return true,
            (false, false) => {}
            _ => return false,
        }
        let z1z1 = self.z.square();
        let z2z2 = other.z.square();
        self.x.mul(&z2z2) == other.x.mul(&z1z1)
            && self.y.mul(&z2z2.mul(&other.z)) == other.y.mul(&z1z1.mul(&self.z))
    }
}

impl<F: FieldElement> Eq for Projective<F> {}

impl<F: FieldElement> Debug for Projective<F> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Projective({:?}, {:?}, {:?})", self.x, self.y, self.z)
    }
}

impl<F: FieldElement> Add for Projective<F> {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        self.add_projective(&other)
    }
}

impl<F: FieldElement> Add<&Projective<F>> for &Projective<F> {
    type Output = Projective<F>;

    fn add(self, other: &Projective<F>) -> Projective<F> {
        self.add_projective(other)
    }
}

impl<F: FieldElement> Add<&Affine<F>> for &Projective<F> {
    type Output = Projective<F>;

    fn add(self, other: &Affine<F>) -> Projective<F> {
        self.add_affine(other)
    }
}

#[allow(clippy::suspicious_arithmetic_impl)]
impl<F: FieldElement> Sub for Projective<F> {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        self.add_projective(&other.negate())
    }
}

impl<F: FieldElement> Neg for Projective<F> {
    type Output = Self;

    fn neg(self) -> Self {
        self.negate()
    }
}

// Scalar multiplication
impl<F: FieldElement> Mul<&BigInt> for Projective<F> {
    type Output = Self;

    fn mul(self, scalar: &BigInt) -> Self {
        <Self as Group>::scalar_mul_windowed(&self, scalar)
    }
}

impl<F: FieldElement> Mul<&BigInt> for &Projective<F> {
    type Output = Projective<F>;

    fn mul(self, scalar: &BigInt) -> Projective<F> {
        <Projective<F> as Group>::scalar_mul_windowed(self, scalar)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::affine::tests::{p192, secp256k1};
    use crate::fp::Fp;

    #[test]
    fn test_affine_round_trip() {
        let (g, _) = p192();
        let p = g.to_projective();
        assert!(p.is_on_curve());
        assert_eq!(p.to_affine(), g);
        assert!(Projective::identity(g.curve()).to_affine().is_infinity());
    }

    #[test]
    fn test_doubling_matches_affine() {
        for (g, _) in [secp256k1(), p192()] {
            let p = g.to_projective();
            let doubled = p.double();
            assert!(doubled.is_on_curve());
            assert_eq!(doubled.to_affine(), g.double());
            assert_eq!(doubled.double().to_affine(), g.double().double());
        }
    }

    #[test]
    fn test_addition_matches_affine() {
        let (g, _) = p192();
        let g3 = g.mul_u64(3);
        let p = g.to_projective().double();
        let q = g3.to_projective().double();

        let sum = &p + &q;
        assert!(sum.is_on_curve());
        assert_eq!(sum.to_affine(), g.mul_u64(8));
        assert_eq!((&p + &g3).to_affine(), g.mul_u64(5));
    }

    #[test]
    fn test_addition_special_cases() {
        let (g, _) = secp256k1();
        let p = g.to_projective().double();
        let id = Projective::identity(g.curve());

        // Same point in a different representation
        let same = p.to_affine().to_projective();
        assert_eq!(&p + &same, p.double());
        assert_eq!(&p + &p.to_affine(), p.double());
        assert!((p.clone() - same).is_infinity());
        assert!((&p + &(-p.clone()).to_affine()).is_infinity());
        assert_eq!(&p + &id, p);
        assert_eq!(&id + &p, p);
    }

    #[test]
    fn test_equality_ignores_scaling() {
        let (g, _) = p192();
        let p = g.to_projective();
        let lambda = Fp::from_u64(p.x().field(), 12345);
        let l2 = lambda.square();
        let scaled = Projective::from_jacobian(
            g.curve(),
            p.x().mul(&l2),
            p.y().mul(&l2.mul(&lambda)),
            p.z().mul(&lambda),
        );
        assert_eq!(scaled, p);
        assert_ne!(scaled, p.double());
    }

    #[test]
    fn test_group_order() {
        let (g, n) = p192();
        assert!((&g.to_projective() * &n).is_infinity());
    }
}
