//! Curves `y^2 + xy = x^3 + A x^2 + B` over GF(2^m).

use core::fmt::{self, Debug, Formatter};
use core::ops::{Add, Mul, Neg};
use std::sync::Arc;

use crate::bigint::BigInt;
use crate::binary::{BinaryField, Gf2m};
use crate::error::{Error, Result};
use crate::group::Group;

#[derive(Debug)]
pub struct BinaryCurve {
    field: Arc<BinaryField>,
    a: Gf2m,
    b: Gf2m,
}

impl BinaryCurve {
    /// `B = 0` gives a singular curve and is rejected.
    pub fn new(field: &Arc<BinaryField>, a: Gf2m, b: Gf2m) -> Result<Arc<Self>> {
        if b.is_zero() {
            return Err(Error::InvalidParameters("singular binary curve"));
        }
        Ok(Arc::new(BinaryCurve {
            field: Arc::clone(field),
            a,
            b,
        }))
    }

    #[inline]
    pub fn field(&self) -> &Arc<BinaryField> {
        &self.field
    }

    #[inline]
    pub fn a(&self) -> &Gf2m {
        &self.a
    }

    #[inline]
    pub fn b(&self) -> &Gf2m {
        &self.b
    }
}

#[derive(Clone)]
pub struct BinaryPoint {
    x: Gf2m,
    y: Gf2m,
    infinity: bool,
    curve: Arc<BinaryCurve>,
}

impl BinaryPoint {
    pub fn identity(curve: &Arc<BinaryCurve>) -> Self {
        let zero = Gf2m::zero(&curve.field);
        BinaryPoint {
            x: zero.clone(),
            y: zero,
            infinity: true,
            curve: Arc::clone(curve),
        }
    }

    pub fn new(curve: &Arc<BinaryCurve>, x: Gf2m, y: Gf2m) -> Result<Self> {
        let point = BinaryPoint {
            x,
            y,
            infinity: false,
            curve: Arc::clone(curve),
        };
        if !point.is_on_curve() {
            return Err(Error::NotOnCurve);
        }
        Ok(point)
    }

    /// Recover y from x. `y_bit` selects between the two roots: it is the
    /// constant coefficient of `y / x`. `None` when x is not the abscissa of
    /// a point.
    pub fn from_x(curve: &Arc<BinaryCurve>, x: Gf2m, y_bit: bool) -> Option<Self> {
        if x.is_zero() {
            let y = curve.b.sqrt();
            return Some(BinaryPoint {
                x,
                y,
                infinity: false,
                curve: Arc::clone(curve),
            });
        }

        // Divide through by x^2: z^2 + z = x + A + B / x^2 with y = x z
        let x2_inv = x.square().invert().ok()?;
        let beta = x.add(&curve.a).add(&curve.b.mul(&x2_inv));
        let mut z = beta.solve_quadratic()?;
        if z.lsb() != y_bit {
            z = z.add(&Gf2m::one(&curve.field));
        }
        let y = x.mul(&z);
        Some(BinaryPoint {
            x,
            y,
            infinity: false,
            curve: Arc::clone(curve),
        })
    }

    #[inline]
    pub fn x(&self) -> &Gf2m {
        &self.x
    }

    #[inline]
    pub fn y(&self) -> &Gf2m {
        &self.y
    }

    #[inline]
    pub fn curve(&self) -> &Arc<BinaryCurve> {
        &self.curve
    }

    #[inline]
    pub fn is_infinity(&self) -> bool {
        self.infinity
    }

    pub fn is_on_curve(&self) -> bool {
        if self.infinity {
            return true;
        }
        let x2 = self.x.square();
        let lhs = self.y.square().add(&self.x.mul(&self.y));
        let rhs = x2
            .mul(&self.x)
            .add(&self.curve.a.mul(&x2))
            .add(&self.curve.b);
        lhs == rhs
    }

    fn with(&self, x: Gf2m, y: Gf2m) -> Self {
        BinaryPoint {
            x,
            y,
            infinity: false,
            curve: Arc::clone(&self.curve),
        }
    }

    /// -(x, y) = (x, x + y)
    pub fn negate(&self) -> Self {
        if self.infinity {
            return self.clone();
        }
        self.with(self.x.clone(), self.x.add(&self.y))
    }

    pub fn double(&self) -> Self {
        if self.infinity || self.x.is_zero() {
            return Self::identity(&self.curve);
        }
        let x_inv = match self.x.invert() {
            Ok(inv) => inv,
            Err(_) => return Self::identity(&self.curve),
        };
        // λ = x + y / x
        let lambda = self.x.add(&self.y.mul(&x_inv));
        let x3 = lambda.square().add(&lambda).add(&self.curve.a);
        let one = Gf2m::one(&self.curve.field);
        let y3 = self.x.square().add(&lambda.add(&one).mul(&x3));
        self.with(x3, y3)
    }

    pub fn add_point(&self, other: &Self) -> Self {
        if self.infinity {
            return other.clone();
        }
        if other.infinity {
            return self.clone();
        }
        if self.x == other.x {
            return if self.y == other.y {
                self.double()
            } else {
                Self::identity(&self.curve)
            };
        }

        let dx = self.x.add(&other.x);
        let inv = match dx.invert() {
            Ok(inv) => inv,
            Err(_) => return Self::identity(&self.curve),
        };
        // λ = (y1 + y2) / (x1 + x2)
        let lambda = self.y.add(&other.y).mul(&inv);
        let x3 = lambda
            .square()
            .add(&lambda)
            .add(&dx)
            .add(&self.curve.a);
        let y3 = lambda.mul(&self.x.add(&x3)).add(&x3).add(&self.y);
        self.with(x3, y3)
    }
}

impl Group for BinaryPoint {
    fn identity_like(&self) -> Self {
        Self::identity(&self.curve)
    }

    #[inline]
    fn is_identity(&self) -> bool {
        self.infinity
    }

    fn combine(&self, other: &Self) -> Self {
        self.add_point(other)
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

impl PartialEq for BinaryPoint {
    fn eq(&self, other: &Self) -> bool {
        match (self.infinity, other.infinity) {
            (true, true) => true,
            (false, false) => self.x == other.x && self.y == other.y,
            _ => false,
        }
    }
}

impl Eq for BinaryPoint {}

impl Debug for BinaryPoint {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.infinity {
            write!(f, "BinaryPoint(infinity)")
        } else {
            write!(f, "BinaryPoint({:?}, {:?})", self.x, self.y)
        }
    }
}

impl Add<&BinaryPoint> for &BinaryPoint {
    type Output = BinaryPoint;

    fn add(self, other: &BinaryPoint) -> BinaryPoint {
        self.add_point(other)
    }
}

impl Neg for BinaryPoint {
    type Output = Self;

    fn neg(self) -> Self {
        self.negate()
    }
}

impl Mul<&BigInt> for &BinaryPoint {
    type Output = BinaryPoint;

    fn mul(self, scalar: &BigInt) -> BinaryPoint {
        <BinaryPoint as Group>::scalar_mul_windowed(self, scalar)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::msm::double_scalar_mul;

    fn hex(s: &str) -> BigInt {
        BigInt::from_str_radix(s, 16).unwrap()
    }

    // sect163k1
    fn k163() -> (BinaryPoint, BigInt) {
        let f = BinaryField::new(163, 7, 6, 3).unwrap();
        let one = Gf2m::one(&f);
        let curve = BinaryCurve::new(&f, one.clone(), one).unwrap();
        let g = BinaryPoint::new(
            &curve,
            Gf2m::from_bigint(&f, &hex("2fe13c0537bbc11acaa07d793de4e6d5e5c94eee8")),
            Gf2m::from_bigint(&f, &hex("289070fb05d38ff58321f2e800536d538ccdaa3d9")),
        )
        .unwrap();
        (g, hex("4000000000000000000020108a2e0cc0d99f8a5ef"))
    }

    #[test]
    fn test_generator_order() {
        let (g, n) = k163();
        assert!(g.is_on_curve());
        assert!((&g * &n).is_infinity());
        assert!(!(&g * &(&n - &BigInt::one())).is_infinity());
    }

    #[test]
    fn test_double_and_add() {
        let (g, _) = k163();
        let g2 = g.double();
        assert!(g2.is_on_curve());
        assert_eq!(&g + &g, g2);
        let g3 = &g2 + &g;
        assert!(g3.is_on_curve());
        assert_eq!(g.mul_u64(3), g3);
        assert!((&g + &(-g.clone())).is_infinity());
    }

    #[test]
    fn test_from_x() {
        let (g, _) = k163();
        let q = g.mul_u64(1000);
        let x_inv = q.x().invert().unwrap();
        let y_bit = q.y().mul(&x_inv).lsb();
        let recovered = BinaryPoint::from_x(q.curve(), q.x().clone(), y_bit).unwrap();
        assert_eq!(recovered, q);
        let other = BinaryPoint::from_x(q.curve(), q.x().clone(), !y_bit).unwrap();
        assert_eq!(other, -q);
    }

    #[test]
    fn test_double_scalar_mul() {
        let (g, _) = k163();
        let q = g.mul_u64(77);
        let a = BigInt::from(123_456u64);
        let b = BigInt::from(-9_876i64);
        let expected = &(&g * &a) + &(&q * &b);
        assert_eq!(double_scalar_mul(&g, &a, &q, &b), expected);
    }
}
