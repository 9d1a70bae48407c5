//! Short Weierstrass curves `y^2 = x^3 + a*x + b` over any field of the
//! tower, and their points in affine coordinates.

use core::fmt::{self, Debug, Formatter};
use core::ops::{Add, Mul, Neg, Sub};
use std::sync::Arc;

use zeroize::Zeroize;

use crate::bigint::BigInt;
use crate::error::{Error, Result};
use crate::field::FieldElement;
use crate::fp::Fp;
use crate::group::Group;
use crate::projective::Projective;

const TAG_INFINITY: u8 = 0x00;
const TAG_EVEN: u8 = 0x02;
const TAG_ODD: u8 = 0x03;
const TAG_UNCOMPRESSED: u8 = 0x04;

/// Curve coefficients.
#[derive(Debug)]
pub struct Curve<F: FieldElement> {
    a: F,
    b: F,
    a_is_zero: bool,
}

impl<F: FieldElement> Curve<F> {
    /// Rejects singular curves (`4a^3 + 27b^2 = 0`).
    pub fn new(a: F, b: F) -> Result<Arc<Self>> {
        let ctx = b.context();
        let four = F::from_fp(ctx, &Fp::from_u64(F::prime_field(ctx), 4));
        let twenty_seven = F::from_fp(ctx, &Fp::from_u64(F::prime_field(ctx), 27));
        let discriminant = four
            .mul(&a.square().mul(&a))
            .add(&twenty_seven.mul(&b.square()));
        if discriminant.is_zero() {
            return Err(Error::InvalidParameters("singular curve"));
        }
        let a_is_zero = a.is_zero();
        Ok(Arc::new(Curve { a, b, a_is_zero }))
    }

    #[inline]
    pub fn a(&self) -> &F {
        &self.a
    }

    #[inline]
    pub fn b(&self) -> &F {
        &self.b
    }

    #[inline]
    pub(crate) fn a_is_zero(&self) -> bool {
        self.a_is_zero
    }

    #[inline]
    pub fn field(&self) -> &Arc<F::Context> {
        self.b.context()
    }

    /// `x^3 + a*x + b`.
    pub fn rhs(&self, x: &F) -> F {
        let x3 = x.square().mul(x);
        if self.a_is_zero {
            x3.add(&self.b)
        } else {
            x3.add(&self.a.mul(x)).add(&self.b)
        }
    }
}

/// Affine point on the elliptic curve.
/// Represents a point in affine coordinates (x, y) or the point at infinity.
#[derive(Clone)]
pub struct Affine<F: FieldElement> {
    x: F,
    y: F,
    infinity: bool,
    curve: Arc<Curve<F>>,
}

impl<F: FieldElement> Affine<F> {
    /// The point at infinity (identity element)
    pub fn identity(curve: &Arc<Curve<F>>) -> Self {
        let zero = F::zero(curve.field());
        Affine {
            x: zero.clone(),
            y: zero,
            infinity: true,
            curve: Arc::clone(curve),
        }
    }

    /// Create a point, checking the curve equation.
    pub fn new(curve: &Arc<Curve<F>>, x: F, y: F) -> Result<Self> {
        let point = Self::new_unchecked(curve, x, y);
        if !point.is_on_curve() {
            return Err(Error::NotOnCurve);
        }
        Ok(point)
    }

    pub(crate) fn new_unchecked(curve: &Arc<Curve<F>>, x: F, y: F) -> Self {
        Affine {
            x,
            y,
            infinity: false,
            curve: Arc::clone(curve),
        }
    }

    /// The point with this x-coordinate whose y has parity `odd` (by `sgn0`).
    /// `None` when `x^3 + a*x + b` is not a square.
    pub fn from_x(curve: &Arc<Curve<F>>, x: F, odd: bool) -> Option<Self> {
        let y = curve.rhs(&x).sqrt()?;
        let y = if y.sgn0() == odd { y } else { y.neg() };
        Some(Self::new_unchecked(curve, x, y))
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
    pub fn curve(&self) -> &Arc<Curve<F>> {
        &self.curve
    }

    /// Check if this point is the point at infinity.
    #[inline]
    pub fn is_infinity(&self) -> bool {
        self.infinity
    }

    /// Check if a point is on the curve: y^2 = x^3 + a*x + b.
    pub fn is_on_curve(&self) -> bool {
        self.infinity || self.y.square() == self.curve.rhs(&self.x)
    }

    fn with(&self, x: F, y: F) -> Self {
        Self::new_unchecked(&self.curve, x, y)
    }

    fn tangent_slope(&self) -> Option<F> {
        if self.infinity || self.y.is_zero() {
            return None;
        }
        let x2 = self.x.square();
        let mut numerator = x2.double().add(&x2);
        if !self.curve.a_is_zero {
            numerator = numerator.add(&self.curve.a);
        }
        let inv = self.y.double().invert().ok()?;
        Some(numerator.mul(&inv))
    }

    fn chord(&self, other: &Self, lambda: F) -> Self {
        // x_r = λ^2 - x1 - x2, y_r = λ(x1 - x_r) - y1
        let x_r = lambda.square().sub(&self.x).sub(&other.x);
        let y_r = lambda.mul(&self.x.sub(&x_r)).sub(&self.y);
        self.with(x_r, y_r)
    }

    /// `self + other` together with the slope of the line through them
    /// (the tangent when they coincide). The slope is `None` when either
    /// input is the identity or the line is vertical.
    pub fn add_with_slope(&self, other: &Self) -> (Self, Option<F>) {
        if self.infinity {
            return (other.clone(), None);
        }
        if other.infinity {
            return (self.clone(), None);
        }

        let lambda = if self.x == other.x {
            if self.y != other.y {
                return (Self::identity(&self.curve), None);
            }
            match self.tangent_slope() {
                Some(lambda) => lambda,
                None => return (Self::identity(&self.curve), None),
            }
        } else {
            let denominator = other.x.sub(&self.x);
            match denominator.invert() {
                Ok(inv) => other.y.sub(&self.y).mul(&inv),
                Err(_) => return (Self::identity(&self.curve), None),
            }
        };

        (self.chord(other, lambda.clone()), Some(lambda))
    }

    /// Point doubling: 2*P.
    pub fn double(&self) -> Self {
        match self.tangent_slope() {
            Some(lambda) => self.chord(self, lambda),
            None => Self::identity(&self.curve),
        }
    }

    /// Negate a point.
    pub fn negate(&self) -> Self {
        if self.infinity {
            return self.clone();
        }
        self.with(self.x.clone(), self.y.neg())
    }

    pub fn to_projective(&self) -> Projective<F> {
        Projective::from_affine(self)
    }

    /// Tag byte then the big-endian prime-field coordinates of x (and y when
    /// uncompressed). Compressed points carry the parity of y in the tag.
    pub fn to_bytes(&self, compressed: bool) -> Vec<u8> {
        if self.infinity {
            return vec![TAG_INFINITY];
        }
        let mut out = Vec::new();
        if compressed {
            out.push(if self.y.sgn0() { TAG_ODD } else { TAG_EVEN });
            write_field(&self.x, &mut out);
        } else {
            out.push(TAG_UNCOMPRESSED);
            write_field(&self.x, &mut out);
            write_field(&self.y, &mut out);
        }
        out
    }

    pub fn from_bytes(curve: &Arc<Curve<F>>, bytes: &[u8]) -> Result<Self> {
        let (&tag, body) = bytes.split_first().ok_or(Error::InvalidLength)?;
        let width = F::degree() * F::prime_field(curve.field()).byte_len();
        match tag {
            TAG_INFINITY if body.is_empty() => Ok(Self::identity(curve)),
            TAG_EVEN | TAG_ODD if body.len() == width => {
                let x = read_field::<F>(curve.field(), body)?;
                Self::from_x(curve, x, tag == TAG_ODD).ok_or(Error::NotOnCurve)
            }
            TAG_UNCOMPRESSED if body.len() == 2 * width => {
                let (xs, ys) = body.split_at(width);
                let x = read_field::<F>(curve.field(), xs)?;
                let y = read_field::<F>(curve.field(), ys)?;
                Self::new(curve, x, y)
            }
            _ => Err(Error::InvalidLength),
        }
    }
}

fn write_field<F: FieldElement>(value: &F, out: &mut Vec<u8>) {
    for c in value.to_coefficients() {
        let len = c.field().byte_len();
        // canonical values always fit
        out.extend(c.to_bigint().to_bytes_be_padded(len).unwrap_or_else(|_| vec![0; len]));
    }
}

fn read_field<F: FieldElement>(ctx: &Arc<F::Context>, bytes: &[u8]) -> Result<F> {
    let fp = F::prime_field(ctx);
    let coeffs = bytes
        .chunks(fp.byte_len())
        .map(|chunk| {
            let value = BigInt::from_bytes_be(chunk);
            if value >= *fp.modulus() {
                return Err(Error::Parse("coordinate is not reduced".into()));
            }
            Ok(Fp::new(fp, &value))
        })
        .collect::<Result<Vec<_>>>()?;
    F::from_coefficients(ctx, &coeffs)
}

impl<F: FieldElement> Group for Affine<F> {
    fn identity_like(&self) -> Self {
        Self::identity(&self.curve)
    }

    #[inline]
    fn is_identity(&self) -> bool {
        self.infinity
    }

    fn combine(&self, other: &Self) -> Self {
        self.add_with_slope(other).0
    }

    #[inline]
    fn double(&self) -> Self {
        Self::double(self)
    }

    #[inline]
    fn negate(&self) -> Self {
        Self::negate(self)
    }

    // Affine additions each cost an inversion; run the ladder in Jacobian
    // coordinates and normalise once.
    fn scalar_mul(&self, scalar: &BigInt) -> Self {
        self.to_projective().scalar_mul_windowed(scalar).to_affine()
    }
}

impl<F: FieldElement> PartialEq for Affine<F> {
    fn eq(&self, other: &Self) -> bool {
        match (self.infinity, other.infinity) {
            (true, true) => true,
            (false, false) => self.x == other.x && self.y == other.y,
            _ => false,
        }
    }
}

impl<F: FieldElement> Eq for Affine<F> {}

/// Wipes both coordinates; the result is only fit to be dropped.
impl<F: FieldElement + Zeroize> Zeroize for Affine<F> {
    fn zeroize(&mut self) {
        self.x.zeroize();
        self.y.zeroize();
    }
}

impl<F: FieldElement> Debug for Affine<F> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.infinity {
            write!(f, "Affine(infinity)")
        } else {
            write!(f, "Affine({:?}, {:?})", self.x, self.y)
        }
    }
}

impl<F: FieldElement> Add for Affine<F> {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        self.combine(&other)
    }
}

impl<F: FieldElement> Add<&Affine<F>> for &Affine<F> {
    type Output = Affine<F>;

    fn add(self, other: &Affine<F>) -> Affine<F> {
        self.combine(other)
    }
}

#[allow(clippy::suspicious_arithmetic_impl)]
impl<F: FieldElement> Sub for Affine<F> {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        self.combine(&other.negate())
    }
}

#[allow(clippy::suspicious_arithmetic_impl)]
impl<F: FieldElement> Sub<&Affine<F>> for &Affine<F> {
    type Output = Affine<F>;

    fn sub(self, other: &Affine<F>) -> Affine<F> {
        self.combine(&other.negate())
    }
}

impl<F: FieldElement> Neg for Affine<F> {
    type Output = Self;

    fn neg(self) -> Self {
        self.negate()
    }
}

// Scalar multiplication
impl<F: FieldElement> Mul<&BigInt> for Affine<F> {
    type Output = Self;

    fn mul(self, scalar: &BigInt) -> Self {
        <Self as Group>::scalar_mul(&self, scalar)
    }
}

impl<F: FieldElement> Mul<&BigInt> for &Affine<F> {
    type Output = Affine<F>;

    fn mul(self, scalar: &BigInt) -> Affine<F> {
        <Affine<F> as Group>::scalar_mul(self, scalar)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::fp::PrimeField;
    use crate::msm::multi_scalar_mul;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn hex(s: &str) -> BigInt {
        BigInt::from_str_radix(s, 16).unwrap()
    }

    // secp256k1: a = 0
    pub(crate) fn secp256k1() -> (Affine<Fp>, BigInt) {
        let f = PrimeField::new(&hex(
            "fffffffffffffffffffffffffffffffffffffffffffffffffffffffefffffc2f",
        ))
        .unwrap();
        let curve = Curve::new(Fp::zero(&f), Fp::from_u64(&f, 7)).unwrap();
        let g = Affine::new(
            &curve,
            Fp::new(&f, &hex("79be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798")),
            Fp::new(&f, &hex("483ada7726a3c4655da4fbfc0e1108a8fd17b448a68554199c47d08ffb10d4b8")),
        )
        .unwrap();
        let n = hex("fffffffffffffffffffffffffffffffebaaedce6af48a03bbfd25e8cd0364141");
        (g, n)
    }

    // NIST P-192: a = -3
    pub(crate) fn p192() -> (Affine<Fp>, BigInt) {
        let f = PrimeField::new(&hex("fffffffffffffffffffffffffffffffeffffffffffffffff")).unwrap();
        let curve = Curve::new(
            Fp::from_u64(&f, 3).neg(),
            Fp::new(&f, &hex("64210519e59c80e70fa7e9ab72243049feb8deecc146b9b1")),
        )
        .unwrap();
        let g = Affine::new(
            &curve,
            Fp::new(&f, &hex("188da80eb03090f67cbf20eb43a18800f4ff0afd82ff1012")),
            Fp::new(&f, &hex("07192b95ffc8da78631011ed6b24cdd573f977a11e794811")),
        )
        .unwrap();
        let n = hex("ffffffffffffffffffffffff99def836146bc9b1b4d22831");
        (g, n)
    }

    #[test]
    fn test_infinity() {
        let (g, _) = secp256k1();
        let inf = Affine::identity(g.curve());
        assert!(inf.is_infinity());
        assert!(inf.is_on_curve());
        assert_eq!(&g + &inf, g);
        assert_eq!(&inf + &g, g);
        assert_eq!(&inf + &inf, inf);
    }

    #[test]
    fn test_zeroize_clears_coordinates() {
        let (g, _) = secp256k1();
        let mut wiped = g.clone();
        wiped.zeroize();
        assert!(wiped.x().is_zero());
        assert!(wiped.y().is_zero());
        assert!(!g.x().is_zero());
    }

    #[test]
    fn test_rejects_off_curve_point() {
        let (g, _) = secp256k1();
        let bad_y = g.y().add(&Fp::one(g.y().field()));
        assert_eq!(
            Affine::new(g.curve(), g.x().clone(), bad_y).unwrap_err(),
            Error::NotOnCurve
        );
    }

    #[test]
    fn test_rejects_singular_curve() {
        let f = PrimeField::new(&BigInt::from(1_000_000_007u64)).unwrap();
        assert!(Curve::new(Fp::zero(&f), Fp::zero(&f)).is_err());
    }

    #[test]
    fn test_point_doubling() {
        for (g, _) in [secp256k1(), p192()] {
            let g2 = g.double();
            assert!(g2.is_on_curve(), "Doubled point is not on the curve");
            assert_eq!(&g + &g, g2);
        }
    }

    #[test]
    fn test_point_negation() {
        let (g, _) = p192();
        let neg_g = -g.clone();
        assert!(neg_g.is_on_curve());
        assert!((&g + &neg_g).is_infinity());
        assert!((&g - &g).is_infinity());
    }

    #[test]
    fn test_group_order() {
        for (g, n) in [secp256k1(), p192()] {
            assert!((&g * &n).is_infinity());
            let n_minus_one = &n - &BigInt::one();
            assert_eq!(&g * &n_minus_one, -g.clone());
        }
    }

    #[test]
    fn test_scalar_multiplication() {
        let (g, _) = p192();
        let result = &g * &BigInt::from(5u64);

        // 5*G = G + G + G + G + G
        let expected = g.clone() + g.clone() + g.clone() + g.clone() + g.clone();
        assert_eq!(result, expected);
        assert!(result.is_on_curve());
        assert_eq!(g.mul_u64(5), expected);
        assert!((&g * &BigInt::zero()).is_infinity());
        assert_eq!(&g * &BigInt::one(), g);
    }

    #[test]
    fn test_negative_scalar() {
        let (g, _) = secp256k1();
        let k = BigInt::from(-77i64);
        assert_eq!(&g * &k, -(&g * &k.abs()));
    }

    #[test]
    fn test_scalar_mul_paths_agree() {
        let (g, n) = secp256k1();
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..10 {
            let k = BigInt::random_below(&mut rng, &n).unwrap();
            let affine_ladder = <Affine<Fp> as Group>::scalar_mul_windowed(&g, &k);
            let jacobian = g.to_projective().scalar_mul(&k).to_affine();
            assert_eq!(affine_ladder, jacobian);
            assert_eq!(&g * &k, jacobian);
        }
    }

    #[test]
    fn test_associativity() {
        let (g, _) = p192();
        let a = BigInt::from(3u64);
        let b = BigInt::from(5u64);

        // (a + b) * G = a*G + b*G
        let left = &g * &(&a + &b);
        let right = &(&g * &a) + &(&g * &b);
        assert_eq!(left, right);
    }

    #[test]
    fn test_from_x_parity() {
        let (g, _) = secp256k1();
        let odd = Affine::from_x(g.curve(), g.x().clone(), true).unwrap();
        let even = Affine::from_x(g.curve(), g.x().clone(), false).unwrap();
        assert_eq!(odd, -even.clone());
        assert!(odd == g || even == g);
        assert!(odd.y().sgn0());
    }

    #[test]
    fn test_bytes_round_trip() {
        let (g, _) = p192();
        let p = &g * &BigInt::from(1234u64);
        for compressed in [false, true] {
            let bytes = p.to_bytes(compressed);
            assert_eq!(Affine::from_bytes(g.curve(), &bytes).unwrap(), p);
        }
        let inf = Affine::identity(g.curve());
        assert_eq!(Affine::from_bytes(g.curve(), &inf.to_bytes(true)).unwrap(), inf);
        assert_eq!(
            Affine::from_bytes(g.curve(), &[TAG_UNCOMPRESSED, 1, 2]).unwrap_err(),
            Error::InvalidLength
        );
    }

    #[test]
    fn test_multi_scalar_mul() {
        let (g, n) = secp256k1();
        let mut rng = StdRng::seed_from_u64(7);
        for count in [1usize, 2, 4, 6] {
            let points: Vec<_> = (0..count)
                .map(|i| &g * &BigInt::from(i as u64 + 2))
                .collect();
            let scalars: Vec<_> = (0..count)
                .map(|i| {
                    let k = BigInt::random_below(&mut rng, &n).unwrap();
                    if i % 2 == 0 { k } else { -k }
                })
                .collect();

            let result = multi_scalar_mul(&points, &scalars);
            let expected = points
                .iter()
                .zip(&scalars)
                .fold(Affine::identity(g.curve()), |acc, (p, k)| &acc + &(p * k));
            assert_eq!(result, expected);
        }
    }
}
