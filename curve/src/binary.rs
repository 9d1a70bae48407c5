//! Binary field GF(2^m) in polynomial basis.
//!
//! The reduction polynomial is `x^m + x^a + 1` (trinomial, `b = c = 0`) or
//! `x^m + x^a + x^b + x^c + 1` (pentanomial). Only odd `m` is supported, which
//! is what the half-trace quadratic solver needs.

use core::fmt::{self, Debug, Display, Formatter};
use std::sync::Arc;

use rand::Rng;

use crate::bigint::BigInt;
use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryField {
    m: usize,
    /// Exponents of the middle terms, highest first.
    taps: Vec<usize>,
    words: usize,
}

impl BinaryField {
    pub fn new(m: usize, a: usize, b: usize, c: usize) -> Result<Arc<Self>> {
        if m < 3 || m % 2 == 0 {
            return Err(Error::InvalidParameters("binary field degree must be odd"));
        }
        let taps = if b == 0 && c == 0 {
            if a == 0 || a >= m {
                return Err(Error::InvalidParameters("bad trinomial"));
            }
            vec![a]
        } else {
            if !(m > a && a > b && b > c && c > 0) {
                return Err(Error::InvalidParameters("bad pentanomial"));
            }
            vec![a, b, c]
        };
        Ok(Arc::new(BinaryField {
            m,
            taps,
            words: m.div_ceil(64),
        }))
    }

    #[inline]
    pub fn degree(&self) -> usize {
        self.m
    }

    /// Reduce a polynomial of any length in place and truncate it to the
    /// field width.
    fn reduce(&self, poly: &mut Vec<u64>) {
        let top = poly.len() * 64;
        for k in (self.m..top).rev() {
            if (poly[k / 64] >> (k % 64)) & 1 == 0 {
                continue;
            }
            poly[k / 64] ^= 1 << (k % 64);
            let shift = k - self.m;
            flip(poly, shift);
            for &t in &self.taps {
                flip(poly, shift + t);
            }
        }
        poly.resize(self.words, 0);
    }
}

#[inline]
fn flip(poly: &mut [u64], bit: usize) {
    poly[bit / 64] ^= 1 << (bit % 64);
}

/// Carry-less 64 x 64 -> 128 bit product.
fn clmul(a: u64, b: u64) -> (u64, u64) {
    let mut lo = 0u64;
    let mut hi = 0u64;
    for i in 0..64 {
        if (a >> i) & 1 == 1 {
            lo ^= b << i;
            if i > 0 {
                hi ^= b >> (64 - i);
            }
        }
    }
    (lo, hi)
}

/// Element of GF(2^m); bit `i` is the coefficient of `x^i`.
#[derive(Clone)]
pub struct Gf2m {
    bits: Vec<u64>,
    field: Arc<BinaryField>,
}

impl Gf2m {
    pub fn zero(field: &Arc<BinaryField>) -> Self {
        Gf2m {
            bits: vec![0; field.words],
            field: Arc::clone(field),
        }
    }

    pub fn one(field: &Arc<BinaryField>) -> Self {
        let mut out = Self::zero(field);
        out.bits[0] = 1;
        out
    }

    /// Interpret the bits of `|value|` as a polynomial and reduce it.
    pub fn from_bigint(field: &Arc<BinaryField>, value: &BigInt) -> Self {
        let mut bits = value.limbs().to_vec();
        bits.resize(bits.len().max(field.words), 0);
        field.reduce(&mut bits);
        Gf2m {
            bits,
            field: Arc::clone(field),
        }
    }

    pub fn to_bigint(&self) -> BigInt {
        BigInt::from_limbs(&self.bits)
    }

    pub fn random<R: Rng + ?Sized>(field: &Arc<BinaryField>, rng: &mut R) -> Self {
        let bound = BigInt::one() << field.m;
        let value = BigInt::random_below(rng, &bound).unwrap_or_default();
        Self::from_bigint(field, &value)
    }

    #[inline]
    pub fn field(&self) -> &Arc<BinaryField> {
        &self.field
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.bits.iter().all(|&w| w == 0)
    }

    pub fn is_one(&self) -> bool {
        self.bits[0] == 1 && self.bits[1..].iter().all(|&w| w == 0)
    }

    /// Coefficient of `x^0`.
    #[inline]
    pub fn lsb(&self) -> bool {
        self.bits[0] & 1 == 1
    }

    fn with(&self, bits: Vec<u64>) -> Self {
        Gf2m {
            bits,
            field: Arc::clone(&self.field),
        }
    }

    /// Addition and subtraction coincide.
    pub fn add(&self, rhs: &Self) -> Self {
        self.with(self.bits.iter().zip(&rhs.bits).map(|(a, b)| a ^ b).collect())
    }

    pub fn mul(&self, rhs: &Self) -> Self {
        let n = self.field.words;
        let mut product = vec![0u64; 2 * n];
        for i in 0..n {
            for j in 0..n {
                let (lo, hi) = clmul(self.bits[i], rhs.bits[j]);
                product[i + j] ^= lo;
                product[i + j + 1] ^= hi;
            }
        }
        self.field.reduce(&mut product);
        self.with(product)
    }

    // Squaring spreads the bits out; no cross terms in characteristic two
    pub fn square(&self) -> Self {
        let mut spread = vec![0u64; 2 * self.field.words];
        for i in 0..self.field.m {
            if (self.bits[i / 64] >> (i % 64)) & 1 == 1 {
                flip(&mut spread, 2 * i);
            }
        }
        self.field.reduce(&mut spread);
        self.with(spread)
    }

    fn square_times(&self, n: usize) -> Self {
        (0..n).fold(self.clone(), |acc, _| acc.square())
    }

    /// `a^(2^m - 2)`.
    pub fn invert(&self) -> Result<Self> {
        if self.is_zero() {
            return Err(Error::NotInvertible);
        }
        // a^(2^m - 2) = (a^(2^(m-1) - 1))^2, built with Itoh-Tsujii chains
        let target = self.field.m - 1;
        let mut acc = self.clone(); // a^(2^1 - 1)
        let mut have = 1;
        for bit in (0..usize::BITS - target.leading_zeros() - 1).rev() {
            acc = acc.square_times(have).mul(&acc);
            have *= 2;
            if (target >> bit) & 1 == 1 {
                acc = acc.square().mul(self);
                have += 1;
            }
        }
        Ok(acc.square())
    }

    /// Every element has a unique square root `a^(2^(m-1))`.
    pub fn sqrt(&self) -> Self {
        self.square_times(self.field.m - 1)
    }

    /// Absolute trace `sum a^(2^i)`, which is 0 or 1.
    pub fn trace(&self) -> bool {
        let mut t = self.clone();
        let mut acc = self.clone();
        for _ in 1..self.field.m {
            t = t.square();
            acc = acc.add(&t);
        }
        acc.lsb()
    }

    /// `sum_{i=0}^{(m-1)/2} a^(2^(2i))`.
    pub fn half_trace(&self) -> Self {
        let mut t = self.clone();
        let mut acc = self.clone();
        for _ in 0..(self.field.m - 1) / 2 {
            t = t.square().square();
            acc = acc.add(&t);
        }
        acc
    }

    /// A root of `z^2 + z = self`, or `None` when the trace is one.
    pub fn solve_quadratic(&self) -> Option<Self> {
        if self.trace() {
            return None;
        }
        Some(self.half_trace())
    }
}

impl PartialEq for Gf2m {
    fn eq(&self, other: &Self) -> bool {
        self.bits == other.bits
    }
}

impl Eq for Gf2m {}

impl Display for Gf2m {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{:x}", self.to_bigint())
    }
}

impl Debug for Gf2m {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Gf2m(0x{})", self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    // x^163 + x^7 + x^6 + x^3 + 1
    fn k163() -> Arc<BinaryField> {
        BinaryField::new(163, 7, 6, 3).unwrap()
    }

    #[test]
    fn test_rejects_bad_parameters() {
        assert!(BinaryField::new(162, 7, 6, 3).is_err());
        assert!(BinaryField::new(163, 6, 7, 3).is_err());
        assert!(BinaryField::new(163, 200, 0, 0).is_err());
        assert!(BinaryField::new(233, 74, 0, 0).is_ok());
    }

    #[test]
    fn test_reduction() {
        let f = k163();
        // x^163 = x^7 + x^6 + x^3 + 1
        let x163 = Gf2m::from_bigint(&f, &(BigInt::one() << 163));
        assert_eq!(x163.to_bigint(), BigInt::from(0b1100_1001u64));
    }

    #[test]
    fn test_field_laws() {
        let f = k163();
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..20 {
            let a = Gf2m::random(&f, &mut rng);
            let b = Gf2m::random(&f, &mut rng);
            let c = Gf2m::random(&f, &mut rng);
            assert_eq!(a.mul(&b), b.mul(&a));
            assert_eq!(a.mul(&b.add(&c)), a.mul(&b).add(&a.mul(&c)));
            assert_eq!(a.square(), a.mul(&a));
            assert!(a.add(&a).is_zero());
            if !a.is_zero() {
                assert!(a.mul(&a.invert().unwrap()).is_one());
            }
        }
        assert_eq!(Gf2m::zero(&f).invert().unwrap_err(), Error::NotInvertible);
    }

    #[test]
    fn test_sqrt() {
        let f = k163();
        let mut rng = StdRng::seed_from_u64(3);
        let a = Gf2m::random(&f, &mut rng);
        assert_eq!(a.sqrt().square(), a);
        assert_eq!(a.square().sqrt(), a);
    }

    #[test]
    fn test_solve_quadratic() {
        let f = k163();
        let mut rng = StdRng::seed_from_u64(5);
        let mut solved = 0;
        for _ in 0..20 {
            let beta = Gf2m::random(&f, &mut rng);
            match beta.solve_quadratic() {
                Some(z) => {
                    assert_eq!(z.square().add(&z), beta);
                    solved += 1;
                }
                None => assert!(beta.trace()),
            }
        }
        assert!(solved > 0);
        // z^2 + z always has trace zero
        let z = Gf2m::random(&f, &mut rng);
        assert!(!z.square().add(&z).trace());
    }
}
