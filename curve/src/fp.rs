//! Prime field with a runtime modulus.
//!
//! Elements are kept in Montgomery form `a * R mod p` with `R = 2^(64 n)`,
//! where `n` is the limb count of the modulus. Each element holds an `Arc` to
//! its [`PrimeField`], so several moduli can be live at the same time.

use core::cmp::Ordering;
use core::fmt::{self, Debug, Display, Formatter};
use std::sync::Arc;

use zeroize::Zeroize;

use crate::bigint::{borrowing_sub, carrying_add, cmp_limbs, BigInt};
use crate::error::{Error, Result};
use crate::field::{tonelli_shanks, FieldElement};

/// Montgomery constants for one odd prime modulus.
#[derive(Debug)]
pub struct PrimeField {
    modulus: BigInt,
    limbs: Vec<u64>,
    /// -p^{-1} mod 2^64
    inv: u64,
    /// R mod p
    r: Vec<u64>,
    /// R^2 mod p
    r2: Vec<u64>,
    /// (p + 1) / 4 when p = 3 mod 4
    sqrt_exponent: Option<BigInt>,
    /// Quadratic non-residue for Tonelli-Shanks when p = 1 mod 4
    nonresidue: Option<BigInt>,
}

fn padded(value: &BigInt, n: usize) -> Vec<u64> {
    let mut limbs = value.limbs().to_vec();
    limbs.resize(n, 0);
    limbs
}

impl PrimeField {
    /// Set up arithmetic modulo `modulus`, which must be an odd prime greater
    /// than two. Primality is the caller's responsibility.
    pub fn new(modulus: &BigInt) -> Result<Arc<Self>> {
        if modulus.is_negative() || modulus.is_even() || modulus.bits() < 2 {
            return Err(Error::InvalidModulus);
        }
        let limbs = modulus.limbs().to_vec();
        let n = limbs.len();

        // Newton iteration doubles the number of correct low bits each round
        let p0 = limbs[0];
        let mut x = 1u64;
        for _ in 0..6 {
            x = x.wrapping_mul(2u64.wrapping_sub(p0.wrapping_mul(x)));
        }
        let inv = x.wrapping_neg();

        let r = (BigInt::one() << (64 * n)).modulo(modulus)?;
        let r2 = (BigInt::one() << (128 * n)).modulo(modulus)?;

        let four = BigInt::from(4u64);
        let (_, residue) = modulus.div_rem(&four)?;
        let (sqrt_exponent, nonresidue) = if residue == BigInt::from(3u64) {
            let (e, _) = (modulus + &BigInt::one()).div_rem(&four)?;
            (Some(e), None)
        } else {
            (None, Some(Self::find_nonresidue(modulus)?))
        };

        Ok(Arc::new(PrimeField {
            modulus: modulus.clone(),
            limbs,
            inv,
            r: padded(&r, n),
            r2: padded(&r2, n),
            sqrt_exponent,
            nonresidue,
        }))
    }

    fn find_nonresidue(modulus: &BigInt) -> Result<BigInt> {
        let minus_one = modulus - &BigInt::one();
        let (half, _) = minus_one.div_rem(&BigInt::from(2u64))?;
        let mut candidate = BigInt::from(2u64);
        while candidate < *modulus {
            if candidate.pow_mod(&half, modulus)? == minus_one {
                return Ok(candidate);
            }
            candidate += &BigInt::one();
        }
        Err(Error::InvalidParameters("modulus has no quadratic non-residue"))
    }

    #[inline]
    pub fn modulus(&self) -> &BigInt {
        &self.modulus
    }

    /// Bit length of the modulus.
    #[inline]
    pub fn bits(&self) -> usize {
        self.modulus.bits()
    }

    /// Number of bytes needed to hold a canonical element.
    #[inline]
    pub fn byte_len(&self) -> usize {
        self.bits().div_ceil(8)
    }

    #[inline]
    fn limb_count(&self) -> usize {
        self.limbs.len()
    }
}

/// Montgomery multiplication: a * b * R^{-1} mod p.
fn montgomery_mul(a: &[u64], b: &[u64], field: &PrimeField) -> Vec<u64> {
    let n = field.limb_count();
    let p = &field.limbs;
    let mut t = vec![0u64; 2 * n + 1];

    // Schoolbook multiplication
    for i in 0..n {
        let mut carry = 0u128;
        for j in 0..n {
            let product = (a[i] as u128) * (b[j] as u128) + (t[i + j] as u128) + carry;
            t[i + j] = product as u64;
            carry = product >> 64;
        }
        t[i + n] = carry as u64;
    }

    // Montgomery reduction
    for i in 0..n {
        let k = t[i].wrapping_mul(field.inv);
        let mut carry = 0u128;

        for j in 0..n {
            let product = (k as u128) * (p[j] as u128) + (t[i + j] as u128) + carry;
            t[i + j] = product as u64;
            carry = product >> 64;
        }

        for j in n..(2 * n + 1 - i) {
            if carry == 0 {
                break;
            }
            let sum = (t[i + j] as u128) + carry;
            t[i + j] = sum as u64;
            carry = sum >> 64;
        }
    }

    // High half is below 2p; subtract p once if needed
    let mut result = t[n..].to_vec();
    if result[n] != 0 || cmp_limbs(&result[..n], p) != Ordering::Less {
        let mut borrow = false;
        for j in 0..n {
            let (d, b) = borrowing_sub(result[j], p[j], borrow);
            result[j] = d;
            borrow = b;
        }
    }
    result.truncate(n);
    result
}

fn add_mod(a: &[u64], b: &[u64], p: &[u64]) -> Vec<u64> {
    let mut out = Vec::with_capacity(p.len());
    let mut carry = false;
    for j in 0..p.len() {
        let (s, c) = carrying_add(a[j], b[j], carry);
        out.push(s);
        carry = c;
    }
    if carry || cmp_limbs(&out, p) != Ordering::Less {
        let mut borrow = false;
        for j in 0..p.len() {
            let (d, b) = borrowing_sub(out[j], p[j], borrow);
            out[j] = d;
            borrow = b;
        }
    }
    out
}

fn sub_mod(a: &[u64], b: &[u64], p: &[u64]) -> Vec<u64> {
    let mut out = Vec::with_capacity(p.len());
    let mut borrow = false;
    for j in 0..p.len() {
        let (d, br) = borrowing_sub(a[j], b[j], borrow);
        out.push(d);
        borrow = br;
    }
    if borrow {
        let mut carry = false;
        for j in 0..p.len() {
            let (s, c) = carrying_add(out[j], p[j], carry);
            out[j] = s;
            carry = c;
        }
    }
    out
}

/// Element of a prime field, stored in Montgomery form.
#[derive(Clone)]
pub struct Fp {
    repr: Vec<u64>,
    field: Arc<PrimeField>,
}

impl Fp {
    /// Reduce `value` (any sign) into the field.
    pub fn new(field: &Arc<PrimeField>, value: &BigInt) -> Self {
        let n = field.limb_count();
        let reduced = value.modulo(&field.modulus).unwrap_or_default();
        Fp {
            repr: montgomery_mul(&padded(&reduced, n), &field.r2, field),
            field: Arc::clone(field),
        }
    }

    pub fn from_u64(field: &Arc<PrimeField>, value: u64) -> Self {
        Self::new(field, &BigInt::from(value))
    }

    /// Canonical representative in `[0, p)`.
    pub fn to_bigint(&self) -> BigInt {
        let n = self.field.limb_count();
        let mut one = vec![0u64; n];
        one[0] = 1;
        BigInt::from_limbs(&montgomery_mul(&self.repr, &one, &self.field))
    }

    #[inline]
    pub fn field(&self) -> &Arc<PrimeField> {
        &self.field
    }

    /// Parity of the canonical representative.
    pub fn is_odd(&self) -> bool {
        self.to_bigint().is_odd()
    }

    fn with_repr(&self, repr: Vec<u64>) -> Self {
        Fp {
            repr,
            field: Arc::clone(&self.field),
        }
    }
}

impl FieldElement for Fp {
    type Context = PrimeField;

    fn zero(ctx: &Arc<PrimeField>) -> Self {
        Fp {
            repr: vec![0u64; ctx.limb_count()],
            field: Arc::clone(ctx),
        }
    }

    fn one(ctx: &Arc<PrimeField>) -> Self {
        Fp {
            repr: ctx.r.clone(),
            field: Arc::clone(ctx),
        }
    }

    #[inline]
    fn context(&self) -> &Arc<PrimeField> {
        &self.field
    }

    #[inline]
    fn prime_field(ctx: &Arc<PrimeField>) -> &Arc<PrimeField> {
        ctx
    }

    #[inline]
    fn degree() -> usize {
        1
    }

    fn from_fp(_ctx: &Arc<PrimeField>, value: &Fp) -> Self {
        value.clone()
    }

    #[inline]
    fn is_zero(&self) -> bool {
        self.repr.iter().all(|&l| l == 0)
    }

    #[inline]
    fn is_one(&self) -> bool {
        self.repr == self.field.r
    }

    fn add(&self, rhs: &Self) -> Self {
        self.with_repr(add_mod(&self.repr, &rhs.repr, &self.field.limbs))
    }

    fn sub(&self, rhs: &Self) -> Self {
        self.with_repr(sub_mod(&self.repr, &rhs.repr, &self.field.limbs))
    }

    fn mul(&self, rhs: &Self) -> Self {
        self.with_repr(montgomery_mul(&self.repr, &rhs.repr, &self.field))
    }

    fn neg(&self) -> Self {
        if self.is_zero() {
            return self.clone();
        }
        let zero = vec![0u64; self.field.limb_count()];
        self.with_repr(sub_mod(&zero, &self.repr, &self.field.limbs))
    }

    fn mul_fp(&self, scalar: &Fp) -> Self {
        self.mul(scalar)
    }

    fn invert(&self) -> Result<Self> {
        let inverse = self.to_bigint().mod_inverse(&self.field.modulus)?;
        Ok(Fp::new(&self.field, &inverse))
    }

    #[inline]
    fn frobenius(&self) -> Self {
        self.clone()
    }

    /// The prime field has no proper subfield, so conjugation is the identity.
    #[inline]
    fn conjugate(&self) -> Self {
        self.clone()
    }

    fn sqrt(&self) -> Option<Self> {
        if self.is_zero() {
            return Some(self.clone());
        }
        let candidate = match (&self.field.sqrt_exponent, &self.field.nonresidue) {
            (Some(e), _) => self.pow(e),
            (None, Some(nr)) => {
                let order_minus_one = self.field.modulus() - &BigInt::one();
                tonelli_shanks(self, &order_minus_one, &Fp::new(&self.field, nr))?
            }
            (None, None) => return None,
        };
        (candidate.square() == *self).then_some(candidate)
    }

    fn coefficients(&self, out: &mut Vec<Fp>) {
        out.push(self.clone());
    }

    fn from_coefficients(_ctx: &Arc<PrimeField>, coeffs: &[Fp]) -> Result<Self> {
        match coeffs {
            [c] => Ok(c.clone()),
            _ => Err(Error::InvalidLength),
        }
    }
}

// Montgomery forms only agree across fields when the moduli do
impl PartialEq for Fp {
    fn eq(&self, other: &Self) -> bool {
        let same_field =
            Arc::ptr_eq(&self.field, &other.field) || self.field.modulus() == other.field.modulus();
        same_field && self.repr == other.repr
    }
}

impl Eq for Fp {}

/// Overwrites the limbs with zeros, leaving the zero element.
impl Zeroize for Fp {
    fn zeroize(&mut self) {
        self.repr.as_mut_slice().zeroize();
    }
}

impl Display for Fp {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{:x}", self.to_bigint())
    }
}

impl Debug for Fp {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Fp(0x{})", self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::RandomField;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    // 2^255 - 19
    fn field_25519() -> Arc<PrimeField> {
        let p = BigInt::from_str_radix(
            "7fffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffed",
            16,
        )
        .unwrap();
        PrimeField::new(&p).unwrap()
    }

    // NIST P-192 prime, 3 mod 4
    fn field_p192() -> Arc<PrimeField> {
        let p = BigInt::from_str_radix("fffffffffffffffffffffffffffffffeffffffffffffffff", 16)
            .unwrap();
        PrimeField::new(&p).unwrap()
    }

    #[test]
    fn test_zero_one() {
        let f = field_p192();
        let zero = Fp::zero(&f);
        let one = Fp::one(&f);
        assert_eq!(zero.add(&zero), zero);
        assert_eq!(one.mul(&one), one);
        assert_eq!(zero.mul(&one), zero);
        assert!(one.is_one());
        assert_eq!(one.to_bigint(), BigInt::one());
    }

    #[test]
    fn test_eq_respects_field() {
        let f103 = PrimeField::new(&BigInt::from(103u64)).unwrap();
        let f107 = PrimeField::new(&BigInt::from(107u64)).unwrap();
        // zero has the same Montgomery limbs in every field
        assert_ne!(Fp::zero(&f103), Fp::zero(&f107));
        assert_ne!(Fp::from_u64(&f103, 5), Fp::from_u64(&f107, 5));

        let again = PrimeField::new(&BigInt::from(103u64)).unwrap();
        assert_eq!(Fp::from_u64(&f103, 5), Fp::from_u64(&again, 5));
    }

    #[test]
    fn test_zeroize_leaves_zero() {
        let f = field_p192();
        let mut a = Fp::from_u64(&f, 123_456);
        a.zeroize();
        assert!(a.is_zero());
        assert_eq!(a, Fp::zero(&f));
    }

    #[test]
    fn test_small_arithmetic() {
        let f = field_p192();
        let a = Fp::from_u64(&f, 6);
        let b = Fp::from_u64(&f, 7);
        assert_eq!(a.mul(&b), Fp::from_u64(&f, 42));
        assert_eq!(a.add(&b), Fp::from_u64(&f, 13));
        assert_eq!(b.sub(&a), Fp::from_u64(&f, 1));
        assert_eq!(a.sub(&b), Fp::from_u64(&f, 1).neg());
        assert!(a.add(&a.neg()).is_zero());
    }

    #[test]
    fn test_negative_values_reduce() {
        let f = field_p192();
        let minus_one = Fp::new(&f, &BigInt::from(-1i64));
        assert_eq!(minus_one.to_bigint(), f.modulus() - &BigInt::one());
    }

    #[test]
    fn test_multiplication_matches_bigint() {
        let f = field_25519();
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..50 {
            let a = Fp::random(&f, &mut rng);
            let b = Fp::random(&f, &mut rng);
            let expected = (&a.to_bigint() * &b.to_bigint()).modulo(f.modulus()).unwrap();
            assert_eq!(a.mul(&b).to_bigint(), expected);
        }
    }

    #[test]
    fn test_inverse() {
        let f = field_p192();
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..20 {
            let a = Fp::random(&f, &mut rng);
            if a.is_zero() {
                continue;
            }
            assert!(a.mul(&a.invert().unwrap()).is_one());
        }
        assert_eq!(Fp::zero(&f).invert(), Err(Error::NotInvertible));
    }

    #[test]
    fn test_sqrt_three_mod_four() {
        let f = field_p192();
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..20 {
            let a = Fp::random(&f, &mut rng);
            let sq = a.square();
            let root = sq.sqrt().unwrap();
            assert!(root == a || root == a.neg());
        }
    }

    #[test]
    fn test_sqrt_one_mod_four() {
        let f = field_25519();
        let mut rng = StdRng::seed_from_u64(6);
        let mut non_squares = 0;
        for _ in 0..20 {
            let a = Fp::random(&f, &mut rng);
            let root = a.square().sqrt().unwrap();
            assert_eq!(root.square(), a.square());
            if a.sqrt().is_none() {
                non_squares += 1;
            }
        }
        assert!(non_squares > 0);
    }

    #[test]
    fn test_rejects_even_modulus() {
        assert_eq!(
            PrimeField::new(&BigInt::from(100u64)).unwrap_err(),
            Error::InvalidModulus
        );
        assert_eq!(
            PrimeField::new(&BigInt::from(2u64)).unwrap_err(),
            Error::InvalidModulus
        );
    }

    #[test]
    fn test_single_limb_modulus() {
        let f = PrimeField::new(&BigInt::from(1_000_000_007u64)).unwrap();
        let a = Fp::from_u64(&f, 999_999_999);
        let b = Fp::from_u64(&f, 123_456_789);
        let expected = (999_999_999u128 * 123_456_789u128 % 1_000_000_007u128) as u64;
        assert_eq!(a.mul(&b).to_bigint(), BigInt::from(expected));
    }
}
