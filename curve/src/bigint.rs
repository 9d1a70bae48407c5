//! Arbitrary-precision signed integers.
//!
//! Values are stored as a sign flag plus little-endian 64-bit limbs with no
//! leading zero limbs; zero is never negative. The limb routines here are
//! also used by the Montgomery arithmetic in [`crate::fp`].

use core::cmp::Ordering;
use core::fmt;
use core::ops::{Add, AddAssign, Mul, MulAssign, Neg, Shl, Shr, Sub, SubAssign};
use core::str::FromStr;

use num_bigint::Sign;
use rand::Rng;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use zeroize::Zeroize;

use crate::error::{Error, Result};

/// Signed integer of unbounded size.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct BigInt {
    negative: bool,
    limbs: Vec<u64>,
}

// Limb helpers

/// Add with carry: returns (sum, carry_out)
#[inline]
pub(crate) fn carrying_add(a: u64, b: u64, carry: bool) -> (u64, bool) {
    let (s1, c1) = a.overflowing_add(b);
    let (s2, c2) = s1.overflowing_add(carry as u64);
    (s2, c1 | c2)
}

/// Subtract with borrow: returns (difference, borrow_out)
#[inline]
pub(crate) fn borrowing_sub(a: u64, b: u64, borrow: bool) -> (u64, bool) {
    let (d1, b1) = a.overflowing_sub(b);
    let (d2, b2) = d1.overflowing_sub(borrow as u64);
    (d2, b1 | b2)
}

fn trim(limbs: &mut Vec<u64>) {
    while limbs.last() == Some(&0) {
        limbs.pop();
    }
}

fn significant_len(limbs: &[u64]) -> usize {
    limbs.iter().rposition(|&l| l != 0).map_or(0, |i| i + 1)
}

/// Compare two magnitudes; zero limbs on top are ignored.
pub(crate) fn cmp_limbs(a: &[u64], b: &[u64]) -> Ordering {
    let la = significant_len(a);
    let lb = significant_len(b);
    if la != lb {
        return la.cmp(&lb);
    }
    for i in (0..la).rev() {
        match a[i].cmp(&b[i]) {
            Ordering::Equal => continue,
            other => return other,
        }
    }
    Ordering::Equal
}

fn add_limbs(a: &[u64], b: &[u64]) -> Vec<u64> {
    let (long, short) = if a.len() >= b.len() { (a, b) } else { (b, a) };
    let mut out = Vec::with_capacity(long.len() + 1);
    let mut carry = false;
    for (i, &l) in long.iter().enumerate() {
        let (s, c) = carrying_add(l, short.get(i).copied().unwrap_or(0), carry);
        out.push(s);
        carry = c;
    }
    if carry {
        out.push(1);
    }
    trim(&mut out);
    out
}

/// `a - b` for `a >= b`.
fn sub_limbs(a: &[u64], b: &[u64]) -> Vec<u64> {
    let mut out = Vec::with_capacity(a.len());
    let mut borrow = false;
    for (i, &l) in a.iter().enumerate() {
        let (d, br) = borrowing_sub(l, b.get(i).copied().unwrap_or(0), borrow);
        out.push(d);
        borrow = br;
    }
    debug_assert!(!borrow, "sub_limbs underflow");
    trim(&mut out);
    out
}

fn mul_limbs(a: &[u64], b: &[u64]) -> Vec<u64> {
    if a.is_empty() || b.is_empty() {
        return Vec::new();
    }
    let mut out = vec![0u64; a.len() + b.len()];
    for (i, &ai) in a.iter().enumerate() {
        let mut carry = 0u128;
        for (j, &bj) in b.iter().enumerate() {
            let t = (ai as u128) * (bj as u128) + (out[i + j] as u128) + carry;
            out[i + j] = t as u64;
            carry = t >> 64;
        }
        out[i + b.len()] = carry as u64;
    }
    trim(&mut out);
    out
}

fn shl_limbs(a: &[u64], bits: usize) -> Vec<u64> {
    let words = bits / 64;
    let shift = (bits % 64) as u32;
    let mut out = vec![0u64; words];
    if shift == 0 {
        out.extend_from_slice(a);
    } else {
        let mut carry = 0u64;
        for &l in a {
            out.push((l << shift) | carry);
            carry = l >> (64 - shift);
        }
        out.push(carry);
    }
    trim(&mut out);
    out
}

fn shr_limbs(a: &[u64], bits: usize) -> Vec<u64> {
    let words = bits / 64;
    if words >= a.len() {
        return Vec::new();
    }
    let shift = (bits % 64) as u32;
    let mut out = Vec::with_capacity(a.len() - words);
    for i in words..a.len() {
        let lo = a[i] >> shift;
        let hi = if shift > 0 && i + 1 < a.len() {
            a[i + 1] << (64 - shift)
        } else {
            0
        };
        out.push(lo | hi);
    }
    trim(&mut out);
    out
}

fn div_rem_small(a: &[u64], d: u64) -> (Vec<u64>, u64) {
    let mut q = vec![0u64; a.len()];
    let mut rem = 0u128;
    for i in (0..a.len()).rev() {
        let cur = (rem << 64) | a[i] as u128;
        q[i] = (cur / d as u128) as u64;
        rem = cur % d as u128;
    }
    trim(&mut q);
    (q, rem as u64)
}

/// Schoolbook long division (Knuth, TAOCP vol. 2, algorithm D).
/// `b` must be non-zero and trimmed.
fn div_rem_limbs(a: &[u64], b: &[u64]) -> (Vec<u64>, Vec<u64>) {
    if cmp_limbs(a, b) == Ordering::Less {
        let mut r = a.to_vec();
        trim(&mut r);
        return (Vec::new(), r);
    }
    if b.len() == 1 {
        let (q, r) = div_rem_small(a, b[0]);
        return (q, if r == 0 { Vec::new() } else { vec![r] });
    }

    let shift = b[b.len() - 1].leading_zeros() as usize;
    let v = shl_limbs(b, shift);
    let mut u = shl_limbs(a, shift);
    u.resize(a.len() + 1, 0);

    let n = v.len();
    let m = u.len() - n;
    let mut q = vec![0u64; m];
    let v_top = v[n - 1] as u128;
    let v_next = v[n - 2] as u128;
    let base = 1u128 << 64;

    for j in (0..m).rev() {
        let num = ((u[j + n] as u128) << 64) | u[j + n - 1] as u128;
        let mut qhat = num / v_top;
        let mut rhat = num % v_top;
        while qhat >= base || qhat * v_next > ((rhat << 64) | u[j + n - 2] as u128) {
            qhat -= 1;
            rhat += v_top;
            if rhat >= base {
                break;
            }
        }

        // u[j..=j+n] -= qhat * v
        let mut carry = 0u128;
        let mut borrow = false;
        for i in 0..n {
            let p = qhat * v[i] as u128 + carry;
            carry = p >> 64;
            let (d, br) = borrowing_sub(u[i + j], p as u64, borrow);
            u[i + j] = d;
            borrow = br;
        }
        let (d, br) = borrowing_sub(u[j + n], carry as u64, borrow);
        u[j + n] = d;

        if br {
            qhat -= 1;
            let mut c = false;
            for i in 0..n {
                let (s, cc) = carrying_add(u[i + j], v[i], c);
                u[i + j] = s;
                c = cc;
            }
            u[j + n] = u[j + n].wrapping_add(c as u64);
        }
        q[j] = qhat as u64;
    }

    trim(&mut q);
    let r = shr_limbs(&u[..n], shift);
    (q, r)
}

const SMALL_PRIMES: [u64; 25] = [
    2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47, 53, 59, 61, 67, 71, 73, 79, 83, 89, 97,
];

impl BigInt {
    pub fn zero() -> Self {
        Self::default()
    }

    pub fn one() -> Self {
        Self::from(1u64)
    }

    fn from_parts(negative: bool, mut limbs: Vec<u64>) -> Self {
        trim(&mut limbs);
        let negative = negative && !limbs.is_empty();
        BigInt { negative, limbs }
    }

    /// Non-negative value from little-endian limbs.
    pub(crate) fn from_limbs(limbs: &[u64]) -> Self {
        Self::from_parts(false, limbs.to_vec())
    }

    /// Little-endian limbs of the magnitude.
    pub(crate) fn limbs(&self) -> &[u64] {
        &self.limbs
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.limbs.is_empty()
    }

    #[inline]
    pub fn is_one(&self) -> bool {
        !self.negative && self.limbs == [1]
    }

    #[inline]
    pub fn is_negative(&self) -> bool {
        self.negative
    }

    #[inline]
    pub fn is_odd(&self) -> bool {
        self.limbs.first().is_some_and(|l| l & 1 == 1)
    }

    #[inline]
    pub fn is_even(&self) -> bool {
        !self.is_odd()
    }

    pub fn abs(&self) -> Self {
        BigInt {
            negative: false,
            limbs: self.limbs.clone(),
        }
    }

    /// Bit length of the magnitude (0 for zero).
    pub fn bits(&self) -> usize {
        match self.limbs.last() {
            None => 0,
            Some(top) => 64 * (self.limbs.len() - 1) + (64 - top.leading_zeros() as usize),
        }
    }

    /// Bit `i` of the magnitude.
    #[inline]
    pub fn bit(&self, i: usize) -> bool {
        self.limbs
            .get(i / 64)
            .is_some_and(|l| (l >> (i % 64)) & 1 == 1)
    }

    pub fn trailing_zeros(&self) -> usize {
        match self.limbs.iter().position(|&l| l != 0) {
            None => 0,
            Some(i) => 64 * i + self.limbs[i].trailing_zeros() as usize,
        }
    }

    pub fn to_u64(&self) -> Option<u64> {
        match (self.negative, self.limbs.len()) {
            (false, 0) => Some(0),
            (false, 1) => Some(self.limbs[0]),
            _ => None,
        }
    }

    /// Non-negative value from big-endian bytes.
    pub fn from_bytes_be(bytes: &[u8]) -> Self {
        let mut limbs = Vec::with_capacity(bytes.len() / 8 + 1);
        for chunk in bytes.rchunks(8) {
            let mut word = 0u64;
            for &b in chunk {
                word = (word << 8) | b as u64;
            }
            limbs.push(word);
        }
        Self::from_parts(false, limbs)
    }

    /// Big-endian bytes of the magnitude, without leading zeros.
    pub fn to_bytes_be(&self) -> Vec<u8> {
        let mut out: Vec<u8> = self
            .limbs
            .iter()
            .rev()
            .flat_map(|l| l.to_be_bytes())
            .skip_while(|&b| b == 0)
            .collect();
        out.shrink_to_fit();
        out
    }

    /// Little-endian bytes of the magnitude, least significant first, without
    /// trailing zeros. Zero yields an empty vector.
    pub fn to_bytes_le(&self) -> Vec<u8> {
        let mut out: Vec<u8> = self.limbs.iter().flat_map(|l| l.to_le_bytes()).collect();
        while out.last() == Some(&0) {
            out.pop();
        }
        out
    }

    /// Big-endian bytes left-padded with zeros to exactly `len` bytes.
    pub fn to_bytes_be_padded(&self, len: usize) -> Result<Vec<u8>> {
        let bytes = self.to_bytes_be();
        if bytes.len() > len {
            return Err(Error::InvalidLength);
        }
        let mut out = vec![0u8; len - bytes.len()];
        out.extend_from_slice(&bytes);
        Ok(out)
    }

    pub fn from_str_radix(s: &str, radix: u32) -> Result<Self> {
        let trimmed = s.trim();
        num_bigint::BigInt::parse_bytes(trimmed.as_bytes(), radix)
            .map(|v| Self::from(&v))
            .ok_or_else(|| Error::Parse(trimmed.to_string()))
    }

    pub fn to_str_radix(&self, radix: u32) -> String {
        num_bigint::BigInt::from(self).to_str_radix(radix)
    }

    /// Truncating division: the quotient rounds toward zero and the remainder
    /// has the sign of `self`.
    pub fn div_rem(&self, divisor: &Self) -> Result<(Self, Self)> {
        if divisor.is_zero() {
            return Err(Error::DivisionByZero);
        }
        let (q, r) = div_rem_limbs(&self.limbs, &divisor.limbs);
        Ok((
            Self::from_parts(self.negative != divisor.negative, q),
            Self::from_parts(self.negative, r),
        ))
    }

    /// Least non-negative residue modulo `modulus`.
    pub fn modulo(&self, modulus: &Self) -> Result<Self> {
        if modulus.is_zero() || modulus.negative {
            return Err(Error::InvalidModulus);
        }
        let (_, r) = div_rem_limbs(&self.limbs, &modulus.limbs);
        let r = Self::from_parts(false, r);
        if self.negative && !r.is_zero() {
            Ok(modulus - &r)
        } else {
            Ok(r)
        }
    }

    /// Inverse modulo `modulus` via the extended Euclidean algorithm.
    pub fn mod_inverse(&self, modulus: &Self) -> Result<Self> {
        let a = self.modulo(modulus)?;
        if a.is_zero() {
            return Err(Error::NotInvertible);
        }

        let (mut old_r, mut r) = (a, modulus.clone());
        let (mut old_s, mut s) = (Self::one(), Self::zero());
        while !r.is_zero() {
            let (q, rem) = old_r.div_rem(&r)?;
            old_r = core::mem::replace(&mut r, rem);
            let next_s = &old_s - &(&q * &s);
            old_s = core::mem::replace(&mut s, next_s);
        }

        if !old_r.is_one() {
            return Err(Error::NotInvertible);
        }
        old_s.modulo(modulus)
    }

    pub fn gcd(&self, other: &Self) -> Self {
        let mut a = self.limbs.clone();
        let mut b = other.limbs.clone();
        while !b.is_empty() {
            let (_, r) = div_rem_limbs(&a, &b);
            a = core::mem::replace(&mut b, r);
        }
        Self::from_parts(false, a)
    }

    /// `self^exponent mod modulus` by left-to-right binary exponentiation.
    /// A negative exponent inverts the base first.
    pub fn pow_mod(&self, exponent: &Self, modulus: &Self) -> Result<Self> {
        let base = if exponent.negative {
            self.mod_inverse(modulus)?
        } else {
            self.modulo(modulus)?
        };
        let mut acc = Self::one().modulo(modulus)?;
        for i in (0..exponent.bits()).rev() {
            acc = (&acc * &acc).modulo(modulus)?;
            if exponent.bit(i) {
                acc = (&acc * &base).modulo(modulus)?;
            }
        }
        Ok(acc)
    }

    /// `g^u1 * y^u2 mod modulus` with a single shared squaring chain.
    pub fn pow2_mod(g: &Self, u1: &Self, y: &Self, u2: &Self, modulus: &Self) -> Result<Self> {
        let g = if u1.negative {
            g.mod_inverse(modulus)?
        } else {
            g.modulo(modulus)?
        };
        let y = if u2.negative {
            y.mod_inverse(modulus)?
        } else {
            y.modulo(modulus)?
        };
        let gy = (&g * &y).modulo(modulus)?;

        let mut acc = Self::one().modulo(modulus)?;
        for i in (0..u1.bits().max(u2.bits())).rev() {
            acc = (&acc * &acc).modulo(modulus)?;
            let factor = match (u1.bit(i), u2.bit(i)) {
                (true, true) => Some(&gy),
                (true, false) => Some(&g),
                (false, true) => Some(&y),
                (false, false) => None,
            };
            if let Some(f) = factor {
                acc = (&acc * f).modulo(modulus)?;
            }
        }
        Ok(acc)
    }

    /// Plain integer power.
    pub fn pow(&self, exponent: u32) -> Self {
        let mut acc = Self::one();
        for i in (0..32 - exponent.leading_zeros()).rev() {
            acc = &acc * &acc;
            if (exponent >> i) & 1 == 1 {
                acc = &acc * self;
            }
        }
        acc
    }

    /// Uniform value in `[0, bound)`.
    pub fn random_below<R: Rng + ?Sized>(rng: &mut R, bound: &Self) -> Result<Self> {
        if bound.is_zero() || bound.negative {
            return Err(Error::InvalidModulus);
        }
        let bits = bound.bits();
        let words = bits.div_ceil(64);
        let top_mask = match bits % 64 {
            0 => u64::MAX,
            r => (1u64 << r) - 1,
        };
        loop {
            let mut limbs: Vec<u64> = (0..words).map(|_| rng.random::<u64>()).collect();
            if let Some(top) = limbs.last_mut() {
                *top &= top_mask;
            }
            let candidate = Self::from_parts(false, limbs);
            if candidate < *bound {
                return Ok(candidate);
            }
        }
    }

    /// Uniform value with exactly `bits` bits (top bit set).
    pub fn random_bits<R: Rng + ?Sized>(rng: &mut R, bits: usize) -> Self {
        if bits == 0 {
            return Self::zero();
        }
        let words = bits.div_ceil(64);
        let mut limbs: Vec<u64> = (0..words).map(|_| rng.random::<u64>()).collect();
        let top_bit = (bits - 1) % 64;
        let top = &mut limbs[words - 1];
        if top_bit < 63 {
            *top &= (1u64 << (top_bit + 1)) - 1;
        }
        *top |= 1u64 << top_bit;
        Self::from_parts(false, limbs)
    }

    /// Trial division by small primes followed by `rounds` Miller-Rabin
    /// witnesses.
    pub fn is_probable_prime<R: Rng + ?Sized>(&self, rounds: usize, rng: &mut R) -> bool {
        if self.negative || self.bits() < 2 {
            return false;
        }
        for &sp in SMALL_PRIMES.iter() {
            let (_, r) = div_rem_small(&self.limbs, sp);
            if r == 0 {
                return self.limbs == [sp];
            }
        }

        let n_minus_1 = self - &Self::one();
        let s = n_minus_1.trailing_zeros();
        let d = &n_minus_1 >> s;
        let two = Self::from(2u64);
        let span = self - &Self::from(3u64);

        'witness: for _ in 0..rounds {
            let Ok(offset) = Self::random_below(rng, &span) else {
                return false;
            };
            let a = &offset + &two;
            let Ok(mut x) = a.pow_mod(&d, self) else {
                return false;
            };
            if x.is_one() || x == n_minus_1 {
                continue;
            }
            for _ in 1..s {
                let Ok(next) = (&x * &x).modulo(self) else {
                    return false;
                };
                x = next;
                if x == n_minus_1 {
                    continue 'witness;
                }
            }
            return false;
        }
        true
    }
}

fn add_signed(a: &BigInt, b_limbs: &[u64], b_negative: bool) -> BigInt {
    if a.negative == b_negative {
        return BigInt::from_parts(a.negative, add_limbs(&a.limbs, b_limbs));
    }
    match cmp_limbs(&a.limbs, b_limbs) {
        Ordering::Equal => BigInt::zero(),
        Ordering::Greater => BigInt::from_parts(a.negative, sub_limbs(&a.limbs, b_limbs)),
        Ordering::Less => BigInt::from_parts(b_negative, sub_limbs(b_limbs, &a.limbs)),
    }
}

fn add_impl(a: &BigInt, b: &BigInt) -> BigInt {
    add_signed(a, &b.limbs, b.negative)
}

fn sub_impl(a: &BigInt, b: &BigInt) -> BigInt {
    add_signed(a, &b.limbs, !b.negative)
}

fn mul_impl(a: &BigInt, b: &BigInt) -> BigInt {
    BigInt::from_parts(a.negative != b.negative, mul_limbs(&a.limbs, &b.limbs))
}

macro_rules! forward_binop {
    ($trait:ident, $method:ident, $imp:ident) => {
        impl<'a, 'b> $trait<&'b BigInt> for &'a BigInt {
            type Output = BigInt;
            #[inline]
            fn $method(self, rhs: &'b BigInt) -> BigInt {
                $imp(self, rhs)
            }
        }

        impl<'a> $trait<&'a BigInt> for BigInt {
            type Output = BigInt;
            #[inline]
            fn $method(self, rhs: &'a BigInt) -> BigInt {
                $imp(&self, rhs)
            }
        }

        impl<'a> $trait<BigInt> for &'a BigInt {
            type Output = BigInt;
            #[inline]
            fn $method(self, rhs: BigInt) -> BigInt {
                $imp(self, &rhs)
            }
        }

        impl $trait for BigInt {
            type Output = BigInt;
            #[inline]
            fn $method(self, rhs: BigInt) -> BigInt {
                $imp(&self, &rhs)
            }
        }
    };
}

forward_binop!(Add, add, add_impl);
forward_binop!(Sub, sub, sub_impl);
forward_binop!(Mul, mul, mul_impl);

impl<'a> AddAssign<&'a BigInt> for BigInt {
    fn add_assign(&mut self, rhs: &'a BigInt) {
        *self = add_impl(self, rhs);
    }
}

impl<'a> SubAssign<&'a BigInt> for BigInt {
    fn sub_assign(&mut self, rhs: &'a BigInt) {
        *self = sub_impl(self, rhs);
    }
}

impl<'a> MulAssign<&'a BigInt> for BigInt {
    fn mul_assign(&mut self, rhs: &'a BigInt) {
        *self = mul_impl(self, rhs);
    }
}

impl Neg for BigInt {
    type Output = BigInt;
    fn neg(mut self) -> BigInt {
        self.negative = !self.negative && !self.limbs.is_empty();
        self
    }
}

impl<'a> Neg for &'a BigInt {
    type Output = BigInt;
    fn neg(self) -> BigInt {
        -self.clone()
    }
}

/// Shifts act on the magnitude and keep the sign.
impl<'a> Shl<usize> for &'a BigInt {
    type Output = BigInt;
    fn shl(self, bits: usize) -> BigInt {
        BigInt::from_parts(self.negative, shl_limbs(&self.limbs, bits))
    }
}

impl<'a> Shr<usize> for &'a BigInt {
    type Output = BigInt;
    fn shr(self, bits: usize) -> BigInt {
        BigInt::from_parts(self.negative, shr_limbs(&self.limbs, bits))
    }
}

impl Shl<usize> for BigInt {
    type Output = BigInt;
    fn shl(self, bits: usize) -> BigInt {
        &self << bits
    }
}

impl Shr<usize> for BigInt {
    type Output = BigInt;
    fn shr(self, bits: usize) -> BigInt {
        &self >> bits
    }
}

impl Ord for BigInt {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.negative, other.negative) {
            (false, true) => Ordering::Greater,
            (true, false) => Ordering::Less,
            (false, false) => cmp_limbs(&self.limbs, &other.limbs),
            (true, true) => cmp_limbs(&other.limbs, &self.limbs),
        }
    }
}

impl PartialOrd for BigInt {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl From<u64> for BigInt {
    fn from(v: u64) -> Self {
        Self::from_parts(false, vec![v])
    }
}

impl From<u32> for BigInt {
    fn from(v: u32) -> Self {
        Self::from(v as u64)
    }
}

impl From<i64> for BigInt {
    fn from(v: i64) -> Self {
        Self::from_parts(v < 0, vec![v.unsigned_abs()])
    }
}

impl From<&num_bigint::BigInt> for BigInt {
    fn from(v: &num_bigint::BigInt) -> Self {
        let (sign, bytes) = v.to_bytes_be();
        let mut out = Self::from_bytes_be(&bytes);
        out.negative = sign == Sign::Minus && !out.is_zero();
        out
    }
}

impl From<&BigInt> for num_bigint::BigInt {
    fn from(v: &BigInt) -> Self {
        let sign = if v.is_zero() {
            Sign::NoSign
        } else if v.negative {
            Sign::Minus
        } else {
            Sign::Plus
        };
        num_bigint::BigInt::from_bytes_be(sign, &v.to_bytes_be())
    }
}

impl FromStr for BigInt {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_str_radix(s, 10)
    }
}

impl fmt::Display for BigInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_str_radix(10))
    }
}

impl fmt::LowerHex for BigInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            f.write_str("0x")?;
        }
        f.write_str(&self.to_str_radix(16))
    }
}

impl fmt::Debug for BigInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BigInt({:#x})", self)
    }
}

impl Zeroize for BigInt {
    fn zeroize(&mut self) {
        self.limbs.zeroize();
        self.negative = false;
    }
}

impl Serialize for BigInt {
    fn serialize<S: Serializer>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_str_radix(16))
    }
}

impl<'de> Deserialize<'de> for BigInt {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> core::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_str_radix(&s, 16).map_err(D::Error::custom)
    }
}
