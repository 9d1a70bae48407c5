//! Field capability shared by the prime field and every tower level.
//!
//! Arithmetic is exposed as named methods taking references so that generic
//! tower code can combine sub-elements without cloning them first.

use core::fmt::Debug;
use std::sync::Arc;

use crate::bigint::BigInt;
use crate::error::Result;
use crate::fp::{Fp, PrimeField};

pub trait FieldElement: Sized + Clone + PartialEq + Eq + Debug + Send + Sync {
    /// Immutable constants the element's arithmetic depends on.
    type Context: Debug + Send + Sync;

    fn zero(ctx: &Arc<Self::Context>) -> Self;
    fn one(ctx: &Arc<Self::Context>) -> Self;
    fn context(&self) -> &Arc<Self::Context>;

    /// The prime field at the bottom of the tower.
    fn prime_field(ctx: &Arc<Self::Context>) -> &Arc<PrimeField>;

    /// Extension degree over the prime field.
    fn degree() -> usize;

    /// Embed a prime-field value.
    fn from_fp(ctx: &Arc<Self::Context>, value: &Fp) -> Self;

    fn is_zero(&self) -> bool;
    fn is_one(&self) -> bool;

    fn add(&self, rhs: &Self) -> Self;
    fn sub(&self, rhs: &Self) -> Self;
    fn mul(&self, rhs: &Self) -> Self;
    fn neg(&self) -> Self;

    fn double(&self) -> Self {
        self.add(self)
    }

    fn square(&self) -> Self {
        self.mul(self)
    }

    /// Multiply every coefficient by a prime-field scalar.
    fn mul_fp(&self, scalar: &Fp) -> Self;

    /// Multiplicative inverse; zero is not invertible.
    fn invert(&self) -> Result<Self>;

    /// `self^p`, computed from precomputed constants.
    fn frobenius(&self) -> Self;

    fn frobenius_pow(&self, k: usize) -> Self {
        let mut out = self.clone();
        for _ in 0..(k % Self::degree()) {
            out = out.frobenius();
        }
        out
    }

    /// The Galois automorphism of order two over the half-degree subfield.
    fn conjugate(&self) -> Self;

    fn sqrt(&self) -> Option<Self>;

    /// Append the prime-field coordinates, lowest tower component first.
    fn coefficients(&self, out: &mut Vec<Fp>);

    fn from_coefficients(ctx: &Arc<Self::Context>, coeffs: &[Fp]) -> Result<Self>;

    fn to_coefficients(&self) -> Vec<Fp> {
        let mut out = Vec::with_capacity(Self::degree());
        self.coefficients(&mut out);
        out
    }

    /// Square-and-multiply. Only the magnitude of `exponent` is used.
    fn pow(&self, exponent: &BigInt) -> Self {
        let mut acc = Self::one(self.context());
        for i in (0..exponent.bits()).rev() {
            acc = acc.square();
            if exponent.bit(i) {
                acc = acc.mul(self);
            }
        }
        acc
    }

    /// Parity of the first non-zero coordinate; picks a canonical square root.
    fn sgn0(&self) -> bool {
        self.to_coefficients()
            .iter()
            .find(|c| !c.is_zero())
            .is_some_and(Fp::is_odd)
    }

    /// `p^degree`, the number of elements.
    fn order(ctx: &Arc<Self::Context>) -> BigInt {
        let degree = u32::try_from(Self::degree()).unwrap_or(u32::MAX);
        Self::prime_field(ctx).modulus().pow(degree)
    }
}

/// A tower level obtained by adjoining a root of `u^n - xi` to `Base`.
pub trait Extension: FieldElement {
    type Base: FieldElement;

    /// The adjoined root `u`.
    fn generator(ctx: &Arc<Self::Context>) -> Self;

    /// Multiply by `u`. Cheaper than a full multiplication.
    fn mul_by_generator(&self) -> Self;

    fn from_base(ctx: &Arc<Self::Context>, value: Self::Base) -> Self;

    fn base_context(ctx: &Arc<Self::Context>) -> &Arc<<Self::Base as FieldElement>::Context>;

    /// Multiply every component by a base-field element.
    fn mul_base(&self, scalar: &Self::Base) -> Self;
}

/// Tonelli-Shanks square root in a field with `order_minus_one + 1` elements.
///
/// Returns `None` when `a` is not a square.
pub fn tonelli_shanks<F: FieldElement>(a: &F, order_minus_one: &BigInt, nonresidue: &F) -> Option<F> {
    if a.is_zero() {
        return Some(a.clone());
    }
    let s = order_minus_one.trailing_zeros();
    let t = order_minus_one >> s;
    let half = &(&t + &BigInt::one()) >> 1;

    let mut c = nonresidue.pow(&t);
    let mut x = a.pow(&half);
    let mut b = a.pow(&t);
    let mut m = s;

    while !b.is_one() {
        let mut i = 0;
        let mut probe = b.clone();
        while !probe.is_one() {
            probe = probe.square();
            i += 1;
            if i == m {
                return None;
            }
        }
        let mut g = c.clone();
        for _ in 0..(m - i - 1) {
            g = g.square();
        }
        x = x.mul(&g);
        c = g.square();
        b = b.mul(&c);
        m = i;
    }
    Some(x)
}

/// `true` when `value^((|F| - 1) / n) == 1`, i.e. `value` is an n-th power.
pub(crate) fn is_nth_power<F: FieldElement>(value: &F, n: u64) -> Result<bool> {
    let order_minus_one = F::order(value.context()) - BigInt::one();
    let (exponent, rem) = order_minus_one.div_rem(&BigInt::from(n))?;
    if !rem.is_zero() {
        return Err(crate::error::Error::InvalidParameters(
            "field order does not admit the requested residue test",
        ));
    }
    Ok(value.pow(&exponent).is_one())
}
