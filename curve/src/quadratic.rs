//! Quadratic extension `B[u] / (u^2 - xi)`.

use core::fmt::{self, Debug, Formatter};
use std::sync::Arc;

use log::debug;
use zeroize::Zeroize;

use crate::bigint::BigInt;
use crate::error::{Error, Result};
use crate::field::{is_nth_power, Extension, FieldElement};
use crate::fp::{Fp, PrimeField};

/// Constants for one quadratic tower level.
pub struct QuadraticContext<B: FieldElement> {
    base: Arc<B::Context>,
    fp: Arc<PrimeField>,
    nonresidue: B,
    /// xi^((p - 1) / 2), so that u^p = frobenius * u
    frobenius: B,
    mul_nonresidue: fn(&B, &B) -> B,
    two_inv: Fp,
}

fn negate_by<B: FieldElement>(x: &B, _nonresidue: &B) -> B {
    x.neg()
}

fn multiply_by<B: FieldElement>(x: &B, nonresidue: &B) -> B {
    x.mul(nonresidue)
}

fn shift_by<B: Extension>(x: &B, _nonresidue: &B) -> B {
    x.mul_by_generator()
}

impl<B: FieldElement> Debug for QuadraticContext<B> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuadraticContext")
            .field("nonresidue", &self.nonresidue)
            .field("frobenius", &self.frobenius)
            .finish()
    }
}

impl<B: FieldElement> QuadraticContext<B> {
    /// Adjoin a square root of `nonresidue`, which must not be a square in `B`.
    pub fn new(base: &Arc<B::Context>, nonresidue: B) -> Result<Arc<Self>> {
        let minus_one = B::one(base).neg();
        let mul_nonresidue = if nonresidue == minus_one {
            negate_by::<B> as fn(&B, &B) -> B
        } else {
            multiply_by::<B>
        };
        Self::build(base, nonresidue, mul_nonresidue)
    }

    fn build(base: &Arc<B::Context>, nonresidue: B, mul_nonresidue: fn(&B, &B) -> B) -> Result<Arc<Self>> {
        if nonresidue.is_zero() || is_nth_power(&nonresidue, 2)? {
            return Err(Error::InvalidParameters("quadratic layer needs a non-square"));
        }
        let fp = Arc::clone(B::prime_field(base));
        let (half, _) = (fp.modulus() - &BigInt::one()).div_rem(&BigInt::from(2u64))?;
        let frobenius = nonresidue.pow(&half);
        let two_inv = Fp::from_u64(&fp, 2).invert()?;
        debug!("quadratic layer of degree {} over Fp", 2 * B::degree());

        Ok(Arc::new(QuadraticContext {
            base: Arc::clone(base),
            fp,
            nonresidue,
            frobenius,
            mul_nonresidue,
            two_inv,
        }))
    }

    #[inline]
    pub fn nonresidue(&self) -> &B {
        &self.nonresidue
    }

    #[inline]
    pub fn base(&self) -> &Arc<B::Context> {
        &self.base
    }

    #[inline]
    fn times_nonresidue(&self, x: &B) -> B {
        (self.mul_nonresidue)(x, &self.nonresidue)
    }
}

impl<B: Extension> QuadraticContext<B> {
    /// Adjoin a square root of the generator of `B`.
    pub fn over_generator(base: &Arc<B::Context>) -> Result<Arc<Self>> {
        Self::build(base, B::generator(base), shift_by::<B>)
    }
}

/// Element `c0 + c1 * u`.
#[derive(Clone)]
pub struct Quadratic<B: FieldElement> {
    c0: B,
    c1: B,
    ctx: Arc<QuadraticContext<B>>,
}

impl<B: FieldElement> Quadratic<B> {
    pub fn new(ctx: &Arc<QuadraticContext<B>>, c0: B, c1: B) -> Self {
        Quadratic {
            c0,
            c1,
            ctx: Arc::clone(ctx),
        }
    }

    #[inline]
    pub fn c0(&self) -> &B {
        &self.c0
    }

    #[inline]
    pub fn c1(&self) -> &B {
        &self.c1
    }

    fn with(&self, c0: B, c1: B) -> Self {
        Quadratic {
            c0,
            c1,
            ctx: Arc::clone(&self.ctx),
        }
    }

    /// `c0^2 - xi * c1^2`, the norm down to `B`.
    pub fn norm(&self) -> B {
        self.c0
            .square()
            .sub(&self.ctx.times_nonresidue(&self.c1.square()))
    }
}

impl<B: FieldElement> FieldElement for Quadratic<B> {
    type Context = QuadraticContext<B>;

    fn zero(ctx: &Arc<Self::Context>) -> Self {
        Self::new(ctx, B::zero(&ctx.base), B::zero(&ctx.base))
    }

    fn one(ctx: &Arc<Self::Context>) -> Self {
        Self::new(ctx, B::one(&ctx.base), B::zero(&ctx.base))
    }

    #[inline]
    fn context(&self) -> &Arc<Self::Context> {
        &self.ctx
    }

    #[inline]
    fn prime_field(ctx: &Arc<Self::Context>) -> &Arc<PrimeField> {
        &ctx.fp
    }

    #[inline]
    fn degree() -> usize {
        2 * B::degree()
    }

    fn from_fp(ctx: &Arc<Self::Context>, value: &Fp) -> Self {
        Self::new(ctx, B::from_fp(&ctx.base, value), B::zero(&ctx.base))
    }

    fn is_zero(&self) -> bool {
        self.c0.is_zero() && self.c1.is_zero()
    }

    fn is_one(&self) -> bool {
        self.c0.is_one() && self.c1.is_zero()
    }

    fn add(&self, rhs: &Self) -> Self {
        self.with(self.c0.add(&rhs.c0), self.c1.add(&rhs.c1))
    }

    fn sub(&self, rhs: &Self) -> Self {
        self.with(self.c0.sub(&rhs.c0), self.c1.sub(&rhs.c1))
    }

    // Karatsuba: three base multiplications
    fn mul(&self, rhs: &Self) -> Self {
        let v0 = self.c0.mul(&rhs.c0);
        let v1 = self.c1.mul(&rhs.c1);
        let cross = self
            .c0
            .add(&self.c1)
            .mul(&rhs.c0.add(&rhs.c1))
            .sub(&v0)
            .sub(&v1);
        self.with(v0.add(&self.ctx.times_nonresidue(&v1)), cross)
    }

    fn neg(&self) -> Self {
        self.with(self.c0.neg(), self.c1.neg())
    }

    // (a + b)(a + xi b) - ab - xi ab = a^2 + xi b^2
    fn square(&self) -> Self {
        let ab = self.c0.mul(&self.c1);
        let t = self
            .c0
            .add(&self.c1)
            .mul(&self.c0.add(&self.ctx.times_nonresidue(&self.c1)));
        let c0 = t.sub(&ab).sub(&self.ctx.times_nonresidue(&ab));
        self.with(c0, ab.double())
    }

    fn mul_fp(&self, scalar: &Fp) -> Self {
        self.with(self.c0.mul_fp(scalar), self.c1.mul_fp(scalar))
    }

    fn invert(&self) -> Result<Self> {
        let inv = self.norm().invert()?;
        Ok(self.with(self.c0.mul(&inv), self.c1.mul(&inv).neg()))
    }

    fn frobenius(&self) -> Self {
        self.with(
            self.c0.frobenius(),
            self.c1.frobenius().mul(&self.ctx.frobenius),
        )
    }

    fn conjugate(&self) -> Self {
        self.with(self.c0.clone(), self.c1.neg())
    }

    // Norm-based square root: with s^2 = N(a), one of (c0 +- s) / 2 is a
    // square x0^2 in B, and x1 = c1 / (2 x0).
    fn sqrt(&self) -> Option<Self> {
        if self.c1.is_zero() {
            if let Some(s) = self.c0.sqrt() {
                return Some(self.with(s, B::zero(&self.ctx.base)));
            }
            let scaled = self.c0.mul(&self.ctx.nonresidue.invert().ok()?);
            let s = scaled.sqrt()?;
            return Some(self.with(B::zero(&self.ctx.base), s));
        }

        let s = self.norm().sqrt()?;
        let half = &self.ctx.two_inv;
        let x0 = match self.c0.add(&s).mul_fp(half).sqrt() {
            Some(x0) if !x0.is_zero() => x0,
            _ => self.c0.sub(&s).mul_fp(half).sqrt()?,
        };
        let x1 = self.c1.mul(&x0.double().invert().ok()?);
        let root = self.with(x0, x1);
        (root.square() == *self).then_some(root)
    }

    fn coefficients(&self, out: &mut Vec<Fp>) {
        self.c0.coefficients(out);
        self.c1.coefficients(out);
    }

    fn from_coefficients(ctx: &Arc<Self::Context>, coeffs: &[Fp]) -> Result<Self> {
        if coeffs.len() != Self::degree() {
            return Err(Error::InvalidLength);
        }
        let (lo, hi) = coeffs.split_at(B::degree());
        Ok(Self::new(
            ctx,
            B::from_coefficients(&ctx.base, lo)?,
            B::from_coefficients(&ctx.base, hi)?,
        ))
    }
}

impl<B: FieldElement> Extension for Quadratic<B> {
    type Base = B;

    fn generator(ctx: &Arc<Self::Context>) -> Self {
        Self::new(ctx, B::zero(&ctx.base), B::one(&ctx.base))
    }

    fn mul_by_generator(&self) -> Self {
        self.with(self.ctx.times_nonresidue(&self.c1), self.c0.clone())
    }

    fn from_base(ctx: &Arc<Self::Context>, value: B) -> Self {
        Self::new(ctx, value, B::zero(&ctx.base))
    }

    #[inline]
    fn base_context(ctx: &Arc<Self::Context>) -> &Arc<B::Context> {
        &ctx.base
    }

    fn mul_base(&self, scalar: &B) -> Self {
        self.with(self.c0.mul(scalar), self.c1.mul(scalar))
    }
}

impl<B: FieldElement> PartialEq for Quadratic<B> {
    fn eq(&self, other: &Self) -> bool {
        self.c0 == other.c0 && self.c1 == other.c1
    }
}

impl<B: FieldElement> Eq for Quadratic<B> {}

impl<B: FieldElement + Zeroize> Zeroize for Quadratic<B> {
    fn zeroize(&mut self) {
        self.c0.zeroize();
        self.c1.zeroize();
    }
}

impl<B: FieldElement> Debug for Quadratic<B> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "[{:?}, {:?}]", self.c0, self.c1)
    }
}
