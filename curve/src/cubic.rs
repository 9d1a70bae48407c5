//! Cubic extension `B[z] / (z^3 - xi)`.

use core::fmt::{self, Debug, Formatter};
use std::sync::{Arc, OnceLock};

use log::debug;
use zeroize::Zeroize;

use crate::bigint::BigInt;
use crate::error::{Error, Result};
use crate::field::{is_nth_power, tonelli_shanks, Extension, FieldElement};
use crate::fp::{Fp, PrimeField};

/// Constants for one cubic tower level.
pub struct CubicContext<B: FieldElement> {
    base: Arc<B::Context>,
    fp: Arc<PrimeField>,
    nonresidue: B,
    mul_nonresidue: fn(&B, &B) -> B,
    /// xi^((p - 1) / 3): z^p = frobenius[0] z, z^(2p) = frobenius[1] z^2
    frobenius: [B; 2],
    /// z^(p^(k/2)) = conjugate[0] z where k is the degree over Fp
    conjugate: [B; 2],
    /// Coordinates of a non-square, found on first use by `sqrt`.
    non_square: OnceLock<Option<[B; 3]>>,
}

fn multiply_by<B: FieldElement>(x: &B, nonresidue: &B) -> B {
    x.mul(nonresidue)
}

fn shift_by<B: Extension>(x: &B, _nonresidue: &B) -> B {
    x.mul_by_generator()
}

impl<B: FieldElement> Debug for CubicContext<B> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("CubicContext")
            .field("nonresidue", &self.nonresidue)
            .field("frobenius", &self.frobenius)
            .finish()
    }
}

impl<B: FieldElement> CubicContext<B> {
    /// Adjoin a cube root of `nonresidue`, which must not be a cube in `B`.
    pub fn new(base: &Arc<B::Context>, nonresidue: B) -> Result<Arc<Self>> {
        Self::build(base, nonresidue, multiply_by::<B>)
    }

    fn build(base: &Arc<B::Context>, nonresidue: B, mul_nonresidue: fn(&B, &B) -> B) -> Result<Arc<Self>> {
        if B::degree() % 2 != 0 {
            return Err(Error::InvalidParameters("cubic layer needs a base of even degree"));
        }
        let fp = Arc::clone(B::prime_field(base));
        let (third, rem) = (fp.modulus() - &BigInt::one()).div_rem(&BigInt::from(3u64))?;
        if !rem.is_zero() {
            return Err(Error::InvalidParameters("cubic layer needs p = 1 mod 3"));
        }
        if nonresidue.is_zero() || is_nth_power(&nonresidue, 3)? {
            return Err(Error::InvalidParameters("cubic layer needs a non-cube"));
        }

        let gamma = nonresidue.pow(&third);
        let frobenius = [gamma.clone(), gamma.square()];

        let half = 3 * B::degree() / 2;
        let mut kappa = gamma.clone();
        let mut step = gamma;
        for _ in 1..half {
            step = step.frobenius();
            kappa = kappa.mul(&step);
        }
        let conjugate = [kappa.clone(), kappa.square()];
        debug!("cubic layer of degree {} over Fp", 3 * B::degree());

        Ok(Arc::new(CubicContext {
            base: Arc::clone(base),
            fp,
            nonresidue,
            mul_nonresidue,
            frobenius,
            conjugate,
            non_square: OnceLock::new(),
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

impl<B: Extension> CubicContext<B> {
    /// Adjoin a cube root of the generator of `B`.
    pub fn over_generator(base: &Arc<B::Context>) -> Result<Arc<Self>> {
        Self::build(base, B::generator(base), shift_by::<B>)
    }
}

/// Element `c0 + c1 * z + c2 * z^2`.
#[derive(Clone)]
pub struct Cubic<B: FieldElement> {
    c0: B,
    c1: B,
    c2: B,
    ctx: Arc<CubicContext<B>>,
}

impl<B: FieldElement> Cubic<B> {
    pub fn new(ctx: &Arc<CubicContext<B>>, c0: B, c1: B, c2: B) -> Self {
        Cubic {
            c0,
            c1,
            c2,
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

    #[inline]
    pub fn c2(&self) -> &B {
        &self.c2
    }

    fn with(&self, c0: B, c1: B, c2: B) -> Self {
        Cubic {
            c0,
            c1,
            c2,
            ctx: Arc::clone(&self.ctx),
        }
    }

    fn non_square(&self) -> Option<Self> {
        let ctx = &self.ctx;
        let coords = ctx.non_square.get_or_init(|| {
            let fp = B::prime_field(&ctx.base);
            (1..=64u64).find_map(|k| {
                let candidate = Cubic::new(
                    ctx,
                    B::from_fp(&ctx.base, &Fp::from_u64(fp, k)),
                    B::one(&ctx.base),
                    B::zero(&ctx.base),
                );
                match is_nth_power(&candidate, 2) {
                    Ok(false) => Some([candidate.c0, candidate.c1, candidate.c2]),
                    _ => None,
                }
            })
        });
        coords
            .as_ref()
            .map(|[c0, c1, c2]| self.with(c0.clone(), c1.clone(), c2.clone()))
    }
}

impl<B: FieldElement> FieldElement for Cubic<B> {
    type Context = CubicContext<B>;

    fn zero(ctx: &Arc<Self::Context>) -> Self {
        let zero = B::zero(&ctx.base);
        Self::new(ctx, zero.clone(), zero.clone(), zero)
    }

    fn one(ctx: &Arc<Self::Context>) -> Self {
        let zero = B::zero(&ctx.base);
        Self::new(ctx, B::one(&ctx.base), zero.clone(), zero)
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
        3 * B::degree()
    }

    fn from_fp(ctx: &Arc<Self::Context>, value: &Fp) -> Self {
        let zero = B::zero(&ctx.base);
        Self::new(ctx, B::from_fp(&ctx.base, value), zero.clone(), zero)
    }

    fn is_zero(&self) -> bool {
        self.c0.is_zero() && self.c1.is_zero() && self.c2.is_zero()
    }

    fn is_one(&self) -> bool {
        self.c0.is_one() && self.c1.is_zero() && self.c2.is_zero()
    }

    fn add(&self, rhs: &Self) -> Self {
        self.with(
            self.c0.add(&rhs.c0),
            self.c1.add(&rhs.c1),
            self.c2.add(&rhs.c2),
        )
    }

    fn sub(&self, rhs: &Self) -> Self {
        self.with(
            self.c0.sub(&rhs.c0),
            self.c1.sub(&rhs.c1),
            self.c2.sub(&rhs.c2),
        )
    }

    // Karatsuba: six base multiplications
    fn mul(&self, rhs: &Self) -> Self {
        let v0 = self.c0.mul(&rhs.c0);
        let v1 = self.c1.mul(&rhs.c1);
        let v2 = self.c2.mul(&rhs.c2);

        let t12 = self
            .c1
            .add(&self.c2)
            .mul(&rhs.c1.add(&rhs.c2))
            .sub(&v1)
            .sub(&v2);
        let t01 = self
            .c0
            .add(&self.c1)
            .mul(&rhs.c0.add(&rhs.c1))
            .sub(&v0)
            .sub(&v1);
        let t02 = self
            .c0
            .add(&self.c2)
            .mul(&rhs.c0.add(&rhs.c2))
            .sub(&v0)
            .sub(&v2);

        self.with(
            v0.add(&self.ctx.times_nonresidue(&t12)),
            t01.add(&self.ctx.times_nonresidue(&v2)),
            t02.add(&v1),
        )
    }

    fn neg(&self) -> Self {
        self.with(self.c0.neg(), self.c1.neg(), self.c2.neg())
    }

    // Chung-Hasan SQR2
    fn square(&self) -> Self {
        let s0 = self.c0.square();
        let s1 = self.c0.mul(&self.c1).double();
        let s2 = self.c0.sub(&self.c1).add(&self.c2).square();
        let s3 = self.c1.mul(&self.c2).double();
        let s4 = self.c2.square();

        self.with(
            s0.add(&self.ctx.times_nonresidue(&s3)),
            s1.add(&self.ctx.times_nonresidue(&s4)),
            s1.add(&s2).add(&s3).sub(&s0).sub(&s4),
        )
    }

    fn mul_fp(&self, scalar: &Fp) -> Self {
        self.with(
            self.c0.mul_fp(scalar),
            self.c1.mul_fp(scalar),
            self.c2.mul_fp(scalar),
        )
    }

    fn invert(&self) -> Result<Self> {
        let ctx = &self.ctx;
        let a = self.c0.square().sub(&ctx.times_nonresidue(&self.c1.mul(&self.c2)));
        let b = ctx
            .times_nonresidue(&self.c2.square())
            .sub(&self.c0.mul(&self.c1));
        let c = self.c1.square().sub(&self.c0.mul(&self.c2));

        let det = self
            .c0
            .mul(&a)
            .add(&ctx.times_nonresidue(&self.c2.mul(&b).add(&self.c1.mul(&c))));
        let inv = det.invert()?;
        Ok(self.with(a.mul(&inv), b.mul(&inv), c.mul(&inv)))
    }

    fn frobenius(&self) -> Self {
        let [g1, g2] = &self.ctx.frobenius;
        self.with(
            self.c0.frobenius(),
            self.c1.frobenius().mul(g1),
            self.c2.frobenius().mul(g2),
        )
    }

    fn conjugate(&self) -> Self {
        let [k1, k2] = &self.ctx.conjugate;
        self.with(
            self.c0.conjugate(),
            self.c1.conjugate().mul(k1),
            self.c2.conjugate().mul(k2),
        )
    }

    fn sqrt(&self) -> Option<Self> {
        if self.is_zero() {
            return Some(self.clone());
        }
        let order_minus_one = Self::order(&self.ctx) - BigInt::one();
        let root = tonelli_shanks(self, &order_minus_one, &self.non_square()?)?;
        (root.square() == *self).then_some(root)
    }

    fn coefficients(&self, out: &mut Vec<Fp>) {
        self.c0.coefficients(out);
        self.c1.coefficients(out);
        self.c2.coefficients(out);
    }

    fn from_coefficients(ctx: &Arc<Self::Context>, coeffs: &[Fp]) -> Result<Self> {
        if coeffs.len() != Self::degree() {
            return Err(Error::InvalidLength);
        }
        let d = B::degree();
        Ok(Self::new(
            ctx,
            B::from_coefficients(&ctx.base, &coeffs[..d])?,
            B::from_coefficients(&ctx.base, &coeffs[d..2 * d])?,
            B::from_coefficients(&ctx.base, &coeffs[2 * d..])?,
        ))
    }
}

impl<B: FieldElement> Extension for Cubic<B> {
    type Base = B;

    fn generator(ctx: &Arc<Self::Context>) -> Self {
        let zero = B::zero(&ctx.base);
        Self::new(ctx, zero.clone(), B::one(&ctx.base), zero)
    }

    fn mul_by_generator(&self) -> Self {
        self.with(
            self.ctx.times_nonresidue(&self.c2),
            self.c0.clone(),
            self.c1.clone(),
        )
    }

    fn from_base(ctx: &Arc<Self::Context>, value: B) -> Self {
        let zero = B::zero(&ctx.base);
        Self::new(ctx, value, zero.clone(), zero)
    }

    #[inline]
    fn base_context(ctx: &Arc<Self::Context>) -> &Arc<B::Context> {
        &ctx.base
    }

    fn mul_base(&self, scalar: &B) -> Self {
        self.with(
            self.c0.mul(scalar),
            self.c1.mul(scalar),
            self.c2.mul(scalar),
        )
    }
}

impl<B: FieldElement> PartialEq for Cubic<B> {
    fn eq(&self, other: &Self) -> bool {
        self.c0 == other.c0 && self.c1 == other.c1 && self.c2 == other.c2
    }
}

impl<B: FieldElement> Eq for Cubic<B> {}

impl<B: FieldElement + Zeroize> Zeroize for Cubic<B> {
    fn zeroize(&mut self) {
        self.c0.zeroize();
        self.c1.zeroize();
        self.c2.zeroize();
    }
}

impl<B: FieldElement> Debug for Cubic<B> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "[{:?}, {:?}, {:?}]", self.c0, self.c1, self.c2)
    }
}
