use std::sync::Arc;

use rand::Rng;

use crate::bigint::BigInt;
use crate::cubic::Cubic;
use crate::error::{Error, Result};
use crate::field::FieldElement;
use crate::fp::{Fp, PrimeField};
use crate::quadratic::Quadratic;

/// Helper trait for sampling uniformly random field elements.
pub trait RandomField: FieldElement {
    fn random<R: Rng + ?Sized>(ctx: &Arc<Self::Context>, rng: &mut R) -> Self;
}

impl RandomField for Fp {
    #[inline]
    fn random<R: Rng + ?Sized>(ctx: &Arc<PrimeField>, rng: &mut R) -> Self {
        let value = BigInt::random_below(rng, ctx.modulus()).unwrap_or_default();
        Fp::new(ctx, &value)
    }
}

impl<B: RandomField> RandomField for Quadratic<B> {
    fn random<R: Rng + ?Sized>(ctx: &Arc<Self::Context>, rng: &mut R) -> Self {
        let base = ctx.base();
        Quadratic::new(ctx, B::random(base, rng), B::random(base, rng))
    }
}

impl<B: RandomField> RandomField for Cubic<B> {
    fn random<R: Rng + ?Sized>(ctx: &Arc<Self::Context>, rng: &mut R) -> Self {
        let base = ctx.base();
        Cubic::new(
            ctx,
            B::random(base, rng),
            B::random(base, rng),
            B::random(base, rng),
        )
    }
}

/// Uniform scalar in `[1, order)`.
pub fn random_scalar<R: Rng + ?Sized>(rng: &mut R, order: &BigInt) -> Result<BigInt> {
    if *order <= BigInt::one() {
        return Err(Error::InvalidModulus);
    }
    let below = order - &BigInt::one();
    Ok(BigInt::random_below(rng, &below)? + BigInt::one())
}
