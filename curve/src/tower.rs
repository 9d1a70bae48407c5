//! Concrete extension towers built from the generic quadratic and cubic layers.
//!
//! BLS24: `Fp2 = Fp[i]/(i^2 + 1)`, `Fp4 = Fp2[v]/(v^2 - (1 + i))`,
//! `Fp8 = Fp4[w]/(w^2 - v)`, `Fp24 = Fp8[z]/(z^3 - w)`.
//!
//! BN: `Fp2 = Fp[i]/(i^2 + 1)`, `Fp6 = Fp2[v]/(v^3 - (9 + i))`,
//! `Fp12 = Fp6[w]/(w^2 - v)`.

use std::sync::Arc;

use crate::bigint::BigInt;
use crate::cubic::{Cubic, CubicContext};
use crate::error::Result;
use crate::field::FieldElement;
use crate::fp::{Fp, PrimeField};
use crate::quadratic::{Quadratic, QuadraticContext};

pub type Fp2 = Quadratic<Fp>;
pub type Fp4 = Quadratic<Fp2>;
pub type Fp8 = Quadratic<Fp4>;
pub type Fp24 = Cubic<Fp8>;

pub type Fp6 = Cubic<Fp2>;
pub type Fp12 = Quadratic<Fp6>;

pub type Fp2Context = QuadraticContext<Fp>;
pub type Fp4Context = QuadraticContext<Fp2>;
pub type Fp8Context = QuadraticContext<Fp4>;
pub type Fp24Context = CubicContext<Fp8>;
pub type Fp6Context = CubicContext<Fp2>;
pub type Fp12Context = QuadraticContext<Fp6>;

/// `Fp2 = Fp[i]/(i^2 + 1)`; needs `p = 3 mod 4`.
fn gaussian(fp: &Arc<PrimeField>) -> Result<Arc<Fp2Context>> {
    QuadraticContext::new(fp, Fp::one(fp).neg())
}

/// Fields of the degree-24 tower.
#[derive(Clone, Debug)]
pub struct Bls24Tower {
    pub fp: Arc<PrimeField>,
    pub fp2: Arc<Fp2Context>,
    pub fp4: Arc<Fp4Context>,
    pub fp8: Arc<Fp8Context>,
    pub fp24: Arc<Fp24Context>,
}

impl Bls24Tower {
    pub fn new(p: &BigInt) -> Result<Self> {
        let fp = PrimeField::new(p)?;
        let fp2 = gaussian(&fp)?;
        let one_plus_i = Fp2::new(&fp2, Fp::one(&fp), Fp::one(&fp));
        let fp4 = QuadraticContext::new(&fp2, one_plus_i)?;
        let fp8 = QuadraticContext::over_generator(&fp4)?;
        let fp24 = CubicContext::over_generator(&fp8)?;
        Ok(Bls24Tower {
            fp,
            fp2,
            fp4,
            fp8,
            fp24,
        })
    }

    pub fn fp(&self, value: &BigInt) -> Fp {
        Fp::new(&self.fp, value)
    }

    pub fn fp2(&self, c0: Fp, c1: Fp) -> Fp2 {
        Fp2::new(&self.fp2, c0, c1)
    }

    pub fn fp4(&self, c0: Fp2, c1: Fp2) -> Fp4 {
        Fp4::new(&self.fp4, c0, c1)
    }

    pub fn fp8(&self, c0: Fp4, c1: Fp4) -> Fp8 {
        Fp8::new(&self.fp8, c0, c1)
    }

    pub fn fp24(&self, c0: Fp8, c1: Fp8, c2: Fp8) -> Fp24 {
        Fp24::new(&self.fp24, c0, c1, c2)
    }
}

/// Fields of the degree-12 tower.
#[derive(Clone, Debug)]
pub struct Bn12Tower {
    pub fp: Arc<PrimeField>,
    pub fp2: Arc<Fp2Context>,
    pub fp6: Arc<Fp6Context>,
    pub fp12: Arc<Fp12Context>,
}

impl Bn12Tower {
    pub fn new(p: &BigInt) -> Result<Self> {
        let fp = PrimeField::new(p)?;
        let fp2 = gaussian(&fp)?;
        let xi = Fp2::new(&fp2, Fp::from_u64(&fp, 9), Fp::one(&fp));
        let fp6 = CubicContext::new(&fp2, xi)?;
        let fp12 = QuadraticContext::over_generator(&fp6)?;
        Ok(Bn12Tower {
            fp,
            fp2,
            fp6,
            fp12,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bls24::standard_modulus;
    use crate::field::Extension;
    use crate::random::RandomField;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::sync::OnceLock;

    fn bls24() -> &'static Bls24Tower {
        static TOWER: OnceLock<Bls24Tower> = OnceLock::new();
        TOWER.get_or_init(|| Bls24Tower::new(&standard_modulus()).unwrap())
    }

    fn bn254() -> &'static Bn12Tower {
        static TOWER: OnceLock<Bn12Tower> = OnceLock::new();
        TOWER.get_or_init(|| {
            let p = BigInt::from_str_radix(
                "30644e72e131a029b85045b68181585d97816a916871ca8d3c208c16d87cfd47",
                16,
            )
            .unwrap();
            Bn12Tower::new(&p).unwrap()
        })
    }

    fn check_field_axioms<F: RandomField>(ctx: &Arc<F::Context>, rng: &mut StdRng) {
        let a = F::random(ctx, rng);
        let b = F::random(ctx, rng);
        let c = F::random(ctx, rng);

        assert_eq!(a.mul(&b), b.mul(&a));
        assert_eq!(a.mul(&b.add(&c)), a.mul(&b).add(&a.mul(&c)));
        assert_eq!(a.mul(&b).mul(&c), a.mul(&b.mul(&c)));
        assert_eq!(a.square(), a.mul(&a));
        assert_eq!(a.sub(&b).add(&b), a);
        assert!(a.mul(&a.invert().unwrap()).is_one());
        assert_eq!(
            F::from_coefficients(ctx, &a.to_coefficients()).unwrap(),
            a
        );
    }

    fn check_frobenius<F: RandomField>(ctx: &Arc<F::Context>, rng: &mut StdRng) {
        let a = F::random(ctx, rng);
        let p = F::prime_field(ctx).modulus().clone();
        assert_eq!(a.frobenius(), a.pow(&p));
        assert_eq!(a.frobenius_pow(F::degree()), a);
        assert_eq!(a.conjugate(), a.frobenius_pow(F::degree() / 2));
    }

    fn check_sqrt<F: RandomField>(ctx: &Arc<F::Context>, rng: &mut StdRng) {
        let a = F::random(ctx, rng);
        let root = a.square().sqrt().unwrap();
        assert!(root == a || root == a.neg());
    }

    #[test]
    fn test_bls24_field_axioms() {
        let t = bls24();
        let mut rng = StdRng::seed_from_u64(42);
        check_field_axioms::<Fp2>(&t.fp2, &mut rng);
        check_field_axioms::<Fp4>(&t.fp4, &mut rng);
        check_field_axioms::<Fp8>(&t.fp8, &mut rng);
        check_field_axioms::<Fp24>(&t.fp24, &mut rng);
    }

    #[test]
    fn test_bls24_frobenius() {
        let t = bls24();
        let mut rng = StdRng::seed_from_u64(42);
        check_frobenius::<Fp2>(&t.fp2, &mut rng);
        check_frobenius::<Fp4>(&t.fp4, &mut rng);
        check_frobenius::<Fp8>(&t.fp8, &mut rng);
        check_frobenius::<Fp24>(&t.fp24, &mut rng);
    }

    #[test]
    fn test_bls24_sqrt() {
        let t = bls24();
        let mut rng = StdRng::seed_from_u64(7);
        check_sqrt::<Fp2>(&t.fp2, &mut rng);
        check_sqrt::<Fp4>(&t.fp4, &mut rng);
        check_sqrt::<Fp8>(&t.fp8, &mut rng);
    }

    #[test]
    fn test_tower_generators() {
        let t = bls24();
        let i = Fp2::generator(&t.fp2);
        assert_eq!(i.square(), Fp2::one(&t.fp2).neg());

        let w = Fp8::generator(&t.fp8);
        let v = Fp8::from_base(&t.fp8, Fp4::generator(&t.fp4));
        assert_eq!(w.square(), v);

        let z = Fp24::generator(&t.fp24);
        assert_eq!(z.square().mul(&z), Fp24::from_base(&t.fp24, w));
    }

    #[test]
    fn test_mul_by_generator() {
        let t = bls24();
        let mut rng = StdRng::seed_from_u64(11);
        let a = Fp24::random(&t.fp24, &mut rng);
        assert_eq!(a.mul_by_generator(), a.mul(&Fp24::generator(&t.fp24)));
        let b = Fp8::random(&t.fp8, &mut rng);
        assert_eq!(b.mul_by_generator(), b.mul(&Fp8::generator(&t.fp8)));
    }

    #[test]
    fn test_bn_tower() {
        let t = bn254();
        let mut rng = StdRng::seed_from_u64(42);
        check_field_axioms::<Fp6>(&t.fp6, &mut rng);
        check_field_axioms::<Fp12>(&t.fp12, &mut rng);
        check_frobenius::<Fp6>(&t.fp6, &mut rng);
        check_frobenius::<Fp12>(&t.fp12, &mut rng);
        check_sqrt::<Fp6>(&t.fp6, &mut rng);
    }

    #[test]
    fn test_zero_not_invertible() {
        let t = bls24();
        assert!(Fp24::zero(&t.fp24).invert().is_err());
        assert!(Fp8::zero(&t.fp8).invert().is_err());
    }

    #[test]
    fn test_rejects_square_nonresidue() {
        let t = bls24();
        let four = Fp2::from_fp(&t.fp2, &Fp::from_u64(&t.fp, 4));
        assert!(QuadraticContext::new(&t.fp2, four).is_err());

        let eight = Fp2::from_fp(&t.fp2, &Fp::from_u64(&t.fp, 8));
        assert!(CubicContext::new(&t.fp2, eight).is_err());
    }

    #[test]
    fn test_zeroize_reaches_every_coefficient() {
        use zeroize::Zeroize;
        let t = bls24();
        let mut rng = StdRng::seed_from_u64(8);
        let mut a = Fp24::random(&t.fp24, &mut rng);
        assert!(!a.is_zero());
        a.zeroize();
        assert!(a.is_zero());
        assert!(a.to_coefficients().iter().all(Fp::is_zero));
    }
}
