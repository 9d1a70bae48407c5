//! BLS24 curves `y^2 = x^3 + 6` and their groups.
//!
//! Everything is derived from the curve parameter `x`:
//!
//! - field prime `p = (x^10 - 2x^9 + x^8 - x^6 + 2x^5 - x^4 + x^2 + x + 1) / 3`
//! - group order `q = x^8 - x^4 + 1`
//! - trace `t = x + 1`
//!
//! G1 lives on the curve over Fp, G2 on a sextic twist over Fp4 and GT in
//! the norm-one subgroup of Fp24. Which twist (D or M) matches the tower and
//! which cube root of unity drives the GLV endomorphism are decided at setup
//! by testing a point.

use std::sync::Arc;

use log::debug;
use rand::rngs::StdRng;
use rand::SeedableRng;
use sha2::Sha256;

use crate::affine::{Affine, Curve};
use crate::bigint::BigInt;
use crate::chain::BLS24_G2_COFACTOR;
use crate::error::{Error, Result};
use crate::field::{Extension, FieldElement};
use crate::fp::{Fp, PrimeField};
use crate::group::Group;
use crate::hash::{hash_coefficients, hash_to_curve, hash_to_field, SessionKey, MAX_HASH_PROBES};
use crate::msm::{double_scalar_mul, multi_scalar_mul};
use crate::projective::Projective;
use crate::tower::{Bls24Tower, Fp2, Fp24, Fp4};
use crate::unitary::Unitary;

pub type G1 = Affine<Fp>;
pub type G2 = Affine<Fp4>;
pub type Gt = Unitary<Fp24>;

/// x = 0xE000000000058400, Hamming weight 7.
pub const STANDARD_PARAMETER: u64 = 0xE000_0000_0005_8400;

const CURVE_B: u64 = 6;
const PRIMALITY_ROUNDS: usize = 20;
const SETUP_TAG: &[u8] = b"pairkit bls24 setup";

/// How G2 sits inside E(Fp24).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Twist {
    /// `y^2 = x^3 + b / v`
    D,
    /// `y^2 = x^3 + b * v`
    M,
}

/// `sum coeffs[i] * x^i`
fn evaluate(x: &BigInt, coeffs: &[i64]) -> BigInt {
    coeffs
        .iter()
        .rev()
        .fold(BigInt::zero(), |acc, &c| &(&acc * x) + &BigInt::from(c))
}

pub(crate) fn modulus_for(x: &BigInt) -> Result<BigInt> {
    let numerator = evaluate(x, &[1, 1, 1, 0, -1, 2, -1, 0, 1, -2, 1]);
    let (p, rem) = numerator.div_rem(&BigInt::from(3u64))?;
    if !rem.is_zero() {
        return Err(Error::InvalidParameters("x does not give an integral field prime"));
    }
    Ok(p)
}

fn order_for(x: &BigInt) -> BigInt {
    evaluate(x, &[1, 0, 0, 0, -1, 0, 0, 0, 1])
}

#[cfg(test)]
pub(crate) fn standard_modulus() -> BigInt {
    modulus_for(&BigInt::from(STANDARD_PARAMETER)).unwrap()
}

/// ψ on the twist in Jacobian coordinates: Frobenius, then scale by the
/// twisting constants.
fn psi_projective(point: &Projective<Fp4>, psi: &[Fp4; 2]) -> Projective<Fp4> {
    if point.is_infinity() {
        return point.clone();
    }
    Projective::from_jacobian(
        point.curve(),
        point.x().frobenius().mul(&psi[0]),
        point.y().frobenius().mul(&psi[1]),
        point.z().frobenius(),
    )
}

fn clear_g2_cofactor(point: &Projective<Fp4>, x: &BigInt, psi: &[Fp4; 2]) -> Projective<Fp4> {
    BLS24_G2_COFACTOR.evaluate(point, |p| p.scalar_mul_windowed(x), |p| psi_projective(p, psi))
}

/// Hash to the twist: try `X = (x0 + k) * i` for k = 1, 2, ... then clear the
/// cofactor.
fn map_to_g2(curve: &Arc<Curve<Fp4>>, psi: &[Fp4; 2], x: &BigInt, data: &[u8]) -> Result<G2> {
    let fp4 = curve.field();
    let fp2 = Fp4::base_context(fp4);
    let fp = Fp2::base_context(fp2);
    let mut x0 = Fp::new(fp, &hash_to_field::<Sha256>(data, fp.modulus())?);
    let one = Fp::one(fp);

    for _ in 0..MAX_HASH_PROBES {
        x0 = x0.add(&one);
        let abscissa = Fp4::from_base(fp4, Fp2::new(fp2, Fp::zero(fp), x0.clone()));
        let Some(point) = Affine::from_x(curve, abscissa, false) else {
            continue;
        };
        let cleared = clear_g2_cofactor(&point.to_projective(), x, psi);
        if !cleared.is_infinity() {
            return Ok(cleared.to_affine());
        }
    }
    Err(Error::HashToPointExhausted {
        probes: MAX_HASH_PROBES,
    })
}

/// φ(x, y) = (βx, -y)
fn endomorphism(point: &G1, beta: &Fp) -> G1 {
    if point.is_infinity() {
        return point.clone();
    }
    Affine::new_unchecked(point.curve(), point.x().mul(beta), point.y().neg())
}

/// A BLS24 curve with every derived constant.
#[derive(Debug, Clone)]
pub struct Bls24 {
    x: BigInt,
    p: BigInt,
    q: BigInt,
    t: BigInt,
    g1_cofactor: BigInt,
    /// x^4, the eigenvalue of φ on G1
    x4: BigInt,
    tower: Bls24Tower,
    g1_curve: Arc<Curve<Fp>>,
    g2_curve: Arc<Curve<Fp4>>,
    twist: Twist,
    beta: Fp,
    psi: [Fp4; 2],
}

impl Bls24 {
    /// Curve for x = 0xE000000000058400.
    pub fn standard() -> Result<Self> {
        Self::new(&BigInt::from(STANDARD_PARAMETER))
    }

    pub fn new(x: &BigInt) -> Result<Self> {
        if x.is_negative() || x.bits() < 2 {
            return Err(Error::InvalidParameters("curve parameter must be positive"));
        }
        let p = modulus_for(x)?;
        let q = order_for(x);
        let t = x + &BigInt::one();

        let mut rng = StdRng::seed_from_u64(0);
        if !p.is_probable_prime(PRIMALITY_ROUNDS, &mut rng) || !q.is_probable_prime(PRIMALITY_ROUNDS, &mut rng) {
            return Err(Error::InvalidParameters("x does not give prime p and q"));
        }

        // #E(Fp) = p + 1 - t = q (x - 1)^2 / 3
        let n = &(&p + &BigInt::one()) - &t;
        let (g1_cofactor, rem) = n.div_rem(&q)?;
        if !rem.is_zero() {
            return Err(Error::InvalidParameters("q does not divide the curve order"));
        }

        let tower = Bls24Tower::new(&p)?;
        let g1_curve = Curve::new(Fp::zero(&tower.fp), Fp::from_u64(&tower.fp, CURVE_B))?;

        let probe = hash_to_curve::<Sha256>(&g1_curve, SETUP_TAG, &g1_cofactor)?;
        if !(&probe * &q).is_infinity() {
            return Err(Error::InvalidParameters("G1 has the wrong order"));
        }

        let x2 = x * x;
        let x4 = &x2 * &x2;
        let beta = Self::select_beta(&tower.fp, &probe, &x4)?;
        let (twist, g2_curve, psi) = Self::select_twist(&tower, x, &q)?;

        debug!(
            "bls24 setup: p has {} bits, q has {} bits, twist {:?}",
            p.bits(),
            q.bits(),
            twist
        );

        Ok(Bls24 {
            x: x.clone(),
            p,
            q,
            t,
            g1_cofactor,
            x4,
            tower,
            g1_curve,
            g2_curve,
            twist,
            beta,
            psi,
        })
    }

    /// Pick the cube root of unity β for which (βx, -y) = x^4 * (x, y).
    fn select_beta(fp: &Arc<PrimeField>, probe: &G1, x4: &BigInt) -> Result<Fp> {
        let (third, _) = (fp.modulus() - &BigInt::one()).div_rem(&BigInt::from(3u64))?;
        let omega = (2..64u64)
            .map(|g| Fp::from_u64(fp, g).pow(&third))
            .find(|w| !w.is_one())
            .ok_or(Error::InvalidParameters("no primitive cube root of unity"))?;

        let target = probe * x4;
        for beta in [omega.clone(), omega.square()] {
            if endomorphism(probe, &beta) == target {
                debug!("GLV endomorphism uses beta = {}", beta);
                return Ok(beta);
            }
        }
        Err(Error::InvalidParameters("no cube root of unity acts as x^4"))
    }

    /// Try both sextic twists and keep the one on which a hashed point,
    /// after cofactor clearing through ψ, has order q.
    fn select_twist(tower: &Bls24Tower, x: &BigInt, q: &BigInt) -> Result<(Twist, Arc<Curve<Fp4>>, [Fp4; 2])> {
        let p = tower.fp.modulus();
        let (third, _) = (p - &BigInt::one()).div_rem(&BigInt::from(3u64))?;
        let (half, _) = (p - &BigInt::one()).div_rem(&BigInt::from(2u64))?;

        let v = Fp4::generator(&tower.fp4);
        let b = Fp4::from_fp(&tower.fp4, &Fp::from_u64(&tower.fp, CURVE_B));
        let cx = v.pow(&third);
        let cy = v.pow(&half);

        for twist in [Twist::D, Twist::M] {
            let (b_twist, psi) = match twist {
                Twist::D => (b.mul(&v.invert()?), [cx.clone(), cy.clone()]),
                Twist::M => (b.mul(&v), [cx.invert()?, cy.invert()?]),
            };
            let curve = Curve::new(Fp4::zero(&tower.fp4), b_twist)?;
            let point = match map_to_g2(&curve, &psi, x, SETUP_TAG) {
                Ok(point) => point,
                Err(_) => continue,
            };
            if (&point * q).is_infinity() {
                debug!("selected the {:?}-type twist", twist);
                return Ok((twist, curve, psi));
            }
        }
        Err(Error::InvalidParameters("neither sextic twist carries G2"))
    }

    #[inline]
    pub fn param_x(&self) -> &BigInt {
        &self.x
    }

    /// Field prime p.
    #[inline]
    pub fn modulus(&self) -> &BigInt {
        &self.p
    }

    /// Prime group order q.
    #[inline]
    pub fn order(&self) -> &BigInt {
        &self.q
    }

    #[inline]
    pub fn trace(&self) -> &BigInt {
        &self.t
    }

    /// `#E(Fp) / q = (x - 1)^2 / 3`.
    #[inline]
    pub fn g1_cofactor(&self) -> &BigInt {
        &self.g1_cofactor
    }

    #[inline]
    pub fn tower(&self) -> &Bls24Tower {
        &self.tower
    }

    #[inline]
    pub fn g1_curve(&self) -> &Arc<Curve<Fp>> {
        &self.g1_curve
    }

    #[inline]
    pub fn g2_curve(&self) -> &Arc<Curve<Fp4>> {
        &self.g2_curve
    }

    #[inline]
    pub fn twist(&self) -> Twist {
        self.twist
    }

    /// Hash to an integer modulo q.
    pub fn hash_to_scalar(&self, data: &[u8]) -> Result<BigInt> {
        hash_to_field::<Sha256>(data, &self.q)
    }

    /// Hash an identity to a point of order q on the curve over Fp.
    pub fn hash_to_g1(&self, data: &[u8]) -> Result<G1> {
        hash_to_curve::<Sha256>(&self.g1_curve, data, &self.g1_cofactor)
    }

    /// Hash an identity to a point of order q on the twist over Fp4.
    pub fn hash_to_g2(&self, data: &[u8]) -> Result<G2> {
        map_to_g2(&self.g2_curve, &self.psi, &self.x, data)
    }

    /// The endomorphism ψ on G2, which acts as multiplication by p.
    pub fn psi(&self, point: &G2) -> G2 {
        psi_projective(&point.to_projective(), &self.psi).to_affine()
    }

    /// `e * point` on G1 via the GLV split `e = u0 + u1 x^4`.
    pub fn g1_mul(&self, point: &G1, e: &BigInt) -> Result<G1> {
        let e = e.modulo(&self.q)?;
        let (u1, u0) = e.div_rem(&self.x4)?;
        let image = endomorphism(point, &self.beta);
        Ok(double_scalar_mul(&point.to_projective(), &u0, &image.to_projective(), &u1).to_affine())
    }

    /// Base-x digits `e = sum u_i x^i`, eight of them for e < q.
    fn x_digits(&self, e: &BigInt) -> Result<Vec<BigInt>> {
        let mut rest = e.modulo(&self.q)?;
        let mut digits = Vec::with_capacity(8);
        for _ in 0..8 {
            let (quotient, digit) = rest.div_rem(&self.x)?;
            digits.push(digit);
            rest = quotient;
        }
        Ok(digits)
    }

    /// `e * point` on G2 with ψ^i standing in for p^i = x^i.
    pub fn g2_mul(&self, point: &G2, e: &BigInt) -> Result<G2> {
        let digits = self.x_digits(e)?;
        let mut bases = Vec::with_capacity(8);
        bases.push(point.to_projective());
        for i in 1..8 {
            let next = psi_projective(&bases[i - 1], &self.psi);
            bases.push(next);
        }
        Ok(multi_scalar_mul(&bases, &digits).to_affine())
    }

    /// `value^e` in GT with the Frobenius standing in for x.
    pub fn gt_pow(&self, value: &Gt, e: &BigInt) -> Result<Gt> {
        let digits = self.x_digits(e)?;
        let mut bases = Vec::with_capacity(8);
        bases.push(value.clone());
        for i in 1..8 {
            let next = bases[i - 1].frobenius();
            bases.push(next);
        }
        Ok(multi_scalar_mul(&bases, &digits))
    }

    /// SHA-256 over the first Fp8 component of a GT value.
    pub fn derive_key(&self, value: &Gt) -> SessionKey {
        hash_coefficients(&value.value().c0().to_coefficients())
    }
}
