//! Optimal ate pairing on BLS24 curves.
//!
//! `e(P, Q)` for P in G1 and Q in G2 is the Miller loop over the bits of x
//! followed by the final exponentiation to `(p^24 - 1) / q`. The hard part
//! uses three times the minimal exponent, which keeps the result bilinear.

use crate::bls24::{Bls24, Twist, G1, G2, Gt};
use crate::chain::BLS24_HARD_PART;
use crate::field::FieldElement;
use crate::tower::{Fp24, Fp4, Fp8};
use crate::unitary::Unitary;

impl Bls24 {
    /// Line through `a` with slope `lambda` on the twist, evaluated at the
    /// untwisted image of `p`.
    fn line(&self, a: &G2, lambda: &Fp4, p: &G1) -> Fp24 {
        let tower = self.tower();
        let qy = Fp4::from_fp(&tower.fp4, p.y());
        let slope_x = lambda.mul_fp(p.x());

        let (c0, c1, c2) = match self.twist() {
            Twist::D => (
                Fp8::new(&tower.fp8, qy.neg(), a.y().sub(&lambda.mul(a.x()))),
                Fp8::new(&tower.fp8, slope_x, Fp4::zero(&tower.fp4)),
                Fp8::zero(&tower.fp8),
            ),
            Twist::M => (
                Fp8::new(&tower.fp8, lambda.mul(a.x()).sub(a.y()), qy),
                Fp8::zero(&tower.fp8),
                Fp8::new(&tower.fp8, slope_x.neg(), Fp4::zero(&tower.fp4)),
            ),
        };
        Fp24::new(&tower.fp24, c0, c1, c2)
    }

    /// Add `b` to `a` and return the line used, or one when the line is
    /// vertical or the sum is the identity.
    fn line_step(&self, a: &G2, b: &G2, p: &G1) -> (G2, Fp24) {
        let (sum, lambda) = a.add_with_slope(b);
        let value = match lambda {
            Some(lambda) if !sum.is_infinity() => self.line(a, &lambda, p),
            _ => Fp24::one(&self.tower().fp24),
        };
        (sum, value)
    }

    /// The Miller loop. `None` when either point is the identity or the
    /// accumulated value collapses to zero.
    pub fn miller_loop(&self, p: &G1, q: &G2) -> Option<Fp24> {
        if p.is_infinity() || q.is_infinity() {
            return None;
        }
        let x = self.param_x();
        let mut a = q.clone();
        let mut r = Fp24::one(&self.tower().fp24);

        for i in (0..x.bits() - 1).rev() {
            let (doubled, tangent) = self.line_step(&a, &a, p);
            a = doubled;
            r = r.square().mul(&tangent);
            if x.bit(i) {
                let (sum, chord) = self.line_step(&a, q, p);
                a = sum;
                r = r.mul(&chord);
            }
        }

        if r.is_zero() {
            return None;
        }
        Some(r)
    }

    /// Raise a Miller loop output to `3 (p^24 - 1) / q`.
    pub fn final_exponentiation(&self, f: &Fp24) -> Option<Gt> {
        // f^((p^12 - 1)(p^4 + 1)) is unitary
        let inverse = f.invert().ok()?;
        let t = f.conjugate().mul(&inverse);
        let t = t.frobenius_pow(4).mul(&t);
        let soft = Unitary::new_unchecked(t);

        let x = self.param_x();
        Some(BLS24_HARD_PART.evaluate(&soft, |v| v.pow(x), |v| v.frobenius()))
    }

    /// `e(p, q)`, or `None` for a degenerate input.
    pub fn pairing(&self, p: &G1, q: &G2) -> Option<Gt> {
        let f = self.miller_loop(p, q)?;
        self.final_exponentiation(&f)
    }

    /// Whether `value` lies in the order-q subgroup of Fp24.
    ///
    /// Checks that it is unitary, that the Frobenius acts on it as x, and that
    /// `r^((x - 1)^2) != 1`. The identity is rejected.
    pub fn is_member(&self, value: &Fp24) -> bool {
        if !value.mul(&value.conjugate()).is_one() {
            return false;
        }
        let x = self.param_x();
        let rx = value.pow(x);
        if value.frobenius() != rx {
            return false;
        }
        value.mul(&rx.pow(x)) != rx.square()
    }

    /// Accept `value` into GT after [`is_member`](Self::is_member).
    pub fn check_gt(&self, value: Fp24) -> Option<Gt> {
        self.is_member(&value).then(|| Unitary::new_unchecked(value))
    }
}
