//! Exponent chains written as tables.
//!
//! An exponent of the form `sum c_ij * p^i * x^j` (p the field characteristic
//! acting through the Frobenius, x the curve parameter) is evaluated by
//! building `input^(x^j)` once for every `j`, combining each Frobenius layer
//! with small signed coefficients, and running Horner over the layers.

use crate::group::Group;

/// One term `coefficient * p^frobenius * x^power` of an exponent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Term {
    pub frobenius: u8,
    pub power: u8,
    pub coefficient: i8,
}

const fn t(frobenius: u8, power: u8, coefficient: i8) -> Term {
    Term {
        frobenius,
        power,
        coefficient,
    }
}

#[derive(Debug, Clone, Copy)]
pub struct PowerChain {
    terms: &'static [Term],
}

impl PowerChain {
    pub const fn new(terms: &'static [Term]) -> Self {
        PowerChain { terms }
    }

    pub fn terms(&self) -> &'static [Term] {
        self.terms
    }

    /// Evaluate the chain at `input`, where `step` raises to the power x and
    /// `frobenius` applies the p-power map.
    pub fn evaluate<G, S, P>(&self, input: &G, step: S, frobenius: P) -> G
    where
        G: Group,
        S: Fn(&G) -> G,
        P: Fn(&G) -> G,
    {
        let max_power = self.terms.iter().map(|t| t.power).max().unwrap_or(0) as usize;
        let max_frobenius = self.terms.iter().map(|t| t.frobenius).max().unwrap_or(0);

        let mut registers = Vec::with_capacity(max_power + 1);
        registers.push(input.clone());
        for i in 0..max_power {
            let next = step(&registers[i]);
            registers.push(next);
        }

        let mut acc = input.identity_like();
        for level in (0..=max_frobenius).rev() {
            let layer = self
                .terms
                .iter()
                .filter(|t| t.frobenius == level)
                .fold(input.identity_like(), |sum, t| {
                    let base = &registers[t.power as usize];
                    let scaled = base.mul_u64(u64::from(t.coefficient.unsigned_abs()));
                    let signed = if t.coefficient < 0 {
                        scaled.negate()
                    } else {
                        scaled
                    };
                    sum.combine(&signed)
                });
            acc = frobenius(&acc).combine(&layer);
        }
        acc
    }
}

/// Hard part of the BLS24 final exponentiation, `(p^8 - p^4 + 1) / q`
/// scaled by 3, in powers of x and p.
pub const BLS24_HARD_PART: PowerChain = PowerChain::new(&[
    t(0, 0, 3),
    t(0, 3, -1),
    t(0, 4, 2),
    t(0, 5, -1),
    t(0, 7, 1),
    t(0, 8, -2),
    t(0, 9, 1),
    t(1, 2, -1),
    t(1, 3, 2),
    t(1, 4, -1),
    t(1, 6, 1),
    t(1, 7, -2),
    t(1, 8, 1),
    t(2, 1, -1),
    t(2, 2, 2),
    t(2, 3, -1),
    t(2, 5, 1),
    t(2, 6, -2),
    t(2, 7, 1),
    t(3, 0, -1),
    t(3, 1, 2),
    t(3, 2, -1),
    t(3, 4, 1),
    t(3, 5, -2),
    t(3, 6, 1),
    t(4, 3, 1),
    t(4, 4, -2),
    t(4, 5, 1),
    t(5, 2, 1),
    t(5, 3, -2),
    t(5, 4, 1),
    t(6, 1, 1),
    t(6, 2, -2),
    t(6, 3, 1),
    t(7, 0, 1),
    t(7, 1, -2),
    t(7, 2, 1),
]);

/// Cofactor clearing on the G2 twist, in powers of x and ψ.
pub const BLS24_G2_COFACTOR: PowerChain = PowerChain::new(&[
    t(0, 0, 4),
    t(0, 1, 1),
    t(0, 2, -2),
    t(0, 3, -2),
    t(0, 4, 3),
    t(0, 5, -3),
    t(0, 7, 4),
    t(0, 8, -2),
    t(1, 0, -1),
    t(1, 1, 1),
    t(1, 2, 2),
    t(1, 3, -2),
    t(1, 4, -1),
    t(1, 5, 1),
    t(2, 0, 1),
    t(2, 1, -1),
    t(2, 4, -1),
    t(2, 5, 1),
    t(3, 0, 1),
    t(3, 1, -1),
    t(3, 4, -1),
    t(3, 5, 1),
    t(4, 0, -3),
    t(4, 1, 1),
    t(4, 2, 4),
    t(4, 3, 1),
    t(4, 4, -3),
    t(5, 0, 3),
    t(5, 1, -3),
    t(5, 2, -3),
    t(5, 3, 3),
    t(6, 0, -1),
    t(6, 1, 2),
    t(6, 2, -1),
]);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bigint::BigInt;

    /// Integers under addition, with the Frobenius acting as multiplication
    /// by `p`, to check chains against their closed forms.
    #[derive(Clone, Debug, PartialEq)]
    struct Additive(BigInt);

    impl Group for Additive {
        fn identity_like(&self) -> Self {
            Additive(BigInt::zero())
        }
        fn is_identity(&self) -> bool {
            self.0.is_zero()
        }
        fn combine(&self, other: &Self) -> Self {
            Additive(&self.0 + &other.0)
        }
        fn double(&self) -> Self {
            Additive(&self.0 + &self.0)
        }
        fn negate(&self) -> Self {
            Additive(-&self.0)
        }
    }

    fn eval(chain: &PowerChain, x: &BigInt, p: &BigInt) -> BigInt {
        chain
            .evaluate(
                &Additive(BigInt::one()),
                |v| Additive(&v.0 * x),
                |v| Additive(&v.0 * p),
            )
            .0
    }

    fn parameters() -> (BigInt, BigInt, BigInt) {
        let x = BigInt::from(0xE000000000058400u64);
        let x2 = x.pow(2);
        let x4 = x.pow(4);
        let x5 = x.pow(5);
        let x6 = x.pow(6);
        let x8 = x.pow(8);
        let x9 = x.pow(9);
        let x10 = x.pow(10);
        let num = &(&(&(&(&(&(&(&x10 - &(&x9 + &x9)) + &x8) - &x6) + &(&x5 + &x5)) - &x4) + &x2) + &x)
            + &BigInt::one();
        let (p, _) = num.div_rem(&BigInt::from(3u64)).unwrap();
        let q = &(&x8 - &x4) + &BigInt::one();
        (x, p, q)
    }

    #[test]
    fn test_hard_part_closed_form() {
        let (x, p, q) = parameters();
        let p4 = p.pow(4);
        let e = &(&(&p4 * &p4) - &p4) + &BigInt::one();
        let (quotient, rem) = e.div_rem(&q).unwrap();
        assert!(rem.is_zero());
        let three = BigInt::from(3u64);
        assert_eq!(eval(&BLS24_HARD_PART, &x, &p), &three * &quotient);
    }

    #[test]
    fn test_chain_layers() {
        static SIMPLE: PowerChain = PowerChain::new(&[t(0, 0, 1), t(0, 2, -3), t(2, 1, 2)]);
        let x = BigInt::from(5u64);
        let p = BigInt::from(7u64);
        // 1 - 3 * 25 + 2 * 49 * 5
        assert_eq!(eval(&SIMPLE, &x, &p), BigInt::from(1i64 - 75 + 490));
    }
}
