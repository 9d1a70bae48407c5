use crate::bigint::BigInt;

/// Abelian group written additively: curve points, and unitary field
/// elements under multiplication.
///
/// Groups here carry runtime parameters (a curve, a field), so the identity is
/// obtained from an existing element.
pub trait Group: Sized + Clone + PartialEq {
    fn identity_like(&self) -> Self;
    fn is_identity(&self) -> bool;
    fn combine(&self, other: &Self) -> Self;
    fn double(&self) -> Self;
    fn negate(&self) -> Self;

    /// Left-to-right double-and-add. A negative scalar multiplies the
    /// negated element.
    fn scalar_mul(&self, scalar: &BigInt) -> Self {
        let base = if scalar.is_negative() {
            self.negate()
        } else {
            self.clone()
        };
        let mut result = self.identity_like();

        for i in (0..scalar.bits()).rev() {
            result = result.double();
            if scalar.bit(i) {
                result = result.combine(&base);
            }
        }

        result
    }

    fn scalar_mul_windowed(&self, scalar: &BigInt) -> Self {
        if self.is_identity() {
            return self.clone();
        }
        let base = if scalar.is_negative() {
            self.negate()
        } else {
            self.clone()
        };

        let mut table = vec![self.identity_like(); 16];
        table[1] = base;
        for i in 2..16 {
            table[i] = if i % 2 == 0 {
                table[i / 2].double()
            } else {
                table[i - 1].combine(&table[1])
            };
        }

        let windows = scalar.bits().div_ceil(4);
        let mut result = self.identity_like();

        for w in (0..windows).rev() {
            result = result.double();
            result = result.double();
            result = result.double();
            result = result.double();

            let window = (0..4).fold(0usize, |acc, j| acc | (usize::from(scalar.bit(4 * w + j)) << j));
            if window != 0 {
                result = result.combine(&table[window]);
            }
        }

        result
    }

    fn mul_u64(&self, n: u64) -> Self {
        if n == 0 {
            return self.identity_like();
        }
        if n == 1 {
            return self.clone();
        }

        let mut result = self.identity_like();
        let mut temp = self.clone();
        let mut bits = n;

        while bits > 0 {
            if bits & 1 == 1 {
                result = result.combine(&temp);
            }
            temp = temp.double();
            bits >>= 1;
        }

        result
    }
}
