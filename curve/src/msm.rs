use crate::bigint::BigInt;
use crate::group::Group;

/// Bases up to this count get a full subset-sum table.
const SHAMIR_MAX_BASES: usize = 4;

/// Compute `sum(scalars[i] * points[i])` with one shared doubling chain.
///
/// Up to four bases use a Shamir table of all subset sums. Larger inputs
/// interleave a 4-bit window table per base (Straus).
pub fn multi_scalar_mul<G: Group>(points: &[G], scalars: &[BigInt]) -> G {
    assert_eq!(
        points.len(),
        scalars.len(),
        "Points and scalars must have same length"
    );
    assert!(!points.is_empty(), "multi-scalar multiplication needs a base");

    // Fold signs into the bases so only magnitudes are scanned
    let bases: Vec<G> = points
        .iter()
        .zip(scalars)
        .map(|(p, k)| if k.is_negative() { p.negate() } else { p.clone() })
        .collect();

    if bases.len() <= SHAMIR_MAX_BASES {
        shamir(&bases, scalars)
    } else {
        straus(&bases, scalars)
    }
}

/// `a * p + b * q`.
pub fn double_scalar_mul<G: Group>(p: &G, a: &BigInt, q: &G, b: &BigInt) -> G {
    multi_scalar_mul(&[p.clone(), q.clone()], &[a.clone(), b.clone()])
}

fn shamir<G: Group>(bases: &[G], scalars: &[BigInt]) -> G {
    let n = bases.len();
    let identity = bases[0].identity_like();

    // table[mask] = sum of bases whose bit is set in mask
    let mut table = vec![identity.clone(); 1 << n];
    for mask in 1..(1usize << n) {
        let low = mask.trailing_zeros() as usize;
        table[mask] = table[mask & (mask - 1)].combine(&bases[low]);
    }

    let bits = scalars.iter().map(BigInt::bits).max().unwrap_or(0);
    let mut result = identity;
    for i in (0..bits).rev() {
        result = result.double();
        let mask = scalars
            .iter()
            .enumerate()
            .fold(0usize, |acc, (j, k)| acc | (usize::from(k.bit(i)) << j));
        if mask != 0 {
            result = result.combine(&table[mask]);
        }
    }
    result
}

fn straus<G: Group>(bases: &[G], scalars: &[BigInt]) -> G {
    let identity = bases[0].identity_like();
    let tables: Vec<Vec<G>> = bases
        .iter()
        .map(|base| {
            let mut table = vec![identity.clone(); 16];
            table[1] = base.clone();
            for i in 2..16 {
                table[i] = table[i - 1].combine(base);
            }
            table
        })
        .collect();

    let windows = scalars.iter().map(BigInt::bits).max().unwrap_or(0).div_ceil(4);
    let mut result = identity;
    for w in (0..windows).rev() {
        for _ in 0..4 {
            result = result.double();
        }
        for (table, k) in tables.iter().zip(scalars) {
            let window = (0..4).fold(0usize, |acc, j| acc | (usize::from(k.bit(4 * w + j)) << j));
            if window != 0 {
                result = result.combine(&table[window]);
            }
        }
    }
    result
}
