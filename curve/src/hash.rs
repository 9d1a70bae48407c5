//! Hashing identities to integers and curve points, and hashing pairing
//! values to session keys.

use core::fmt::{self, Debug, Formatter};
use std::sync::Arc;

use log::trace;
use sha2::digest::Digest;
use sha2::Sha256;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::affine::{Affine, Curve};
use crate::bigint::BigInt;
use crate::error::{Error, Result};
use crate::field::FieldElement;
use crate::fp::Fp;

/// Upper bound on the x-coordinates tried by hash-and-map before giving up.
pub const MAX_HASH_PROBES: usize = 1024;

/// Hash `data` to an integer in `[0, modulus)`.
///
/// The digest bytes are appended to a leading 1 in base 256; once the digest
/// is exhausted a counter byte is appended and the digest reused, until the
/// value reaches the modulus. Digest bytes are taken as unsigned.
pub fn hash_to_field<D: Digest>(data: &[u8], modulus: &BigInt) -> Result<BigInt> {
    if *modulus <= BigInt::zero() {
        return Err(Error::InvalidModulus);
    }
    let digest = D::digest(data);
    let radix = BigInt::from(256u64);
    let mut h = BigInt::one();
    let mut j = 0;
    let mut counter = 1u64;
    while h < *modulus {
        h = &h * &radix;
        if j == digest.len() {
            h += &BigInt::from(counter);
            counter += 1;
            j = 0;
        } else {
            h += &BigInt::from(u64::from(digest[j]));
            j += 1;
        }
    }
    h.modulo(modulus)
}

/// Hash `data` to a point of `curve` and multiply it by `cofactor`.
///
/// Candidate abscissae start at the hashed value and increase by one; at most
/// [`MAX_HASH_PROBES`] are tried.
pub fn hash_to_curve<D: Digest>(curve: &Arc<Curve<Fp>>, data: &[u8], cofactor: &BigInt) -> Result<Affine<Fp>> {
    let fp = curve.field();
    let mut x = Fp::new(fp, &hash_to_field::<D>(data, fp.modulus())?);
    let one = Fp::one(fp);
    for probe in 1..=MAX_HASH_PROBES {
        if let Some(point) = Affine::from_x(curve, x.clone(), false) {
            let cleared = &point * cofactor;
            if !cleared.is_infinity() {
                trace!("hash-and-map found a point after {} probes", probe);
                return Ok(cleared);
            }
        }
        x = x.add(&one);
    }
    Err(Error::HashToPointExhausted {
        probes: MAX_HASH_PROBES,
    })
}

/// A 32-byte symmetric key, wiped from memory when dropped.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct SessionKey([u8; 32]);

impl SessionKey {
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        SessionKey(bytes)
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl Debug for SessionKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("SessionKey(..)")
    }
}

/// SHA-256 over prime-field coefficients, each written least significant
/// byte first with no padding.
pub fn hash_coefficients(coefficients: &[Fp]) -> SessionKey {
    let mut hasher = Sha256::new();
    for c in coefficients {
        hasher.update(c.to_bigint().to_bytes_le());
    }
    SessionKey(hasher.finalize().into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::affine::tests::secp256k1;
    use sha2::Sha512;

    #[test]
    fn test_hash_to_field_is_reduced_and_deterministic() {
        let (g, _) = secp256k1();
        let p = g.curve().field().modulus().clone();
        let a = hash_to_field::<Sha256>(b"Alice", &p).unwrap();
        let b = hash_to_field::<Sha256>(b"Alice", &p).unwrap();
        let c = hash_to_field::<Sha256>(b"Robert", &p).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert!(a < p);
        assert!(!a.is_negative());
    }

    #[test]
    fn test_hash_to_field_small_modulus() {
        let m = BigInt::from(1_000_003u64);
        let h = hash_to_field::<Sha512>(b"id", &m).unwrap();
        assert!(h < m);
        assert!(hash_to_field::<Sha256>(b"id", &BigInt::zero()).is_err());
    }

    // Long moduli reuse the digest with the counter extension
    #[test]
    fn test_hash_to_field_extends_past_digest() {
        let m = BigInt::one() << 600;
        let h = hash_to_field::<Sha256>(b"x", &m).unwrap();
        let digest = Sha256::digest(b"x");
        // leading 1, 32 digest bytes, counter 1, then the digest again
        let bytes = h.to_bytes_be();
        assert_eq!(&bytes[..32], digest.as_slice());
        assert_eq!(bytes[32], 1);
        assert_eq!(&bytes[33..65], digest.as_slice());
    }

    #[test]
    fn test_hash_to_curve() {
        let (g, n) = secp256k1();
        let p = hash_to_curve::<Sha256>(g.curve(), b"Alice", &BigInt::one()).unwrap();
        assert!(p.is_on_curve());
        assert_eq!(p, hash_to_curve::<Sha256>(g.curve(), b"Alice", &BigInt::one()).unwrap());
        assert!((&p * &n).is_infinity());
    }

    // y^2 = x^3 + 7 over F_103 has 111 points, so clearing by 111 always
    // lands on infinity and every candidate is rejected
    #[test]
    fn test_hash_to_curve_gives_up_when_every_candidate_clears() {
        let fp = crate::fp::PrimeField::new(&BigInt::from(103u64)).unwrap();
        let curve = Curve::new(Fp::zero(&fp), Fp::from_u64(&fp, 7)).unwrap();
        let order = BigInt::from(111u64);

        let result = hash_to_curve::<Sha256>(&curve, b"Alice", &order);
        assert!(matches!(
            result,
            Err(Error::HashToPointExhausted { probes }) if probes == MAX_HASH_PROBES
        ));
        // a cofactor of one succeeds on the same curve
        assert!(hash_to_curve::<Sha256>(&curve, b"Alice", &BigInt::one()).is_ok());
    }

    #[test]
    fn test_session_key_depends_on_every_coefficient() {
        let (g, _) = secp256k1();
        let fp = g.curve().field();
        let coeffs: Vec<Fp> = (1..=4u64).map(|i| Fp::from_u64(fp, i)).collect();
        let k1 = hash_coefficients(&coeffs);
        let mut changed = coeffs.clone();
        changed[3] = Fp::from_u64(fp, 5);
        assert_ne!(k1, hash_coefficients(&changed));
        assert_eq!(k1, hash_coefficients(&coeffs));
        assert_eq!(format!("{:?}", k1), "SessionKey(..)");
    }
}
