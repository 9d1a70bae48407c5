//! Multiprecision arithmetic, finite-field towers, elliptic curves and the
//! BLS24 ate pairing.
//!
//! The crate is layered leaf first: [`BigInt`] underpins the prime field
//! [`Fp`], which the generic quadratic and cubic layers extend into the
//! degree-24 BLS tower (and a degree-12 BN tower). Curve points over any
//! field of the tower live in [`Affine`] and [`Projective`]; binary-field
//! curves in [`BinaryPoint`]. [`Bls24`] ties the pieces together into G1, G2,
//! GT, the pairing and hashing onto the groups.
//!
//! Every field and curve carries its parameters in an `Arc` context, so
//! several curves can coexist and contexts may be shared across threads.

mod affine;
mod bigint;
mod binary;
mod binary_curve;
mod bls24;
mod chain;
mod cubic;
mod error;
mod field;
mod fp;
mod group;
mod hash;
mod msm;
mod pairing;
mod projective;
mod quadratic;
mod random;
mod tower;
mod unitary;

pub use affine::{Affine, Curve};
pub use bigint::BigInt;
pub use binary::{BinaryField, Gf2m};
pub use binary_curve::{BinaryCurve, BinaryPoint};
pub use bls24::{Bls24, Twist, G1, G2, Gt, STANDARD_PARAMETER};
pub use chain::{PowerChain, Term, BLS24_G2_COFACTOR, BLS24_HARD_PART};
pub use cubic::{Cubic, CubicContext};
pub use error::{Error, Result};
pub use field::{tonelli_shanks, Extension, FieldElement};
pub use fp::{Fp, PrimeField};
pub use group::Group;
pub use hash::{hash_coefficients, hash_to_curve, hash_to_field, SessionKey, MAX_HASH_PROBES};
pub use msm::{double_scalar_mul, multi_scalar_mul};
pub use projective::Projective;
pub use quadratic::{Quadratic, QuadraticContext};
pub use random::{random_scalar, RandomField};
pub use tower::{
    Bls24Tower, Bn12Tower, Fp12, Fp12Context, Fp2, Fp24, Fp24Context, Fp2Context, Fp4, Fp4Context, Fp6,
    Fp6Context, Fp8, Fp8Context,
};
pub use unitary::Unitary;
