//! Signature and key-agreement protocols on top of the `curve` crate.
//!
//! - DSA over a prime-order subgroup of `Z_p^*`
//! - ECDSA over binary-field curves `y^2 + xy = x^3 + Ax^2 + B`
//! - identity-based authenticated key agreement on a BLS24 curve, where a
//!   trusted authority extracts identity keys in G1 (clients) and G2
//!   (servers) and both sides finish with the same 32-byte session key
//!
//! Parameters, keys and signatures serialize with serde; the classic text
//! formats for DSA and binary ECDSA parameter files are in [`params`].
//!
//! # Example
//!
//! ```no_run
//! use curve::Bls24;
//! use protocols::{ClientHandshake, ServerHandshake, TrustedAuthority};
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//!
//! let curve = Bls24::standard().expect("curve");
//! let mut rng = StdRng::seed_from_u64(42);
//! let authority = TrustedAuthority::new(&curve, &mut rng).expect("authority");
//! let alice = authority.extract_client(&curve, b"Alice").expect("extract");
//! let server = authority.extract_server(&curve, b"Server").expect("extract");
//!
//! let (client, client_share) = ClientHandshake::start(&curve, &alice, b"Server", &mut rng).expect("start");
//! let (host, server_share) = ServerHandshake::start(&curve, &server, b"Alice", &mut rng).expect("start");
//! let k1 = client.finish(&curve, &server_share).expect("finish");
//! let k2 = host.finish(&curve, &client_share).expect("finish");
//! assert_eq!(k1, k2);
//! ```

mod ake;
mod constants;
mod dsa;
mod ecdsa;
mod errors;
mod secret;
pub mod params;


pub use ake::{ClientHandshake, ClientKey, KeyShare, ServerHandshake, ServerKey, TrustedAuthority};
pub use constants::{DSA_P_BITS, DSA_Q_BITS};
pub use dsa::{DsaParams, DsaSignature, DsaSigningKey, DsaVerifyingKey};
pub use ecdsa::{EcdsaParams, EcdsaSignature, EcdsaSigningKey, EcdsaVerifyingKey};
pub use errors::{ProtocolError, Result};
