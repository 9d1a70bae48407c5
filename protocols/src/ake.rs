//! Identity-based authenticated key agreement on a BLS24 curve.
//!
//! A trusted authority holds a master secret `s`. A client with identity
//! `A` receives `s * H1(A)` in G1 and a server with identity `S` receives
//! `s * H2(S)` in G2, so both can compute `e(H1(A), H2(S))^s` from their own
//! key and the other party's public identity. Each side raises that value to
//! a fresh nonce and sends it; the session key is the hash of the other
//! side's share raised to the own nonce.

use core::fmt::{self, Debug, Formatter};

use curve::{random_scalar, Affine, BigInt, Bls24, FieldElement, Fp, Fp24, Gt, SessionKey, G1, G2};
use log::{debug, warn};
use rand::Rng;
use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use crate::errors::{ProtocolError, Result};
use crate::secret::{check_scalar, SecretScalar};

/// The authority's master secret, in `[1, q)`.
#[derive(Clone, Zeroize, ZeroizeOnDrop, Serialize, Deserialize)]
#[serde(try_from = "SecretScalar", into = "SecretScalar")]
pub struct TrustedAuthority {
    master: BigInt,
}

/// A client's private key `s * H1(identity)`, kept as its uncompressed
/// point encoding.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop, Serialize, Deserialize)]
pub struct ClientKey {
    #[zeroize(skip)]
    identity: Vec<u8>,
    point: Vec<u8>,
}

/// A server's private key `s * H2(identity)`.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop, Serialize, Deserialize)]
pub struct ServerKey {
    #[zeroize(skip)]
    identity: Vec<u8>,
    point: Vec<u8>,
}

/// A target-group value sent to the other party: the prime-field
/// coefficients of an Fp24 element.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyShare {
    coefficients: Vec<BigInt>,
}

/// Client state between sending its share and receiving the server's.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct ClientHandshake {
    nonce: BigInt,
}

/// Server state between sending its share and receiving the client's.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct ServerHandshake {
    nonce: BigInt,
}

impl TrustedAuthority {
    pub fn new<R: Rng + ?Sized>(curve: &Bls24, rng: &mut R) -> Result<Self> {
        Ok(TrustedAuthority {
            master: random_scalar(rng, curve.order())?,
        })
    }

    pub fn from_secret(curve: &Bls24, master: BigInt) -> Result<Self> {
        check_scalar(&master, curve.order())?;
        Ok(TrustedAuthority { master })
    }

    pub fn extract_client(&self, curve: &Bls24, identity: &[u8]) -> Result<ClientKey> {
        check_scalar(&self.master, curve.order())?;
        let hashed = curve.hash_to_g1(identity)?;
        let point = Zeroizing::new(curve.g1_mul(&hashed, &self.master)?);
        debug!("extracted client key for {}", String::from_utf8_lossy(identity));
        Ok(ClientKey {
            identity: identity.to_vec(),
            point: point.to_bytes(false),
        })
    }

    pub fn extract_server(&self, curve: &Bls24, identity: &[u8]) -> Result<ServerKey> {
        check_scalar(&self.master, curve.order())?;
        let hashed = curve.hash_to_g2(identity)?;
        let point = Zeroizing::new(curve.g2_mul(&hashed, &self.master)?);
        debug!("extracted server key for {}", String::from_utf8_lossy(identity));
        Ok(ServerKey {
            identity: identity.to_vec(),
            point: point.to_bytes(false),
        })
    }
}

impl TryFrom<SecretScalar> for TrustedAuthority {
    type Error = ProtocolError;

    fn try_from(value: SecretScalar) -> Result<Self> {
        Ok(TrustedAuthority {
            master: value.positive()?,
        })
    }
}

impl From<TrustedAuthority> for SecretScalar {
    fn from(authority: TrustedAuthority) -> Self {
        SecretScalar::new(&authority.master)
    }
}

impl Debug for TrustedAuthority {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("TrustedAuthority(..)")
    }
}

impl ClientKey {
    pub fn identity(&self) -> &[u8] {
        &self.identity
    }

    /// Decode the key point; it must lie in the order-q subgroup of G1.
    pub fn point(&self, curve: &Bls24) -> Result<Zeroizing<G1>> {
        let point = Affine::from_bytes(curve.g1_curve(), &self.point).map_err(|_| ProtocolError::InvalidKey)?;
        in_subgroup(Zeroizing::new(point), curve.order())
    }
}

impl ServerKey {
    pub fn identity(&self) -> &[u8] {
        &self.identity
    }

    /// Decode the key point; it must lie in the order-q subgroup of G2.
    pub fn point(&self, curve: &Bls24) -> Result<Zeroizing<G2>> {
        let point = Affine::from_bytes(curve.g2_curve(), &self.point).map_err(|_| ProtocolError::InvalidKey)?;
        in_subgroup(Zeroizing::new(point), curve.order())
    }
}

/// Reject infinity and points whose order does not divide `order`.
fn in_subgroup<F: FieldElement + Zeroize>(point: Zeroizing<Affine<F>>, order: &BigInt) -> Result<Zeroizing<Affine<F>>> {
    if point.is_infinity() || !(&*point * order).is_infinity() {
        warn!("identity key point is outside the prime-order subgroup");
        return Err(ProtocolError::InvalidKey);
    }
    Ok(point)
}

impl Debug for ClientKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "ClientKey({})", String::from_utf8_lossy(&self.identity))
    }
}

impl Debug for ServerKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "ServerKey({})", String::from_utf8_lossy(&self.identity))
    }
}

impl KeyShare {
    fn from_gt(value: &Gt) -> Self {
        KeyShare {
            coefficients: value.value().to_coefficients().iter().map(Fp::to_bigint).collect(),
        }
    }

    /// Rebuild the Fp24 value. Fails on a wrong coefficient count or a
    /// coefficient outside `[0, p)`.
    pub fn to_fp24(&self, curve: &Bls24) -> Result<Fp24> {
        let fp = &curve.tower().fp;
        let p = curve.modulus();
        let zero = BigInt::zero();
        let coefficients = self
            .coefficients
            .iter()
            .map(|c| {
                if *c < zero || c >= p {
                    Err(ProtocolError::Parse("coefficient out of range".to_string()))
                } else {
                    Ok(Fp::new(fp, c))
                }
            })
            .collect::<Result<Vec<Fp>>>()?;
        Ok(Fp24::from_coefficients(&curve.tower().fp24, &coefficients)?)
    }
}

/// The pairing both sides agree on, checked for degeneracy and membership.
fn identity_pairing(curve: &Bls24, p: &G1, q: &G2) -> Result<Gt> {
    let Some(value) = curve.pairing(p, q) else {
        warn!("degenerate pairing between identity points");
        return Err(ProtocolError::DegeneratePairing);
    };
    if !curve.is_member(value.value()) {
        warn!("pairing output failed the membership test");
        return Err(ProtocolError::NotInGroup);
    }
    Ok(value)
}

/// Accept a peer's share into GT and raise it to `nonce`.
fn receive_share(curve: &Bls24, share: &KeyShare, nonce: &BigInt) -> Result<SessionKey> {
    let value = share.to_fp24(curve)?;
    let Some(value) = curve.check_gt(value) else {
        warn!("received key share is not in the target group");
        return Err(ProtocolError::NotInGroup);
    };
    let shared = Zeroizing::new(curve.gt_pow(&value, nonce)?);
    Ok(curve.derive_key(&shared))
}

impl ClientHandshake {
    /// Compute `e(s H1(A), H2(S))^a` for a fresh nonce a.
    pub fn start<R: Rng + ?Sized>(
        curve: &Bls24,
        key: &ClientKey,
        server_identity: &[u8],
        rng: &mut R,
    ) -> Result<(Self, KeyShare)> {
        let server = curve.hash_to_g2(server_identity)?;
        let base = Zeroizing::new(identity_pairing(curve, &*key.point(curve)?, &server)?);
        let nonce = random_scalar(rng, curve.order())?;
        let share = KeyShare::from_gt(&curve.gt_pow(&base, &nonce)?);
        Ok((ClientHandshake { nonce }, share))
    }

    pub fn finish(self, curve: &Bls24, server_share: &KeyShare) -> Result<SessionKey> {
        receive_share(curve, server_share, &self.nonce)
    }
}

impl ServerHandshake {
    /// Compute `e(H1(A), s H2(S))^b` for a fresh nonce b.
    pub fn start<R: Rng + ?Sized>(
        curve: &Bls24,
        key: &ServerKey,
        client_identity: &[u8],
        rng: &mut R,
    ) -> Result<(Self, KeyShare)> {
        let client = curve.hash_to_g1(client_identity)?;
        let base = Zeroizing::new(identity_pairing(curve, &client, &*key.point(curve)?)?);
        let nonce = random_scalar(rng, curve.order())?;
        let share = KeyShare::from_gt(&curve.gt_pow(&base, &nonce)?);
        Ok((ServerHandshake { nonce }, share))
    }

    pub fn finish(self, curve: &Bls24, client_share: &KeyShare) -> Result<SessionKey> {
        receive_share(curve, client_share, &self.nonce)
    }
}
