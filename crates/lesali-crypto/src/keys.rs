//! Key material used by the envelope codec.
//!
//! A [`SharedSecret`] is the precomputed box key two peers derive from an X25519 agreement. The
//! codec never derives it on its own: the server side receives it from its session collaborator.
//! [`KeyPair::precompute`] reproduces NaCl's `box_beforenm` for the peers that do hold the static
//! keys.

use std::fmt::{Debug, Display};

use rand::rngs::OsRng;
use salsa20::cipher::{consts::U10, generic_array::GenericArray};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use subtle::ConstantTimeEq;
use x25519_dalek::StaticSecret;

use crate::{constants::KEY_SIZE, error::KeyError};

/// 256-bit box key shared by the two ends of a session.
#[derive(Clone, zeroize::ZeroizeOnDrop)]
pub struct SharedSecret([u8; KEY_SIZE]);

impl Debug for SharedSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use sha2::{Digest, Sha256 as Sha256Hash};
        let hash = Sha256Hash::digest(self.0);
        let preview = format!(
            "{:02x}{:02x}{:02x}{:02x}...",
            hash[0], hash[1], hash[2], hash[3]
        );
        write!(f, "SharedSecret({preview})")
    }
}

impl PartialEq for SharedSecret {
    fn eq(&self, other: &Self) -> bool {
        self.0.ct_eq(&other.0).into()
    }
}

impl Eq for SharedSecret {}

impl SharedSecret {
    /// Wrap a precomputed 32-byte box key.
    pub fn from_bytes(bytes: [u8; KEY_SIZE]) -> Self {
        SharedSecret(bytes)
    }

    pub(crate) fn as_bytes(&self) -> &[u8; KEY_SIZE] {
        &self.0
    }
}

/// Public half of a peer's X25519 key pair. Requests carry it in the clear so the server can
/// look up the session it belongs to.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PublicKey([u8; KEY_SIZE]);

impl PublicKey {
    /// Construct a public key from its raw bytes.
    pub const fn from_bytes(bytes: [u8; KEY_SIZE]) -> Self {
        PublicKey(bytes)
    }

    /// The raw key bytes, as written on the wire.
    pub fn as_bytes(&self) -> &[u8; KEY_SIZE] {
        &self.0
    }

    /// Encode the key as a 64 character hexadecimal string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Decode a key from a hexadecimal string.
    ///
    /// Returns an error if the string is not valid hex or does not decode to exactly
    /// 32 bytes.
    pub fn from_hex(s: &str) -> Result<Self, KeyError> {
        let bytes = hex::decode(s).map_err(|_| KeyError::InvalidEncoding)?;
        let bytes: [u8; KEY_SIZE] = bytes
            .try_into()
            .map_err(|bytes: Vec<u8>| KeyError::InvalidLength(bytes.len()))?;
        Ok(PublicKey(bytes))
    }

    /// Short hex prefix identifying the key in log output.
    pub fn short_id(&self) -> String {
        hex::encode(&self.0[..4])
    }
}

impl Debug for PublicKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "PublicKey({})", self.to_hex())
    }
}

impl Display for PublicKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl Serialize for PublicKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for PublicKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        PublicKey::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

/// A static X25519 key pair.
#[derive(Clone)]
pub struct KeyPair {
    secret: StaticSecret,
    public: PublicKey,
}

impl Debug for KeyPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyPair")
            .field("public", &self.public)
            .finish_non_exhaustive()
    }
}

impl KeyPair {
    /// Generate a key pair using the operating system's random number generator.
    pub fn generate() -> Self {
        Self::from_secret(StaticSecret::random_from_rng(OsRng))
    }

    /// Restore a key pair from its 32-byte secret scalar.
    pub fn from_secret_bytes(bytes: [u8; KEY_SIZE]) -> Self {
        Self::from_secret(StaticSecret::from(bytes))
    }

    fn from_secret(secret: StaticSecret) -> Self {
        let public = x25519_dalek::PublicKey::from(&secret);
        KeyPair {
            secret,
            public: PublicKey(public.to_bytes()),
        }
    }

    /// The public half, as sent to peers.
    pub fn public_key(&self) -> PublicKey {
        self.public
    }

    /// Precompute the box key shared with `peer`.
    ///
    /// This is the X25519 agreement followed by HSalsa20 over a zero block, so both ends of the
    /// agreement arrive at the same key and keys interoperate with NaCl `box` implementations.
    pub fn precompute(&self, peer: &PublicKey) -> SharedSecret {
        let agreed = self
            .secret
            .diffie_hellman(&x25519_dalek::PublicKey::from(peer.0));
        let derived = salsa20::hsalsa::<U10>(
            salsa20::Key::from_slice(agreed.as_bytes()),
            &GenericArray::default(),
        );
        let mut key = [0u8; KEY_SIZE];
        key.copy_from_slice(&derived);
        SharedSecret(key)
    }
}

#[cfg(test)]
pub(crate) const SHARED_SECRET_TEST_VECTOR_1: [u8; KEY_SIZE] = [0u8; KEY_SIZE];
#[cfg(test)]
pub(crate) const SHARED_SECRET_TEST_VECTOR_2: [u8; KEY_SIZE] = [1u8; KEY_SIZE];
