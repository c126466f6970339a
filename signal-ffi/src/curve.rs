use rand::{CryptoRng, Rng};
use thiserror::Error;
use x25519_dalek::{PublicKey as X25519PublicKey, StaticSecret};

pub const DJB_TYPE: u8 = 0x05;
const KEY_LEN: usize = 32;

#[derive(Debug, Error)]
pub enum CurveError {
    #[error("bad key type: {0}")]
    BadKeyType(u8),
    #[error("bad key length: {0}")]
    BadKeyLength(usize),
}

/// Curve25519 public key held behind an opaque handle.
#[derive(Clone, PartialEq, Eq)]
pub struct PublicKey {
    key: [u8; KEY_LEN],
}

impl PublicKey {
    /// Accepts the serialized form: a type byte followed by the point.
    pub(crate) fn deserialize(bytes: &[u8]) -> Result<Self, CurveError> {
        match bytes {
            [] => Err(CurveError::BadKeyLength(0)),
            [DJB_TYPE, point @ ..] => Ok(Self {
                key: point
                    .try_into()
                    .map_err(|_| CurveError::BadKeyLength(bytes.len()))?,
            }),
            [key_type, ..] => Err(CurveError::BadKeyType(*key_type)),
        }
    }

    pub(crate) fn serialize(&self) -> Vec<u8> {
        let mut serialized = Vec::with_capacity(1 + KEY_LEN);
        serialized.push(DJB_TYPE);
        serialized.extend_from_slice(&self.key);
        serialized
    }
}

/// Curve25519 private key held behind an opaque handle.
#[derive(Clone)]
pub struct PrivateKey {
    key: StaticSecret,
}

impl PrivateKey {
    pub(crate) fn generate<R: Rng + CryptoRng>(rng: &mut R) -> Self {
        let mut bytes = [0u8; KEY_LEN];
        rng.fill_bytes(&mut bytes);
        Self {
            key: StaticSecret::from(bytes),
        }
    }

    /// Accepts the raw 32-byte secret.
    pub(crate) fn deserialize(bytes: &[u8]) -> Result<Self, CurveError> {
        let bytes: [u8; KEY_LEN] = bytes
            .try_into()
            .map_err(|_| CurveError::BadKeyLength(bytes.len()))?;
        Ok(Self {
            key: StaticSecret::from(bytes),
        })
    }

    pub(crate) fn serialize(&self) -> Vec<u8> {
        self.key.to_bytes().to_vec()
    }

    pub(crate) fn public_key(&self) -> PublicKey {
        PublicKey {
            key: *X25519PublicKey::from(&self.key).as_bytes(),
        }
    }
}

/// Matching public/private halves as stored inside a record.
#[derive(Clone)]
pub struct KeyPair {
    pub public_key: PublicKey,
    pub private_key: PrivateKey,
}

impl KeyPair {
    pub(crate) fn new(public_key: PublicKey, private_key: PrivateKey) -> Self {
        Self {
            public_key,
            private_key,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{TryRngCore, rngs::OsRng};

    #[test]
    fn public_key_round_trips() {
        let public_key = PrivateKey::generate(&mut OsRng.unwrap_err()).public_key();
        let serialized = public_key.serialize();
        assert_eq!(serialized.len(), 1 + KEY_LEN);
        assert_eq!(serialized[0], DJB_TYPE);
        let restored = PublicKey::deserialize(&serialized).unwrap();
        assert!(restored == public_key);
    }

    #[test]
    fn rejects_bad_type_byte() {
        let mut serialized = PrivateKey::generate(&mut OsRng.unwrap_err())
            .public_key()
            .serialize();
        serialized[0] = 0x04;
        assert!(matches!(
            PublicKey::deserialize(&serialized),
            Err(CurveError::BadKeyType(0x04))
        ));
    }

    #[test]
    fn rejects_bad_length() {
        assert!(matches!(
            PublicKey::deserialize(&[]),
            Err(CurveError::BadKeyLength(0))
        ));
        assert!(matches!(
            PublicKey::deserialize(&[DJB_TYPE, 1, 2, 3]),
            Err(CurveError::BadKeyLength(4))
        ));
        assert!(matches!(
            PrivateKey::deserialize(&[1, 2, 3]),
            Err(CurveError::BadKeyLength(3))
        ));
    }

    #[test]
    fn derived_public_key_is_stable() {
        let private_key = PrivateKey::generate(&mut OsRng.unwrap_err());
        let restored = PrivateKey::deserialize(&private_key.serialize()).unwrap();
        assert!(private_key.public_key() == restored.public_key());
    }
}
