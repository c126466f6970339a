use prost::Message;
use thiserror::Error;

use crate::curve::{CurveError, KeyPair, PrivateKey, PublicKey};
use crate::proto;

#[derive(Debug, Error)]
pub enum RecordError {
    #[error("invalid record encoding: {0}")]
    Proto(#[from] prost::DecodeError),
    #[error("missing record field: {0}")]
    MissingField(&'static str),
    #[error("invalid key material: {0}")]
    Key(#[from] CurveError),
}

/// Signed prekey record as held behind an opaque handle.
#[derive(Clone)]
pub struct SignedPreKeyRecord {
    id: u32,
    // Epoch milliseconds.
    timestamp: u64,
    key_pair: KeyPair,
    signature: Vec<u8>,
}

impl SignedPreKeyRecord {
    pub(crate) fn new(id: u32, timestamp: u64, key_pair: KeyPair, signature: Vec<u8>) -> Self {
        Self {
            id,
            timestamp,
            key_pair,
            signature,
        }
    }

    pub(crate) fn id(&self) -> u32 {
        self.id
    }

    pub(crate) fn timestamp(&self) -> u64 {
        self.timestamp
    }

    pub(crate) fn signature(&self) -> &[u8] {
        &self.signature
    }

    pub(crate) fn key_pair(&self) -> &KeyPair {
        &self.key_pair
    }

    pub(crate) fn serialize(&self) -> Vec<u8> {
        proto::SignedPreKeyRecordStructure {
            id: Some(self.id),
            public_key: Some(self.key_pair.public_key.serialize()),
            private_key: Some(self.key_pair.private_key.serialize()),
            signature: Some(self.signature.clone()),
            timestamp: Some(self.timestamp),
        }
        .encode_to_vec()
    }

    pub(crate) fn deserialize(bytes: &[u8]) -> Result<Self, RecordError> {
        let structure = proto::SignedPreKeyRecordStructure::decode(bytes)?;
        let public_key = PublicKey::deserialize(
            structure
                .public_key
                .as_deref()
                .ok_or(RecordError::MissingField("public_key"))?,
        )?;
        let private_key = PrivateKey::deserialize(
            structure
                .private_key
                .as_deref()
                .ok_or(RecordError::MissingField("private_key"))?,
        )?;
        Ok(Self {
            id: structure.id.ok_or(RecordError::MissingField("id"))?,
            timestamp: structure
                .timestamp
                .ok_or(RecordError::MissingField("timestamp"))?,
            key_pair: KeyPair::new(public_key, private_key),
            signature: structure
                .signature
                .ok_or(RecordError::MissingField("signature"))?,
        })
    }
}

/// Prekey record as held behind an opaque handle.
#[derive(Clone)]
pub struct PreKeyRecord {
    id: u32,
    key_pair: KeyPair,
}

impl PreKeyRecord {
    pub(crate) fn new(id: u32, key_pair: KeyPair) -> Self {
        Self { id, key_pair }
    }

    pub(crate) fn id(&self) -> u32 {
        self.id
    }

    pub(crate) fn key_pair(&self) -> &KeyPair {
        &self.key_pair
    }

    pub(crate) fn serialize(&self) -> Vec<u8> {
        proto::PreKeyRecordStructure {
            id: Some(self.id),
            public_key: Some(self.key_pair.public_key.serialize()),
            private_key: Some(self.key_pair.private_key.serialize()),
        }
        .encode_to_vec()
    }

    pub(crate) fn deserialize(bytes: &[u8]) -> Result<Self, RecordError> {
        let structure = proto::PreKeyRecordStructure::decode(bytes)?;
        let public_key = PublicKey::deserialize(
            structure
                .public_key
                .as_deref()
                .ok_or(RecordError::MissingField("public_key"))?,
        )?;
        let private_key = PrivateKey::deserialize(
            structure
                .private_key
                .as_deref()
                .ok_or(RecordError::MissingField("private_key"))?,
        )?;
        Ok(Self {
            id: structure.id.ok_or(RecordError::MissingField("id"))?,
            key_pair: KeyPair::new(public_key, private_key),
        })
    }
}
