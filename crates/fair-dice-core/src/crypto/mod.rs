//! Cryptographic primitives for the fair number protocol.
//!
//! This module provides:
//! - CryptoProvider capability for secure random bytes and unbiased integers
//! - SecretKey and Commitment for the HMAC commit-reveal scheme

mod commitment;
mod provider;

pub use commitment::{
    encode_value, hmac_sha256, verify_hmac_sha256, Commitment, SecretKey, SECRET_KEY_LEN,
};
pub use provider::{CryptoProvider, OsCryptoProvider, SeededCryptoProvider};

/// Serde helpers for 32-byte values carried as hex strings
pub(crate) mod hex32 {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8; 32], s: S) -> Result<S::Ok, S::Error> {
        hex::encode(bytes).serialize(s)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<[u8; 32], D::Error> {
        let hex_str = String::deserialize(d)?;
        let bytes = hex::decode(&hex_str).map_err(serde::de::Error::custom)?;
        <[u8; 32]>::try_from(bytes.as_slice())
            .map_err(|_| serde::de::Error::custom("expected 32 bytes"))
    }
}
