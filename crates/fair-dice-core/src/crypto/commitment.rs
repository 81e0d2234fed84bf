//! SecretKey and Commitment for the HMAC commit-reveal scheme.

use super::CryptoProvider;
use crate::error::{FairDiceError, Result};
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use std::fmt;
use std::str::FromStr;
use zeroize::{Zeroize, ZeroizeOnDrop};

type HmacSha256 = Hmac<Sha256>;

/// Length of a protocol secret key in bytes
pub const SECRET_KEY_LEN: usize = 32;

/// Encode a secret value as the HMAC message.
///
/// Decimal ASCII without sign or leading zeros, so each value has exactly one
/// encoding and a human can recompute the tag with any HMAC-SHA256 tool.
pub fn encode_value(value: u64) -> Vec<u8> {
    value.to_string().into_bytes()
}

/// HMAC-SHA256 of `message` under `key`
pub fn hmac_sha256(key: &[u8], message: &[u8]) -> Result<[u8; 32]> {
    let mut mac =
        HmacSha256::new_from_slice(key).map_err(|_| FairDiceError::InvalidKeyLength)?;
    mac.update(message);
    Ok(mac.finalize().into_bytes().into())
}

/// Check `tag` against HMAC-SHA256 of `message` in constant time
pub fn verify_hmac_sha256(key: &[u8], message: &[u8], tag: &[u8]) -> Result<()> {
    let mut mac =
        HmacSha256::new_from_slice(key).map_err(|_| FairDiceError::InvalidKeyLength)?;
    mac.update(message);
    mac.verify_slice(tag)
        .map_err(|_| FairDiceError::CommitmentMismatch)
}

/// Fresh 256-bit key for a single protocol run, wiped on drop
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop, Serialize, Deserialize)]
pub struct SecretKey(#[serde(with = "super::hex32")] [u8; SECRET_KEY_LEN]);

impl SecretKey {
    /// Draw a new key from the provider
    pub fn generate<P: CryptoProvider + ?Sized>(provider: &mut P) -> Result<Self> {
        let mut bytes = [0u8; SECRET_KEY_LEN];
        provider.fill_bytes(&mut bytes)?;
        Ok(Self(bytes))
    }

    /// Create from raw bytes
    pub fn from_bytes(bytes: [u8; SECRET_KEY_LEN]) -> Self {
        Self(bytes)
    }

    /// Get the underlying bytes
    pub fn as_bytes(&self) -> &[u8; SECRET_KEY_LEN] {
        &self.0
    }

    /// Uppercase hex, the form shown to the player at reveal time
    pub fn to_hex_upper(&self) -> String {
        hex::encode_upper(self.0)
    }
}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SecretKey({}..)", hex::encode(&self.0[..8]))
    }
}

impl FromStr for SecretKey {
    type Err = FairDiceError;

    fn from_str(s: &str) -> Result<Self> {
        Ok(Self(decode_hex32(s)?))
    }
}

/// Commitment = HMAC-SHA256(key, decimal(value))
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Commitment(#[serde(with = "super::hex32")] [u8; 32]);

impl Commitment {
    /// Commit to `value` under `key`
    pub fn new(key: &SecretKey, value: u64) -> Result<Self> {
        hmac_sha256(key.as_bytes(), &encode_value(value)).map(Self)
    }

    /// Create from raw bytes
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Get the underlying bytes
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Verify that the given key and value produce this commitment
    pub fn verify(&self, key: &SecretKey, value: u64) -> Result<()> {
        verify_hmac_sha256(key.as_bytes(), &encode_value(value), &self.0)
    }
}

impl fmt::Debug for Commitment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Commitment({})", hex::encode(&self.0[..8]))
    }
}

impl fmt::Display for Commitment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

impl FromStr for Commitment {
    type Err = FairDiceError;

    fn from_str(s: &str) -> Result<Self> {
        Ok(Self(decode_hex32(s)?))
    }
}

fn decode_hex32(s: &str) -> Result<[u8; 32]> {
    let bytes = hex::decode(s.trim())
        .map_err(|e| FairDiceError::MalformedTranscript(e.to_string()))?;
    <[u8; 32]>::try_from(bytes.as_slice()).map_err(|_| {
        FairDiceError::MalformedTranscript(format!("expected 32 bytes, got {}", bytes.len()))
    })
}
