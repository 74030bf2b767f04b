//! 32-byte hash type used throughout the kernel

use crate::core::constants::HASH_SIZE;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Represents a 32-byte hash (pre-PoW digest or PoW hash)
///
/// The bytes are stored exactly as produced by the hash function. Whenever a
/// 256-bit integer view is needed (PRNG seeding, target comparison) the bytes
/// are interpreted little-endian via [`Hash::to_le_words`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Hash(pub [u8; HASH_SIZE]);

impl Hash {
    /// Create a new Hash from bytes
    pub const fn from_bytes(bytes: [u8; HASH_SIZE]) -> Self {
        Self(bytes)
    }

    /// Create a Hash from a byte slice, rejecting any length other than 32
    pub fn from_slice(slice: &[u8]) -> Result<Self> {
        if slice.len() != HASH_SIZE {
            return Err(Error::invalid_hash(format!(
                "expected {} bytes, got {}",
                HASH_SIZE,
                slice.len()
            )));
        }

        let mut bytes = [0u8; HASH_SIZE];
        bytes.copy_from_slice(slice);
        Ok(Self(bytes))
    }

    /// Create a Hash from a hex string
    pub fn from_hex(hex: &str) -> Result<Self> {
        let bytes =
            hex::decode(hex).map_err(|e| Error::invalid_hash(format!("invalid hex: {}", e)))?;
        Self::from_slice(&bytes)
    }

    /// Get the hash as bytes
    pub const fn as_bytes(&self) -> &[u8; HASH_SIZE] {
        &self.0
    }

    /// Consume the hash and return the byte array
    pub const fn into_bytes(self) -> [u8; HASH_SIZE] {
        self.0
    }

    /// Convert to a lowercase hex string
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// View the hash as four little-endian 64-bit words
    ///
    /// Word 0 is built from bytes 0..8, word 3 from bytes 24..32. This is the
    /// view used for PRNG seeding and for 256-bit target comparison.
    pub fn to_le_words(&self) -> [u64; 4] {
        let mut words = [0u64; 4];
        for (i, word) in words.iter_mut().enumerate() {
            let mut buf = [0u8; 8];
            buf.copy_from_slice(&self.0[i * 8..(i + 1) * 8]);
            *word = u64::from_le_bytes(buf);
        }
        words
    }

    /// Build a hash from four little-endian 64-bit words
    pub fn from_le_words(words: [u64; 4]) -> Self {
        let mut bytes = [0u8; HASH_SIZE];
        for (i, word) in words.iter().enumerate() {
            bytes[i * 8..(i + 1) * 8].copy_from_slice(&word.to_le_bytes());
        }
        Self(bytes)
    }
}

impl fmt::Debug for Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Hash({})", self.to_hex())
    }
}

impl fmt::Display for Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl From<[u8; HASH_SIZE]> for Hash {
    fn from(bytes: [u8; HASH_SIZE]) -> Self {
        Self(bytes)
    }
}

impl From<Hash> for [u8; HASH_SIZE] {
    fn from(hash: Hash) -> Self {
        hash.0
    }
}

impl Serialize for Hash {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Hash {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let hex = String::deserialize(deserializer)?;
        Self::from_hex(&hex).map_err(serde::de::Error::custom)
    }
}
