//! Target type for mining difficulty

use crate::core::constants::TARGET_SIZE;
use crate::core::{Hash, Uint256};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Represents a 256-bit mining target (difficulty threshold)
///
/// A PoW hash, interpreted as a little-endian 256-bit integer, meets the
/// target when it is strictly below it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Target(Uint256);

impl Target {
    /// Create a Target from a 256-bit value
    pub const fn from_uint(value: Uint256) -> Self {
        Self(value)
    }

    /// Create a Target from 32 little-endian bytes
    pub fn from_le_bytes(bytes: [u8; TARGET_SIZE]) -> Self {
        Self(Uint256::from_le_bytes(bytes))
    }

    /// Create a Target from a little-endian byte slice, rejecting any length
    /// other than 32
    pub fn from_slice(slice: &[u8]) -> Result<Self> {
        if slice.len() != TARGET_SIZE {
            return Err(Error::invalid_target(format!(
                "expected {} bytes, got {}",
                TARGET_SIZE,
                slice.len()
            )));
        }

        let mut bytes = [0u8; TARGET_SIZE];
        bytes.copy_from_slice(slice);
        Ok(Self::from_le_bytes(bytes))
    }

    /// Decode a Target from a compact "bits" difficulty encoding
    ///
    /// Decoding is mechanical per [`Uint256::from_compact_bits`] and accepts
    /// every 32-bit input.
    pub fn from_compact_bits(bits: u32) -> Self {
        Self(Uint256::from_compact_bits(bits))
    }

    /// Create a Target from a hex string of the little-endian byte array
    pub fn from_hex(hex: &str) -> Result<Self> {
        let bytes =
            hex::decode(hex).map_err(|e| Error::invalid_target(format!("invalid hex: {}", e)))?;
        Self::from_slice(&bytes)
    }

    /// Get the target as a 256-bit value
    pub const fn as_uint(&self) -> Uint256 {
        self.0
    }

    /// Get the target as 32 little-endian bytes
    pub fn to_le_bytes(&self) -> [u8; TARGET_SIZE] {
        self.0.to_le_bytes()
    }

    /// Convert to a hex string of the little-endian byte array
    pub fn to_hex(&self) -> String {
        hex::encode(self.to_le_bytes())
    }

    /// Check whether a PoW hash meets this target
    ///
    /// The hash bytes are interpreted as a little-endian 256-bit integer and
    /// must be strictly less than the target; an equal hash does not meet it.
    pub fn is_met_by(&self, hash: &Hash) -> bool {
        Uint256::from_words(hash.to_le_words()) < self.0
    }

    /// Fast 64-bit pre-filter over the most significant words
    ///
    /// Returns `false` only when the hash certainly does not meet the target,
    /// so it never rejects a winning hash. A `true` result is NOT sufficient
    /// for submission; the full [`Target::is_met_by`] comparison is the sole
    /// authority.
    pub fn prefilter(&self, hash: &Hash) -> bool {
        let hash_high = Uint256::from_words(hash.to_le_words()).high_word();
        hash_high <= self.0.high_word()
    }
}

impl From<Uint256> for Target {
    fn from(value: Uint256) -> Self {
        Self(value)
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl Serialize for Target {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Target {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let hex = String::deserialize(deserializer)?;
        Self::from_hex(&hex).map_err(serde::de::Error::custom)
    }
}
