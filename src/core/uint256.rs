//! 256-bit unsigned integer arithmetic for target handling
//!
//! This module provides the fixed-width arithmetic needed by the target
//! comparator: ordering, shifts, and the compact "bits" decoding. Values are
//! stored as four 64-bit words in little-endian word order.

use std::cmp::Ordering;
use std::fmt;

/// Number of 64-bit words in a 256-bit value
const WORDS: usize = 4;

/// A 256-bit unsigned integer stored as little-endian 64-bit words
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Uint256 {
    /// Words stored least significant first
    words: [u64; WORDS],
}

impl Uint256 {
    /// The zero value
    pub const ZERO: Self = Self { words: [0; WORDS] };

    /// The maximum value (2^256 - 1)
    pub const MAX: Self = Self {
        words: [u64::MAX; WORDS],
    };

    /// Create from 64-bit words (little-endian word order)
    pub const fn from_words(words: [u64; WORDS]) -> Self {
        Self { words }
    }

    /// Get the little-endian words
    pub const fn to_words(self) -> [u64; WORDS] {
        self.words
    }

    /// Create from a single 64-bit value
    pub const fn from_u64(value: u64) -> Self {
        Self {
            words: [value, 0, 0, 0],
        }
    }

    /// Create from 32 little-endian bytes
    pub fn from_le_bytes(bytes: [u8; 32]) -> Self {
        let mut words = [0u64; WORDS];
        for (i, word) in words.iter_mut().enumerate() {
            let mut buf = [0u8; 8];
            buf.copy_from_slice(&bytes[i * 8..(i + 1) * 8]);
            *word = u64::from_le_bytes(buf);
        }
        Self { words }
    }

    /// Convert to 32 little-endian bytes
    pub fn to_le_bytes(self) -> [u8; 32] {
        let mut bytes = [0u8; 32];
        for (i, word) in self.words.iter().enumerate() {
            bytes[i * 8..(i + 1) * 8].copy_from_slice(&word.to_le_bytes());
        }
        bytes
    }

    /// The most significant 64-bit word
    pub const fn high_word(self) -> u64 {
        self.words[WORDS - 1]
    }

    /// Decode a compact "bits" difficulty encoding
    ///
    /// The top byte is the exponent and the low 24 bits are the coefficient.
    /// An exponent of at most 3 right-shifts the coefficient by whole bytes;
    /// a larger exponent left-shifts it. Decoding is mechanical and total:
    /// every 32-bit input decodes to some value, shifts past 256 bits
    /// zero-fill.
    pub fn from_compact_bits(bits: u32) -> Self {
        let exponent = bits >> 24;
        let coefficient = u64::from(bits & 0x00FF_FFFF);

        if exponent <= 3 {
            Self::from_u64(coefficient >> (8 * (3 - exponent)))
        } else {
            Self::from_u64(coefficient).shl(8 * (exponent - 3))
        }
    }

    /// Shift left by n bits, zero-filling for n >= 256
    pub fn shl(self, n: u32) -> Self {
        if n >= 256 {
            return Self::ZERO;
        }

        let word_shift = (n / 64) as usize;
        let bit_shift = n % 64;

        let mut result = [0u64; WORDS];

        if bit_shift == 0 {
            for i in word_shift..WORDS {
                result[i] = self.words[i - word_shift];
            }
        } else {
            for i in word_shift..WORDS {
                let src = i - word_shift;
                result[i] = self.words[src] << bit_shift;
                if src > 0 {
                    result[i] |= self.words[src - 1] >> (64 - bit_shift);
                }
            }
        }

        Self { words: result }
    }

    /// Shift right by n bits, zero-filling for n >= 256
    pub fn shr(self, n: u32) -> Self {
        if n >= 256 {
            return Self::ZERO;
        }

        let word_shift = (n / 64) as usize;
        let bit_shift = n % 64;

        let mut result = [0u64; WORDS];

        if bit_shift == 0 {
            for i in 0..(WORDS - word_shift) {
                result[i] = self.words[i + word_shift];
            }
        } else {
            for i in 0..(WORDS - word_shift) {
                let src = i + word_shift;
                result[i] = self.words[src] >> bit_shift;
                if src + 1 < WORDS {
                    result[i] |= self.words[src + 1] << (64 - bit_shift);
                }
            }
        }

        Self { words: result }
    }

    /// True if the value is zero
    pub fn is_zero(&self) -> bool {
        self.words.iter().all(|&w| w == 0)
    }
}

impl Ord for Uint256 {
    fn cmp(&self, other: &Self) -> Ordering {
        // Compare most significant word first
        for i in (0..WORDS).rev() {
            match self.words[i].cmp(&other.words[i]) {
                Ordering::Equal => continue,
                other => return other,
            }
        }
        Ordering::Equal
    }
}

impl PartialOrd for Uint256 {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl From<u64> for Uint256 {
    fn from(value: u64) -> Self {
        Self::from_u64(value)
    }
}

impl fmt::Display for Uint256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.to_le_bytes()))
    }
}
