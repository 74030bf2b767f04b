//! Core types for the proof-of-work kernel
//!
//! This module contains the fundamental types used throughout the kernel:
//! Hash, Uint256, Target, the Xoshiro256++ generator, and the heavy-hash
//! Matrix.

mod hash;
mod matrix;
mod target;
mod uint256;
mod xoshiro;

pub use hash::Hash;
pub use matrix::{MAX_GENERATION_ATTEMPTS, Matrix};
pub use target::Target;
pub use uint256::Uint256;
pub use xoshiro::XoShiRo256PlusPlus;

/// Constants for the proof-of-work header layout
pub mod constants {
    /// Size of a hash in bytes
    pub const HASH_SIZE: usize = 32;

    /// Size of the target in bytes
    pub const TARGET_SIZE: usize = 32;

    /// Size of the PoW header in bytes
    pub const HEADER_SIZE: usize = 80;

    /// Offset of the little-endian timestamp in the header
    pub const TIMESTAMP_OFFSET: usize = HASH_SIZE;

    /// Offset of the zero padding in the header
    pub const PADDING_OFFSET: usize = TIMESTAMP_OFFSET + 8;

    /// Offset of the little-endian nonce in the header
    pub const NONCE_OFFSET: usize = PADDING_OFFSET + 32;

    /// Size of the nonce in bytes
    pub const NONCE_SIZE: usize = 8;

    /// Row and column count of the heavy-hash matrix
    pub const MATRIX_SIZE: usize = 64;

    /// Nibbles unpacked from each PRNG word while filling a matrix row
    pub const NIBBLES_PER_WORD: usize = 16;
}

#[cfg(test)]
mod tests {
    use super::constants::*;

    #[test]
    fn test_header_layout_constants() {
        assert_eq!(HEADER_SIZE, 80);
        assert_eq!(TIMESTAMP_OFFSET, 32);
        assert_eq!(PADDING_OFFSET, 40);
        assert_eq!(NONCE_OFFSET, 72);
        assert_eq!(NONCE_OFFSET + NONCE_SIZE, HEADER_SIZE);
        assert_eq!(MATRIX_SIZE % NIBBLES_PER_WORD, 0);
        // One matrix row consumes the nibbles of exactly four PRNG words.
        assert_eq!(MATRIX_SIZE / NIBBLES_PER_WORD, 4);
    }
}
