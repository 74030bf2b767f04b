//! Xoshiro256++ pseudorandom generator used for matrix generation
//!
//! The output stream must be bit-for-bit reproducible across platforms: any
//! divergence desynchronizes every matrix generated downstream and silently
//! breaks protocol compatibility.

use crate::core::Hash;

/// Deterministic 256-bit-state generator producing 64-bit words
#[derive(Debug, Clone)]
pub struct XoShiRo256PlusPlus {
    s0: u64,
    s1: u64,
    s2: u64,
    s3: u64,
}

impl XoShiRo256PlusPlus {
    /// Seed the generator from a 32-byte hash, interpreted as four
    /// little-endian 64-bit words
    pub fn new(hash: &Hash) -> Self {
        let [s0, s1, s2, s3] = hash.to_le_words();
        Self { s0, s1, s2, s3 }
    }

    /// Seed the generator directly from four state words
    pub const fn from_words(s0: u64, s1: u64, s2: u64, s3: u64) -> Self {
        Self { s0, s1, s2, s3 }
    }

    /// Advance the state and return the next 64-bit word
    #[inline]
    pub fn u64(&mut self) -> u64 {
        let result = self
            .s0
            .wrapping_add(self.s3)
            .rotate_left(23)
            .wrapping_add(self.s0);
        let t = self.s1 << 17;

        self.s2 ^= self.s0;
        self.s3 ^= self.s1;
        self.s1 ^= self.s2;
        self.s0 ^= self.s3;
        self.s2 ^= t;
        self.s3 = self.s3.rotate_left(45);

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_sequence() {
        // First eight outputs for the state (1, 2, 3, 4), pinned against an
        // independent reference implementation.
        let mut rng = XoShiRo256PlusPlus::from_words(1, 2, 3, 4);
        let expected = [
            0x0000000002800001u64,
            0x0000000003800067,
            0x000cc00003800067,
            0x000cc201994400b2,
            0x8012a2019ac433cd,
            0x8a69978acdee33ba,
            0xc271134733154abd,
            0xac2ba09179169e97,
        ];
        for &word in &expected {
            assert_eq!(rng.u64(), word);
        }
    }

    #[test]
    fn test_seed_from_hash() {
        // Seeding from the byte pattern 00..1f must match seeding from its
        // little-endian word view.
        let hash = Hash::from_bytes(std::array::from_fn(|i| i as u8));
        let mut rng = XoShiRo256PlusPlus::new(&hash);
        let expected = [
            0x171513110f151311u64,
            0xa2209f1d9c1e9d1b,
            0xe0d100f0a090c0b0,
            0xf4601386bb253984,
            0xf9bad1aa0181e716,
            0x56ee6ac1eb074678,
            0xa2c6016e965fd65b,
            0xa71aba53114eaae0,
        ];
        for &word in &expected {
            assert_eq!(rng.u64(), word);
        }
    }

    #[test]
    fn test_determinism_across_instances() {
        let hash = Hash::from_bytes([0xab; 32]);
        let mut a = XoShiRo256PlusPlus::new(&hash);
        let mut b = XoShiRo256PlusPlus::new(&hash);
        for _ in 0..1024 {
            assert_eq!(a.u64(), b.u64());
        }
    }

    #[test]
    fn test_zero_state_is_fixed_point() {
        // The all-zero state only ever emits zeros; matrix generation guards
        // against it with a retry cap.
        let mut rng = XoShiRo256PlusPlus::from_words(0, 0, 0, 0);
        for _ in 0..64 {
            assert_eq!(rng.u64(), 0);
        }
    }
}
