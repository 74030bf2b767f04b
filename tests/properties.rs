//! Property-based tests for the PoW kernel
//!
//! These verify the observable contracts: determinism, batch/single
//! equivalence, the full-rank invariant, compact-target monotonicity, and
//! strict comparison boundaries.

use kheavyhash::core::XoShiRo256PlusPlus;
use kheavyhash::hashing::{XofDomain, xof_hash};
use kheavyhash::pow;
use kheavyhash::{Hash, Matrix, Target, Uint256};
use proptest::prelude::*;

/// Matrix generation dominates the runtime of these cases, so keep the case
/// counts modest.
fn matrix_cases() -> ProptestConfig {
    ProptestConfig {
        cases: 12,
        ..ProptestConfig::default()
    }
}

proptest! {
    #![proptest_config(matrix_cases())]

    #[test]
    fn compute_pow_is_deterministic(
        digest in prop::array::uniform32(any::<u8>()),
        timestamp in any::<u64>(),
        nonce in any::<u64>()
    ) {
        let pre_pow = Hash::from_bytes(digest);
        let matrix = pow::generate_matrix(&pre_pow).unwrap();
        prop_assert_eq!(
            pow::compute_pow(&pre_pow, timestamp, nonce, &matrix),
            pow::compute_pow(&pre_pow, timestamp, nonce, &matrix)
        );
    }

    #[test]
    fn batch_equals_repeated_single_calls(
        digest in prop::array::uniform32(any::<u8>()),
        timestamp in any::<u64>(),
        nonces in prop::collection::vec(any::<u64>(), 0..8)
    ) {
        let pre_pow = Hash::from_bytes(digest);
        let matrix = pow::generate_matrix(&pre_pow).unwrap();

        let batch = pow::compute_pow_batch(&pre_pow, timestamp, &nonces, &matrix);
        prop_assert_eq!(batch.len(), nonces.len());
        for (&nonce, (batch_nonce, batch_hash)) in nonces.iter().zip(batch) {
            prop_assert_eq!(batch_nonce, nonce);
            prop_assert_eq!(batch_hash, pow::compute_pow(&pre_pow, timestamp, nonce, &matrix));
        }
    }

    #[test]
    fn generated_matrices_are_full_rank(digest in prop::array::uniform32(any::<u8>())) {
        let matrix = pow::generate_matrix(&Hash::from_bytes(digest)).unwrap();

        // Every cell fits in 4 bits and the rows pass the independent
        // validation path, which re-runs the rank computation.
        prop_assert!(matrix.rows().iter().flatten().all(|&v| v <= 0x0F));
        prop_assert!(Matrix::from_rows(*matrix.rows()).is_ok());
    }
}

proptest! {
    #[test]
    fn prng_streams_are_reproducible(seed in prop::array::uniform4(any::<u64>())) {
        let mut a = XoShiRo256PlusPlus::from_words(seed[0], seed[1], seed[2], seed[3]);
        let mut b = XoShiRo256PlusPlus::from_words(seed[0], seed[1], seed[2], seed[3]);
        for _ in 0..64 {
            prop_assert_eq!(a.u64(), b.u64());
        }
    }

    #[test]
    fn compact_target_grows_with_exponent(
        coefficient in 0u32..0x0100_0000,
        low in 0u32..=32,
        high in 0u32..=32
    ) {
        // Within the exponent range whose shifts stay inside 256 bits, a
        // larger exponent never yields a smaller target.
        let (low, high) = (low.min(high), low.max(high));
        let small = Target::from_compact_bits((low << 24) | coefficient);
        let large = Target::from_compact_bits((high << 24) | coefficient);
        prop_assert!(small.as_uint() <= large.as_uint());
    }

    #[test]
    fn hash_never_meets_itself(bytes in prop::array::uniform32(any::<u8>())) {
        let hash = Hash::from_bytes(bytes);
        let target = Target::from_le_bytes(bytes);
        prop_assert!(!pow::meets_target(&hash, &target));
    }

    #[test]
    fn meeting_the_target_implies_prefilter(
        hash in prop::array::uniform32(any::<u8>()),
        target in prop::array::uniform32(any::<u8>())
    ) {
        let hash = Hash::from_bytes(hash);
        let target = Target::from_le_bytes(target);
        if pow::meets_target(&hash, &target) {
            prop_assert!(target.prefilter(&hash));
        }
    }

    #[test]
    fn xof_domains_never_collide(data in prop::collection::vec(any::<u8>(), 0..128)) {
        prop_assert_ne!(
            xof_hash(XofDomain::ProofOfWorkHash, &data),
            xof_hash(XofDomain::HeavyHash, &data)
        );
    }

    #[test]
    fn uint256_ordering_is_total(
        a in prop::array::uniform4(any::<u64>()),
        b in prop::array::uniform4(any::<u64>())
    ) {
        let a = Uint256::from_words(a);
        let b = Uint256::from_words(b);
        prop_assert_eq!(a < b, b > a);
        prop_assert_eq!(a == b, !(a < b) && !(b < a));
    }
}
