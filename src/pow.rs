//! Proof-of-work operations
//!
//! The operations exposed to the templating/submission layers: matrix
//! generation, single and batch PoW computation, and the target check.
//! [`PowState`] bundles the per-template values (full-rank matrix, decoded
//! target, pre-absorbed first-pass hasher) so worker threads can share one
//! immutable state and try nonces independently.

use crate::core::constants::{HEADER_SIZE, NONCE_OFFSET, TIMESTAMP_OFFSET};
use crate::core::{Hash, Matrix, Target};
use crate::error::Result;
use crate::hashing::PowHasher;

/// Build the 80-byte PoW header
///
/// Layout: 32-byte pre-PoW digest, 8-byte little-endian timestamp, 32 zero
/// bytes of padding, 8-byte little-endian nonce.
pub fn build_header(pre_pow_hash: &Hash, timestamp: u64, nonce: u64) -> [u8; HEADER_SIZE] {
    let mut header = [0u8; HEADER_SIZE];
    header[..TIMESTAMP_OFFSET].copy_from_slice(pre_pow_hash.as_bytes());
    header[TIMESTAMP_OFFSET..TIMESTAMP_OFFSET + 8].copy_from_slice(&timestamp.to_le_bytes());
    header[NONCE_OFFSET..].copy_from_slice(&nonce.to_le_bytes());
    header
}

/// Generate the heavy-hash matrix for a pre-PoW digest
///
/// Deterministic for a given digest; regenerates internally until the matrix
/// is full rank. One matrix serves every nonce attempt for its template.
pub fn generate_matrix(pre_pow_hash: &Hash) -> Result<Matrix> {
    Matrix::generate(pre_pow_hash)
}

/// Compute the PoW hash for a single nonce
pub fn compute_pow(pre_pow_hash: &Hash, timestamp: u64, nonce: u64, matrix: &Matrix) -> Hash {
    let first_pass = PowHasher::new(pre_pow_hash, timestamp).finalize_with_nonce(nonce);
    matrix.heavy_hash(first_pass)
}

/// Compute PoW hashes for a batch of nonces
///
/// Element-wise identical to repeated [`compute_pow`] calls; the batch form
/// only amortizes the first-pass header prefix across the nonces.
pub fn compute_pow_batch(
    pre_pow_hash: &Hash,
    timestamp: u64,
    nonces: &[u64],
    matrix: &Matrix,
) -> Vec<(u64, Hash)> {
    let hasher = PowHasher::new(pre_pow_hash, timestamp);
    nonces
        .iter()
        .map(|&nonce| {
            let first_pass = hasher.clone().finalize_with_nonce(nonce);
            (nonce, matrix.heavy_hash(first_pass))
        })
        .collect()
}

/// Check whether a PoW hash meets a target
///
/// The hash is interpreted as a little-endian 256-bit integer and must be
/// strictly below the target.
pub fn meets_target(pow_hash: &Hash, target: &Target) -> bool {
    target.is_met_by(pow_hash)
}

/// Pre-computed per-template mining state
///
/// Holds the full-rank matrix, the target, and the pre-absorbed first-pass
/// hasher for one block template. Immutable after construction, so many
/// worker threads can call [`PowState::calculate_pow`] and
/// [`PowState::check_pow`] concurrently on a shared reference.
#[derive(Debug)]
pub struct PowState {
    matrix: Matrix,
    target: Target,
    // pre_pow_hash || timestamp || padding, without the nonce
    hasher: PowHasher,
}

impl PowState {
    /// Build the state for one template
    ///
    /// Fails only if matrix generation exhausts its retry cap.
    pub fn new(pre_pow_hash: &Hash, timestamp: u64, target: Target) -> Result<Self> {
        let matrix = Matrix::generate(pre_pow_hash)?;
        let hasher = PowHasher::new(pre_pow_hash, timestamp);
        Ok(Self {
            matrix,
            target,
            hasher,
        })
    }

    /// The target this state checks against
    pub fn target(&self) -> Target {
        self.target
    }

    /// Compute the PoW hash for a nonce
    pub fn calculate_pow(&self, nonce: u64) -> Hash {
        let first_pass = self.hasher.clone().finalize_with_nonce(nonce);
        self.matrix.heavy_hash(first_pass)
    }

    /// Compute the PoW hash for a nonce and check it against the target
    pub fn check_pow(&self, nonce: u64) -> (bool, Hash) {
        let pow_hash = self.calculate_pow(nonce);
        (self.target.is_met_by(&pow_hash), pow_hash)
    }

    /// Try caller-supplied nonces and return the first that meets the target
    ///
    /// The caller owns nonce ordering and search strategy; this only walks
    /// the given sequence.
    pub fn find_nonce(&self, nonces: impl IntoIterator<Item = u64>) -> Option<(u64, Hash)> {
        nonces.into_iter().find_map(|nonce| {
            let (found, pow_hash) = self.check_pow(nonce);
            found.then_some((nonce, pow_hash))
        })
    }
}
