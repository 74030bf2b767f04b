//! 64x64 nibble matrix generation and the heavy-hash step
//!
//! One matrix is generated per block template from the pre-PoW digest and is
//! then shared read-only across every nonce attempt for that template. The
//! generator rejection-samples until the matrix is full rank over the reals;
//! the rank computation must match the reference floating-point semantics
//! exactly (same epsilon, same elimination order), because rank is a
//! pass/fail gate on which matrices the network accepts.

use crate::core::constants::{MATRIX_SIZE, NIBBLES_PER_WORD};
use crate::core::{Hash, XoShiRo256PlusPlus};
use crate::error::{Error, Result};
use crate::hashing::HeavyHasher;
use tracing::{debug, warn};

/// Epsilon for the Gaussian elimination pivot test
const RANK_EPSILON: f64 = 1e-9;

/// Retry cap for the generation loop
///
/// Rank deficiency is rare, so the loop almost always exits on the first
/// attempt; the cap exists so a degenerate seed (such as the all-zero PRNG
/// fixed point) surfaces an error instead of hanging.
pub const MAX_GENERATION_ATTEMPTS: usize = 256;

/// A 64x64 matrix of 4-bit values, guaranteed full rank
///
/// Cells are stored widened to `u16`. Immutable after construction; safe to
/// share across worker threads for the lifetime of one template.
#[derive(Clone, PartialEq, Eq)]
pub struct Matrix([[u16; MATRIX_SIZE]; MATRIX_SIZE]);

impl Matrix {
    /// Generate the matrix for a pre-PoW digest
    ///
    /// Seeds the PRNG from the digest's four little-endian words and fills
    /// rows with unpacked nibbles, least significant first. A rank-deficient
    /// fill is discarded and the matrix is rebuilt from the advanced PRNG
    /// state, so the result is still deterministic for a given digest.
    pub fn generate(pre_pow_hash: &Hash) -> Result<Self> {
        let mut rng = XoShiRo256PlusPlus::new(pre_pow_hash);

        for attempt in 1..=MAX_GENERATION_ATTEMPTS {
            let mut rows = [[0u16; MATRIX_SIZE]; MATRIX_SIZE];

            for row in rows.iter_mut() {
                for chunk in 0..(MATRIX_SIZE / NIBBLES_PER_WORD) {
                    let word = rng.u64();
                    for k in 0..NIBBLES_PER_WORD {
                        row[chunk * NIBBLES_PER_WORD + k] = ((word >> (4 * k)) & 0x0F) as u16;
                    }
                }
            }

            if compute_rank(&rows) == MATRIX_SIZE {
                return Ok(Self(rows));
            }
            debug!(attempt, digest = %pre_pow_hash, "matrix rank-deficient, regenerating");
        }

        warn!(
            digest = %pre_pow_hash,
            attempts = MAX_GENERATION_ATTEMPTS,
            "matrix generation retry cap exhausted"
        );
        Err(Error::matrix_generation(format!(
            "no full-rank matrix after {} attempts for digest {}",
            MAX_GENERATION_ATTEMPTS, pre_pow_hash
        )))
    }

    /// Build a matrix from externally supplied rows
    ///
    /// Rejects cells outside the 4-bit range and rank-deficient matrices.
    pub fn from_rows(rows: [[u16; MATRIX_SIZE]; MATRIX_SIZE]) -> Result<Self> {
        for (i, row) in rows.iter().enumerate() {
            for (j, &cell) in row.iter().enumerate() {
                if cell > 0x0F {
                    return Err(Error::invalid_matrix(format!(
                        "cell ({}, {}) value {} exceeds 4 bits",
                        i, j, cell
                    )));
                }
            }
        }

        let rank = compute_rank(&rows);
        if rank != MATRIX_SIZE {
            return Err(Error::invalid_matrix(format!(
                "rank {} instead of {}",
                rank, MATRIX_SIZE
            )));
        }

        Ok(Self(rows))
    }

    /// Get the matrix rows
    pub fn rows(&self) -> &[[u16; MATRIX_SIZE]; MATRIX_SIZE] {
        &self.0
    }

    /// Apply the heavy-hash step to a 32-byte digest
    ///
    /// Unpacks the digest into 64 nibbles (high nibble of byte `i` at index
    /// `2i`), multiplies by the matrix with u64 accumulators, quantizes each
    /// row sum with a 10-bit right shift masked to the low nibble, XORs the
    /// repacked nibbles into the digest, and finalizes with the `HeavyHash`
    /// domain hash.
    pub fn heavy_hash(&self, hash: Hash) -> Hash {
        let bytes = hash.as_bytes();

        let mut vector = [0u16; MATRIX_SIZE];
        for (i, &byte) in bytes.iter().enumerate() {
            vector[2 * i] = u16::from(byte >> 4);
            vector[2 * i + 1] = u16::from(byte & 0x0F);
        }

        let mut product = [0u8; MATRIX_SIZE];
        for (row, out) in self.0.iter().zip(product.iter_mut()) {
            let mut sum = 0u64;
            for (&cell, &v) in row.iter().zip(vector.iter()) {
                sum += u64::from(cell) * u64::from(v);
            }
            // The shift-then-mask quantization is part of the protocol; any
            // other rounding breaks compatibility.
            *out = ((sum >> 10) & 0x0F) as u8;
        }

        let mut digest = [0u8; 32];
        for (i, out) in digest.iter_mut().enumerate() {
            *out = bytes[i] ^ ((product[2 * i] << 4) | product[2 * i + 1]);
        }

        HeavyHasher::hash(&Hash::from_bytes(digest))
    }
}

impl std::fmt::Debug for Matrix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Matrix")
            .field("size", &MATRIX_SIZE)
            .field("row0", &&self.0[0][..8])
            .finish()
    }
}

/// Compute the rank of the matrix over the reals
///
/// Gaussian elimination with the reference pivot order: for each column, the
/// first unselected row with a non-negligible entry becomes the pivot, is
/// normalized, and is eliminated from every other row with a non-negligible
/// entry in that column.
fn compute_rank(rows: &[[u16; MATRIX_SIZE]; MATRIX_SIZE]) -> usize {
    let mut mat = [[0f64; MATRIX_SIZE]; MATRIX_SIZE];
    for (dst, src) in mat.iter_mut().zip(rows.iter()) {
        for (cell, &value) in dst.iter_mut().zip(src.iter()) {
            *cell = f64::from(value);
        }
    }

    let mut row_selected = [false; MATRIX_SIZE];
    let mut rank = 0;

    for i in 0..MATRIX_SIZE {
        let mut j = 0;
        while j < MATRIX_SIZE {
            if !row_selected[j] && mat[j][i].abs() > RANK_EPSILON {
                break;
            }
            j += 1;
        }

        if j != MATRIX_SIZE {
            rank += 1;
            row_selected[j] = true;

            let divisor = mat[j][i];
            for p in (i + 1)..MATRIX_SIZE {
                mat[j][p] /= divisor;
            }

            for k in 0..MATRIX_SIZE {
                if k != j && mat[k][i].abs() > RANK_EPSILON {
                    let factor = mat[k][i];
                    for p in (i + 1)..MATRIX_SIZE {
                        mat[k][p] -= mat[j][p] * factor;
                    }
                }
            }
        }
    }

    rank
}
