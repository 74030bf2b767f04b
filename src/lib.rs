//! # kHeavyHash
//!
//! A bit-exact implementation of the kHeavyHash proof-of-work kernel used by
//! BlockDAG-based miners: given a block candidate's 32-byte pre-PoW digest, a
//! timestamp, and a nonce, it deterministically produces a 256-bit PoW hash
//! and compares it against a difficulty target.
//!
//! ## Pipeline
//!
//! - **Matrix generation** (once per template): a Xoshiro256++ generator
//!   seeded from the pre-PoW digest fills a 64x64 matrix of 4-bit values,
//!   regenerating until it is full rank over the reals.
//! - **Per nonce**: the 80-byte header is hashed under the `ProofOfWorkHash`
//!   cSHAKE256 domain, multiplied through the matrix with a nonlinear
//!   quantization, XORed back into the digest, and finalized under the
//!   `HeavyHash` domain.
//! - **Target check**: the PoW hash, read as a little-endian 256-bit integer,
//!   must be strictly below the target.
//!
//! Every step is pure and synchronous; the crate performs no I/O and keeps no
//! global state. The [`pow::PowState`] type caches the per-template values so
//! worker threads can share one state read-only and try nonces independently.
//!
//! ## Example
//!
//! ```
//! use kheavyhash::{Hash, Target, pow};
//!
//! let pre_pow = Hash::from_bytes([0x42; 32]);
//! let matrix = pow::generate_matrix(&pre_pow)?;
//! let pow_hash = pow::compute_pow(&pre_pow, 1_700_000_000, 12345, &matrix);
//!
//! let target = Target::from_compact_bits(0x2070_0000);
//! let _accepted = pow::meets_target(&pow_hash, &target);
//! # Ok::<(), kheavyhash::Error>(())
//! ```

#![warn(
    missing_docs,
    rust_2018_idioms,
    unused_lifetimes,
    unused_qualifications,
    clippy::all
)]
#![forbid(unsafe_code)]

pub mod core;
pub mod error;
pub mod hashing;
pub mod pow;

pub use crate::core::{Hash, Matrix, Target, Uint256};
pub use crate::error::{Error, Result};
pub use crate::pow::PowState;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Re-export commonly used types
pub mod prelude {
    pub use crate::{
        core::{Hash, Matrix, Target, Uint256},
        error::{Error, Result},
        hashing::{KeyedDomain, KeyedHasher, PowHasher, XofDomain},
        pow::{PowState, compute_pow, compute_pow_batch, generate_matrix, meets_target},
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
