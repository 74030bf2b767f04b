//! Domain-separated hash primitives
//!
//! Two hashing surfaces, each tagged per purpose so that hashing the same
//! bytes for different purposes yields unrelated outputs:
//!
//! - a keyed fixed-digest hash (blake2b-256 with the domain as the *key*
//!   parameter), used for header and transaction identity hashing by the
//!   surrounding layers;
//! - a customization-tagged extendable-output hash (cSHAKE256 squeezed to 32
//!   bytes) with the `ProofOfWorkHash` and `HeavyHash` domains used by the
//!   PoW pipeline.
//!
//! The domain tag is always the hash function's key or customization
//! parameter, never data prepended to the input. All hashers are plain owned
//! values with no ambient state.

use crate::core::Hash;
use crate::core::constants::HASH_SIZE;
use sha3::digest::{ExtendableOutput, Update, XofReader};
use sha3::{CShake256, CShake256Core};

/// Domain tags for the keyed fixed-digest hash
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyedDomain {
    /// Block header identity hashing
    BlockHash,
    /// Transaction hashing
    TransactionHash,
    /// Transaction identity hashing
    TransactionID,
    /// Merkle branch hashing
    MerkleBranchHash,
}

impl KeyedDomain {
    /// The blake2b key bytes for this domain
    pub const fn key(self) -> &'static [u8] {
        match self {
            Self::BlockHash => b"BlockHash",
            Self::TransactionHash => b"TransactionHash",
            Self::TransactionID => b"TransactionID",
            Self::MerkleBranchHash => b"MerkleBranchHash",
        }
    }
}

/// Streaming keyed blake2b-256 hasher
#[derive(Clone)]
pub struct KeyedHasher {
    state: blake2b_simd::State,
}

impl KeyedHasher {
    /// Create a hasher keyed with the given domain
    pub fn new(domain: KeyedDomain) -> Self {
        let state = blake2b_simd::Params::new()
            .hash_length(HASH_SIZE)
            .key(domain.key())
            .to_state();
        Self { state }
    }

    /// Absorb more input
    pub fn update(&mut self, data: &[u8]) -> &mut Self {
        self.state.update(data);
        self
    }

    /// Finalize into a 32-byte hash
    pub fn finalize(&self) -> Hash {
        let digest = self.state.finalize();
        let mut bytes = [0u8; HASH_SIZE];
        bytes.copy_from_slice(digest.as_bytes());
        Hash::from_bytes(bytes)
    }

    /// One-shot keyed hash of a byte string
    pub fn hash(domain: KeyedDomain, data: &[u8]) -> Hash {
        let mut hasher = Self::new(domain);
        hasher.update(data);
        hasher.finalize()
    }
}

/// Domain tags for the extendable-output hash
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum XofDomain {
    /// First pass over the 80-byte PoW header
    ProofOfWorkHash,
    /// Final pass over the post-XOR digest
    HeavyHash,
}

impl XofDomain {
    /// The cSHAKE256 customization string for this domain
    pub const fn customization(self) -> &'static [u8] {
        match self {
            Self::ProofOfWorkHash => b"ProofOfWorkHash",
            Self::HeavyHash => b"HeavyHash",
        }
    }
}

/// One-shot customization-tagged cSHAKE256, squeezed to exactly 32 bytes
pub fn xof_hash(domain: XofDomain, data: &[u8]) -> Hash {
    let hasher = CShake256::from_core(CShake256Core::new(domain.customization())).chain(data);
    squeeze(hasher)
}

/// Hasher for the first PoW pass, pre-absorbing the per-template prefix
///
/// Construction absorbs `pre_pow_hash || timestamp || 32 zero bytes` once;
/// [`PowHasher::finalize_with_nonce`] appends only the nonce, so hashing many
/// nonces against one template skips re-absorbing the 72-byte prefix. The
/// result is identical to one-shot hashing of the full 80-byte header.
#[derive(Debug, Clone)]
pub struct PowHasher {
    hasher: CShake256,
}

impl PowHasher {
    /// Absorb the header prefix for one template
    pub fn new(pre_pow_hash: &Hash, timestamp: u64) -> Self {
        let mut hasher =
            CShake256::from_core(CShake256Core::new(XofDomain::ProofOfWorkHash.customization()));
        hasher.update(pre_pow_hash.as_bytes());
        hasher.update(&timestamp.to_le_bytes());
        // 32 zero padding bytes between the timestamp and the nonce.
        hasher.update(&[0u8; 32]);
        Self { hasher }
    }

    /// Append the nonce and squeeze the 32-byte first-pass hash
    pub fn finalize_with_nonce(self, nonce: u64) -> Hash {
        let hasher = self.hasher.chain(nonce.to_le_bytes());
        squeeze(hasher)
    }
}

/// Hasher for the final PoW pass
pub struct HeavyHasher;

impl HeavyHasher {
    /// Hash the post-XOR digest under the `HeavyHash` domain
    pub fn hash(digest: &Hash) -> Hash {
        xof_hash(XofDomain::HeavyHash, digest.as_bytes())
    }
}

fn squeeze(hasher: CShake256) -> Hash {
    let mut bytes = [0u8; HASH_SIZE];
    hasher.finalize_xof().read(&mut bytes);
    Hash::from_bytes(bytes)
}
