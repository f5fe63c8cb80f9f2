//! Real cryptographic primitives backing the node: SHA-256 hashing, a Merkle
//! tree over sized chunks, and RSA-PSS signing. Replaces the teacher's
//! fractal/vortex hashing layer (`crypto/fractal_hash.rs`) with plain,
//! verifiable math; only the Merkle-tree *shape* (levels -> root -> proof)
//! is carried over from that module.

pub mod hash;
pub mod merkle;
pub mod signature;

pub use hash::{hash_sha256, to_address};
pub use merkle::MerkleTree;
pub use signature::{sign, verify, KeyPair};
