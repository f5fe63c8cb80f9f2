//! Plain SHA-256 hashing, used for tx/block ids, the address derivation and
//! the Merkle leaves. Replaces the teacher's `FractalHasher`.

use sha2::{Digest, Sha256};

/// `hash_sha256(bytes) -> [u8; 32]` per the crypto contract.
pub fn hash_sha256(bytes: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    let digest = hasher.finalize();
    let mut out = [0u8; 32];
    out.copy_from_slice(&digest);
    out
}

/// `to_address(pub_key) := SHA256(pub_key)` per the crypto contract.
pub fn to_address(pub_key: &[u8]) -> [u8; 32] {
    hash_sha256(pub_key)
}

/// Counts leading zero bits of a hash, the PoW difficulty metric used by
/// `block_validator` and `miner_supervisor`.
pub fn leading_zero_bits(hash: &[u8; 32]) -> u32 {
    let mut count = 0u32;
    for byte in hash {
        if *byte == 0 {
            count += 8;
            continue;
        }
        count += byte.leading_zeros();
        break;
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_is_deterministic() {
        assert_eq!(hash_sha256(b"weave"), hash_sha256(b"weave"));
        assert_ne!(hash_sha256(b"weave"), hash_sha256(b"other"));
    }

    #[test]
    fn zero_hash_has_256_leading_zero_bits() {
        assert_eq!(leading_zero_bits(&[0u8; 32]), 256);
    }

    #[test]
    fn leading_zero_bits_counts_first_nonzero_byte() {
        let mut h = [0u8; 32];
        h[3] = 0b0010_0000;
        assert_eq!(leading_zero_bits(&h), 3 * 8 + 2);
    }
}
