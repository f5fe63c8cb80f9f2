//! A plain SHA-256 Merkle tree over sized chunks: root plus inclusion
//! proofs. Mirrors the level-by-level shape of the teacher's
//! `FractalMerkleTree` (`add_level`/`get_root`/`get_proof`) but hashes with
//! real SHA-256 instead of the fractal/Sierpinski transform.

use super::hash::hash_sha256;

#[derive(Clone, Debug, Default)]
pub struct MerkleTree {
    levels: Vec<Vec<[u8; 32]>>,
}

impl MerkleTree {
    /// Builds a tree from leaf chunks, hashing each leaf first.
    pub fn from_chunks(chunks: &[Vec<u8>]) -> Self {
        let leaves: Vec<[u8; 32]> = chunks.iter().map(|c| hash_sha256(c)).collect();
        Self::from_leaf_hashes(leaves)
    }

    /// Builds a tree directly from pre-hashed leaves (e.g. tx ids).
    pub fn from_leaf_hashes(leaves: Vec<[u8; 32]>) -> Self {
        let mut tree = MerkleTree { levels: Vec::new() };
        if leaves.is_empty() {
            tree.levels.push(vec![[0u8; 32]]);
            return tree;
        }
        tree.add_level(leaves);
        while tree.levels.last().unwrap().len() > 1 {
            let prev = tree.levels.last().unwrap();
            let mut next = Vec::with_capacity((prev.len() + 1) / 2);
            for pair in prev.chunks(2) {
                let combined = if pair.len() == 2 {
                    [pair[0], pair[1]].concat()
                } else {
                    [pair[0], pair[0]].concat()
                };
                next.push(hash_sha256(&combined));
            }
            tree.add_level(next);
        }
        tree
    }

    pub fn add_level(&mut self, level: Vec<[u8; 32]>) {
        self.levels.push(level);
    }

    pub fn get_root(&self) -> Option<[u8; 32]> {
        self.levels.last().and_then(|l| l.first()).copied()
    }

    /// Returns the sibling hashes from leaf to root, usable to reconstruct
    /// the root given the leaf value.
    pub fn get_proof(&self, leaf_index: usize) -> Option<Vec<[u8; 32]>> {
        if self.levels.is_empty() || leaf_index >= self.levels[0].len() {
            return None;
        }
        let mut proof = Vec::new();
        let mut idx = leaf_index;
        for level in &self.levels[..self.levels.len().saturating_sub(1)] {
            let sibling = if idx % 2 == 0 {
                level.get(idx + 1).copied().unwrap_or(level[idx])
            } else {
                level[idx - 1]
            };
            proof.push(sibling);
            idx /= 2;
        }
        Some(proof)
    }
}

/// Convenience: builds the tree over a tx list's ids and returns the root,
/// matching the Block Validator's `tx_root` check.
pub fn tx_root(tx_ids: &[[u8; 32]]) -> [u8; 32] {
    MerkleTree::from_leaf_hashes(tx_ids.to_vec())
        .get_root()
        .unwrap_or([0u8; 32])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_tree_has_zero_root() {
        assert_eq!(tx_root(&[]), [0u8; 32]);
    }

    #[test]
    fn single_leaf_root_equals_leaf() {
        let leaf = hash_sha256(b"tx1");
        assert_eq!(tx_root(&[leaf]), leaf);
    }

    #[test]
    fn root_changes_with_order() {
        let a = hash_sha256(b"tx1");
        let b = hash_sha256(b"tx2");
        assert_ne!(tx_root(&[a, b]), tx_root(&[b, a]));
    }

    #[test]
    fn odd_number_of_leaves_duplicates_last() {
        let a = hash_sha256(b"tx1");
        let b = hash_sha256(b"tx2");
        let c = hash_sha256(b"tx3");
        // should not panic, and should be deterministic
        let r1 = tx_root(&[a, b, c]);
        let r2 = tx_root(&[a, b, c]);
        assert_eq!(r1, r2);
    }
}
