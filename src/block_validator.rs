//! Block Validator (spec component E): 9 ordered, short-circuiting checks
//! that a candidate block must pass before it can become the new head.
//!
//! The pipeline itself is new, built directly from spec §4.E. Check #4
//! reuses `difficulty::DifficultyAdjuster` (adapted from the teacher's
//! `consensus/difficulty_adjuster.rs`); check #6 reuses
//! `crypto::merkle::tx_root` (structurally grounded in the teacher's
//! `FractalMerkleTree`, rewritten over SHA-256); checks #7/#8 reuse
//! `wallet_ledger` (component C); check #5 is the PoW predicate described
//! in `miner_supervisor`.

use crate::crypto::hash::{hash_sha256, leading_zero_bits};
use crate::crypto::merkle::tx_root;
use crate::difficulty::DifficultyAdjuster;
use crate::error::ValidationError;
use crate::reward;
use crate::state::WalletList;
use crate::types::{Block, RecallBlock, Tx};
use crate::wallet_ledger;

/// Maximum allowed difference between a candidate's timestamp and the
/// validator's own clock, in either direction.
pub const CLOCK_SKEW_TOLERANCE_MS: u64 = 15 * 60 * 1000;

pub struct ValidationInputs<'a> {
    pub candidate: &'a Block,
    pub txs: &'a [Tx],
    pub prev_head: &'a Block,
    pub recall_block: &'a RecallBlock,
    pub wallet_list: &'a WalletList,
    pub old_reward_pool: u64,
    pub now_ms: u64,
}

/// PoW predicate over `(candidate.indep_hash, nonce, recall.indep_hash, diff)`:
/// the hash of their concatenation must have at least `diff` leading zero
/// bits.
pub fn proof_of_work_holds(candidate_hash: &[u8; 32], nonce: u64, recall_hash: &[u8; 32], diff: u64) -> bool {
    let mut input = Vec::with_capacity(32 + 8 + 32);
    input.extend_from_slice(candidate_hash);
    input.extend_from_slice(&nonce.to_be_bytes());
    input.extend_from_slice(recall_hash);
    let digest = hash_sha256(&input);
    leading_zero_bits(&digest) as u64 >= diff
}

/// Runs all 9 checks in order, short-circuiting on the first failure.
/// Returns the new wallet list on success so the caller does not need to
/// recompute it.
pub fn validate(inputs: &ValidationInputs) -> Result<WalletList, ValidationError> {
    let ValidationInputs {
        candidate,
        txs,
        prev_head,
        recall_block,
        wallet_list,
        old_reward_pool,
        now_ms,
    } = *inputs;

    // 1. height
    if candidate.height != prev_head.height + 1 {
        return Err(ValidationError::HeightMismatch {
            expected: prev_head.height + 1,
            got: candidate.height,
        });
    }

    // 2. previous hash
    if candidate.previous != prev_head.indep_hash {
        return Err(ValidationError::PreviousHashMismatch);
    }

    // 3. timestamp monotonicity + clock skew window
    if candidate.timestamp <= prev_head.timestamp {
        return Err(ValidationError::TimestampOutOfBounds);
    }
    let skew = now_ms.abs_diff(candidate.timestamp);
    if skew > CLOCK_SKEW_TOLERANCE_MS {
        return Err(ValidationError::TimestampOutOfBounds);
    }

    // 4. difficulty retarget
    let adjuster = DifficultyAdjuster::default();
    let expected_diff = adjuster.expected_difficulty(
        candidate.height,
        prev_head.diff,
        prev_head.last_retarget,
        candidate.timestamp,
    );
    if candidate.diff != expected_diff {
        return Err(ValidationError::DifficultyMismatch {
            expected: expected_diff,
            got: candidate.diff,
        });
    }

    // 5. proof of work
    if !proof_of_work_holds(
        &candidate.indep_hash,
        candidate.nonce,
        &recall_block.indep_hash,
        candidate.diff,
    ) {
        return Err(ValidationError::ProofOfWorkFailed);
    }

    // 6. merkle root of txs
    let ids: Vec<[u8; 32]> = txs.iter().map(|t| t.id).collect();
    if tx_root(&ids) != candidate.tx_root {
        return Err(ValidationError::MerkleRootMismatch);
    }

    // 7. applying txs to wallet_list must succeed
    let applied = wallet_ledger::apply_txs(wallet_list, txs)
        .map_err(|_| ValidationError::WalletApplyFailed)?;

    // 8. reward-derived wallet root must match
    let (finder, _new_pool) = reward::calculate(
        old_reward_pool,
        txs,
        recall_block.block_size,
        prev_head.weave_size + txs.iter().map(|t| t.data_size).sum::<u64>(),
        candidate.height,
    );
    let rewarded = wallet_ledger::apply_mining_reward(
        &applied,
        candidate.reward_addr,
        finder,
        candidate.height,
    );
    let computed_root = wallet_root(&rewarded);
    if computed_root != candidate.wallet_root {
        return Err(ValidationError::WalletRootMismatch);
    }

    // 9. weave size arithmetic
    let expected_weave_size = prev_head.weave_size + txs.iter().map(|t| t.data_size).sum::<u64>();
    if candidate.weave_size != expected_weave_size {
        return Err(ValidationError::WeaveSizeMismatch {
            expected: expected_weave_size,
            got: candidate.weave_size,
        });
    }

    Ok(rewarded)
}

/// Deterministic digest of a wallet list, used as `candidate.wallet_root`.
/// Entries are sorted by address first so the digest does not depend on
/// hash-map iteration order.
pub fn wallet_root(wallets: &WalletList) -> [u8; 32] {
    let mut entries: Vec<_> = wallets.iter().collect();
    entries.sort_by_key(|(addr, _)| **addr);
    let mut buf = Vec::with_capacity(entries.len() * 72);
    for (addr, entry) in entries {
        buf.extend_from_slice(addr);
        buf.extend_from_slice(&entry.balance.to_be_bytes());
        buf.extend_from_slice(&entry.last_tx);
    }
    hash_sha256(&buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn base_block(height: u64, prev: [u8; 32], ts: u64) -> Block {
        Block {
            indep_hash: [height as u8 + 1; 32],
            previous: prev,
            height,
            timestamp: ts,
            nonce: 0,
            diff: 0,
            last_retarget: 0,
            tx_root: tx_root(&[]),
            txs: Vec::new(),
            wallet_root: wallet_root(&HashMap::new()),
            reward_addr: [0u8; 32],
            reward_pool: 0,
            weave_size: 0,
            block_size: 0,
            tags: Vec::new(),
        }
    }

    #[test]
    fn proof_of_work_predicate_is_monotone_in_difficulty() {
        let candidate_hash = [5u8; 32];
        let recall_hash = [6u8; 32];
        // find a nonce that satisfies diff=0 trivially
        assert!(proof_of_work_holds(&candidate_hash, 1, &recall_hash, 0));
    }

    #[test]
    fn rejects_wrong_height() {
        let prev = base_block(5, [0u8; 32], 1000);
        let mut candidate = base_block(7, prev.indep_hash, 2000);
        candidate.diff = 0;
        let recall = RecallBlock {
            indep_hash: [1u8; 32],
            block_size: 10,
        };
        let wallets = HashMap::new();
        let inputs = ValidationInputs {
            candidate: &candidate,
            txs: &[],
            prev_head: &prev,
            recall_block: &recall,
            wallet_list: &wallets,
            old_reward_pool: 0,
            now_ms: 2000,
        };
        assert!(matches!(
            validate(&inputs),
            Err(ValidationError::HeightMismatch { .. })
        ));
    }

    #[test]
    fn rejects_stale_timestamp() {
        let prev = base_block(5, [0u8; 32], 5000);
        let mut candidate = base_block(6, prev.indep_hash, 4000);
        candidate.diff = 0;
        let recall = RecallBlock {
            indep_hash: [1u8; 32],
            block_size: 10,
        };
        let wallets = HashMap::new();
        let inputs = ValidationInputs {
            candidate: &candidate,
            txs: &[],
            prev_head: &prev,
            recall_block: &recall,
            wallet_list: &wallets,
            old_reward_pool: 0,
            now_ms: 4000,
        };
        assert!(matches!(
            validate(&inputs),
            Err(ValidationError::TimestampOutOfBounds)
        ));
    }

    #[test]
    fn accepts_a_well_formed_candidate_with_no_txs() {
        let prev = base_block(5, [0u8; 32], 1000);
        let mut candidate = base_block(6, prev.indep_hash, 2000);
        candidate.diff = 0;
        candidate.wallet_root = wallet_root(&HashMap::new());
        let recall = RecallBlock {
            indep_hash: [1u8; 32],
            block_size: 10,
        };
        let wallets = HashMap::new();
        let inputs = ValidationInputs {
            candidate: &candidate,
            txs: &[],
            prev_head: &prev,
            recall_block: &recall,
            wallet_list: &wallets,
            old_reward_pool: 0,
            now_ms: 2000,
        };
        assert!(validate(&inputs).is_ok());
    }
}
