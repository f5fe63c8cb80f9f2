//! Reward Calculator (spec component D): deterministic, integer-only
//! finder/new-pool arithmetic from recall-block-size/weave-size proportion.
//!
//! Grounded in `consensus/mining_rewards.rs`'s overall shape — a pure,
//! fully-tested reward module with its own boundary-condition test suite —
//! but the halving-schedule formula itself is replaced entirely with the
//! spec's proportion-based math, computed in `u128` fixed point so the
//! result is bit-reproducible across nodes (the teacher's
//! `mining_engine.rs` "Smart Rate" used floating point and is not carried
//! forward).

use crate::types::Tx;

/// Below this height the raw recall/weave proportion is used as-is
/// (clamped to [0, 1]); at and above it, the proportion is blended toward
/// `LONG_RUN_PROPORTION_PPM` so neither a very large weave nor a very
/// small recall block can starve or flood the pool.
pub const BOOTSTRAP_HEIGHT_THRESHOLD: u64 = 50_000;

/// Long-run proportion, expressed in parts-per-million to keep the blend
/// in pure integer arithmetic.
pub const LONG_RUN_PROPORTION_PPM: u128 = 100_000; // 10%

const PPM_SCALE: u128 = 1_000_000;

/// Computes the proportion (in parts-per-million) of the fee pool a miner
/// receives, given the recall block's size, the current weave size, and
/// the block height.
pub fn proportion_ppm(recall_block_size: u64, weave_size: u64, height: u64) -> u128 {
    let raw_ppm = if weave_size == 0 {
        PPM_SCALE
    } else {
        ((recall_block_size as u128) * PPM_SCALE / (weave_size as u128)).min(PPM_SCALE)
    };
    if height < BOOTSTRAP_HEIGHT_THRESHOLD {
        raw_ppm
    } else {
        // Blend 50/50 toward the long-run constant past the bootstrap
        // height, in pure integer math.
        (raw_ppm + LONG_RUN_PROPORTION_PPM) / 2
    }
}

/// `(finder, new_pool)` given the old pool, the txs entering the block, the
/// recall block's size, the chain's weave size, and the block height.
/// `base := old_pool + sum(tx.reward)`; `finder := floor(base * proportion)`;
/// `new_pool := base - finder`.
pub fn calculate(
    old_pool: u64,
    txs: &[Tx],
    recall_block_size: u64,
    weave_size: u64,
    height: u64,
) -> (u64, u64) {
    let tx_fees: u128 = txs.iter().map(|t| t.reward as u128).sum();
    let base = old_pool as u128 + tx_fees;
    let ppm = proportion_ppm(recall_block_size, weave_size, height);
    let finder = (base * ppm) / PPM_SCALE;
    let new_pool = base - finder;
    (finder as u64, new_pool as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tx_with_reward(reward: u64) -> Tx {
        Tx {
            id: [0u8; 32],
            last_tx: [0u8; 32],
            owner: Vec::new(),
            target: [0u8; 32],
            quantity: 0,
            data: Vec::new(),
            reward,
            signature: Vec::new(),
            tags: Vec::new(),
            data_root: [0u8; 32],
            data_size: 0,
        }
    }

    #[test]
    fn reward_conserves_total_value() {
        let txs = vec![tx_with_reward(10), tx_with_reward(20)];
        let (finder, new_pool) = calculate(1000, &txs, 500, 1000, 1);
        assert_eq!(finder + new_pool, 1000 + 30);
    }

    #[test]
    fn zero_weave_size_gives_full_proportion_pre_bootstrap() {
        let (finder, new_pool) = calculate(100, &[], 0, 0, 1);
        assert_eq!(finder, 100);
        assert_eq!(new_pool, 0);
    }

    #[test]
    fn proportion_is_clamped_at_one() {
        let ppm = proportion_ppm(1_000_000, 1, 1);
        assert_eq!(ppm, PPM_SCALE);
    }

    #[test]
    fn past_bootstrap_height_blends_toward_long_run_constant() {
        let ppm_pre = proportion_ppm(500, 1000, BOOTSTRAP_HEIGHT_THRESHOLD - 1);
        let ppm_post = proportion_ppm(500, 1000, BOOTSTRAP_HEIGHT_THRESHOLD);
        assert_eq!(ppm_pre, 500_000);
        assert_eq!(ppm_post, (500_000 + LONG_RUN_PROPORTION_PPM) / 2);
    }

    #[test]
    fn calculate_is_deterministic_across_repeated_calls() {
        let txs = vec![tx_with_reward(7)];
        let a = calculate(333, &txs, 128, 4096, 10);
        let b = calculate(333, &txs, 128, 4096, 10);
        assert_eq!(a, b);
    }
}
