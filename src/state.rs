//! State Store (spec component A): the single owner-exclusive record of
//! node state. `NodeState` is owned by the node worker; other tasks only
//! ever see an owned snapshot, never a live reference, so "atomic multi
//! field update" reduces to "the whole record moves forward between one
//! `update()` call and the next".
//!
//! Grounded in `node/fractal_node.rs`'s `NodeState` struct and the
//! `Arc<RwLock<NodeState>>` ownership pattern used throughout the teacher.

use std::collections::HashMap;

use crate::gossip::GossipCursor;
use crate::types::{Address, BlockIndex, Hash, Tx};

#[derive(Clone, Debug)]
pub struct WalletEntry {
    pub balance: u64,
    pub last_tx: Hash,
}

pub type WalletList = HashMap<Address, WalletEntry>;

/// Reward payout destination: a concrete address, or nobody yet.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RewardAddr {
    Unclaimed,
    Addr(Address),
}

#[derive(Clone, Debug)]
pub struct NodeState {
    pub id: [u8; 32],
    pub block_index: BlockIndex,
    pub height: Option<u64>,
    pub wallet_list: WalletList,
    pub floating_wallet_list: WalletList,
    pub txs: Vec<Tx>,
    pub waiting_txs: Vec<Tx>,
    pub potential_txs: Vec<Tx>,
    pub reward_pool: u64,
    pub reward_addr: RewardAddr,
    pub weave_size: u64,
    pub diff: u64,
    pub last_retarget: u64,
    pub tags: Vec<(String, String)>,
    pub mining_delay: u64,
    pub gossip: GossipCursor,
    pub automine: bool,
}

impl NodeState {
    pub fn new(id: [u8; 32], initial_diff: u64) -> Self {
        Self {
            id,
            block_index: BlockIndex::default(),
            height: None,
            wallet_list: HashMap::new(),
            floating_wallet_list: HashMap::new(),
            txs: Vec::new(),
            waiting_txs: Vec::new(),
            potential_txs: Vec::new(),
            reward_pool: 0,
            reward_addr: RewardAddr::Unclaimed,
            weave_size: 0,
            diff: initial_diff,
            last_retarget: 0,
            tags: Vec::new(),
            mining_delay: 0,
            gossip: GossipCursor::default(),
            automine: false,
        }
    }

    pub fn is_joined(&self) -> bool {
        !self.block_index.is_empty()
    }

    /// Invariant 1: the three tx pools are pairwise disjoint by tx id.
    #[cfg(test)]
    pub fn pools_disjoint(&self) -> bool {
        use std::collections::HashSet;
        let mut seen = HashSet::new();
        for tx in self.txs.iter().chain(&self.waiting_txs).chain(&self.potential_txs) {
            if !seen.insert(tx.id) {
                return false;
            }
        }
        true
    }

    /// Invariant 3: height is consistent with the block index length.
    pub fn height_consistent(&self) -> bool {
        match (self.height, self.block_index.height()) {
            (None, None) => true,
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }
}

/// A batch of field assignments applied atomically from the caller's point
/// of view (spec component A). Fields left `None` are left untouched.
#[derive(Default)]
pub struct StateDelta {
    pub block_index: Option<BlockIndex>,
    pub height: Option<Option<u64>>,
    pub wallet_list: Option<WalletList>,
    pub floating_wallet_list: Option<WalletList>,
    pub txs: Option<Vec<Tx>>,
    pub waiting_txs: Option<Vec<Tx>>,
    pub potential_txs: Option<Vec<Tx>>,
    pub reward_pool: Option<u64>,
    pub reward_addr: Option<RewardAddr>,
    pub weave_size: Option<u64>,
    pub diff: Option<u64>,
    pub last_retarget: Option<u64>,
    pub mining_delay: Option<u64>,
    pub automine: Option<bool>,
}

impl NodeState {
    pub fn apply(&mut self, delta: StateDelta) {
        if let Some(v) = delta.block_index {
            self.block_index = v;
        }
        if let Some(v) = delta.height {
            self.height = v;
        }
        if let Some(v) = delta.wallet_list {
            self.wallet_list = v;
        }
        if let Some(v) = delta.floating_wallet_list {
            self.floating_wallet_list = v;
        }
        if let Some(v) = delta.txs {
            self.txs = v;
        }
        if let Some(v) = delta.waiting_txs {
            self.waiting_txs = v;
        }
        if let Some(v) = delta.potential_txs {
            self.potential_txs = v;
        }
        if let Some(v) = delta.reward_pool {
            self.reward_pool = v;
        }
        if let Some(v) = delta.reward_addr {
            self.reward_addr = v;
        }
        if let Some(v) = delta.weave_size {
            self.weave_size = v;
        }
        if let Some(v) = delta.diff {
            self.diff = v;
        }
        if let Some(v) = delta.last_retarget {
            self.last_retarget = v;
        }
        if let Some(v) = delta.mining_delay {
            self.mining_delay = v;
        }
        if let Some(v) = delta.automine {
            self.automine = v;
        }
    }
}

/// Aggregates all three pools in declaration order, spec component B's
/// `aggregate(state)`.
pub fn aggregate_txs(state: &NodeState) -> Vec<Tx> {
    let mut out = Vec::with_capacity(
        state.txs.len() + state.waiting_txs.len() + state.potential_txs.len(),
    );
    out.extend(state.txs.iter().cloned());
    out.extend(state.waiting_txs.iter().cloned());
    out.extend(state.potential_txs.iter().cloned());
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_state_is_not_joined_and_consistent() {
        let state = NodeState::new([1u8; 32], 1);
        assert!(!state.is_joined());
        assert!(state.height_consistent());
        assert!(state.pools_disjoint());
    }

    #[test]
    fn delta_only_touches_named_fields() {
        let mut state = NodeState::new([0u8; 32], 5);
        state.apply(StateDelta {
            diff: Some(10),
            ..Default::default()
        });
        assert_eq!(state.diff, 10);
        assert_eq!(state.weave_size, 0);
    }
}
