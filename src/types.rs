//! Core wire/ledger data types shared across the node: transactions, blocks,
//! and the block index. Kept deliberately plain-old-data; validation and
//! mutation live in the components that own the relevant invariant.

use serde::{Deserialize, Serialize};

pub type Address = [u8; 32];
pub type Hash = [u8; 32];

/// Sentinel addresses/ids used by the reward and wallet paths.
pub const UNCLAIMED: Address = [0u8; 32];

/// A transaction as gossiped between peers and stored in the tx pools.
///
/// Field sizes mirror the logical schema: `id`/`last_tx`/`target` are 32
/// bytes, `owner`/`signature` are up to 512 bytes (an RSA public key and an
/// RSA-PSS signature respectively), `tags` up to 2048 bytes, `data` up to
/// 50 MiB total tx size.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Tx {
    pub id: Hash,
    pub last_tx: Hash,
    pub owner: Vec<u8>,
    pub target: Address,
    pub quantity: u64,
    pub data: Vec<u8>,
    pub reward: u64,
    pub signature: Vec<u8>,
    pub tags: Vec<(String, String)>,
    pub data_root: Hash,
    pub data_size: u64,
}

impl Tx {
    pub fn owner_address(&self) -> Address {
        crate::crypto::hash::to_address(&self.owner)
    }

    /// Whether this tx moves value (as opposed to a pure archival/data tx).
    pub fn is_transfer(&self) -> bool {
        self.quantity > 0
    }

    /// Unsigned length-prefixed concatenation used as the signature input,
    /// per the crypto contract: owner || target || id || data || quantity
    /// || reward || last_tx.
    pub fn signature_base(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(
            self.owner.len() + self.target.len() + self.id.len() + self.data.len() + 32,
        );
        buf.extend_from_slice(&self.owner);
        buf.extend_from_slice(&self.target);
        buf.extend_from_slice(&self.id);
        buf.extend_from_slice(&self.data);
        buf.extend_from_slice(&self.quantity.to_be_bytes());
        buf.extend_from_slice(&self.reward.to_be_bytes());
        buf.extend_from_slice(&self.last_tx);
        buf
    }
}

/// A block header as validated and stored by the core. `txs` holds only the
/// ordered list of included tx ids; the tx bodies are looked up separately.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Block {
    pub indep_hash: Hash,
    pub previous: Hash,
    pub height: u64,
    pub timestamp: u64,
    pub nonce: u64,
    pub diff: u64,
    pub last_retarget: u64,
    pub tx_root: Hash,
    pub txs: Vec<Hash>,
    pub wallet_root: Hash,
    pub reward_addr: Address,
    pub reward_pool: u64,
    pub weave_size: u64,
    pub block_size: u64,
    pub tags: Vec<(String, String)>,
}

impl Block {
    pub fn sum_tx_reward(&self, txs: &[Tx]) -> u64 {
        txs.iter().map(|t| t.reward).sum()
    }
}

/// A historical block referenced as the PoW "recall" input; only the fields
/// the reward and PoW checks need are carried.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct RecallBlock {
    pub indep_hash: Hash,
    pub block_size: u64,
}

/// Ordered chain index, tip first. `Joined` once the node has a head;
/// `NotJoined` before the first successful fork recovery (spec §3 lifecycle).
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct BlockIndex(pub Vec<IndexEntry>);

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct IndexEntry {
    pub block_hash: Hash,
    pub weave_size: u64,
    pub tx_root: Hash,
}

impl BlockIndex {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn height(&self) -> Option<u64> {
        if self.0.is_empty() {
            None
        } else {
            Some(self.0.len() as u64 - 1)
        }
    }

    pub fn tip(&self) -> Option<&IndexEntry> {
        self.0.first()
    }

    pub fn push_tip(&mut self, entry: IndexEntry) {
        self.0.insert(0, entry);
    }
}
