//! Fork Recoverer (spec component H): drives catch-up when a longer peer
//! chain is observed. No direct teacher analog exists (`VortexConsensus`
//! has no fork-recovery concept, only `add_block`); the state machine
//! shape borrows loosely from `consensus/vortex_consensus.rs::ConsensusState`,
//! and the exclusive-registration guard is built fresh per spec §9's
//! explicit rejection of the teacher's global "process dictionary" pattern
//! in favor of an explicit `Mutex<Option<RecoveryHandle>>` field.

use std::sync::Arc;

use log::{info, warn};
use tokio::sync::Mutex;

use crate::error::ConsensusError;
use crate::gossip::PeerId;
use crate::store::Store;
use crate::types::{BlockIndex, Hash, IndexEntry};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RecoveryState {
    Idle,
    Recovering { peer: PeerId, target: Hash },
    Completed { hash_list: BlockIndex },
    Failed,
}

struct RecoveryHandle {
    peer: PeerId,
    target: Hash,
}

/// Holds the single in-flight recovery, if any. Registration is exclusive:
/// a second `fork_recover` call while one is active is rejected rather than
/// silently superseding the first.
pub struct ForkRecoverer {
    active: Mutex<Option<RecoveryHandle>>,
}

impl ForkRecoverer {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            active: Mutex::new(None),
        })
    }

    pub async fn is_recovering(&self) -> bool {
        self.active.lock().await.is_some()
    }

    /// Registers a new recovery attempt toward `peer`'s `target` block hash.
    /// Fails with `RecoveryInProgress` if one is already active.
    pub async fn begin(&self, peer: PeerId, target: Hash) -> Result<(), ConsensusError> {
        let mut guard = self.active.lock().await;
        if guard.is_some() {
            return Err(ConsensusError::RecoveryInProgress);
        }
        *guard = Some(RecoveryHandle { peer, target });
        info!("fork recovery started toward peer {}", hex::encode(peer));
        Ok(())
    }

    /// Drives recovery to completion against `store`, given the peer's
    /// claimed hash chain from genesis/common-ancestor. Each block in the
    /// chain is re-read from `store` (standing in for a peer fetch) and
    /// validated to be internally height-consistent; on any gap the
    /// recovery fails. Always clears the active registration on exit.
    pub async fn recover(
        &self,
        store: &dyn Store,
        peer_hash_list: Vec<Hash>,
    ) -> RecoveryState {
        let result = self.recover_inner(store, &peer_hash_list).await;
        *self.active.lock().await = None;
        match result {
            Ok(index) => RecoveryState::Completed { hash_list: index },
            Err(e) => {
                warn!("fork recovery failed: {e}");
                RecoveryState::Failed
            }
        }
    }

    async fn recover_inner(
        &self,
        store: &dyn Store,
        peer_hash_list: &[Hash],
    ) -> Result<BlockIndex, ConsensusError> {
        if peer_hash_list.is_empty() {
            return Err(ConsensusError::PeerUnavailable("empty hash list".into()));
        }
        let mut index = BlockIndex::default();
        let mut expected_height = peer_hash_list.len() as u64 - 1;
        for hash in peer_hash_list {
            let block = store
                .read_block_by_hash(hash)
                .await
                .map_err(|e| ConsensusError::InternalException(e.to_string()))?
                .ok_or(ConsensusError::RecallUnavailable)?;
            if block.height != expected_height {
                return Err(ConsensusError::InternalException(
                    "peer hash list height mismatch".into(),
                ));
            }
            index.0.push(IndexEntry {
                block_hash: block.indep_hash,
                weave_size: block.weave_size,
                tx_root: block.tx_root,
            });
            expected_height = expected_height.saturating_sub(1);
        }
        Ok(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::MemoryStore;
    use crate::types::Block;

    fn block(height: u64, hash: [u8; 32]) -> Block {
        Block {
            indep_hash: hash,
            previous: [0u8; 32],
            height,
            timestamp: height + 1,
            nonce: 0,
            diff: 0,
            last_retarget: 0,
            tx_root: [0u8; 32],
            txs: Vec::new(),
            wallet_root: [0u8; 32],
            reward_addr: [0u8; 32],
            reward_pool: 0,
            weave_size: 0,
            block_size: 0,
            tags: Vec::new(),
        }
    }

    #[tokio::test]
    async fn second_begin_is_rejected_while_one_is_active() {
        let recoverer = ForkRecoverer::new();
        recoverer.begin([1u8; 32], [2u8; 32]).await.unwrap();
        let second = recoverer.begin([3u8; 32], [4u8; 32]).await;
        assert!(matches!(second, Err(ConsensusError::RecoveryInProgress)));
    }

    #[tokio::test]
    async fn recover_completes_with_a_consistent_chain() {
        let store = MemoryStore::new();
        store.write_block(&block(1, [1u8; 32])).await.unwrap();
        store.write_block(&block(0, [0u8; 32])).await.unwrap();
        let recoverer = ForkRecoverer::new();
        recoverer.begin([9u8; 32], [1u8; 32]).await.unwrap();
        let result = recoverer
            .recover(&store, vec![[1u8; 32], [0u8; 32]])
            .await;
        assert!(matches!(result, RecoveryState::Completed { .. }));
        assert!(!recoverer.is_recovering().await);
    }

    #[tokio::test]
    async fn recover_fails_on_missing_block() {
        let store = MemoryStore::new();
        let recoverer = ForkRecoverer::new();
        recoverer.begin([9u8; 32], [1u8; 32]).await.unwrap();
        let result = recoverer.recover(&store, vec![[1u8; 32]]).await;
        assert!(matches!(result, RecoveryState::Failed));
    }
}
