//! In-process `Store` implementation used by tests and single-node demos.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::Store;
use crate::error::StoreError;
use crate::state::WalletList;
use crate::types::{Block, BlockIndex, Hash, Tx};

#[derive(Default)]
pub struct MemoryStore {
    blocks_by_hash: RwLock<HashMap<Hash, Block>>,
    blocks_by_height: RwLock<HashMap<u64, Hash>>,
    txs: RwLock<HashMap<Hash, Tx>>,
    block_index: RwLock<BlockIndex>,
    wallet_lists: RwLock<HashMap<Hash, WalletList>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn write_block(&self, block: &Block) -> Result<(), StoreError> {
        self.blocks_by_height
            .write()
            .await
            .insert(block.height, block.indep_hash);
        self.blocks_by_hash
            .write()
            .await
            .insert(block.indep_hash, block.clone());
        Ok(())
    }

    async fn read_block_by_hash(&self, hash: &Hash) -> Result<Option<Block>, StoreError> {
        Ok(self.blocks_by_hash.read().await.get(hash).cloned())
    }

    async fn read_block_by_height(&self, height: u64) -> Result<Option<Block>, StoreError> {
        let hash = self.blocks_by_height.read().await.get(&height).copied();
        match hash {
            Some(h) => self.read_block_by_hash(&h).await,
            None => Ok(None),
        }
    }

    async fn write_tx(&self, tx: &Tx) -> Result<(), StoreError> {
        self.txs.write().await.insert(tx.id, tx.clone());
        Ok(())
    }

    async fn read_tx(&self, id: &Hash) -> Result<Option<Tx>, StoreError> {
        Ok(self.txs.read().await.get(id).cloned())
    }

    async fn write_block_index(&self, index: &BlockIndex) -> Result<(), StoreError> {
        *self.block_index.write().await = index.clone();
        Ok(())
    }

    async fn read_block_index(&self) -> Result<BlockIndex, StoreError> {
        Ok(self.block_index.read().await.clone())
    }

    async fn write_wallet_list(
        &self,
        root: &Hash,
        wallets: &WalletList,
    ) -> Result<(), StoreError> {
        self.wallet_lists.write().await.insert(*root, wallets.clone());
        Ok(())
    }

    async fn read_wallet_list(&self, root: &Hash) -> Result<Option<WalletList>, StoreError> {
        Ok(self.wallet_lists.read().await.get(root).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::IndexEntry;

    fn sample_block() -> Block {
        Block {
            indep_hash: [9u8; 32],
            previous: [0u8; 32],
            height: 1,
            timestamp: 1000,
            nonce: 0,
            diff: 1,
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
    async fn round_trips_a_block_by_hash_and_height() {
        let store = MemoryStore::new();
        let block = sample_block();
        store.write_block(&block).await.unwrap();
        assert_eq!(store.read_block_by_hash(&block.indep_hash).await.unwrap(), Some(block.clone()));
        assert_eq!(store.read_block_by_height(1).await.unwrap(), Some(block));
    }

    #[tokio::test]
    async fn block_index_round_trips() {
        let store = MemoryStore::new();
        let mut index = BlockIndex::default();
        index.push_tip(IndexEntry {
            block_hash: [1u8; 32],
            weave_size: 10,
            tx_root: [0u8; 32],
        });
        store.write_block_index(&index).await.unwrap();
        assert_eq!(store.read_block_index().await.unwrap(), index);
    }
}
