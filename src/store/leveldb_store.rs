//! Disk-backed `Store` implementation over LevelDB. Adapted directly from
//! the teacher's `storage/mod.rs::LedgerDB`: same `Database<i32>` handle
//! behind a `tokio::sync::RwLock`, same key-hashing trick to map byte keys
//! onto LevelDB's native `i32` keyspace, same prefix-key helpers for blocks
//! vs. height index. Serialization now goes through `serde_json` instead of
//! raw little-endian integers, since the values stored here (blocks, txs,
//! wallet lists) are structured rather than single counters.

use std::path::Path;

use async_trait::async_trait;
use leveldb::database::Database;
use leveldb::kv::KV;
use leveldb::options::{Options, ReadOptions, WriteOptions};
use tokio::sync::RwLock;

use super::Store;
use crate::error::StoreError;
use crate::state::WalletList;
use crate::types::{Block, BlockIndex, Hash, Tx};

pub struct LevelDbStore {
    db: RwLock<Database<i32>>,
}

impl LevelDbStore {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let mut opts = Options::new();
        opts.create_if_missing = true;
        let db = Database::open(path.as_ref(), opts)
            .map_err(|e| StoreError::Io(e.to_string()))?;
        Ok(Self { db: RwLock::new(db) })
    }

    fn bytes_to_key(key: &[u8]) -> i32 {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash as _, Hasher};
        let mut hasher = DefaultHasher::new();
        key.hash(&mut hasher);
        hasher.finish() as i32
    }

    async fn put(&self, key: &[u8], value: &[u8]) -> Result<(), StoreError> {
        let db = self.db.write().await;
        let write_opts = WriteOptions::new();
        db.put(write_opts, Self::bytes_to_key(key), value)
            .map_err(|e| StoreError::Io(e.to_string()))
    }

    async fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StoreError> {
        let db = self.db.read().await;
        let read_opts = ReadOptions::new();
        db.get(read_opts, Self::bytes_to_key(key))
            .map_err(|e| StoreError::Io(e.to_string()))
    }

    fn block_key(hash: &Hash) -> Vec<u8> {
        let mut v = Vec::with_capacity(34);
        v.extend_from_slice(b"b:");
        v.extend_from_slice(hash);
        v
    }

    fn height_key(height: u64) -> Vec<u8> {
        let mut v = Vec::with_capacity(10);
        v.extend_from_slice(b"h:");
        v.extend_from_slice(&height.to_le_bytes());
        v
    }

    fn tx_key(id: &Hash) -> Vec<u8> {
        let mut v = Vec::with_capacity(34);
        v.extend_from_slice(b"t:");
        v.extend_from_slice(id);
        v
    }

    fn wallet_list_key(root: &Hash) -> Vec<u8> {
        let mut v = Vec::with_capacity(34);
        v.extend_from_slice(b"w:");
        v.extend_from_slice(root);
        v
    }

    const BLOCK_INDEX_KEY: &'static [u8] = b"block_index";
}

#[async_trait]
impl Store for LevelDbStore {
    async fn write_block(&self, block: &Block) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec(block).map_err(|e| StoreError::Serialization(e.to_string()))?;
        self.put(&Self::block_key(&block.indep_hash), &bytes).await?;
        self.put(&Self::height_key(block.height), &block.indep_hash).await
    }

    async fn read_block_by_hash(&self, hash: &Hash) -> Result<Option<Block>, StoreError> {
        match self.get(&Self::block_key(hash)).await? {
            Some(bytes) => serde_json::from_slice(&bytes)
                .map(Some)
                .map_err(|e| StoreError::Serialization(e.to_string())),
            None => Ok(None),
        }
    }

    async fn read_block_by_height(&self, height: u64) -> Result<Option<Block>, StoreError> {
        match self.get(&Self::height_key(height)).await? {
            Some(hash_bytes) if hash_bytes.len() == 32 => {
                let mut hash = [0u8; 32];
                hash.copy_from_slice(&hash_bytes);
                self.read_block_by_hash(&hash).await
            }
            _ => Ok(None),
        }
    }

    async fn write_tx(&self, tx: &Tx) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec(tx).map_err(|e| StoreError::Serialization(e.to_string()))?;
        self.put(&Self::tx_key(&tx.id), &bytes).await
    }

    async fn read_tx(&self, id: &Hash) -> Result<Option<Tx>, StoreError> {
        match self.get(&Self::tx_key(id)).await? {
            Some(bytes) => serde_json::from_slice(&bytes)
                .map(Some)
                .map_err(|e| StoreError::Serialization(e.to_string())),
            None => Ok(None),
        }
    }

    async fn write_block_index(&self, index: &BlockIndex) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec(index).map_err(|e| StoreError::Serialization(e.to_string()))?;
        self.put(Self::BLOCK_INDEX_KEY, &bytes).await
    }

    async fn read_block_index(&self) -> Result<BlockIndex, StoreError> {
        match self.get(Self::BLOCK_INDEX_KEY).await? {
            Some(bytes) => {
                serde_json::from_slice(&bytes).map_err(|e| StoreError::Serialization(e.to_string()))
            }
            None => Ok(BlockIndex::default()),
        }
    }

    async fn write_wallet_list(&self, root: &Hash, wallets: &WalletList) -> Result<(), StoreError> {
        let serializable: Vec<(crate::types::Address, u64, crate::types::Hash)> = wallets
            .iter()
            .map(|(addr, entry)| (*addr, entry.balance, entry.last_tx))
            .collect();
        let bytes =
            serde_json::to_vec(&serializable).map_err(|e| StoreError::Serialization(e.to_string()))?;
        self.put(&Self::wallet_list_key(root), &bytes).await
    }

    async fn read_wallet_list(&self, root: &Hash) -> Result<Option<WalletList>, StoreError> {
        match self.get(&Self::wallet_list_key(root)).await? {
            Some(bytes) => {
                let decoded: Vec<(crate::types::Address, u64, crate::types::Hash)> =
                    serde_json::from_slice(&bytes)
                        .map_err(|e| StoreError::Serialization(e.to_string()))?;
                let mut map = WalletList::new();
                for (addr, balance, last_tx) in decoded {
                    map.insert(addr, crate::state::WalletEntry { balance, last_tx });
                }
                Ok(Some(map))
            }
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn writes_and_reads_back_a_block() {
        let dir = tempfile::tempdir().unwrap();
        let store = LevelDbStore::open(dir.path()).unwrap();
        let block = Block {
            indep_hash: [7u8; 32],
            previous: [0u8; 32],
            height: 0,
            timestamp: 1,
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
        };
        store.write_block(&block).await.unwrap();
        let back = store.read_block_by_hash(&block.indep_hash).await.unwrap();
        assert_eq!(back, Some(block));
    }
}
