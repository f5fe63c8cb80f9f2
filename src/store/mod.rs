//! Opaque persistence interface (spec §6). The node worker depends only on
//! this trait; `memory` backs tests, `leveldb_store` is the disk-backed
//! implementation grounded in the teacher's `storage/mod.rs`.

pub mod leveldb_store;
pub mod memory;

use async_trait::async_trait;

use crate::error::StoreError;
use crate::state::WalletList;
use crate::types::{Block, BlockIndex, Hash, Tx};

#[async_trait]
pub trait Store: Send + Sync {
    async fn write_block(&self, block: &Block) -> Result<(), StoreError>;
    async fn read_block_by_hash(&self, hash: &Hash) -> Result<Option<Block>, StoreError>;
    async fn read_block_by_height(&self, height: u64) -> Result<Option<Block>, StoreError>;

    async fn write_tx(&self, tx: &Tx) -> Result<(), StoreError>;
    async fn read_tx(&self, id: &Hash) -> Result<Option<Tx>, StoreError>;

    async fn write_block_index(&self, index: &BlockIndex) -> Result<(), StoreError>;
    async fn read_block_index(&self) -> Result<BlockIndex, StoreError>;

    async fn write_wallet_list(&self, root: &Hash, wallets: &WalletList) -> Result<(), StoreError>;
    async fn read_wallet_list(&self, root: &Hash) -> Result<Option<WalletList>, StoreError>;
}
