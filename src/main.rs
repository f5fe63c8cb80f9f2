//! Node process entry point: parses config, opens a `Store`, wires up a
//! loopback `Gossip`, spawns the node worker, and idles until shutdown.
//!
//! Grounded in the teacher's `main.rs`/`bin/*.rs` shape (env_logger init,
//! `clap::Parser`, a `#[tokio::main]` runtime) but wired against the real
//! node worker instead of the genesis-deployer CLI it started from; the
//! HTTP/RPC front-end those binaries also carried is out of scope (spec §1).

use std::sync::Arc;

use clap::Parser;
use log::info;

use weave_node::config::Cli;
use weave_node::gossip::loopback::LoopbackGossip;
use weave_node::node_worker::{Event, NodeWorker};
use weave_node::state::RewardAddr;
use weave_node::store::leveldb_store::LevelDbStore;
use weave_node::store::memory::MemoryStore;
use weave_node::store::Store;
use weave_node::tx_pool::PropagationDelay;

fn node_id() -> [u8; 32] {
    let mut id = [0u8; 32];
    let pid = std::process::id().to_le_bytes();
    id[..pid.len()].copy_from_slice(&pid);
    id
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = cli.resolve_config();

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(&config.log_level),
    )
    .init();

    info!("starting weave-node, data_dir={:?}", config.storage.data_dir);

    let store: Arc<dyn Store> = match LevelDbStore::open(&config.storage.data_dir) {
        Ok(store) => Arc::new(store),
        Err(err) => {
            log::warn!(
                "failed to open leveldb store at {:?} ({}), falling back to an in-memory store",
                config.storage.data_dir,
                err
            );
            Arc::new(MemoryStore::new())
        }
    };

    let gossip = Arc::new(LoopbackGossip::new(Vec::new()));

    let handle = NodeWorker::spawn(
        node_id(),
        config.mining.initial_difficulty,
        store,
        gossip,
        PropagationDelay::Production,
    );

    handle.cast(Event::SetMiningDelay(config.mining.mining_delay_ms));
    handle.cast(Event::SetRewardAddr(RewardAddr::Unclaimed));
    if config.mining.automine {
        handle.cast(Event::AutoMine(true));
    }

    info!("weave-node running; press ctrl-c to stop");
    tokio::signal::ctrl_c().await?;
    info!("shutdown requested");
    handle.cast(Event::Stop);

    Ok(())
}
