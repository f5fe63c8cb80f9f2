//! Node Worker (spec component F): the single-writer serializer that is
//! the heart of the core. All state-mutating work is dispatched through
//! one `Event` enum and one `handle_event` function, run from a dedicated
//! task.
//!
//! Grounded in the teacher's `node/fractal_node.rs` for its overall
//! background-task/event-loop shape (`FractalNode`, `tokio::spawn`'d
//! loops, `NodeError` via `thiserror`), but the manual libp2p
//! `NetworkBehaviour` dispatch is replaced by a closed `enum Event`
//! dispatched through one exhaustive `match`, per spec §9's explicit
//! rejection of dynamic/implicit dispatch.
//!
//! Exception safety (spec §4.F): each event is handled on its own spawned
//! task operating on an owned clone of node state; if that task's future
//! panics, `tokio::spawn`'s `JoinHandle` reports it as a `JoinError`
//! without tearing down the worker's own task, the panic is logged with
//! the `node_worker_exception` tag, and the pre-event state (still held by
//! the worker) is kept as-is. This gets the same "one bad event cannot
//! corrupt state or kill the node" guarantee as a `catch_unwind` boundary,
//! without fighting async/await's interaction with unwind safety.

use std::sync::Arc;

use log::{debug, error, info, warn};
use rand::Rng;
use tokio::sync::{mpsc, oneshot, watch};

use crate::block_validator::{self, ValidationInputs};
use crate::diagnostics::TxDiagnostics;
use crate::error::ConsensusError;
use crate::fork_recovery::ForkRecoverer;
use crate::gossip::{Gossip, GossipMessage, PeerId};
use crate::miner_supervisor::{MinerSupervisor, MiningJob, WorkComplete};
use crate::reward;
use crate::state::{NodeState, RewardAddr, StateDelta, WalletList};
use crate::store::Store;
use crate::tx_pool::{self, AddTxOutcome, MemoryProbe, PropagationDelay, SystemMemoryProbe};
use crate::types::{Block, BlockIndex, Hash, IndexEntry, RecallBlock, Tx};
use crate::wallet_ledger;

#[derive(Debug)]
pub enum Event {
    AddTx(Tx),
    EncounterNewTx(Hash),
    ProcessNewBlock {
        peer: PeerId,
        block: Block,
        recall: Option<RecallBlock>,
        txs: Vec<Tx>,
        hash_list: Option<Vec<Hash>>,
    },
    WorkComplete(WorkComplete),
    ForkRecovered(BlockIndex),
    Mine,
    MineAtDiff(u64),
    AutoMine(bool),
    ReplaceBlockList(BlockIndex),
    SetRewardAddr(RewardAddr),
    SetLossProbability(u32),
    SetDelay(u64),
    SetXferSpeed(u64),
    SetMiningDelay(u64),
    AddPeers(Vec<PeerId>),
    Stop,
}

/// A closed, typed reply set for the synchronous `call` helper — replaces
/// the stringly-tagged reply atoms a naive port would otherwise carry over,
/// so the class of reply-tag/handler drift bug cannot recur (spec §9 open
/// question 1).
#[derive(Debug, Clone)]
pub enum EventReply {
    Ack,
    Rejected(String),
}

pub struct NodeWorkerHandle {
    sender: mpsc::UnboundedSender<(Event, Option<oneshot::Sender<EventReply>>)>,
    tx_diagnostics: TxDiagnostics,
    snapshot: watch::Receiver<Arc<NodeState>>,
}

impl NodeWorkerHandle {
    pub fn cast(&self, event: Event) {
        let _ = self.sender.send((event, None));
    }

    /// The out-of-band tx diagnostics side-store (spec §4.B, §5): write-only
    /// from the worker, readable here by any external consumer.
    pub fn tx_diagnostics(&self) -> &TxDiagnostics {
        &self.tx_diagnostics
    }

    /// State Store's `lookup` primitive (spec §4.A): an owned, internally
    /// consistent snapshot of node state as of the last fully-handled event.
    /// Readers never see a partial update — the worker only publishes a new
    /// snapshot once `handle_event` has returned.
    pub fn snapshot(&self) -> Arc<NodeState> {
        self.snapshot.borrow().clone()
    }

    /// Synchronous call with a timeout; the underlying event is still
    /// delivered and processed even if the caller times out.
    pub async fn call(&self, event: Event, timeout_ms: u64) -> Result<EventReply, ConsensusError> {
        let (tx, rx) = oneshot::channel();
        self.sender
            .send((event, Some(tx)))
            .map_err(|_| ConsensusError::InternalException("worker gone".into()))?;
        tokio::time::timeout(std::time::Duration::from_millis(timeout_ms), rx)
            .await
            .map_err(|_| ConsensusError::Timeout)?
            .map_err(|_| ConsensusError::InternalException("reply dropped".into()))
    }
}

/// Everything a handler needs besides the mutable state itself. Cheap to
/// clone (every field is an `Arc`, a `Copy` value, or an mpsc sender), so a
/// clone can be moved wholesale into the per-event spawned task.
#[derive(Clone)]
struct WorkerContext {
    store: Arc<dyn Store>,
    gossip: Arc<dyn Gossip>,
    miner: MinerSupervisor,
    fork_recoverer: Arc<ForkRecoverer>,
    memory_probe: Arc<dyn MemoryProbe>,
    delay: PropagationDelay,
    promotions: mpsc::UnboundedSender<Hash>,
    fork_results: mpsc::UnboundedSender<BlockIndex>,
    tx_diagnostics: TxDiagnostics,
}

pub struct NodeWorker {
    state: NodeState,
    snapshot_tx: watch::Sender<Arc<NodeState>>,
    ctx: WorkerContext,
    receiver: mpsc::UnboundedReceiver<(Event, Option<oneshot::Sender<EventReply>>)>,
}

impl NodeWorker {
    /// Spawns the worker on its own task and returns a cheap, cloneable
    /// handle producers use to post events.
    pub fn spawn(
        id: [u8; 32],
        initial_diff: u64,
        store: Arc<dyn Store>,
        gossip: Arc<dyn Gossip>,
        delay: PropagationDelay,
    ) -> NodeWorkerHandle {
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let (completions_tx, mut completions_rx) = mpsc::unbounded_channel::<WorkComplete>();
        let (promote_tx, mut promote_rx) = mpsc::unbounded_channel::<Hash>();
        let (fork_tx, mut fork_rx) = mpsc::unbounded_channel::<BlockIndex>();

        let forward = event_tx.clone();
        tokio::spawn(async move {
            while let Some(work) = completions_rx.recv().await {
                let _ = forward.send((Event::WorkComplete(work), None));
            }
        });

        let forward = event_tx.clone();
        tokio::spawn(async move {
            while let Some(tx_id) = promote_rx.recv().await {
                let _ = forward.send((Event::EncounterNewTx(tx_id), None));
            }
        });

        let forward = event_tx.clone();
        tokio::spawn(async move {
            while let Some(index) = fork_rx.recv().await {
                let _ = forward.send((Event::ForkRecovered(index), None));
            }
        });

        let tx_diagnostics = TxDiagnostics::new();
        let initial_state = NodeState::new(id, initial_diff);
        let (snapshot_tx, snapshot_rx) = watch::channel(Arc::new(initial_state.clone()));

        let worker = NodeWorker {
            state: initial_state,
            snapshot_tx,
            ctx: WorkerContext {
                store,
                gossip,
                miner: MinerSupervisor::new(completions_tx),
                fork_recoverer: ForkRecoverer::new(),
                memory_probe: Arc::new(SystemMemoryProbe),
                delay,
                promotions: promote_tx,
                fork_results: fork_tx,
                tx_diagnostics: tx_diagnostics.clone(),
            },
            receiver: event_rx,
        };

        tokio::spawn(worker.run());

        NodeWorkerHandle {
            sender: event_tx,
            tx_diagnostics,
            snapshot: snapshot_rx,
        }
    }

    async fn run(mut self) {
        while let Some((event, reply_to)) = self.receiver.recv().await {
            if matches!(event, Event::Stop) {
                info!("node worker stopping");
                return;
            }

            let ctx = self.ctx.clone();
            let mut worker_state = self.state.clone();
            let join = tokio::spawn(async move {
                let reply = handle_event(&mut worker_state, &ctx, event).await;
                (worker_state, reply)
            });

            match join.await {
                Ok((new_state, reply)) => {
                    self.state = new_state;
                    let _ = self.snapshot_tx.send(Arc::new(self.state.clone()));
                    if let Some(reply_to) = reply_to {
                        let _ = reply_to.send(reply);
                    }
                }
                Err(join_err) => {
                    error!(
                        "node_worker_exception: panic caught handling event: {}",
                        join_err
                    );
                    if let Some(reply_to) = reply_to {
                        let _ = reply_to.send(EventReply::Rejected("internal exception".into()));
                    }
                }
            }
        }
    }
}

async fn handle_event(state: &mut NodeState, ctx: &WorkerContext, event: Event) -> EventReply {
    match event {
        Event::Stop => unreachable!("Stop is handled in run() before dispatch"),
        Event::AddTx(tx) => handle_add_tx(state, ctx, tx).await,
        Event::EncounterNewTx(id) => {
            tx_pool::promote(state, id, ctx.memory_probe.as_ref());
            rebuild_floating(state);
            EventReply::Ack
        }
        Event::ProcessNewBlock {
            peer,
            block,
            recall,
            txs,
            hash_list,
        } => handle_process_new_block(state, ctx, peer, block, recall, txs, hash_list).await,
        Event::WorkComplete(work) => handle_work_complete(state, ctx, work).await,
        Event::ForkRecovered(index) => handle_fork_recovered(state, ctx, index).await,
        Event::Mine => {
            start_mining(state, ctx, None);
            EventReply::Ack
        }
        Event::MineAtDiff(d) => {
            start_mining(state, ctx, Some(d));
            EventReply::Ack
        }
        Event::AutoMine(on) => {
            state.automine = on;
            if on {
                start_mining(state, ctx, None);
            }
            EventReply::Ack
        }
        Event::ReplaceBlockList(index) => {
            state.apply(StateDelta {
                height: Some(index.height()),
                block_index: Some(index),
                ..Default::default()
            });
            EventReply::Ack
        }
        Event::SetRewardAddr(addr) => {
            state.reward_addr = addr;
            EventReply::Ack
        }
        Event::SetLossProbability(p) => {
            ctx.gossip.set_loss_probability(&mut state.gossip, p);
            EventReply::Ack
        }
        Event::SetDelay(ms) => {
            ctx.gossip.set_delay(&mut state.gossip, ms);
            EventReply::Ack
        }
        Event::SetXferSpeed(bps) => {
            ctx.gossip.set_xfer_speed(&mut state.gossip, bps);
            EventReply::Ack
        }
        Event::SetMiningDelay(ms) => {
            state.mining_delay = ms;
            EventReply::Ack
        }
        Event::AddPeers(peers) => {
            ctx.gossip.add_peers(&mut state.gossip, &peers);
            EventReply::Ack
        }
    }
}

async fn handle_add_tx(state: &mut NodeState, ctx: &WorkerContext, tx: Tx) -> EventReply {
    let tx_id = tx.id;
    match tx_pool::add_tx(state, tx, ctx.delay, &ctx.tx_diagnostics) {
        Ok(AddTxOutcome::Waiting { delay_ms }) => {
            debug!("tx {} queued, promotes in {}ms", hex::encode(tx_id), delay_ms);
            let promotions = ctx.promotions.clone();
            tokio::spawn(async move {
                tokio::time::sleep(std::time::Duration::from_millis(delay_ms)).await;
                let _ = promotions.send(tx_id);
            });
            EventReply::Ack
        }
        Ok(AddTxOutcome::Conflict { reason }) => {
            warn!("tx {} rejected: {}", hex::encode(tx_id), reason);
            EventReply::Rejected(reason.to_string())
        }
        Err(e) => {
            warn!("tx {} pool error: {}", hex::encode(tx_id), e);
            EventReply::Rejected(e.to_string())
        }
    }
}

fn rebuild_floating(state: &mut NodeState) {
    state.floating_wallet_list = wallet_ledger::apply_txs(&state.wallet_list, &state.txs)
        .unwrap_or_else(|_| state.wallet_list.clone());
}

async fn current_head(state: &NodeState, ctx: &WorkerContext) -> Option<Block> {
    let tip = state.block_index.tip()?;
    ctx.store.read_block_by_hash(&tip.block_hash).await.ok().flatten()
}

/// `ProcessNewBlock` algorithm, spec §4.F.
async fn handle_process_new_block(
    state: &mut NodeState,
    ctx: &WorkerContext,
    peer: PeerId,
    block: Block,
    recall: Option<RecallBlock>,
    txs: Vec<Tx>,
    hash_list: Option<Vec<Hash>>,
) -> EventReply {
    if !state.is_joined() {
        info!(
            "not joined yet, initiating join via fork recovery toward {}",
            hex::encode(peer)
        );
        if let Some(hashes) = hash_list {
            begin_recovery(ctx, peer, block.indep_hash, hashes).await;
        }
        return EventReply::Ack;
    }

    let height = state.height.unwrap();

    if block.height <= height {
        debug!("ignoring stale block at height {}", block.height);
        return EventReply::Ack;
    }

    if block.height > height + 1 {
        info!("gap to height {} detected, triggering fork recovery", block.height);
        if let Some(hashes) = hash_list {
            begin_recovery(ctx, peer, block.indep_hash, hashes).await;
        }
        return EventReply::Ack;
    }

    let recall = match recall {
        Some(r) => r,
        None => match fetch_recall_block(ctx, &block, hash_list.as_deref()).await {
            Some(r) => r,
            None => {
                warn!("recall block unavailable for height {}", block.height);
                return EventReply::Rejected("recall_unavailable".into());
            }
        },
    };

    let prev_head = match current_head(state, ctx).await {
        Some(b) => b,
        None => return EventReply::Rejected("missing previous head".into()),
    };

    let inputs = ValidationInputs {
        candidate: &block,
        txs: &txs,
        prev_head: &prev_head,
        recall_block: &recall,
        wallet_list: &state.wallet_list,
        old_reward_pool: state.reward_pool,
        now_ms: chrono::Utc::now().timestamp_millis() as u64,
    };

    let recovering = ctx.fork_recoverer.is_recovering().await;
    match block_validator::validate(&inputs) {
        Ok(new_wallets) if !recovering => {
            integrate_block(state, ctx, block, &txs, new_wallets).await;
            EventReply::Ack
        }
        Ok(_) => {
            warn!("valid block arrived mid-recovery, deferring to fork recovery");
            EventReply::Ack
        }
        Err(e) => {
            warn!("block rejected: {}", e);
            if let Some(hashes) = hash_list {
                begin_recovery(ctx, peer, block.indep_hash, hashes).await;
            }
            EventReply::Rejected(e.to_string())
        }
    }
}

async fn begin_recovery(ctx: &WorkerContext, peer: PeerId, target: Hash, hash_list: Vec<Hash>) {
    if ctx.fork_recoverer.begin(peer, target).await.is_err() {
        debug!("fork recovery already in progress, ignoring new trigger");
        return;
    }
    let recoverer = Arc::clone(&ctx.fork_recoverer);
    let store = Arc::clone(&ctx.store);
    let results = ctx.fork_results.clone();
    tokio::spawn(async move {
        let outcome = recoverer.recover(store.as_ref(), hash_list).await;
        if let crate::fork_recovery::RecoveryState::Completed { hash_list } = outcome {
            let _ = results.send(hash_list);
        }
    });
}

async fn integrate_block(
    state: &mut NodeState,
    ctx: &WorkerContext,
    block: Block,
    txs: &[Tx],
    new_wallets: WalletList,
) {
    let remaining_active: Vec<Tx> = state
        .txs
        .iter()
        .filter(|t| !block.txs.contains(&t.id))
        .cloned()
        .collect();
    let (_, reordered) = wallet_ledger::filter_out_of_order(&new_wallets, &remaining_active);

    let mut new_index = state.block_index.clone();
    new_index.push_tip(IndexEntry {
        block_hash: block.indep_hash,
        weave_size: block.weave_size,
        tx_root: block.tx_root,
    });

    state.apply(StateDelta {
        block_index: Some(new_index.clone()),
        height: Some(new_index.height()),
        wallet_list: Some(new_wallets.clone()),
        txs: Some(reordered),
        potential_txs: Some(Vec::new()),
        reward_pool: Some(block.reward_pool),
        weave_size: Some(block.weave_size),
        diff: Some(block.diff),
        last_retarget: Some(block.last_retarget),
        ..Default::default()
    });
    rebuild_floating(state);

    if let Err(e) = ctx.store.write_block(&block).await {
        error!("failed to persist integrated block: {}", e);
    }
    for tx in txs {
        let _ = ctx.store.write_tx(tx).await;
    }
    let _ = ctx.store.write_wallet_list(&block.wallet_root, &new_wallets).await;
    let _ = ctx.store.write_block_index(&new_index).await;

    ctx.gossip
        .send(
            &mut state.gossip,
            GossipMessage::NewBlock {
                height: block.height,
                block: block.clone(),
                recall_block: None,
            },
        )
        .await;

    ctx.miner.stop();
    if state.automine {
        start_mining(state, ctx, None);
    }
    info!("integrated block at height {}", block.height);
}

async fn handle_work_complete(state: &mut NodeState, ctx: &WorkerContext, work: WorkComplete) -> EventReply {
    if !state.is_joined() {
        return EventReply::Rejected("not joined".into());
    }
    let prev_head = match current_head(state, ctx).await {
        Some(b) => b,
        None => return EventReply::Rejected("missing previous head".into()),
    };
    let recall = RecallBlock {
        indep_hash: work.recall_hash,
        block_size: work.recall_block_size,
    };

    let weave_size = prev_head.weave_size + work.txs.iter().map(|t| t.data_size).sum::<u64>();
    let (finder, new_pool) = reward::calculate(
        state.reward_pool,
        &work.txs,
        recall.block_size,
        weave_size,
        prev_head.height + 1,
    );
    let reward_addr = match state.reward_addr {
        RewardAddr::Addr(a) => a,
        RewardAddr::Unclaimed => crate::types::UNCLAIMED,
    };
    let applied = match wallet_ledger::apply_txs(&state.wallet_list, &work.txs) {
        Ok(w) => w,
        Err(_) => return reject_mined_block(state, ctx),
    };
    let rewarded = wallet_ledger::apply_mining_reward(&applied, reward_addr, finder, prev_head.height + 1);

    let tx_ids: Vec<[u8; 32]> = work.txs.iter().map(|t| t.id).collect();
    let candidate = Block {
        indep_hash: work.candidate_hash,
        previous: prev_head.indep_hash,
        height: prev_head.height + 1,
        timestamp: work.timestamp,
        nonce: work.nonce,
        diff: work.diff,
        last_retarget: prev_head.last_retarget,
        tx_root: crate::crypto::merkle::tx_root(&tx_ids),
        txs: tx_ids,
        wallet_root: block_validator::wallet_root(&rewarded),
        reward_addr,
        reward_pool: new_pool,
        weave_size,
        block_size: work.txs.iter().map(|t| t.data_size).sum(),
        tags: state.tags.clone(),
    };

    let inputs = ValidationInputs {
        candidate: &candidate,
        txs: &work.txs,
        prev_head: &prev_head,
        recall_block: &recall,
        wallet_list: &state.wallet_list,
        old_reward_pool: state.reward_pool,
        now_ms: work.timestamp,
    };

    match block_validator::validate(&inputs) {
        Ok(new_wallets) => {
            integrate_block(state, ctx, candidate, &work.txs, new_wallets).await;
            EventReply::Ack
        }
        Err(e) => {
            warn!("mined block failed validation: {}", e);
            reject_mined_block(state, ctx)
        }
    }
}

/// With 20% probability a bad mined block wipes both `txs` and
/// `potential_txs`; otherwise they are preserved. The miner is always
/// reset. Implemented bit-for-bit per spec (see DESIGN.md open question 2).
fn reject_mined_block(state: &mut NodeState, ctx: &WorkerContext) -> EventReply {
    if rand::thread_rng().gen_bool(0.2) {
        state.txs.clear();
        state.potential_txs.clear();
        rebuild_floating(state);
    }
    ctx.miner.stop();
    if state.automine {
        start_mining(state, ctx, None);
    }
    EventReply::Rejected("invalid mined block".into())
}

async fn handle_fork_recovered(state: &mut NodeState, ctx: &WorkerContext, new_hashes: BlockIndex) -> EventReply {
    // Spec §4.F / §9 open question 4: adopt only if `new_hashes` is longer
    // than the current index (raw block count, not cumulative work) or the
    // node was not joined yet. Otherwise a stale or short recovery result
    // would roll the head backward.
    if state.is_joined() && new_hashes.0.len() <= state.block_index.0.len() {
        debug!(
            "ignoring fork-recovery result with {} block(s), current chain has {}",
            new_hashes.0.len(),
            state.block_index.0.len()
        );
        return EventReply::Rejected("fork_recovery_not_longer".into());
    }

    let tip = match new_hashes.tip() {
        Some(t) => t.clone(),
        None => return EventReply::Rejected("empty recovery result".into()),
    };
    let tip_block = match ctx.store.read_block_by_hash(&tip.block_hash).await {
        Ok(Some(b)) => b,
        _ => return EventReply::Rejected("tip block unavailable".into()),
    };
    let new_wallets = ctx
        .store
        .read_wallet_list(&tip_block.wallet_root)
        .await
        .ok()
        .flatten()
        .unwrap_or_default();

    let mut combined = state.txs.clone();
    combined.extend(state.potential_txs.clone());
    let (_, reordered) = wallet_ledger::filter_out_of_order(&new_wallets, &combined);

    state.apply(StateDelta {
        block_index: Some(new_hashes.clone()),
        height: Some(new_hashes.height()),
        wallet_list: Some(new_wallets),
        txs: Some(reordered),
        potential_txs: Some(Vec::new()),
        reward_pool: Some(tip_block.reward_pool),
        weave_size: Some(tip_block.weave_size),
        diff: Some(tip_block.diff),
        last_retarget: Some(tip_block.last_retarget),
        ..Default::default()
    });
    rebuild_floating(state);
    ctx.miner.stop();
    if state.automine {
        start_mining(state, ctx, None);
    }
    info!("fork recovery adopted chain at height {:?}", state.height);
    EventReply::Ack
}

fn start_mining(state: &mut NodeState, ctx: &WorkerContext, diff_override: Option<u64>) {
    if !state.is_joined() {
        return;
    }
    let recall_block = match pick_recall_block(state) {
        Some(r) => r,
        None => return,
    };
    let diff = diff_override.unwrap_or(state.diff);
    let candidate_hash = {
        let tip = state.block_index.tip().map(|t| t.block_hash).unwrap_or([0u8; 32]);
        let mut buf = Vec::with_capacity(64);
        buf.extend_from_slice(&tip);
        buf.extend_from_slice(&state.txs.len().to_be_bytes());
        crate::crypto::hash::hash_sha256(&buf)
    };
    ctx.miner.start(MiningJob {
        txs: state.txs.clone(),
        diff,
        recall_block,
        candidate_hash,
    });
}

/// `find_recall_hash(block, hash_list)`, spec §4.F: derives the same
/// recall-block hash a peer would, from the candidate's own hash and the
/// chain history it claims, when this node did not receive a recall block
/// alongside `NewBlock`.
fn find_recall_hash(block: &Block, hash_list: &[Hash]) -> Option<Hash> {
    if hash_list.is_empty() {
        return None;
    }
    let digest = crate::crypto::hash::hash_sha256(&block.indep_hash);
    let idx = (u64::from_be_bytes(digest[..8].try_into().unwrap()) as usize) % hash_list.len();
    hash_list.get(idx).copied()
}

/// Attempts to fetch the recall block named by `find_recall_hash` from the
/// peer, per spec §4.F. Reading from `Store` stands in for the peer fetch,
/// matching `fork_recovery`'s own use of `Store` reads for that purpose.
async fn fetch_recall_block(ctx: &WorkerContext, block: &Block, hash_list: Option<&[Hash]>) -> Option<RecallBlock> {
    let hash = find_recall_hash(block, hash_list?)?;
    let recalled = ctx.store.read_block_by_hash(&hash).await.ok().flatten()?;
    Some(RecallBlock {
        indep_hash: recalled.indep_hash,
        block_size: recalled.weave_size,
    })
}

/// Deterministically picks a historical block to recall from the current
/// hash, used as the PoW recall input.
fn pick_recall_block(state: &NodeState) -> Option<RecallBlock> {
    let height = state.height?;
    let tip = state.block_index.tip()?;
    let digest = crate::crypto::hash::hash_sha256(&tip.block_hash);
    let recall_height = u64::from_be_bytes(digest[..8].try_into().unwrap()) % (height + 1);
    let idx = (height - recall_height) as usize;
    state.block_index.0.get(idx).map(|entry| RecallBlock {
        indep_hash: entry.block_hash,
        block_size: entry.weave_size,
    })
}
