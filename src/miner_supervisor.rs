//! Miner Supervisor (spec component G): starts/stops/reseeds the PoW
//! worker and wires its result back to the node worker as a `WorkComplete`
//! event.
//!
//! Directly grounded in the teacher's `node/ecosystem_miner.rs`: the
//! `Arc<AtomicBool>` mining flag checked at each attempt boundary, the
//! `tokio::spawn`'d mining loop, and the start/stop/is_running shape are
//! reused as a pattern. The PoW predicate itself is replaced (plain
//! SHA-256 leading-zero-bit difficulty instead of `FractalPoW`), and
//! `println!` logging is replaced by the `log` facade.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use log::{debug, info};
use tokio::sync::mpsc;

use crate::crypto::hash::{hash_sha256, leading_zero_bits};
use crate::types::{RecallBlock, Tx};

#[derive(Clone, Debug)]
pub struct WorkComplete {
    pub txs: Vec<Tx>,
    pub diff: u64,
    pub nonce: u64,
    pub timestamp: u64,
    pub candidate_hash: [u8; 32],
    pub recall_hash: [u8; 32],
    /// The recall block's size, as picked by `pick_recall_block` when the
    /// job was started. Carried through so the finder reward computed for
    /// a self-mined block uses the same recall size a peer will recompute
    /// when it revalidates the gossiped block (spec component D).
    pub recall_block_size: u64,
}

#[derive(Clone)]
pub struct MiningJob {
    pub txs: Vec<Tx>,
    pub diff: u64,
    pub recall_block: RecallBlock,
    pub candidate_hash: [u8; 32],
}

pub struct MinerSupervisor {
    active: Arc<AtomicBool>,
    completions: mpsc::UnboundedSender<WorkComplete>,
}

impl MinerSupervisor {
    pub fn new(completions: mpsc::UnboundedSender<WorkComplete>) -> Self {
        Self {
            active: Arc::new(AtomicBool::new(false)),
            completions,
        }
    }

    pub fn is_running(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }

    /// Cancels any in-flight PoW worker. The worker checks the shared flag
    /// between attempts and exits cooperatively; no half-committed state is
    /// ever observed by the node worker because the only way results reach
    /// it is through the `completions` channel.
    pub fn stop(&self) {
        self.active.store(false, Ordering::SeqCst);
    }

    /// Spawns a fresh PoW worker for `job`, cancelling any prior one first.
    pub fn start(&self, job: MiningJob) {
        self.stop();
        self.active.store(true, Ordering::SeqCst);
        let active = Arc::clone(&self.active);
        let completions = self.completions.clone();

        tokio::task::spawn_blocking(move || {
            info!(
                "miner started: {} txs, diff {}",
                job.txs.len(),
                job.diff
            );
            let mut nonce: u64 = 0;
            loop {
                if !active.load(Ordering::SeqCst) {
                    debug!("miner cancelled after {} attempts", nonce);
                    return;
                }
                if pow_attempt(&job.candidate_hash, nonce, &job.recall_block.indep_hash, job.diff) {
                    let timestamp = chrono::Utc::now().timestamp_millis() as u64;
                    let _ = completions.send(WorkComplete {
                        txs: job.txs.clone(),
                        diff: job.diff,
                        nonce,
                        timestamp,
                        candidate_hash: job.candidate_hash,
                        recall_hash: job.recall_block.indep_hash,
                        recall_block_size: job.recall_block.block_size,
                    });
                    active.store(false, Ordering::SeqCst);
                    return;
                }
                nonce = nonce.wrapping_add(1);
            }
        });
    }
}

fn pow_attempt(candidate_hash: &[u8; 32], nonce: u64, recall_hash: &[u8; 32], diff: u64) -> bool {
    let mut input = Vec::with_capacity(72);
    input.extend_from_slice(candidate_hash);
    input.extend_from_slice(&nonce.to_be_bytes());
    input.extend_from_slice(recall_hash);
    let digest = hash_sha256(&input);
    leading_zero_bits(&digest) as u64 >= diff
}
