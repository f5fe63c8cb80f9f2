//! Opaque gossip-layer interface (spec §6). The core depends only on this
//! trait; a loopback implementation backs single-node operation and tests.
//! Replaces the teacher's libp2p `gossipsub`/`FractalBehaviour` wiring,
//! which is out of scope here.

pub mod loopback;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::types::{Block, RecallBlock, Tx};

pub type PeerId = [u8; 32];

/// Opaque cursor threaded through node state; advanced only by the gossip
/// layer on behalf of the node worker.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GossipCursor {
    pub sequence: u64,
    pub loss_probability_millis: u32,
    pub delay_ms: u64,
    pub xfer_speed_bps: u64,
    pub peers: Vec<PeerId>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum GossipMessage {
    NewBlock {
        height: u64,
        block: Block,
        recall_block: Option<RecallBlock>,
    },
    NewTx(Tx),
}

#[async_trait]
pub trait Gossip: Send + Sync {
    /// Peers this node is aware of, optionally informed by the latest block.
    fn peers(&self, cursor: &GossipCursor) -> Vec<PeerId>;

    /// Broadcasts `msg`, returning the set of peers it was actually
    /// delivered to (loss simulation may drop some).
    async fn send(&self, cursor: &mut GossipCursor, msg: GossipMessage) -> Vec<PeerId>;

    fn add_peers(&self, cursor: &mut GossipCursor, peers: &[PeerId]) {
        for p in peers {
            if !cursor.peers.contains(p) {
                cursor.peers.push(*p);
            }
        }
    }

    fn set_loss_probability(&self, cursor: &mut GossipCursor, millis: u32) {
        cursor.loss_probability_millis = millis.min(1000);
    }

    fn set_delay(&self, cursor: &mut GossipCursor, ms: u64) {
        cursor.delay_ms = ms;
    }

    fn set_xfer_speed(&self, cursor: &mut GossipCursor, bps: u64) {
        cursor.xfer_speed_bps = bps;
    }
}
