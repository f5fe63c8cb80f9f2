//! Same-process gossip stand-in: a broadcast channel any number of readers
//! can subscribe to, used for single-node operation and tests. Not a wire
//! protocol; it exists only so the `Gossip` trait has a real, runnable
//! implementation rather than a stub.

use async_trait::async_trait;
use rand::Rng;
use tokio::sync::broadcast;

use super::{Gossip, GossipCursor, GossipMessage, PeerId};

pub struct LoopbackGossip {
    tx: broadcast::Sender<GossipMessage>,
    known_peers: Vec<PeerId>,
}

impl LoopbackGossip {
    pub fn new(known_peers: Vec<PeerId>) -> Self {
        let (tx, _rx) = broadcast::channel(1024);
        Self { tx, known_peers }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<GossipMessage> {
        self.tx.subscribe()
    }
}

#[async_trait]
impl Gossip for LoopbackGossip {
    fn peers(&self, cursor: &GossipCursor) -> Vec<PeerId> {
        if cursor.peers.is_empty() {
            self.known_peers.clone()
        } else {
            cursor.peers.clone()
        }
    }

    async fn send(&self, cursor: &mut GossipCursor, msg: GossipMessage) -> Vec<PeerId> {
        cursor.sequence += 1;
        if cursor.delay_ms > 0 {
            tokio::time::sleep(std::time::Duration::from_millis(cursor.delay_ms)).await;
        }
        let peers = self.peers(cursor);
        let mut delivered = Vec::with_capacity(peers.len());
        let loss = cursor.loss_probability_millis as f64 / 1000.0;
        let mut rng = rand::thread_rng();
        for peer in peers {
            if loss > 0.0 && rng.gen_bool(loss.min(1.0)) {
                continue;
            }
            delivered.push(peer);
        }
        if !delivered.is_empty() {
            let _ = self.tx.send(msg.clone());
        }
        delivered
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Tx;

    fn sample_tx() -> Tx {
        Tx {
            id: [1u8; 32],
            last_tx: [0u8; 32],
            owner: vec![1, 2, 3],
            target: [2u8; 32],
            quantity: 1,
            data: Vec::new(),
            reward: 0,
            signature: Vec::new(),
            tags: Vec::new(),
            data_root: [0u8; 32],
            data_size: 0,
        }
    }

    #[tokio::test]
    async fn send_with_zero_loss_delivers_to_all_known_peers() {
        let peers = vec![[1u8; 32], [2u8; 32]];
        let gossip = LoopbackGossip::new(peers.clone());
        let mut cursor = GossipCursor::default();
        let delivered = gossip.send(&mut cursor, GossipMessage::NewTx(sample_tx())).await;
        assert_eq!(delivered.len(), peers.len());
        assert_eq!(cursor.sequence, 1);
    }

    #[tokio::test]
    async fn send_with_full_loss_delivers_to_nobody() {
        let peers = vec![[1u8; 32]];
        let gossip = LoopbackGossip::new(peers);
        let mut cursor = GossipCursor::default();
        gossip.set_loss_probability(&mut cursor, 1000);
        let delivered = gossip.send(&mut cursor, GossipMessage::NewTx(sample_tx())).await;
        assert!(delivered.is_empty());
    }
}
