//! Tx diagnostics side-store (spec §4.B, §5): a write-only-from-F,
//! read-by-anyone map from tx id to a diagnostic reason string. Populated
//! when `add_tx` routes a conflicting transaction to `potential_txs`;
//! external consumers (e.g. an RPC layer, out of scope here) poll it to
//! explain why a submitted tx never became active.
//!
//! New module; no teacher analog carries a side-channel like this, so it
//! is built directly from spec §4.B/§5's description of an out-of-band,
//! `Arc<RwLock<_>>`-backed store distinct from the node state record
//! itself.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::types::Hash;

#[derive(Clone, Default)]
pub struct TxDiagnostics {
    reasons: Arc<RwLock<HashMap<Hash, &'static str>>>,
}

impl TxDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, tx_id: Hash, reason: &'static str) {
        self.reasons
            .write()
            .expect("tx diagnostics lock poisoned")
            .insert(tx_id, reason);
    }

    pub fn get(&self, tx_id: &Hash) -> Option<&'static str> {
        self.reasons
            .read()
            .expect("tx diagnostics lock poisoned")
            .get(tx_id)
            .copied()
    }

    pub fn len(&self) -> usize {
        self.reasons.read().expect("tx diagnostics lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_and_reads_back_a_reason() {
        let diagnostics = TxDiagnostics::new();
        let id = [7u8; 32];
        assert_eq!(diagnostics.get(&id), None);
        diagnostics.record(id, "last_tx_not_valid");
        assert_eq!(diagnostics.get(&id), Some("last_tx_not_valid"));
    }

    #[test]
    fn clones_share_the_same_backing_store() {
        let diagnostics = TxDiagnostics::new();
        let handle = diagnostics.clone();
        diagnostics.record([1u8; 32], "last_tx_not_valid");
        assert_eq!(handle.get(&[1u8; 32]), Some("last_tx_not_valid"));
    }
}
