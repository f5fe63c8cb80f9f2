//! Wallet Ledger (spec component C): the balance map and its debit/credit
//! semantics. New module — the spec's in-node ledger has no direct teacher
//! analog (the teacher's `wallet/wallet.rs` is an external RPC client, out
//! of scope here); grounded loosely in the balance-map shape of
//! `storage/mod.rs::set_balance/get_balance` and in how
//! `examples/other_examples/...botho...node-mod.rs.rs` threads a ledger
//! alongside a mempool and miner.

use crate::error::WalletError;
use crate::state::{WalletEntry, WalletList};
use crate::types::{Address, Tx, UNCLAIMED};

/// `apply_tx(wallets, tx)`: debits the owner, credits the target for
/// transfers, and always advances `last_tx`. Returns the wallets unchanged
/// (as an `Err`) if the debit would underflow.
pub fn apply_tx(wallets: &WalletList, tx: &Tx) -> Result<WalletList, WalletError> {
    let owner_addr = tx.owner_address();
    let mut next = wallets.clone();
    let owner_entry = next.entry(owner_addr).or_insert(WalletEntry {
        balance: 0,
        last_tx: [0u8; 32],
    });

    let debit = if tx.is_transfer() {
        tx.quantity.checked_add(tx.reward)
    } else {
        Some(tx.reward)
    }
    .ok_or_else(|| WalletError::InsufficientBalance(hex::encode(owner_addr)))?;

    let new_owner_balance = owner_entry
        .balance
        .checked_sub(debit)
        .ok_or_else(|| WalletError::InsufficientBalance(hex::encode(owner_addr)))?;

    owner_entry.balance = new_owner_balance;
    owner_entry.last_tx = tx.id;

    if tx.is_transfer() {
        let target_entry = next.entry(tx.target).or_insert(WalletEntry {
            balance: 0,
            last_tx: [0u8; 32],
        });
        target_entry.balance = target_entry
            .balance
            .checked_add(tx.quantity)
            .ok_or_else(|| WalletError::InsufficientBalance(hex::encode(tx.target)))?;
    }

    Ok(next)
}

/// `apply_txs(wallets, txs)`: folds `apply_tx` in order, aborting the fold
/// on the first invalid step.
pub fn apply_txs(wallets: &WalletList, txs: &[Tx]) -> Result<WalletList, WalletError> {
    let mut current = wallets.clone();
    for tx in txs {
        current = apply_tx(&current, tx)?;
    }
    Ok(current)
}

/// `filter_out_of_order(wallets, txs)`: the longest prefix-closed
/// sub-sequence of `txs` that applies cleanly, skipping (not aborting on)
/// any tx that would fail against the running state.
pub fn filter_out_of_order(wallets: &WalletList, txs: &[Tx]) -> (WalletList, Vec<Tx>) {
    let mut current = wallets.clone();
    let mut kept = Vec::with_capacity(txs.len());
    for tx in txs {
        match apply_tx(&current, tx) {
            Ok(next) => {
                current = next;
                kept.push(tx.clone());
            }
            Err(_) => continue,
        }
    }
    (current, kept)
}

/// `apply_mining_reward(wallets, addr, amount, _height)`: credits `amount`
/// to `addr` unless `addr` is the `Unclaimed` sentinel.
pub fn apply_mining_reward(
    wallets: &WalletList,
    addr: Address,
    amount: u64,
    _height: u64,
) -> WalletList {
    let mut next = wallets.clone();
    if addr == UNCLAIMED {
        return next;
    }
    let entry = next.entry(addr).or_insert(WalletEntry {
        balance: 0,
        last_tx: [0u8; 32],
    });
    entry.balance = entry.balance.saturating_add(amount);
    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn tx(owner: &[u8], target: Address, quantity: u64, reward: u64, last_tx: [u8; 32]) -> Tx {
        Tx {
            id: [quantity as u8 + 1; 32],
            last_tx,
            owner: owner.to_vec(),
            target,
            quantity,
            data: Vec::new(),
            reward,
            signature: Vec::new(),
            tags: Vec::new(),
            data_root: [0u8; 32],
            data_size: 0,
        }
    }

    #[test]
    fn apply_tx_debits_owner_and_credits_target() {
        let owner = b"alice".to_vec();
        let owner_addr = crate::crypto::hash::to_address(&owner);
        let target = [2u8; 32];
        let mut wallets = HashMap::new();
        wallets.insert(
            owner_addr,
            WalletEntry {
                balance: 100,
                last_tx: [0u8; 32],
            },
        );
        let t = tx(&owner, target, 30, 5, [0u8; 32]);
        let next = apply_tx(&wallets, &t).unwrap();
        assert_eq!(next[&owner_addr].balance, 65);
        assert_eq!(next[&target].balance, 30);
        assert_eq!(next[&owner_addr].last_tx, t.id);
    }

    #[test]
    fn apply_tx_rejects_insufficient_balance() {
        let owner = b"bob".to_vec();
        let owner_addr = crate::crypto::hash::to_address(&owner);
        let wallets: WalletList = HashMap::new();
        let t = tx(&owner, [3u8; 32], 5, 0, [0u8; 32]);
        let _ = owner_addr;
        assert!(apply_tx(&wallets, &t).is_err());
    }

    #[test]
    fn filter_out_of_order_skips_invalid_and_is_idempotent() {
        let owner = b"carol".to_vec();
        let owner_addr = crate::crypto::hash::to_address(&owner);
        let mut wallets = HashMap::new();
        wallets.insert(
            owner_addr,
            WalletEntry {
                balance: 10,
                last_tx: [0u8; 32],
            },
        );
        let good = tx(&owner, [4u8; 32], 5, 0, [0u8; 32]);
        let bad = tx(&owner, [5u8; 32], 1000, 0, [0u8; 32]);
        let (_, kept) = filter_out_of_order(&wallets, &[good.clone(), bad]);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].id, good.id);

        let (_, kept_again) = filter_out_of_order(&wallets, &kept);
        assert_eq!(kept_again, kept);
    }

    #[test]
    fn apply_mining_reward_skips_unclaimed() {
        let wallets: WalletList = HashMap::new();
        let next = apply_mining_reward(&wallets, UNCLAIMED, 100, 1);
        assert!(next.is_empty());
    }
}
