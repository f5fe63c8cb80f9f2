//! Crate-wide error taxonomy, one `thiserror` enum per subsystem and a
//! top-level aggregate, matching the teacher's per-module error style.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("not enough space to store {0} bytes")]
    NotEnoughSpace(usize),
    #[error("io error: {0}")]
    Io(String),
    #[error("serialization error: {0}")]
    Serialization(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("rejected by firewall policy")]
    FirewallReject,
}

#[derive(Debug, Error)]
pub enum TxPoolError {
    #[error("transaction {0} conflicts with an already-known transaction")]
    Conflict(String),
    #[error("transaction {0} exceeds the maximum allowed size")]
    TooLarge(String),
}

#[derive(Debug, Error)]
pub enum WalletError {
    #[error("insufficient balance for address {0}")]
    InsufficientBalance(String),
    #[error("out-of-order transaction {0}")]
    OutOfOrder(String),
}

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("height mismatch: expected {expected}, got {got}")]
    HeightMismatch { expected: u64, got: u64 },
    #[error("previous hash mismatch")]
    PreviousHashMismatch,
    #[error("timestamp out of bounds")]
    TimestampOutOfBounds,
    #[error("difficulty mismatch: expected {expected}, got {got}")]
    DifficultyMismatch { expected: u64, got: u64 },
    #[error("proof of work predicate failed")]
    ProofOfWorkFailed,
    #[error("merkle root mismatch")]
    MerkleRootMismatch,
    #[error("applying transactions to the wallet list failed")]
    WalletApplyFailed,
    #[error("wallet root mismatch after reward application")]
    WalletRootMismatch,
    #[error("weave size mismatch: expected {expected}, got {got}")]
    WeaveSizeMismatch { expected: u64, got: u64 },
    #[error("recall block unavailable")]
    RecallUnavailable,
}

#[derive(Debug, Error)]
pub enum ConsensusError {
    #[error("peer {0} is unavailable")]
    PeerUnavailable(String),
    #[error("recall block unavailable")]
    RecallUnavailable,
    #[error("operation timed out")]
    Timeout,
    #[error("internal exception: {0}")]
    InternalException(String),
    #[error("fork recovery already in progress")]
    RecoveryInProgress,
}

#[derive(Debug, Error)]
pub enum NodeError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    TxPool(#[from] TxPoolError),
    #[error(transparent)]
    Wallet(#[from] WalletError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Consensus(#[from] ConsensusError),
    #[error("configuration error: {0}")]
    Config(String),
}
