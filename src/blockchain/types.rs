//! Chain-specific types and error definitions.

use alloy::primitives::{Address, TxHash};
use async_trait::async_trait;
use thiserror::Error;

use crate::blockchain::units::UnitsError;

// Re-export LedgerConfig from config module to avoid duplication
pub use crate::config::schema::LedgerConfig;

/// Chain ID type for strong typing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChainId(pub u64);

impl From<u64> for ChainId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl From<ChainId> for u64 {
    fn from(id: ChainId) -> Self {
        id.0
    }
}

/// Errors that can occur during blockchain operations.
#[derive(Debug, Error)]
pub enum BlockchainError {
    /// RPC connection or request failed.
    #[error("RPC error: {0}")]
    Rpc(String),

    /// RPC request timed out.
    #[error("RPC timeout after {0} seconds")]
    Timeout(u64),

    /// The node refused the submitted transaction.
    #[error("Transaction rejected by node: {0}")]
    Rejected(String),

    /// Invalid private key format or signing failure.
    #[error("Wallet error: {0}")]
    Wallet(String),

    /// Amount cannot be expressed in minor units.
    #[error("Invalid amount: {0}")]
    Amount(#[from] UnitsError),

    /// Chain configuration mismatch.
    #[error("Chain ID mismatch: expected {expected}, got {actual}")]
    ChainMismatch { expected: u64, actual: u64 },
}

impl BlockchainError {
    /// The underlying cause, without the category prefix.
    ///
    /// Node rejections keep the node's own message verbatim.
    pub fn detail(&self) -> String {
        match self {
            Self::Rpc(detail) | Self::Rejected(detail) | Self::Wallet(detail) => detail.clone(),
            other => other.to_string(),
        }
    }
}

/// Result type for blockchain operations.
pub type BlockchainResult<T> = Result<T, BlockchainError>;

/// The ledger node calls the agent depends on.
///
/// [`BlockchainClient`](crate::blockchain::BlockchainClient) talks JSON-RPC to
/// a real node; tests substitute in-memory nodes.
#[async_trait]
pub trait LedgerNode: Send + Sync {
    /// `eth_getTransactionCount` for `address` (the next nonce).
    async fn transaction_count(&self, address: Address) -> BlockchainResult<u64>;

    /// `eth_gasPrice`, in minor units per gas.
    async fn gas_price(&self) -> BlockchainResult<u128>;

    /// `eth_sendRawTransaction`; returns the hash the node reports.
    async fn send_raw_transaction(&self, raw: &[u8]) -> BlockchainResult<TxHash>;

    /// `eth_blockNumber`, used for health checks.
    async fn block_number(&self) -> BlockchainResult<u64>;
}
