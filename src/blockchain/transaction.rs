//! Transaction assembly from live network state.
//!
//! # Responsibilities
//! - Convert the requested amount to minor units
//! - Fetch the sender's nonce and the current gas price, in that order
//! - Produce an `UnsignedTransaction` for the wallet to sign
//!
//! Nothing here is cached: the nonce and gas price are read for every
//! transaction, since other transactions from the same account can land in
//! between.

use alloy::primitives::{Address, Bytes, TxHash, U256};
use std::sync::Arc;

use crate::blockchain::types::{BlockchainResult, LedgerNode};
use crate::blockchain::units::to_minor_units;
use crate::intent::TransactionIntent;

/// Gas limit used for every transfer unless configured otherwise.
pub const DEFAULT_GAS_LIMIT: u64 = 3_000_000;

/// A native-token transfer ready to be signed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnsignedTransaction {
    pub nonce: u64,
    pub to: Address,
    /// Amount in minor units (18 decimals).
    pub value: U256,
    pub gas_limit: u64,
    /// Gas price in minor units per gas.
    pub gas_price: u128,
}

/// Raw signed payload, consumed by the broadcaster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedTransaction {
    /// EIP-2718 encoded transaction.
    pub raw: Bytes,
    /// Hash computed locally from `raw`.
    pub hash: TxHash,
}

/// Builds transfers against a ledger node.
#[derive(Clone)]
pub struct TransactionBuilder {
    node: Arc<dyn LedgerNode>,
    gas_limit: u64,
}

impl TransactionBuilder {
    /// Create a new transaction builder.
    pub fn new(node: Arc<dyn LedgerNode>, gas_limit: u64) -> Self {
        Self { node, gas_limit }
    }

    /// Build a transfer of `intent.amount()` to `recipient` from `sender`.
    ///
    /// # Arguments
    /// * `intent` - Parsed request; supplies the amount
    /// * `recipient` - Validated destination address
    /// * `sender` - Account whose nonce is used
    pub async fn build(
        &self,
        intent: &TransactionIntent,
        recipient: Address,
        sender: Address,
    ) -> BlockchainResult<UnsignedTransaction> {
        let value = to_minor_units(intent.amount())?;

        let nonce = self.node.transaction_count(sender).await?;
        let gas_price = self.node.gas_price().await?;

        tracing::debug!(
            nonce,
            gas_price,
            gas_limit = self.gas_limit,
            to = %recipient,
            "Transaction assembled"
        );

        Ok(UnsignedTransaction {
            nonce,
            to: recipient,
            value,
            gas_limit: self.gas_limit,
            gas_price,
        })
    }
}
