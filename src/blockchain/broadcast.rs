//! Submission of signed transactions.

use alloy::primitives::TxHash;
use std::sync::Arc;

use crate::blockchain::transaction::SignedTransaction;
use crate::blockchain::types::{BlockchainResult, LedgerNode};

/// Hands signed payloads to the node, once.
#[derive(Clone)]
pub struct TransactionBroadcaster {
    node: Arc<dyn LedgerNode>,
}

impl TransactionBroadcaster {
    pub fn new(node: Arc<dyn LedgerNode>) -> Self {
        Self { node }
    }

    /// Submit `signed` and return the hash reported by the node.
    ///
    /// Rejections are returned as-is and never resubmitted: a second attempt
    /// after a nonce conflict could double-spend.
    pub async fn broadcast(&self, signed: SignedTransaction) -> BlockchainResult<TxHash> {
        let reported = self.node.send_raw_transaction(&signed.raw).await?;
        if reported != signed.hash {
            tracing::warn!(
                local = %signed.hash,
                reported = %reported,
                "Node reported a different transaction hash"
            );
        }
        tracing::info!(tx_hash = %reported, "Transaction broadcast");
        Ok(reported)
    }
}
