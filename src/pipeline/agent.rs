//! Shared agent handle.
//!
//! An `Agent` owns every pipeline collaborator and is immutable after
//! construction, so one instance serves all concurrent requests behind an
//! `Arc`.

use alloy::primitives::Address;
use std::sync::Arc;

use crate::blockchain::transaction::DEFAULT_GAS_LIMIT;
use crate::blockchain::{
    BlockchainResult, ChecksumPolicy, LedgerNode, TransactionBroadcaster, TransactionBuilder,
    Wallet,
};
use crate::intent::IntentExtractor;
use crate::pipeline::orchestrator::{PipelineRun, TransactionPipeline};

/// Tunables that shape every transfer.
#[derive(Debug, Clone, Copy)]
pub struct AgentOptions {
    pub gas_limit: u64,
    pub checksum: ChecksumPolicy,
}

impl Default for AgentOptions {
    fn default() -> Self {
        Self {
            gas_limit: DEFAULT_GAS_LIMIT,
            checksum: ChecksumPolicy::default(),
        }
    }
}

pub struct Agent {
    pub(super) extractor: Arc<dyn IntentExtractor>,
    pub(super) builder: TransactionBuilder,
    pub(super) broadcaster: TransactionBroadcaster,
    pub(super) wallet: Wallet,
    pub(super) checksum: ChecksumPolicy,
    node: Arc<dyn LedgerNode>,
}

impl Agent {
    pub fn new(
        extractor: Arc<dyn IntentExtractor>,
        node: Arc<dyn LedgerNode>,
        wallet: Wallet,
        options: AgentOptions,
    ) -> Self {
        Self {
            extractor,
            builder: TransactionBuilder::new(node.clone(), options.gas_limit),
            broadcaster: TransactionBroadcaster::new(node.clone()),
            wallet,
            checksum: options.checksum,
            node,
        }
    }

    /// Run one request through a fresh pipeline.
    pub async fn submit(&self, user_text: &str) -> PipelineRun {
        TransactionPipeline::new(self).run(user_text).await
    }

    /// Run one request and return the status line for the user.
    pub async fn handle_user_message(&self, user_text: &str) -> String {
        self.submit(user_text).await.reply()
    }

    /// Account every transfer is sent from.
    pub fn sender(&self) -> Address {
        self.wallet.address()
    }

    pub fn chain_id(&self) -> u64 {
        self.wallet.chain_id()
    }

    /// Latest block number, as a liveness check of the node.
    pub async fn node_block_number(&self) -> BlockchainResult<u64> {
        self.node.block_number().await
    }
}

impl std::fmt::Debug for Agent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Agent")
            .field("sender", &self.sender())
            .field("chain_id", &self.chain_id())
            .field("checksum", &self.checksum)
            .finish_non_exhaustive()
    }
}
