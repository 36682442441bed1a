//! One request through the transfer pipeline.
//!
//! # Stages
//! ```text
//! Extracting   → IntentExtractor (model call)
//! Parsing      → intent::parse (sentinel, grammar, amount)
//! Validating   → address::validate (EIP-55)
//! Building     → TransactionBuilder (nonce, gas price)
//! Signing      → Wallet
//! Broadcasting → TransactionBroadcaster (single submission)
//! ```
//!
//! The first failing stage ends the run; later stages never execute.

use alloy::primitives::TxHash;
use std::time::Instant;
use tracing::Instrument;
use uuid::Uuid;

use crate::blockchain::address;
use crate::intent::parse;
use crate::observability::metrics;
use crate::pipeline::agent::Agent;
use crate::pipeline::error::{invalid_address, render, PipelineError, PipelineResult};
use crate::pipeline::stage::PipelineStage;

/// Finished run as handed back to callers.
#[derive(Debug)]
pub struct PipelineRun {
    pub run_id: Uuid,
    /// Terminal stage: `Succeeded` or `Failed(kind)`.
    pub stage: PipelineStage,
    pub result: PipelineResult,
}

impl PipelineRun {
    pub fn reply(&self) -> String {
        render(&self.result)
    }

    pub fn tx_hash(&self) -> Option<TxHash> {
        self.result.as_ref().ok().copied()
    }

    pub fn error(&self) -> Option<&PipelineError> {
        self.result.as_ref().err()
    }
}

/// Single-use state machine for one request.
pub struct TransactionPipeline<'a> {
    agent: &'a Agent,
    run_id: Uuid,
    stage: PipelineStage,
}

impl<'a> TransactionPipeline<'a> {
    pub fn new(agent: &'a Agent) -> Self {
        Self {
            agent,
            run_id: Uuid::new_v4(),
            stage: PipelineStage::Idle,
        }
    }

    /// Drive the request to a terminal stage.
    pub async fn run(mut self, user_text: &str) -> PipelineRun {
        let span = tracing::info_span!("pipeline", run_id = %self.run_id);
        let start = Instant::now();

        let result = self.execute(user_text).instrument(span.clone()).await;

        let _entered = span.enter();
        let outcome = match &result {
            Ok(hash) => {
                self.advance(PipelineStage::Succeeded);
                tracing::info!(tx_hash = %hash, "Transfer submitted");
                "succeeded"
            }
            Err(err) => {
                let kind = err.kind();
                self.advance(PipelineStage::Failed(kind));
                tracing::warn!(failure = kind.as_str(), error = %err, "Pipeline failed");
                kind.as_str()
            }
        };
        metrics::record_pipeline_run(outcome, start);

        PipelineRun {
            run_id: self.run_id,
            stage: self.stage,
            result,
        }
    }

    async fn execute(&mut self, user_text: &str) -> PipelineResult {
        let agent = self.agent;

        self.advance(PipelineStage::Extracting);
        let reply = agent.extractor.extract(user_text).await?;
        tracing::debug!(reply = %reply, "Model reply received");

        self.advance(PipelineStage::Parsing);
        let intent = parse(&reply)?;

        self.advance(PipelineStage::Validating);
        let recipient = address::validate(intent.recipient(), agent.checksum)
            .map_err(|e| invalid_address(intent.recipient(), e))?;

        self.advance(PipelineStage::Building);
        let unsigned = agent
            .builder
            .build(&intent, recipient, agent.wallet.address())
            .await?;

        self.advance(PipelineStage::Signing);
        let signed = agent.wallet.sign(&unsigned)?;

        self.advance(PipelineStage::Broadcasting);
        Ok(agent.broadcaster.broadcast(signed).await?)
    }

    fn advance(&mut self, next: PipelineStage) {
        debug_assert!(
            self.stage.can_advance_to(next),
            "illegal transition {:?} -> {:?}",
            self.stage,
            next
        );
        tracing::debug!(from = ?self.stage, stage = ?next, "Stage transition");
        self.stage = next;
    }
}
