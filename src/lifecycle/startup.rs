//! Startup orchestration.
//!
//! # Order
//! 1. Connect to the ledger node and confirm its chain ID
//! 2. Load the signing key into a wallet bound to that chain
//! 3. Check the configured sender against the key's address
//! 4. Build the model client
//! 5. Assemble the shared `Agent`
//!
//! Any failure here is fatal: the process must not accept requests with a
//! half-initialized agent.

use secrecy::ExposeSecret;
use std::sync::Arc;
use thiserror::Error;

use crate::blockchain::address::{self, ChecksumPolicy};
use crate::blockchain::{BlockchainClient, BlockchainError, Wallet};
use crate::config::{AgentConfig, Secrets};
use crate::intent::{ExtractionError, LlmClient};
use crate::pipeline::{Agent, AgentOptions};

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid sender address '{address}': {reason}")]
    InvalidSender { address: String, reason: String },

    #[error("ledger node: {0}")]
    Blockchain(#[from] BlockchainError),

    #[error("signing key: {0}")]
    Wallet(String),

    #[error("model client: {0}")]
    Model(#[from] ExtractionError),

    #[error("configured sender {configured} does not match signing key address {derived}")]
    SenderMismatch { configured: String, derived: String },
}

/// Build a ready `Agent` from validated configuration and secrets.
pub async fn bootstrap(config: &AgentConfig, secrets: &Secrets) -> Result<Agent, StartupError> {
    let client = BlockchainClient::connect(&config.ledger).await?;
    let chain_id = client.chain_id();

    let wallet = Wallet::from_private_key(secrets.private_key.expose_secret(), chain_id.0)
        .map_err(|e| StartupError::Wallet(e.detail()))?;

    let sender = config.ledger.sender_address.trim();
    let configured = address::validate(sender, ChecksumPolicy::Normalize)
        .map_err(|e| StartupError::InvalidSender {
            address: sender.to_string(),
            reason: e.to_string(),
        })?;
    if configured != wallet.address() {
        return Err(StartupError::SenderMismatch {
            configured: configured.to_checksum(None),
            derived: wallet.address().to_checksum(None),
        });
    }

    let extractor = LlmClient::new(&config.model, secrets.model_api_key.clone())?;

    tracing::info!(
        sender = %wallet.address(),
        chain_id = chain_id.0,
        model = %config.model.model,
        checksum = ?config.address.checksum,
        "Agent ready"
    );

    Ok(Agent::new(
        Arc::new(extractor),
        Arc::new(client),
        wallet,
        AgentOptions {
            gas_limit: config.ledger.gas_limit,
            checksum: config.address.checksum,
        },
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::SecretString;

    #[tokio::test]
    async fn test_unreachable_node_is_fatal() {
        let mut config = AgentConfig::default();
        config.ledger.rpc_url = "http://127.0.0.1:1".to_string();
        config.ledger.rpc_timeout_secs = 2;
        config.ledger.sender_address = "0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266".to_string();
        let secrets = Secrets {
            private_key: SecretString::from(
                "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80".to_string(),
            ),
            model_api_key: SecretString::from("sk-test".to_string()),
        };

        let err = bootstrap(&config, &secrets).await.unwrap_err();
        assert!(matches!(err, StartupError::Blockchain(_)));
    }
}
