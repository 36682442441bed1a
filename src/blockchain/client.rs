//! Blockchain RPC client with timeout and error handling.
//!
//! # Responsibilities
//! - Connect to the JSON-RPC endpoint and confirm the chain at startup
//! - Query account state (nonce) and network state (gas price, block number)
//! - Submit raw signed transactions
//! - Map timeouts, transport failures and node rejections onto `BlockchainError`
//!
//! Every call is a single attempt: submitting twice after an ambiguous
//! failure could spend the same nonce twice.

use alloy::primitives::{Address, TxHash};
use alloy::providers::{DynProvider, Provider, ProviderBuilder};
use alloy::transports::{TransportError, TransportResult};
use async_trait::async_trait;
use std::future::IntoFuture;
use std::time::{Duration, Instant};
use tokio::time::timeout;

use crate::blockchain::types::{
    BlockchainError, BlockchainResult, ChainId, LedgerConfig, LedgerNode,
};
use crate::observability::metrics;

const SEND_RAW_TRANSACTION: &str = "eth_sendRawTransaction";

/// JSON-RPC client for the configured ledger node.
#[derive(Clone)]
pub struct BlockchainClient {
    provider: DynProvider,
    rpc_url: String,
    chain_id: ChainId,
    /// Request timeout duration.
    timeout_duration: Duration,
}

impl BlockchainClient {
    /// Connect to the node and resolve its chain ID.
    ///
    /// Fails if the node is unreachable or reports a chain other than
    /// `config.chain_id` (when one is configured). Both are fatal at startup.
    pub async fn connect(config: &LedgerConfig) -> BlockchainResult<Self> {
        let url: url::Url = config.rpc_url.parse().map_err(|e| {
            BlockchainError::Rpc(format!("Invalid RPC URL '{}': {}", config.rpc_url, e))
        })?;
        let provider = ProviderBuilder::new().connect_http(url).erased();

        let mut client = Self {
            provider,
            rpc_url: config.rpc_url.clone(),
            chain_id: ChainId(0),
            timeout_duration: Duration::from_secs(config.rpc_timeout_secs),
        };

        let reported = client.get_chain_id().await?;
        if let Some(expected) = config.chain_id {
            if expected != reported.0 {
                return Err(BlockchainError::ChainMismatch {
                    expected,
                    actual: reported.0,
                });
            }
        }
        client.chain_id = reported;

        tracing::info!(
            rpc_url = %client.rpc_url,
            chain_id = reported.0,
            "Blockchain client initialized"
        );

        Ok(client)
    }

    /// Get the chain ID from the RPC.
    pub async fn get_chain_id(&self) -> BlockchainResult<ChainId> {
        self.call("eth_chainId", self.provider.get_chain_id())
            .await
            .map(ChainId)
    }

    /// The chain ID resolved at connect time.
    pub fn chain_id(&self) -> ChainId {
        self.chain_id
    }

    /// Issue one RPC call under the configured timeout and record its outcome.
    async fn call<T, F>(&self, method: &'static str, fut: F) -> BlockchainResult<T>
    where
        F: IntoFuture<Output = TransportResult<T>>,
    {
        let start = Instant::now();
        let result = match timeout(self.timeout_duration, fut).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(e)) => {
                let err = classify(method, &e);
                tracing::warn!(method, error = %err, "RPC call failed");
                Err(err)
            }
            Err(_) => {
                tracing::warn!(method, "RPC timeout");
                Err(BlockchainError::Timeout(self.timeout_duration.as_secs()))
            }
        };
        metrics::record_rpc_call(method, result.is_ok(), start);
        result
    }
}

#[async_trait]
impl LedgerNode for BlockchainClient {
    async fn transaction_count(&self, address: Address) -> BlockchainResult<u64> {
        self.call(
            "eth_getTransactionCount",
            self.provider.get_transaction_count(address),
        )
        .await
    }

    async fn gas_price(&self) -> BlockchainResult<u128> {
        self.call("eth_gasPrice", self.provider.get_gas_price())
            .await
    }

    async fn send_raw_transaction(&self, raw: &[u8]) -> BlockchainResult<TxHash> {
        let pending = self
            .call(SEND_RAW_TRANSACTION, self.provider.send_raw_transaction(raw))
            .await?;
        Ok(*pending.tx_hash())
    }

    async fn block_number(&self) -> BlockchainResult<u64> {
        self.call("eth_blockNumber", self.provider.get_block_number())
            .await
    }
}

impl std::fmt::Debug for BlockchainClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlockchainClient")
            .field("rpc_url", &self.rpc_url)
            .field("chain_id", &self.chain_id.0)
            .field("timeout_secs", &self.timeout_duration.as_secs())
            .finish()
    }
}

/// Turn a transport error into a `BlockchainError`.
///
/// JSON-RPC error responses keep the node's message verbatim; a refused
/// submission is a rejection rather than a transport failure.
fn classify(method: &str, err: &TransportError) -> BlockchainError {
    if let Some(payload) = err.as_error_resp() {
        let message = payload.message.to_string();
        if method == SEND_RAW_TRANSACTION {
            return BlockchainError::Rejected(message);
        }
        return BlockchainError::Rpc(message);
    }
    BlockchainError::Rpc(error_chain(err))
}

/// Render an error with its sources, so causes like "Connection refused"
/// survive the transport wrappers.
fn error_chain(err: &dyn std::error::Error) -> String {
    let mut rendered = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !rendered.contains(&text) {
            rendered.push_str(": ");
            rendered.push_str(&text);
        }
        source = cause.source();
    }
    rendered
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config(rpc_url: &str) -> LedgerConfig {
        LedgerConfig {
            rpc_url: rpc_url.to_string(),
            chain_id: Some(296),
            rpc_timeout_secs: 2,
            ..LedgerConfig::default()
        }
    }

    #[tokio::test]
    async fn test_connect_fails_when_node_unreachable() {
        // Port 1 is never listening locally.
        let result = BlockchainClient::connect(&test_config("http://127.0.0.1:1")).await;
        assert!(matches!(result, Err(BlockchainError::Rpc(_))));
    }

    #[tokio::test]
    async fn test_connect_rejects_malformed_url() {
        let err = BlockchainClient::connect(&test_config("not a url"))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Invalid RPC URL"));
    }

    #[test]
    fn test_error_chain_includes_sources() {
        #[derive(Debug)]
        struct Outer(std::io::Error);
        impl std::fmt::Display for Outer {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "error sending request")
            }
        }
        impl std::error::Error for Outer {
            fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
                Some(&self.0)
            }
        }

        let err = Outer(std::io::Error::new(
            std::io::ErrorKind::ConnectionRefused,
            "connection refused",
        ));
        assert_eq!(error_chain(&err), "error sending request: connection refused");
    }
}
