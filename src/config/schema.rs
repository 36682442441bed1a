//! Configuration schema definitions.
//!
//! This module defines the non-secret configuration of the agent. All types
//! derive Serde traits for deserialization from config files. Secrets (the
//! signing key and model credential) never live here; see [`Secrets`].

use secrecy::SecretString;
use serde::{Deserialize, Serialize};

use crate::blockchain::address::ChecksumPolicy;
use crate::blockchain::transaction::DEFAULT_GAS_LIMIT;

/// Root configuration for the agent.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct AgentConfig {
    /// Ledger node and transaction settings.
    pub ledger: LedgerConfig,

    /// Language-model endpoint settings.
    pub model: ModelConfig,

    /// Recipient address checks.
    pub address: AddressConfig,

    /// HTTP chat server.
    pub server: ServerConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Ledger node configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LedgerConfig {
    /// JSON-RPC endpoint URL.
    pub rpc_url: String,

    /// Expected chain ID (295 mainnet, 296 testnet). When unset, the chain ID
    /// reported by the node is used.
    pub chain_id: Option<u64>,

    /// Address of the sending account. Must match the signing key.
    pub sender_address: String,

    /// RPC request timeout in seconds.
    pub rpc_timeout_secs: u64,

    /// Gas limit for every transfer.
    pub gas_limit: u64,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            rpc_url: "https://testnet.hashio.io/api".to_string(),
            chain_id: None,
            sender_address: String::new(),
            rpc_timeout_secs: 10,
            gas_limit: DEFAULT_GAS_LIMIT,
        }
    }
}

/// Language-model configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Chat-completions endpoint.
    pub api_url: String,

    /// Model name.
    pub model: String,

    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            api_url: "https://api.openai.com/v1/chat/completions".to_string(),
            model: "gpt-4".to_string(),
            timeout_secs: 60,
        }
    }
}

/// Recipient address checks.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct AddressConfig {
    /// `normalize` re-cases any input; `strict` requires a valid checksum on
    /// mixed-case input and refuses the zero address.
    pub checksum: ChecksumPolicy,
}

/// HTTP chat server configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address (e.g., "127.0.0.1:8080").
    pub bind_address: String,

    /// Request timeout in seconds; covers the whole pipeline run.
    pub request_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:8080".to_string(),
            request_timeout_secs: 120,
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Log output format.
    pub log_format: LogFormat,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9090".to_string(),
        }
    }
}

/// Secret material, read from the environment only.
#[derive(Debug, Clone)]
pub struct Secrets {
    /// Hex-encoded secp256k1 signing key.
    pub private_key: SecretString,

    /// Bearer credential for the model API.
    pub model_api_key: SecretString,
}
