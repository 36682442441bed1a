//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate URLs, addresses and value ranges
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: AgentConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;
use thiserror::Error;

use crate::blockchain::address::{self, ChecksumPolicy};
use crate::config::schema::AgentConfig;

/// Smallest gas limit that covers a plain transfer.
const MIN_GAS_LIMIT: u64 = 21_000;

/// Node calls in one run: nonce, gas price, submission.
const RPC_CALLS_PER_RUN: u64 = 3;

/// A single semantic problem with the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field}: '{value}' is not an http(s) URL")]
    InvalidUrl { field: &'static str, value: String },

    #[error("ledger.sender_address is required (set it or MY_ADDRESS)")]
    MissingSender,

    #[error("ledger.sender_address: {0}")]
    InvalidSender(String),

    #[error("ledger.gas_limit must be at least 21000, got {0}")]
    GasLimitTooLow(u64),

    #[error("{0} must be greater than zero")]
    ZeroTimeout(&'static str),

    #[error(
        "server.request_timeout_secs must exceed {minimum} \
         (model.timeout_secs plus three ledger.rpc_timeout_secs), got {actual}"
    )]
    RequestTimeoutTooShort { actual: u64, minimum: u64 },

    #[error("{field}: '{value}' is not a socket address")]
    InvalidBindAddress { field: &'static str, value: String },
}

/// Check `config` and report every problem found.
pub fn validate_config(config: &AgentConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    check_url("ledger.rpc_url", &config.ledger.rpc_url, &mut errors);
    check_url("model.api_url", &config.model.api_url, &mut errors);

    let sender = config.ledger.sender_address.trim();
    if sender.is_empty() {
        errors.push(ValidationError::MissingSender);
    } else if let Err(e) = address::validate(sender, ChecksumPolicy::Normalize) {
        errors.push(ValidationError::InvalidSender(e.to_string()));
    }

    if config.ledger.gas_limit < MIN_GAS_LIMIT {
        errors.push(ValidationError::GasLimitTooLow(config.ledger.gas_limit));
    }

    let timeouts = [
        ("ledger.rpc_timeout_secs", config.ledger.rpc_timeout_secs),
        ("model.timeout_secs", config.model.timeout_secs),
        ("server.request_timeout_secs", config.server.request_timeout_secs),
    ];
    for (field, secs) in timeouts {
        if secs == 0 {
            errors.push(ValidationError::ZeroTimeout(field));
        }
    }

    // A run makes one model call and three node calls; the HTTP deadline
    // must outlast all of them so it never fires after a broadcast.
    let minimum = config
        .model
        .timeout_secs
        .saturating_add(config.ledger.rpc_timeout_secs.saturating_mul(RPC_CALLS_PER_RUN));
    if config.server.request_timeout_secs <= minimum {
        errors.push(ValidationError::RequestTimeoutTooShort {
            actual: config.server.request_timeout_secs,
            minimum,
        });
    }

    check_socket("server.bind_address", &config.server.bind_address, &mut errors);
    if config.observability.metrics_enabled {
        check_socket(
            "observability.metrics_address",
            &config.observability.metrics_address,
            &mut errors,
        );
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_url(field: &'static str, value: &str, errors: &mut Vec<ValidationError>) {
    let ok = url::Url::parse(value)
        .map(|u| matches!(u.scheme(), "http" | "https"))
        .unwrap_or(false);
    if !ok {
        errors.push(ValidationError::InvalidUrl {
            field,
            value: value.to_string(),
        });
    }
}

fn check_socket(field: &'static str, value: &str, errors: &mut Vec<ValidationError>) {
    if value.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress {
            field,
            value: value.to_string(),
        });
    }
}
