//! Configuration loading from disk and environment.

use secrecy::SecretString;
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::config::schema::{AgentConfig, Secrets};
use crate::config::validation::{validate_config, ValidationError};

/// Environment variable holding the signing key.
pub const PRIVATE_KEY_ENV_VAR: &str = "PRIVATE_KEY";
/// Environment variable holding the model API credential.
pub const MODEL_API_KEY_ENV_VAR: &str = "OPENAI_API_KEY";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Environment variable {0} not set")]
    MissingEnv(&'static str),

    #[error("Environment variable {name} is invalid: {reason}")]
    InvalidEnv { name: &'static str, reason: String },

    #[error("Validation failed: {}", join(.0))]
    Validation(Vec<ValidationError>),
}

fn join(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load configuration from an optional TOML file, apply process environment
/// overrides, then validate.
pub fn load_config(path: Option<&Path>) -> Result<AgentConfig, ConfigError> {
    load_config_with(path, |name| std::env::var(name).ok())
}

/// [`load_config`] with an explicit environment lookup.
pub fn load_config_with<F>(path: Option<&Path>, env: F) -> Result<AgentConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = match path {
        Some(path) => {
            let content = fs::read_to_string(path)?;
            toml::from_str(&content)?
        }
        None => AgentConfig::default(),
    };

    apply_env_overrides(&mut config, env)?;
    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Overlay environment variables onto `config`.
///
/// | Variable      | Field                   |
/// |---------------|-------------------------|
/// | `RPC_URL`     | `ledger.rpc_url`        |
/// | `MY_ADDRESS`  | `ledger.sender_address` |
/// | `CHAIN_ID`    | `ledger.chain_id`       |
/// | `LLM_API_URL` | `model.api_url`         |
/// | `LLM_MODEL`   | `model.model`           |
pub fn apply_env_overrides<F>(config: &mut AgentConfig, env: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(url) = env("RPC_URL") {
        config.ledger.rpc_url = url;
    }
    if let Some(address) = env("MY_ADDRESS") {
        config.ledger.sender_address = address;
    }
    if let Some(chain_id) = env("CHAIN_ID") {
        let parsed = chain_id.trim().parse().map_err(|e: std::num::ParseIntError| {
            ConfigError::InvalidEnv {
                name: "CHAIN_ID",
                reason: e.to_string(),
            }
        })?;
        config.ledger.chain_id = Some(parsed);
    }
    if let Some(url) = env("LLM_API_URL") {
        config.model.api_url = url;
    }
    if let Some(model) = env("LLM_MODEL") {
        config.model.model = model;
    }
    Ok(())
}

/// Read the signing key and model credential from the process environment.
pub fn load_secrets() -> Result<Secrets, ConfigError> {
    load_secrets_with(|name| std::env::var(name).ok())
}

/// [`load_secrets`] with an explicit environment lookup.
pub fn load_secrets_with<F>(env: F) -> Result<Secrets, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let required = |name: &'static str| {
        env(name)
            .filter(|value| !value.trim().is_empty())
            .map(SecretString::from)
            .ok_or(ConfigError::MissingEnv(name))
    };

    Ok(Secrets {
        private_key: required(PRIVATE_KEY_ENV_VAR)?,
        model_api_key: required(MODEL_API_KEY_ENV_VAR)?,
    })
}
