//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize)
//!     → environment overrides (RPC_URL, MY_ADDRESS, ...)
//!     → validation.rs (semantic checks)
//!     → AgentConfig (validated, immutable)
//!
//! environment (.env honoured)
//!     → loader.rs (PRIVATE_KEY, OPENAI_API_KEY)
//!     → Secrets (redacted in Debug, never serialized)
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded and passed explicitly, never global
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, load_secrets, ConfigError};
pub use schema::{
    AddressConfig, AgentConfig, LedgerConfig, LogFormat, ModelConfig, ObservabilityConfig,
    Secrets, ServerConfig,
};
