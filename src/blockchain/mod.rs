//! Blockchain integration subsystem.
//!
//! # Data Flow
//! ```text
//! raw recipient  → address.rs (EIP-55 normalization)
//! amount         → units.rs (exact 18-decimal scaling)
//!     → transaction.rs (nonce + gas price from the node, unsigned transfer)
//!     → wallet.rs (EIP-155 signing with the held key)
//!     → broadcast.rs (eth_sendRawTransaction, single attempt)
//!
//! client.rs is the JSON-RPC implementation of `LedgerNode` used by the
//! builder and broadcaster.
//! ```
//!
//! # Security Constraints
//! - The private key arrives once, from the environment, at startup
//! - Never log private keys or sensitive data
//! - All RPC calls have configurable timeouts

pub mod address;
pub mod broadcast;
pub mod client;
pub mod transaction;
pub mod types;
pub mod units;
pub mod wallet;

pub use address::{AddressError, ChecksumPolicy};
pub use broadcast::TransactionBroadcaster;
pub use client::BlockchainClient;
pub use transaction::{SignedTransaction, TransactionBuilder, UnsignedTransaction};
pub use types::{BlockchainError, BlockchainResult, ChainId, LedgerNode};
pub use wallet::Wallet;
