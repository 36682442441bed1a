//! Wallet management and transaction signing.
//!
//! # Security
//! - The private key is handed over once at startup and never logged or
//!   serialized
//! - Signing is local and deterministic (RFC 6979 nonces)

use alloy::consensus::{SignableTransaction, TxEnvelope, TxLegacy};
use alloy::eips::eip2718::Encodable2718;
use alloy::primitives::{keccak256, Address, Bytes, TxKind};
use alloy::signers::local::PrivateKeySigner;
use alloy::signers::SignerSync;

use crate::blockchain::transaction::{SignedTransaction, UnsignedTransaction};
use crate::blockchain::types::{BlockchainError, BlockchainResult};

/// Signing wallet bound to one chain.
#[derive(Debug, Clone)]
pub struct Wallet {
    /// The underlying signer (private key).
    signer: PrivateKeySigner,
    /// Chain ID for EIP-155 replay protection.
    chain_id: u64,
}

impl Wallet {
    /// Create a wallet from a hex-encoded private key string.
    ///
    /// # Arguments
    /// * `private_key_hex` - Hex string (with or without 0x prefix)
    /// * `chain_id` - Chain ID for transaction signing
    pub fn from_private_key(private_key_hex: &str, chain_id: u64) -> BlockchainResult<Self> {
        let key_hex = private_key_hex
            .trim()
            .strip_prefix("0x")
            .unwrap_or(private_key_hex.trim());

        let signer: PrivateKeySigner = key_hex
            .parse()
            .map_err(|e| BlockchainError::Wallet(format!("Invalid private key format: {}", e)))?;

        tracing::info!(
            address = %signer.address(),
            chain_id = chain_id,
            "Wallet initialized"
        );

        Ok(Self { signer, chain_id })
    }

    /// Get the wallet's address.
    pub fn address(&self) -> Address {
        self.signer.address()
    }

    /// Get the chain ID this wallet is configured for.
    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }

    /// Sign a transfer as an EIP-155 legacy transaction.
    pub fn sign(&self, tx: &UnsignedTransaction) -> BlockchainResult<SignedTransaction> {
        let legacy = TxLegacy {
            chain_id: Some(self.chain_id),
            nonce: tx.nonce,
            gas_price: tx.gas_price,
            gas_limit: tx.gas_limit,
            to: TxKind::Call(tx.to),
            value: tx.value,
            input: Bytes::new(),
        };

        let signature = self
            .signer
            .sign_hash_sync(&legacy.signature_hash())
            .map_err(|e| BlockchainError::Wallet(format!("Signing failed: {}", e)))?;

        let raw: Bytes = TxEnvelope::from(legacy.into_signed(signature))
            .encoded_2718()
            .into();
        let hash = keccak256(&raw);

        tracing::debug!(tx_hash = %hash, nonce = tx.nonce, "Transaction signed");
        Ok(SignedTransaction { raw, hash })
    }
}
