//! Pipeline failure taxonomy and user-facing messages.

use alloy::primitives::TxHash;
use thiserror::Error;

use crate::blockchain::{AddressError, BlockchainError};
use crate::intent::{ExtractionError, ParseError};

/// Why a pipeline run stopped.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The model service could not be called.
    #[error("extraction failed: {0}")]
    ExtractionFailed(String),

    /// The model answered with the invalid-request sentinel.
    #[error("model declared the request invalid")]
    ModelDeclaredInvalid,

    /// The model's reply did not match the expected grammar.
    #[error("parse failed: {0}")]
    ParseFailed(String),

    /// The recipient failed structural or checksum validation.
    #[error("invalid address {address}: {reason}")]
    InvalidAddress { address: String, reason: String },

    /// The held key could not sign.
    #[error("signing failed: {0}")]
    SigningFailed(String),

    /// A node call failed or the node rejected the transaction.
    #[error("network error: {0}")]
    Network(String),
}

/// Coarse failure category, stable for logs, metrics and API clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    ExtractionFailed,
    ModelDeclaredInvalid,
    ParseFailed,
    InvalidAddress,
    SigningFailed,
    NetworkError,
}

impl FailureKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ExtractionFailed => "extraction_failed",
            Self::ModelDeclaredInvalid => "model_declared_invalid",
            Self::ParseFailed => "parse_failed",
            Self::InvalidAddress => "invalid_address",
            Self::SigningFailed => "signing_failed",
            Self::NetworkError => "network_error",
        }
    }
}

impl PipelineError {
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::ExtractionFailed(_) => FailureKind::ExtractionFailed,
            Self::ModelDeclaredInvalid => FailureKind::ModelDeclaredInvalid,
            Self::ParseFailed(_) => FailureKind::ParseFailed,
            Self::InvalidAddress { .. } => FailureKind::InvalidAddress,
            Self::SigningFailed(_) => FailureKind::SigningFailed,
            Self::Network(_) => FailureKind::NetworkError,
        }
    }

    /// The message shown to the user for this failure.
    pub fn user_message(&self) -> String {
        match self {
            Self::ExtractionFailed(detail) => {
                format!("Could not reach the language model: {}", detail)
            }
            Self::ModelDeclaredInvalid => "Sorry, I couldn't extract the amount and address. \
                 Please try again with a valid request."
                .to_string(),
            Self::ParseFailed(_) => "Error parsing transaction details.".to_string(),
            Self::InvalidAddress { address, reason } => {
                format!("Invalid recipient address {}: {}", address, reason)
            }
            Self::SigningFailed(detail) => format!("Could not sign the transaction: {}", detail),
            Self::Network(detail) => format!("Transaction failed: {}", detail),
        }
    }
}

impl From<ExtractionError> for PipelineError {
    fn from(err: ExtractionError) -> Self {
        Self::ExtractionFailed(err.to_string())
    }
}

impl From<ParseError> for PipelineError {
    fn from(err: ParseError) -> Self {
        match err {
            ParseError::ModelDeclaredInvalid => Self::ModelDeclaredInvalid,
            other => Self::ParseFailed(other.to_string()),
        }
    }
}

impl From<BlockchainError> for PipelineError {
    fn from(err: BlockchainError) -> Self {
        match err {
            BlockchainError::Wallet(detail) => Self::SigningFailed(detail),
            BlockchainError::Amount(e) => Self::ParseFailed(e.to_string()),
            other => Self::Network(other.detail()),
        }
    }
}

/// Attach the offending input to an address failure.
pub(crate) fn invalid_address(address: &str, err: AddressError) -> PipelineError {
    PipelineError::InvalidAddress {
        address: address.to_string(),
        reason: err.to_string(),
    }
}

/// Outcome of one pipeline run: the node's transaction hash or the failure.
pub type PipelineResult = Result<TxHash, PipelineError>;

/// Render a result as the status line returned to the user.
pub fn render(result: &PipelineResult) -> String {
    match result {
        Ok(hash) => format!("Transaction successful! Hash: {}", hash),
        Err(err) => err.user_message(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blockchain::units::UnitsError;

    #[test]
    fn test_each_kind_has_a_distinct_message() {
        let errors = [
            PipelineError::ExtractionFailed("timeout".into()),
            PipelineError::ModelDeclaredInvalid,
            PipelineError::ParseFailed("grammar".into()),
            PipelineError::InvalidAddress {
                address: "0x00".into(),
                reason: "too short".into(),
            },
            PipelineError::SigningFailed("bad key".into()),
            PipelineError::Network("connection refused".into()),
        ];
        let messages: std::collections::HashSet<String> =
            errors.iter().map(PipelineError::user_message).collect();
        assert_eq!(messages.len(), errors.len());
        let kinds: std::collections::HashSet<FailureKind> =
            errors.iter().map(PipelineError::kind).collect();
        assert_eq!(kinds.len(), errors.len());
    }

    #[test]
    fn test_network_message_carries_cause() {
        let err = PipelineError::from(BlockchainError::Rejected("insufficient funds".into()));
        assert_eq!(err.kind(), FailureKind::NetworkError);
        assert_eq!(err.user_message(), "Transaction failed: insufficient funds");
    }

    #[test]
    fn test_conversions() {
        assert_eq!(
            PipelineError::from(ParseError::ModelDeclaredInvalid).kind(),
            FailureKind::ModelDeclaredInvalid
        );
        assert_eq!(PipelineError::from(ParseError::Grammar).kind(), FailureKind::ParseFailed);
        assert_eq!(
            PipelineError::from(ExtractionError::EmptyResponse).kind(),
            FailureKind::ExtractionFailed
        );
        assert_eq!(
            PipelineError::from(BlockchainError::Wallet("x".into())).kind(),
            FailureKind::SigningFailed
        );
        assert_eq!(
            PipelineError::from(BlockchainError::Amount(UnitsError::NotPositive)).kind(),
            FailureKind::ParseFailed
        );
        assert_eq!(
            PipelineError::from(BlockchainError::Timeout(10)).kind(),
            FailureKind::NetworkError
        );
    }

    #[test]
    fn test_render_success() {
        let hash = TxHash::repeat_byte(0xab);
        let line = render(&Ok(hash));
        assert!(line.starts_with("Transaction successful! Hash: 0xabab"));
    }
}
