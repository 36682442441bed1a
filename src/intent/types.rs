//! Structured transfer intent and parse failures.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::blockchain::units::{to_minor_units, UnitsError};

/// Why a model reply could not become a [`TransactionIntent`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The model answered with the invalid-request sentinel.
    #[error("model declared the request invalid")]
    ModelDeclaredInvalid,

    /// The reply does not follow `Amount: <amount> HBAR, Address: <address>`.
    #[error("reply does not match the expected format")]
    Grammar,

    #[error("amount '{0}' is not a representable decimal")]
    Amount(String),

    #[error(transparent)]
    Units(#[from] UnitsError),

    #[error("recipient '{0}' is not 0x followed by 40 hex digits")]
    Recipient(String),
}

/// A transfer request extracted from user text.
///
/// Construction enforces the invariants: the amount is positive with at most
/// 18 fractional digits, and the recipient is `0x` plus 40 hex digits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionIntent {
    amount: Decimal,
    recipient: String,
}

impl TransactionIntent {
    pub fn new(amount: Decimal, recipient: String) -> Result<Self, ParseError> {
        to_minor_units(amount)?;

        let well_formed = recipient
            .strip_prefix("0x")
            .is_some_and(|hex| hex.len() == 40 && hex.chars().all(|c| c.is_ascii_hexdigit()));
        if !well_formed {
            return Err(ParseError::Recipient(recipient));
        }

        Ok(Self { amount, recipient })
    }

    /// Amount in major units (HBAR).
    pub fn amount(&self) -> Decimal {
        self.amount
    }

    /// Recipient exactly as the model wrote it.
    pub fn recipient(&self) -> &str {
        &self.recipient
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RECIPIENT: &str = "0x472e78859dcd440bfa657062b4eb666a0d97cafa";

    #[test]
    fn test_new_accepts_valid_intent() {
        let intent = TransactionIntent::new(Decimal::new(505, 1), RECIPIENT.into()).unwrap();
        assert_eq!(intent.amount(), Decimal::new(505, 1));
        assert_eq!(intent.recipient(), RECIPIENT);
    }

    #[test]
    fn test_new_rejects_zero_amount() {
        let err = TransactionIntent::new(Decimal::ZERO, RECIPIENT.into()).unwrap_err();
        assert_eq!(err, ParseError::Units(UnitsError::NotPositive));
    }

    #[test]
    fn test_new_rejects_malformed_recipient() {
        for bad in ["0x1234", "472e78859dcd440bfa657062b4eb666a0d97cafa", "0xzz2e78859dcd440bfa657062b4eb666a0d97cafa"] {
            let err = TransactionIntent::new(Decimal::ONE, bad.into()).unwrap_err();
            assert_eq!(err, ParseError::Recipient(bad.to_string()));
        }
    }
}
