//! Strict parsing of the extractor's reply.
//!
//! The model only extracts; this parser decides what is well-formed. A reply
//! that deviates from the grammar in any way is refused rather than repaired,
//! so injected or hallucinated text never reaches the transaction builder.

use regex::Regex;
use rust_decimal::Decimal;
use std::sync::LazyLock;

use crate::intent::extractor::INVALID_REQUEST_SENTINEL;
use crate::intent::types::{ParseError, TransactionIntent};

static REPLY_GRAMMAR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^Amount: (\d+(?:\.\d+)?) HBAR, Address: (0x[0-9a-fA-F]{40})$")
        .expect("reply grammar is a valid regex")
});

/// Parse `Amount: <decimal> HBAR, Address: <0x + 40 hex>` into an intent.
///
/// The sentinel check runs first; surrounding whitespace is ignored, anything
/// else around the grammar is not.
///
/// Amounts must fit a 96-bit decimal mantissa: with all 18 fractional digits
/// in use, the integer part is capped near 79.2 billion. Larger amounts are
/// refused as [`ParseError::Amount`], never rounded.
pub fn parse(model_output: &str) -> Result<TransactionIntent, ParseError> {
    if model_output.contains(INVALID_REQUEST_SENTINEL) {
        return Err(ParseError::ModelDeclaredInvalid);
    }

    let captures = REPLY_GRAMMAR
        .captures(model_output.trim())
        .ok_or(ParseError::Grammar)?;
    let amount_text = &captures[1];
    let amount = Decimal::from_str_exact(amount_text)
        .map_err(|_| ParseError::Amount(amount_text.to_string()))?;

    TransactionIntent::new(amount, captures[2].to_string())
}
