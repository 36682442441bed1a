//! Recipient address normalization and EIP-55 checksum validation.
//!
//! Pure functions: no I/O, no logging.

use alloy::primitives::Address;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// How strictly the casing of an incoming address is checked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChecksumPolicy {
    /// Accept any casing and re-case to the checksum form.
    #[default]
    Normalize,
    /// Mixed-case input must already carry a valid checksum; the zero
    /// address is refused.
    Strict,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddressError {
    #[error("address must start with 0x")]
    MissingPrefix,

    #[error("address must have 40 hex digits, found {0}")]
    WrongLength(usize),

    #[error("address contains non-hex character '{0}'")]
    NonHex(char),

    #[error("address checksum does not match")]
    BadChecksum,

    #[error("zero address is not a valid recipient")]
    ZeroAddress,
}

/// Validate `raw` and return the address it names.
///
/// The address's `Display` / [`Address::to_checksum`] rendering is the
/// normalized EIP-55 form; validating that rendering again yields the same
/// string.
pub fn validate(raw: &str, policy: ChecksumPolicy) -> Result<Address, AddressError> {
    let digits = raw.strip_prefix("0x").ok_or(AddressError::MissingPrefix)?;
    if let Some(bad) = digits.chars().find(|c| !c.is_ascii_hexdigit()) {
        return Err(AddressError::NonHex(bad));
    }
    if digits.len() != 40 {
        return Err(AddressError::WrongLength(digits.len()));
    }

    let mixed_case = digits.chars().any(|c| c.is_ascii_uppercase())
        && digits.chars().any(|c| c.is_ascii_lowercase());
    let address = if policy == ChecksumPolicy::Strict && mixed_case {
        Address::parse_checksummed(raw, None).map_err(|_| AddressError::BadChecksum)?
    } else {
        Address::from_str(raw).map_err(|_| AddressError::WrongLength(digits.len()))?
    };

    // Re-verify the normalized form before handing it on.
    let checksummed = address.to_checksum(None);
    Address::parse_checksummed(&checksummed, None).map_err(|_| AddressError::BadChecksum)?;

    if policy == ChecksumPolicy::Strict && address.is_zero() {
        return Err(AddressError::ZeroAddress);
    }
    Ok(address)
}
