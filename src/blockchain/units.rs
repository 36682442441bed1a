//! Exact conversion between display amounts and minor units.
//!
//! HBAR on the JSON-RPC relay uses 18 decimals, like ether. Amounts are
//! scaled as integers: `mantissa * 10^(18 - scale)`. No floating point is
//! involved at any step.
//!
//! Amounts arrive as `rust_decimal::Decimal`, whose mantissa is 96 bits. An
//! amount that uses all 18 fractional digits is therefore limited to about
//! 79.2 billion in its integer part; larger values must carry fewer
//! fractional digits. Such input fails to parse before reaching this module.

use alloy::primitives::U256;
use rust_decimal::Decimal;
use thiserror::Error;

/// Decimal exponent between the major display unit and minor units.
pub const NATIVE_DECIMALS: u32 = 18;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UnitsError {
    #[error("amount must be greater than zero")]
    NotPositive,

    #[error("amount has {0} fractional digits, at most 18 are supported")]
    TooPrecise(u32),
}

/// Convert a positive amount of major units into minor units.
///
/// Trailing fractional zeros carry no precision and are dropped before the
/// 18-digit check.
pub fn to_minor_units(amount: Decimal) -> Result<U256, UnitsError> {
    if amount <= Decimal::ZERO {
        return Err(UnitsError::NotPositive);
    }
    let amount = amount.normalize();
    let scale = amount.scale();
    if scale > NATIVE_DECIMALS {
        return Err(UnitsError::TooPrecise(scale));
    }

    // Positive, so the mantissa fits in u128.
    let mantissa = U256::from(amount.mantissa().unsigned_abs());
    let factor = U256::from(10u64).pow(U256::from(NATIVE_DECIMALS - scale));
    Ok(mantissa * factor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str_exact(s).unwrap()
    }

    #[test]
    fn test_whole_amount() {
        let expected = U256::from(50u64) * U256::from(10u64).pow(U256::from(18u64));
        assert_eq!(to_minor_units(dec("50")).unwrap(), expected);
    }

    #[test]
    fn test_smallest_unit() {
        assert_eq!(to_minor_units(dec("0.000000000000000001")).unwrap(), U256::from(1u64));
    }

    #[test]
    fn test_fractional_amounts_are_exact() {
        assert_eq!(
            to_minor_units(dec("1.5")).unwrap(),
            U256::from(1_500_000_000_000_000_000u128)
        );
        // 0.1 is not representable in binary floating point.
        assert_eq!(
            to_minor_units(dec("0.1")).unwrap(),
            U256::from(100_000_000_000_000_000u128)
        );
        assert_eq!(
            to_minor_units(dec("2.50")).unwrap(),
            U256::from(2_500_000_000_000_000_000u128)
        );
    }

    #[test]
    fn test_full_precision_amount() {
        let minor = to_minor_units(dec("123456789.123456789123456789")).unwrap();
        assert_eq!(
            minor,
            U256::from_str("123456789123456789123456789").unwrap()
        );
    }

    #[test]
    fn test_rejects_zero_and_negative() {
        assert_eq!(to_minor_units(dec("0")), Err(UnitsError::NotPositive));
        assert_eq!(to_minor_units(dec("0.000")), Err(UnitsError::NotPositive));
        assert_eq!(to_minor_units(dec("-1")), Err(UnitsError::NotPositive));
    }

    #[test]
    fn test_trailing_zeros_do_not_count_as_precision() {
        let one = U256::from(10u64).pow(U256::from(18u64));
        assert_eq!(to_minor_units(dec("1.0000000000000000000")).unwrap(), one);
        assert_eq!(
            to_minor_units(dec("0.1000000000000000000000")).unwrap(),
            U256::from(100_000_000_000_000_000u128)
        );
    }

    #[test]
    fn test_rejects_sub_minor_precision() {
        assert_eq!(
            to_minor_units(dec("0.0000000000000000001")),
            Err(UnitsError::TooPrecise(19))
        );
    }
}
