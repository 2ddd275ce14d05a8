//! Conversion between base units and whole-unit decimal strings

use alloy::primitives::utils::{ParseUnits, Unit};
use alloy_primitives::U256;
use std::str::FromStr;

use crate::error::{Result, SessionError};

/// Resolve a unit by name ("ether", "gwei", "wei", ...)
pub fn unit_from_name(name: &str) -> Result<Unit> {
    Unit::from_str(name).map_err(|e| SessionError::Units(format!("Unknown unit '{}': {}", name, e)))
}

/// Convert a base-unit amount into a whole-unit decimal string.
///
/// Trailing fractional zeros are dropped, so `10^18` wei in ether renders as
/// `"1"` and `5 * 10^17` as `"0.5"`.
pub fn from_base_units(value: U256, unit: Unit) -> String {
    let formatted = ParseUnits::U256(value).format_units(unit);
    trim_fraction(formatted)
}

/// Convert a whole-unit decimal string into base units
pub fn to_base_units(amount: &str, unit: Unit) -> Result<U256> {
    let amount = amount.trim();
    if amount.is_empty() {
        return Err(SessionError::InvalidAmount("amount is empty".to_string()));
    }
    if amount.starts_with('-') {
        return Err(SessionError::InvalidAmount(format!("negative amount: {}", amount)));
    }

    let parsed = ParseUnits::parse_units(amount, unit)
        .map_err(|e| SessionError::InvalidAmount(format!("{}: {}", amount, e)))?;
    Ok(parsed.get_absolute())
}

fn trim_fraction(formatted: String) -> String {
    if !formatted.contains('.') {
        return formatted;
    }
    let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');
    if trimmed.is_empty() {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whole_ether() {
        let wei = U256::from(10u64).pow(U256::from(18u64));
        assert_eq!(from_base_units(wei, Unit::ETHER), "1");
    }

    #[test]
    fn test_fractional_ether() {
        let wei = U256::from(1_500_000_000_000_000_000u128);
        assert_eq!(from_base_units(wei, Unit::ETHER), "1.5");

        let one_wei = U256::from(1u64);
        assert_eq!(from_base_units(one_wei, Unit::ETHER), "0.000000000000000001");
    }

    #[test]
    fn test_zero_value() {
        assert_eq!(from_base_units(U256::ZERO, Unit::ETHER), "0");
    }

    #[test]
    fn test_gwei_unit() {
        let wei = U256::from(2_500_000_000u64);
        assert_eq!(from_base_units(wei, Unit::GWEI), "2.5");
    }

    #[test]
    fn test_to_base_units() {
        assert_eq!(
            to_base_units("0.25", Unit::ETHER).unwrap(),
            U256::from(250_000_000_000_000_000u128)
        );
        assert_eq!(to_base_units(" 3 ", Unit::GWEI).unwrap(), U256::from(3_000_000_000u64));
    }

    #[test]
    fn test_to_base_units_rejects_bad_input() {
        assert!(matches!(to_base_units("", Unit::ETHER), Err(SessionError::InvalidAmount(_))));
        assert!(matches!(to_base_units("-1", Unit::ETHER), Err(SessionError::InvalidAmount(_))));
        assert!(matches!(to_base_units("abc", Unit::ETHER), Err(SessionError::InvalidAmount(_))));
    }

    #[test]
    fn test_unit_from_name() {
        assert_eq!(unit_from_name("ether").unwrap(), Unit::ETHER);
        assert_eq!(unit_from_name("gwei").unwrap(), Unit::GWEI);
        assert!(unit_from_name("florins").is_err());
    }
}
