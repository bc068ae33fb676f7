//! Input validation: raw text fields to strictly positive decimals.
//!
//! The engine trusts its inputs, so everything entered by a user goes through
//! here first. Messages name the field the way a form would ("entry price is
//! required").

use std::str::FromStr;

use rust_decimal::Decimal;

use crate::error::ValidationError;
use crate::models::{OrderType, ScenarioKind, TriangleScenario};

/// Leverage multipliers offered by exchanges' leverage selectors.
pub const LEVERAGE_TIERS: [u32; 35] = [
    1, 2, 3, 5, 10, 15, 20, 25, 30, 35, 40, 45, 50, 60, 70, 75, 80, 90, 100, 125, 150, 175, 200,
    225, 250, 275, 300, 325, 350, 375, 400, 425, 450, 475, 500,
];

/// Parse a required field. Only plain unsigned decimals are accepted:
/// digits with at most one `.`, e.g. `42`, `0.5`, `.5` or `5.`.
pub fn parse_positive(field: &str, raw: &str) -> Result<Decimal, ValidationError> {
    if raw.is_empty() {
        return Err(ValidationError::Required(field.to_string()));
    }

    let invalid = || ValidationError::InvalidNumber(field.to_string());

    let mut dots = 0;
    let mut digits = 0;
    for c in raw.chars() {
        match c {
            '0'..='9' => digits += 1,
            '.' => dots += 1,
            _ => return Err(invalid()),
        }
    }
    if dots > 1 || digits == 0 {
        return Err(invalid());
    }

    let normalized = raw.trim_end_matches('.');
    let normalized = if normalized.starts_with('.') {
        format!("0{}", normalized)
    } else {
        normalized.to_string()
    };
    // Too many significant digits for a Decimal
    let value = Decimal::from_str(&normalized).map_err(|_| invalid())?;

    if value <= Decimal::ZERO {
        return Err(ValidationError::NotPositive(field.to_string()));
    }
    Ok(value)
}

/// Parse a field that may be absent; absence counts as empty.
pub fn require(field: &str, raw: Option<&str>) -> Result<Decimal, ValidationError> {
    parse_positive(field, raw.unwrap_or_default())
}

/// Parse a leverage value, accepting an `x` suffix (`10x`). When `strict` is
/// set the value must be one of `tiers`.
pub fn parse_leverage(raw: &str, tiers: &[u32], strict: bool) -> Result<Decimal, ValidationError> {
    let trimmed = raw.strip_suffix(['x', 'X']).unwrap_or(raw);
    let leverage = parse_positive("leverage", trimmed)?;
    check_leverage(leverage, tiers, strict)?;
    Ok(leverage)
}

/// Check an already-parsed leverage, e.g. a configured default.
pub fn check_leverage(leverage: Decimal, tiers: &[u32], strict: bool) -> Result<(), ValidationError> {
    if leverage <= Decimal::ZERO {
        return Err(ValidationError::NotPositive("leverage".to_string()));
    }
    if strict && !tiers.iter().any(|&tier| Decimal::from(tier) == leverage) {
        return Err(ValidationError::UnsupportedLeverage(leverage));
    }
    Ok(())
}

pub fn parse_order_type(raw: &str) -> Result<OrderType, ValidationError> {
    OrderType::from_str(raw)
}

/// Build the known pair for a triangle scenario. Fields the scenario does
/// not use are ignored.
pub fn triangle_scenario(
    kind: ScenarioKind,
    dca_amount: Option<&str>,
    current_price: Option<&str>,
    target_entry: Option<&str>,
) -> Result<TriangleScenario, ValidationError> {
    let scenario = match kind {
        ScenarioKind::RequiredPrice => TriangleScenario::RequiredPrice {
            dca_amount: require("dca amount", dca_amount)?,
            target_entry: require("target entry", target_entry)?,
        },
        ScenarioKind::RequiredAmount => TriangleScenario::RequiredAmount {
            current_price: require("current price", current_price)?,
            target_entry: require("target entry", target_entry)?,
        },
        ScenarioKind::ResultingEntry => TriangleScenario::ResultingEntry {
            current_price: require("current price", current_price)?,
            dca_amount: require("dca amount", dca_amount)?,
        },
    };
    Ok(scenario)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_positive_accepts_plain_decimals() {
        assert_eq!(parse_positive("entry price", "100"), Ok(dec!(100)));
        assert_eq!(parse_positive("entry price", "0.5"), Ok(dec!(0.5)));
        assert_eq!(parse_positive("entry price", ".5"), Ok(dec!(0.5)));
        assert_eq!(parse_positive("entry price", "5."), Ok(dec!(5)));
        assert_eq!(parse_positive("entry price", "64250.125"), Ok(dec!(64250.125)));
    }

    #[test]
    fn test_parse_positive_messages() {
        let err = parse_positive("entry price", "").unwrap_err();
        assert_eq!(err.to_string(), "entry price is required");

        for raw in ["abc", "-5", "1e3", " 5", "1.2.3", ".", "+1"] {
            let err = parse_positive("stop loss", raw).unwrap_err();
            assert_eq!(err.to_string(), "stop loss must be a valid number", "input {:?}", raw);
        }

        let err = parse_positive("position size", "0.000").unwrap_err();
        assert_eq!(err.to_string(), "position size must be greater than 0");
    }

    #[test]
    fn test_parse_positive_rejects_overlong_numbers() {
        let raw = "9".repeat(40);
        assert_eq!(
            parse_positive("dca amount", &raw),
            Err(ValidationError::InvalidNumber("dca amount".to_string()))
        );
    }

    #[test]
    fn test_require_missing_field() {
        assert_eq!(
            require("target entry", None),
            Err(ValidationError::Required("target entry".to_string()))
        );
    }

    #[test]
    fn test_parse_leverage() {
        assert_eq!(parse_leverage("10x", &LEVERAGE_TIERS, true), Ok(dec!(10)));
        assert_eq!(parse_leverage("125", &LEVERAGE_TIERS, true), Ok(dec!(125)));
        assert_eq!(
            parse_leverage("7", &LEVERAGE_TIERS, true),
            Err(ValidationError::UnsupportedLeverage(dec!(7)))
        );
        assert_eq!(parse_leverage("7.5", &LEVERAGE_TIERS, false), Ok(dec!(7.5)));
        assert!(parse_leverage("0", &LEVERAGE_TIERS, false).is_err());
    }

    #[test]
    fn test_check_leverage() {
        assert_eq!(check_leverage(dec!(20), &LEVERAGE_TIERS, true), Ok(()));
        assert_eq!(check_leverage(dec!(7.5), &LEVERAGE_TIERS, false), Ok(()));
        assert_eq!(
            check_leverage(dec!(-5), &LEVERAGE_TIERS, false),
            Err(ValidationError::NotPositive("leverage".to_string()))
        );
        assert_eq!(
            check_leverage(Decimal::ZERO, &LEVERAGE_TIERS, false),
            Err(ValidationError::NotPositive("leverage".to_string()))
        );
        assert_eq!(
            check_leverage(dec!(7), &LEVERAGE_TIERS, true),
            Err(ValidationError::UnsupportedLeverage(dec!(7)))
        );
    }

    #[test]
    fn test_triangle_scenario_requires_its_pair() {
        let scenario = triangle_scenario(ScenarioKind::ResultingEntry, Some("500"), Some("90"), None).unwrap();
        assert_eq!(
            scenario,
            TriangleScenario::ResultingEntry {
                current_price: dec!(90),
                dca_amount: dec!(500),
            }
        );

        let err = triangle_scenario(ScenarioKind::RequiredPrice, Some("500"), Some("90"), None).unwrap_err();
        assert_eq!(err.to_string(), "target entry is required");
    }
}
