//! Calculator configuration.

use std::path::Path;

use anyhow::{Context, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculator::FAVORABLE_RISK_REWARD;
use crate::format::{MONEY_DP, QUANTITY_DP};
use crate::models::OrderType;
use crate::error::ValidationError;
use crate::validation::{check_leverage, LEVERAGE_TIERS};

/// Settings for the command-line front end. The engine itself takes no
/// configuration; these only shape how inputs are accepted and results shown.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CalculatorConfig {
    /// Leverage multipliers accepted when `strict_leverage` is set
    pub leverage_tiers: Vec<u32>,

    /// Reject leverage values outside `leverage_tiers`
    pub strict_leverage: bool,

    /// Leverage used when none is given
    pub default_leverage: Decimal,

    /// Order type used when none is given
    pub default_order_type: OrderType,

    /// Print results as JSON instead of text cards
    pub json_output: bool,
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            leverage_tiers: LEVERAGE_TIERS.to_vec(),
            strict_leverage: false,
            default_leverage: Decimal::ONE,
            default_order_type: OrderType::Long,
            json_output: false,
        }
    }
}

impl CalculatorConfig {
    /// Load from a JSON file. Keys left out keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_json(&raw)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// The default leverage must pass the same checks as a leverage typed on
    /// the command line. Re-run after CLI flags change `strict_leverage`.
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_leverage(self.default_leverage, &self.leverage_tiers, self.strict_leverage)
    }
}

impl std::fmt::Display for CalculatorConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "\n=== Calculator Configuration ===\n")?;
        writeln!(f, "Inputs:")?;
        writeln!(f, "  Default Leverage:     {}x", self.default_leverage)?;
        writeln!(f, "  Default Order Type:   {}", self.default_order_type)?;
        writeln!(f, "  Strict Leverage:      {}", self.strict_leverage)?;
        writeln!(f, "  Leverage Tiers:       {}", self.leverage_tiers.len())?;

        writeln!(f, "\nOutput:")?;
        writeln!(f, "  Format:               {}", if self.json_output { "json" } else { "text" })?;
        writeln!(f, "  Money Precision:      {} dp", MONEY_DP)?;
        writeln!(f, "  Contract Precision:   {} dp", QUANTITY_DP)?;

        writeln!(f, "\nRisk/Reward:")?;
        write!(f, "  Favorable At:         1:{}", FAVORABLE_RISK_REWARD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = CalculatorConfig::default();
        assert_eq!(config.leverage_tiers.first(), Some(&1));
        assert_eq!(config.leverage_tiers.last(), Some(&500));
        assert_eq!(config.default_leverage, Decimal::ONE);
        assert!(!config.strict_leverage);
    }

    #[test]
    fn test_config_round_trips_through_json() {
        let config = CalculatorConfig {
            strict_leverage: true,
            default_order_type: OrderType::Short,
            ..Default::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        let back = CalculatorConfig::from_json(&json).unwrap();

        assert!(back.strict_leverage);
        assert_eq!(back.default_order_type, OrderType::Short);
        assert_eq!(back.leverage_tiers, config.leverage_tiers);
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config = CalculatorConfig::from_json(r#"{"default_leverage": "10", "leverage_tiers": [1, 10, 20]}"#).unwrap();

        assert_eq!(config.default_leverage, Decimal::from(10));
        assert_eq!(config.leverage_tiers, vec![1, 10, 20]);
        assert_eq!(config.default_order_type, OrderType::Long);
        assert!(!config.json_output);
    }

    #[test]
    fn test_malformed_config_is_an_error() {
        assert!(CalculatorConfig::from_json("{\"strict_leverage\": \"maybe\"}").is_err());
    }

    #[test]
    fn test_negative_default_leverage_is_rejected() {
        let err = CalculatorConfig::from_json(r#"{"default_leverage": "-5"}"#).unwrap_err();
        assert_eq!(err.to_string(), "leverage must be greater than 0");

        assert!(CalculatorConfig::from_json(r#"{"default_leverage": "0"}"#).is_err());
    }

    #[test]
    fn test_strict_default_leverage_must_be_a_tier() {
        let err = CalculatorConfig::from_json(r#"{"default_leverage": "7", "strict_leverage": true}"#).unwrap_err();
        assert_eq!(err.to_string(), "leverage must be one of the supported tiers, got 7x");

        // Accepted while lenient, rejected once strict mode is switched on later
        let mut config = CalculatorConfig::from_json(r#"{"default_leverage": "7"}"#).unwrap();
        assert_eq!(config.validate(), Ok(()));
        config.strict_leverage = true;
        assert_eq!(
            config.validate(),
            Err(ValidationError::UnsupportedLeverage(Decimal::from(7)))
        );
    }
}
