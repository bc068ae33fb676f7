//! DCA triangle: {DCA amount, DCA price, resulting average entry}, any one
//! solved from the other two plus the original position.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::CalcError;
use crate::format::{round_money, usd};

/// Which side of the triangle is unknown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScenarioKind {
    /// Scenario 1: solve the price at which to DCA
    RequiredPrice,
    /// Scenario 2: solve how much to DCA
    RequiredAmount,
    /// Scenario 3: solve the resulting average entry
    ResultingEntry,
}

impl ScenarioKind {
    pub const ALL: [ScenarioKind; 3] = [
        ScenarioKind::RequiredPrice,
        ScenarioKind::RequiredAmount,
        ScenarioKind::ResultingEntry,
    ];

    /// Numeric selector used by callers (1, 2 or 3).
    pub fn tag(&self) -> u8 {
        match self {
            ScenarioKind::RequiredPrice => 1,
            ScenarioKind::RequiredAmount => 2,
            ScenarioKind::ResultingEntry => 3,
        }
    }

    pub fn describe(&self) -> &'static str {
        match self {
            ScenarioKind::RequiredPrice => "known DCA amount and target entry, solve DCA price",
            ScenarioKind::RequiredAmount => "known current price and target entry, solve DCA amount",
            ScenarioKind::ResultingEntry => "known current price and DCA amount, solve average entry",
        }
    }
}

impl TryFrom<u8> for ScenarioKind {
    type Error = CalcError;

    fn try_from(tag: u8) -> Result<Self, Self::Error> {
        match tag {
            1 => Ok(Self::RequiredPrice),
            2 => Ok(Self::RequiredAmount),
            3 => Ok(Self::ResultingEntry),
            other => Err(CalcError::UnknownScenario(other)),
        }
    }
}

/// The known pair for each scenario.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "scenario", rename_all = "snake_case")]
pub enum TriangleScenario {
    RequiredPrice {
        dca_amount: Decimal,
        target_entry: Decimal,
    },
    RequiredAmount {
        current_price: Decimal,
        target_entry: Decimal,
    },
    ResultingEntry {
        current_price: Decimal,
        dca_amount: Decimal,
    },
}

impl TriangleScenario {
    pub fn kind(&self) -> ScenarioKind {
        match self {
            TriangleScenario::RequiredPrice { .. } => ScenarioKind::RequiredPrice,
            TriangleScenario::RequiredAmount { .. } => ScenarioKind::RequiredAmount,
            TriangleScenario::ResultingEntry { .. } => ScenarioKind::ResultingEntry,
        }
    }
}

/// Original position plus the known pair of the chosen scenario.
#[derive(Debug, Clone, Serialize)]
pub struct TriangleInput {
    pub entry_price: Decimal,
    pub leverage: Decimal,
    pub position_size: Decimal,
    pub scenario: TriangleScenario,
}

/// The solved side, echoing the known pair it was solved from.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "solved", rename_all = "snake_case")]
pub enum TriangleSolution {
    RequiredPrice {
        required_price: Decimal,
        dca_amount: Decimal,
        target_entry: Decimal,
    },
    RequiredAmount {
        required_amount: Decimal,
        current_price: Decimal,
        target_entry: Decimal,
    },
    ResultingEntry {
        resulting_entry: Decimal,
        current_price: Decimal,
        dca_amount: Decimal,
    },
}

/// Triangle result. `leveraged_position` is exactly `total_investment * leverage`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TriangleResult {
    #[serde(flatten)]
    pub solution: TriangleSolution,

    /// Real money invested: original margin plus the (given or solved) DCA amount
    pub total_investment: Decimal,

    pub leveraged_position: Decimal,
}

impl TriangleResult {
    pub fn scenario(&self) -> ScenarioKind {
        match self.solution {
            TriangleSolution::RequiredPrice { .. } => ScenarioKind::RequiredPrice,
            TriangleSolution::RequiredAmount { .. } => ScenarioKind::RequiredAmount,
            TriangleSolution::ResultingEntry { .. } => ScenarioKind::ResultingEntry,
        }
    }

    pub fn rounded(&self) -> Self {
        let solution = match self.solution {
            TriangleSolution::RequiredPrice {
                required_price,
                dca_amount,
                target_entry,
            } => TriangleSolution::RequiredPrice {
                required_price: round_money(required_price),
                dca_amount: round_money(dca_amount),
                target_entry: round_money(target_entry),
            },
            TriangleSolution::RequiredAmount {
                required_amount,
                current_price,
                target_entry,
            } => TriangleSolution::RequiredAmount {
                required_amount: round_money(required_amount),
                current_price: round_money(current_price),
                target_entry: round_money(target_entry),
            },
            TriangleSolution::ResultingEntry {
                resulting_entry,
                current_price,
                dca_amount,
            } => TriangleSolution::ResultingEntry {
                resulting_entry: round_money(resulting_entry),
                current_price: round_money(current_price),
                dca_amount: round_money(dca_amount),
            },
        };

        Self {
            solution,
            total_investment: round_money(self.total_investment),
            leveraged_position: round_money(self.leveraged_position),
        }
    }
}

impl std::fmt::Display for TriangleResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "\n{:=^50}", " DCA TRIANGLE RESULTS ")?;
        writeln!(f, "Scenario {}: {}", self.scenario().tag(), self.scenario().describe())?;
        writeln!(f)?;

        match self.solution {
            TriangleSolution::RequiredPrice {
                required_price,
                dca_amount,
                ..
            } => {
                writeln!(f, "Required DCA Price:      {}", usd(required_price))?;
                writeln!(f, "  Enter at this price to reach target")?;
                writeln!(f, "DCA Amount:              {}", usd(dca_amount))?;
                writeln!(f, "  Additional investment")?;
            }
            TriangleSolution::RequiredAmount {
                required_amount,
                current_price,
                ..
            } => {
                writeln!(f, "Required DCA Amount:     {}", usd(required_amount))?;
                writeln!(f, "  Invest this amount to reach target")?;
                writeln!(f, "Current Price:           {}", usd(current_price))?;
            }
            TriangleSolution::ResultingEntry {
                resulting_entry,
                dca_amount,
                ..
            } => {
                writeln!(f, "Resulting Average Entry: {}", usd(resulting_entry))?;
                writeln!(f, "  Your new average entry price")?;
                writeln!(f, "DCA Amount:              {}", usd(dca_amount))?;
                writeln!(f, "  Additional investment")?;
            }
        }

        writeln!(f, "Total Investment:        {}", usd(self.total_investment))?;
        writeln!(f, "  Real money invested")?;
        writeln!(f, "Leveraged Position:      {}", usd(self.leveraged_position))?;
        writeln!(f, "  Total position size with leverage")?;
        write!(f, "{:=^50}", "")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_scenario_tags() {
        for kind in ScenarioKind::ALL {
            assert_eq!(ScenarioKind::try_from(kind.tag()), Ok(kind));
        }
        assert_eq!(ScenarioKind::try_from(0), Err(CalcError::UnknownScenario(0)));
        assert_eq!(ScenarioKind::try_from(4), Err(CalcError::UnknownScenario(4)));
    }

    #[test]
    fn test_scenario_kind_matches_variant() {
        let scenario = TriangleScenario::RequiredAmount {
            current_price: dec!(80),
            target_entry: dec!(90),
        };
        assert_eq!(scenario.kind(), ScenarioKind::RequiredAmount);
    }

    #[test]
    fn test_result_serializes_flat() {
        let result = TriangleResult {
            solution: TriangleSolution::ResultingEntry {
                resulting_entry: dec!(96.4285714),
                current_price: dec!(90),
                dca_amount: dec!(500),
            },
            total_investment: dec!(1500),
            leveraged_position: dec!(15000),
        }
        .rounded();

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["solved"], "resulting_entry");
        assert_eq!(json["resulting_entry"], "96.43");
        assert_eq!(json["leveraged_position"], "15000.00");
    }
}
