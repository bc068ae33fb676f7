//! Dollar-cost averaging: averaging into a position and solving for a target entry.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::format::{pct, round_money, round_quantity, usd};

/// Inputs for averaging into an open position at the current price.
#[derive(Debug, Clone, Serialize)]
pub struct DcaInput {
    pub entry_price: Decimal,
    pub leverage: Decimal,

    /// Original margin in USD
    pub position_size: Decimal,

    /// Market price at which the DCA order fills
    pub current_price: Decimal,

    /// Additional margin in USD
    pub dca_amount: Decimal,
}

/// Outcome of a DCA order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DcaResult {
    pub original_investment: Decimal,
    pub dca_investment: Decimal,

    /// Real money invested (original + DCA)
    pub total_investment: Decimal,

    pub original_contract_qty: Decimal,
    pub dca_contract_qty: Decimal,
    pub total_contract_qty: Decimal,

    /// Contract-weighted average entry after the DCA fill
    pub new_average_entry: Decimal,

    /// De-leveraged mark-to-market value at the current price
    pub current_value: Decimal,

    pub unrealized_pnl: Decimal,
    pub roi_percentage: Decimal,

    /// Percent move from the current price needed to reach the new average entry
    pub breakeven_price_change: Decimal,

    /// Total position size with leverage
    pub leveraged_position: Decimal,
}

impl DcaResult {
    pub fn is_profitable(&self) -> bool {
        self.unrealized_pnl >= Decimal::ZERO
    }

    /// Copy with amounts at 2 dp and contract quantities at 4 dp.
    pub fn rounded(&self) -> Self {
        Self {
            original_investment: round_money(self.original_investment),
            dca_investment: round_money(self.dca_investment),
            total_investment: round_money(self.total_investment),
            original_contract_qty: round_quantity(self.original_contract_qty),
            dca_contract_qty: round_quantity(self.dca_contract_qty),
            total_contract_qty: round_quantity(self.total_contract_qty),
            new_average_entry: round_money(self.new_average_entry),
            current_value: round_money(self.current_value),
            unrealized_pnl: round_money(self.unrealized_pnl),
            roi_percentage: round_money(self.roi_percentage),
            breakeven_price_change: round_money(self.breakeven_price_change),
            leveraged_position: round_money(self.leveraged_position),
        }
    }
}

impl std::fmt::Display for DcaResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "\n{:=^50}", " DCA RESULTS ")?;
        writeln!(f, "Real Money Invested: {}", usd(self.total_investment))?;
        writeln!(
            f,
            "  Initial: {} | DCA: {}",
            usd(self.original_investment),
            usd(self.dca_investment)
        )?;
        writeln!(f, "Current Value:       {}", usd(self.current_value))?;
        writeln!(
            f,
            "  With {} contracts",
            round_quantity(self.total_contract_qty)
        )?;
        writeln!(
            f,
            "Real Money P/L:      {} ({})",
            usd(self.unrealized_pnl),
            if self.is_profitable() { "profit" } else { "loss" }
        )?;
        writeln!(f, "  ROI: {}", pct(self.roi_percentage))?;
        writeln!(f, "New Average Entry:   {}", usd(self.new_average_entry))?;
        writeln!(
            f,
            "  Need {} to breakeven",
            pct(self.breakeven_price_change)
        )?;
        writeln!(f, "Leveraged Position:  {}", usd(self.leveraged_position))?;
        write!(f, "{:=^50}", "")
    }
}

/// Inputs for solving the DCA amount that reaches a target average entry.
#[derive(Debug, Clone, Serialize)]
pub struct TargetEntryInput {
    pub entry_price: Decimal,
    pub leverage: Decimal,
    pub position_size: Decimal,
    pub current_price: Decimal,

    /// Desired average entry after the DCA
    pub target_entry: Decimal,
}

/// Solved DCA requirement for a target entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TargetDcaResult {
    /// Additional margin in USD. Negative when the target is already overshot.
    pub dca_amount_needed: Decimal,
    pub new_total_investment: Decimal,
    pub new_position_size: Decimal,
    pub target_entry: Decimal,

    /// DCA amount as a percentage of the original investment
    pub percentage_increase: Decimal,
}

impl TargetDcaResult {
    /// A negative solved amount means no DCA is needed to reach the target.
    pub fn is_target_overshot(&self) -> bool {
        self.dca_amount_needed < Decimal::ZERO
    }

    pub fn rounded(&self) -> Self {
        Self {
            dca_amount_needed: round_money(self.dca_amount_needed),
            new_total_investment: round_money(self.new_total_investment),
            new_position_size: round_money(self.new_position_size),
            target_entry: round_money(self.target_entry),
            percentage_increase: round_money(self.percentage_increase),
        }
    }
}

impl std::fmt::Display for TargetDcaResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "\n{:=^50}", " TARGET ENTRY RESULTS ")?;
        writeln!(f, "Required DCA Amount:  {}", usd(self.dca_amount_needed))?;
        writeln!(
            f,
            "  {} of original investment",
            pct(self.percentage_increase)
        )?;
        if self.is_target_overshot() {
            writeln!(f, "  Target already overshot, no DCA needed")?;
        }
        writeln!(f, "Target Average Entry: {}", usd(self.target_entry))?;
        writeln!(f, "New Total Investment: {}", usd(self.new_total_investment))?;
        writeln!(f, "New Position Size:    {}", usd(self.new_position_size))?;
        write!(f, "{:=^50}", "")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_target_overshot_flag() {
        let result = TargetDcaResult {
            dca_amount_needed: dec!(-72.727272),
            new_total_investment: dec!(927.272728),
            new_position_size: dec!(9272.72728),
            target_entry: dec!(110),
            percentage_increase: dec!(-7.2727272),
        };

        assert!(result.is_target_overshot());
        assert_eq!(result.rounded().dca_amount_needed.to_string(), "-72.73");
        assert!(result.to_string().contains("Target already overshot"));
    }

    #[test]
    fn test_dca_card_shows_contracts_at_four_places() {
        let result = DcaResult {
            original_investment: dec!(1000),
            dca_investment: dec!(1000),
            total_investment: dec!(2000),
            original_contract_qty: dec!(100),
            dca_contract_qty: dec!(125),
            total_contract_qty: dec!(225),
            new_average_entry: dec!(88.888888),
            current_value: dec!(1800),
            unrealized_pnl: dec!(-200),
            roi_percentage: dec!(-10),
            breakeven_price_change: dec!(11.111111),
            leveraged_position: dec!(20000),
        };

        let card = result.to_string();
        assert!(card.contains("With 225.0000 contracts"));
        assert!(card.contains("Need 11.11% to breakeven"));
        assert!(!result.is_profitable());
    }
}
