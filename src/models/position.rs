//! Leveraged position inputs and the risk metrics derived from them.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::format::{ratio_text, round_money, usd};

/// Direction of a leveraged position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderType {
    Long,
    Short,
}

impl OrderType {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderType::Long => "long",
            OrderType::Short => "short",
        }
    }
}

impl FromStr for OrderType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "long" => Ok(Self::Long),
            "short" => Ok(Self::Short),
            _ => Err(ValidationError::InvalidOrderType(s.to_string())),
        }
    }
}

impl std::fmt::Display for OrderType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Inputs for the position metrics calculator. All prices and sizes are > 0.
#[derive(Debug, Clone, Serialize)]
pub struct PositionInput {
    /// Price at which the position was opened
    pub entry_price: Decimal,

    /// Leverage multiplier applied to the margin
    pub leverage: Decimal,

    /// Margin in USD (real money, before leverage)
    pub position_size: Decimal,

    pub order_type: OrderType,

    /// Price at which the position is closed to limit losses
    pub stop_loss: Decimal,

    /// Price at which the position is closed to secure profits
    pub take_profit: Decimal,
}

/// Risk metrics for a single leveraged position, at full precision.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PositionMetrics {
    pub order_type: OrderType,

    /// Notional exposure: margin times leverage
    pub total_position_size: Decimal,

    /// Price at which the margin is fully consumed
    pub liquidation_price: Decimal,

    /// P&L in USD if the take profit is hit
    pub potential_profit: Decimal,

    /// Loss in USD if the stop loss is hit (positive when the stop is on the losing side)
    pub potential_loss: Decimal,

    /// Potential profit divided by potential loss
    pub risk_reward_ratio: Decimal,

    /// Whether the displayed ratio meets the 1:2 convention
    pub is_favorable: bool,
}

impl PositionMetrics {
    /// Ratio as shown to the user, e.g. `1:2.00`.
    pub fn risk_reward_text(&self) -> String {
        ratio_text(self.risk_reward_ratio)
    }

    /// Advisory note for the ratio. Informational only.
    pub fn advisory(&self) -> &'static str {
        if self.is_favorable {
            "Good risk/reward ratio"
        } else {
            "Consider adjusting your take profit or stop loss"
        }
    }

    /// Copy with every amount rounded for output.
    pub fn rounded(&self) -> Self {
        Self {
            order_type: self.order_type,
            total_position_size: round_money(self.total_position_size),
            liquidation_price: round_money(self.liquidation_price),
            potential_profit: round_money(self.potential_profit),
            potential_loss: round_money(self.potential_loss),
            risk_reward_ratio: round_money(self.risk_reward_ratio),
            is_favorable: self.is_favorable,
        }
    }
}

impl std::fmt::Display for PositionMetrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "\n{:=^50}", " POSITION METRICS ")?;
        writeln!(f, "Order Type:          {}", self.order_type)?;
        writeln!(f, "Total Position Size: {}", usd(self.total_position_size))?;
        writeln!(f, "Liquidation Price:   {}", usd(self.liquidation_price))?;
        writeln!(f)?;
        writeln!(f, "Potential Profit:    {}", usd(self.potential_profit))?;
        writeln!(f, "Potential Loss:      {}", usd(self.potential_loss))?;
        writeln!(f, "Risk/Reward Ratio:   {}", self.risk_reward_text())?;
        writeln!(f, "  {}", self.advisory())?;
        write!(f, "{:=^50}", "")
    }
}
