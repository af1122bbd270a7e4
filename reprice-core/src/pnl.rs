//! Unrealized P&L of the current holding.

use serde::{Deserialize, Serialize};

use crate::domain::{MarketQuote, Position};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PnlClass {
    Loss,
    Profit,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PositionSummary {
    pub cost_price: f64,
    pub current_value: f64,
    pub pl: f64,
}

impl PositionSummary {
    pub fn new(position: &Position, quote: &MarketQuote) -> Self {
        Self {
            cost_price: position.cost_price(),
            current_value: position.market_value(quote.current_price),
            pl: position.unrealized_pnl(quote.current_price),
        }
    }

    pub fn is_loss(&self) -> bool {
        self.pl < 0.0
    }

    /// Break-even is classed as profit.
    pub fn class(&self) -> PnlClass {
        if self.is_loss() {
            PnlClass::Loss
        } else {
            PnlClass::Profit
        }
    }
}
