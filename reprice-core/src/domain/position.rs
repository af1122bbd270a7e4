use serde::{Deserialize, Serialize};

/// Current holding: share count and average buy price.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub shares: f64,
    pub avg_buy_price: f64,
}

impl Position {
    pub fn new(shares: f64, avg_buy_price: f64) -> Self {
        Self { shares, avg_buy_price }
    }

    /// Total paid for the held shares.
    pub fn cost_price(&self) -> f64 {
        self.shares * self.avg_buy_price
    }

    pub fn market_value(&self, current_price: f64) -> f64 {
        self.shares * current_price
    }

    pub fn unrealized_pnl(&self, current_price: f64) -> f64 {
        self.market_value(current_price) - self.cost_price()
    }
}
