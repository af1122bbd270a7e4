use serde::{Deserialize, Serialize};

/// Latest market price for the held stock.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MarketQuote {
    pub current_price: f64,
}

impl MarketQuote {
    pub fn new(current_price: f64) -> Self {
        Self { current_price }
    }
}
