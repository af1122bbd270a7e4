use serde::{Deserialize, Serialize};

use super::{CalculationMode, MarketQuote, PlannedPurchase, Position};

/// Every numeric field the calculator reads, already parsed.
///
/// Both purchase fields are carried so that switching modes re-evaluates the
/// same inputs; `purchase()` picks the one the mode needs.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CalculatorInputs {
    pub stock: Option<String>,
    pub position: Position,
    pub quote: MarketQuote,
    pub new_shares: f64,
    pub target_average: f64,
}

impl CalculatorInputs {
    pub fn purchase(&self, mode: CalculationMode) -> PlannedPurchase {
        match mode {
            CalculationMode::Shares => PlannedPurchase::Shares {
                new_shares: self.new_shares,
            },
            CalculationMode::Price => PlannedPurchase::TargetAverage {
                target_average: self.target_average,
            },
        }
    }

    /// Stock label for display, `-` when blank.
    pub fn stock_label(&self) -> &str {
        match self.stock.as_deref().map(str::trim) {
            Some(s) if !s.is_empty() => s,
            _ => "-",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn purchase_follows_mode() {
        let inputs = CalculatorInputs {
            new_shares: 25.0,
            target_average: 48.0,
            ..Default::default()
        };
        assert_eq!(
            inputs.purchase(CalculationMode::Shares),
            PlannedPurchase::Shares { new_shares: 25.0 }
        );
        assert_eq!(
            inputs.purchase(CalculationMode::Price),
            PlannedPurchase::TargetAverage { target_average: 48.0 }
        );
    }

    #[test]
    fn blank_stock_renders_dash() {
        let mut inputs = CalculatorInputs::default();
        assert_eq!(inputs.stock_label(), "-");
        inputs.stock = Some("   ".into());
        assert_eq!(inputs.stock_label(), "-");
        inputs.stock = Some("AAPL".into());
        assert_eq!(inputs.stock_label(), "AAPL");
    }
}
