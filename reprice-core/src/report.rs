//! Adapter boundary between the arithmetic and whatever displays it.
//!
//! `evaluate` runs the position summary and the selected repricing direction
//! and renders every display field as text. Fields that a failed or
//! empty calculation leaves untouched are `None`.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::CalculatorConfig;
use crate::domain::{CalculationMode, CalculatorInputs, PlannedPurchase};
use crate::format::{format_currency_with, format_number, format_shares, format_signed_currency};
use crate::input::{InputError, RawInputs};
use crate::pnl::{PnlClass, PositionSummary};
use crate::reprice::{forward_average, solve_required_shares, ForwardResult, RepriceError, TargetSolution};

/// Numeric outcome of the selected repricing direction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum Repricing {
    Shares(ForwardResult),
    Price(TargetSolution),
}

/// Run the repricing direction selected by `purchase`.
pub fn reprice_purchase(
    inputs: &CalculatorInputs,
    purchase: PlannedPurchase,
) -> Result<Repricing, RepriceError> {
    let pos = inputs.position;
    let price = inputs.quote.current_price;
    match purchase {
        PlannedPurchase::Shares { new_shares } => Ok(Repricing::Shares(forward_average(
            pos.shares,
            pos.avg_buy_price,
            new_shares,
            price,
        ))),
        PlannedPurchase::TargetAverage { target_average } => solve_required_shares(
            pos.shares,
            pos.avg_buy_price,
            price,
            target_average,
        )
        .map(Repricing::Price),
    }
}

/// Rendered display fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub mode: CalculationMode,
    pub stock: String,
    pub cost_price: String,
    pub current_value: String,
    pub pl: String,
    pub pl_class: PnlClass,
    pub summary_pl: String,
    pub calculated_shares: String,
    pub new_cost: String,
    pub total_cost: Option<String>,
    pub total_shares: Option<String>,
    /// Market value of the holding once the purchase is made.
    pub value_after_purchase: Option<String>,
    pub pl_after_purchase: Option<String>,
    pub new_avg: Option<String>,
    pub summary_new_avg: Option<String>,
    pub break_even_price: Option<String>,
    pub error: Option<String>,
}

const NOT_AVAILABLE: &str = "N/A";

pub fn evaluate(inputs: &CalculatorInputs, mode: CalculationMode, config: &CalculatorConfig) -> Report {
    let symbol = config.display.currency_symbol.as_str();
    let summary = PositionSummary::new(&inputs.position, &inputs.quote);
    let outcome = reprice_purchase(inputs, inputs.purchase(mode));

    let mut report = Report {
        mode,
        stock: inputs.stock_label().to_string(),
        cost_price: format_number(summary.cost_price),
        current_value: format_number(summary.current_value),
        pl: format_number(summary.pl),
        pl_class: summary.class(),
        summary_pl: format_signed_currency(summary.pl, symbol),
        calculated_shares: NOT_AVAILABLE.into(),
        new_cost: NOT_AVAILABLE.into(),
        total_cost: None,
        total_shares: None,
        value_after_purchase: None,
        pl_after_purchase: None,
        new_avg: None,
        summary_new_avg: None,
        break_even_price: None,
        error: None,
    };

    match outcome {
        Ok(Repricing::Shares(r)) => {
            report.calculated_shares = format_shares(r.new_shares);
            report.new_cost = format_number(r.new_cost);
            report.total_cost = Some(format_number(r.total_cost));
            report.total_shares = Some(format_shares(r.total_shares));
            report.set_after_purchase(r.value_after_purchase, r.pl_after_purchase);
            if let Some(avg) = r.new_average {
                report.set_average(avg, symbol);
            }
        }
        Ok(Repricing::Price(s)) => {
            report.calculated_shares = format_shares(s.required_shares);
            report.new_cost = format_number(s.new_cost);
            report.total_cost = Some(format_number(s.total_cost));
            report.total_shares = Some(format_shares(s.total_shares));
            report.set_after_purchase(s.value_after_purchase, s.pl_after_purchase);
            report.set_average(s.actual_new_average, symbol);
        }
        Err(err) => {
            debug!(%err, "repricing failed");
            report.error = Some(err.to_string());
        }
    }
    report
}

/// Parse raw text fields with the configured policy, then evaluate.
pub fn evaluate_raw(
    raw: &RawInputs,
    mode: CalculationMode,
    config: &CalculatorConfig,
) -> Result<Report, InputError> {
    let inputs = raw.parse(config.input.policy)?;
    Ok(evaluate(&inputs, mode, config))
}

impl Report {
    fn set_average(&mut self, avg: f64, symbol: &str) {
        self.new_avg = Some(format_number(avg));
        self.summary_new_avg = Some(format_currency_with(avg, symbol));
        self.break_even_price = Some(format_currency_with(avg, symbol));
    }

    fn set_after_purchase(&mut self, value: f64, pl: f64) {
        self.value_after_purchase = Some(format_number(value));
        self.pl_after_purchase = Some(format_number(pl));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{MarketQuote, Position};
    use crate::input::InputPolicy;

    fn inputs(shares: f64, avg: f64, price: f64) -> CalculatorInputs {
        CalculatorInputs {
            stock: Some("AAPL".into()),
            position: Position::new(shares, avg),
            quote: MarketQuote::new(price),
            new_shares: 100.0,
            target_average: 50.0,
        }
    }

    #[test]
    fn shares_mode_renders_forward_result() {
        let r = evaluate(&inputs(100.0, 60.0, 40.0), CalculationMode::Shares, &CalculatorConfig::default());
        assert_eq!(r.stock, "AAPL");
        assert_eq!(r.cost_price, "6,000.00");
        assert_eq!(r.current_value, "4,000.00");
        assert_eq!(r.pl, "-2,000.00");
        assert_eq!(r.pl_class, PnlClass::Loss);
        assert_eq!(r.summary_pl, "-$2,000.00");
        assert_eq!(r.calculated_shares, "100");
        assert_eq!(r.new_cost, "4,000.00");
        assert_eq!(r.total_cost.as_deref(), Some("10,000.00"));
        assert_eq!(r.total_shares.as_deref(), Some("200"));
        assert_eq!(r.value_after_purchase.as_deref(), Some("8,000.00"));
        assert_eq!(r.pl_after_purchase.as_deref(), Some("-2,000.00"));
        assert_eq!(r.new_avg.as_deref(), Some("50.00"));
        assert_eq!(r.summary_new_avg.as_deref(), Some("$50.00"));
        assert_eq!(r.break_even_price.as_deref(), Some("$50.00"));
        assert_eq!(r.error, None);
    }

    #[test]
    fn shares_mode_without_shares_leaves_average_blank() {
        let mut i = inputs(0.0, 0.0, 40.0);
        i.new_shares = 0.0;
        let r = evaluate(&i, CalculationMode::Shares, &CalculatorConfig::default());
        assert_eq!(r.total_shares.as_deref(), Some("0"));
        assert_eq!(r.new_avg, None);
        assert_eq!(r.break_even_price, None);
    }

    #[test]
    fn price_mode_renders_solution() {
        let r = evaluate(&inputs(100.0, 60.0, 40.0), CalculationMode::Price, &CalculatorConfig::default());
        assert_eq!(r.calculated_shares, "100");
        assert_eq!(r.new_cost, "4,000.00");
        assert_eq!(r.total_cost.as_deref(), Some("10,000.00"));
        assert_eq!(r.total_shares.as_deref(), Some("200"));
        assert_eq!(r.value_after_purchase.as_deref(), Some("8,000.00"));
        assert_eq!(r.pl_after_purchase.as_deref(), Some("-2,000.00"));
        assert_eq!(r.new_avg.as_deref(), Some("50.00"));
        assert_eq!(r.error, None);
    }

    #[test]
    fn price_mode_pass_through_echoes_target() {
        let r = evaluate(&inputs(0.0, 60.0, 40.0), CalculationMode::Price, &CalculatorConfig::default());
        assert_eq!(r.calculated_shares, "0");
        assert_eq!(r.new_cost, "0.00");
        assert_eq!(r.total_cost.as_deref(), Some("0.00"));
        assert_eq!(r.total_shares.as_deref(), Some("0"));
        assert_eq!(r.value_after_purchase.as_deref(), Some("0.00"));
        assert_eq!(r.new_avg.as_deref(), Some("50.00"));
        assert_eq!(r.summary_new_avg.as_deref(), Some("$50.00"));
        assert_eq!(r.error, None);
    }

    #[test]
    fn price_mode_error_marks_fields_unavailable() {
        let r = evaluate(&inputs(100.0, 40.0, 50.0), CalculationMode::Price, &CalculatorConfig::default());
        assert_eq!(r.calculated_shares, "N/A");
        assert_eq!(r.new_cost, "N/A");
        assert_eq!(r.total_cost, None);
        assert_eq!(r.value_after_purchase, None);
        assert_eq!(r.pl_after_purchase, None);
        assert_eq!(r.new_avg, None);
        assert_eq!(
            r.error.as_deref(),
            Some("Target average price cannot equal current price ($50.00).")
        );
        // Position summary is still rendered.
        assert_eq!(r.pl, "1,000.00");
        assert_eq!(r.summary_pl, "+$1,000.00");
    }

    #[test]
    fn currency_symbol_comes_from_config() {
        let mut config = CalculatorConfig::default();
        config.display.currency_symbol = "€".into();
        let r = evaluate(&inputs(100.0, 60.0, 40.0), CalculationMode::Shares, &config);
        assert_eq!(r.summary_pl, "-€2,000.00");
        assert_eq!(r.break_even_price.as_deref(), Some("€50.00"));
    }

    #[test]
    fn evaluate_raw_applies_policy() {
        let raw = RawInputs {
            stock: None,
            shares: "-1".into(),
            avg_buy_price: "10".into(),
            current_price: "9".into(),
            new_shares: "5".into(),
            target_average: "".into(),
        };
        let mut config = CalculatorConfig::default();
        let r = evaluate_raw(&raw, CalculationMode::Shares, &config).unwrap();
        assert_eq!(r.stock, "-");
        assert_eq!(r.total_shares.as_deref(), Some("4"));

        config.input.policy = InputPolicy::Strict;
        assert!(evaluate_raw(&raw, CalculationMode::Shares, &config).is_err());
    }
}
