//! Repricing arithmetic: forward average and target-average solver.
//!
//! Both directions work from the same identity:
//!
//! ```text
//! average = (shares * avg_buy_price + new_shares * current_price) / (shares + new_shares)
//! ```
//!
//! Forward mode evaluates it for a given `new_shares`. Target mode fixes
//! `average` and solves for `new_shares`:
//!
//! ```text
//! new_shares = (target * shares - cost_price) / (current_price - target)
//! ```
//!
//! then rounds up to whole shares and re-evaluates, so the reported average is
//! the one the rounded purchase actually produces.
//!
//! Both results also mark the enlarged holding to market:
//! `value_after_purchase = total_shares * current_price` and
//! `pl_after_purchase = value_after_purchase - total_cost`.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::format::format_number;

/// Result of buying a fixed number of extra shares.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForwardResult {
    pub new_shares: f64,
    pub new_cost: f64,
    pub total_shares: f64,
    pub total_cost: f64,
    /// `None` when the combined holding has no shares.
    pub new_average: Option<f64>,
    pub value_after_purchase: f64,
    pub pl_after_purchase: f64,
}

/// Whole-share purchase that brings the average to (or just past) a target.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TargetSolution {
    pub required_shares: f64,
    pub new_cost: f64,
    pub total_shares: f64,
    pub total_cost: f64,
    pub actual_new_average: f64,
    /// The average that was asked for.
    pub target_average: f64,
    pub value_after_purchase: f64,
    pub pl_after_purchase: f64,
}

impl TargetSolution {
    /// How far the rounded purchase lands from the requested target.
    pub fn target_drift(&self) -> f64 {
        self.actual_new_average - self.target_average
    }

    /// True when no purchase is needed or inputs were not usable.
    pub fn is_no_purchase(&self) -> bool {
        self.required_shares == 0.0
    }
}

#[derive(Debug, Clone, Copy, Error, PartialEq)]
pub enum RepriceError {
    #[error("Target average price cannot equal current price ({}).", dollars(.current_price))]
    TargetEqualsCurrentPrice { current_price: f64 },

    #[error(
        "Cannot achieve target average of {} by buying more shares. Your target is already higher than what you can achieve by averaging down.",
        dollars(.target_average)
    )]
    TargetUnreachable { target_average: f64 },
}

fn dollars(value: &f64) -> String {
    format!("${}", format_number(*value))
}

/// New average after buying `new_shares` at `current_price`.
pub fn forward_average(
    shares: f64,
    avg_buy_price: f64,
    new_shares: f64,
    current_price: f64,
) -> ForwardResult {
    let cost_price = shares * avg_buy_price;
    let new_cost = new_shares * current_price;
    let total_shares = shares + new_shares;
    let total_cost = cost_price + new_cost;
    let new_average = (total_shares > 0.0).then(|| total_cost / total_shares);
    let value_after_purchase = total_shares * current_price;

    ForwardResult {
        new_shares,
        new_cost,
        total_shares,
        total_cost,
        new_average,
        value_after_purchase,
        pl_after_purchase: value_after_purchase - total_cost,
    }
}

/// The solver only works with finite, strictly positive inputs.
fn usable(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

/// Whole shares to buy at `current_price` so the average reaches `target_average`.
///
/// Any non-positive or non-finite input yields the "no purchase" pass-through:
/// zero shares, the current holding as totals, and the target echoed back as
/// the average.
pub fn solve_required_shares(
    shares: f64,
    avg_buy_price: f64,
    current_price: f64,
    target_average: f64,
) -> Result<TargetSolution, RepriceError> {
    let cost_price = shares * avg_buy_price;

    if ![shares, current_price, target_average, avg_buy_price]
        .into_iter()
        .all(usable)
    {
        let value_after_purchase = shares * current_price;
        return Ok(TargetSolution {
            required_shares: 0.0,
            new_cost: 0.0,
            total_shares: shares,
            total_cost: cost_price,
            actual_new_average: target_average,
            target_average,
            value_after_purchase,
            pl_after_purchase: value_after_purchase - cost_price,
        });
    }

    let numerator = target_average * shares - cost_price;
    let denominator = current_price - target_average;

    if denominator == 0.0 {
        debug!(current_price, target_average, "target equals current price");
        return Err(RepriceError::TargetEqualsCurrentPrice { current_price });
    }

    let raw_shares = numerator / denominator;
    if raw_shares < 0.0 {
        debug!(raw_shares, target_average, "target unreachable");
        return Err(RepriceError::TargetUnreachable { target_average });
    }

    // Partial shares cannot be bought; `+ 0.0` folds -0.0 into 0.0.
    let required_shares = raw_shares.ceil() + 0.0;

    let new_cost = required_shares * current_price;
    let total_shares = shares + required_shares;
    let total_cost = cost_price + new_cost;
    let actual_new_average = if total_shares > 0.0 {
        total_cost / total_shares
    } else {
        0.0
    };
    let value_after_purchase = total_shares * current_price;

    debug!(
        raw_shares,
        required_shares,
        actual_new_average,
        target_average,
        "solved required shares"
    );

    Ok(TargetSolution {
        required_shares,
        new_cost,
        total_shares,
        total_cost,
        actual_new_average,
        target_average,
        value_after_purchase,
        pl_after_purchase: value_after_purchase - total_cost,
    })
}
