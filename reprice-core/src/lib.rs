//! Reprice Core — averaging arithmetic for a single stock holding.
//!
//! This crate contains:
//! - Domain records (position, quote, planned purchase, calculation mode)
//! - Permissive input parsing with an optional strict negative-number policy
//! - Forward repricing (new average after buying N shares)
//! - Target repricing (whole shares needed to reach a target average)
//! - Position P&L summary and display formatting
//! - A report adapter that renders every display field

pub mod config;
pub mod domain;
pub mod format;
pub mod input;
pub mod pnl;
pub mod reprice;
pub mod report;

pub use config::{CalculatorConfig, ConfigError};
pub use domain::{CalculationMode, CalculatorInputs, MarketQuote, PlannedPurchase, Position};
pub use input::{parse_amount, InputError, InputPolicy, RawInputs};
pub use pnl::{PnlClass, PositionSummary};
pub use reprice::{forward_average, solve_required_shares, ForwardResult, RepriceError, TargetSolution};
pub use report::{evaluate, evaluate_raw, reprice_purchase, Report, Repricing};
