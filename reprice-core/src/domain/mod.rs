//! Domain value records for the averaging calculator.

pub mod inputs;
pub mod position;
pub mod purchase;
pub mod quote;

pub use inputs::CalculatorInputs;
pub use position::Position;
pub use purchase::{CalculationMode, PlannedPurchase};
pub use quote::MarketQuote;
