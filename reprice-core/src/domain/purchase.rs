//! Planned purchase and the calculation mode that selects it.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::input::InputError;

/// What the user plans to buy next.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PlannedPurchase {
    /// Forward mode: buy a fixed number of shares.
    Shares { new_shares: f64 },

    /// Target mode: buy whatever it takes to reach this average.
    TargetAverage { target_average: f64 },
}

/// Which repricing direction to evaluate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CalculationMode {
    /// Given a share count, compute the resulting average.
    #[default]
    Shares,
    /// Given a target average, solve for the share count.
    Price,
}

impl CalculationMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Shares => "shares",
            Self::Price => "price",
        }
    }
}

impl fmt::Display for CalculationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CalculationMode {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "shares" => Ok(Self::Shares),
            "price" => Ok(Self::Price),
            other => Err(InputError::UnknownMode(other.to_string())),
        }
    }
}
