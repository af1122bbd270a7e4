//! CSV batch evaluation.
//!
//! Input columns: `stock,mode,shares,avg_price,current_price,value`, where
//! `value` is the new share count in `shares` mode and the target average in
//! `price` mode. Each input row produces one output row; rows that cannot be
//! evaluated carry the reason in the `error` column instead of aborting the run.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::io::{Read, Write};
use tracing::{debug, info};

use reprice_core::{evaluate_raw, CalculationMode, CalculatorConfig, RawInputs, Report};

#[derive(Debug, Clone, Deserialize)]
pub struct BatchRow {
    #[serde(default)]
    pub stock: String,
    #[serde(default)]
    pub mode: String,
    #[serde(default)]
    pub shares: String,
    #[serde(default)]
    pub avg_price: String,
    #[serde(default)]
    pub current_price: String,
    #[serde(default)]
    pub value: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BatchOutput {
    pub stock: String,
    pub mode: String,
    pub cost_price: String,
    pub current_value: String,
    pub pl: String,
    pub calculated_shares: String,
    pub new_cost: String,
    pub total_cost: Option<String>,
    pub total_shares: Option<String>,
    pub value_after_purchase: Option<String>,
    pub pl_after_purchase: Option<String>,
    pub new_avg: Option<String>,
    pub break_even_price: Option<String>,
    pub error: Option<String>,
}

impl From<Report> for BatchOutput {
    fn from(r: Report) -> Self {
        Self {
            stock: r.stock,
            mode: r.mode.to_string(),
            cost_price: r.cost_price,
            current_value: r.current_value,
            pl: r.pl,
            calculated_shares: r.calculated_shares,
            new_cost: r.new_cost,
            total_cost: r.total_cost,
            total_shares: r.total_shares,
            value_after_purchase: r.value_after_purchase,
            pl_after_purchase: r.pl_after_purchase,
            new_avg: r.new_avg,
            break_even_price: r.break_even_price,
            error: r.error,
        }
    }
}

impl BatchRow {
    fn evaluate(&self, config: &CalculatorConfig) -> BatchOutput {
        let mode = match self.mode.parse::<CalculationMode>() {
            Ok(mode) => mode,
            Err(err) => return self.failed(err.to_string()),
        };

        let (new_shares, target_average) = match mode {
            CalculationMode::Shares => (self.value.clone(), String::new()),
            CalculationMode::Price => (String::new(), self.value.clone()),
        };
        let raw = RawInputs {
            stock: Some(self.stock.clone()),
            shares: self.shares.clone(),
            avg_buy_price: self.avg_price.clone(),
            current_price: self.current_price.clone(),
            new_shares,
            target_average,
        };

        match evaluate_raw(&raw, mode, config) {
            Ok(report) => report.into(),
            Err(err) => self.failed(err.to_string()),
        }
    }

    fn failed(&self, error: String) -> BatchOutput {
        debug!(stock = %self.stock, %error, "batch row rejected");
        BatchOutput {
            stock: self.stock.clone(),
            mode: self.mode.clone(),
            error: Some(error),
            ..Default::default()
        }
    }
}

/// Summary counts for a finished batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchSummary {
    pub rows: usize,
    pub errors: usize,
}

/// Evaluate every row of `input` and write the results to `output`.
pub fn run_batch<R: Read, W: Write>(
    input: R,
    output: W,
    config: &CalculatorConfig,
) -> Result<BatchSummary> {
    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(input);
    let mut writer = csv::Writer::from_writer(output);
    let mut summary = BatchSummary { rows: 0, errors: 0 };

    for (index, record) in reader.deserialize::<BatchRow>().enumerate() {
        let row = record.with_context(|| format!("read batch row {}", index + 1))?;
        let out = row.evaluate(config);
        if out.error.is_some() {
            summary.errors += 1;
        }
        summary.rows += 1;
        writer.serialize(&out)?;
    }
    writer.flush()?;

    info!(rows = summary.rows, errors = summary.errors, "batch complete");
    Ok(summary)
}
