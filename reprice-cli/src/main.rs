//! Reprice CLI — averaging calculator commands.
//!
//! Commands:
//! - `forward` — new average after buying a number of shares
//! - `target` — whole shares needed to reach a target average
//! - `report` — every display field for one position in either mode
//! - `batch` — evaluate a CSV of positions

mod batch;
mod logging;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use reprice_core::format::{
    format_currency_with, format_number, format_shares, format_signed_currency,
};
use reprice_core::{
    evaluate_raw, forward_average, solve_required_shares, CalculationMode, CalculatorConfig,
    ForwardResult, RawInputs, RepriceError, Report, TargetSolution,
};

#[derive(Parser)]
#[command(
    name = "reprice",
    about = "Reprice CLI — cost basis, P&L and averaging calculator"
)]
struct Cli {
    /// Path to a TOML config file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Debug logging (overridden by RUST_LOG).
    #[arg(short, long, global = true, default_value_t = false)]
    verbose: bool,

    /// Print results as JSON.
    #[arg(long, global = true, default_value_t = false)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Fields shared by every single-position command. Values are free text and
/// are coerced to zero when they do not parse.
#[derive(clap::Args)]
struct PositionArgs {
    /// Shares currently held.
    #[arg(long, default_value = "", allow_hyphen_values = true)]
    shares: String,

    /// Average buy price of the held shares.
    #[arg(long, default_value = "", allow_hyphen_values = true)]
    avg_price: String,

    /// Current market price.
    #[arg(long, default_value = "", allow_hyphen_values = true)]
    current_price: String,
}

#[derive(Subcommand)]
enum Commands {
    /// New average after buying more shares at the current price.
    Forward {
        #[command(flatten)]
        position: PositionArgs,

        /// Shares to buy.
        #[arg(long, default_value = "", allow_hyphen_values = true)]
        new_shares: String,
    },
    /// Whole shares to buy so the average reaches a target.
    Target {
        #[command(flatten)]
        position: PositionArgs,

        /// Desired average after buying.
        #[arg(long, default_value = "", allow_hyphen_values = true)]
        target_avg: String,
    },
    /// Full position report: cost, value, P&L and repricing.
    Report {
        /// Calculation mode: shares or price.
        #[arg(long, default_value = "shares")]
        mode: String,

        /// Stock symbol or name.
        #[arg(long)]
        stock: Option<String>,

        #[command(flatten)]
        position: PositionArgs,

        /// Shares to buy (shares mode).
        #[arg(long, default_value = "", allow_hyphen_values = true)]
        new_shares: String,

        /// Desired average after buying (price mode).
        #[arg(long, default_value = "", allow_hyphen_values = true)]
        target_avg: String,
    },
    /// Evaluate a CSV of positions (stock,mode,shares,avg_price,current_price,value).
    Batch {
        /// Input CSV file.
        input: PathBuf,

        /// Output CSV file. Defaults to stdout.
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logger(cli.verbose);

    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Forward {
            position,
            new_shares,
        } => run_forward(&position, new_shares, &config, cli.json),
        Commands::Target {
            position,
            target_avg,
        } => run_target(&position, target_avg, &config, cli.json),
        Commands::Report {
            mode,
            stock,
            position,
            new_shares,
            target_avg,
        } => run_report(&mode, stock, &position, new_shares, target_avg, &config, cli.json),
        Commands::Batch { input, output } => run_batch_cmd(&input, output.as_deref(), &config),
    }
}

fn load_config(path: Option<&Path>) -> Result<CalculatorConfig> {
    match path {
        Some(path) => {
            let config = CalculatorConfig::from_file(path)?;
            info!(path = %path.display(), policy = ?config.input.policy, "loaded config");
            Ok(config)
        }
        None => {
            debug!("no config file, using defaults");
            Ok(CalculatorConfig::default())
        }
    }
}

fn raw_inputs(position: &PositionArgs, new_shares: String, target_average: String) -> RawInputs {
    RawInputs {
        stock: None,
        shares: position.shares.clone(),
        avg_buy_price: position.avg_price.clone(),
        current_price: position.current_price.clone(),
        new_shares,
        target_average,
    }
}

fn run_forward(
    position: &PositionArgs,
    new_shares: String,
    config: &CalculatorConfig,
    json: bool,
) -> Result<()> {
    let inputs = raw_inputs(position, new_shares, String::new()).parse(config.input.policy)?;
    let pos = inputs.position;
    let result = forward_average(
        pos.shares,
        pos.avg_buy_price,
        inputs.new_shares,
        inputs.quote.current_price,
    );
    write_forward(&mut io::stdout().lock(), &result, &config.display.currency_symbol, json)
}

fn write_forward<W: Write>(
    out: &mut W,
    result: &ForwardResult,
    symbol: &str,
    json: bool,
) -> Result<()> {
    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(result)?)?;
        return Ok(());
    }

    writeln!(out)?;
    writeln!(out, "=== Forward Repricing ===")?;
    writeln!(out, "New Shares:     {}", format_shares(result.new_shares))?;
    writeln!(out, "New Cost:       {}", format_currency_with(result.new_cost, symbol))?;
    writeln!(out, "Total Shares:   {}", format_shares(result.total_shares))?;
    writeln!(out, "Total Cost:     {}", format_currency_with(result.total_cost, symbol))?;
    match result.new_average {
        Some(avg) => writeln!(out, "New Average:    {}", format_currency_with(avg, symbol))?,
        None => writeln!(out, "New Average:    -")?,
    }
    writeln!(
        out,
        "Value After:    {}",
        format_currency_with(result.value_after_purchase, symbol)
    )?;
    writeln!(
        out,
        "P&L After:      {}",
        format_signed_currency(result.pl_after_purchase, symbol)
    )?;
    writeln!(out)?;
    Ok(())
}

fn run_target(
    position: &PositionArgs,
    target_avg: String,
    config: &CalculatorConfig,
    json: bool,
) -> Result<()> {
    let inputs = raw_inputs(position, String::new(), target_avg).parse(config.input.policy)?;
    let pos = inputs.position;
    let outcome = solve_required_shares(
        pos.shares,
        pos.avg_buy_price,
        inputs.quote.current_price,
        inputs.target_average,
    );

    let solved = write_target(
        &mut io::stdout().lock(),
        &mut io::stderr().lock(),
        &outcome,
        &config.display.currency_symbol,
        json,
    )?;
    if !solved {
        std::process::exit(1);
    }
    Ok(())
}

/// Render a solver outcome. A solver error goes to `err` and yields `false`,
/// in both text and JSON mode.
fn write_target<W: Write, E: Write>(
    out: &mut W,
    err: &mut E,
    outcome: &Result<TargetSolution, RepriceError>,
    symbol: &str,
    json: bool,
) -> Result<bool> {
    let solution = match outcome {
        Ok(solution) => solution,
        Err(e) => {
            writeln!(err, "Error: {e}")?;
            return Ok(false);
        }
    };

    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(solution)?)?;
        return Ok(true);
    }

    writeln!(out)?;
    writeln!(out, "=== Target Repricing ===")?;
    writeln!(out, "Required Shares: {}", format_shares(solution.required_shares))?;
    writeln!(out, "New Cost:       {}", format_currency_with(solution.new_cost, symbol))?;
    writeln!(out, "Total Shares:   {}", format_shares(solution.total_shares))?;
    writeln!(out, "Total Cost:     {}", format_currency_with(solution.total_cost, symbol))?;
    writeln!(
        out,
        "Actual Average: {}",
        format_currency_with(solution.actual_new_average, symbol)
    )?;
    writeln!(
        out,
        "Value After:    {}",
        format_currency_with(solution.value_after_purchase, symbol)
    )?;
    writeln!(
        out,
        "P&L After:      {}",
        format_signed_currency(solution.pl_after_purchase, symbol)
    )?;
    let drift = solution.target_drift();
    if solution.is_no_purchase() {
        writeln!(out, "No purchase needed.")?;
    } else if drift != 0.0 {
        writeln!(
            out,
            "Target Drift:   {} ({} vs target {})",
            format_number(drift),
            format_currency_with(solution.actual_new_average, symbol),
            format_currency_with(solution.target_average, symbol)
        )?;
    }
    writeln!(out)?;
    Ok(true)
}

fn run_report(
    mode: &str,
    stock: Option<String>,
    position: &PositionArgs,
    new_shares: String,
    target_avg: String,
    config: &CalculatorConfig,
    json: bool,
) -> Result<()> {
    let mode: CalculationMode = mode.parse()?;
    let mut raw = raw_inputs(position, new_shares, target_avg);
    raw.stock = stock;
    let report = evaluate_raw(&raw, mode, config)?;
    write_report(&mut io::stdout().lock(), &report, json)
}

fn write_report<W: Write>(out: &mut W, report: &Report, json: bool) -> Result<()> {
    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(report)?)?;
        return Ok(());
    }

    let dash = |v: &Option<String>| v.clone().unwrap_or_else(|| "-".into());

    writeln!(out)?;
    writeln!(out, "=== Position ===")?;
    writeln!(out, "Stock:          {}", report.stock)?;
    writeln!(out, "Cost Price:     {}", report.cost_price)?;
    writeln!(out, "Current Value:  {}", report.current_value)?;
    writeln!(out, "P&L:            {} ({:?})", report.pl, report.pl_class)?;
    writeln!(out)?;
    writeln!(out, "--- Repricing ({}) ---", report.mode)?;
    writeln!(out, "Shares To Buy:  {}", report.calculated_shares)?;
    writeln!(out, "New Cost:       {}", report.new_cost)?;
    writeln!(out, "Total Cost:     {}", dash(&report.total_cost))?;
    writeln!(out, "Total Shares:   {}", dash(&report.total_shares))?;
    writeln!(out, "New Average:    {}", dash(&report.new_avg))?;
    writeln!(out, "Value After:    {}", dash(&report.value_after_purchase))?;
    writeln!(out, "P&L After:      {}", dash(&report.pl_after_purchase))?;
    writeln!(out)?;
    writeln!(out, "--- Summary ---")?;
    writeln!(out, "Stock:          {}", report.stock)?;
    writeln!(out, "P&L:            {}", report.summary_pl)?;
    writeln!(out, "New Average:    {}", dash(&report.summary_new_avg))?;
    writeln!(out, "Break-even:     {}", dash(&report.break_even_price))?;
    if let Some(err) = &report.error {
        writeln!(out)?;
        writeln!(out, "ERROR: {err}")?;
    }
    writeln!(out)?;
    Ok(())
}

fn run_batch_cmd(input: &Path, output: Option<&Path>, config: &CalculatorConfig) -> Result<()> {
    let reader = File::open(input).with_context(|| format!("open {}", input.display()))?;

    let summary = match output {
        Some(path) => {
            let file = File::create(path).with_context(|| format!("create {}", path.display()))?;
            let summary = batch::run_batch(reader, BufWriter::new(file), config)?;
            println!("Results saved to: {}", path.display());
            summary
        }
        None => batch::run_batch(reader, io::stdout().lock(), config)?,
    };

    if summary.errors > 0 {
        eprintln!(
            "{} of {} row(s) could not be evaluated",
            summary.errors, summary.rows
        );
    }
    Ok(())
}
