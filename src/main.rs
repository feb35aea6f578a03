//! Debt Projection CLI
//!
//! Projects a single debt under the configured rate scenarios, prints the
//! first months and the markers, and writes the full series to CSV.

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::Parser;
use debt_projection::projection::export;
use debt_projection::{Assumptions, ProjectionEngine, ProjectionInputs, RateScenarios};
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

/// Debt paydown and interest projection across fixed-rate scenarios
#[derive(Parser, Debug)]
#[command(name = "debt-projection")]
#[command(version)]
struct Args {
    /// Property valuation; debt quantile markers are fractions of it
    #[arg(long, default_value_t = 3_600_000.0)]
    principal: f64,

    /// Outstanding debt
    #[arg(long, default_value_t = 2_700_000.0)]
    debt: f64,

    /// Your age
    #[arg(long, default_value_t = 34.0)]
    age: f64,

    /// Retirement age
    #[arg(long, default_value_t = 65.0)]
    retirement_age: f64,

    /// Monthly down payment (default: 2% of the debt per year)
    #[arg(long, allow_negative_numbers = true)]
    monthly_payment: Option<f64>,

    /// Annual rates to compare, ascending (e.g. 0.02,0.03,0.05)
    #[arg(long, value_delimiter = ',')]
    rates: Option<Vec<f64>>,

    /// Age the no-paydown horizon runs to
    #[arg(long)]
    death_age: Option<f64>,

    /// Age of the life-expectancy marker
    #[arg(long)]
    life_expectancy_age: Option<f64>,

    /// Anchor date, YYYY-MM-DD (default: today)
    #[arg(long)]
    as_of: Option<NaiveDate>,

    /// JSON assumptions file; flags above override its fields
    #[arg(long)]
    assumptions: Option<PathBuf>,

    /// Series CSV output path
    #[arg(long, default_value = "debt_projection.csv")]
    output: PathBuf,

    /// Markers CSV output path
    #[arg(long, default_value = "debt_markers.csv")]
    markers_output: PathBuf,

    /// Print the full result as JSON instead of the table
    #[arg(long)]
    json: bool,

    /// Number of months shown in the table
    #[arg(long, default_value_t = 24)]
    show_months: usize,
}

fn load_assumptions(args: &Args) -> Result<Assumptions> {
    let mut assumptions = match &args.assumptions {
        Some(path) => Assumptions::from_json_path(path)
            .with_context(|| format!("loading assumptions from {}", path.display()))?,
        None => Assumptions::default(),
    };

    if let Some(rates) = &args.rates {
        assumptions.rates = RateScenarios::new(rates.clone()).context("--rates")?;
    }
    if let Some(age) = args.death_age {
        assumptions.lifetime.death_age = age;
    }
    if let Some(age) = args.life_expectancy_age {
        assumptions.lifetime.life_expectancy_age = age;
    }

    Ok(assumptions)
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let assumptions = load_assumptions(&args)?;
    let inputs = ProjectionInputs::new(
        args.principal,
        args.debt,
        args.age,
        args.retirement_age,
        args.monthly_payment
            .unwrap_or_else(|| ProjectionInputs::standard_monthly_payment(args.debt)),
        args.as_of.unwrap_or_else(|| Local::now().date_naive()),
    );
    log::info!("projecting {:?}", inputs);

    let engine = ProjectionEngine::new(assumptions);
    let result = engine.project(&inputs);

    if args.json {
        let stdout = std::io::stdout();
        export::write_json(&result, stdout.lock())?;
        println!();
        return Ok(());
    }

    println!("Debt Projection v{}", env!("CARGO_PKG_VERSION"));
    println!("======================\n");
    println!("  Principal:       {:.2}", inputs.principal);
    println!("  Debt:            {:.2}", inputs.debt);
    println!("  Monthly payment: {:.2}", inputs.monthly_payment);
    println!("  Age:             {} (retire at {})", inputs.current_age, inputs.retirement_age);
    println!("  Horizon:         {:?}", engine.horizon(&inputs));
    println!();

    let series = &result.series;
    let top = series.rates.len().saturating_sub(1);
    println!(
        "{:>5} {:>10} {:>14} {:>14} {:>14} {:>14}",
        "Month", "Date", "Debt", "CumDownPmt", "CumInt(top)", "NoPaydown(top)"
    );
    println!("{}", "-".repeat(76));
    for bucket in series.iter().take(args.show_months) {
        let (cum, no_paydown) = bucket
            .rate(top)
            .map(|m| (m.cumulative_interest, m.cumulative_interest_no_paydown))
            .unwrap_or((0.0, 0.0));
        println!(
            "{:>5} {:>10} {:>14.2} {:>14.2} {:>14.2} {:>14.2}",
            bucket.index, bucket.date, bucket.debt, bucket.cumulative_down_payment, cum, no_paydown
        );
    }
    if series.len() > args.show_months {
        println!("... ({} more months)", series.len() - args.show_months);
    }

    println!("\nMarkers:");
    for marker in &result.markers {
        println!("  {:<16} {}", marker.label(), marker.date());
    }

    let summary = result.summary();
    println!("\nSummary:");
    println!("  Total Months: {}", summary.total_months);
    if let Some(date) = summary.final_date {
        println!("  Final Month: {}", date);
    }
    println!("  Total Down Payment: {:.2}", summary.total_down_payment);
    for r in &summary.rates {
        println!(
            "  {:>6}: interest {:>14.2}  no paydown {:>14.2}  avoided {:>14.2}",
            RateScenarios::label(r.rate),
            r.total_interest,
            r.total_interest_no_paydown,
            r.interest_avoided
        );
    }
    if !result.diagnostics.is_empty() {
        println!("  Consistency warnings: {}", result.diagnostics.len());
    }

    let file = File::create(&args.output)
        .with_context(|| format!("creating {}", args.output.display()))?;
    export::write_series_csv(series, BufWriter::new(file))?;
    println!("\nFull series written to: {}", args.output.display());

    let file = File::create(&args.markers_output)
        .with_context(|| format!("creating {}", args.markers_output.display()))?;
    export::write_markers_csv(&result.markers, BufWriter::new(file))?;
    println!("Markers written to: {}", args.markers_output.display());

    Ok(())
}
