//! Run projections for a whole batch of input sets from CSV
//!
//! Outputs one summary row per input set

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::Parser;
use debt_projection::inputs::load_inputs;
use debt_projection::projection::export;
use debt_projection::{Assumptions, ScenarioRunner};
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(name = "run_batch")]
#[command(about = "Project every input set in a CSV file")]
struct Args {
    /// Input CSV: id,principal,debt,age,retirement_age[,monthly_payment][,as_of]
    input: PathBuf,

    /// Summary CSV output path
    #[arg(long, default_value = "batch_projection_output.csv")]
    output: PathBuf,

    /// JSON assumptions file
    #[arg(long)]
    assumptions: Option<PathBuf>,

    /// Anchor date for rows without one (default: today)
    #[arg(long)]
    as_of: Option<NaiveDate>,

    /// Treat input sets needing more months than this as empty
    #[arg(long)]
    max_horizon_months: Option<usize>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let start = Instant::now();
    let as_of = args.as_of.unwrap_or_else(|| Local::now().date_naive());

    println!("Loading input sets from {}...", args.input.display());
    let sets = load_inputs(&args.input, as_of)
        .with_context(|| format!("loading {}", args.input.display()))?;
    println!("Loaded {} input sets in {:?}", sets.len(), start.elapsed());

    let mut assumptions = match &args.assumptions {
        Some(path) => Assumptions::from_json_path(path)
            .with_context(|| format!("loading assumptions from {}", path.display()))?,
        None => Assumptions::default(),
    };
    if args.max_horizon_months.is_some() {
        assumptions.max_horizon_months = args.max_horizon_months;
    }
    let runner = ScenarioRunner::with_assumptions(assumptions);

    println!("Running projections...");
    let proj_start = Instant::now();
    let results = runner.run_input_sets(&sets);
    println!("Projections complete in {:?}", proj_start.elapsed());

    let summaries: Vec<_> = results
        .iter()
        .map(|(id, result)| (id.clone(), result.summary()))
        .collect();

    let empty = summaries.iter().filter(|(_, s)| s.total_months == 0).count();
    let warnings: usize = summaries.iter().map(|(_, s)| s.warning_count).sum();
    if empty > 0 {
        log::warn!("{} input sets produced an empty series", empty);
    }

    let file = File::create(&args.output)
        .with_context(|| format!("creating {}", args.output.display()))?;
    export::write_summaries_csv(&summaries, BufWriter::new(file))?;
    println!("Output written to {}", args.output.display());

    println!("\nBatch Summary:");
    println!("  Input sets:           {}", summaries.len());
    println!("  Empty series:         {}", empty);
    println!("  Consistency warnings: {}", warnings);
    if let Some(longest) = summaries.iter().max_by_key(|(_, s)| s.total_months) {
        println!("  Longest horizon:      {} ({} months)", longest.0, longest.1.total_months);
    }

    println!("\nTotal time: {:?}", start.elapsed());
    Ok(())
}
