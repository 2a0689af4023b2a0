//! pagesim CLI - generate traces, sweep the policies, print the results.

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use std::str::FromStr;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use pagesim::common::config::{
    DEFAULT_FRAME_SIZES, DEFAULT_MAX_PAGE, DEFAULT_MIN_PAGE, DEFAULT_TRACE_LENGTH,
};
use pagesim::sim::{Simulator, SweepConfig};
use pagesim::trace::{AccessPattern, Trace, TraceGenerator};
use pagesim::{PolicyKind, Result};

#[derive(Parser)]
#[command(
    name = "pagesim",
    about = "Evaluate page replacement policies against synthetic reference traces"
)]
struct Args {
    /// Accesses per generated trace
    #[arg(long, default_value_t = DEFAULT_TRACE_LENGTH)]
    length: usize,

    /// Largest page id (pages span 1..=PAGES)
    #[arg(long, default_value_t = DEFAULT_MAX_PAGE)]
    pages: u32,

    /// Frame counts to sweep
    #[arg(long, value_delimiter = ',', default_values_t = DEFAULT_FRAME_SIZES)]
    frames: Vec<usize>,

    /// Policies to evaluate (fifo, optimal, refbits, arc)
    #[arg(
        long,
        value_delimiter = ',',
        value_parser = PolicyKind::from_str,
        default_values_t = PolicyKind::ALL
    )]
    policies: Vec<PolicyKind>,

    /// Access patterns to generate (random, locality, mixed, zipf)
    #[arg(
        long,
        value_delimiter = ',',
        value_parser = AccessPattern::from_str,
        default_values_t = [AccessPattern::Random, AccessPattern::Locality, AccessPattern::Mixed]
    )]
    patterns: Vec<AccessPattern>,

    /// RNG seed for reproducible traces
    #[arg(long)]
    seed: Option<u64>,

    /// Write per-run results to a CSV file
    #[arg(long)]
    csv: Option<PathBuf>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    if let Err(err) = run(&args) {
        eprintln!("error: {}", err);
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<()> {
    let mut generator =
        TraceGenerator::new(args.length, DEFAULT_MIN_PAGE, args.pages, args.seed)?;

    let traces: Vec<(String, Trace)> = args
        .patterns
        .iter()
        .map(|&pattern| (pattern.to_string(), generator.generate(pattern)))
        .collect();

    let mut sim = Simulator::new(SweepConfig {
        frame_sizes: args.frames.clone(),
    })?;
    sim.run_experiments(&traces, &args.policies);

    println!("Per-run results");
    println!("{}", "-".repeat(72));
    for row in sim.results() {
        println!("{}", row);
    }

    println!();
    println!("Averages across frame sweep {:?}", sim.frame_sizes());
    println!("{}", "-".repeat(72));
    for row in sim.summary() {
        println!("{}", row);
    }

    if let Some(path) = &args.csv {
        let file = File::create(path)?;
        sim.write_csv(BufWriter::new(file))?;
        println!();
        println!("Wrote {}", path.display());
    }

    Ok(())
}
