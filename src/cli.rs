//! Defines command-line interface options using `clap` for the parstats tool.

use clap::Parser;
use parstats::StatOperation;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Parallel descriptive statistics for numeric data
#[derive(Parser, Debug)]
#[command(
    name = "parstats",
    version,
    about = "Compute descriptive statistics over large numeric datasets in parallel"
)]
pub struct Args {
    /// File of numbers separated by whitespace, commas or semicolons. Reads stdin when omitted or '-'.
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    /// Statistic to compute: sum, mean, variance, stdev, min, max or median. Repeatable; defaults to all.
    #[arg(short, long = "stat", value_parser = parse_stat)]
    pub stats: Vec<StatOperation>,

    /// Percentile to compute, between 0 and 100. Repeatable.
    #[arg(short, long = "percentile", value_parser = parse_percentile)]
    pub percentiles: Vec<f64>,

    /// Number of threads to use for parallel processing. Defaults to number of CPU cores.
    #[arg(short = 't', long)]
    pub threads: Option<usize>,

    /// Minimum number of elements handed to each worker
    #[arg(long)]
    pub min_chunk: Option<usize>,

    /// Print results as a single JSON object
    #[arg(long)]
    pub json: bool,

    /// Print information about the parallel processing environment
    #[arg(long)]
    pub info: bool,

    /// Enable verbose output.
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

impl Args {
    /// Log filter for this run: `RUST_LOG` directives when set and valid,
    /// otherwise `warn`, or `debug` with `--verbose`.
    pub fn log_filter(&self, rust_log: Option<&str>) -> EnvFilter {
        let level = if self.verbose { "debug" } else { "warn" };
        rust_log
            .filter(|directives| !directives.trim().is_empty())
            .and_then(|directives| EnvFilter::try_new(directives).ok())
            .unwrap_or_else(|| EnvFilter::new(level))
    }
}

fn parse_stat(s: &str) -> Result<StatOperation, String> {
    s.parse()
}

fn parse_percentile(s: &str) -> Result<f64, String> {
    let p: f64 = s
        .parse()
        .map_err(|_| format!("Invalid percentile '{s}': expected a number"))?;
    if (0.0..=100.0).contains(&p) {
        Ok(p)
    } else {
        Err(format!("Invalid percentile '{s}': must be between 0 and 100"))
    }
}
