//! Entry point for the parstats command-line tool.
//! Reads numeric samples, builds the parallel configuration and prints the requested statistics.

use clap::Parser;
use parstats::data_source::SampleSource;
use parstats::{
    get_parallel_info, ParallelConfig, SortedSample, StatOperation, StatisticalReduction,
};
use serde_json::{json, Map, Value};
use tracing::debug;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod cli;

use cli::Args;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    init_logging(&args);

    if args.info {
        get_parallel_info().print_info();
    }

    let config = build_config(&args)?;
    let samples = SampleSource::from_arg(args.file.clone()).read()?;
    debug!(count = samples.len(), ?config, "computing statistics");

    let operations = if args.stats.is_empty() {
        StatOperation::ALL.to_vec()
    } else {
        args.stats.clone()
    };

    // One sorted copy serves the median and every percentile.
    let needs_sort = operations.contains(&StatOperation::Median) || !args.percentiles.is_empty();
    let sorted = if needs_sort {
        Some(SortedSample::new(&samples, &config)?)
    } else {
        None
    };

    let mut results: Vec<(String, Option<f64>)> = Vec::new();
    for operation in operations {
        let value = match (operation, &sorted) {
            (StatOperation::Median, Some(sorted)) => sorted.median(),
            _ => samples.as_slice().reduce_stat_with(operation, &config)?,
        };
        results.push((operation.to_string(), value));
    }
    if let Some(sorted) = &sorted {
        for &p in &args.percentiles {
            results.push((format!("p{p}"), sorted.percentile(p)?));
        }
    }

    if args.json {
        print_json(samples.len(), &results)?;
    } else {
        print_table(samples.len(), &results);
    }

    Ok(())
}

fn init_logging(args: &Args) {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(args.log_filter(rust_log.as_deref()))
        .init();
}

fn build_config(args: &Args) -> parstats::Result<ParallelConfig> {
    let mut config = match args.threads {
        Some(threads) => {
            let config = ParallelConfig::new(threads)?;
            config.setup_global_pool()?;
            config
        }
        None => ParallelConfig::default(),
    };
    if let Some(min_chunk) = args.min_chunk {
        config = config.with_min_chunk_len(min_chunk)?;
    }
    Ok(config)
}

fn print_table(count: usize, results: &[(String, Option<f64>)]) {
    println!("{:<10} {}", "count", count);
    for (name, value) in results {
        match value {
            Some(v) => println!("{name:<10} {v}"),
            None => println!("{name:<10} undefined"),
        }
    }
}

fn print_json(count: usize, results: &[(String, Option<f64>)]) -> serde_json::Result<()> {
    let mut object = Map::new();
    object.insert("count".to_string(), json!(count));
    for (name, value) in results {
        object.insert(name.clone(), value.map_or(Value::Null, |v| json!(v)));
    }
    println!("{}", serde_json::to_string_pretty(&Value::Object(object))?);
    Ok(())
}
