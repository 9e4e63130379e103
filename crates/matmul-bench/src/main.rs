// File: crates/matmul-bench/src/main.rs
// Summary: Times the matmul strategies over a list of sizes and writes results.csv.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use matmul_bench::{run_suite, write_results, CacheInfo, SuiteConfig};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "matmul-bench", about = "Time naive, cache-aware, cache-oblivious and parallel tiled matmul")]
struct Args {
    /// Matrix sizes N (for N x N matrices), comma separated.
    #[arg(long, value_delimiter = ',', default_value = "128,256,512")]
    sizes: Vec<usize>,

    /// Results CSV to write.
    #[arg(long, default_value = "results.csv")]
    output: PathBuf,

    /// Worker threads for the parallel kernel [default: available parallelism].
    #[arg(long)]
    threads: Option<usize>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let cache = CacheInfo::detect();
    println!("Detected Cache Line Size: {} bytes", cache.line_size);
    println!("Detected L1 Cache Size: {} bytes", cache.l1_size);

    let mut config = SuiteConfig { sizes: args.sizes, cache, ..SuiteConfig::default() };
    if let Some(threads) = args.threads {
        config.threads = threads;
    }

    let rows = run_suite(&config).context("benchmark run failed")?;
    for row in &rows {
        println!(
            "N={:<5} naive {:>10.3} ms  cache-aware {:>10.3} ms  cache-oblivious {:>10.3} ms  cache-aware 1D {:>10.3} ms",
            row.size, row.naive, row.cache_aware, row.cache_oblivious, row.cache_aware_1d
        );
    }
    write_results(&args.output, &rows)
        .with_context(|| format!("failed to write '{}'", args.output.display()))?;
    println!("Wrote {}", args.output.display());
    Ok(())
}
