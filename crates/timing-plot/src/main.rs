// File: crates/timing-plot/src/main.rs
// Summary: Plots results.csv into src/timing_plot.png and shows it in a window.

use anyhow::{Context, Result};
use timing_plot::PlotConfig;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = PlotConfig::default();
    let out = timing_plot::run(&config)
        .with_context(|| format!("failed to plot '{}'", config.input_path.display()))?;
    println!("Wrote {}", out.display());
    Ok(())
}
