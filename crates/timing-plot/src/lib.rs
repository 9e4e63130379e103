// File: crates/timing-plot/src/lib.rs
// Summary: Timing chart pipeline (load results CSV, build chart, save PNG, optionally show it).

pub mod config;
pub mod error;
pub mod render;
pub mod sink;
pub mod table;
pub mod viewer;

pub use config::PlotConfig;
pub use error::PlotError;
pub use render::{render_timing_chart, Algorithm, ALGORITHMS};
pub use sink::OutputSink;
pub use table::ResultsTable;
pub use viewer::{default_viewer, Viewer};

use std::path::PathBuf;

use tracing::info;

/// Run the whole pipeline with the viewer implied by `config.show_interactive`.
/// Returns the path of the written image.
pub fn run(config: &PlotConfig) -> Result<PathBuf, PlotError> {
    let viewer = config.show_interactive.then(default_viewer);
    run_with_viewer(config, viewer.as_deref())
}

/// Load, render, save, then hand the chart to `viewer` if one is given.
/// Nothing is written when loading or rendering fails.
pub fn run_with_viewer(config: &PlotConfig, viewer: Option<&dyn Viewer>) -> Result<PathBuf, PlotError> {
    info!(input = %config.input_path.display(), output = %config.output_path.display(), "plotting timing results");
    let table = ResultsTable::load(&config.input_path)?;
    let chart = render_timing_chart(&table)?;

    let mut sink = OutputSink::new(&config.output_path);
    if let Some(viewer) = viewer {
        sink = sink.with_viewer(viewer);
    }
    sink.emit(&chart)?;
    Ok(config.output_path.clone())
}
