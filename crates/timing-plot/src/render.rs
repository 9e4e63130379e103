// File: crates/timing-plot/src/render.rs
// Summary: Builds the timing comparison chart from a results table.

use chart_core::{Chart, Series};
use tracing::{debug, info};

use crate::error::PlotError;
use crate::table::ResultsTable;

/// Shared x-axis column: matrix dimension N.
pub const SIZE_COLUMN: &str = "Size";

pub const TITLE: &str = "Matrix Multiplication Timing Comparison";
pub const X_LABEL: &str = "Matrix Size (NxN)";
pub const Y_LABEL: &str = "Time (ms)";

/// Fraction of the time span added above and below the data.
const Y_MARGIN: f64 = 0.05;

/// One plotted strategy: CSV column and its legend label.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Algorithm {
    pub column: &'static str,
    pub label: &'static str,
}

/// Strategies in draw (and legend) order.
pub const ALGORITHMS: [Algorithm; 4] = [
    Algorithm { column: "Naive", label: "Naive" },
    Algorithm { column: "CacheAware", label: "Cache-Aware" },
    Algorithm { column: "CacheOblivious", label: "Cache-Oblivious" },
    Algorithm { column: "CacheAware1D", label: "Cache-Aware 1D" },
];

/// Draw one line per strategy against `Size`, with title, axis labels, legend and grid.
/// Fails with [`PlotError::Schema`] on the first missing column and [`PlotError::Parse`]
/// on a non-numeric cell in a plotted column; other columns are never read.
pub fn render_timing_chart(table: &ResultsTable) -> Result<Chart, PlotError> {
    let sizes = table.column(SIZE_COLUMN)?;

    let mut chart = Chart::new().with_title(TITLE);
    chart.x_axis = chart.x_axis.with_label(X_LABEL);
    chart.y_axis = chart.y_axis.with_label(Y_LABEL);
    chart.grid = true;
    chart.legend = true;

    for algo in ALGORITHMS {
        let times = table.column(algo.column)?;
        debug!(column = algo.column, label = algo.label, points = times.len(), "adding series");
        chart.add_series(Series::from_columns(algo.label, &sizes, &times));
    }

    chart.autoscale_axes(Y_MARGIN);
    info!(
        series = chart.series.len(),
        x_min = chart.x_axis.min,
        x_max = chart.x_axis.max,
        "rendered timing chart"
    );
    Ok(chart)
}
