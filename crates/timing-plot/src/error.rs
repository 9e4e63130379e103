// File: crates/timing-plot/src/error.rs
// Summary: Error taxonomy for loading, rendering, saving and showing the timing chart.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlotError {
    /// Input file missing or unreadable.
    #[error("cannot read results file '{}'", path.display())]
    FileAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed CSV (bad header, ragged row, invalid UTF-8).
    #[error("malformed CSV in '{}'", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// A referenced column is absent from the table.
    #[error("column '{column}' not found (available: {})", available.join(", "))]
    Schema { column: String, available: Vec<String> },

    /// A cell is not a number.
    #[error("'{}' row {row}, column '{column}': '{value}' is not a number", path.display())]
    Parse { path: PathBuf, row: usize, column: String, value: String },

    #[error("rendering failed: {0:#}")]
    Render(anyhow::Error),

    #[error("cannot write chart image '{}'", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// No display surface for the interactive viewer.
    #[error("interactive display unavailable: {reason}")]
    DisplayUnavailable { reason: String },
}

impl PlotError {
    pub(crate) fn display_unavailable(reason: impl ToString) -> Self {
        PlotError::DisplayUnavailable { reason: reason.to_string() }
    }
}
