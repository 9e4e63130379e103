// File: crates/timing-plot/src/config.rs
// Summary: Paths and viewer choice for one plotting run.

use std::path::PathBuf;

/// Benchmark results read by default, relative to the working directory.
pub const DEFAULT_INPUT_PATH: &str = "results.csv";
/// Chart image written by default, relative to the working directory.
pub const DEFAULT_OUTPUT_PATH: &str = "src/timing_plot.png";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlotConfig {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    /// Block on an on-screen viewer after the image is saved.
    pub show_interactive: bool,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from(DEFAULT_INPUT_PATH),
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            show_interactive: true,
        }
    }
}

impl PlotConfig {
    pub fn with_input_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.input_path = path.into();
        self
    }

    pub fn with_output_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_path = path.into();
        self
    }

    pub fn with_show_interactive(mut self, show: bool) -> Self {
        self.show_interactive = show;
        self
    }
}
