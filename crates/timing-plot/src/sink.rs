// File: crates/timing-plot/src/sink.rs
// Summary: Output sink; saves the chart as PNG, then optionally hands it to an on-screen viewer.

use std::path::PathBuf;

use chart_core::{Chart, RenderOptions};
use tracing::info;

use crate::error::PlotError;
use crate::viewer::Viewer;

pub struct OutputSink<'v> {
    output_path: PathBuf,
    options: RenderOptions,
    viewer: Option<&'v dyn Viewer>,
}

impl<'v> OutputSink<'v> {
    /// Sink writing to `output_path` with default render options and no viewer.
    pub fn new(output_path: impl Into<PathBuf>) -> Self {
        Self { output_path: output_path.into(), options: RenderOptions::default(), viewer: None }
    }

    pub fn with_viewer(mut self, viewer: &'v dyn Viewer) -> Self {
        self.viewer = Some(viewer);
        self
    }

    /// Save first, then show. A viewer failure leaves the saved image in place.
    pub fn emit(&self, chart: &Chart) -> Result<(), PlotError> {
        self.save(chart)?;
        if let Some(viewer) = self.viewer {
            self.show(chart, viewer)?;
        }
        Ok(())
    }

    /// Encode the chart as PNG and overwrite the output file. Returns the bytes written.
    pub fn save(&self, chart: &Chart) -> Result<u64, PlotError> {
        let bytes = chart.render_to_png_bytes(&self.options).map_err(PlotError::Render)?;
        let io_err = |source| PlotError::Io { path: self.output_path.clone(), source };
        if let Some(parent) = self.output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }
        std::fs::write(&self.output_path, &bytes).map_err(io_err)?;
        info!(path = %self.output_path.display(), bytes = bytes.len(), "saved chart image");
        Ok(bytes.len() as u64)
    }

    fn show(&self, chart: &Chart, viewer: &dyn Viewer) -> Result<(), PlotError> {
        let frame = chart.render_to_rgba8(&self.options).map_err(PlotError::Render)?;
        let title = if chart.title.is_empty() { "Figure 1" } else { chart.title.as_str() };
        info!(width = frame.width, height = frame.height, "opening chart viewer");
        viewer.show(title, &frame)?;
        info!("chart viewer closed");
        Ok(())
    }
}
