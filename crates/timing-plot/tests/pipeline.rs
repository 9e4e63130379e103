// File: crates/timing-plot/tests/pipeline.rs
// Purpose: Output sink and whole-pipeline behaviour: overwrite, save-before-show, no output on failure.

mod common;

use std::cell::RefCell;

use chart_core::RgbaImage;
use timing_plot::{render_timing_chart, run_with_viewer, OutputSink, PlotConfig, PlotError, ResultsTable, Viewer};

const PNG_MAGIC: [u8; 4] = [137, 80, 78, 71];

/// Records what it was shown; optionally fails like a headless display.
#[derive(Default)]
struct RecordingViewer {
    fail: bool,
    shown: RefCell<Vec<(String, u32, u32)>>,
}

impl Viewer for RecordingViewer {
    fn show(&self, title: &str, frame: &RgbaImage) -> Result<(), PlotError> {
        self.shown.borrow_mut().push((title.to_string(), frame.width, frame.height));
        if self.fail {
            return Err(PlotError::DisplayUnavailable { reason: "test display".into() });
        }
        Ok(())
    }
}

fn headless_config(dir: &std::path::Path) -> PlotConfig {
    PlotConfig::default()
        .with_input_path(dir.join("results.csv"))
        .with_output_path(dir.join("src/timing_plot.png"))
        .with_show_interactive(false)
}

#[test]
fn scenario_writes_valid_png() {
    let dir = tempfile::tempdir().unwrap();
    common::write_csv(dir.path(), "results.csv", common::SCENARIO_CSV);
    let config = headless_config(dir.path());

    let out = run_with_viewer(&config, None).expect("pipeline");
    assert_eq!(out, config.output_path);

    let bytes = std::fs::read(&out).expect("output exists");
    assert!(bytes.starts_with(&PNG_MAGIC));
    let img = image::load_from_memory(&bytes).expect("decodes as image");
    assert_eq!((img.width(), img.height()), (1024, 640));
}

#[test]
fn sink_overwrites_existing_output() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("timing_plot.png");
    std::fs::write(&out, b"previous run").unwrap();

    let table = ResultsTable::from_reader(common::SCENARIO_CSV.as_bytes(), std::path::Path::new("s.csv")).unwrap();
    let chart = render_timing_chart(&table).unwrap();
    let written = OutputSink::new(&out).save(&chart).expect("save");

    let meta = std::fs::metadata(&out).unwrap();
    assert!(meta.len() > 0);
    assert_eq!(meta.len(), written);
    assert!(std::fs::read(&out).unwrap().starts_with(&PNG_MAGIC));
}

#[test]
fn viewer_receives_frame_after_save() {
    let dir = tempfile::tempdir().unwrap();
    common::write_csv(dir.path(), "results.csv", common::SCENARIO_CSV);
    let config = headless_config(dir.path());
    let viewer = RecordingViewer::default();

    run_with_viewer(&config, Some(&viewer as &dyn Viewer)).expect("pipeline");

    let shown = viewer.shown.borrow();
    assert_eq!(shown.len(), 1);
    assert_eq!(shown[0], ("Matrix Multiplication Timing Comparison".to_string(), 1024, 640));
    assert!(config.output_path.exists());
}

#[test]
fn display_failure_keeps_saved_image() {
    let dir = tempfile::tempdir().unwrap();
    common::write_csv(dir.path(), "results.csv", common::SCENARIO_CSV);
    let config = headless_config(dir.path());
    let viewer = RecordingViewer { fail: true, ..Default::default() };

    let err = run_with_viewer(&config, Some(&viewer as &dyn Viewer)).unwrap_err();
    assert!(matches!(err, PlotError::DisplayUnavailable { .. }), "got {err:?}");
    assert!(std::fs::metadata(&config.output_path).unwrap().len() > 0);
}

#[test]
fn missing_input_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let config = headless_config(dir.path());
    let viewer = RecordingViewer::default();

    let err = run_with_viewer(&config, Some(&viewer as &dyn Viewer)).unwrap_err();
    assert!(matches!(err, PlotError::FileAccess { .. }), "got {err:?}");
    assert!(!config.output_path.exists());
    assert!(viewer.shown.borrow().is_empty());
}

#[test]
fn missing_column_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    common::write_csv(dir.path(), "results.csv", "Size,Naive,CacheAware,CacheOblivious\n100,5,3,4\n");
    let config = headless_config(dir.path());

    let err = run_with_viewer(&config, None).unwrap_err();
    assert!(matches!(err, PlotError::Schema { .. }), "got {err:?}");
    assert!(!config.output_path.exists());
}
