// File: crates/chart-core/src/chart.rs
// Summary: Chart struct and headless PNG/RGBA rendering pipeline using Skia CPU raster surfaces.

use anyhow::Result;
use skia_safe as skia;
use tracing::debug;

use crate::geometry::RectI32;
use crate::grid::{format_tick, linspace, nice_step, nice_ticks};
use crate::series::Series;
use crate::text::TextShaper;
use crate::theme::Theme;
use crate::types::{Insets, WIDTH, HEIGHT};
use crate::view::ViewState;
use crate::Axis;

const X_TICK_TARGET: usize = 8;
const Y_TICK_TARGET: usize = 6;
const TITLE_SIZE: f32 = 18.0;
const LABEL_SIZE: f32 = 14.0;
const TICK_SIZE: f32 = 12.0;
const LEGEND_SIZE: f32 = 13.0;

#[derive(Clone, Debug)]
pub struct RenderOptions {
    pub width: i32,
    pub height: i32,
    pub insets: Insets,
    pub theme: Theme,
    /// Text (title, axis labels, tick labels, legend labels). Off gives font-independent output.
    pub draw_labels: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width: WIDTH,
            height: HEIGHT,
            insets: Insets::default(),
            theme: Theme::default(),
            draw_labels: true,
        }
    }
}

/// Tightly packed RGBA8 pixels, top row first.
#[derive(Clone, Debug)]
pub struct RgbaImage {
    pub pixels: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub stride: usize,
}

#[derive(Clone, Debug)]
pub struct Chart {
    pub title: String,
    pub series: Vec<Series>,
    pub x_axis: Axis,
    pub y_axis: Axis,
    pub grid: bool,
    pub legend: bool,
}

impl Default for Chart {
    fn default() -> Self { Self::new() }
}

impl Chart {
    pub fn new() -> Self {
        Self {
            title: String::new(),
            series: Vec::new(),
            x_axis: Axis::default_x(),
            y_axis: Axis::default_y(),
            grid: false,
            legend: false,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Append a series; later series are drawn on top and listed later in the legend.
    pub fn add_series(&mut self, series: Series) {
        self.series.push(series);
    }

    pub fn series_labels(&self) -> Vec<&str> {
        self.series.iter().map(|s| s.label.as_str()).collect()
    }

    /// Fit both axes to the data, keeping X exact and padding Y by `y_margin` of its span.
    pub fn autoscale_axes(&mut self, y_margin: f64) {
        ViewState::from_chart(self, y_margin).apply_to_chart(self);
    }

    /// Render the chart to a PNG at `output_png_path` using a CPU raster surface.
    pub fn render_to_png(
        &self,
        opts: &RenderOptions,
        output_png_path: impl AsRef<std::path::Path>,
    ) -> Result<()> {
        let bytes = self.render_to_png_bytes(opts)?;
        let path = output_png_path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, &bytes)?;
        Ok(())
    }

    /// Render the chart and return encoded PNG bytes.
    pub fn render_to_png_bytes(&self, opts: &RenderOptions) -> Result<Vec<u8>> {
        let mut surface = self.rasterize(opts)?;
        let image = surface.image_snapshot();
        #[allow(deprecated)]
        let data = image
            .encode_to_data(skia::EncodedImageFormat::PNG)
            .ok_or_else(|| anyhow::anyhow!("encode PNG failed"))?;
        debug!(bytes = data.as_bytes().len(), "encoded chart png");
        Ok(data.as_bytes().to_vec())
    }

    /// Render the chart into an unpremultiplied RGBA8 buffer.
    pub fn render_to_rgba8(&self, opts: &RenderOptions) -> Result<RgbaImage> {
        let mut surface = self.rasterize(opts)?;
        let info = skia::ImageInfo::new(
            (opts.width, opts.height),
            skia::ColorType::RGBA8888,
            skia::AlphaType::Unpremul,
            None,
        );
        let stride = opts.width as usize * 4;
        let mut pixels = vec![0u8; stride * opts.height as usize];
        if !surface.read_pixels(&info, &mut pixels, stride, (0, 0)) {
            anyhow::bail!("reading back raster pixels failed");
        }
        Ok(RgbaImage { pixels, width: opts.width as u32, height: opts.height as u32, stride })
    }

    fn rasterize(&self, opts: &RenderOptions) -> Result<skia::Surface> {
        let mut surface = skia::surfaces::raster_n32_premul((opts.width, opts.height))
            .ok_or_else(|| anyhow::anyhow!("failed to create {}x{} raster surface", opts.width, opts.height))?;
        self.paint(surface.canvas(), opts);
        Ok(surface)
    }

    fn paint(&self, canvas: &skia::Canvas, opts: &RenderOptions) {
        let theme = &opts.theme;
        canvas.clear(theme.background);

        let plot = RectI32::inset(opts.width, opts.height, &opts.insets);
        let x_ticks = ticks_for(&self.x_axis, X_TICK_TARGET);
        let y_ticks = ticks_for(&self.y_axis, Y_TICK_TARGET);
        let text = opts.draw_labels.then(TextShaper::new);

        if self.grid {
            draw_grid(canvas, &plot, &self.x_axis, &self.y_axis, &x_ticks, &y_ticks, theme);
        }

        // Series, clipped to the plot area
        canvas.save();
        canvas.clip_rect(to_rect(&plot), None, Some(true));
        for (i, s) in self.series.iter().enumerate() {
            let color = theme.series_color(i);
            draw_line_series(canvas, &plot, &self.x_axis, &self.y_axis, s, color);
        }
        canvas.restore();

        draw_axes(canvas, &plot, &self.x_axis, &self.y_axis, &x_ticks, &y_ticks, theme);

        if let Some(text) = &text {
            draw_tick_labels(canvas, text, &plot, &self.x_axis, &self.y_axis, &x_ticks, &y_ticks, theme);
            draw_titles(canvas, text, &plot, opts, &self.title, &self.x_axis, &self.y_axis);
        }

        if self.legend {
            draw_legend(canvas, text.as_ref(), &plot, &self.series, theme);
        }
    }
}

// ---- helpers ----------------------------------------------------------------

fn ticks_for(axis: &Axis, target: usize) -> Vec<f64> {
    let ticks = nice_ticks(axis.min, axis.max, target);
    if ticks.is_empty() { linspace(axis.min, axis.max, 2) } else { ticks }
}

fn to_rect(r: &RectI32) -> skia::Rect {
    skia::Rect::from_ltrb(r.left as f32, r.top as f32, r.right as f32, r.bottom as f32)
}

fn draw_grid(
    canvas: &skia::Canvas,
    plot: &RectI32,
    x: &Axis,
    y: &Axis,
    x_ticks: &[f64],
    y_ticks: &[f64],
    theme: &Theme,
) {
    let mut paint = skia::Paint::default();
    paint.set_color(theme.grid);
    paint.set_anti_alias(true);
    paint.set_stroke_width(1.0);

    let (l, t, r, b) = (plot.left as f32, plot.top as f32, plot.right as f32, plot.bottom as f32);
    // verticals
    for &v in x_ticks {
        let px = plot.map_x(v, x.min, x.max);
        canvas.draw_line((px, t), (px, b), &paint);
    }
    // horizontals
    for &v in y_ticks {
        let py = plot.map_y(v, y.min, y.max);
        canvas.draw_line((l, py), (r, py), &paint);
    }
}

fn draw_axes(
    canvas: &skia::Canvas,
    plot: &RectI32,
    x: &Axis,
    y: &Axis,
    x_ticks: &[f64],
    y_ticks: &[f64],
    theme: &Theme,
) {
    let mut axis_paint = skia::Paint::default();
    axis_paint.set_color(theme.axis_line);
    axis_paint.set_anti_alias(true);
    axis_paint.set_style(skia::paint::Style::Stroke);
    axis_paint.set_stroke_width(1.25);

    // Plot frame
    canvas.draw_rect(to_rect(plot), &axis_paint);

    // Outward tick marks
    let (l, b) = (plot.left as f32, plot.bottom as f32);
    for &v in x_ticks {
        let px = plot.map_x(v, x.min, x.max);
        canvas.draw_line((px, b), (px, b + 5.0), &axis_paint);
    }
    for &v in y_ticks {
        let py = plot.map_y(v, y.min, y.max);
        canvas.draw_line((l - 5.0, py), (l, py), &axis_paint);
    }
}

#[allow(clippy::too_many_arguments)]
fn draw_tick_labels(
    canvas: &skia::Canvas,
    text: &TextShaper,
    plot: &RectI32,
    x: &Axis,
    y: &Axis,
    x_ticks: &[f64],
    y_ticks: &[f64],
    theme: &Theme,
) {
    let x_step = nice_step(x.span(), X_TICK_TARGET);
    let y_step = nice_step(y.span(), Y_TICK_TARGET);
    let b = plot.bottom as f32;
    let l = plot.left as f32;
    for &v in x_ticks {
        let px = plot.map_x(v, x.min, x.max);
        text.draw_centered(canvas, &format_tick(v, x_step), px, b + 22.0, TICK_SIZE, theme.tick, true);
    }
    for &v in y_ticks {
        let py = plot.map_y(v, y.min, y.max);
        text.draw_right(canvas, &format_tick(v, y_step), l - 9.0, py + TICK_SIZE * 0.35, TICK_SIZE, theme.tick, true);
    }
}

fn draw_titles(
    canvas: &skia::Canvas,
    text: &TextShaper,
    plot: &RectI32,
    opts: &RenderOptions,
    title: &str,
    x: &Axis,
    y: &Axis,
) {
    let theme = &opts.theme;
    let cx = (plot.left + plot.right) as f32 * 0.5;
    let cy = (plot.top + plot.bottom) as f32 * 0.5;
    if !title.is_empty() {
        text.draw_centered(canvas, title, cx, plot.top as f32 - 20.0, TITLE_SIZE, theme.title, false);
    }
    if !x.label.is_empty() {
        text.draw_centered(canvas, &x.label, cx, opts.height as f32 - 16.0, LABEL_SIZE, theme.axis_label, false);
    }
    if !y.label.is_empty() {
        text.draw_vertical(canvas, &y.label, 20.0, cy, LABEL_SIZE, theme.axis_label);
    }
}

fn draw_line_series(
    canvas: &skia::Canvas,
    plot: &RectI32,
    x_axis: &Axis,
    y_axis: &Axis,
    series: &Series,
    color: skia::Color,
) {
    // Non-finite points break the line into separate runs.
    let mut path = skia::Path::new();
    let mut pen_down = false;
    let mut drawn = 0usize;
    for &(x, y) in &series.data_xy {
        if !x.is_finite() || !y.is_finite() {
            pen_down = false;
            continue;
        }
        let p = (plot.map_x(x, x_axis.min, x_axis.max), plot.map_y(y, y_axis.min, y_axis.max));
        if pen_down {
            path.line_to(p);
        } else {
            path.move_to(p);
            pen_down = true;
        }
        drawn += 1;
    }
    if drawn == 0 {
        return;
    }

    let mut stroke = skia::Paint::default();
    stroke.set_anti_alias(true);
    stroke.set_style(skia::paint::Style::Stroke);
    stroke.set_stroke_width(2.0);
    stroke.set_stroke_join(skia::paint::Join::Round);
    stroke.set_stroke_cap(skia::paint::Cap::Round);
    stroke.set_color(color);

    canvas.draw_path(&path, &stroke);
}

fn draw_legend(
    canvas: &skia::Canvas,
    text: Option<&TextShaper>,
    plot: &RectI32,
    series: &[Series],
    theme: &Theme,
) {
    if series.is_empty() {
        return;
    }
    const ROW: f32 = 20.0;
    const SWATCH: f32 = 24.0;
    const PAD: f32 = 8.0;

    let label_w = text
        .map(|t| series.iter().map(|s| t.measure_width(&s.label, LEGEND_SIZE, false)).fold(0.0f32, f32::max))
        .unwrap_or(0.0);
    let left = plot.left as f32 + 10.0;
    let top = plot.top as f32 + 10.0;
    let w = PAD * 3.0 + SWATCH + label_w;
    let h = PAD * 2.0 + ROW * series.len() as f32;
    let frame = skia::Rect::from_xywh(left, top, w, h);

    let mut fill = skia::Paint::default();
    fill.set_anti_alias(true);
    fill.set_style(skia::paint::Style::Fill);
    fill.set_color(theme.legend_fill);
    canvas.draw_rect(frame, &fill);

    let mut border = skia::Paint::default();
    border.set_anti_alias(true);
    border.set_style(skia::paint::Style::Stroke);
    border.set_stroke_width(1.0);
    border.set_color(theme.legend_border);
    canvas.draw_rect(frame, &border);

    let mut swatch = skia::Paint::default();
    swatch.set_anti_alias(true);
    swatch.set_stroke_width(2.0);

    for (i, s) in series.iter().enumerate() {
        let y_mid = top + PAD + ROW * (i as f32 + 0.5);
        swatch.set_color(theme.series_color(i));
        canvas.draw_line((left + PAD, y_mid), (left + PAD + SWATCH, y_mid), &swatch);
        if let Some(t) = text {
            t.draw_left(canvas, &s.label, left + PAD * 2.0 + SWATCH, y_mid + LEGEND_SIZE * 0.35, LEGEND_SIZE, theme.axis_label, false);
        }
    }
}
