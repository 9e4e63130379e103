// File: crates/chart-core/src/theme.rs
// Summary: Chart colours (background, grid, text, legend) and the series palette.

use skia_safe as skia;

#[derive(Clone, Copy, Debug)]
pub struct Theme {
    pub background: skia::Color,
    pub grid: skia::Color,
    pub axis_line: skia::Color,
    pub axis_label: skia::Color,
    pub tick: skia::Color,
    pub title: skia::Color,
    pub legend_fill: skia::Color,
    pub legend_border: skia::Color,
    /// Series stroke colours, cycled in draw order.
    pub palette: [skia::Color; 6],
}

impl Theme {
    pub fn light() -> Self {
        Self {
            background: skia::Color::from_argb(255, 255, 255, 255),
            grid: skia::Color::from_argb(255, 222, 222, 226),
            axis_line: skia::Color::from_argb(255, 40, 40, 48),
            axis_label: skia::Color::from_argb(255, 20, 20, 30),
            tick: skia::Color::from_argb(255, 70, 70, 80),
            title: skia::Color::from_argb(255, 10, 10, 20),
            legend_fill: skia::Color::from_argb(220, 255, 255, 255),
            legend_border: skia::Color::from_argb(255, 200, 200, 205),
            palette: [
                skia::Color::from_argb(255, 0x1f, 0x77, 0xb4), // blue
                skia::Color::from_argb(255, 0xff, 0x7f, 0x0e), // orange
                skia::Color::from_argb(255, 0x2c, 0xa0, 0x2c), // green
                skia::Color::from_argb(255, 0xd6, 0x27, 0x28), // red
                skia::Color::from_argb(255, 0x94, 0x67, 0xbd), // purple
                skia::Color::from_argb(255, 0x8c, 0x56, 0x4b), // brown
            ],
        }
    }

    /// Colour for the series at `index` in draw order.
    pub fn series_color(&self, index: usize) -> skia::Color {
        self.palette[index % self.palette.len()]
    }
}

impl Default for Theme {
    fn default() -> Self { Theme::light() }
}
