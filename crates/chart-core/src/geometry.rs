// File: crates/chart-core/src/geometry.rs
// Summary: Lightweight geometry helpers for pixel math.

use crate::types::Insets;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RectI32 {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl RectI32 {
    pub const fn from_ltrb(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self { left, top, right, bottom }
    }
    pub const fn width(&self) -> i32 { self.right - self.left }
    pub const fn height(&self) -> i32 { self.bottom - self.top }

    /// Plot area left after removing `insets` from a `width` x `height` surface.
    /// Degenerate surfaces collapse to a 1px rect instead of inverting.
    pub fn inset(width: i32, height: i32, insets: &Insets) -> Self {
        let left = insets.left as i32;
        let top = insets.top as i32;
        let right = (width - insets.right as i32).max(left + 1);
        let bottom = (height - insets.bottom as i32).max(top + 1);
        Self::from_ltrb(left, top, right, bottom)
    }

    /// Map a world x in `[min, max]` to a pixel column inside the rect.
    #[inline]
    pub fn map_x(&self, x: f64, min: f64, max: f64) -> f32 {
        let span = (max - min).max(1e-9);
        self.left as f32 + ((x - min) / span) as f32 * self.width() as f32
    }

    /// Map a world y in `[min, max]` to a pixel row; larger values sit higher.
    #[inline]
    pub fn map_y(&self, y: f64, min: f64, max: f64) -> f32 {
        let span = (max - min).max(1e-9);
        self.bottom as f32 - ((y - min) / span) as f32 * self.height() as f32
    }
}
