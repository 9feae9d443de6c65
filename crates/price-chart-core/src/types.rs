// File: crates/price-chart-core/src/types.rs
// Summary: Shared types and constants (default sizes, aspect ratio, paddings).

/// Default canvas width in pixels when the host gives none.
pub const WIDTH: u32 = 1024;
/// Default canvas height in pixels when the host gives none.
pub const HEIGHT: u32 = 512;
/// Width / height ratio used when a line chart keeps its aspect ratio.
pub const LINE_ASPECT_RATIO: f32 = 2.0;

/// Minimum screen margins around the plot area, in pixels.
/// Label areas grow past these when tick text needs more room.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Insets {
    pub left: u32,
    pub right: u32,
    pub top: u32,
    pub bottom: u32,
}

impl Insets {
    pub const fn new(left: u32, right: u32, top: u32, bottom: u32) -> Self {
        Self { left, right, top, bottom }
    }
    /// Total horizontal inset (left + right).
    pub const fn hsum(&self) -> u32 { self.left + self.right }
    /// Total vertical inset (top + bottom).
    pub const fn vsum(&self) -> u32 { self.top + self.bottom }
}

impl Default for Insets {
    fn default() -> Self {
        Self::new(64, 16, 16, 56)
    }
}
