//! Rectangular hit testing and menu row layout
//!
//! Every menu-bearing screen hit-tests tap locations against named row
//! regions. Containment is inclusive on all four edges: a point exactly on a
//! boundary counts as a hit.

use glam::Vec2;

/// An axis-aligned rectangular region
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Region {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Region {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// Closed-rectangle containment: boundary points are hits
    pub fn contains(&self, pt: Vec2) -> bool {
        pt.x >= self.x
            && pt.x <= self.x + self.width
            && pt.y >= self.y
            && pt.y <= self.y + self.height
    }

}

/// Vertical stack of equally-spaced full-width row bands
///
/// Menus position rows by index from a fixed first-row baseline. The hit band
/// may start above the baseline (text is drawn centered on the baseline).
#[derive(Debug, Clone, Copy)]
pub struct RowLayout {
    /// Baseline y of row 0
    pub first_y: f32,
    /// Distance between consecutive row baselines
    pub spacing: f32,
    /// Hit band height
    pub band_height: f32,
    /// Hit band starts this far above the baseline
    pub band_bias: f32,
    /// Row width (rows span the full menu width from x = 0)
    pub width: f32,
}

impl RowLayout {
    /// Hit region for the row at `index`
    pub fn row(&self, index: usize) -> Region {
        Region::new(
            0.0,
            self.first_y + self.spacing * index as f32 - self.band_bias,
            self.width,
            self.band_height,
        )
    }

    /// Hit region for a row at an explicit baseline (second row groups)
    pub fn row_at(&self, baseline_y: f32) -> Region {
        Region::new(0.0, baseline_y - self.band_bias, self.width, self.band_height)
    }
}
