//! Contour emission: the reduced marching-squares case table.
//!
//! Each classified cell yields at most one [`Segment`] joining two edge
//! midpoints. A mask and its complement share a segment. The two saddle
//! masks (`1001`, `0110`) and the uniform masks (`0000`, `1111`) yield
//! nothing, so saddle cells leave a visible gap in the contour.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::grid::{CellMask, CellTable};

/// A straight stroke between two points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub start: DVec2,
    pub end: DVec2,
}

impl Segment {
    pub fn new(start: DVec2, end: DVec2) -> Self {
        Self { start, end }
    }

    /// Midpoint of the two endpoints.
    pub fn midpoint(&self) -> DVec2 {
        (self.start + self.end) * 0.5
    }
}

/// Looks up the segment for one cell anchored at `anchor` with side `gap`.
pub fn segment_for_mask(mask: CellMask, anchor: DVec2, gap: f64) -> Option<Segment> {
    let half = gap / 2.0;
    let (x, y) = (anchor.x, anchor.y);
    let (start, end) = match mask.bits() {
        0b1000 | 0b0111 => ((x, y + half), (x + half, y)),
        0b0001 | 0b1110 => ((x + gap, y + half), (x + half, y + gap)),
        0b0010 | 0b1101 => ((x, y + half), (x + half, y + gap)),
        0b0100 | 0b1011 => ((x + half, y), (x + gap, y + half)),
        0b0101 | 0b1010 => ((x + half, y), (x + half, y + gap)),
        0b1100 | 0b0011 => ((x, y + half), (x + gap, y + half)),
        _ => return None,
    };
    Some(Segment::new(
        DVec2::new(start.0, start.1),
        DVec2::new(end.0, end.1),
    ))
}

/// Lazily maps every cell of `cells` to its segment, in table order.
pub fn segments(cells: &CellTable) -> impl Iterator<Item = Segment> + '_ {
    let gap = cells.gap();
    cells
        .iter()
        .filter_map(move |((col, row), mask)| segment_for_mask(mask, cells.anchor(col, row), gap))
}

/// Collects every segment of `cells`. Consecutive segments are not
/// guaranteed to share endpoints.
pub fn emit(cells: &CellTable) -> Vec<Segment> {
    segments(cells).collect()
}
