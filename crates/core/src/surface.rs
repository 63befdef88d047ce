//! The drawing interface a host provides to the frame driver.
//!
//! Implementations live outside the core (raster, SVG, a browser canvas).

use glam::DVec2;

use crate::contour::Segment;
use crate::geometry::Bounds;

/// An 8-bit RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const TRANSPARENT: Rgba = Rgba::new(0, 0, 0, 0);
    /// CSS `green`, used for the contour and inside samples.
    pub const GREEN: Rgba = Rgba::new(0, 128, 0, 255);
    /// CSS `blue`, used for outside samples.
    pub const BLUE: Rgba = Rgba::new(0, 0, 255, 255);
    pub const WHITE: Rgba = Rgba::new(255, 255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// `#rrggbb`, ignoring alpha.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// A 2D drawing target.
///
/// This trait is object-safe; the frame driver takes `&mut dyn Surface`.
pub trait Surface {
    /// Current drawable area. Read once per frame.
    fn bounds(&self) -> Bounds;

    /// Erases everything drawn so far.
    fn clear(&mut self);

    /// Strokes every segment as an independent move-to/line-to pair of one path.
    fn stroke_segments(&mut self, segments: &[Segment], color: Rgba);

    /// Fills a disc.
    fn fill_circle(&mut self, center: DVec2, radius: f64, color: Rgba);
}
