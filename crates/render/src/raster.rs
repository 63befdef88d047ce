//! CPU raster surface: an RGBA8 pixel buffer the frame driver can draw into.
//!
//! Always available (no feature gate) so the PNG snapshot path and any other
//! byte-buffer consumer share the same rasterization.

use glam::DVec2;
use metaballs_core::contour::Segment;
use metaballs_core::error::MetaballError;
use metaballs_core::geometry::Bounds;
use metaballs_core::surface::{Rgba, Surface};

/// A `width * height` RGBA8 buffer in row-major order.
///
/// Segments are rasterized with a DDA walk, one pixel per step along the
/// major axis; circles fill every pixel whose center lies inside the radius.
/// Drawing overwrites pixels, there is no blending.
#[derive(Debug, Clone)]
pub struct RasterSurface {
    width: usize,
    height: usize,
    bounds: Bounds,
    background: Rgba,
    pixels: Vec<u8>,
}

impl RasterSurface {
    /// Creates a surface cleared to transparent.
    ///
    /// Returns `MetaballError::InvalidDimensions` if either dimension is zero
    /// or the buffer size overflows `usize`.
    pub fn new(width: usize, height: usize) -> Result<Self, MetaballError> {
        let invalid = || MetaballError::InvalidDimensions {
            width: width as f64,
            height: height as f64,
        };
        if width == 0 || height == 0 {
            return Err(invalid());
        }
        let len = width
            .checked_mul(height)
            .and_then(|n| n.checked_mul(4))
            .ok_or_else(invalid)?;
        let bounds = Bounds::new(width as f64, height as f64)?;
        let background = Rgba::TRANSPARENT;
        let mut surface = Self {
            width,
            height,
            bounds,
            background,
            pixels: vec![0; len],
        };
        surface.clear();
        Ok(surface)
    }

    /// Uses `color` for every subsequent `clear`, and clears now.
    pub fn with_background(mut self, color: Rgba) -> Self {
        self.background = color;
        self.clear();
        self
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Row-major RGBA8 bytes, `width * height * 4` long.
    pub fn data(&self) -> &[u8] {
        &self.pixels
    }

    /// Color at pixel `(x, y)`, or `None` outside the buffer.
    pub fn pixel(&self, x: usize, y: usize) -> Option<Rgba> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y * self.width + x) * 4;
        let p = &self.pixels[i..i + 4];
        Some(Rgba::new(p[0], p[1], p[2], p[3]))
    }

    /// Number of pixels currently equal to `color`.
    pub fn count(&self, color: Rgba) -> usize {
        self.pixels
            .chunks_exact(4)
            .filter(|p| **p == [color.r, color.g, color.b, color.a])
            .count()
    }

    fn plot(&mut self, x: f64, y: f64, color: Rgba) {
        if !(x >= 0.0 && y >= 0.0) {
            return;
        }
        let (xi, yi) = (x as usize, y as usize);
        if xi >= self.width || yi >= self.height {
            return;
        }
        let i = (yi * self.width + xi) * 4;
        self.pixels[i..i + 4].copy_from_slice(&[color.r, color.g, color.b, color.a]);
    }

    fn line(&mut self, start: DVec2, end: DVec2, color: Rgba) {
        let delta = end - start;
        let steps = delta.x.abs().max(delta.y.abs()).ceil();
        if !steps.is_finite() {
            return;
        }
        let steps = steps.max(1.0) as usize;
        for i in 0..=steps {
            let p = start + delta * (i as f64 / steps as f64);
            self.plot(p.x.floor(), p.y.floor(), color);
        }
    }
}

impl Surface for RasterSurface {
    fn bounds(&self) -> Bounds {
        self.bounds
    }

    fn clear(&mut self) {
        let bg = self.background;
        for p in self.pixels.chunks_exact_mut(4) {
            p.copy_from_slice(&[bg.r, bg.g, bg.b, bg.a]);
        }
    }

    fn stroke_segments(&mut self, segments: &[Segment], color: Rgba) {
        for seg in segments {
            self.line(seg.start, seg.end, color);
        }
    }

    fn fill_circle(&mut self, center: DVec2, radius: f64, color: Rgba) {
        if !(radius > 0.0) || !center.is_finite() {
            return;
        }
        let x0 = (center.x - radius).floor().max(0.0);
        let y0 = (center.y - radius).floor().max(0.0);
        let x1 = (center.x + radius).ceil().min(self.width as f64);
        let y1 = (center.y + radius).ceil().min(self.height as f64);
        let r2 = radius * radius;
        let mut y = y0;
        while y < y1 {
            let mut x = x0;
            while x < x1 {
                let d = DVec2::new(x + 0.5, y + 0.5) - center;
                if d.length_squared() <= r2 {
                    self.plot(x, y, color);
                }
                x += 1.0;
            }
            y += 1.0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_has_expected_buffer_length() {
        let s = RasterSurface::new(8, 4).unwrap();
        assert_eq!(s.data().len(), 8 * 4 * 4);
        assert_eq!(s.bounds().width(), 8.0);
        assert_eq!(s.bounds().height(), 4.0);
    }

    #[test]
    fn new_rejects_zero_and_overflowing_dimensions() {
        assert!(RasterSurface::new(0, 4).is_err());
        assert!(RasterSurface::new(4, 0).is_err());
        assert!(RasterSurface::new(usize::MAX, 2).is_err());
    }

    #[test]
    fn clear_paints_background() {
        let mut s = RasterSurface::new(4, 4).unwrap().with_background(Rgba::WHITE);
        assert_eq!(s.count(Rgba::WHITE), 16);
        s.stroke_segments(
            &[Segment::new(DVec2::new(0.0, 0.0), DVec2::new(3.0, 0.0))],
            Rgba::GREEN,
        );
        assert!(s.count(Rgba::GREEN) > 0);
        s.clear();
        assert_eq!(s.count(Rgba::WHITE), 16);
    }

    #[test]
    fn horizontal_segment_covers_its_row() {
        let mut s = RasterSurface::new(10, 10).unwrap();
        s.stroke_segments(
            &[Segment::new(DVec2::new(1.0, 5.5), DVec2::new(8.0, 5.5))],
            Rgba::GREEN,
        );
        for x in 1..=8 {
            assert_eq!(s.pixel(x, 5), Some(Rgba::GREEN), "pixel ({x}, 5)");
        }
        assert_eq!(s.pixel(0, 5), Some(Rgba::TRANSPARENT));
        assert_eq!(s.pixel(9, 5), Some(Rgba::TRANSPARENT));
        assert_eq!(s.count(Rgba::GREEN), 8);
    }

    #[test]
    fn diagonal_segment_has_no_gaps() {
        let mut s = RasterSurface::new(10, 10).unwrap();
        s.stroke_segments(
            &[Segment::new(DVec2::new(0.5, 0.5), DVec2::new(9.5, 9.5))],
            Rgba::BLUE,
        );
        for i in 0..10 {
            assert_eq!(s.pixel(i, i), Some(Rgba::BLUE));
        }
    }

    #[test]
    fn out_of_range_drawing_is_clipped() {
        let mut s = RasterSurface::new(5, 5).unwrap();
        s.stroke_segments(
            &[Segment::new(DVec2::new(-10.0, 2.5), DVec2::new(20.0, 2.5))],
            Rgba::GREEN,
        );
        s.fill_circle(DVec2::new(100.0, 100.0), 3.0, Rgba::BLUE);
        assert_eq!(s.count(Rgba::GREEN), 5);
        assert_eq!(s.count(Rgba::BLUE), 0);
    }

    #[test]
    fn fill_circle_covers_center_not_corners() {
        let mut s = RasterSurface::new(20, 20).unwrap();
        s.fill_circle(DVec2::new(10.0, 10.0), 4.0, Rgba::GREEN);
        assert_eq!(s.pixel(10, 10), Some(Rgba::GREEN));
        assert_eq!(s.pixel(9, 9), Some(Rgba::GREEN));
        assert_eq!(s.pixel(0, 0), Some(Rgba::TRANSPARENT));
        assert_eq!(s.pixel(13, 13), Some(Rgba::TRANSPARENT));
        let area = s.count(Rgba::GREEN) as f64;
        let expected = std::f64::consts::PI * 16.0;
        assert!((area - expected).abs() < expected * 0.25, "area {area}");
    }

    #[test]
    fn pixel_outside_buffer_is_none() {
        let s = RasterSurface::new(3, 3).unwrap();
        assert_eq!(s.pixel(3, 0), None);
        assert_eq!(s.pixel(0, 3), None);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn coord() -> impl Strategy<Value = f64> {
            -200.0_f64..200.0
        }

        proptest! {
            #[test]
            fn arbitrary_drawing_never_panics(
                x0 in coord(), y0 in coord(), x1 in coord(), y1 in coord(),
                r in 0.0_f64..50.0,
            ) {
                let mut s = RasterSurface::new(64, 48).unwrap();
                s.stroke_segments(
                    &[Segment::new(DVec2::new(x0, y0), DVec2::new(x1, y1))],
                    Rgba::GREEN,
                );
                s.fill_circle(DVec2::new(x0, y1), r, Rgba::BLUE);
                prop_assert_eq!(s.data().len(), 64 * 48 * 4);
            }
        }
    }
}
