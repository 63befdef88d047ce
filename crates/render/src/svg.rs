//! Vector surface that accumulates SVG markup.
//!
//! The contour of a frame becomes one `<path>` made of independent
//! move-to/line-to pairs; filled circles become `<circle>` elements.

use std::fmt::Write as _;
use std::path::Path;

use glam::DVec2;
use log::info;
use metaballs_core::contour::Segment;
use metaballs_core::error::MetaballError;
use metaballs_core::geometry::Bounds;
use metaballs_core::surface::{Rgba, Surface};

#[derive(Debug, Clone)]
pub struct SvgSurface {
    bounds: Bounds,
    body: String,
}

impl SvgSurface {
    pub fn new(bounds: Bounds) -> Self {
        Self {
            bounds,
            body: String::new(),
        }
    }

    /// Number of elements drawn since the last clear.
    pub fn element_count(&self) -> usize {
        self.body.lines().count()
    }

    /// The complete document.
    pub fn to_svg(&self) -> String {
        let (w, h) = (self.bounds.width(), self.bounds.height());
        format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<svg width="{w}" height="{h}" viewBox="0 0 {w} {h}" xmlns="http://www.w3.org/2000/svg">
{}</svg>
"#,
            self.body
        )
    }

    /// Writes the document to `path`.
    pub fn save(&self, path: &Path) -> Result<(), MetaballError> {
        std::fs::write(path, self.to_svg()).map_err(|e| MetaballError::Io(e.to_string()))?;
        info!("wrote SVG to {}", path.display());
        Ok(())
    }
}

fn opacity_attr(name: &str, color: Rgba) -> String {
    if color.a == 255 {
        String::new()
    } else {
        format!(r#" {name}="{:.3}""#, f64::from(color.a) / 255.0)
    }
}

impl Surface for SvgSurface {
    fn bounds(&self) -> Bounds {
        self.bounds
    }

    fn clear(&mut self) {
        self.body.clear();
    }

    fn stroke_segments(&mut self, segments: &[Segment], color: Rgba) {
        if segments.is_empty() {
            return;
        }
        let mut d = String::new();
        for seg in segments {
            let _ = write!(
                d,
                "M{:.3} {:.3}L{:.3} {:.3}",
                seg.start.x, seg.start.y, seg.end.x, seg.end.y
            );
        }
        let _ = writeln!(
            self.body,
            r#"  <path d="{d}" fill="none" stroke="{}" stroke-width="1"{} />"#,
            color.to_hex(),
            opacity_attr("stroke-opacity", color)
        );
    }

    fn fill_circle(&mut self, center: DVec2, radius: f64, color: Rgba) {
        let _ = writeln!(
            self.body,
            r#"  <circle cx="{:.3}" cy="{:.3}" r="{:.3}" fill="{}"{} />"#,
            center.x,
            center.y,
            radius,
            color.to_hex(),
            opacity_attr("fill-opacity", color)
        );
    }
}
