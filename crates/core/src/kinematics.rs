//! Explicit Euler integration of a source under gravity with reflective walls.
//!
//! Each axis is checked independently. On a wall hit the velocity component
//! is negated and the position clamped to `[radius, bound - radius]`.
//!
//! The horizontal hit test compares `x + radius` against the canvas
//! **height**, while the horizontal clamp uses the width. This mirrors the
//! behavior the renderer has always had. On a wide canvas a source turns
//! around at `x = height - radius`, short of the right edge. On a tall canvas
//! the right wall is never detected, so a source drifts past `width - radius`
//! and off the canvas until it reaches `height - radius`. Only square
//! canvases keep `radius <= x <= width - radius`; see DESIGN.md.

use glam::DVec2;

use crate::geometry::Bounds;
use crate::source::Source;

/// Advances `source` by `dt_ms` milliseconds.
///
/// `velocity += gravity * dt`, then `position += velocity * dt` (semi-implicit
/// order), then per-axis reflection. Never fails; variable `dt_ms` is fine.
pub fn step(source: &mut Source, dt_ms: f64, gravity: DVec2, bounds: Bounds) {
    let dt = dt_ms / 1000.0;
    let radius = source.radius();

    source.velocity += gravity * dt;
    source.position += source.velocity * dt;

    let (width, height) = (bounds.width(), bounds.height());

    let y = source.position.y;
    if y + radius > height || y - radius < 0.0 {
        source.velocity.y = -source.velocity.y;
        source.position.y = y.max(radius).min(height - radius);
    }

    let x = source.position.x;
    if x + radius > height || x - radius < 0.0 {
        source.velocity.x = -source.velocity.x;
        source.position.x = x.max(radius).min(width - radius);
    }
}
