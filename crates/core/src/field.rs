//! The summed inverse-square field of a set of sources.
//!
//! `field(x, y) = Σ rᵢ² / ((x − ⌊cxᵢ⌋)² + (y − ⌊cyᵢ⌋)²)`
//!
//! Centers are floored to whole units before use, so a source's contour
//! moves in 1-unit steps even when its position changes smoothly. A query
//! point sitting exactly on a floored center divides by zero, which IEEE-754
//! turns into `+inf`; the predicate is then `true`.

use glam::DVec2;

use crate::source::Source;

/// The field level separating inside from outside.
pub const THRESHOLD: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq)]
struct Term {
    center: DVec2,
    radius_sq: f64,
}

/// Immutable snapshot of every source's floored center and squared radius.
///
/// Built once per frame; later changes to the sources do not affect it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetaField {
    terms: Vec<Term>,
}

impl MetaField {
    /// Snapshots the current state of `sources`.
    pub fn from_sources(sources: &[Source]) -> Self {
        let terms = sources
            .iter()
            .map(|s| Term {
                center: s.position().floor(),
                radius_sq: s.radius() * s.radius(),
            })
            .collect();
        Self { terms }
    }

    /// Number of contributing sources.
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Summed field value at `(x, y)`. `0.0` with no sources, `+inf` on a center.
    pub fn value(&self, x: f64, y: f64) -> f64 {
        self.terms
            .iter()
            .map(|t| {
                let dx = x - t.center.x;
                let dy = y - t.center.y;
                t.radius_sq / (dx * dx + dy * dy)
            })
            .sum()
    }

    /// `true` iff the field strictly exceeds [`THRESHOLD`] at `(x, y)`.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        self.value(x, y) > THRESHOLD
    }
}

/// Builds the inside/outside predicate for the current sources.
///
/// The returned closure owns a [`MetaField`] snapshot and can be evaluated
/// any number of times.
pub fn build_field(sources: &[Source]) -> impl Fn(f64, f64) -> bool + Clone {
    let field = MetaField::from_sources(sources);
    move |x, y| field.contains(x, y)
}
