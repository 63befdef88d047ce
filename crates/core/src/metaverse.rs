//! The simulation: an ordered collection of sources sharing gravity and bounds.
//!
//! [`Metaverse::advance`] is the only writer of source kinematics, with one
//! exception: [`Metaverse::steer`] lets the host overwrite the position of
//! the single designated steerable source (the pointer override). Both take
//! `&mut self`, so a multi-threaded host must serialize them anyway.

use glam::DVec2;
use serde_json::{json, Value};

use crate::contour::{emit, Segment};
use crate::error::MetaballError;
use crate::field::{MetaField, THRESHOLD};
use crate::geometry::Bounds;
use crate::grid::{classify, sample_points, CellTable, PointMap};
use crate::kinematics;
use crate::source::{Source, SourceId};

/// Default grid spacing in world units.
pub const DEFAULT_GAP: f64 = 1.0;

#[derive(Debug, Clone)]
pub struct Metaverse {
    sources: Vec<Source>,
    gravity: DVec2,
    bounds: Bounds,
    gap: f64,
    steering: Option<SourceId>,
}

fn check_gap(gap: f64) -> Result<f64, MetaballError> {
    if !gap.is_finite() || gap <= 0.0 {
        return Err(MetaballError::InvalidGrid { gap });
    }
    Ok(gap)
}

impl Metaverse {
    /// Creates an empty metaverse.
    ///
    /// Returns `MetaballError::InvalidGrid` if `gap` is not finite and positive.
    pub fn new(bounds: Bounds, gap: f64, gravity: DVec2) -> Result<Self, MetaballError> {
        Ok(Self {
            sources: Vec::new(),
            gravity,
            bounds,
            gap: check_gap(gap)?,
            steering: None,
        })
    }

    /// Appends a source and returns its identity.
    pub fn add_source(&mut self, source: Source) -> SourceId {
        self.sources.push(source);
        SourceId(self.sources.len() - 1)
    }

    pub fn sources(&self) -> &[Source] {
        &self.sources
    }

    pub fn source(&self, id: SourceId) -> Option<&Source> {
        self.sources.get(id.0)
    }

    /// Designates the source the pointer override may move.
    pub fn set_steering(&mut self, id: SourceId) -> Result<(), MetaballError> {
        if id.0 >= self.sources.len() {
            return Err(MetaballError::SteeringOutOfRange {
                index: id.0,
                len: self.sources.len(),
            });
        }
        self.steering = Some(id);
        Ok(())
    }

    pub fn steering(&self) -> Option<SourceId> {
        self.steering
    }

    /// Pointer override: moves the steerable source to `position`.
    ///
    /// This is the one write to source state outside [`Metaverse::advance`].
    /// Only the designated source can be moved this way.
    ///
    /// Returns `false` (and changes nothing) when no source is designated.
    /// Velocity is kept, so the source keeps integrating from the new spot.
    pub fn steer(&mut self, position: DVec2) -> bool {
        match self.steering.and_then(|id| self.sources.get_mut(id.0)) {
            Some(source) => {
                source.set_position(position);
                true
            }
            None => false,
        }
    }

    /// Steps every source by `dt_ms` milliseconds.
    pub fn advance(&mut self, dt_ms: f64) {
        let (gravity, bounds) = (self.gravity, self.bounds);
        for source in &mut self.sources {
            kinematics::step(source, dt_ms, gravity, bounds);
        }
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Replaces the bounds used by the next `advance` and `classify`.
    pub fn set_bounds(&mut self, bounds: Bounds) {
        self.bounds = bounds;
    }

    pub fn gravity(&self) -> DVec2 {
        self.gravity
    }

    pub fn set_gravity(&mut self, gravity: DVec2) {
        self.gravity = gravity;
    }

    pub fn gap(&self) -> f64 {
        self.gap
    }

    pub fn set_gap(&mut self, gap: f64) -> Result<(), MetaballError> {
        self.gap = check_gap(gap)?;
        Ok(())
    }

    /// Snapshot of the current field.
    pub fn field(&self) -> MetaField {
        MetaField::from_sources(&self.sources)
    }

    /// Classifies the current field over the current bounds.
    pub fn classify(&self) -> Result<CellTable, MetaballError> {
        let field = self.field();
        classify(
            |x, y| field.contains(x, y),
            self.gap,
            self.bounds.width(),
            self.bounds.height(),
        )
    }

    /// Samples the full lattice for the debug point overlay.
    pub fn sample_points(&self) -> Result<PointMap, MetaballError> {
        let field = self.field();
        sample_points(
            |x, y| field.contains(x, y),
            self.gap,
            self.bounds.width(),
            self.bounds.height(),
        )
    }

    /// Classifies and emits the current contour.
    pub fn contour(&self) -> Result<Vec<Segment>, MetaballError> {
        Ok(emit(&self.classify()?))
    }

    /// Current tunable values as a JSON object.
    pub fn params(&self) -> Value {
        json!({
            "gap": self.gap,
            "gravity_x": self.gravity.x,
            "gravity_y": self.gravity.y,
            "threshold": THRESHOLD,
            "sources": self.sources.len(),
        })
    }

    /// Schema of the parameters accepted as JSON overrides.
    pub fn param_schema() -> Value {
        json!({
            "gap": {
                "type": "number",
                "default": DEFAULT_GAP,
                "min": 0.0,
                "exclusive_min": true,
                "description": "Grid spacing in world units"
            },
            "gravity_x": {
                "type": "number",
                "default": 0.0,
                "description": "Horizontal acceleration in units/s²"
            },
            "gravity_y": {
                "type": "number",
                "default": 0.0,
                "description": "Vertical acceleration in units/s² (positive is down)"
            }
        })
    }
}
