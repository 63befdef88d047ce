//! Serializable description of a starting configuration.
//!
//! A [`Scene`] holds everything needed to build a [`Metaverse`]: canvas
//! size, grid spacing, gravity, the ordered source list, and which source
//! (if any) follows the pointer.

use glam::DVec2;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::MetaballError;
use crate::geometry::Bounds;
use crate::metaverse::{Metaverse, DEFAULT_GAP};
use crate::params::{param_f64, param_usize};
use crate::source::{Source, SourceId};

/// Initial state of one source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceSpec {
    pub position: DVec2,
    pub radius: f64,
    pub velocity: DVec2,
}

impl SourceSpec {
    pub fn new(position: DVec2, radius: f64, velocity: DVec2) -> Self {
        Self {
            position,
            radius,
            velocity,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub width: f64,
    pub height: f64,
    pub gap: f64,
    pub gravity: DVec2,
    pub sources: Vec<SourceSpec>,
    #[serde(default)]
    pub steering: Option<usize>,
}

impl Scene {
    /// An empty scene with the default gap and no gravity.
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            gap: DEFAULT_GAP,
            gravity: DVec2::ZERO,
            sources: Vec::new(),
            steering: None,
        }
    }

    /// The stock 500x500 scene: seven sources launched from (100, 100) and
    /// a steerable one parked at (400, 400).
    pub fn demo() -> Self {
        let launch = DVec2::new(100.0, 100.0);
        let mut scene = Self::new(500.0, 500.0);
        scene.sources = [
            (40.0, 40.0, 100.0),
            (30.0, 6.0, 20.0),
            (15.0, 60.0, 28.0),
            (10.0, 40.0, 20.0),
            (23.0, 6.0, 50.0),
            (17.0, 60.0, 100.0),
            (60.0, 60.0, 20.0),
        ]
        .into_iter()
        .map(|(r, vx, vy)| SourceSpec::new(launch, r, DVec2::new(vx, vy)))
        .collect();
        scene
            .sources
            .push(SourceSpec::new(DVec2::new(400.0, 400.0), 30.0, DVec2::ZERO));
        scene.steering = Some(scene.sources.len() - 1);
        scene
    }

    /// Applies `gap`, `gravity_x`, `gravity_y` and `steering` overrides.
    /// Missing or mistyped keys leave the current value.
    pub fn with_params(mut self, params: &Value) -> Self {
        self.gap = param_f64(params, "gap", self.gap);
        self.gravity.x = param_f64(params, "gravity_x", self.gravity.x);
        self.gravity.y = param_f64(params, "gravity_y", self.gravity.y);
        if let Some(current) = self.steering {
            self.steering = Some(param_usize(params, "steering", current));
        } else if params.get("steering").is_some() {
            self.steering = Some(param_usize(params, "steering", 0));
        }
        self
    }

    /// Checks dimensions, gap, every radius and the steering index.
    pub fn validate(&self) -> Result<(), MetaballError> {
        self.build().map(|_| ())
    }

    /// Validates and builds the simulation.
    pub fn build(&self) -> Result<Metaverse, MetaballError> {
        let bounds = Bounds::new(self.width, self.height)?;
        let mut metaverse = Metaverse::new(bounds, self.gap, self.gravity)?;
        for spec in &self.sources {
            metaverse.add_source(Source::new(spec.position, spec.radius, spec.velocity)?);
        }
        if let Some(index) = self.steering {
            metaverse.set_steering(SourceId(index))?;
        }
        Ok(metaverse)
    }
}
