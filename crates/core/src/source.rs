//! Circular influence sources ("metaballs").

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::error::MetaballError;

/// Stable identity of a source inside a [`Metaverse`](crate::Metaverse):
/// its insertion index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SourceId(pub usize);

/// A moving circle that contributes `radius² / distance²` to the field.
///
/// Position and velocity are mutable; the radius is fixed at construction
/// and always finite and positive.
#[derive(Debug, Clone, PartialEq)]
pub struct Source {
    pub(crate) position: DVec2,
    radius: f64,
    pub(crate) velocity: DVec2,
}

impl Source {
    /// Creates a source.
    ///
    /// Returns `MetaballError::InvalidSource` if `radius` is not finite or
    /// not strictly positive.
    pub fn new(position: DVec2, radius: f64, velocity: DVec2) -> Result<Self, MetaballError> {
        if !radius.is_finite() || radius <= 0.0 {
            return Err(MetaballError::InvalidSource { radius });
        }
        Ok(Self {
            position,
            radius,
            velocity,
        })
    }

    /// Current position in world units.
    pub fn position(&self) -> DVec2 {
        self.position
    }

    /// Current velocity in world units per second.
    pub fn velocity(&self) -> DVec2 {
        self.velocity
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Overwrites the position. Used by the pointer override on the
    /// steerable source; kinematics writes through [`crate::kinematics::step`].
    pub fn set_position(&mut self, position: DVec2) {
        self.position = position;
    }
}
