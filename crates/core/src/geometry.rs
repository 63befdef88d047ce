//! Canvas bounds shared by kinematics and grid sampling.

use serde::{Deserialize, Serialize};

use crate::error::MetaballError;

/// Width and height of the simulated canvas in world units.
///
/// Sources bounce inside `[0, width] x [0, height]` and the grid samples
/// `[0, width) x [0, height)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    width: f64,
    height: f64,
}

impl Bounds {
    /// Creates bounds, rejecting non-finite or non-positive dimensions.
    pub fn new(width: f64, height: f64) -> Result<Self, MetaballError> {
        let valid = |v: f64| v.is_finite() && v > 0.0;
        if !valid(width) || !valid(height) {
            return Err(MetaballError::InvalidDimensions { width, height });
        }
        Ok(Self { width, height })
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_accepts_positive_dimensions() {
        let b = Bounds::new(640.0, 480.0).unwrap();
        assert_eq!(b.width(), 640.0);
        assert_eq!(b.height(), 480.0);
    }

    #[test]
    fn new_rejects_zero_and_negative() {
        assert!(matches!(
            Bounds::new(0.0, 10.0),
            Err(MetaballError::InvalidDimensions { .. })
        ));
        assert!(Bounds::new(10.0, -1.0).is_err());
    }

    #[test]
    fn new_rejects_non_finite() {
        assert!(Bounds::new(f64::NAN, 10.0).is_err());
        assert!(Bounds::new(10.0, f64::INFINITY).is_err());
    }
}
