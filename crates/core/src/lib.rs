#![deny(unsafe_code)]
//! Core types and algorithms for the metaballs renderer.
//!
//! Provides [`Source`] and its kinematics, the summed inverse-square
//! [`MetaField`], the reduced marching-squares pipeline (grid classification
//! into a sparse [`CellTable`] and contour emission into [`Segment`]s), the
//! [`Metaverse`] simulation that owns the sources, the serializable [`Scene`]
//! description, and the [`Surface`] drawing interface implemented by hosts.

pub mod contour;
pub mod error;
pub mod field;
pub mod geometry;
pub mod grid;
pub mod kinematics;
pub mod metaverse;
pub mod params;
pub mod scene;
pub mod source;
pub mod surface;

pub use contour::{emit, Segment};
pub use error::MetaballError;
pub use field::{build_field, MetaField, THRESHOLD};
pub use geometry::Bounds;
pub use grid::{classify, sample_points, CellMask, CellTable, PointMap};
pub use metaverse::Metaverse;
pub use scene::{Scene, SourceSpec};
pub use source::{Source, SourceId};
pub use surface::{Rgba, Surface};
