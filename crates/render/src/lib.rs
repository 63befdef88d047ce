#![deny(unsafe_code)]
//! Frame driving and drawing surfaces for the metaballs renderer.
//!
//! [`FrameDriver`] runs the per-frame pipeline from `metaballs-core`
//! against any [`Surface`](metaballs_core::Surface). This crate provides a
//! CPU [`RasterSurface`] (with PNG output behind the `png` feature), an
//! [`SvgSurface`], and [`FpsCounter`] metrics.

pub mod driver;
pub mod metrics;
pub mod raster;
pub mod svg;

#[cfg(feature = "png")]
pub mod snapshot;

pub use driver::{FrameDriver, FrameInput, FrameReport};
pub use metrics::{FpsCounter, FrameMetrics, NoopMetrics};
pub use raster::RasterSurface;
pub use svg::SvgSurface;
