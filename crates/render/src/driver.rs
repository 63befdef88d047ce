//! The frame driver: one synchronous tick of the animation.
//!
//! A frame reads the surface bounds, applies the pointer override, steps the
//! kinematics, classifies the field, emits the contour, and strokes it. The
//! driver keeps its own clock (the sum of every supplied dt) and reports
//! timings to an injected [`FrameMetrics`].

use std::time::Instant;

use glam::DVec2;
use log::{debug, trace};
use metaballs_core::contour::emit;
use metaballs_core::error::MetaballError;
use metaballs_core::metaverse::Metaverse;
use metaballs_core::surface::{Rgba, Surface};
use serde::Serialize;

use crate::metrics::{FrameMetrics, NoopMetrics};

/// Radius of the debug sample-point dots.
const POINT_RADIUS: f64 = 2.0;

/// Host inputs for one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameInput {
    /// Milliseconds since the previous frame. Need not be constant.
    pub dt_ms: f64,
    /// Where the pointer is, if it should move the steerable source.
    pub pointer: Option<DVec2>,
}

impl FrameInput {
    pub fn new(dt_ms: f64) -> Self {
        Self {
            dt_ms,
            pointer: None,
        }
    }

    pub fn with_pointer(mut self, pointer: DVec2) -> Self {
        self.pointer = Some(pointer);
        self
    }
}

/// What a frame produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FrameReport {
    /// Zero-based frame index.
    pub frame: u64,
    /// Materialized cells in the classification table.
    pub cells: usize,
    /// Segments stroked.
    pub segments: usize,
    /// Wall time spent classifying, in microseconds.
    pub generate_micros: u64,
}

pub struct FrameDriver<M: FrameMetrics = NoopMetrics> {
    metaverse: Metaverse,
    metrics: M,
    frame: u64,
    clock_ms: f64,
    show_points: bool,
}

impl FrameDriver<NoopMetrics> {
    /// A driver that discards metrics.
    pub fn new(metaverse: Metaverse) -> Self {
        Self::with_metrics(metaverse, NoopMetrics)
    }
}

impl<M: FrameMetrics> FrameDriver<M> {
    pub fn with_metrics(metaverse: Metaverse, metrics: M) -> Self {
        Self {
            metaverse,
            metrics,
            frame: 0,
            clock_ms: 0.0,
            show_points: false,
        }
    }

    /// Also draw every lattice sample as a green (inside) or blue dot.
    pub fn with_points(mut self, show: bool) -> Self {
        self.show_points = show;
        self
    }

    pub fn metaverse(&self) -> &Metaverse {
        &self.metaverse
    }

    pub fn metrics(&self) -> &M {
        &self.metrics
    }

    /// Number of frames completed.
    pub fn frame_index(&self) -> u64 {
        self.frame
    }

    /// Sum of all dt supplied so far.
    pub fn clock_ms(&self) -> f64 {
        self.clock_ms
    }

    /// Runs one frame against `surface`.
    ///
    /// Classification errors fail the frame before the surface is touched
    /// and are returned to the caller; the frame counter does not advance.
    pub fn frame(
        &mut self,
        input: FrameInput,
        surface: &mut dyn Surface,
    ) -> Result<FrameReport, MetaballError> {
        self.metaverse.set_bounds(surface.bounds());

        if let Some(pointer) = input.pointer {
            if self.metaverse.steer(pointer) {
                debug!("pointer moved steerable source to ({}, {})", pointer.x, pointer.y);
            }
        }

        self.metaverse.advance(input.dt_ms);
        self.clock_ms += input.dt_ms;

        let started = Instant::now();
        let cells = self.metaverse.classify()?;
        let generate = started.elapsed();
        self.metrics.record_generate(generate);

        let segments = emit(&cells);

        surface.clear();
        surface.stroke_segments(&segments, Rgba::GREEN);

        if self.show_points {
            let points = self.metaverse.sample_points()?;
            for (position, inside) in points.iter() {
                let color = if inside { Rgba::GREEN } else { Rgba::BLUE };
                surface.fill_circle(position, POINT_RADIUS, color);
            }
        }

        self.metrics.record_frame(self.clock_ms);

        let report = FrameReport {
            frame: self.frame,
            cells: cells.len(),
            segments: segments.len(),
            generate_micros: u64::try_from(generate.as_micros()).unwrap_or(u64::MAX),
        };
        trace!(
            "frame {}: {} cells, {} segments",
            report.frame,
            report.cells,
            report.segments
        );
        self.frame += 1;
        Ok(report)
    }
}
