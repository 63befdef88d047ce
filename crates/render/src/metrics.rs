//! Per-frame diagnostics owned by the frame driver.
//!
//! The core never records timing itself; the driver reports to a
//! [`FrameMetrics`] implementation it was given.

use std::collections::VecDeque;
use std::time::Duration;

use log::{debug, trace};

/// Default number of frames in the FPS window and generate-time chunk.
pub const DEFAULT_WINDOW: usize = 40;

/// FPS is recomputed on every frame index divisible by this.
const FPS_REFRESH_EVERY: u64 = 5;

/// Receives timing events from the frame driver.
pub trait FrameMetrics {
    /// Time spent sampling and classifying the grid for the current frame.
    fn record_generate(&mut self, elapsed: Duration);

    /// End of a frame. `clock_ms` is the driver clock (sum of all dt so far).
    fn record_frame(&mut self, clock_ms: f64);
}

/// Discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopMetrics;

impl FrameMetrics for NoopMetrics {
    fn record_generate(&mut self, _elapsed: Duration) {}

    fn record_frame(&mut self, _clock_ms: f64) {}
}

/// Rolling FPS over a window of frame timestamps plus chunked averaging of
/// the grid generate time.
///
/// Once more than `window` frames have been seen, every fifth frame
/// recomputes `fps = floor(window / (now - oldest) * 1000)`. The generate
/// time accumulates and is averaged over `window` whenever the frame index is
/// a multiple of `window - 1`, after which the accumulator resets.
#[derive(Debug, Clone)]
pub struct FpsCounter {
    window: u32,
    timestamps: VecDeque<f64>,
    frames: u64,
    fps: Option<u32>,
    generate_total: Duration,
    average_generate: Option<Duration>,
}

impl FpsCounter {
    /// Creates a counter. The window is clamped to `2..=u32::MAX`.
    pub fn new(window: usize) -> Self {
        let window = u32::try_from(window).unwrap_or(u32::MAX).max(2);
        Self {
            window,
            timestamps: VecDeque::with_capacity(window.min(DEFAULT_WINDOW as u32) as usize + 1),
            frames: 0,
            fps: None,
            generate_total: Duration::ZERO,
            average_generate: None,
        }
    }

    /// Latest FPS estimate, `None` until the window has filled.
    pub fn fps(&self) -> Option<u32> {
        self.fps
    }

    /// Latest averaged generate time.
    pub fn average_generate(&self) -> Option<Duration> {
        self.average_generate
    }

    /// Frames recorded so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl Default for FpsCounter {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW)
    }
}

impl FrameMetrics for FpsCounter {
    fn record_generate(&mut self, elapsed: Duration) {
        self.generate_total += elapsed;
        if self.frames % (u64::from(self.window) - 1) == 0 {
            let average = self.generate_total / self.window;
            debug!(
                "average generate time: {:.3}ms",
                average.as_secs_f64() * 1000.0
            );
            self.average_generate = Some(average);
            self.generate_total = Duration::ZERO;
        }
    }

    fn record_frame(&mut self, clock_ms: f64) {
        self.timestamps.push_back(clock_ms);
        if self.frames >= u64::from(self.window) {
            if let Some(oldest) = self.timestamps.pop_front() {
                let span = clock_ms - oldest;
                if self.frames % FPS_REFRESH_EVERY == 0 && span > 0.0 {
                    let fps = (f64::from(self.window) / span * 1000.0).floor() as u32;
                    trace!("frame {}: {fps} FPS", self.frames);
                    self.fps = Some(fps);
                }
            }
        }
        self.frames += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_frames(counter: &mut FpsCounter, count: usize, dt_ms: f64) {
        let start = counter.frames() as f64 * dt_ms;
        for i in 1..=count {
            counter.record_frame(start + i as f64 * dt_ms);
        }
    }

    #[test]
    fn fps_is_unknown_until_window_fills() {
        let mut counter = FpsCounter::default();
        run_frames(&mut counter, 40, 20.0);
        assert_eq!(counter.fps(), None);
        run_frames(&mut counter, 1, 20.0);
        assert_eq!(counter.fps(), Some(50));
    }

    #[test]
    fn fps_refreshes_every_fifth_frame() {
        let mut counter = FpsCounter::default();
        run_frames(&mut counter, 41, 20.0);
        assert_eq!(counter.fps(), Some(50));
        // Switch to 10ms frames; the estimate only moves on frames 45, 50, ...
        let mut clock = 41.0 * 20.0;
        for _ in 0..4 {
            clock += 10.0;
            counter.record_frame(clock);
        }
        assert_eq!(counter.fps(), Some(50));
        clock += 10.0;
        counter.record_frame(clock);
        assert!(counter.fps().unwrap() > 50);
    }

    #[test]
    fn zero_span_keeps_previous_estimate() {
        let mut counter = FpsCounter::new(2);
        for _ in 0..20 {
            counter.record_frame(0.0);
        }
        assert_eq!(counter.fps(), None);
    }

    #[test]
    fn generate_time_is_averaged_per_chunk() {
        let mut counter = FpsCounter::default();
        let per_frame = Duration::from_millis(4);

        counter.record_generate(per_frame);
        counter.record_frame(16.0);
        // Frame 0 flushes immediately.
        assert_eq!(counter.average_generate(), Some(Duration::from_micros(100)));

        for i in 1..=39 {
            counter.record_generate(per_frame);
            counter.record_frame(16.0 * (i + 1) as f64);
        }
        // Frames 1..=39 accumulated 156ms, flushed at frame 39 over 40.
        assert_eq!(counter.average_generate(), Some(Duration::from_micros(3900)));
    }

    #[test]
    fn tiny_windows_are_raised() {
        let mut counter = FpsCounter::new(0);
        counter.record_generate(Duration::from_millis(1));
        counter.record_frame(1.0);
        assert_eq!(counter.frames(), 1);
        assert!(counter.average_generate().is_some());
    }

    #[test]
    fn oversized_windows_are_capped_at_u32_max() {
        let mut counter = FpsCounter::new(usize::MAX);
        counter.record_generate(Duration::from_secs(8));
        counter.record_frame(1.0);
        assert_eq!(
            counter.average_generate(),
            Some(Duration::from_secs(8) / u32::MAX)
        );
        assert_eq!(counter.fps(), None);
    }

    #[test]
    fn noop_metrics_accepts_everything() {
        let mut m = NoopMetrics;
        m.record_generate(Duration::from_secs(1));
        m.record_frame(1.0);
    }
}
