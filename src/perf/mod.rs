/// Performance measurement utilities
/// Stage timers log through `log` at trace level; frame statistics are
/// summarized periodically at debug level.
pub mod profiling;

pub use profiling::{CounterSnapshot, FunctionCounters, FUNCTION_COUNTERS};

use std::time::{Duration, Instant};

pub struct PerfTimer {
    name: &'static str,
    start: Instant,
}

impl PerfTimer {
    #[inline]
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            start: Instant::now(),
        }
    }

    #[inline]
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

impl Drop for PerfTimer {
    fn drop(&mut self) {
        log::trace!("{}: {}μs", self.name, self.elapsed().as_micros());
    }
}

/// Rolling frame-time accumulator
#[derive(Debug, Clone)]
pub struct FrameStats {
    report_every: u32,
    frames: u32,
    total: Duration,
    worst: Duration,
}

impl FrameStats {
    pub fn new(report_every: u32) -> Self {
        Self {
            report_every: report_every.max(1),
            frames: 0,
            total: Duration::ZERO,
            worst: Duration::ZERO,
        }
    }

    /// Record one frame. Returns the average frame time once per reporting
    /// window and starts a new window.
    pub fn record(&mut self, frame: Duration) -> Option<Duration> {
        self.frames += 1;
        self.total += frame;
        self.worst = self.worst.max(frame);
        if self.frames < self.report_every {
            return None;
        }

        let average = self.total / self.frames;
        log::debug!(
            "frame avg {:.2}ms ({:.1} fps), worst {:.2}ms over {} frames",
            average.as_secs_f64() * 1000.0,
            1.0 / average.as_secs_f64().max(f64::EPSILON),
            self.worst.as_secs_f64() * 1000.0,
            self.frames
        );
        self.frames = 0;
        self.total = Duration::ZERO;
        self.worst = Duration::ZERO;
        Some(average)
    }
}

/// Time the rest of the enclosing scope
#[macro_export]
macro_rules! perf_scope {
    ($name:expr) => {
        let _timer = $crate::perf::PerfTimer::new($name);
    };
}
