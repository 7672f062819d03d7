/// Pipeline call counters.
/// Incremented through `count_call!`/`count_add!`, which compile to nothing
/// unless the `profiling` feature is enabled.
use std::sync::atomic::{AtomicU64, Ordering};

macro_rules! define_counters {
    ($($(#[$doc:meta])* $name:ident),* $(,)?) => {
        /// Thread-safe counters for pipeline stages
        pub struct FunctionCounters {
            $($(#[$doc])* pub $name: AtomicU64,)*
        }

        impl FunctionCounters {
            pub const fn new() -> Self {
                Self { $($name: AtomicU64::new(0),)* }
            }

            /// Reset all counters to zero
            pub fn reset(&self) {
                $(self.$name.store(0, Ordering::Relaxed);)*
            }

            pub fn snapshot(&self) -> CounterSnapshot {
                CounterSnapshot { $($name: self.$name.load(Ordering::Relaxed),)* }
            }
        }

        /// Counter values at a point in time
        #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
        pub struct CounterSnapshot {
            $(pub $name: u64,)*
        }

        impl CounterSnapshot {
            /// Difference against an earlier snapshot. Counters reset in
            /// between read as zero.
            pub fn since(&self, earlier: &CounterSnapshot) -> CounterSnapshot {
                CounterSnapshot { $($name: self.$name.saturating_sub(earlier.$name),)* }
            }
        }
    };
}

define_counters! {
    // Projection
    faces_submitted,
    /// Faces dropped because a vertex failed projection.
    faces_rejected,
    lines_submitted,
    lines_rejected,

    // Clipping
    polygons_clipped_away,
    lines_clipped_away,

    // Rasterization
    polygons_filled,
    lines_plotted,
    total_pixels_tested,

    // Framebuffer
    set_pixel_attempts,
    set_pixel_depth_passed,
    set_pixel_depth_failed,
    framebuffer_clear_calls,
}

impl Default for FunctionCounters {
    fn default() -> Self {
        Self::new()
    }
}

impl CounterSnapshot {
    /// Depth-test pass rate in percent, if any pixel was attempted.
    pub fn depth_pass_rate(&self) -> Option<f64> {
        (self.set_pixel_attempts > 0)
            .then(|| self.set_pixel_depth_passed as f64 / self.set_pixel_attempts as f64 * 100.0)
    }

    /// Log a formatted report at info level
    pub fn log_report(&self) {
        log::info!(
            "faces: {} submitted, {} rejected, {} clipped away, {} filled",
            self.faces_submitted,
            self.faces_rejected,
            self.polygons_clipped_away,
            self.polygons_filled
        );
        log::info!(
            "lines: {} submitted, {} rejected, {} clipped away, {} plotted",
            self.lines_submitted,
            self.lines_rejected,
            self.lines_clipped_away,
            self.lines_plotted
        );
        log::info!(
            "pixels: {} tested, {} set attempts ({} passed, {} failed), {} clears",
            self.total_pixels_tested,
            self.set_pixel_attempts,
            self.set_pixel_depth_passed,
            self.set_pixel_depth_failed,
            self.framebuffer_clear_calls
        );
        if let Some(rate) = self.depth_pass_rate() {
            log::info!("depth test pass rate: {:.2}%", rate);
        }
    }
}

/// Global function counters instance
pub static FUNCTION_COUNTERS: FunctionCounters = FunctionCounters::new();

/// Increment a counter (only when profiling feature is enabled)
#[macro_export]
macro_rules! count_call {
    ($counter:expr) => {
        #[cfg(feature = "profiling")]
        {
            $counter.fetch_add(1, std::sync::atomic::Ordering::Relaxed);
        }
    };
}

/// Add to a counter (only when profiling feature is enabled)
#[macro_export]
macro_rules! count_add {
    ($counter:expr, $value:expr) => {
        #[cfg(feature = "profiling")]
        {
            $counter.fetch_add($value, std::sync::atomic::Ordering::Relaxed);
        }
    };
}
