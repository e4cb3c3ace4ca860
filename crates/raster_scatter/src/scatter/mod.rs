//! End-to-end scatter: validate configuration, sample, and build the point layer.
pub mod config;
pub mod events;
pub mod output;
pub mod runner;

/// Grid step multiplier used when none is configured.
pub const DEFAULT_RASTER_POINTS_PER_SAMPLE_WIDTH: f64 = 2.0;
