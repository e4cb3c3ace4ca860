//! Raster-driven point sampling.
//!
//! [`GridSampler`] walks a regular grid over each polygon, looks up the raster
//! under every grid node, and places jittered points at the rate given by the
//! matching [`crate::density::DensityRange`]. The random helpers here are
//! shared by the sampler and its tests.
use rand::RngCore;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub mod grid;

pub use grid::{cell_size_for, GridSampler, SampleOutput};

/// Upper bound on the estimated grid cells of a single polygon.
pub const DEFAULT_MAX_ESTIMATED_CELLS: f64 = 1_000_000.0;
/// Extra iterations allowed beyond the estimate before a polygon walk stops.
pub const DEFAULT_ITERATION_SLACK: usize = 1_000;
/// Largest point count a single grid node may request.
pub const DEFAULT_MAX_POINTS_PER_CELL: usize = 10_000;

/// Cost guards applied by [`GridSampler`].
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SamplerLimits {
    /// Polygons whose estimated cell count exceeds this are skipped.
    pub max_estimated_cells: f64,
    /// Iteration cap per polygon is `trunc(estimated_cells) + iteration_slack`.
    pub iteration_slack: usize,
    /// Nodes whose truncated point count exceeds this are skipped.
    pub max_points_per_cell: usize,
}

impl Default for SamplerLimits {
    fn default() -> Self {
        Self {
            max_estimated_cells: DEFAULT_MAX_ESTIMATED_CELLS,
            iteration_slack: DEFAULT_ITERATION_SLACK,
            max_points_per_cell: DEFAULT_MAX_POINTS_PER_CELL,
        }
    }
}

/// Counters collected while sampling.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SampleStats {
    /// Grid nodes visited, inside or outside the polygon.
    pub nodes_visited: usize,
    /// Visited nodes that fell inside their polygon.
    pub nodes_inside: usize,
    /// Nodes dropped because the coordinate transform failed.
    pub nodes_transform_failed: usize,
    /// Nodes dropped because the raster had no value there.
    pub nodes_without_value: usize,
    /// Nodes whose value matched no density range.
    pub nodes_unmatched: usize,
    /// Nodes whose point count was outside the allowed range.
    pub nodes_over_limit: usize,
    /// Jittered points discarded for falling outside the polygon.
    pub points_rejected: usize,
    /// Polygons skipped entirely (empty, degenerate, or too large).
    pub polygons_skipped: usize,
    /// Polygons whose walk hit the iteration cap.
    pub polygons_truncated: usize,
}

impl SampleStats {
    /// Add the counters of `other` to `self`.
    pub fn merge(&mut self, other: &SampleStats) {
        self.nodes_visited += other.nodes_visited;
        self.nodes_inside += other.nodes_inside;
        self.nodes_transform_failed += other.nodes_transform_failed;
        self.nodes_without_value += other.nodes_without_value;
        self.nodes_unmatched += other.nodes_unmatched;
        self.nodes_over_limit += other.nodes_over_limit;
        self.points_rejected += other.points_rejected;
        self.polygons_skipped += other.polygons_skipped;
        self.polygons_truncated += other.polygons_truncated;
    }
}

/// Generate a random float in the range [0, 1).
#[inline]
pub(crate) fn rand01(rng: &mut dyn RngCore) -> f64 {
    (rng.next_u64() >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
}

/// Uniform offset in `[-half_extent, half_extent)`.
#[inline]
pub(crate) fn jitter(rng: &mut dyn RngCore, half_extent: f64) -> f64 {
    (rand01(rng) * 2.0 - 1.0) * half_extent
}

/// Bernoulli trial used for fractional densities.
///
/// `probability <= 0` (or NaN) never places and `probability >= 1` always
/// places, without consuming randomness. Anything in between succeeds with
/// that probability.
#[inline]
pub fn should_place(probability: f64, rng: &mut dyn RngCore) -> bool {
    if probability.is_nan() || probability <= 0.0 {
        return false;
    }
    if probability >= 1.0 {
        return true;
    }
    rand01(rng) < probability
}
