//! User-facing run configuration.
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::density::{DensityRange, DensityRanges};
use crate::error::{Error, Result};
use crate::sampling::SamplerLimits;
use crate::scatter::DEFAULT_RASTER_POINTS_PER_SAMPLE_WIDTH;

/// Configuration for a scatter run.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[non_exhaustive]
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Grid step as a multiple of the raster's native pixel size. Must be > 0.
    pub raster_points_per_sample_width: f64,
    /// Ordered density ranges; the first range containing a value wins.
    pub ranges: Vec<DensityRange>,
    /// Cost guards for the grid walk.
    #[cfg_attr(feature = "serde", serde(default))]
    pub limits: SamplerLimits,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            raster_points_per_sample_width: DEFAULT_RASTER_POINTS_PER_SAMPLE_WIDTH,
            ranges: Vec::new(),
            limits: SamplerLimits::default(),
        }
    }
}

impl RunConfig {
    /// Creates a new [`RunConfig`] with the given density ranges.
    pub fn new(ranges: Vec<DensityRange>) -> Self {
        Self {
            ranges,
            ..Default::default()
        }
    }

    /// Sets the grid step multiplier.
    pub fn with_raster_points_per_sample_width(mut self, width: f64) -> Self {
        self.raster_points_per_sample_width = width;
        self
    }

    /// Appends a density range.
    pub fn with_range(mut self, range: DensityRange) -> Self {
        self.ranges.push(range);
        self
    }

    /// Sets the cost guards.
    pub fn with_limits(mut self, limits: SamplerLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Validates the configuration, returning the checked density ranges.
    pub fn validate(&self) -> Result<DensityRanges> {
        let width = self.raster_points_per_sample_width;
        if !(width.is_finite() && width > 0.0) {
            return Err(Error::InvalidConfig(
                "raster_points_per_sample_width must be > 0".into(),
            ));
        }
        let cells = self.limits.max_estimated_cells;
        if !(cells.is_finite() && cells > 0.0) {
            return Err(Error::InvalidConfig(
                "max_estimated_cells must be finite and > 0".into(),
            ));
        }
        DensityRanges::new(self.ranges.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_width_is_two() {
        let config = RunConfig::default();
        assert_eq!(config.raster_points_per_sample_width, 2.0);
        assert!(config.ranges.is_empty());
    }

    #[test]
    fn builder_sets_fields() {
        let config = RunConfig::new(vec![DensityRange::new(0.0, 1.0, 1.0)])
            .with_range(DensityRange::new(1.0, 2.0, 0.5))
            .with_raster_points_per_sample_width(3.5)
            .with_limits(SamplerLimits {
                iteration_slack: 10,
                ..Default::default()
            });
        assert_eq!(config.ranges.len(), 2);
        assert_eq!(config.raster_points_per_sample_width, 3.5);
        assert_eq!(config.limits.iteration_slack, 10);
    }

    #[test]
    fn non_positive_width_is_rejected() {
        for width in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let config = RunConfig::new(vec![DensityRange::new(0.0, 1.0, 1.0)])
                .with_raster_points_per_sample_width(width);
            assert!(
                matches!(config.validate(), Err(Error::InvalidConfig(_))),
                "width {width} accepted"
            );
        }
    }

    #[test]
    fn range_errors_surface_from_validate() {
        assert!(matches!(
            RunConfig::default().validate(),
            Err(Error::EmptyRanges)
        ));
        let config = RunConfig::new(vec![DensityRange::new(3.0, 1.0, 1.0)]);
        assert!(matches!(
            config.validate(),
            Err(Error::InvalidRange { index: 0, .. })
        ));
    }

    #[test]
    fn non_finite_cell_limit_is_rejected() {
        for cells in [f64::INFINITY, f64::NAN, 0.0] {
            let config = RunConfig::new(vec![DensityRange::new(0.0, 2.0, 1.0)])
                .with_raster_points_per_sample_width(1e-12)
                .with_limits(SamplerLimits {
                    max_estimated_cells: cells,
                    ..Default::default()
                });
            assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));
        }
    }

    #[test]
    fn valid_config_returns_ranges_in_order() {
        let config = RunConfig::new(vec![
            DensityRange::new(0.0, 1.0, 1.0),
            DensityRange::new(0.5, 2.0, 4.0),
        ]);
        let ranges = config.validate().expect("valid config");
        assert_eq!(ranges.as_slice()[1].points_per_cell, 4.0);
    }
}
