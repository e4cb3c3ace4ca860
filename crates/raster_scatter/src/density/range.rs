//! Density ranges and their validation.
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Maps raster values in `[min, max]` (both ends inclusive) to a point rate.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DensityRange {
    pub min: f64,
    pub max: f64,
    /// Points per grid cell. Values `>= 1` are truncated to an exact count,
    /// values below 1 are a placement probability.
    pub points_per_cell: f64,
}

impl DensityRange {
    pub fn new(min: f64, max: f64, points_per_cell: f64) -> Self {
        Self {
            min,
            max,
            points_per_cell,
        }
    }

    /// True if `value` lies in `[min, max]`.
    #[inline]
    pub fn contains(&self, value: f64) -> bool {
        self.min <= value && value <= self.max
    }

    /// Checks `min < max`, `points_per_cell >= 0`, and that all bounds are finite.
    pub fn validate(&self) -> std::result::Result<(), String> {
        if !self.min.is_finite() || !self.max.is_finite() {
            return Err("min and max must be finite".into());
        }
        if self.min >= self.max {
            return Err(format!(
                "min ({}) must be less than max ({})",
                self.min, self.max
            ));
        }
        if !self.points_per_cell.is_finite() || self.points_per_cell < 0.0 {
            return Err(format!(
                "points_per_cell ({}) must be a finite value >= 0",
                self.points_per_cell
            ));
        }
        Ok(())
    }
}

/// A non-empty, ordered list of valid [`DensityRange`]s.
///
/// Ranges may overlap. Lookups scan in declaration order and the first match
/// wins.
#[derive(Clone, Debug, PartialEq)]
pub struct DensityRanges {
    ranges: Vec<DensityRange>,
}

impl DensityRanges {
    /// Validate and wrap `ranges`.
    pub fn new(ranges: Vec<DensityRange>) -> Result<Self> {
        if ranges.is_empty() {
            return Err(Error::EmptyRanges);
        }
        for (index, range) in ranges.iter().enumerate() {
            range
                .validate()
                .map_err(|reason| Error::InvalidRange { index, reason })?;
        }
        Ok(Self { ranges })
    }

    /// First range containing `value`, see [`super::classify`].
    #[inline]
    pub fn classify(&self, value: f64) -> Option<&DensityRange> {
        super::classify(value, &self.ranges)
    }

    pub fn as_slice(&self) -> &[DensityRange] {
        &self.ranges
    }

    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }
}

impl TryFrom<Vec<DensityRange>> for DensityRanges {
    type Error = Error;

    fn try_from(value: Vec<DensityRange>) -> Result<Self> {
        Self::new(value)
    }
}
