//! Density classification: from a raster value to a points-per-cell rate.
pub mod range;

pub use range::{DensityRange, DensityRanges};

/// Return the first range in `ranges` whose inclusive `[min, max]` holds `value`.
///
/// NaN and infinite values never match. Overlapping ranges resolve to the
/// earliest declared one, so a value on a shared boundary goes to the range
/// listed first.
#[inline]
pub fn classify(value: f64, ranges: &[DensityRange]) -> Option<&DensityRange> {
    if !value.is_finite() {
        return None;
    }
    ranges.iter().find(|r| r.contains(value))
}
