//! Planar geometry used by the sampler: axis-aligned bounds and polygons with holes.
use glam::DVec2;

pub mod polygon;

pub use polygon::{point_in_ring, Polygon};

/// Axis-aligned bounding box in layer coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    /// Lower-left corner.
    pub min: DVec2,
    /// Upper-right corner.
    pub max: DVec2,
}

impl Bounds {
    pub fn new(min: impl Into<DVec2>, max: impl Into<DVec2>) -> Self {
        Self {
            min: min.into(),
            max: max.into(),
        }
    }

    /// Smallest box enclosing all `points`, or `None` if there are none.
    pub fn from_points<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = DVec2>,
    {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let (min, max) = iter.fold((first, first), |(lo, hi), p| (lo.min(p), hi.max(p)));
        Some(Self { min, max })
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    /// True when the box has no positive area (`max <= min` on either axis).
    ///
    /// NaN corners count as degenerate as well.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        !(self.max.x > self.min.x && self.max.y > self.min.y)
    }

    /// Inclusive containment on all four edges.
    #[inline]
    pub fn contains(&self, p: DVec2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_points_encloses_all() {
        let b = Bounds::from_points([
            DVec2::new(3.0, -1.0),
            DVec2::new(-2.0, 4.0),
            DVec2::new(0.5, 0.5),
        ])
        .expect("non-empty input");
        assert_eq!(b.min, DVec2::new(-2.0, -1.0));
        assert_eq!(b.max, DVec2::new(3.0, 4.0));
        assert_eq!(b.width(), 5.0);
        assert_eq!(b.height(), 5.0);
    }

    #[test]
    fn from_points_empty_is_none() {
        assert!(Bounds::from_points(std::iter::empty()).is_none());
    }

    #[test]
    fn degenerate_when_flat_or_inverted() {
        assert!(Bounds::new((0.0, 0.0), (0.0, 5.0)).is_degenerate());
        assert!(Bounds::new((0.0, 0.0), (5.0, 0.0)).is_degenerate());
        assert!(Bounds::new((2.0, 0.0), (1.0, 5.0)).is_degenerate());
        assert!(Bounds::new((0.0, 0.0), (f64::NAN, 5.0)).is_degenerate());
        assert!(!Bounds::new((0.0, 0.0), (1.0, 1.0)).is_degenerate());
    }

    #[test]
    fn contains_is_inclusive() {
        let b = Bounds::new((0.0, 0.0), (10.0, 10.0));
        assert!(b.contains(DVec2::new(0.0, 0.0)));
        assert!(b.contains(DVec2::new(10.0, 10.0)));
        assert!(!b.contains(DVec2::new(10.0001, 5.0)));
    }
}
