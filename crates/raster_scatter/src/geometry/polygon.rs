//! Polygons with holes and the point-in-polygon test the sampler relies on.
use glam::DVec2;

use super::Bounds;

/// Even-odd ray casting test against a single closed ring.
///
/// The ring may or may not repeat its first vertex at the end. Rings with
/// fewer than three vertices contain nothing. Points exactly on the left or
/// bottom edge of an axis-aligned ring count as inside, points on the right
/// or top edge as outside.
#[inline]
pub fn point_in_ring(p: DVec2, ring: &[DVec2]) -> bool {
    let n = ring.len();
    if n < 3 {
        return false;
    }

    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let a = ring[i];
        let b = ring[j];
        if (a.y > p.y) != (b.y > p.y) && p.x < (b.x - a.x) * (p.y - a.y) / (b.y - a.y) + a.x {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// A polygon feature: one exterior ring and any number of holes.
#[derive(Clone, Debug, PartialEq)]
pub struct Polygon {
    exterior: Vec<DVec2>,
    holes: Vec<Vec<DVec2>>,
    bounds: Option<Bounds>,
}

impl Polygon {
    /// Create a polygon from its exterior ring.
    pub fn new<I, P>(exterior: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<DVec2>,
    {
        let exterior: Vec<DVec2> = exterior.into_iter().map(Into::into).collect();
        let bounds = Bounds::from_points(exterior.iter().copied());
        Self {
            exterior,
            holes: Vec::new(),
            bounds,
        }
    }

    /// Axis-aligned rectangle polygon spanning `min`..`max`.
    pub fn rect(min: impl Into<DVec2>, max: impl Into<DVec2>) -> Self {
        let (min, max) = (min.into(), max.into());
        Self::new([
            min,
            DVec2::new(max.x, min.y),
            max,
            DVec2::new(min.x, max.y),
        ])
    }

    /// Add a hole ring.
    pub fn with_hole<I, P>(mut self, hole: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<DVec2>,
    {
        self.holes.push(hole.into_iter().map(Into::into).collect());
        self
    }

    pub fn exterior(&self) -> &[DVec2] {
        &self.exterior
    }

    pub fn holes(&self) -> &[Vec<DVec2>] {
        &self.holes
    }

    /// Bounding box of the exterior ring, `None` for an empty polygon.
    pub fn bounds(&self) -> Option<Bounds> {
        self.bounds
    }

    /// True if `p` lies inside the exterior ring and outside every hole.
    #[inline]
    pub fn contains(&self, p: DVec2) -> bool {
        match self.bounds {
            Some(b) if b.contains(p) => {}
            _ => return false,
        }
        if !point_in_ring(p, &self.exterior) {
            return false;
        }
        !self.holes.iter().any(|hole| point_in_ring(p, hole))
    }

    /// Unsigned area of the exterior minus the holes (shoelace formula).
    pub fn area(&self) -> f64 {
        let outer = ring_area(&self.exterior);
        let holes: f64 = self.holes.iter().map(|h| ring_area(h)).sum();
        (outer - holes).max(0.0)
    }
}

fn ring_area(ring: &[DVec2]) -> f64 {
    if ring.len() < 3 {
        return 0.0;
    }
    let mut twice = 0.0;
    let mut j = ring.len() - 1;
    for i in 0..ring.len() {
        twice += ring[j].perp_dot(ring[i]);
        j = i;
    }
    (twice * 0.5).abs()
}
