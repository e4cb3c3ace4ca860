//! Input sources consumed by the sampler.
//!
//! The sampler never talks to a concrete GIS toolkit. It reads polygons through
//! [`PolygonSource`], raster values through [`RasterSource`], and reprojects
//! through [`CoordinateTransformer`]. Each comes with an in-memory
//! implementation that is also what the tests and examples use.
use std::fmt;

use glam::DVec2;

use crate::geometry::{Bounds, Polygon};

pub mod layer;
pub mod raster;
pub mod transform;

pub use layer::PolygonLayer;
pub use raster::GridRaster;
pub use transform::{
    AffineTransformer, CoordinateTransformer, FnTransformer, IdentityTransformer, TransformError,
};

/// Coordinate reference system identifier, e.g. `EPSG:4326`.
///
/// Only equality matters here: two sources whose identifiers differ need a
/// [`CoordinateTransformer`] between them.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Crs(String);

impl Crs {
    pub fn new(authid: impl Into<String>) -> Self {
        Self(authid.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Crs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Minimum and maximum over the valid pixels of a raster.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RasterStats {
    pub min: f64,
    pub max: f64,
}

/// A read-only collection of polygon features sharing one reference system.
pub trait PolygonSource: Send + Sync {
    fn name(&self) -> &str;

    fn crs(&self) -> &Crs;

    fn polygons(&self) -> Box<dyn Iterator<Item = &Polygon> + '_>;
}

/// A read-only single-band raster surface.
pub trait RasterSource: Send + Sync {
    fn name(&self) -> &str;

    fn crs(&self) -> &Crs;

    /// Georeferenced extent covered by the pixels.
    fn extent(&self) -> Bounds;

    /// Pixel count along X.
    fn width(&self) -> usize;

    /// Pixel count along Y.
    fn height(&self) -> usize;

    /// Pixel value at a point in the raster's reference system, or `None`
    /// when there is no data there.
    fn value_at(&self, p: DVec2) -> Option<f64>;

    /// Band statistics, if the source can provide them.
    fn statistics(&self) -> Option<RasterStats> {
        None
    }
}
