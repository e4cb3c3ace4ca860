//! Materialized output: a named point layer with sequential feature ids.
use glam::DVec2;

use crate::geometry::Bounds;
use crate::source::Crs;

/// One generated point with its 1-based id.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointFeature {
    pub id: u64,
    pub position: DVec2,
}

impl From<PointFeature> for mint::Point2<f64> {
    fn from(value: PointFeature) -> Self {
        value.position.into()
    }
}

/// In-memory point layer ready to be written by the caller.
#[derive(Debug, Clone)]
pub struct PointLayer {
    pub name: String,
    pub crs: Crs,
    pub features: Vec<PointFeature>,
}

impl PointLayer {
    /// Layer name used for points generated from `raster_name`.
    pub fn name_for(raster_name: &str) -> String {
        format!("Points_from_{raster_name}")
    }

    /// Build a layer from points in generation order; ids start at 1.
    pub fn from_points(raster_name: &str, crs: Crs, points: Vec<DVec2>) -> Self {
        let features = points
            .into_iter()
            .zip(1u64..)
            .map(|(position, id)| PointFeature { id, position })
            .collect();
        Self {
            name: Self::name_for(raster_name),
            crs,
            features,
        }
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Bounding box of all points, `None` for an empty layer.
    pub fn extent(&self) -> Option<Bounds> {
        Bounds::from_points(self.features.iter().map(|f| f.position))
    }

    pub fn positions(&self) -> impl Iterator<Item = DVec2> + '_ {
        self.features.iter().map(|f| f.position)
    }
}
