//! In-memory polygon layer.
use crate::geometry::Polygon;
use crate::source::{Crs, PolygonSource};

/// A named set of polygons in one reference system.
#[derive(Clone, Debug)]
pub struct PolygonLayer {
    pub name: String,
    pub crs: Crs,
    pub polygons: Vec<Polygon>,
}

impl PolygonLayer {
    pub fn new(name: impl Into<String>, crs: Crs) -> Self {
        Self {
            name: name.into(),
            crs,
            polygons: Vec::new(),
        }
    }

    /// Add a single polygon.
    pub fn with_polygon(mut self, polygon: Polygon) -> Self {
        self.polygons.push(polygon);
        self
    }

    /// Add multiple polygons.
    pub fn with_polygons(mut self, polygons: impl IntoIterator<Item = Polygon>) -> Self {
        self.polygons.extend(polygons);
        self
    }

    pub fn len(&self) -> usize {
        self.polygons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.polygons.is_empty()
    }
}

impl PolygonSource for PolygonLayer {
    fn name(&self) -> &str {
        &self.name
    }

    fn crs(&self) -> &Crs {
        &self.crs
    }

    fn polygons(&self) -> Box<dyn Iterator<Item = &Polygon> + '_> {
        Box::new(self.polygons.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_collects_polygons_in_order() {
        let layer = PolygonLayer::new("parcels", Crs::new("EPSG:3857"))
            .with_polygon(Polygon::rect((0.0, 0.0), (1.0, 1.0)))
            .with_polygons([
                Polygon::rect((2.0, 0.0), (3.0, 1.0)),
                Polygon::rect((4.0, 0.0), (5.0, 1.0)),
            ]);

        assert_eq!(layer.len(), 3);
        let xs: Vec<f64> = layer
            .polygons()
            .filter_map(|p| p.bounds())
            .map(|b| b.min.x)
            .collect();
        assert_eq!(xs, vec![0.0, 2.0, 4.0]);
        assert_eq!(PolygonSource::name(&layer), "parcels");
        assert_eq!(layer.crs().as_str(), "EPSG:3857");
    }
}
