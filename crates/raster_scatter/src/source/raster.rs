//! In-memory single-band raster.
//!
//! Pixels are stored row-major with row 0 at the top (north) edge of the
//! extent, the way georeferenced rasters are usually laid out.
use glam::DVec2;

use crate::error::{Error, Result};
use crate::geometry::Bounds;
use crate::source::{Crs, RasterSource, RasterStats};

/// A georeferenced grid of `f64` values with an optional nodata marker.
#[derive(Clone, Debug)]
///
/// Fields are private so `data.len() == width * height` always holds; the
/// name, CRS, extent and dimensions are read through [`RasterSource`].
pub struct GridRaster {
    name: String,
    crs: Crs,
    extent: Bounds,
    width: usize,
    height: usize,
    data: Vec<f64>,
    nodata: Option<f64>,
}

impl GridRaster {
    /// Create a raster from row-major data. `data.len()` must equal `width * height`.
    pub fn new(
        name: impl Into<String>,
        crs: Crs,
        extent: Bounds,
        width: usize,
        height: usize,
        data: Vec<f64>,
    ) -> Result<Self> {
        if data.len() != width * height {
            return Err(Error::InvalidConfig(format!(
                "raster data has {} values, expected {}x{}",
                data.len(),
                width,
                height
            )));
        }
        Ok(Self {
            name: name.into(),
            crs,
            extent,
            width,
            height,
            data,
            nodata: None,
        })
    }

    /// Raster with every pixel set to `value`.
    pub fn filled(
        name: impl Into<String>,
        crs: Crs,
        extent: Bounds,
        width: usize,
        height: usize,
        value: f64,
    ) -> Self {
        Self {
            name: name.into(),
            crs,
            extent,
            width,
            height,
            data: vec![value; width * height],
            nodata: None,
        }
    }

    /// Raster whose pixels are computed from their center coordinates.
    pub fn from_fn<F>(
        name: impl Into<String>,
        crs: Crs,
        extent: Bounds,
        width: usize,
        height: usize,
        mut f: F,
    ) -> Self
    where
        F: FnMut(DVec2) -> f64,
    {
        let mut raster = Self::filled(name, crs, extent, width, height, 0.0);
        for row in 0..height {
            for col in 0..width {
                let center = raster.pixel_center(col, row);
                raster.set(col, row, f(center));
            }
        }
        raster
    }

    /// Mark `value` as nodata.
    pub fn with_nodata(mut self, value: f64) -> Self {
        self.nodata = Some(value);
        self
    }

    /// Row-major pixel values, top row first.
    pub fn data(&self) -> &[f64] {
        &self.data
    }

    pub fn nodata(&self) -> Option<f64> {
        self.nodata
    }

    /// Pixel size along each axis.
    pub fn resolution(&self) -> DVec2 {
        DVec2::new(
            self.extent.width() / self.width as f64,
            self.extent.height() / self.height as f64,
        )
    }

    /// Value at pixel `(col, row)`, ignoring nodata.
    pub fn get(&self, col: usize, row: usize) -> Option<f64> {
        if col >= self.width || row >= self.height {
            return None;
        }
        self.data.get(row * self.width + col).copied()
    }

    pub fn set(&mut self, col: usize, row: usize, value: f64) {
        if col < self.width && row < self.height {
            if let Some(slot) = self.data.get_mut(row * self.width + col) {
                *slot = value;
            }
        }
    }

    /// Pixel indices containing `p`, or `None` outside the extent.
    ///
    /// The right and top extent edges belong to the last column and first row.
    pub fn pixel_at(&self, p: DVec2) -> Option<(usize, usize)> {
        if self.width == 0 || self.height == 0 || !self.extent.contains(p) {
            return None;
        }
        let res = self.resolution();
        if !(res.x > 0.0 && res.y > 0.0) {
            return None;
        }
        let fx = (p.x - self.extent.min.x) / res.x;
        let fy = (self.extent.max.y - p.y) / res.y;
        let col = (fx.floor() as usize).min(self.width - 1);
        let row = (fy.floor() as usize).min(self.height - 1);
        Some((col, row))
    }

    /// World coordinates of the center of pixel `(col, row)`.
    pub fn pixel_center(&self, col: usize, row: usize) -> DVec2 {
        let res = self.resolution();
        DVec2::new(
            self.extent.min.x + (col as f64 + 0.5) * res.x,
            self.extent.max.y - (row as f64 + 0.5) * res.y,
        )
    }

    fn is_valid(&self, v: f64) -> bool {
        v.is_finite() && self.nodata != Some(v)
    }
}

impl RasterSource for GridRaster {
    fn name(&self) -> &str {
        &self.name
    }

    fn crs(&self) -> &Crs {
        &self.crs
    }

    fn extent(&self) -> Bounds {
        self.extent
    }

    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    fn value_at(&self, p: DVec2) -> Option<f64> {
        let (col, row) = self.pixel_at(p)?;
        self.get(col, row).filter(|v| self.is_valid(*v))
    }

    fn statistics(&self) -> Option<RasterStats> {
        self.data
            .iter()
            .copied()
            .filter(|v| self.is_valid(*v))
            .fold(None, |acc, v| match acc {
                None => Some(RasterStats { min: v, max: v }),
                Some(s) => Some(RasterStats {
                    min: s.min.min(v),
                    max: s.max.max(v),
                }),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_raster() -> GridRaster {
        // 2x2 pixels of size 10 covering (0,0)..(20,20); top row is 1, 2; bottom row 3, 4.
        GridRaster::new(
            "dem",
            Crs::new("EPSG:32633"),
            Bounds::new((0.0, 0.0), (20.0, 20.0)),
            2,
            2,
            vec![1.0, 2.0, 3.0, 4.0],
        )
        .expect("valid raster")
    }

    #[test]
    fn new_rejects_mismatched_data() {
        let err = GridRaster::new(
            "bad",
            Crs::new("EPSG:4326"),
            Bounds::new((0.0, 0.0), (1.0, 1.0)),
            2,
            2,
            vec![0.0; 3],
        )
        .unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
    }

    #[test]
    fn value_at_uses_north_up_rows() {
        let r = make_raster();
        assert_eq!(r.value_at(DVec2::new(5.0, 15.0)), Some(1.0));
        assert_eq!(r.value_at(DVec2::new(15.0, 15.0)), Some(2.0));
        assert_eq!(r.value_at(DVec2::new(5.0, 5.0)), Some(3.0));
        assert_eq!(r.value_at(DVec2::new(15.0, 5.0)), Some(4.0));
    }

    #[test]
    fn extent_edges_map_to_outer_pixels() {
        let r = make_raster();
        assert_eq!(r.value_at(DVec2::new(0.0, 0.0)), Some(3.0));
        assert_eq!(r.value_at(DVec2::new(20.0, 20.0)), Some(2.0));
        assert_eq!(r.value_at(DVec2::new(10.0, 10.0)), Some(4.0));
    }

    #[test]
    fn outside_extent_is_none() {
        let r = make_raster();
        assert_eq!(r.value_at(DVec2::new(-0.1, 5.0)), None);
        assert_eq!(r.value_at(DVec2::new(5.0, 20.5)), None);
    }

    #[test]
    fn nodata_and_nan_are_none() {
        let mut r = make_raster().with_nodata(-9999.0);
        r.set(0, 0, -9999.0);
        r.set(1, 1, f64::NAN);
        assert_eq!(r.value_at(DVec2::new(5.0, 15.0)), None);
        assert_eq!(r.value_at(DVec2::new(15.0, 5.0)), None);
        assert_eq!(r.value_at(DVec2::new(15.0, 15.0)), Some(2.0));
    }

    #[test]
    fn zero_is_a_real_value() {
        let r = GridRaster::filled(
            "zeros",
            Crs::new("EPSG:4326"),
            Bounds::new((0.0, 0.0), (1.0, 1.0)),
            1,
            1,
            0.0,
        );
        assert_eq!(r.value_at(DVec2::new(0.5, 0.5)), Some(0.0));
    }

    #[test]
    fn statistics_skip_nodata() {
        let mut r = make_raster().with_nodata(-9999.0);
        r.set(1, 1, -9999.0);
        let stats = r.statistics().expect("valid pixels present");
        assert_eq!(stats, RasterStats { min: 1.0, max: 3.0 });
    }

    #[test]
    fn statistics_none_when_all_nodata() {
        let r = GridRaster::filled(
            "empty",
            Crs::new("EPSG:4326"),
            Bounds::new((0.0, 0.0), (1.0, 1.0)),
            2,
            2,
            -1.0,
        )
        .with_nodata(-1.0);
        assert!(r.statistics().is_none());
    }

    #[test]
    fn accessors_expose_pixels_and_nodata() {
        let r = make_raster().with_nodata(-1.0);
        assert_eq!(r.data(), &[1.0, 2.0, 3.0, 4.0]);
        assert_eq!(r.nodata(), Some(-1.0));
        assert_eq!(r.get(2, 0), None);
        assert_eq!(r.get(0, 2), None);
    }

    #[test]
    fn from_fn_samples_pixel_centers() {
        let r = GridRaster::from_fn(
            "gradient",
            Crs::new("EPSG:4326"),
            Bounds::new((0.0, 0.0), (4.0, 2.0)),
            4,
            2,
            |c| c.x,
        );
        assert_eq!(r.get(0, 0), Some(0.5));
        assert_eq!(r.get(3, 1), Some(3.5));
        assert_eq!(r.resolution(), DVec2::new(1.0, 1.0));
    }
}
