use std::path::Path;

use glam::DVec2;
use image::{Rgb, RgbImage};
use raster_scatter::prelude::*;
use tracing_subscriber::EnvFilter;

/// Install a console subscriber; `RUST_LOG` overrides the default `info` level.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// How to draw a scatter result.
#[derive(Clone, Debug)]
pub struct RenderConfig {
    /// Output image size in pixels (width, height).
    pub image_size: (u32, u32),
    /// World-space area mapped onto the image.
    pub view: Bounds,
    /// Color of pixels outside every polygon.
    pub background: [u8; 3],
    /// Tint blended over pixels inside a polygon.
    pub polygon_tint: [u8; 3],
    /// Point color.
    pub point_color: [u8; 3],
    /// Point radius in pixels.
    pub point_radius: i32,
}

impl RenderConfig {
    pub fn new(image_size: (u32, u32), view: Bounds) -> Self {
        Self {
            image_size,
            view,
            background: [245, 245, 240],
            polygon_tint: [215, 230, 210],
            point_color: [30, 60, 160],
            point_radius: 2,
        }
    }

    pub fn with_background(mut self, color: [u8; 3]) -> Self {
        self.background = color;
        self
    }

    pub fn with_point_color(mut self, color: [u8; 3]) -> Self {
        self.point_color = color;
        self
    }

    pub fn with_point_radius(mut self, radius: i32) -> Self {
        self.point_radius = radius;
        self
    }

    fn world_at(&self, px: u32, py: u32) -> DVec2 {
        let (w, h) = self.image_size;
        let u = (px as f64 + 0.5) / w as f64;
        let v = (py as f64 + 0.5) / h as f64;
        DVec2::new(
            self.view.min.x + u * self.view.width(),
            self.view.max.y - v * self.view.height(),
        )
    }

    fn pixel_at(&self, p: DVec2) -> (i64, i64) {
        let (w, h) = self.image_size;
        let u = (p.x - self.view.min.x) / self.view.width();
        let v = (self.view.max.y - p.y) / self.view.height();
        ((u * w as f64) as i64, (v * h as f64) as i64)
    }
}

/// Draw polygons, optionally shaded by raster value, and the scattered points.
pub fn render_layer_to_png(
    layer: &PointLayer,
    polygons: &dyn PolygonSource,
    raster: Option<&dyn RasterSource>,
    config: &RenderConfig,
    out_path: impl AsRef<Path>,
) -> anyhow::Result<()> {
    let (w, h) = config.image_size;
    let mut img = RgbImage::from_pixel(w, h, Rgb(config.background));
    let stats = raster.and_then(|r| r.statistics());

    for py in 0..h {
        for px in 0..w {
            let p = config.world_at(px, py);
            if !polygons.polygons().any(|poly| poly.contains(p)) {
                continue;
            }
            let shade = match (raster, stats) {
                (Some(r), Some(s)) if s.max > s.min => r
                    .value_at(p)
                    .map(|v| ((v - s.min) / (s.max - s.min)).clamp(0.0, 1.0))
                    .unwrap_or(0.0),
                _ => 0.0,
            };
            let tint = config.polygon_tint;
            let color = [
                lerp(tint[0], 120, shade),
                lerp(tint[1], 150, shade),
                lerp(tint[2], 110, shade),
            ];
            img.put_pixel(px, py, Rgb(color));
        }
    }

    let r = config.point_radius.max(0) as i64;
    for p in layer.positions() {
        let (cx, cy) = config.pixel_at(p);
        for dy in -r..=r {
            for dx in -r..=r {
                if dx * dx + dy * dy > r * r {
                    continue;
                }
                let (x, y) = (cx + dx, cy + dy);
                if x >= 0 && y >= 0 && x < w as i64 && y < h as i64 {
                    img.put_pixel(x as u32, y as u32, Rgb(config.point_color));
                }
            }
        }
    }

    img.save(out_path)?;
    Ok(())
}

fn lerp(a: u8, b: u8, t: f64) -> u8 {
    (a as f64 + (b as f64 - a as f64) * t).round() as u8
}
