//! Grid walk over polygons with raster-driven point placement.
use glam::DVec2;
use rand::RngCore;
use tracing::{debug, warn};

use crate::density::DensityRanges;
use crate::geometry::Polygon;
use crate::sampling::{jitter, should_place, SampleStats, SamplerLimits};
use crate::scatter::events::{EventSink, ScatterEvent, ScatterEventKind, SkipReason};
use crate::source::{CoordinateTransformer, PolygonSource, RasterSource};

/// Points produced by a sampler run together with its counters.
#[derive(Debug, Clone, Default)]
pub struct SampleOutput {
    /// Accepted points in generation order, in the polygon source's reference system.
    pub points: Vec<DVec2>,
    pub stats: SampleStats,
}

/// Grid step for `raster`: the finer native pixel size times `width_factor`.
///
/// Returns `None` when the raster has no pixels, a non-positive or non-finite
/// resolution, or the resulting step is not a positive finite number.
pub fn cell_size_for(raster: &dyn RasterSource, width_factor: f64) -> Option<f64> {
    let (width, height) = (raster.width(), raster.height());
    if width == 0 || height == 0 {
        return None;
    }
    let extent = raster.extent();
    let x_res = extent.width() / width as f64;
    let y_res = extent.height() / height as f64;
    if !(x_res.is_finite() && y_res.is_finite() && x_res > 0.0 && y_res > 0.0) {
        return None;
    }
    let cell = x_res.min(y_res) * width_factor;
    (cell.is_finite() && cell > 0.0).then_some(cell)
}

/// Scatters points inside polygons at a density looked up from a raster.
#[derive(Debug, Clone)]
pub struct GridSampler {
    /// Grid step as a multiple of the raster's native pixel size.
    pub raster_points_per_sample_width: f64,
    pub limits: SamplerLimits,
}

impl GridSampler {
    pub fn new(raster_points_per_sample_width: f64) -> Self {
        Self {
            raster_points_per_sample_width,
            limits: SamplerLimits::default(),
        }
    }

    pub fn with_limits(mut self, limits: SamplerLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Sample every polygon of `polygons` against `raster`.
    ///
    /// `transformer` maps polygon coordinates into the raster's reference
    /// system. It is required when the two sources report different CRS;
    /// without it nothing is sampled. Invalid raster geometry also yields an
    /// empty result rather than an error.
    pub fn sample(
        &self,
        polygons: &dyn PolygonSource,
        raster: &dyn RasterSource,
        ranges: &DensityRanges,
        transformer: Option<&dyn CoordinateTransformer>,
        rng: &mut dyn RngCore,
        sink: &mut dyn EventSink,
    ) -> SampleOutput {
        let mut out = SampleOutput::default();

        let Some(cell_size) = cell_size_for(raster, self.raster_points_per_sample_width) else {
            warn!(
                "Raster '{}' has an unusable resolution ({}x{} px); no points sampled.",
                raster.name(),
                raster.width(),
                raster.height()
            );
            warning(sink, raster.name(), "raster resolution is not usable");
            return out;
        };

        let transformer = if polygons.crs() == raster.crs() {
            None
        } else if let Some(t) = transformer {
            Some(t)
        } else {
            warn!(
                "No transform from '{}' to '{}'; no points sampled.",
                polygons.crs(),
                raster.crs()
            );
            warning(sink, raster.name(), "missing coordinate transform");
            return out;
        };

        if sink.wants(ScatterEventKind::RunStarted) {
            sink.send(ScatterEvent::RunStarted {
                cell_size,
                polygons: polygons.name().to_owned(),
                raster: raster.name().to_owned(),
            });
        }

        let ctx = WalkContext {
            raster,
            ranges,
            transformer,
            cell_size,
            limits: &self.limits,
        };
        for (index, polygon) in polygons.polygons().enumerate() {
            let before = out.points.len();
            walk_polygon(index, polygon, &ctx, rng, sink, &mut out);
            if sink.wants(ScatterEventKind::PolygonFinished) {
                sink.send(ScatterEvent::PolygonFinished {
                    index,
                    points: out.points.len() - before,
                });
            }
        }

        if sink.wants(ScatterEventKind::RunFinished) {
            sink.send(ScatterEvent::RunFinished {
                points: out.points.len(),
                stats: out.stats,
            });
        }
        out
    }
}

struct WalkContext<'a> {
    raster: &'a dyn RasterSource,
    ranges: &'a DensityRanges,
    transformer: Option<&'a dyn CoordinateTransformer>,
    cell_size: f64,
    limits: &'a SamplerLimits,
}

fn warning(sink: &mut dyn EventSink, raster: &str, message: &str) {
    if sink.wants(ScatterEventKind::Warning) {
        sink.send(ScatterEvent::Warning {
            context: format!("raster:{raster}"),
            message: message.into(),
        });
    }
}

fn skip(index: usize, reason: SkipReason, sink: &mut dyn EventSink, stats: &mut SampleStats) {
    debug!("Polygon {} skipped: {:?}.", index, reason);
    stats.polygons_skipped += 1;
    if sink.wants(ScatterEventKind::PolygonSkipped) {
        sink.send(ScatterEvent::PolygonSkipped { index, reason });
    }
}

fn walk_polygon(
    index: usize,
    polygon: &Polygon,
    ctx: &WalkContext<'_>,
    rng: &mut dyn RngCore,
    sink: &mut dyn EventSink,
    out: &mut SampleOutput,
) {
    let Some(bounds) = polygon.bounds() else {
        skip(index, SkipReason::Empty, sink, &mut out.stats);
        return;
    };
    if bounds.is_degenerate() {
        skip(index, SkipReason::DegenerateBounds, sink, &mut out.stats);
        return;
    }

    let cell = ctx.cell_size;
    let estimated = (bounds.width() / cell) * (bounds.height() / cell);
    if !(estimated <= ctx.limits.max_estimated_cells) {
        skip(
            index,
            SkipReason::TooManyCells { estimated },
            sink,
            &mut out.stats,
        );
        return;
    }
    if sink.wants(ScatterEventKind::PolygonStarted) {
        sink.send(ScatterEvent::PolygonStarted {
            index,
            estimated_cells: estimated,
        });
    }

    let max_iterations = (estimated as usize).saturating_add(ctx.limits.iteration_slack);
    let mut iterations = 0usize;

    // Node coordinates are derived from integer steps so the walk does not
    // accumulate rounding error; both bounding box edges are included.
    let mut ix = 0u64;
    'walk: loop {
        let x = bounds.min.x + ix as f64 * cell;
        if x > bounds.max.x {
            break;
        }
        let mut iy = 0u64;
        loop {
            let y = bounds.min.y + iy as f64 * cell;
            if y > bounds.max.y {
                break;
            }
            if iterations >= max_iterations {
                debug!("Polygon {} stopped after {} iterations.", index, iterations);
                out.stats.polygons_truncated += 1;
                if sink.wants(ScatterEventKind::PolygonTruncated) {
                    sink.send(ScatterEvent::PolygonTruncated { index, iterations });
                }
                break 'walk;
            }
            iterations += 1;
            visit_node(DVec2::new(x, y), polygon, ctx, rng, out);
            iy += 1;
        }
        ix += 1;
    }
}

fn visit_node(
    node: DVec2,
    polygon: &Polygon,
    ctx: &WalkContext<'_>,
    rng: &mut dyn RngCore,
    out: &mut SampleOutput,
) {
    let stats = &mut out.stats;
    stats.nodes_visited += 1;
    if !polygon.contains(node) {
        return;
    }
    stats.nodes_inside += 1;

    let raster_point = match ctx.transformer {
        Some(t) => match t.transform(node.into()) {
            Ok(p) => DVec2::from(p),
            Err(_) => {
                stats.nodes_transform_failed += 1;
                return;
            }
        },
        None => node,
    };

    let Some(value) = ctx.raster.value_at(raster_point) else {
        stats.nodes_without_value += 1;
        return;
    };

    let Some(range) = ctx.ranges.classify(value) else {
        stats.nodes_unmatched += 1;
        return;
    };

    let rate = range.points_per_cell;
    let half = ctx.cell_size * 0.5;
    if rate >= 1.0 {
        let count = rate.trunc();
        if !(count.is_finite() && count <= ctx.limits.max_points_per_cell as f64) {
            stats.nodes_over_limit += 1;
            return;
        }
        for _ in 0..count as usize {
            place_jittered(node, half, polygon, rng, out);
        }
    } else if should_place(rate, rng) {
        place_jittered(node, half, polygon, rng, out);
    }
}

/// Offset `node` by an independent uniform jitter per axis and keep the
/// result only if it is still inside the polygon.
fn place_jittered(
    node: DVec2,
    half: f64,
    polygon: &Polygon,
    rng: &mut dyn RngCore,
    out: &mut SampleOutput,
) {
    let dx = jitter(rng, half);
    let dy = jitter(rng, half);
    let p = node + DVec2::new(dx, dy);
    if polygon.contains(p) {
        out.points.push(p);
    } else {
        out.stats.points_rejected += 1;
    }
}
