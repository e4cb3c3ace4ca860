//! High-level runner: checks inputs, samples, and builds the output layer.
use rand::RngCore;
use tracing::{info, warn};

use crate::density::DensityRanges;
use crate::error::{Error, Result};
use crate::sampling::{cell_size_for, GridSampler, SampleStats};
use crate::scatter::config::RunConfig;
use crate::scatter::events::EventSink;
use crate::scatter::output::PointLayer;
use crate::source::{CoordinateTransformer, PolygonSource, RasterSource, RasterStats};

/// Result of a successful scatter run.
#[non_exhaustive]
#[derive(Debug, Clone)]
pub struct RunResult {
    /// Generated points, named after the raster, in the polygon source's CRS.
    pub layer: PointLayer,
    /// Counters collected by the sampler.
    pub stats: SampleStats,
    /// Raster statistics at the time of the run, if available.
    pub raster_stats: Option<RasterStats>,
    /// Grid step used.
    pub cell_size: f64,
}

pub struct ScatterRunner {
    /// Run configuration applied to this runner.
    pub config: RunConfig,
    ranges: DensityRanges,
    transformer: Option<Box<dyn CoordinateTransformer>>,
}

impl ScatterRunner {
    /// Validates `config` and creates a runner.
    pub fn try_new(config: RunConfig) -> Result<Self> {
        let ranges = config.validate()?;
        Ok(Self {
            config,
            ranges,
            transformer: None,
        })
    }

    /// Transformer from the polygon CRS to the raster CRS, used when they differ.
    pub fn with_transformer<T>(mut self, transformer: T) -> Self
    where
        T: CoordinateTransformer + 'static,
    {
        self.transformer = Some(Box::new(transformer));
        self
    }

    pub fn ranges(&self) -> &DensityRanges {
        &self.ranges
    }

    /// Runs the scatter, returning the generated point layer.
    pub fn run<R: RngCore>(
        &self,
        polygons: &dyn PolygonSource,
        raster: &dyn RasterSource,
        rng: &mut R,
    ) -> Result<RunResult> {
        self.run_with_events(polygons, raster, rng, &mut ())
    }

    pub fn run_with_events<R: RngCore>(
        &self,
        polygons: &dyn PolygonSource,
        raster: &dyn RasterSource,
        rng: &mut R,
        sink: &mut dyn EventSink,
    ) -> Result<RunResult> {
        run_scatter(
            &self.config,
            &self.ranges,
            polygons,
            raster,
            self.transformer.as_deref(),
            rng,
            sink,
        )
    }
}

/// Runs one scatter with already validated `ranges`.
///
/// Fails before sampling when the polygon source is empty, the raster has no
/// pixels, or the reference systems differ and no transformer is given.
/// Fails after sampling with [`Error::NoPointsGenerated`] when nothing was placed.
pub fn run_scatter<R: RngCore>(
    config: &RunConfig,
    ranges: &DensityRanges,
    polygons: &dyn PolygonSource,
    raster: &dyn RasterSource,
    transformer: Option<&dyn CoordinateTransformer>,
    rng: &mut R,
    sink: &mut dyn EventSink,
) -> Result<RunResult> {
    if polygons.polygons().next().is_none() {
        return Err(Error::NoPolygons);
    }
    if raster.width() == 0 || raster.height() == 0 {
        return Err(Error::EmptyRaster {
            name: raster.name().to_owned(),
        });
    }
    if polygons.crs() != raster.crs() && transformer.is_none() {
        return Err(Error::MissingTransform {
            from: polygons.crs().to_string(),
            to: raster.crs().to_string(),
        });
    }
    let Some(cell_size) = cell_size_for(raster, config.raster_points_per_sample_width) else {
        return Err(Error::InvalidConfig(format!(
            "raster '{}' does not yield a usable grid step",
            raster.name()
        )));
    };

    let raster_stats = raster.statistics();
    match raster_stats {
        Some(s) => info!(
            "Raster '{}' | min: {} | max: {}.",
            raster.name(),
            s.min,
            s.max
        ),
        None => info!("Raster '{}' | no statistics available.", raster.name()),
    }
    info!(
        "Scattering '{}' over '{}' | cell size: {} | ranges: {}.",
        polygons.name(),
        raster.name(),
        cell_size,
        ranges.len(),
    );

    let sampler = GridSampler::new(config.raster_points_per_sample_width).with_limits(config.limits);
    let output = sampler.sample(polygons, raster, ranges, transformer, rng, sink);

    if output.stats.polygons_skipped > 0 || output.stats.polygons_truncated > 0 {
        warn!(
            "{} polygon(s) skipped and {} truncated by cost guards.",
            output.stats.polygons_skipped, output.stats.polygons_truncated
        );
    }
    if output.points.is_empty() {
        return Err(Error::NoPointsGenerated);
    }
    info!("Generated {} points.", output.points.len());

    Ok(RunResult {
        layer: PointLayer::from_points(raster.name(), polygons.crs().clone(), output.points),
        stats: output.stats,
        raster_stats,
        cell_size,
    })
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::density::DensityRange;
    use crate::geometry::{Bounds, Polygon};
    use crate::scatter::events::{ScatterEvent, ScatterEventKind, VecSink};
    use crate::source::{AffineTransformer, Crs, GridRaster, PolygonLayer};

    fn crs() -> Crs {
        Crs::new("EPSG:32633")
    }

    fn raster() -> GridRaster {
        GridRaster::filled(
            "landcover",
            crs(),
            Bounds::new((0.0, 0.0), (100.0, 100.0)),
            10,
            10,
            3.0,
        )
    }

    fn layer() -> PolygonLayer {
        PolygonLayer::new("fields", crs()).with_polygon(Polygon::rect((0.0, 0.0), (100.0, 100.0)))
    }

    fn config(points_per_cell: f64) -> RunConfig {
        RunConfig::new(vec![DensityRange::new(0.0, 5.0, points_per_cell)])
    }

    #[test]
    fn try_new_rejects_invalid_config() {
        assert!(matches!(
            ScatterRunner::try_new(RunConfig::default()),
            Err(Error::EmptyRanges)
        ));
        assert!(matches!(
            ScatterRunner::try_new(config(1.0).with_raster_points_per_sample_width(0.0)),
            Err(Error::InvalidConfig(_))
        ));
    }

    #[test]
    fn run_builds_named_layer_with_sequential_ids() {
        let runner = ScatterRunner::try_new(config(2.0)).expect("valid config");
        let mut rng = StdRng::seed_from_u64(42);
        let result = runner.run(&layer(), &raster(), &mut rng).expect("points");

        assert_eq!(result.layer.name, "Points_from_landcover");
        assert_eq!(result.layer.crs, crs());
        assert_eq!(result.cell_size, 20.0);
        assert_eq!(result.raster_stats, Some(RasterStats { min: 3.0, max: 3.0 }));
        let ids: Vec<u64> = result.layer.features.iter().map(|f| f.id).collect();
        let expected: Vec<u64> = (1..=result.layer.len() as u64).collect();
        assert_eq!(ids, expected);
    }

    #[test]
    fn empty_polygon_source_is_an_error() {
        let runner = ScatterRunner::try_new(config(1.0)).expect("valid config");
        let empty = PolygonLayer::new("none", crs());
        let mut rng = StdRng::seed_from_u64(1);
        assert!(matches!(
            runner.run(&empty, &raster(), &mut rng),
            Err(Error::NoPolygons)
        ));
    }

    #[test]
    fn pixelless_raster_is_an_error() {
        let runner = ScatterRunner::try_new(config(1.0)).expect("valid config");
        let empty = GridRaster::filled(
            "blank",
            crs(),
            Bounds::new((0.0, 0.0), (1.0, 1.0)),
            0,
            0,
            0.0,
        );
        let mut rng = StdRng::seed_from_u64(1);
        assert!(matches!(
            runner.run(&layer(), &empty, &mut rng),
            Err(Error::EmptyRaster { ref name }) if name == "blank"
        ));
    }

    #[test]
    fn crs_mismatch_requires_transformer() {
        let other = PolygonLayer::new("fields", Crs::new("LOCAL:offset"))
            .with_polygon(Polygon::rect((500.0, 500.0), (600.0, 600.0)));
        let mut rng = StdRng::seed_from_u64(1);

        let runner = ScatterRunner::try_new(config(1.0)).expect("valid config");
        assert!(matches!(
            runner.run(&other, &raster(), &mut rng),
            Err(Error::MissingTransform { .. })
        ));

        let runner = runner.with_transformer(AffineTransformer::translation(-500.0, -500.0));
        let result = runner.run(&other, &raster(), &mut rng).expect("points");
        assert_eq!(result.layer.crs, Crs::new("LOCAL:offset"));
        assert!(result.layer.positions().all(|p| p.x >= 500.0));
    }

    #[test]
    fn no_overlap_reports_no_points() {
        let far = PolygonLayer::new("far", crs())
            .with_polygon(Polygon::rect((1000.0, 1000.0), (1100.0, 1100.0)));
        let runner = ScatterRunner::try_new(config(1.0)).expect("valid config");
        let mut rng = StdRng::seed_from_u64(1);
        let err = runner.run(&far, &raster(), &mut rng).unwrap_err();
        assert!(matches!(err, Error::NoPointsGenerated));
    }

    #[test]
    fn events_bracket_the_run() {
        let runner = ScatterRunner::try_new(config(1.0)).expect("valid config");
        let mut rng = StdRng::seed_from_u64(5);
        let mut sink = VecSink::new();
        let result = runner
            .run_with_events(&layer(), &raster(), &mut rng, &mut sink)
            .expect("points");

        let events = sink.into_inner();
        assert!(matches!(
            events.first(),
            Some(ScatterEvent::RunStarted { cell_size, .. }) if *cell_size == 20.0
        ));
        match events.last() {
            Some(ScatterEvent::RunFinished { points, stats }) => {
                assert_eq!(*points, result.layer.len());
                assert_eq!(*stats, result.stats);
            }
            other => panic!("unexpected last event: {other:?}"),
        }
        assert_eq!(
            events
                .iter()
                .filter(|e| e.kind() == ScatterEventKind::PolygonStarted)
                .count(),
            1
        );
    }
}
