use rand::rngs::StdRng;
use rand::SeedableRng;
use raster_scatter::prelude::*;
use raster_scatter_examples::{init_tracing, render_layer_to_png, RenderConfig};

fn main() -> anyhow::Result<()> {
    init_tracing();

    // Polygons in a local survey grid; the raster sits in a regional grid with
    // the same metre units but a false origin of (10000, 20000).
    let survey = Crs::new("LOCAL:survey");
    let regional = Crs::new("LOCAL:regional");

    let raster = GridRaster::from_fn(
        "soil_moisture",
        regional,
        Bounds::new((10_000.0, 20_000.0), (12_000.0, 22_000.0)),
        40,
        40,
        |c| ((c.x - 10_000.0) / 1000.0 * 3.0).sin().abs() * 100.0,
    )
    .with_nodata(-1.0);

    let fields = PolygonLayer::new("fields", survey).with_polygons([
        Polygon::rect((100.0, 100.0), (900.0, 900.0)),
        Polygon::rect((1100.0, 1100.0), (1900.0, 1900.0)).with_hole([
            (1400.0, 1400.0),
            (1600.0, 1400.0),
            (1600.0, 1600.0),
            (1400.0, 1600.0),
        ]),
    ]);

    let config = RunConfig::new(vec![
        DensityRange::new(0.0, 30.0, 0.2),
        DensityRange::new(30.0, 70.0, 1.0),
        DensityRange::new(70.0, 100.0, 3.0),
    ])
    .with_raster_points_per_sample_width(2.0);

    let to_regional = AffineTransformer::translation(10_000.0, 20_000.0);
    let runner = ScatterRunner::try_new(config)?.with_transformer(to_regional);

    let mut rng = StdRng::seed_from_u64(1234);
    let mut sink = FnSink::new(|event| match event {
        ScatterEvent::PolygonSkipped { index, reason } => {
            tracing::warn!("polygon {index} skipped: {reason:?}")
        }
        ScatterEvent::PolygonFinished { index, points } => {
            tracing::info!("polygon {index}: {points} points")
        }
        _ => {}
    });
    let result = runner.run_with_events(&fields, &raster, &mut rng, &mut sink)?;

    let render = RenderConfig::new((800, 800), Bounds::new((0.0, 0.0), (2000.0, 2000.0)));
    render_layer_to_png(
        &result.layer,
        &fields,
        None,
        &render,
        "reprojected-raster.png",
    )?;
    Ok(())
}
