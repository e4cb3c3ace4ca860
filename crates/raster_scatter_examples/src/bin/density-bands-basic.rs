use rand::rngs::StdRng;
use rand::SeedableRng;
use raster_scatter::prelude::*;
use raster_scatter_examples::{init_tracing, render_layer_to_png, RenderConfig};

fn main() -> anyhow::Result<()> {
    init_tracing();

    let crs = Crs::new("EPSG:25832");
    let extent = Bounds::new((0.0, 0.0), (1000.0, 1000.0));

    // Radial "population" surface: high in the middle, falling off to the edges.
    let raster = GridRaster::from_fn("population", crs.clone(), extent, 100, 100, |c| {
        let d = (c - glam::DVec2::splat(500.0)).length();
        (1000.0 - 2.0 * d).max(0.0)
    });

    let parcels = PolygonLayer::new("parcels", crs).with_polygons([
        Polygon::new([(100.0, 100.0), (900.0, 150.0), (850.0, 900.0), (150.0, 850.0)]),
    ]);

    // Low values get a fractional rate, high values several points per cell.
    let config = RunConfig::new(vec![
        DensityRange::new(0.0, 200.0, 0.1),
        DensityRange::new(200.0, 500.0, 0.5),
        DensityRange::new(500.0, 800.0, 2.0),
        DensityRange::new(800.0, 1000.0, 5.0),
    ])
    .with_raster_points_per_sample_width(2.0);

    let runner = ScatterRunner::try_new(config)?;
    let mut rng = StdRng::seed_from_u64(42);
    let result = runner.run(&parcels, &raster, &mut rng)?;

    let render = RenderConfig::new((800, 800), extent);
    render_layer_to_png(
        &result.layer,
        &parcels,
        Some(&raster),
        &render,
        "density-bands-basic.png",
    )?;

    tracing::info!(
        "Wrote {} points ({} nodes inside, {} jittered points rejected).",
        result.layer.len(),
        result.stats.nodes_inside,
        result.stats.points_rejected
    );
    Ok(())
}
