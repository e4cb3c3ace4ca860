use rand::rngs::StdRng;
use rand::SeedableRng;
use raster_scatter::prelude::*;
use raster_scatter_examples::{init_tracing, render_layer_to_png, RenderConfig};

fn main() -> anyhow::Result<()> {
    init_tracing();

    let crs = Crs::new("EPSG:3857");
    let extent = Bounds::new((0.0, 0.0), (400.0, 100.0));

    // Value rises from 0 on the left to 1 on the right.
    let raster = GridRaster::from_fn("gradient", crs.clone(), extent, 80, 20, |c| c.x / 400.0);

    let strip = PolygonLayer::new("strip", crs)
        .with_polygon(Polygon::rect((0.0, 0.0), (400.0, 100.0)));

    // Ten bands, each a placement probability between 0.05 and 0.95.
    let ranges: Vec<DensityRange> = (0..10)
        .map(|i| {
            let lo = i as f64 / 10.0;
            DensityRange::new(lo, lo + 0.1, 0.05 + 0.1 * i as f64)
        })
        .collect();
    let runner =
        ScatterRunner::try_new(RunConfig::new(ranges).with_raster_points_per_sample_width(1.0))?;

    let mut rng = StdRng::seed_from_u64(7);
    let mut sink = VecSink::new();
    let result = runner.run_with_events(&strip, &raster, &mut rng, &mut sink)?;

    let render = RenderConfig::new((1200, 300), extent)
        .with_background([255, 250, 240])
        .with_point_color([200, 80, 30])
        .with_point_radius(1);
    render_layer_to_png(
        &result.layer,
        &strip,
        None,
        &render,
        "fractional-density-gradient.png",
    )?;

    tracing::info!(
        "{} points from {} grid nodes, {} events recorded.",
        result.layer.len(),
        result.stats.nodes_inside,
        sink.len()
    );
    Ok(())
}
