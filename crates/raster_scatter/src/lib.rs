#![forbid(unsafe_code)]
//! raster_scatter: scatter random points inside polygons, with density driven by raster values.
//!
//! Modules:
//! - geometry: bounds and polygons with holes (point-in-polygon)
//! - source: polygon/raster/transform interfaces and in-memory implementations
//! - density: density ranges and first-match classification
//! - sampling: the grid sampler, cost guards, and placement trials
//! - scatter: run configuration, runner, events, and the output point layer
pub mod density;
pub mod error;
pub mod geometry;
pub mod sampling;
pub mod scatter;
pub mod source;

/// Convenient re-exports for common types. Import with `use raster_scatter::prelude::*;`.
pub mod prelude {
    pub use crate::density::{classify, DensityRange, DensityRanges};
    pub use crate::error::{Error, Result};
    pub use crate::geometry::{Bounds, Polygon};
    pub use crate::sampling::{
        cell_size_for, should_place, GridSampler, SampleOutput, SampleStats, SamplerLimits,
    };
    pub use crate::scatter::config::RunConfig;
    pub use crate::scatter::events::{
        EventSink, FnSink, ScatterEvent, ScatterEventKind, SkipReason, VecSink,
    };
    pub use crate::scatter::output::{PointFeature, PointLayer};
    pub use crate::scatter::runner::{run_scatter, RunResult, ScatterRunner};
    pub use crate::source::{
        AffineTransformer, CoordinateTransformer, Crs, FnTransformer, GridRaster,
        IdentityTransformer, PolygonLayer, PolygonSource, RasterSource, RasterStats,
        TransformError,
    };
}
