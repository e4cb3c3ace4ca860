use std::time::Duration;

use criterion::{Criterion, Throughput};
use raster_scatter::prelude::*;

pub const SAMPLE_SIZE: usize = 20;
pub const WARM_UP: Duration = Duration::from_secs(1);
pub const MEASUREMENT_TIME: Duration = Duration::from_secs(2);

pub fn default_criterion() -> Criterion {
    Criterion::default()
        .configure_from_args()
        .sample_size(SAMPLE_SIZE)
        .warm_up_time(WARM_UP)
        .measurement_time(MEASUREMENT_TIME)
}

pub fn elements_throughput(elements: usize) -> Throughput {
    Throughput::Elements(elements.max(1) as u64)
}

/// Density bands over `[0, 1]` with increasing rates, including a fractional one.
#[allow(dead_code)]
pub fn unit_bands() -> DensityRanges {
    DensityRanges::new(vec![
        DensityRange::new(0.0, 0.25, 0.3),
        DensityRange::new(0.25, 0.5, 1.0),
        DensityRange::new(0.5, 0.75, 2.0),
        DensityRange::new(0.75, 1.0, 4.0),
    ])
    .expect("valid bands")
}
