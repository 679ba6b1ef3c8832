#![allow(dead_code)]

use std::time::Duration;

use criterion::{Criterion, Throughput};
use glam::Vec3;

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

/// Points of an `n × n` grid over the unit square at `z = 0`, the same layout a render uses.
pub fn unit_grid(n: usize) -> Vec<Vec3> {
    let scale = n as f32;
    (0..n)
        .flat_map(|row| (0..n).map(move |col| Vec3::new(col as f32 / scale, row as f32 / scale, 0.0)))
        .collect()
}
