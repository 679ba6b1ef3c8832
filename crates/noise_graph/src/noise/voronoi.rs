//! Cell-scatter (Worley F1) noise.
//!
//! Every unit cell holds a pseudo-random number of feature points derived from the cell
//! hash. A sample returns the distance to the closest feature point among its own cell
//! and the 26 neighbors.
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::noise::perlin::lattice;
use crate::noise::{Noise3D, PermutationTable};

/// Distance metric between a sample and a feature point.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum DistanceMetric {
    /// Squared Euclidean distance.
    #[default]
    Euclidean,
    Manhattan,
    Chebyshev,
}

impl DistanceMetric {
    /// All metrics, in declaration order.
    pub const ALL: [DistanceMetric; 3] = [
        DistanceMetric::Euclidean,
        DistanceMetric::Manhattan,
        DistanceMetric::Chebyshev,
    ];

    #[inline]
    pub fn distance(self, dx: f32, dy: f32, dz: f32) -> f32 {
        match self {
            DistanceMetric::Euclidean => dx * dx + dy * dy + dz * dz,
            DistanceMetric::Manhattan => dx.abs() + dy.abs() + dz.abs(),
            DistanceMetric::Chebyshev => dx.abs().max(dy.abs()).max(dz.abs()),
        }
    }
}

/// Seeded Worley F1 noise.
#[derive(Clone, Debug, PartialEq)]
pub struct VoronoiNoise {
    perm: PermutationTable,
    /// Metric used to measure distances to feature points.
    pub metric: DistanceMetric,
}

impl VoronoiNoise {
    /// Create a kernel whose cell hash is shuffled from `seed`, using the Euclidean metric.
    pub fn new(seed: u64) -> Self {
        Self {
            perm: PermutationTable::new(seed),
            metric: DistanceMetric::default(),
        }
    }

    /// Builder-style metric selection.
    pub fn with_metric(mut self, metric: DistanceMetric) -> Self {
        self.metric = metric;
        self
    }

    /// Reshuffle the cell hash from `seed`.
    pub fn reseed(&mut self, seed: u64) {
        self.perm.reseed(seed);
    }

    /// Minimum distance from `(x, y, z)` to the feature points of the surrounding cells.
    pub fn sample(&self, x: f32, y: f32, z: f32) -> f32 {
        let (cx, _) = lattice(x);
        let (cy, _) = lattice(y);
        let (cz, _) = lattice(z);
        let (ox, oy, oz) = (x.floor(), y.floor(), z.floor());

        let mut min_dist = f32::MAX;

        for i in -1i32..=1 {
            for j in -1i32..=1 {
                for k in -1i32..=1 {
                    let hash = self.perm.hash(
                        cx.wrapping_add(i as u32),
                        cy.wrapping_add(j as u32),
                        cz.wrapping_add(k as u32),
                    );
                    let mut rng = MinStd::new(hash);
                    let count = points_in_cell(rng.next() & 255);

                    // Cell origin in sample space, relative to the sample.
                    let bx = ox + i as f32 - x;
                    let by = oy + j as f32 - y;
                    let bz = oz + k as f32 - z;

                    for _ in 0..count {
                        let px = rng.next_unit();
                        let py = rng.next_unit();
                        let pz = rng.next_unit();
                        let d = self.metric.distance(bx + px, by + py, bz + pz);
                        min_dist = min_dist.min(d);
                    }
                }
            }
        }

        min_dist
    }

    /// Sample with coordinates pre-scaled by `frequency`.
    #[inline]
    pub fn sample_scaled(&self, x: f32, y: f32, z: f32, frequency: f32) -> f32 {
        self.sample(x * frequency, y * frequency, z * frequency)
    }
}

impl Default for VoronoiNoise {
    fn default() -> Self {
        Self::new(0)
    }
}

impl Noise3D for VoronoiNoise {
    #[inline]
    fn sample(&self, x: f32, y: f32, z: f32) -> f32 {
        VoronoiNoise::sample(self, x, y, z)
    }
}

/// Feature point count for a cell, approximating a Poisson distribution from a draw in
/// `0..=255`.
#[inline]
pub(crate) fn points_in_cell(draw: u32) -> u32 {
    match draw {
        0..=22 => 1,
        23..=60 => 2,
        61..=109 => 3,
        110..=160 => 4,
        161..=200 => 5,
        201..=227 => 6,
        228..=242 => 7,
        243..=250 => 8,
        _ => 9,
    }
}

const MINSTD_MODULUS: u32 = 2_147_483_647;
const MINSTD_MULTIPLIER: u64 = 48_271;

/// Park–Miller minimal standard linear congruential generator.
#[derive(Clone, Copy, Debug)]
pub(crate) struct MinStd {
    state: u32,
}

impl MinStd {
    pub(crate) fn new(seed: u32) -> Self {
        let state = seed % MINSTD_MODULUS;
        Self {
            state: if state == 0 { 1 } else { state },
        }
    }

    /// Next value in `1..MINSTD_MODULUS`.
    #[inline]
    pub(crate) fn next(&mut self) -> u32 {
        self.state = ((self.state as u64 * MINSTD_MULTIPLIER) % MINSTD_MODULUS as u64) as u32;
        self.state
    }

    /// Next value in `[0, 1)` with 24 bits of precision.
    #[inline]
    pub(crate) fn next_unit(&mut self) -> f32 {
        ((self.next() - 1) >> 7) as f32 / (1u32 << 24) as f32
    }
}
