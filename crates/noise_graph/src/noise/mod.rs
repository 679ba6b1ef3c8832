//! Seeded noise kernels used by the generator nodes.
//!
//! Both kernels draw their lattice hashes from a [`PermutationTable`] shuffled from a
//! 64-bit seed, so two instances built from the same seed produce identical fields.
use glam::Vec3;

pub mod perlin;
pub mod permutation;
pub mod voronoi;

pub use perlin::PerlinNoise;
pub use permutation::PermutationTable;
pub use voronoi::{DistanceMetric, VoronoiNoise};

/// Trait for scalar 3D noise fields.
pub trait Noise3D {
    /// Sample the field at `(x, y, z)`.
    fn sample(&self, x: f32, y: f32, z: f32) -> f32;

    /// Sample the field at `p`.
    #[inline]
    fn sample_vec(&self, p: Vec3) -> f32 {
        self.sample(p.x, p.y, p.z)
    }
}
