//! Classic 3D gradient (Perlin) noise with a fractal octave sum.
use crate::noise::{Noise3D, PermutationTable};

/// Seeded gradient noise.
///
/// Single-octave samples lie roughly in `[-1, 1]` and are zero on integer lattice points.
#[derive(Clone, Debug, PartialEq)]
pub struct PerlinNoise {
    perm: PermutationTable,
}

impl PerlinNoise {
    /// Create a kernel whose lattice hash is shuffled from `seed`.
    pub fn new(seed: u64) -> Self {
        Self {
            perm: PermutationTable::new(seed),
        }
    }

    /// Reshuffle the lattice hash from `seed`.
    pub fn reseed(&mut self, seed: u64) {
        self.perm.reseed(seed);
    }

    /// Single-octave gradient noise at `(x, y, z)`.
    pub fn sample(&self, x: f32, y: f32, z: f32) -> f32 {
        let (xi, xf) = lattice(x);
        let (yi, yf) = lattice(y);
        let (zi, zf) = lattice(z);

        let u = ease(xf);
        let v = ease(yf);
        let w = ease(zf);

        let x1 = xi.wrapping_add(1);
        let y1 = yi.wrapping_add(1);
        let z1 = zi.wrapping_add(1);

        let near = lerp(
            v,
            lerp(
                u,
                self.grad(xi, yi, zi, xf, yf, zf),
                self.grad(x1, yi, zi, xf - 1.0, yf, zf),
            ),
            lerp(
                u,
                self.grad(xi, y1, zi, xf, yf - 1.0, zf),
                self.grad(x1, y1, zi, xf - 1.0, yf - 1.0, zf),
            ),
        );
        let far = lerp(
            v,
            lerp(
                u,
                self.grad(xi, yi, z1, xf, yf, zf - 1.0),
                self.grad(x1, yi, z1, xf - 1.0, yf, zf - 1.0),
            ),
            lerp(
                u,
                self.grad(xi, y1, z1, xf, yf - 1.0, zf - 1.0),
                self.grad(x1, y1, z1, xf - 1.0, yf - 1.0, zf - 1.0),
            ),
        );

        lerp(w, near, far)
    }

    /// Fractal sum of `octaves` layers, normalized by the summed amplitudes.
    ///
    /// Returns `0.0` when no amplitude is accumulated (zero octaves or zero persistence
    /// mass).
    pub fn sample_fractal(
        &self,
        x: f32,
        y: f32,
        z: f32,
        octaves: u32,
        frequency: f32,
        persistence: f32,
        lacunarity: f32,
    ) -> f32 {
        let mut sum = 0.0;
        let mut amplitude = 1.0;
        let mut mass = 0.0;
        let mut freq = frequency;

        for _ in 0..octaves {
            sum += self.sample(x * freq, y * freq, z * freq) * amplitude;
            mass += amplitude;
            freq *= lacunarity;
            amplitude *= persistence;
        }

        if mass == 0.0 {
            0.0
        } else {
            sum / mass
        }
    }

    #[inline]
    fn grad(&self, x: u32, y: u32, z: u32, dx: f32, dy: f32, dz: f32) -> f32 {
        match self.perm.hash(x, y, z) & 15 {
            0x0 => dx + dy,
            0x1 => -dx + dy,
            0x2 => dx - dy,
            0x3 => -dx - dy,
            0x4 => dx + dz,
            0x5 => -dx + dz,
            0x6 => dx - dz,
            0x7 => -dx - dz,
            0x8 => dy + dz,
            0x9 => -dy + dz,
            0xA => dy - dz,
            0xB => -dy - dz,
            0xC => dy + dx,
            0xD => -dy + dz,
            0xE => dy - dx,
            _ => -dy - dz,
        }
    }
}

impl Default for PerlinNoise {
    fn default() -> Self {
        Self::new(0)
    }
}

impl Noise3D for PerlinNoise {
    #[inline]
    fn sample(&self, x: f32, y: f32, z: f32) -> f32 {
        PerlinNoise::sample(self, x, y, z)
    }
}

/// Split a coordinate into its lattice cell (wrapped to unsigned) and fractional offset.
#[inline]
pub(crate) fn lattice(v: f32) -> (u32, f32) {
    let cell = v.floor();
    (cell as i32 as u32, v - cell)
}

/// Quintic ease curve `6t^5 - 15t^4 + 10t^3`.
#[inline]
pub(crate) fn ease(t: f32) -> f32 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

#[inline]
fn lerp(t: f32, a: f32, b: f32) -> f32 {
    a + t * (b - a)
}
