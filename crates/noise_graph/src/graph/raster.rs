//! Grid sampling of node fields.
//!
//! [`Graph::render`] rasterizes a node straight into a packed RGB buffer for preview and
//! export. [`Heightmap`] keeps the sampled floats for whole-field operations before packing.
use tracing::debug;

use crate::error::{Error, Result};
use crate::export::PixelLayout;
use crate::graph::eval::fold_abs;
use crate::graph::{Graph, NodeId};

impl Graph {
    /// Sample `id` over a `size × size` grid at `(column / size, row / size, 0)` in row-major
    /// order, writing `trunc(v * 255)` into all three channels of each pixel.
    ///
    /// Values outside `[0, 1]` saturate to `0` or `255`.
    pub fn render(&self, id: NodeId, size: u32) -> Result<Vec<u8>> {
        let node = self.node(id)?;
        let n = size as usize;
        let scale = size as f32;
        let mut image = Vec::with_capacity(PixelLayout::Rgb24.buffer_len(size, size));

        for row in 0..n {
            for col in 0..n {
                let v = self.eval_node(node, col as f32 / scale, row as f32 / scale, 0.0);
                let b = to_u8(v);
                image.extend_from_slice(&[b, b, b]);
            }
        }

        debug!("Rendered node {} at {}x{}.", id, size, size);
        Ok(image)
    }

    /// Sample `id` over a `size × size` grid into a [`Heightmap`].
    pub fn sample_heightmap(&self, id: NodeId, size: u32) -> Result<Heightmap> {
        let node = self.node(id)?;
        let n = size as usize;
        let scale = size as f32;
        let mut map = Heightmap::new(n, n);

        for row in 0..n {
            for col in 0..n {
                map.data[row * n + col] =
                    self.eval_node(node, col as f32 / scale, row as f32 / scale, 0.0);
            }
        }
        Ok(map)
    }
}

#[inline]
fn to_u8(v: f32) -> u8 {
    (v * 255.0) as u8
}

#[inline]
fn to_u16(v: f32) -> u16 {
    (v * 65535.0) as u16
}

/// A row-major grid of scalar field samples.
#[derive(Clone, Debug, PartialEq)]
pub struct Heightmap {
    width: usize,
    height: usize,
    data: Vec<f32>,
}

impl Heightmap {
    /// Create a heightmap of the given size, initializing all values to zero.
    pub fn new(width: usize, height: usize) -> Self {
        Self::filled(width, height, 0.0)
    }

    pub fn filled(width: usize, height: usize, value: f32) -> Self {
        Self {
            width,
            height,
            data: vec![value; width * height],
        }
    }

    /// Get the size as `(width, height)`.
    pub fn size(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn data(&self) -> &[f32] {
        &self.data
    }

    /// Get the value at the given indices, returning `0.0` if out of bounds.
    pub fn get(&self, x: isize, y: isize) -> f32 {
        if x < 0 || y < 0 || x >= self.width as isize || y >= self.height as isize {
            return 0.0;
        }
        self.data[y as usize * self.width + x as usize]
    }

    /// Set the value at the given indices. Returns `false` if out of bounds.
    pub fn set(&mut self, x: usize, y: usize, value: f32) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        self.data[y * self.width + x] = value;
        true
    }

    pub fn add(&mut self, other: &Heightmap) -> Result<&mut Self> {
        self.zip_with(other, |a, b| a + b)
    }

    pub fn multiply(&mut self, other: &Heightmap) -> Result<&mut Self> {
        self.zip_with(other, |a, b| a * b)
    }

    /// Fold values below `0.5` upward.
    pub fn abs(&mut self) -> &mut Self {
        self.map(fold_abs)
    }

    pub fn invert(&mut self) -> &mut Self {
        self.map(|v| 1.0 - v)
    }

    /// Rescale to `[0, 1]` using the current minimum and maximum. A flat map becomes all
    /// zeros.
    pub fn normalize(&mut self) -> &mut Self {
        let (min, max) = self
            .data
            .iter()
            .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            });
        let range = max - min;
        if range > 0.0 {
            self.map(|v| (v - min) / range)
        } else {
            self.map(|_| 0.0)
        }
    }

    /// Pack into a byte buffer. Values are truncated after scaling to the channel range and
    /// saturate outside `[0, 1]`.
    pub fn to_bytes(&self, layout: PixelLayout) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.data.len() * layout.bytes_per_pixel());
        for &v in &self.data {
            match layout {
                PixelLayout::Gray8 => out.push(to_u8(v)),
                PixelLayout::Gray16 => out.extend_from_slice(&to_u16(v).to_be_bytes()),
                PixelLayout::Rgb24 => {
                    let b = to_u8(v);
                    out.extend_from_slice(&[b, b, b]);
                }
                PixelLayout::Rgba32 => {
                    let b = to_u8(v);
                    out.extend_from_slice(&[b, b, b, u8::MAX]);
                }
            }
        }
        out
    }

    fn map(&mut self, f: impl Fn(f32) -> f32) -> &mut Self {
        for v in &mut self.data {
            *v = f(*v);
        }
        self
    }

    fn zip_with(&mut self, other: &Heightmap, f: impl Fn(f32, f32) -> f32) -> Result<&mut Self> {
        if self.size() != other.size() {
            return Err(Error::InvalidConfig(format!(
                "heightmap sizes differ: {:?} vs {:?}",
                self.size(),
                other.size()
            )));
        }
        for (a, &b) in self.data.iter_mut().zip(&other.data) {
            *a = f(*a, b);
        }
        Ok(self)
    }
}
