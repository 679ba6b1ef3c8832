use std::path::Path;

use image::{ExtendedColorType, ImageBuffer, ImageFormat, Luma};
use noise_graph::prelude::{Error, ImageEncoder, PixelLayout, PreviewSurface, Result};

/// Writes packed buffers as PNG files using the `image` crate.
#[derive(Clone, Copy, Debug, Default)]
pub struct PngEncoder;

impl PngEncoder {
    pub fn new() -> Self {
        Self
    }
}

impl ImageEncoder for PngEncoder {
    fn encode(
        &self,
        path: &Path,
        data: &[u8],
        width: u32,
        height: u32,
        layout: PixelLayout,
    ) -> Result<()> {
        let expected = layout.buffer_len(width, height);
        if data.len() != expected {
            return Err(Error::Encode(format!(
                "buffer holds {} bytes, {:?} {}x{} needs {}",
                data.len(),
                layout,
                width,
                height,
                expected
            )));
        }

        let result = match layout {
            PixelLayout::Gray16 => {
                // Samples arrive big-endian; the encoder wants them as native u16.
                let samples: Vec<u16> = data
                    .chunks_exact(2)
                    .map(|b| u16::from_be_bytes([b[0], b[1]]))
                    .collect();
                let buffer = ImageBuffer::<Luma<u16>, _>::from_raw(width, height, samples)
                    .ok_or_else(|| Error::Encode("gray16 buffer size mismatch".into()))?;
                buffer.save_with_format(path, ImageFormat::Png)
            }
            PixelLayout::Gray8 => image::save_buffer_with_format(
                path,
                data,
                width,
                height,
                ExtendedColorType::L8,
                ImageFormat::Png,
            ),
            PixelLayout::Rgb24 => image::save_buffer_with_format(
                path,
                data,
                width,
                height,
                ExtendedColorType::Rgb8,
                ImageFormat::Png,
            ),
            PixelLayout::Rgba32 => image::save_buffer_with_format(
                path,
                data,
                width,
                height,
                ExtendedColorType::Rgba8,
                ImageFormat::Png,
            ),
        };
        result.map_err(|e| Error::Encode(e.to_string()))
    }
}

/// A preview surface that keeps the most recent upload in memory.
#[derive(Clone, Debug, Default)]
pub struct BufferSurface {
    data: Vec<u8>,
    size: (u32, u32),
    uploads: usize,
}

impl BufferSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn size(&self) -> (u32, u32) {
        self.size
    }

    /// Number of uploads received so far.
    pub fn uploads(&self) -> usize {
        self.uploads
    }

    /// Save the current contents as an RGB PNG.
    pub fn save_png(&self, path: impl AsRef<Path>) -> Result<()> {
        let (width, height) = self.size;
        PngEncoder.encode(path.as_ref(), &self.data, width, height, PixelLayout::Rgb24)
    }
}

impl PreviewSurface for BufferSurface {
    fn upload(&mut self, data: &[u8], width: u32, height: u32) {
        self.data.clear();
        self.data.extend_from_slice(data);
        self.size = (width, height);
        self.uploads += 1;
    }
}
