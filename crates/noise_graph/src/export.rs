//! Collaborator interfaces for image export and preview display.
//!
//! The crate produces packed byte buffers; turning them into files or display textures is
//! left to implementations of [`ImageEncoder`] and [`PreviewSurface`] supplied by the host.
use std::path::Path;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Pixel layout of a packed byte buffer.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum PixelLayout {
    Gray8,
    /// 16-bit gray, big-endian per sample.
    Gray16,
    #[default]
    Rgb24,
    Rgba32,
}

impl PixelLayout {
    pub fn bytes_per_pixel(self) -> usize {
        match self {
            PixelLayout::Gray8 => 1,
            PixelLayout::Gray16 => 2,
            PixelLayout::Rgb24 => 3,
            PixelLayout::Rgba32 => 4,
        }
    }

    /// Buffer length for a `width × height` image.
    pub fn buffer_len(self, width: u32, height: u32) -> usize {
        width as usize * height as usize * self.bytes_per_pixel()
    }
}

/// Writes packed pixel buffers to files.
pub trait ImageEncoder {
    fn encode(
        &self,
        path: &Path,
        data: &[u8],
        width: u32,
        height: u32,
        layout: PixelLayout,
    ) -> Result<()>;
}

/// Receives rendered previews for display. Buffers are always [`PixelLayout::Rgb24`].
pub trait PreviewSurface {
    fn upload(&mut self, data: &[u8], width: u32, height: u32);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buffer_len_scales_with_layout() {
        assert_eq!(PixelLayout::Gray8.buffer_len(4, 2), 8);
        assert_eq!(PixelLayout::Gray16.buffer_len(4, 2), 16);
        assert_eq!(PixelLayout::Rgb24.buffer_len(4, 2), 24);
        assert_eq!(PixelLayout::Rgba32.buffer_len(4, 2), 32);
    }
}
