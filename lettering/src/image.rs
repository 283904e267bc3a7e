// Copyright 2025 the Lettering Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec::Vec;

/// A row-major RGBA8 image produced by rasterizing a layout.
///
/// `(x0, y0)` is the pen-space position (y up) of the top-left pixel.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RawImage {
    /// `width * height * 4` bytes of straight-alpha RGBA.
    pub data: Vec<u8>,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Pen-space x of the left edge.
    pub x0: i32,
    /// Pen-space y of the top edge.
    pub y0: i32,
}

impl RawImage {
    /// Whether the image has no pixels.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// The RGBA value at `(x, y)`, counting rows from the top.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let index = (y as usize * self.width as usize + x as usize) * 4;
        let pixel = self.data.get(index..index + 4)?;
        pixel.try_into().ok()
    }

    /// Frees the pixel buffer and resets the header.
    ///
    /// Dropping the image frees it too; this is for callers that keep the
    /// header around, for example in a reused output slot.
    pub fn release(&mut self) {
        self.data = Vec::new();
        self.width = 0;
        self.height = 0;
        self.x0 = 0;
        self.y0 = 0;
    }

    /// Takes ownership of the pixel buffer.
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    /// Encodes the image as an 8-bit RGBA PNG.
    #[cfg(feature = "png")]
    pub fn write_png<W: std::io::Write>(&self, writer: W) -> Result<(), png::EncodingError> {
        let mut encoder = png::Encoder::new(writer, self.width, self.height);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header()?;
        writer.write_image_data(&self.data)
    }
}
