// Copyright 2025 the Lettering Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Compositing a finalized layout into an RGBA image.
//!
//! Painting happens on a float working buffer with straight (unpremultiplied)
//! alpha, in three passes: highlight rectangles, glyph borders, glyph fills.
//! The buffer is quantized to 8 bits per channel at the end.

use alloc::vec::Vec;

use peniko::Color;

use crate::layout::{Bounds, GlyphRecord, Layout};
use crate::provider::GlyphProvider;
use crate::{Error, ErrorKind, RawImage};

#[derive(Copy, Clone, PartialEq, Eq)]
enum Pass {
    Border,
    Fill,
}

impl Layout {
    /// Paints the layout over `background`.
    ///
    /// Fails with [`ErrorKind::InvalidLayoutState`] before
    /// [`Layout::finalize`]. Glyph images are fetched again from `provider`,
    /// which must be the provider the layout was built with.
    pub fn rasterize<P: GlyphProvider + ?Sized>(
        &self,
        provider: &mut P,
        background: Color,
    ) -> Result<RawImage, Error> {
        let bounds = self.bounds().ok_or_else(|| {
            Error::with_message(
                ErrorKind::InvalidLayoutState,
                "layout must be finalized before rasterizing",
            )
        })?;
        let mut canvas = Canvas::new(bounds.width, bounds.height, background)?;

        if self.has_highlights() {
            for glyph in self.glyphs().iter().filter(|glyph| glyph.highlight) {
                canvas.fill_rect(
                    glyph.x - bounds.x_offset,
                    bounds.y_offset - (glyph.y + glyph.ascender),
                    glyph.advance,
                    glyph.line_height,
                    glyph.highlight_color,
                );
            }
        }

        let passes: &[Pass] = if self.has_borders() {
            &[Pass::Border, Pass::Fill]
        } else {
            &[Pass::Fill]
        };
        for &pass in passes {
            for glyph in self.glyphs() {
                if pass == Pass::Border && glyph.border_thickness == 0 {
                    continue;
                }
                let Some(face) = glyph.face else {
                    continue;
                };
                let image = provider.rasterize(face, glyph.glyph_index, glyph.pixel_size)?;
                let coverage = Coverage::new(image.coverage, glyph)?;
                let x = glyph.x + glyph.left - bounds.x_offset;
                let y = bounds.y_offset - (glyph.y + glyph.top);
                match pass {
                    Pass::Border => canvas.smear(
                        &coverage,
                        x,
                        y,
                        glyph.border_color,
                        glyph.border_thickness,
                    ),
                    Pass::Fill => canvas.draw(&coverage, x, y, glyph.text_color, 1.0),
                }
            }
        }

        let data = canvas.into_rgba8()?;
        Ok(raw_image(data, bounds))
    }
}

fn raw_image(data: Vec<u8>, bounds: Bounds) -> RawImage {
    RawImage {
        data,
        width: u32::try_from(bounds.width).unwrap_or(0),
        height: u32::try_from(bounds.height).unwrap_or(0),
        x0: bounds.x_offset,
        y0: bounds.y_offset,
    }
}

/// A glyph's coverage mask, checked against the extent recorded at layout.
struct Coverage<'a> {
    data: &'a [u8],
    width: i32,
    height: i32,
}

impl<'a> Coverage<'a> {
    fn new(data: &'a [u8], glyph: &GlyphRecord) -> Result<Self, Error> {
        let expected = usize::try_from(glyph.width)
            .ok()
            .zip(usize::try_from(glyph.height).ok())
            .and_then(|(w, h)| w.checked_mul(h));
        match expected {
            Some(len) if data.len() >= len => Ok(Self {
                data,
                width: glyph.width,
                height: glyph.height,
            }),
            _ => Err(Error::with_message(
                ErrorKind::GlyphRenderFailure,
                "coverage does not match the glyph extent",
            )),
        }
    }
}

/// Float RGBA working buffer.
struct Canvas {
    width: i32,
    height: i32,
    pixels: Vec<[f32; 4]>,
}

impl Canvas {
    fn new(width: i32, height: i32, background: Color) -> Result<Self, Error> {
        let len = usize::try_from(width)
            .ok()
            .zip(usize::try_from(height).ok())
            .and_then(|(w, h)| w.checked_mul(h))
            .ok_or_else(|| Error::with_message(ErrorKind::AllocationFailure, "bad image size"))?;
        let mut pixels = Vec::new();
        pixels.try_reserve_exact(len)?;
        pixels.resize(len, background.components);
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Visible part of a `width` x `height` block placed at `(x, y)`, as
    /// ranges of block-local columns and rows.
    fn clip(
        &self,
        x: i32,
        y: i32,
        width: i32,
        height: i32,
    ) -> (core::ops::Range<i32>, core::ops::Range<i32>) {
        let columns = (-x).max(0)..width.min(self.width - x).max(0);
        let rows = (-y).max(0)..height.min(self.height - y).max(0);
        (columns, rows)
    }

    fn pixel_mut(&mut self, x: i32, y: i32) -> &mut [f32; 4] {
        // Callers only pass coordinates inside the canvas.
        let index = y as usize * self.width as usize + x as usize;
        &mut self.pixels[index]
    }

    fn fill_rect(&mut self, x: i32, y: i32, width: i32, height: i32, color: Color) {
        let [r, g, b, a] = color.components;
        let (columns, rows) = self.clip(x, y, width, height);
        for j in rows {
            for i in columns.clone() {
                blend(self.pixel_mut(x + i, y + j), [r, g, b], a);
            }
        }
    }

    /// Composites `color` through a coverage mask, scaling alpha by `strength`.
    fn draw(&mut self, coverage: &Coverage<'_>, x: i32, y: i32, color: Color, strength: f32) {
        let [r, g, b, a] = color.components;
        let alpha = a * strength;
        let (columns, rows) = self.clip(x, y, coverage.width, coverage.height);
        for j in rows {
            for i in columns.clone() {
                let value = coverage.data[(j * coverage.width + i) as usize];
                if value != 0 {
                    let source_alpha = f32::from(value) / 255.0 * alpha;
                    blend(self.pixel_mut(x + i, y + j), [r, g, b], source_alpha);
                }
            }
        }
    }

    /// Smears a coverage mask over a disc of radius `thickness`, fading out
    /// over one more pixel, to paint a soft border.
    fn smear(&mut self, coverage: &Coverage<'_>, x: i32, y: i32, color: Color, thickness: i32) {
        if thickness == 0 {
            return;
        }
        let outer = thickness as f32;
        for i in -thickness..=thickness {
            for j in -thickness..=thickness {
                let r = ((i * i + j * j) as f32).sqrt();
                if r <= outer {
                    self.draw(coverage, x + i, y + j, color, 1.0);
                } else if r <= outer + 1.0 {
                    self.draw(coverage, x + i, y + j, color, outer + 1.0 - r);
                }
            }
        }
    }

    fn into_rgba8(self) -> Result<Vec<u8>, Error> {
        let mut data = Vec::new();
        data.try_reserve_exact(self.pixels.len() * 4)?;
        for pixel in &self.pixels {
            data.extend(pixel.iter().map(|&channel| quantize(channel)));
        }
        Ok(data)
    }
}

/// Composites `rgb` at `alpha` over `dest` with the "over" operator.
///
/// When both alphas are zero the result is undefined, and `dest` is left
/// unchanged.
fn blend(dest: &mut [f32; 4], rgb: [f32; 3], alpha: f32) {
    let remaining = (1.0 - alpha) * dest[3];
    let total = alpha + remaining;
    if total <= 0.0 {
        return;
    }
    let source = alpha / total;
    let kept = remaining / total;
    for (channel, value) in dest.iter_mut().zip(rgb) {
        *channel = value * source + *channel * kept;
    }
    dest[3] = total;
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "Channels are in 0..=1; truncation toward zero is the intended quantization."
)]
fn quantize(channel: f32) -> u8 {
    (channel * 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::blend;

    #[test]
    fn blend_over_opaque() {
        let mut dest = [0.0, 0.0, 0.0, 1.0];
        blend(&mut dest, [1.0, 1.0, 1.0], 0.5);
        assert_eq!(dest, [0.5, 0.5, 0.5, 1.0]);
    }

    #[test]
    fn blend_over_transparent_keeps_source_color() {
        let mut dest = [0.2, 0.4, 0.6, 0.0];
        blend(&mut dest, [1.0, 0.0, 0.0], 0.25);
        assert_eq!(dest, [1.0, 0.0, 0.0, 0.25]);
    }

    #[test]
    fn zero_alpha_over_transparent_is_a_no_op() {
        let mut dest = [0.2, 0.4, 0.6, 0.0];
        blend(&mut dest, [1.0, 1.0, 1.0], 0.0);
        assert_eq!(dest, [0.2, 0.4, 0.6, 0.0]);
    }
}
