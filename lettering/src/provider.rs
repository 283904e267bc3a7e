// Copyright 2025 the Lettering Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The contract between layout and whatever loads and rasterizes fonts.

use crate::{Error, FontStyle};

/// Handle to a face owned by a [`GlyphProvider`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct FaceId(pub u32);

/// Vertical metrics of a face at one pixel size, rounded to whole pixels.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct LineMetrics {
    /// Distance between consecutive baselines.
    pub line_height: i32,
    /// Distance from the top of the line to the baseline.
    pub ascender: i32,
}

impl LineMetrics {
    /// Metrics of zero extent.
    pub const ZERO: Self = Self {
        line_height: 0,
        ascender: 0,
    };

    /// Extent of the line below the baseline.
    pub fn descender(self) -> i32 {
        self.line_height - self.ascender
    }
}

/// Storage shape of a rasterized glyph.
///
/// Both shapes are handled identically by layout and compositing; the form is
/// recorded so a provider can find the same cached image again.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum GlyphForm {
    /// An embedded bitmap strike at exactly the requested size.
    SmallBitmap,
    /// A glyph rendered from its outline.
    #[default]
    Rendered,
}

/// Placement and extent of a rasterized glyph, in whole pixels.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct GlyphMetrics {
    /// Horizontal pen advance.
    pub advance: i32,
    /// Coverage bitmap width.
    pub width: u32,
    /// Coverage bitmap height.
    pub height: u32,
    /// Offset from the pen position to the left edge of the bitmap.
    pub left: i32,
    /// Offset from the baseline up to the top edge of the bitmap.
    pub top: i32,
}

/// A rasterized glyph borrowed from a provider's cache.
#[derive(Copy, Clone, Debug)]
pub struct RasterizedGlyph<'a> {
    /// Which storage shape the provider produced.
    pub form: GlyphForm,
    /// Placement and extent.
    pub metrics: GlyphMetrics,
    /// Row-major 8-bit coverage, `metrics.width * metrics.height` bytes.
    pub coverage: &'a [u8],
}

/// Resolves faces and rasterizes glyphs for layout.
///
/// A provider typically caches loaded faces and rendered glyphs. Layout calls
/// take it by exclusive reference for their whole duration, so a provider
/// shared between threads needs external synchronization.
pub trait GlyphProvider {
    /// Resolves a registered font name and style to a face.
    ///
    /// Fails with [`ErrorKind::FaceNotFound`](crate::ErrorKind::FaceNotFound).
    fn resolve_face(&mut self, font_name: &str, style: FontStyle) -> Result<FaceId, Error>;

    /// Line height and ascender of `face` at `pixel_size`.
    ///
    /// Fails with [`ErrorKind::SizeLookupFailure`](crate::ErrorKind::SizeLookupFailure).
    fn line_metrics(&mut self, face: FaceId, pixel_size: u32) -> Result<LineMetrics, Error>;

    /// Maps a character to a glyph index, `0` when the face lacks it.
    fn glyph_index(&mut self, face: FaceId, c: char) -> u32;

    /// Rasterizes a glyph.
    ///
    /// Fails with [`ErrorKind::GlyphRenderFailure`](crate::ErrorKind::GlyphRenderFailure).
    fn rasterize(
        &mut self,
        face: FaceId,
        glyph_index: u32,
        pixel_size: u32,
    ) -> Result<RasterizedGlyph<'_>, Error>;
}

impl<P: GlyphProvider + ?Sized> GlyphProvider for &mut P {
    fn resolve_face(&mut self, font_name: &str, style: FontStyle) -> Result<FaceId, Error> {
        (**self).resolve_face(font_name, style)
    }

    fn line_metrics(&mut self, face: FaceId, pixel_size: u32) -> Result<LineMetrics, Error> {
        (**self).line_metrics(face, pixel_size)
    }

    fn glyph_index(&mut self, face: FaceId, c: char) -> u32 {
        (**self).glyph_index(face, c)
    }

    fn rasterize(
        &mut self,
        face: FaceId,
        glyph_index: u32,
        pixel_size: u32,
    ) -> Result<RasterizedGlyph<'_>, Error> {
        (**self).rasterize(face, glyph_index, pixel_size)
    }
}
