// Copyright 2025 the Lettering Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A glyph provider drawing every glyph as a solid box.
//!
//! All metrics derive from the pixel size `px`:
//!
//! - line height `px + px / 4`, ascender `px`;
//! - whitespace advances `px / 2` and has no bitmap;
//! - other glyphs advance `px / 2` (`W` advances `px`), with a bitmap two
//!   pixels narrower than the advance, `px * 3 / 4` tall, starting one pixel
//!   right of the pen and sitting on the baseline;
//! - bold faces add one pixel to both advance and bitmap width.

use crate::provider::{FaceId, GlyphForm, GlyphMetrics, GlyphProvider, LineMetrics, RasterizedGlyph};
use crate::{Error, ErrorKind, FontStyle};

pub(crate) struct BoxFontProvider {
    fonts: Vec<&'static str>,
    /// Characters reported as missing from every face.
    pub(crate) missing: Vec<char>,
    /// Glyph index whose rasterization fails.
    pub(crate) failing_glyph: Option<u32>,
    /// Number of `rasterize` calls so far.
    pub(crate) rasterize_calls: usize,
    solid: Vec<u8>,
}

impl BoxFontProvider {
    /// A provider with the fonts `Box` and `Other` registered.
    pub(crate) fn new() -> Self {
        Self {
            fonts: vec!["Box", "Other"],
            missing: Vec::new(),
            failing_glyph: None,
            rasterize_calls: 0,
            solid: Vec::new(),
        }
    }

    /// The face `resolve_face` returns for a registered font.
    pub(crate) fn face(&self, font_name: &str, style: FontStyle) -> FaceId {
        let index = self
            .fonts
            .iter()
            .position(|name| *name == font_name)
            .expect("font is registered");
        FaceId(index as u32 * 4 + style_index(style))
    }
}

fn style_index(style: FontStyle) -> u32 {
    match style {
        FontStyle::Normal => 0,
        FontStyle::Italic => 1,
        FontStyle::Bold => 2,
        FontStyle::BoldItalic => 3,
    }
}

fn is_bold(face: FaceId) -> bool {
    face.0 % 4 >= 2
}

impl GlyphProvider for BoxFontProvider {
    fn resolve_face(&mut self, font_name: &str, style: FontStyle) -> Result<FaceId, Error> {
        match self.fonts.iter().position(|name| *name == font_name) {
            Some(index) => Ok(FaceId(index as u32 * 4 + style_index(style))),
            None => Err(Error::face_not_found(font_name)),
        }
    }

    fn line_metrics(&mut self, _face: FaceId, pixel_size: u32) -> Result<LineMetrics, Error> {
        if pixel_size == 0 {
            return Err(Error::new(ErrorKind::SizeLookupFailure));
        }
        let px = pixel_size as i32;
        Ok(LineMetrics {
            line_height: px + px / 4,
            ascender: px,
        })
    }

    fn glyph_index(&mut self, _face: FaceId, c: char) -> u32 {
        if self.missing.contains(&c) {
            0
        } else {
            c as u32
        }
    }

    fn rasterize(
        &mut self,
        face: FaceId,
        glyph_index: u32,
        pixel_size: u32,
    ) -> Result<RasterizedGlyph<'_>, Error> {
        self.rasterize_calls += 1;
        if self.failing_glyph == Some(glyph_index) {
            return Err(Error::new(ErrorKind::GlyphRenderFailure));
        }
        let form = if pixel_size <= 12 {
            GlyphForm::SmallBitmap
        } else {
            GlyphForm::Rendered
        };
        let px = pixel_size as i32;
        let c = char::from_u32(glyph_index).unwrap_or('?');
        if c.is_whitespace() || ('\u{2000}'..='\u{200D}').contains(&c) {
            return Ok(RasterizedGlyph {
                form,
                metrics: GlyphMetrics {
                    advance: px / 2,
                    ..GlyphMetrics::default()
                },
                coverage: &[],
            });
        }

        let bold = i32::from(is_bold(face));
        let advance = if c == 'W' { px } else { px / 2 } + bold;
        let width = (advance - 2).max(1) as u32;
        let height = (px * 3 / 4).max(1) as u32;
        let len = (width * height) as usize;
        if self.solid.len() < len {
            self.solid.resize(len, 255);
        }
        Ok(RasterizedGlyph {
            form,
            metrics: GlyphMetrics {
                advance,
                width,
                height,
                left: 1,
                top: height as i32,
            },
            coverage: &self.solid[..len],
        })
    }
}
