// Copyright 2025 the Lettering Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layout types.
//!
//! A [`Layout`] accumulates glyph records run by run, breaking lines on
//! explicit line breaks and wrapping whole words when they cross the wrap
//! width. Once every run is appended it is [finalized](Layout::finalize) into
//! a bounding box, [aligned](Layout::align), and finally
//! [rasterized](Layout::rasterize).

mod alignment;
mod bounds;
mod line;

use alloc::vec::Vec;

use peniko::Color;

use crate::classify::{decode_char, is_collapsible_whitespace, is_line_break, is_word_break, Decoded};
use crate::provider::{FaceId, GlyphForm, GlyphProvider, LineMetrics};
use crate::{Alignment, Error, ErrorKind, Style, MAX_BORDER_THICKNESS};

pub use bounds::Bounds;

/// Capacity the glyph arena grows to on its first overflow.
const MIN_CAPACITY: usize = 10;

/// One laid-out character.
///
/// Characters without a visible form, such as spaces, produce "ghost" records
/// with no face and zero bitmap geometry; they still occupy their advance.
///
/// Coordinates are in pen space: `x` grows to the right from the start of the
/// line, `y` is the baseline and grows upwards, so successive lines have
/// decreasing `y`.
#[derive(Clone, Debug, PartialEq)]
pub struct GlyphRecord {
    /// Face the glyph was rasterized from, `None` for ghosts.
    pub face: Option<FaceId>,
    /// Glyph index within the face.
    pub glyph_index: u32,
    /// Pixel size the glyph was rasterized at.
    pub pixel_size: u32,
    /// Storage shape the provider produced.
    pub form: GlyphForm,
    /// Horizontal pen advance.
    pub advance: i32,
    /// Pen position of the glyph origin.
    pub x: i32,
    /// Baseline of the glyph's line. Zero until the line is committed.
    pub y: i32,
    /// Ascender of the glyph's face, replaced by the line ascender on commit.
    pub ascender: i32,
    /// Line height of the glyph's face, replaced by the line height on commit.
    pub line_height: i32,
    /// Offset from `x` to the left edge of the bitmap.
    pub left: i32,
    /// Offset from the baseline up to the top edge of the bitmap.
    pub top: i32,
    /// Bitmap width.
    pub width: i32,
    /// Bitmap height.
    pub height: i32,
    /// Fill color.
    pub text_color: Color,
    /// Border thickness in pixels.
    pub border_thickness: i32,
    /// Border color.
    pub border_color: Color,
    /// Whether a highlight rectangle is painted behind the glyph.
    pub highlight: bool,
    /// Highlight color.
    pub highlight_color: Color,
}

impl GlyphRecord {
    /// Whether the glyph has a visible form.
    pub fn is_visible(&self) -> bool {
        self.face.is_some()
    }
}

/// Glyph accumulator for one paragraph of text.
#[derive(Clone, Debug)]
pub struct Layout {
    glyphs: Vec<GlyphRecord>,
    /// First glyph of the line being built.
    line_start: usize,
    /// First glyph after the last word break on the line being built.
    word_start: usize,
    /// Pen position of the next glyph.
    pen_x: i32,
    /// Top of the line being built.
    line_top: i32,
    /// Set once by [`Layout::finalize`]; no appends are accepted afterwards.
    bounds: Option<Bounds>,
    any_borders: bool,
    any_highlights: bool,
}

impl Default for Layout {
    fn default() -> Self {
        Self::new()
    }
}

impl Layout {
    /// Creates an empty layout.
    pub fn new() -> Self {
        Self {
            glyphs: Vec::new(),
            line_start: 0,
            word_start: 0,
            pen_x: 0,
            line_top: 0,
            bounds: None,
            any_borders: false,
            any_highlights: false,
        }
    }

    /// Creates an empty layout with room for `capacity` glyphs.
    pub fn with_capacity(capacity: usize) -> Result<Self, Error> {
        let mut layout = Self::new();
        layout.glyphs.try_reserve_exact(capacity)?;
        Ok(layout)
    }

    /// The laid-out glyphs, in input order.
    pub fn glyphs(&self) -> &[GlyphRecord] {
        &self.glyphs
    }

    /// The bounding box, once finalized.
    pub fn bounds(&self) -> Option<Bounds> {
        self.bounds
    }

    /// Width of the bounding box, once finalized.
    pub fn width(&self) -> Option<i32> {
        self.bounds.map(|b| b.width)
    }

    /// Height of the bounding box, once finalized.
    pub fn height(&self) -> Option<i32> {
        self.bounds.map(|b| b.height)
    }

    /// Whether [`Layout::finalize`] has succeeded.
    pub fn is_finalized(&self) -> bool {
        self.bounds.is_some()
    }

    /// Whether any glyph has a border.
    pub fn has_borders(&self) -> bool {
        self.any_borders
    }

    /// Whether any glyph is highlighted.
    pub fn has_highlights(&self) -> bool {
        self.any_highlights
    }

    /// Current pen position on the line being built.
    pub fn pen_x(&self) -> i32 {
        self.pen_x
    }

    /// Appends up to `max_chars` characters of `text` in `style`.
    ///
    /// Decoding stops early at a NUL byte. When `collapse_whitespace` is set,
    /// runs of collapsible whitespace become a single space and whitespace at
    /// the start of a line is dropped; otherwise line break characters commit
    /// the current line. With a nonzero `wrap_width`, a word whose ink crosses
    /// the wrap width is moved to a new line as a unit.
    ///
    /// Returns the number of bytes consumed. On error, glyphs appended before
    /// the failure stay in the layout, which should be discarded.
    pub fn append_run<P: GlyphProvider + ?Sized>(
        &mut self,
        provider: &mut P,
        text: &[u8],
        style: &Style<'_>,
        wrap_width: u32,
        collapse_whitespace: bool,
        max_chars: Option<usize>,
    ) -> Result<usize, Error> {
        if self.is_finalized() {
            return Err(Error::with_message(
                ErrorKind::InvalidLayoutState,
                "cannot append to a finalized layout",
            ));
        }
        let face = provider.resolve_face(&style.font_name, style.font_style)?;
        let pixel_size = style.pixel_size();
        let metrics = provider.line_metrics(face, pixel_size)?;
        let wrap_width = saturating_i32(wrap_width);
        let border_thickness = saturating_i32(style.border_thickness.min(MAX_BORDER_THICKNESS));

        let mut cursor = text;
        let mut prev_was_whitespace = false;
        for _ in 0..max_chars.unwrap_or(usize::MAX) {
            let mut c = match decode_char(&mut cursor) {
                Decoded::Char(c) => c,
                Decoded::End => break,
                Decoded::Invalid => {
                    return Err(Error::invalid_encoding(text.len() - cursor.len()));
                }
            };
            if collapse_whitespace {
                if is_collapsible_whitespace(c) {
                    if prev_was_whitespace || self.pen_x == 0 {
                        continue;
                    }
                    c = ' ';
                    prev_was_whitespace = true;
                } else {
                    prev_was_whitespace = false;
                }
            } else if is_line_break(c) {
                self.commit_line(metrics);
                continue;
            }

            let mut glyph_index = provider.glyph_index(face, c);
            if glyph_index == 0 {
                log::warn!("no glyph for {c:?} in font `{}`", style.font_name);
                glyph_index = provider.glyph_index(face, '?');
            }
            let glyph = provider.rasterize(face, glyph_index, pixel_size)?;
            let (form, glyph_metrics) = (glyph.form, glyph.metrics);

            self.reserve_one()?;
            let mut record = GlyphRecord {
                face: None,
                glyph_index: 0,
                pixel_size,
                form,
                advance: glyph_metrics.advance,
                x: self.pen_x,
                y: 0,
                ascender: metrics.ascender,
                line_height: metrics.line_height,
                left: 0,
                top: 0,
                width: 0,
                height: 0,
                text_color: style.text_color,
                border_thickness: 0,
                border_color: style.border_color,
                highlight: style.highlight,
                highlight_color: style.highlight_color,
            };
            if glyph_metrics.height != 0 {
                record.face = Some(face);
                record.glyph_index = glyph_index;
                record.left = glyph_metrics.left;
                record.top = glyph_metrics.top;
                record.width = saturating_i32(glyph_metrics.width);
                record.height = saturating_i32(glyph_metrics.height);
                record.border_thickness = border_thickness;
                self.any_borders |= border_thickness != 0;
            }
            self.any_highlights |= style.highlight;
            let ink_right = record.x + record.left + record.width + record.border_thickness;
            self.glyphs.push(record);
            self.pen_x += glyph_metrics.advance;

            if is_word_break(c) {
                self.word_start = self.glyphs.len();
            } else if wrap_width > 0 && ink_right > wrap_width {
                self.commit_most_of_line();
            }
        }
        Ok(text.len() - cursor.len())
    }

    /// Ends the line being built.
    ///
    /// `fallback` is the least extent the line takes, so that an empty line
    /// still advances by the height of its font.
    pub fn break_line(&mut self, fallback: LineMetrics) -> Result<(), Error> {
        if self.is_finalized() {
            return Err(Error::with_message(
                ErrorKind::InvalidLayoutState,
                "cannot break a line of a finalized layout",
            ));
        }
        self.commit_line(fallback);
        Ok(())
    }

    /// Shifts lines horizontally within the bounding box.
    ///
    /// Has no effect before [`Layout::finalize`].
    pub fn align(&mut self, alignment: Alignment) {
        if let Some(bounds) = self.bounds {
            alignment::align(&mut self.glyphs, bounds.width, alignment);
        }
    }

    /// Grows the arena by doubling when it is full.
    fn reserve_one(&mut self) -> Result<(), Error> {
        let len = self.glyphs.len();
        if len == self.glyphs.capacity() {
            let target = self.glyphs.capacity().saturating_mul(2).max(MIN_CAPACITY);
            self.glyphs.try_reserve_exact(target - len)?;
        }
        Ok(())
    }
}

pub(crate) fn saturating_i32(value: u32) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}
