// Copyright 2025 the Lettering Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Finalizing a layout into a bounding box.

use super::{saturating_i32, Layout};
use crate::provider::LineMetrics;
use crate::{CropX, CropY, CroppingStrategy, Error, ErrorKind};

/// Bounding box of a finalized layout.
///
/// `x_offset` and `y_offset` locate the top-left corner of the box in pen
/// space (y up); the box extends `width` to the right and `height` down.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Bounds {
    /// Pen-space x of the left edge.
    pub x_offset: i32,
    /// Pen-space y of the top edge.
    pub y_offset: i32,
    /// Width in pixels, never negative.
    pub width: i32,
    /// Height in pixels, never negative.
    pub height: i32,
}

impl Layout {
    /// Commits any open line and computes the bounding box.
    ///
    /// `fixed_width` is the output width for [`CropX::Width`], which fails
    /// when it is zero. [`CropY::Height`] is not supported. After this call
    /// the layout accepts no more text.
    pub fn finalize(
        &mut self,
        cropping: CroppingStrategy,
        fixed_width: u32,
    ) -> Result<Bounds, Error> {
        if self.is_finalized() {
            return Err(Error::with_message(
                ErrorKind::InvalidLayoutState,
                "layout is already finalized",
            ));
        }
        if self.line_start != self.glyphs.len() {
            self.commit_line(LineMetrics::ZERO);
        }

        let (left, right) = match cropping.x {
            CropX::Natural => (0, self.natural_right()),
            CropX::Tight => self.ink_x(),
            CropX::Width => {
                if fixed_width == 0 {
                    return Err(Error::with_message(
                        ErrorKind::UnsupportedCroppingStrategy,
                        "fixed-width cropping needs a nonzero width",
                    ));
                }
                let (left, _) = self.ink_x();
                (left, left.saturating_add(saturating_i32(fixed_width)))
            }
            CropX::Failsafe => {
                let (left, right) = self.ink_x();
                (left.min(0), right.max(self.natural_right()))
            }
        };
        let (top, bottom) = match cropping.y {
            CropY::Natural => (0, self.natural_bottom().unwrap_or(0)),
            CropY::Tight => self.ink_y(),
            CropY::Height => {
                return Err(Error::with_message(
                    ErrorKind::UnsupportedCroppingStrategy,
                    "fixed-height cropping is not supported",
                ));
            }
            CropY::Failsafe => {
                let (top, bottom) = self.ink_y();
                let bottom = match self.natural_bottom() {
                    Some(natural) => bottom.min(natural),
                    None => bottom,
                };
                (top.max(0), bottom)
            }
        };

        let bounds = Bounds {
            x_offset: left,
            y_offset: top,
            width: right - left,
            height: top - bottom,
        };
        log::debug!(
            "finalized {} glyphs into {}x{} at ({}, {})",
            self.glyphs.len(),
            bounds.width,
            bounds.height,
            bounds.x_offset,
            bounds.y_offset
        );
        self.bounds = Some(bounds);
        self.line_start = self.glyphs.len();
        self.word_start = self.glyphs.len();
        self.pen_x = 0;
        Ok(bounds)
    }

    /// Furthest advance, measured from the pen origin.
    fn natural_right(&self) -> i32 {
        self.glyphs
            .iter()
            .map(|glyph| glyph.x + glyph.advance)
            .fold(0, i32::max)
    }

    /// Bottom of the last line, using that line's own metrics.
    fn natural_bottom(&self) -> Option<i32> {
        self.glyphs
            .last()
            .map(|glyph| glyph.y + glyph.ascender - glyph.line_height)
    }

    /// Left and right ink edges of visible glyphs, borders included.
    fn ink_x(&self) -> (i32, i32) {
        self.glyphs
            .iter()
            .filter(|glyph| glyph.is_visible())
            .map(|glyph| {
                let left = glyph.x + glyph.left;
                (
                    left - glyph.border_thickness,
                    left + glyph.width + glyph.border_thickness,
                )
            })
            .reduce(|(l0, r0), (l1, r1)| (l0.min(l1), r0.max(r1)))
            .unwrap_or((0, 0))
    }

    /// Top and bottom ink edges of visible glyphs, borders included.
    fn ink_y(&self) -> (i32, i32) {
        self.glyphs
            .iter()
            .filter(|glyph| glyph.is_visible())
            .map(|glyph| {
                let top = glyph.y + glyph.top;
                (
                    top + glyph.border_thickness,
                    top - glyph.height - glyph.border_thickness,
                )
            })
            .reduce(|(t0, b0), (t1, b1)| (t0.max(t1), b0.min(b1)))
            .unwrap_or((0, 0))
    }
}
