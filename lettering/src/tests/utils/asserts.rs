// Copyright 2025 the Lettering Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Various helper functions to assert truths during testing.

use crate::{GlyphRecord, RawImage};

/// Assert that two glyph sequences are equal, field by field.
pub(crate) fn assert_eq_glyphs(a: &[GlyphRecord], b: &[GlyphRecord], case: &str) {
    assert_eq!(a.len(), b.len(), "{case} glyph count mismatch");
    for (i, (a, b)) in a.iter().zip(b).enumerate() {
        assert_eq!(a.face, b.face, "{case} glyph {i} face mismatch");
        assert_eq!(a.glyph_index, b.glyph_index, "{case} glyph {i} index mismatch");
        assert_eq!(a.advance, b.advance, "{case} glyph {i} advance mismatch");
        assert_eq!((a.x, a.y), (b.x, b.y), "{case} glyph {i} position mismatch");
        assert_eq!(
            (a.ascender, a.line_height),
            (b.ascender, b.line_height),
            "{case} glyph {i} line metrics mismatch"
        );
        // Catch any fields not compared above.
        assert_eq!(a, b, "{case} glyph {i} mismatch");
    }
}

/// Positions of glyph origins.
pub(crate) fn positions(glyphs: &[GlyphRecord]) -> Vec<(i32, i32)> {
    glyphs.iter().map(|glyph| (glyph.x, glyph.y)).collect()
}

/// Glyph indices as characters, with ghost records shown as spaces.
pub(crate) fn chars(glyphs: &[GlyphRecord]) -> String {
    glyphs
        .iter()
        .map(|glyph| {
            if glyph.is_visible() {
                char::from_u32(glyph.glyph_index).unwrap_or('\u{FFFD}')
            } else {
                ' '
            }
        })
        .collect()
}

/// Assert that every pixel of `image` inside the half-open rectangle equals
/// `inside`, and every other pixel equals `outside`.
pub(crate) fn assert_rect(
    image: &RawImage,
    (x0, y0, x1, y1): (u32, u32, u32, u32),
    inside: [u8; 4],
    outside: [u8; 4],
) {
    for y in 0..image.height {
        for x in 0..image.width {
            let expected = if (x0..x1).contains(&x) && (y0..y1).contains(&y) {
                inside
            } else {
                outside
            };
            assert_eq!(image.pixel(x, y), Some(expected), "pixel ({x}, {y})");
        }
    }
}
