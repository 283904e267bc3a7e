// Copyright 2025 the Lettering Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use super::GlyphRecord;
use crate::Alignment;

/// Shifts each line right by its free space (halved for centering).
///
/// Lines are the runs of consecutive glyphs sharing a baseline. The free space
/// is measured to the right edge of the last visible glyph, so trailing
/// whitespace hangs. Overflowing lines are never pulled left.
pub(crate) fn align(glyphs: &mut [GlyphRecord], width: i32, alignment: Alignment) {
    if alignment == Alignment::Left {
        return;
    }
    let mut start = 0;
    while start < glyphs.len() {
        let baseline = glyphs[start].y;
        let len = glyphs[start..]
            .iter()
            .take_while(|glyph| glyph.y == baseline)
            .count();
        let line = &mut glyphs[start..start + len];
        start += len;

        let last = line
            .iter()
            .rposition(GlyphRecord::is_visible)
            .unwrap_or(0);
        let mut shift = width - (line[last].x + line[last].width);
        if alignment == Alignment::Center {
            shift /= 2;
        }
        if shift > 0 {
            for glyph in line {
                glyph.x += shift;
            }
        }
    }
}
