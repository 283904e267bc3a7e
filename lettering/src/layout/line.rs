// Copyright 2025 the Lettering Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Committing lines.

use super::{GlyphRecord, Layout};
use crate::provider::LineMetrics;

impl Layout {
    /// Commits every glyph since the start of the line.
    pub(super) fn commit_line(&mut self, fallback: LineMetrics) {
        let end = self.glyphs.len();
        let line = &mut self.glyphs[self.line_start..end];
        let metrics = line_extent(line, fallback);
        let baseline = self.line_top - metrics.ascender;
        place(line, baseline, metrics);
        log::trace!(
            "committed line of {} glyphs at baseline {baseline}",
            end - self.line_start
        );

        self.line_start = end;
        self.word_start = end;
        self.line_top = baseline - metrics.descender();
        self.pen_x = 0;
    }

    /// Commits the glyphs before the pending word and moves that word to the
    /// start of a new line.
    ///
    /// The word keeps its internal spacing; only its origin moves. A word that
    /// already starts its line stays where it is, overflowing the wrap width.
    pub(super) fn commit_most_of_line(&mut self) {
        let (line_start, word_start) = (self.line_start, self.word_start);
        if line_start == word_start {
            return;
        }
        let Some(word_x) = self.glyphs.get(word_start).map(|glyph| glyph.x) else {
            return;
        };
        let line = &mut self.glyphs[line_start..word_start];
        let metrics = line_extent(line, LineMetrics::ZERO);
        let baseline = self.line_top - metrics.ascender;
        place(line, baseline, metrics);
        for glyph in &mut self.glyphs[word_start..] {
            glyph.x -= word_x;
        }
        log::trace!("wrapped word at glyph {word_start}, shifted left by {word_x}");

        self.line_start = word_start;
        self.line_top = baseline - metrics.descender();
        self.pen_x -= word_x;
    }
}

/// The tallest ascender and deepest descender on a line, at least `fallback`.
fn line_extent(glyphs: &[GlyphRecord], fallback: LineMetrics) -> LineMetrics {
    let (ascender, descender) = glyphs.iter().fold(
        (fallback.ascender, fallback.descender()),
        |(ascender, descender), glyph| {
            (
                ascender.max(glyph.ascender),
                descender.max(glyph.line_height - glyph.ascender),
            )
        },
    );
    LineMetrics {
        line_height: ascender + descender,
        ascender,
    }
}

fn place(glyphs: &mut [GlyphRecord], baseline: i32, metrics: LineMetrics) {
    for glyph in glyphs {
        glyph.y = baseline;
        glyph.line_height = metrics.line_height;
        glyph.ascender = metrics.ascender;
    }
}
