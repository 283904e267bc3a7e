// Copyright 2025 the Lettering Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT


use std::path::PathBuf;

/// A font file to test rasterization with.
///
/// Taken from `LETTERING_TEST_FONT`, falling back to a common system font.
/// Tests that need real glyphs are skipped when neither exists.
pub(crate) fn test_font() -> Option<PathBuf> {
    let path = std::env::var_os("LETTERING_TEST_FONT")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf"));
    if path.is_file() {
        Some(path)
    } else {
        log::warn!("no test font at {}, skipping", path.display());
        None
    }
}
