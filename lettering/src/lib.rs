// Copyright 2025 the Lettering Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Lettering turns a string into an RGBA bitmap.
//!
//! Text, either plain or lightly marked up, is laid out glyph by glyph with
//! left-to-right advance placement, word wrapping and explicit line breaks,
//! cropped to a bounding box, aligned, and composited with optional glyph
//! borders and highlight rectangles.
//!
//! Fonts are reached through a [`GlyphProvider`]; `lettering_swash` provides
//! one backed by font files.
//!
//! ```ignore
//! use lettering::{Control, LayoutContext, Style};
//!
//! let mut cx = LayoutContext::new(provider);
//! let image = cx.plain_text("Hello, world", &Style::default(), &Control::default())?;
//! ```
//!
//! ## Features
//!
//! - `markup` (enabled by default): [`LayoutContext::markup_text`], parsing markup
//!   with [roxmltree].
//! - `png`: [`RawImage::write_png`].
//!
//! [roxmltree]: https://docs.rs/roxmltree

// LINEBENDER LINT SET - lib.rs - v3
// See https://linebender.org/wiki/canonical-lints/
// These lints shouldn't apply to examples or tests.
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
// These lints shouldn't apply to examples.
#![warn(clippy::print_stdout, clippy::print_stderr)]
// Targeting e.g. 32-bit means structs containing usize can give false positives for 64-bit.
#![cfg_attr(target_pointer_width = "64", warn(clippy::trivially_copy_pass_by_ref))]
// END LINEBENDER LINT SET
#![cfg_attr(docsrs, feature(doc_cfg))]

extern crate alloc;

mod context;
mod error;
mod image;
mod raster;
mod style;

pub mod classify;
pub mod layout;
pub mod markup;
pub mod provider;

#[cfg(test)]
mod tests;

pub use peniko;
pub use peniko::Color;

pub use context::LayoutContext;
pub use error::{status_code, Error, ErrorKind};
pub use image::RawImage;
pub use layout::{Bounds, GlyphRecord, Layout};
pub use provider::{FaceId, GlyphForm, GlyphMetrics, GlyphProvider, LineMetrics, RasterizedGlyph};
pub use style::{
    Alignment, Control, CropX, CropY, CroppingStrategy, FontStyle, Style, MAX_BORDER_THICKNESS,
};
