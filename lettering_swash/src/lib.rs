// Copyright 2025 the Lettering Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Font registration and a [Swash]-backed glyph provider for [Lettering].
//!
//! Fonts are registered by name in a [`FontRegistry`], with up to one face per
//! [`FontStyle`](lettering::FontStyle), each read from a file or supplied as
//! in-memory data. A [`SwashProvider`] built from the registry implements
//! [`GlyphProvider`](lettering::GlyphProvider).
//!
//! ```no_run
//! use lettering::{Control, LayoutContext, Style};
//! use lettering_swash::{FontFamily, FontRegistry, SwashProvider};
//!
//! let mut registry = FontRegistry::new();
//! registry.register("default", FontFamily::new("/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf"));
//!
//! let mut cx = LayoutContext::new(SwashProvider::new(registry));
//! let image = cx.plain_text("Hello, world", &Style::default(), &Control::default())?;
//! # Ok::<(), lettering::Error>(())
//! ```
//!
//! [Swash]: https://docs.rs/swash
//! [Lettering]: https://docs.rs/lettering

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

mod provider;
mod registry;

#[cfg(test)]
mod tests;

pub use linebender_resource_handle::{Blob, FontData};

pub use provider::SwashProvider;
pub use registry::{FaceSource, FontFamily, FontRegistry};
