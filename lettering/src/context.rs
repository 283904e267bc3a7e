// Copyright 2025 the Lettering Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Context for rendering text.

use crate::layout::{saturating_i32, Layout};
use crate::provider::GlyphProvider;
use crate::{Alignment, Control, Error, RawImage, Style};

/// Renders text to images with a glyph provider.
///
/// The context owns (or exclusively borrows, via `&mut P`) the provider and
/// its caches. Create one per provider and reuse it across calls; contexts with
/// separate providers are fully independent.
#[derive(Debug, Default)]
pub struct LayoutContext<P> {
    provider: P,
}

impl<P: GlyphProvider> LayoutContext<P> {
    /// Creates a context around `provider`.
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    /// The glyph provider.
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// The glyph provider, mutably, for example to register fonts.
    pub fn provider_mut(&mut self) -> &mut P {
        &mut self.provider
    }

    /// Consumes the context, returning the provider.
    pub fn into_provider(self) -> P {
        self.provider
    }

    /// Lays out and rasterizes a single run of plain text.
    ///
    /// `text` is decoded as UTF-8 up to its end or its first NUL byte.
    pub fn plain_text<T: AsRef<[u8]> + ?Sized>(
        &mut self,
        text: &T,
        style: &Style<'_>,
        control: &Control,
    ) -> Result<RawImage, Error> {
        let text = text.as_ref();
        let mut layout = Layout::with_capacity(text.len())?;
        layout.append_run(
            &mut self.provider,
            text,
            style,
            control.width,
            control.collapse_whitespace,
            None,
        )?;
        self.finish(&mut layout, control, control.alignment)
    }

    /// Lays out and rasterizes marked-up text.
    ///
    /// See the [`markup`](crate::markup) module for the recognized markup. An
    /// `align` attribute on the root overrides [`Control::alignment`].
    #[cfg(feature = "markup")]
    pub fn markup_text(
        &mut self,
        markup: &str,
        style: &Style<'_>,
        control: &Control,
    ) -> Result<RawImage, Error> {
        let document = roxmltree::Document::parse(markup).map_err(|err| {
            Error::with_message(crate::ErrorKind::MarkupSyntaxError, &err.to_string())
        })?;
        let mut layout = Layout::with_capacity(markup.len() * 3 / 4)?;
        let alignment = crate::markup::lay_out_markup(
            &mut layout,
            &mut self.provider,
            &document.root_element(),
            style,
            control.width,
            control.collapse_whitespace,
        )?;
        self.finish(&mut layout, control, alignment.unwrap_or(control.alignment))
    }

    fn finish(
        &mut self,
        layout: &mut Layout,
        control: &Control,
        alignment: Alignment,
    ) -> Result<RawImage, Error> {
        let bounds = layout.finalize(control.cropping, control.width)?;
        layout.align(alignment);
        let mut image = layout.rasterize(&mut self.provider, control.background_color)?;
        image.x0 += origin_shift(control.width, bounds.width, alignment);
        Ok(image)
    }
}

/// Moves the reported origin so that an image narrower than the requested
/// width sits where the alignment would put it.
fn origin_shift(fixed_width: u32, width: i32, alignment: Alignment) -> i32 {
    if fixed_width == 0 {
        return 0;
    }
    let free = saturating_i32(fixed_width) - width;
    match alignment {
        Alignment::Left => 0,
        Alignment::Center => free / 2,
        Alignment::Right => free,
    }
}
