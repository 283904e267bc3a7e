// Copyright 2025 the Lettering Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::borrow::Cow;

use peniko::Color;

use crate::{Control, Error, Layout, LayoutContext, RawImage, Style};

use super::BoxFontProvider;

/// Shared state for a test: a context over [`BoxFontProvider`] plus the style
/// and control used by the helpers.
///
/// The defaults are font `Box` at 16px in white on an opaque black
/// background, with natural cropping and no wrapping.
pub(crate) struct TestEnv {
    pub(crate) cx: LayoutContext<BoxFontProvider>,
    pub(crate) style: Style<'static>,
    pub(crate) control: Control,
}

impl TestEnv {
    pub(crate) fn new() -> Self {
        let style = Style {
            font_name: Cow::Borrowed("Box"),
            text_color: Color::WHITE,
            ..Style::default()
        };
        let control = Control {
            background_color: Color::BLACK,
            ..Control::default()
        };
        Self {
            cx: LayoutContext::new(BoxFontProvider::new()),
            style,
            control,
        }
    }

    pub(crate) fn provider(&mut self) -> &mut BoxFontProvider {
        self.cx.provider_mut()
    }

    /// Appends `text` to `layout` with the environment's style and control.
    pub(crate) fn append(&mut self, layout: &mut Layout, text: &str) -> Result<usize, Error> {
        let Self { cx, style, control } = self;
        layout.append_run(
            cx.provider_mut(),
            text.as_bytes(),
            style,
            control.width,
            control.collapse_whitespace,
            None,
        )
    }

    /// Lays out `text` without finalizing.
    pub(crate) fn layout(&mut self, text: &str) -> Layout {
        let mut layout = Layout::new();
        self.append(&mut layout, text).unwrap();
        layout
    }

    /// Lays out and finalizes `text` with the environment's cropping.
    pub(crate) fn finalized(&mut self, text: &str) -> Layout {
        let mut layout = self.layout(text);
        layout
            .finalize(self.control.cropping, self.control.width)
            .unwrap();
        layout
    }

    pub(crate) fn plain(&mut self, text: &str) -> Result<RawImage, Error> {
        let Self { cx, style, control } = self;
        cx.plain_text(text, style, control)
    }

    #[cfg(feature = "markup")]
    pub(crate) fn markup(&mut self, markup: &str) -> Result<RawImage, Error> {
        let Self { cx, style, control } = self;
        cx.markup_text(markup, style, control)
    }

    #[cfg(feature = "markup")]
    /// Lays out `markup` without finalizing, returning the root alignment.
    pub(crate) fn markup_layout(
        &mut self,
        markup: &str,
    ) -> Result<(Layout, Option<crate::Alignment>), Error> {
        let document = roxmltree::Document::parse(markup).expect("well-formed markup");
        let mut layout = Layout::new();
        let Self { cx, style, control } = self;
        let alignment = crate::markup::lay_out_markup(
            &mut layout,
            cx.provider_mut(),
            &document.root_element(),
            style,
            control.width,
            control.collapse_whitespace,
        )?;
        Ok((layout, alignment))
    }
}
