// Copyright 2025 the Lettering Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Laying out a parsed markup tree.
//!
//! The recognized document shape is a `<p>` root holding text and the inline
//! elements `<span>`, `<b>`, `<i>` and `<br>`:
//!
//! ```text
//! <p align="center" size="20">Plain <b>bold</b> and
//!   <span color="#FF0000" border="2" border_color="#000000">outlined red</span></p>
//! ```
//!
//! `<p>` and `<span>` accept the style attributes `font`, `style`, `size`,
//! `color`, `border`, `border_color`, `highlight_color` and `visibility`; the
//! root additionally accepts `align`. Each element lays out its children in a
//! copy of the enclosing style with its own overrides applied.

use alloc::borrow::Cow;

use peniko::Color;

use crate::layout::Layout;
use crate::provider::GlyphProvider;
use crate::{Alignment, Error, ErrorKind, FontStyle, Style, MAX_BORDER_THICKNESS};

/// What a markup node is.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum NodeKind<'a> {
    /// An element with the given tag name.
    Element(&'a str),
    /// Character data.
    Text(&'a str),
    /// Anything else, such as comments. Skipped during layout.
    Other,
}

/// Read access to a node of a parsed markup tree.
pub trait MarkupNode: Sized {
    /// The kind of this node.
    fn kind(&self) -> NodeKind<'_>;

    /// The value of the named attribute of an element.
    fn attribute(&self, name: &str) -> Option<&str>;

    /// The names of all attributes of an element.
    fn attribute_names(&self) -> impl Iterator<Item = &str>;

    /// Child nodes in document order.
    fn children(&self) -> impl Iterator<Item = Self>;
}

const STYLE_ATTRIBUTES: &[&str] = &[
    "font",
    "style",
    "size",
    "color",
    "border",
    "border_color",
    "highlight_color",
    "visibility",
];

/// Lays out a `<p>` root element and everything below it.
///
/// Returns the alignment requested by the root's `align` attribute, if any.
pub fn lay_out_markup<N: MarkupNode, P: GlyphProvider + ?Sized>(
    layout: &mut Layout,
    provider: &mut P,
    root: &N,
    style: &Style<'_>,
    wrap_width: u32,
    collapse_whitespace: bool,
) -> Result<Option<Alignment>, Error> {
    match root.kind() {
        NodeKind::Element("p") => {}
        NodeKind::Element(tag) => return Err(Error::unknown_tag(tag)),
        _ => {
            return Err(Error::with_message(
                ErrorKind::MarkupSyntaxError,
                "document root must be a <p> element",
            ));
        }
    }
    let alignment = match root.attribute("align") {
        Some(value) => Some(
            Alignment::parse(value).ok_or_else(|| Error::invalid_attribute("align", value))?,
        ),
        None => None,
    };
    let mut walker = Walker {
        layout,
        provider,
        wrap_width,
        collapse_whitespace,
    };
    walker.element(root, style, true)?;
    Ok(alignment)
}

struct Walker<'w, P: ?Sized> {
    layout: &'w mut Layout,
    provider: &'w mut P,
    wrap_width: u32,
    collapse_whitespace: bool,
}

impl<P: GlyphProvider + ?Sized> Walker<'_, P> {
    fn element<N: MarkupNode>(
        &mut self,
        node: &N,
        parent: &Style<'_>,
        is_root: bool,
    ) -> Result<(), Error> {
        let NodeKind::Element(tag) = node.kind() else {
            return Err(Error::with_message(
                ErrorKind::MarkupSyntaxError,
                "expected an element",
            ));
        };
        let mut style = parent.clone();
        match tag {
            "p" if is_root => {
                check_attributes(node, STYLE_ATTRIBUTES, &["align"])?;
                apply_style_attributes(node, &mut style)?;
            }
            "span" if !is_root => {
                check_attributes(node, STYLE_ATTRIBUTES, &[])?;
                apply_style_attributes(node, &mut style)?;
            }
            "b" if !is_root => {
                check_attributes(node, &[], &[])?;
                style.font_style = style.font_style.with_bold();
            }
            "i" if !is_root => {
                check_attributes(node, &[], &[])?;
                style.font_style = style.font_style.with_italic();
            }
            _ => return Err(Error::unknown_tag(tag)),
        }

        for child in node.children() {
            match child.kind() {
                NodeKind::Element("br") => {
                    check_attributes(&child, &[], &[])?;
                    if child.children().next().is_some() {
                        return Err(Error::with_message(
                            ErrorKind::MarkupSyntaxError,
                            "<br> must be empty",
                        ));
                    }
                    self.layout.append_run(
                        self.provider,
                        b"\n",
                        &style,
                        self.wrap_width,
                        false,
                        Some(1),
                    )?;
                }
                NodeKind::Element(_) => self.element(&child, &style, false)?,
                NodeKind::Text(text) => {
                    self.layout.append_run(
                        self.provider,
                        text.as_bytes(),
                        &style,
                        self.wrap_width,
                        self.collapse_whitespace,
                        None,
                    )?;
                }
                NodeKind::Other => {}
            }
        }
        Ok(())
    }
}

fn check_attributes<N: MarkupNode>(
    node: &N,
    allowed: &[&str],
    extra: &[&str],
) -> Result<(), Error> {
    for name in node.attribute_names() {
        if !allowed.contains(&name) && !extra.contains(&name) {
            return Err(Error::invalid_attribute(name, node.attribute(name).unwrap_or("")));
        }
    }
    Ok(())
}

fn apply_style_attributes<N: MarkupNode>(node: &N, style: &mut Style<'_>) -> Result<(), Error> {
    if let Some(font) = node.attribute("font") {
        style.font_name = Cow::Owned(font.into());
    }
    if let Some(value) = node.attribute("style") {
        style.font_style =
            FontStyle::parse(value).ok_or_else(|| Error::invalid_attribute("style", value))?;
    }
    if let Some(value) = node.attribute("size") {
        style.font_size = value
            .trim()
            .parse::<f32>()
            .ok()
            .filter(|size| size.is_finite() && *size > 0.0)
            .ok_or_else(|| Error::invalid_attribute("size", value))?;
    }
    if let Some(value) = node.attribute("color") {
        style.text_color = with_rgb(style.text_color, "color", value)?;
    }
    if let Some(value) = node.attribute("border") {
        style.border_thickness = value
            .trim()
            .parse::<u32>()
            .ok()
            .filter(|thickness| *thickness <= MAX_BORDER_THICKNESS)
            .ok_or_else(|| Error::invalid_attribute("border", value))?;
    }
    if let Some(value) = node.attribute("border_color") {
        style.border_color = with_rgb(style.border_color, "border_color", value)?;
    }
    if let Some(value) = node.attribute("highlight_color") {
        style.highlight_color = with_rgb(style.highlight_color, "highlight_color", value)?;
        style.highlight = true;
    }
    if let Some(value) = node.attribute("visibility") {
        let alpha = value
            .trim()
            .parse::<f32>()
            .ok()
            .filter(|alpha| (0.0..=1.0).contains(alpha))
            .ok_or_else(|| Error::invalid_attribute("visibility", value))?;
        style.text_color = style.text_color.with_alpha(alpha);
        style.border_color = style.border_color.with_alpha(alpha);
    }
    Ok(())
}

/// Replaces the color channels of `color` with a `#RRGGBB` value, keeping alpha.
fn with_rgb(color: Color, name: &str, value: &str) -> Result<Color, Error> {
    let [r, g, b] = parse_hex_rgb(value).ok_or_else(|| Error::invalid_attribute(name, value))?;
    let alpha = color.components[3];
    Ok(Color::new([
        f32::from(r) / 255.0,
        f32::from(g) / 255.0,
        f32::from(b) / 255.0,
        alpha,
    ]))
}

fn parse_hex_rgb(value: &str) -> Option<[u8; 3]> {
    let hex = value.strip_prefix('#')?;
    if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some([channel(0)?, channel(2)?, channel(4)?])
}

#[cfg(feature = "markup")]
impl<'a, 'input: 'a> MarkupNode for roxmltree::Node<'a, 'input> {
    fn kind(&self) -> NodeKind<'_> {
        match self.node_type() {
            roxmltree::NodeType::Element => NodeKind::Element(self.tag_name().name()),
            roxmltree::NodeType::Text => NodeKind::Text(self.text().unwrap_or_default()),
            roxmltree::NodeType::Root
            | roxmltree::NodeType::Comment
            | roxmltree::NodeType::PI => NodeKind::Other,
        }
    }

    fn attribute(&self, name: &str) -> Option<&str> {
        roxmltree::Node::attribute(self, name)
    }

    fn attribute_names(&self) -> impl Iterator<Item = &str> {
        self.attributes().map(|attribute| attribute.name())
    }

    fn children(&self) -> impl Iterator<Item = Self> {
        roxmltree::Node::children(self)
    }
}
