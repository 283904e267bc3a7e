// Copyright 2025 the Lettering Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Text styles and per-call layout directives.

use alloc::borrow::Cow;

use peniko::Color;

use crate::{Error, ErrorKind};

/// Face style selected within a registered font.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum FontStyle {
    /// Upright, regular weight.
    #[default]
    Normal,
    /// Italic.
    Italic,
    /// Bold.
    Bold,
    /// Bold italic.
    BoldItalic,
}

impl FontStyle {
    /// Returns this style with bold added.
    #[must_use]
    pub fn with_bold(self) -> Self {
        match self {
            Self::Normal | Self::Bold => Self::Bold,
            Self::Italic | Self::BoldItalic => Self::BoldItalic,
        }
    }

    /// Returns this style with italic added.
    #[must_use]
    pub fn with_italic(self) -> Self {
        match self {
            Self::Normal | Self::Italic => Self::Italic,
            Self::Bold | Self::BoldItalic => Self::BoldItalic,
        }
    }

    /// Parses the `style` markup attribute value.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "normal" => Some(Self::Normal),
            "italic" => Some(Self::Italic),
            "bold" => Some(Self::Bold),
            "bold italic" => Some(Self::BoldItalic),
            _ => None,
        }
    }
}

/// Largest border thickness a layout applies, in pixels.
///
/// Thicker borders are clamped to this when a run is appended.
pub const MAX_BORDER_THICKNESS: u32 = 256;

/// Visual style of a run of text.
///
/// Styles are small values that markup elements copy and selectively override.
#[derive(Clone, Debug, PartialEq)]
pub struct Style<'a> {
    /// Registered font name.
    pub font_name: Cow<'a, str>,
    /// Face within the font.
    pub font_style: FontStyle,
    /// Nominal font size, multiplied by `scale` to obtain the pixel size.
    pub font_size: f32,
    /// Text fill color.
    pub text_color: Color,
    /// Border (outline) thickness in pixels. `0` disables the border.
    ///
    /// Values above [`MAX_BORDER_THICKNESS`] are clamped.
    pub border_thickness: u32,
    /// Border color.
    pub border_color: Color,
    /// Whether a highlight rectangle is painted behind each glyph.
    pub highlight: bool,
    /// Highlight rectangle color.
    pub highlight_color: Color,
    /// Multiplier applied to `font_size`.
    pub scale: f32,
}

impl Style<'_> {
    /// Pixel size used to select glyphs: `ceil(font_size * scale)`.
    pub fn pixel_size(&self) -> u32 {
        let px = (self.font_size * self.scale).ceil();
        if px <= 0.0 {
            0
        } else {
            #[expect(
                clippy::cast_possible_truncation,
                reason = "Pixel sizes are far below u32::MAX; `as` saturates otherwise."
            )]
            let px = px as u32;
            px
        }
    }

    /// Clones any borrowed font name so the style can outlive its source.
    pub fn into_owned(self) -> Style<'static> {
        Style {
            font_name: Cow::Owned(self.font_name.into_owned()),
            font_style: self.font_style,
            font_size: self.font_size,
            text_color: self.text_color,
            border_thickness: self.border_thickness,
            border_color: self.border_color,
            highlight: self.highlight,
            highlight_color: self.highlight_color,
            scale: self.scale,
        }
    }
}

impl Default for Style<'_> {
    fn default() -> Self {
        Self {
            font_name: Cow::Borrowed("default"),
            font_style: FontStyle::Normal,
            font_size: 16.0,
            text_color: Color::BLACK,
            border_thickness: 0,
            border_color: Color::BLACK,
            highlight: false,
            highlight_color: Color::WHITE,
            scale: 1.0,
        }
    }
}

/// Horizontal alignment of lines within the layout box.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Alignment {
    /// Lines start at the left edge.
    #[default]
    Left,
    /// Lines are centered.
    Center,
    /// Lines end at the right edge.
    Right,
}

impl Alignment {
    /// Parses the `align` markup attribute value.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "left" => Some(Self::Left),
            "center" => Some(Self::Center),
            "right" => Some(Self::Right),
            _ => None,
        }
    }
}

/// Horizontal cropping policy.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum CropX {
    /// From the pen origin to the furthest advance.
    #[default]
    Natural,
    /// Tight around the inked pixels, including borders.
    Tight,
    /// Tight left edge with a fixed width taken from [`Control::width`].
    Width,
    /// Tight bounds widened to contain the pen origin and every advance.
    Failsafe,
}

/// Vertical cropping policy.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum CropY {
    /// From the top of the first line to the bottom of the last line.
    #[default]
    Natural,
    /// Tight around the inked pixels, including borders.
    Tight,
    /// Fixed output height. Recognized but not supported.
    Height,
    /// Tight bounds widened to contain the first line top and last line bottom.
    Failsafe,
}

/// Independent horizontal and vertical cropping policies.
///
/// The packed representation keeps the vertical policy in the low byte and the
/// horizontal policy in the next byte.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct CroppingStrategy {
    /// Horizontal policy.
    pub x: CropX,
    /// Vertical policy.
    pub y: CropY,
}

impl CroppingStrategy {
    /// Mask of the vertical policy in the packed form.
    pub const Y_MASK: u32 = 0xFF;
    /// Mask of the horizontal policy in the packed form.
    pub const X_MASK: u32 = 0xFF << 8;

    /// Natural bounds on both axes.
    pub const NATURAL: Self = Self {
        x: CropX::Natural,
        y: CropY::Natural,
    };
    /// Tight bounds on both axes.
    pub const TIGHT: Self = Self {
        x: CropX::Tight,
        y: CropY::Tight,
    };
    /// Fixed width and fixed height.
    pub const BOUNDS: Self = Self {
        x: CropX::Width,
        y: CropY::Height,
    };
    /// Failsafe bounds on both axes.
    pub const FAILSAFE: Self = Self {
        x: CropX::Failsafe,
        y: CropY::Failsafe,
    };

    /// Decodes the packed form.
    pub fn from_bits(bits: u32) -> Result<Self, Error> {
        let unsupported = || {
            Error::with_message(
                ErrorKind::UnsupportedCroppingStrategy,
                "unknown cropping selector bits",
            )
        };
        if bits & !(Self::X_MASK | Self::Y_MASK) != 0 {
            return Err(unsupported());
        }
        let x = match (bits & Self::X_MASK) >> 8 {
            0 => CropX::Natural,
            1 => CropX::Tight,
            2 => CropX::Width,
            3 => CropX::Failsafe,
            _ => return Err(unsupported()),
        };
        let y = match bits & Self::Y_MASK {
            0 => CropY::Natural,
            1 => CropY::Tight,
            2 => CropY::Height,
            3 => CropY::Failsafe,
            _ => return Err(unsupported()),
        };
        Ok(Self { x, y })
    }

    /// Encodes into the packed form.
    pub fn bits(self) -> u32 {
        let x = match self.x {
            CropX::Natural => 0,
            CropX::Tight => 1,
            CropX::Width => 2,
            CropX::Failsafe => 3,
        };
        let y = match self.y {
            CropY::Natural => 0,
            CropY::Tight => 1,
            CropY::Height => 2,
            CropY::Failsafe => 3,
        };
        (x << 8) | y
    }
}

/// Layout and image directives for one call.
#[derive(Clone, Debug, PartialEq)]
pub struct Control {
    /// Wrap width in pixels, `0` for no wrapping. Also the fixed output width
    /// for [`CropX::Width`] and the reference width for the final origin shift.
    pub width: u32,
    /// Horizontal alignment of lines.
    pub alignment: Alignment,
    /// Color every output pixel starts from.
    pub background_color: Color,
    /// Collapse whitespace runs and drop leading whitespace of each line.
    pub collapse_whitespace: bool,
    /// How the output bounding box is derived.
    pub cropping: CroppingStrategy,
}

impl Default for Control {
    fn default() -> Self {
        Self {
            width: 0,
            alignment: Alignment::Left,
            background_color: Color::TRANSPARENT,
            collapse_whitespace: false,
            cropping: CroppingStrategy::NATURAL,
        }
    }
}
