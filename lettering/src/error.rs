// Copyright 2025 the Lettering Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::boxed::Box;

/// Error type for layout and rasterization.
///
/// Carries a non-exhaustive [`ErrorKind`] plus whatever context was available
/// where the failure happened. Every error is terminal for the layout call that
/// produced it; the partially built layout is discarded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    /// The non-exhaustive category describing this error.
    kind: ErrorKind,

    /// Extra detail about the failure, when available.
    detail: Detail,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Detail {
    None,
    /// Byte offset of a malformed sequence within the run being decoded.
    Offset(usize),
    /// A font name, tag name or similar identifier.
    Name(Box<str>),
    /// An attribute name and its rejected value.
    Attribute { name: Box<str>, value: Box<str> },
    /// Free-form description.
    Message(Box<str>),
}

impl Error {
    /// Creates an error of the given kind without extra context.
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            detail: Detail::None,
        }
    }

    /// The machine-readable category for this error.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// The numeric status code for this error. Never zero.
    pub fn code(&self) -> i32 {
        self.kind.code()
    }

    /// Byte offset of the malformed sequence, for [`ErrorKind::InvalidEncoding`].
    pub fn offset(&self) -> Option<usize> {
        match self.detail {
            Detail::Offset(offset) => Some(offset),
            _ => None,
        }
    }

    pub(crate) fn invalid_encoding(offset: usize) -> Self {
        Self {
            kind: ErrorKind::InvalidEncoding,
            detail: Detail::Offset(offset),
        }
    }

    /// A face could not be resolved for the named font.
    pub fn face_not_found(font_name: &str) -> Self {
        Self {
            kind: ErrorKind::FaceNotFound,
            detail: Detail::Name(font_name.into()),
        }
    }

    /// Creates an error of the given kind with a free-form description.
    pub fn with_message(kind: ErrorKind, message: &str) -> Self {
        Self {
            kind,
            detail: Detail::Message(message.into()),
        }
    }

    pub(crate) fn allocation() -> Self {
        Self::new(ErrorKind::AllocationFailure)
    }

    /// A markup tag that is not recognized where it appears.
    pub fn unknown_tag(tag: &str) -> Self {
        Self {
            kind: ErrorKind::UnknownTag,
            detail: Detail::Name(tag.into()),
        }
    }

    /// An unknown markup attribute, or a malformed value for a known one.
    pub fn invalid_attribute(name: &str, value: &str) -> Self {
        Self {
            kind: ErrorKind::InvalidAttribute,
            detail: Detail::Attribute {
                name: name.into(),
                value: value.into(),
            },
        }
    }
}

impl From<alloc::collections::TryReserveError> for Error {
    fn from(_: alloc::collections::TryReserveError) -> Self {
        Self::allocation()
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let what = match self.kind {
            ErrorKind::InvalidEncoding => "malformed UTF-8 sequence",
            ErrorKind::FaceNotFound => "font face not found",
            ErrorKind::SizeLookupFailure => "font size lookup failed",
            ErrorKind::GlyphRenderFailure => "glyph rendering failed",
            ErrorKind::AllocationFailure => "allocation failed",
            ErrorKind::UnsupportedCroppingStrategy => "unsupported cropping strategy",
            ErrorKind::InvalidLayoutState => "operation not valid in the current layout state",
            ErrorKind::MarkupSyntaxError => "markup syntax error",
            ErrorKind::UnknownTag => "unknown tag",
            ErrorKind::InvalidAttribute => "invalid attribute",
        };
        match &self.detail {
            Detail::None => f.write_str(what),
            Detail::Offset(offset) => write!(f, "{what} at byte {offset}"),
            Detail::Name(name) => write!(f, "{what}: `{name}`"),
            Detail::Attribute { name, value } => write!(f, "{what}: {name}=\"{value}\""),
            Detail::Message(message) => write!(f, "{what}: {message}"),
        }
    }
}

impl core::error::Error for Error {}

/// The non-exhaustive category of an error.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ErrorKind {
    /// The input text is not well-formed UTF-8.
    InvalidEncoding,

    /// The glyph provider could not resolve or load a face.
    FaceNotFound,

    /// The glyph provider could not produce metrics at the requested pixel size.
    SizeLookupFailure,

    /// The glyph provider failed to rasterize a glyph.
    GlyphRenderFailure,

    /// The glyph arena, working buffer or output buffer could not be allocated.
    AllocationFailure,

    /// An unknown cropping policy, or the unimplemented fixed-height policy.
    UnsupportedCroppingStrategy,

    /// Text was appended after finalizing, or an unfinalized layout was used
    /// where bounds are required.
    InvalidLayoutState,

    /// The markup could not be parsed, or violates the document structure.
    MarkupSyntaxError,

    /// The markup uses a tag that is not recognized in its position.
    UnknownTag,

    /// The markup uses an unknown attribute or a malformed attribute value.
    InvalidAttribute,
}

impl ErrorKind {
    /// The stable numeric status code of this kind. Success is `0`.
    pub fn code(self) -> i32 {
        match self {
            Self::InvalidEncoding => 1,
            Self::FaceNotFound => 2,
            Self::SizeLookupFailure => 3,
            Self::GlyphRenderFailure => 4,
            Self::AllocationFailure => 5,
            Self::UnsupportedCroppingStrategy => 6,
            Self::InvalidLayoutState => 7,
            Self::MarkupSyntaxError => 8,
            Self::UnknownTag => 9,
            Self::InvalidAttribute => 10,
        }
    }
}

/// Collapses a result into a numeric status code, `0` meaning success.
pub fn status_code<T>(result: &Result<T, Error>) -> i32 {
    match result {
        Ok(_) => 0,
        Err(err) => err.code(),
    }
}
