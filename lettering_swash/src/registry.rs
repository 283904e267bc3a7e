// Copyright 2025 the Lettering Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Named fonts and the sources of their faces.

use std::path::{Path, PathBuf};

use hashbrown::HashMap;
use lettering::FontStyle;
use linebender_resource_handle::{Blob, FontData};

/// Where the data for one face comes from.
#[derive(Clone, Debug)]
pub enum FaceSource {
    /// A font file, read when the face is first used.
    Path(PathBuf),
    /// Font data already in memory, with the index of the face in a collection.
    Data(FontData),
}

impl From<PathBuf> for FaceSource {
    fn from(path: PathBuf) -> Self {
        Self::Path(path)
    }
}

impl From<&Path> for FaceSource {
    fn from(path: &Path) -> Self {
        Self::Path(path.to_path_buf())
    }
}

impl From<&str> for FaceSource {
    fn from(path: &str) -> Self {
        Self::Path(PathBuf::from(path))
    }
}

impl From<FontData> for FaceSource {
    fn from(data: FontData) -> Self {
        Self::Data(data)
    }
}

impl From<Blob<u8>> for FaceSource {
    fn from(blob: Blob<u8>) -> Self {
        Self::Data(FontData::new(blob, 0))
    }
}

/// The faces of one registered font, one slot per [`FontStyle`].
#[derive(Clone, Debug, Default)]
pub struct FontFamily {
    faces: [Option<FaceSource>; 4],
}

impl FontFamily {
    /// A family with only a normal face.
    pub fn new(normal: impl Into<FaceSource>) -> Self {
        Self::default().with_face(FontStyle::Normal, normal)
    }

    /// Sets the face for `style`.
    #[must_use]
    pub fn with_face(mut self, style: FontStyle, source: impl Into<FaceSource>) -> Self {
        self.faces[slot(style)] = Some(source.into());
        self
    }

    /// The face for `style`, if the family has one.
    pub fn face(&self, style: FontStyle) -> Option<&FaceSource> {
        self.faces[slot(style)].as_ref()
    }
}

fn slot(style: FontStyle) -> usize {
    match style {
        FontStyle::Normal => 0,
        FontStyle::Italic => 1,
        FontStyle::Bold => 2,
        FontStyle::BoldItalic => 3,
    }
}

/// Maps font names to families.
#[derive(Clone, Debug, Default)]
pub struct FontRegistry {
    families: HashMap<Box<str>, FontFamily>,
}

impl FontRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `family` under `name`, returning the family it replaces.
    pub fn register(&mut self, name: &str, family: FontFamily) -> Option<FontFamily> {
        log::debug!("registering font `{name}`");
        self.families.insert(name.into(), family)
    }

    /// Registers a font from up to four face sources, one per style.
    ///
    /// Styles without a source fail to resolve.
    pub fn register_font(
        &mut self,
        name: &str,
        normal: Option<FaceSource>,
        italic: Option<FaceSource>,
        bold: Option<FaceSource>,
        bold_italic: Option<FaceSource>,
    ) -> Option<FontFamily> {
        let family = FontFamily {
            faces: [normal, italic, bold, bold_italic],
        };
        self.register(name, family)
    }

    /// Removes the font registered under `name`.
    pub fn unregister(&mut self, name: &str) -> Option<FontFamily> {
        self.families.remove(name)
    }

    /// The family registered under `name`.
    pub fn family(&self, name: &str) -> Option<&FontFamily> {
        self.families.get(name)
    }

    /// The face source for `name` in `style`.
    pub fn face(&self, name: &str, style: FontStyle) -> Option<&FaceSource> {
        self.family(name)?.face(style)
    }

    /// Registered font names, in no particular order.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.families.keys().map(|name| &**name)
    }

    /// Number of registered fonts.
    pub fn len(&self) -> usize {
        self.families.len()
    }

    /// Whether no font is registered.
    pub fn is_empty(&self) -> bool {
        self.families.is_empty()
    }
}
