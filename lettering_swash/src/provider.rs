// Copyright 2025 the Lettering Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::path::{Path, PathBuf};
use std::sync::Arc;

use hashbrown::hash_map::Entry;
use hashbrown::HashMap;
use lettering::{
    Error, ErrorKind, FaceId, FontStyle, GlyphForm, GlyphMetrics, GlyphProvider, LineMetrics,
    RasterizedGlyph,
};
use linebender_resource_handle::{Blob, FontData};
use swash::scale::image::{Content, Image};
use swash::scale::{Render, ScaleContext, Source, StrikeWith};
use swash::zeno::Format;
use swash::{CacheKey, FontRef, Metrics};

use crate::{FaceSource, FontRegistry};

/// Identity of a face source, for loading each source once.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
enum SourceKey {
    Path(PathBuf),
    Blob { id: u64, index: u32 },
}

impl SourceKey {
    fn new(source: &FaceSource) -> Self {
        match source {
            FaceSource::Path(path) => Self::Path(path.clone()),
            FaceSource::Data(data) => Self::Blob {
                id: data.data.id(),
                index: data.index,
            },
        }
    }
}

/// A parsed face, owning its font data.
struct LoadedFace {
    data: FontData,
    offset: u32,
    key: CacheKey,
    metrics: Metrics,
}

impl LoadedFace {
    fn load(source: &FaceSource) -> Option<Self> {
        let data = match source {
            FaceSource::Path(path) => load_file(path)?,
            FaceSource::Data(data) => data.clone(),
        };
        let font = FontRef::from_index(data.data.as_ref(), data.index as usize)?;
        let (offset, key) = (font.offset, font.key);
        let metrics = font.metrics(&[]);
        Some(Self {
            data,
            offset,
            key,
            metrics,
        })
    }

    fn font(&self) -> FontRef<'_> {
        FontRef {
            data: self.data.data.as_ref(),
            offset: self.offset,
            key: self.key,
        }
    }
}

fn load_file(path: &Path) -> Option<FontData> {
    match std::fs::read(path) {
        Ok(bytes) => Some(FontData::new(Blob::new(Arc::new(bytes)), 0)),
        Err(err) => {
            log::warn!("failed to read font file {}: {err}", path.display());
            None
        }
    }
}

struct CachedGlyph {
    form: GlyphForm,
    metrics: GlyphMetrics,
    coverage: Vec<u8>,
}

/// A [`GlyphProvider`] that loads faces named in a [`FontRegistry`] and
/// rasterizes glyphs with Swash.
///
/// Faces are loaded once per source and kept for the life of the provider.
/// Rasterized glyphs are cached per face, glyph and pixel size.
pub struct SwashProvider {
    registry: FontRegistry,
    faces: Vec<LoadedFace>,
    face_ids: HashMap<SourceKey, FaceId>,
    glyphs: HashMap<(FaceId, u32, u32), CachedGlyph>,
    scale_cx: ScaleContext,
}

impl core::fmt::Debug for SwashProvider {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SwashProvider")
            .field("registry", &self.registry)
            .field("faces", &self.faces.len())
            .field("glyphs", &self.glyphs.len())
            .finish_non_exhaustive()
    }
}

impl Default for SwashProvider {
    fn default() -> Self {
        Self::new(FontRegistry::new())
    }
}

impl SwashProvider {
    /// Creates a provider resolving font names through `registry`.
    pub fn new(registry: FontRegistry) -> Self {
        Self {
            registry,
            faces: Vec::new(),
            face_ids: HashMap::new(),
            glyphs: HashMap::new(),
            scale_cx: ScaleContext::new(),
        }
    }

    /// The font registry.
    pub fn registry(&self) -> &FontRegistry {
        &self.registry
    }

    /// The font registry, mutably, for registering more fonts.
    ///
    /// Faces already loaded stay cached by source, so re-registering a name
    /// with a source that was used before does not load it again.
    pub fn registry_mut(&mut self) -> &mut FontRegistry {
        &mut self.registry
    }

    /// Drops every cached glyph image.
    pub fn clear_glyph_cache(&mut self) {
        self.glyphs.clear();
    }

    fn loaded(&self, face: FaceId) -> Result<&LoadedFace, Error> {
        self.faces
            .get(face.0 as usize)
            .ok_or_else(|| Error::with_message(ErrorKind::FaceNotFound, "unknown face id"))
    }
}

impl GlyphProvider for SwashProvider {
    fn resolve_face(&mut self, font_name: &str, style: FontStyle) -> Result<FaceId, Error> {
        let Some(source) = self.registry.face(font_name, style) else {
            log::debug!("no {style:?} face registered for `{font_name}`");
            return Err(Error::face_not_found(font_name));
        };
        let key = SourceKey::new(source);
        if let Some(&face) = self.face_ids.get(&key) {
            return Ok(face);
        }
        let loaded = LoadedFace::load(source).ok_or_else(|| Error::face_not_found(font_name))?;
        let face = u32::try_from(self.faces.len())
            .map(FaceId)
            .map_err(|_| Error::new(ErrorKind::AllocationFailure))?;
        log::debug!("loaded {style:?} face of `{font_name}` as {face:?}");
        self.faces.push(loaded);
        self.face_ids.insert(key, face);
        Ok(face)
    }

    fn line_metrics(&mut self, face: FaceId, pixel_size: u32) -> Result<LineMetrics, Error> {
        let loaded = self.loaded(face)?;
        if pixel_size == 0 || loaded.metrics.units_per_em == 0 {
            return Err(Error::with_message(
                ErrorKind::SizeLookupFailure,
                "pixel size and units per em must be nonzero",
            ));
        }
        let metrics = loaded.metrics.scale(pixel_size as f32);
        Ok(LineMetrics {
            line_height: round_px(metrics.ascent + metrics.descent + metrics.leading),
            ascender: round_px(metrics.ascent),
        })
    }

    fn glyph_index(&mut self, face: FaceId, c: char) -> u32 {
        self.loaded(face)
            .map(|loaded| u32::from(loaded.font().charmap().map(c)))
            .unwrap_or(0)
    }

    fn rasterize(
        &mut self,
        face: FaceId,
        glyph_index: u32,
        pixel_size: u32,
    ) -> Result<RasterizedGlyph<'_>, Error> {
        let loaded = self
            .faces
            .get(face.0 as usize)
            .ok_or_else(|| Error::with_message(ErrorKind::FaceNotFound, "unknown face id"))?;
        let glyph = match self.glyphs.entry((face, glyph_index, pixel_size)) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => {
                let glyph = render_glyph(&mut self.scale_cx, loaded, glyph_index, pixel_size)?;
                entry.insert(glyph)
            }
        };
        Ok(RasterizedGlyph {
            form: glyph.form,
            metrics: glyph.metrics,
            coverage: &glyph.coverage,
        })
    }
}

fn render_glyph(
    context: &mut ScaleContext,
    face: &LoadedFace,
    glyph_index: u32,
    pixel_size: u32,
) -> Result<CachedGlyph, Error> {
    let glyph_id = u16::try_from(glyph_index).map_err(|_| {
        Error::with_message(ErrorKind::GlyphRenderFailure, "glyph index out of range")
    })?;
    if pixel_size == 0 {
        return Err(Error::new(ErrorKind::SizeLookupFailure));
    }
    let font = face.font();
    let size = pixel_size as f32;
    let advance = round_px(font.glyph_metrics(&[]).scale(size).advance_width(glyph_id));

    let mut scaler = context.builder(font).size(size).hint(true).build();
    let bitmap = Render::new(&[Source::Bitmap(StrikeWith::ExactSize)])
        .format(Format::Alpha)
        .render(&mut scaler, glyph_id);
    let (form, image) = match bitmap {
        Some(image) => (GlyphForm::SmallBitmap, Some(image)),
        None => (
            GlyphForm::Rendered,
            Render::new(&[Source::Outline])
                .format(Format::Alpha)
                .render(&mut scaler, glyph_id),
        ),
    };
    let Some(image) = image else {
        // Nothing to draw, as for a space in some fonts.
        return Ok(CachedGlyph {
            form,
            metrics: GlyphMetrics {
                advance,
                ..GlyphMetrics::default()
            },
            coverage: Vec::new(),
        });
    };
    log::trace!(
        "rendered glyph {glyph_id} at {pixel_size}px: {}x{}",
        image.placement.width,
        image.placement.height
    );
    Ok(CachedGlyph {
        form,
        metrics: GlyphMetrics {
            advance,
            width: image.placement.width,
            height: image.placement.height,
            left: image.placement.left,
            top: image.placement.top,
        },
        coverage: alpha_coverage(image),
    })
}

/// Reduces an image to one coverage byte per pixel.
fn alpha_coverage(image: Image) -> Vec<u8> {
    match image.content {
        Content::Mask => image.data,
        Content::SubpixelMask | Content::Color => {
            image.data.chunks_exact(4).map(|pixel| pixel[3]).collect()
        }
    }
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "Scaled font metrics are far inside the i32 range."
)]
fn round_px(value: f32) -> i32 {
    value.round() as i32
}
