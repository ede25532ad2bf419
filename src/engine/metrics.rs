//! Text measurement against a face.
//!
//! All values here are in face units. The layout engine scales them to
//! pixels.

use crate::engine::error::TextError;
use crate::engine::face::Face;

/// Position and size of one glyph in a measured run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlyphExtent {
    pub ch: char,
    /// Pen position before the glyph
    pub x: f64,
    pub advance: f64,
    /// Advance, or outline extent when the glyph overhangs it
    pub width: f64,
}

/// Unscaled extents of a text run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextExtents {
    /// Sum of glyph widths (overhang included)
    pub width: f64,
    /// Sum of advances, used for cursor positioning
    pub advance: f64,
    /// `ascender - descender` for non-empty text, else 0
    pub height: f64,
    pub glyphs: Vec<GlyphExtent>,
}

/// Measurement result returned to callers, in pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TextMetrics {
    pub width: f64,
    pub advance: f64,
    pub height: f64,
}

impl TextExtents {
    pub fn scaled(&self, factor: f64) -> TextMetrics {
        TextMetrics {
            width: self.width * factor,
            advance: self.advance * factor,
            height: self.height * factor,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct TextMetricsEngine {
    fallback: char,
}

impl Default for TextMetricsEngine {
    fn default() -> Self {
        Self { fallback: ' ' }
    }
}

impl TextMetricsEngine {
    pub fn new(fallback: char) -> Self {
        Self { fallback }
    }

    pub fn fallback(&self) -> char {
        self.fallback
    }

    pub fn measure(&self, text: &str, face: &Face) -> Result<TextExtents, TextError> {
        let mut extents = TextExtents::default();

        for ch in text.chars() {
            let glyph = face.glyph_or_fallback(ch, self.fallback)?;
            let extent = GlyphExtent {
                ch,
                x: extents.advance,
                advance: glyph.horizontal_advance,
                width: glyph.width(),
            };
            extents.width += extent.width;
            extents.advance += extent.advance;
            extents.glyphs.push(extent);
        }

        if !extents.glyphs.is_empty() {
            extents.height = face.ascender - face.descender;
        }
        Ok(extents)
    }
}
