//! Text layout and drawing.
//!
//! # Overview
//!
//! [`TextLayoutEngine`] implements the canvas text operations on top of a
//! [`PathSurface`]:
//!
//! - `fill_text` / `stroke_text`: build one path for the whole string and
//!   fill or stroke it with the surface's current paint state
//! - `measure_text`: width of the string in pixels
//!
//! # Data Flow
//!
//! ```text
//! surface.font → StyleParser → ComputedStyleResolver → FaceRegistry
//!     → scale + offset → glyph outlines → surface path → fill/stroke
//! ```
//!
//! A draw call moves through four steps: idle, positioned (origin
//! translated by alignment and baseline), path built (glyphs replayed), and
//! committed (filled or stroked). The surface state is saved before
//! positioning and restored after committing, or on any error.

use std::sync::Arc;

use crate::engine::error::TextError;
use crate::engine::face::{Face, FaceRegistry};
use crate::engine::glyph;
use crate::engine::metrics::{TextMetrics, TextMetricsEngine};
use crate::engine::options::{Backend, EngineOptions};
use crate::engine::style::{
    ComputedStyle, ComputedStyleResolver, ResolvedAlign, StyleParser, TextBaseline,
};
use crate::engine::surface::{PaintMode, PathSurface, ScopedSave};

/// Converts the em-based outline units to pixels (72/96 dpi).
const PX_PER_PT: f64 = 3.0 / 4.0;

/// Face units to pixels for `pixel_size`.
pub fn text_scale(pixel_size: f64, face: &Face) -> f64 {
    (pixel_size / face.resolution) * PX_PER_PT
}

/// Origin offset for alignment and baseline, in pixels.
///
/// `width` is the scaled text width.
pub fn text_offset(
    width: f64,
    face: &Face,
    scale: f64,
    align: ResolvedAlign,
    baseline: TextBaseline,
) -> (f64, f64) {
    let x = match align {
        ResolvedAlign::Left => 0.0,
        ResolvedAlign::Center => -width / 2.0,
        ResolvedAlign::Right => -width,
    };
    let y = match baseline {
        TextBaseline::Top | TextBaseline::Hanging => face.ascender,
        TextBaseline::Middle => (face.ascender + face.descender) / 2.0,
        TextBaseline::Alphabetic | TextBaseline::Ideographic => 0.0,
        TextBaseline::Bottom => face.descender,
    };
    (x, y * scale)
}

/// Canvas text operations for any [`PathSurface`].
pub struct TextLayoutEngine {
    options: EngineOptions,
    styles: StyleParser,
    resolver: ComputedStyleResolver,
    faces: Arc<FaceRegistry>,
    metrics: TextMetricsEngine,
    backend: Backend,
}

impl TextLayoutEngine {
    /// Engine drawing with glyph outlines.
    pub fn new(faces: Arc<FaceRegistry>, options: EngineOptions) -> Self {
        Self {
            metrics: TextMetricsEngine::new(options.fallback_character),
            options,
            styles: StyleParser::new(),
            resolver: ComputedStyleResolver,
            faces,
            backend: Backend::Outline,
        }
    }

    /// Engine whose backend is chosen from what `surface` supports.
    pub fn for_surface<S: PathSurface + ?Sized>(
        faces: Arc<FaceRegistry>,
        options: EngineOptions,
        surface: &mut S,
    ) -> Self {
        let backend = Backend::select(&options, surface.native_text().is_some());
        log::info!(target: "TextLayout::Backend", "selected {backend:?} backend");
        Self::new(faces, options).with_backend(backend)
    }

    pub fn with_backend(mut self, backend: Backend) -> Self {
        self.backend = backend;
        self
    }

    pub fn backend(&self) -> Backend {
        self.backend
    }

    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    pub fn faces(&self) -> &Arc<FaceRegistry> {
        &self.faces
    }

    pub fn styles(&self) -> &StyleParser {
        &self.styles
    }

    /// Style of `surface.font` resolved against the surface state.
    pub fn computed_style<S: PathSurface + ?Sized>(&self, surface: &S) -> ComputedStyle {
        let style = self.styles.parse(surface.font());
        self.resolver.resolve(
            style,
            surface.ambient_font_size(),
            surface.text_align(),
            surface.direction(),
        )
    }

    pub fn fill_text<S: PathSurface + ?Sized>(
        &self,
        surface: &mut S,
        text: &str,
        x: f64,
        y: f64,
        max_width: Option<f64>,
    ) -> Result<(), TextError> {
        self.draw_text(surface, text, x, y, max_width, PaintMode::Fill)
    }

    pub fn stroke_text<S: PathSurface + ?Sized>(
        &self,
        surface: &mut S,
        text: &str,
        x: f64,
        y: f64,
        max_width: Option<f64>,
    ) -> Result<(), TextError> {
        self.draw_text(surface, text, x, y, max_width, PaintMode::Stroke)
    }

    /// Width of `text` in pixels with the surface's current font.
    pub fn measure_text<S: PathSurface + ?Sized>(
        &self,
        surface: &mut S,
        text: &str,
    ) -> Result<TextMetrics, TextError> {
        let style = self.computed_style(surface);

        if self.use_native(surface)
            && let Some(native) = surface.native_text()
        {
            native.set_text_style(&style.to_string());
            let width = native.measure_text(text);
            return Ok(TextMetrics {
                width,
                advance: width,
                height: 0.0,
            });
        }

        let face = self.faces.face_from_style(&style)?;
        let scale = text_scale(style.pixel_size, &face);
        let extents = self.metrics.measure(text, &face)?;
        Ok(extents.scaled(scale * self.options.scaling))
    }

    fn use_native<S: PathSurface + ?Sized>(&self, surface: &mut S) -> bool {
        if self.backend != Backend::Native {
            return false;
        }
        let available = surface.native_text().is_some();
        if !available {
            log::warn!(target: "TextLayout::Backend", "native text unavailable, drawing outlines");
        }
        available
    }

    fn draw_text<S: PathSurface + ?Sized>(
        &self,
        surface: &mut S,
        text: &str,
        x: f64,
        y: f64,
        max_width: Option<f64>,
        mode: PaintMode,
    ) -> Result<(), TextError> {
        if let Some(mw) = max_width
            && !(mw.is_finite() && mw > 0.0)
        {
            log::debug!(target: "TextLayout::Draw", "maxWidth {mw} leaves no room, nothing drawn");
            return Ok(());
        }

        let style = self.computed_style(surface);
        let face = self.faces.face_from_style(&style)?;
        let scale = text_scale(style.pixel_size, &face);

        if self.use_native(surface) {
            return self.draw_native(surface, text, x, y, &style, &face, scale, mode);
        }

        let extents = self.metrics.measure(text, &face)?;
        let width = extents.width * scale * self.options.scaling;
        let condense = match max_width {
            Some(mw) if width > mw => mw / width,
            _ => 1.0,
        };
        let (ox, oy) = text_offset(
            width * condense,
            &face,
            scale,
            style.align,
            surface.text_baseline(),
        );
        log::debug!(
            target: "TextLayout::Draw",
            "{text:?} with {} at scale {scale}, offset ({ox}, {oy})",
            face.key
        );

        // positioned
        let mut positioned = ScopedSave::new(surface);
        positioned.translate(x + ox, y + oy);
        positioned.begin_path();
        positioned.scale(self.options.scaling * condense, self.options.scaling);

        // path built: Y軸を反転してグリフを順に配置する
        {
            let mut pen = ScopedSave::new(&mut *positioned);
            pen.scale(scale, -scale);
            for ch in text.chars() {
                let glyph = face.glyph_or_fallback(ch, self.metrics.fallback())?;
                let ops = glyph::replay(glyph, &mut *pen);
                if self.options.debug {
                    log::info!(
                        target: "TextLayout::Debug",
                        "{ch:?}: {ops} outline ops, advance {}",
                        glyph.horizontal_advance
                    );
                }
                pen.translate(glyph.horizontal_advance, 0.0);
            }
        }

        // committed
        positioned.close_path();
        match mode {
            PaintMode::Fill => positioned.fill(),
            PaintMode::Stroke => positioned.stroke(),
        }
        Ok(())
    }

    #[allow(clippy::too_many_arguments)]
    fn draw_native<S: PathSurface + ?Sized>(
        &self,
        surface: &mut S,
        text: &str,
        x: f64,
        y: f64,
        style: &ComputedStyle,
        face: &Face,
        scale: f64,
        mode: PaintMode,
    ) -> Result<(), TextError> {
        let css = style.to_string();
        let width = match surface.native_text() {
            Some(native) => {
                native.set_text_style(&css);
                native.measure_text(text)
            }
            None => 0.0,
        };
        let (ox, oy) = text_offset(width, face, scale, style.align, surface.text_baseline());

        let mut positioned = ScopedSave::new(surface);
        positioned.translate(x + ox, y + oy);
        positioned.begin_path();
        if let Some(native) = positioned.native_text() {
            match mode {
                PaintMode::Fill => native.draw_text(text),
                PaintMode::Stroke => native.path_text(text),
            }
        }
        positioned.close_path();
        match mode {
            PaintMode::Fill => positioned.fill(),
            PaintMode::Stroke => positioned.stroke(),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::face::FaceData;

    fn face() -> Face {
        Face::from_data(
            FaceData::from_json(
                r#"{"familyName":"t","resolution":1000,"ascender":800,"descender":-200}"#,
            )
            .unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn scale_uses_three_quarters() {
        assert!((text_scale(40.0, &face()) - 0.03).abs() < 1e-12);
    }

    #[test]
    fn offsets() {
        let f = face();
        assert_eq!(
            text_offset(20.0, &f, 0.5, ResolvedAlign::Right, TextBaseline::Alphabetic),
            (-20.0, 0.0)
        );
        assert_eq!(
            text_offset(20.0, &f, 0.5, ResolvedAlign::Center, TextBaseline::Top),
            (-10.0, 400.0)
        );
        assert_eq!(
            text_offset(20.0, &f, 0.5, ResolvedAlign::Left, TextBaseline::Middle),
            (0.0, 150.0)
        );
        assert_eq!(
            text_offset(20.0, &f, 0.5, ResolvedAlign::Left, TextBaseline::Bottom),
            (0.0, -100.0)
        );
    }
}
