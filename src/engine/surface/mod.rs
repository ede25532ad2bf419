//! Drawing surface capabilities consumed by the text engine.
//!
//! # Overview
//!
//! The engine never owns a surface. Callers pass anything implementing
//! [`PathSurface`]: the path/transform primitives of a 2D canvas context
//! plus read access to its text state.
//!
//! # Non-Responsibilities
//!
//! - Rasterization or paint styles (the surface's own fill/stroke state is used)
//! - Computing the ambient font size or direction (read as given)

use std::ops::{Deref, DerefMut};

use crate::engine::glyph::OutlineSink;
use crate::engine::style::{Direction, TextAlign, TextBaseline};

pub mod recording;

pub use recording::{PaintMode, PathSegment, RecordingSurface, SurfaceCommand, Transform};

/// 2D path-drawing surface.
pub trait PathSurface: OutlineSink {
    fn save(&mut self);
    fn restore(&mut self);
    fn translate(&mut self, x: f64, y: f64);
    fn scale(&mut self, x: f64, y: f64);
    fn begin_path(&mut self);
    fn close_path(&mut self);
    fn fill(&mut self);
    fn stroke(&mut self);

    /// CSS font shorthand (`font` property)
    fn font(&self) -> &str;
    fn text_align(&self) -> TextAlign;
    fn text_baseline(&self) -> TextBaseline;
    /// Text direction of the host element
    fn direction(&self) -> Direction;
    /// Inherited font size of the host element, in pixels
    fn ambient_font_size(&self) -> f64;

    /// Native text drawing, when the host provides it.
    fn native_text(&mut self) -> Option<&mut dyn NativeTextSurface> {
        None
    }
}

/// Text primitives offered by hosts with built-in glyph rendering.
pub trait NativeTextSurface {
    /// Sets the font used by the following calls, as a CSS shorthand.
    fn set_text_style(&mut self, css: &str);
    /// Fills `text` at the current origin.
    fn draw_text(&mut self, text: &str);
    /// Appends the outline of `text` to the current path.
    fn path_text(&mut self, text: &str);
    /// Advance width of `text` in pixels.
    fn measure_text(&mut self, text: &str) -> f64;
}

/// Saves the surface state and restores it when dropped.
///
/// Restoring on drop covers every exit path, including `?` returns.
pub struct ScopedSave<'a, S: PathSurface + ?Sized> {
    surface: &'a mut S,
}

impl<'a, S: PathSurface + ?Sized> ScopedSave<'a, S> {
    pub fn new(surface: &'a mut S) -> Self {
        surface.save();
        Self { surface }
    }
}

impl<S: PathSurface + ?Sized> Deref for ScopedSave<'_, S> {
    type Target = S;

    fn deref(&self) -> &S {
        self.surface
    }
}

impl<S: PathSurface + ?Sized> DerefMut for ScopedSave<'_, S> {
    fn deref_mut(&mut self) -> &mut S {
        self.surface
    }
}

impl<S: PathSurface + ?Sized> Drop for ScopedSave<'_, S> {
    fn drop(&mut self) {
        self.surface.restore();
    }
}
