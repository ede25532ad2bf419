//! Glyph-outline text engine for 2D drawing surfaces without native text.

pub mod error;
pub mod face;
pub mod glyph;
pub mod layout;
pub mod metrics;
pub mod options;
pub mod style;
pub mod surface;

pub use error::TextError;
pub use face::{Face, FaceData, FaceKey, FaceRegistry, FaceSource, Glyph};
pub use layout::TextLayoutEngine;
pub use metrics::{TextExtents, TextMetrics, TextMetricsEngine};
pub use options::{Backend, EngineOptions};
pub use style::{ComputedStyle, Style, StyleParser};
pub use surface::{NativeTextSurface, PathSurface, RecordingSurface};
