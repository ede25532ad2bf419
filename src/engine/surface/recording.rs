//! In-memory surface that records every call.
//!
//! Keeps a canvas-like transform stack so recorded paths can be read back
//! in device space, e.g. as an SVG path.

use std::fmt::Write as _;

use super::{NativeTextSurface, PathSurface};
use crate::engine::glyph::OutlineSink;
use crate::engine::style::{Direction, TextAlign, TextBaseline};

#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceCommand {
    Save,
    Restore,
    Translate { dx: f64, dy: f64 },
    Scale { sx: f64, sy: f64 },
    BeginPath,
    ClosePath,
    MoveTo { x: f64, y: f64 },
    LineTo { x: f64, y: f64 },
    QuadraticCurveTo { cx: f64, cy: f64, x: f64, y: f64 },
    Fill,
    Stroke,
    SetTextStyle(String),
    DrawText(String),
    PathText(String),
}

/// Affine transform `[a c e; b d f]`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    pub const IDENTITY: Transform = Transform {
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: 1.0,
        e: 0.0,
        f: 0.0,
    };

    pub fn translate(&mut self, tx: f64, ty: f64) {
        self.e += self.a * tx + self.c * ty;
        self.f += self.b * tx + self.d * ty;
    }

    pub fn scale(&mut self, sx: f64, sy: f64) {
        self.a *= sx;
        self.b *= sx;
        self.c *= sy;
        self.d *= sy;
    }

    pub fn apply(&self, x: f64, y: f64) -> (f64, f64) {
        (
            self.a * x + self.c * y + self.e,
            self.b * x + self.d * y + self.f,
        )
    }
}

/// Path segment in device space
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathSegment {
    MoveTo(f64, f64),
    LineTo(f64, f64),
    QuadTo { cx: f64, cy: f64, x: f64, y: f64 },
    Close,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaintMode {
    Fill,
    Stroke,
}

#[derive(Debug, Clone)]
pub struct RecordingSurface {
    pub font: String,
    pub text_align: TextAlign,
    pub text_baseline: TextBaseline,
    pub direction: Direction,
    pub ambient_font_size: f64,

    commands: Vec<SurfaceCommand>,
    transform: Transform,
    stack: Vec<Transform>,
    path: Vec<PathSegment>,
    painted: Vec<(PaintMode, Vec<PathSegment>)>,
    /// 疑似ネイティブテキスト: 1文字あたりの幅
    native_char_width: Option<f64>,
}

impl Default for RecordingSurface {
    fn default() -> Self {
        Self {
            font: "10px sans-serif".to_string(),
            text_align: TextAlign::Start,
            text_baseline: TextBaseline::Alphabetic,
            direction: Direction::Ltr,
            ambient_font_size: 16.0,
            commands: Vec::new(),
            transform: Transform::IDENTITY,
            stack: Vec::new(),
            path: Vec::new(),
            painted: Vec::new(),
            native_char_width: None,
        }
    }
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Surface that also offers native text, measuring every character
    /// as `char_width` pixels.
    pub fn with_native_text(char_width: f64) -> Self {
        Self {
            native_char_width: Some(char_width),
            ..Self::default()
        }
    }

    pub fn commands(&self) -> &[SurfaceCommand] {
        &self.commands
    }

    pub fn clear_commands(&mut self) {
        self.commands.clear();
    }

    pub fn current_transform(&self) -> Transform {
        self.transform
    }

    pub fn save_depth(&self) -> usize {
        self.stack.len()
    }

    /// Paths committed by `fill`/`stroke`, in device space.
    pub fn painted(&self) -> &[(PaintMode, Vec<PathSegment>)] {
        &self.painted
    }

    /// Number of move/line/curve commands recorded.
    pub fn path_command_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| {
                matches!(
                    c,
                    SurfaceCommand::MoveTo { .. }
                        | SurfaceCommand::LineTo { .. }
                        | SurfaceCommand::QuadraticCurveTo { .. }
                )
            })
            .count()
    }

    /// SVG path data of every painted path.
    pub fn svg_path(&self) -> String {
        let mut d = String::new();
        for segment in self.painted.iter().flat_map(|(_, path)| path) {
            if !d.is_empty() {
                d.push(' ');
            }
            // String への書き込みは失敗しない
            let _ = match *segment {
                PathSegment::MoveTo(x, y) => write!(d, "M{x:.2} {y:.2}"),
                PathSegment::LineTo(x, y) => write!(d, "L{x:.2} {y:.2}"),
                PathSegment::QuadTo { cx, cy, x, y } => {
                    write!(d, "Q{cx:.2} {cy:.2} {x:.2} {y:.2}")
                }
                PathSegment::Close => write!(d, "Z"),
            };
        }
        d
    }

    fn paint(&mut self, mode: PaintMode) {
        if !self.path.is_empty() {
            self.painted.push((mode, self.path.clone()));
        }
    }
}

impl OutlineSink for RecordingSurface {
    fn move_to(&mut self, x: f64, y: f64) {
        self.commands.push(SurfaceCommand::MoveTo { x, y });
        let (x, y) = self.transform.apply(x, y);
        self.path.push(PathSegment::MoveTo(x, y));
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.commands.push(SurfaceCommand::LineTo { x, y });
        let (x, y) = self.transform.apply(x, y);
        self.path.push(PathSegment::LineTo(x, y));
    }

    fn quadratic_curve_to(&mut self, cx: f64, cy: f64, x: f64, y: f64) {
        self.commands
            .push(SurfaceCommand::QuadraticCurveTo { cx, cy, x, y });
        let (cx, cy) = self.transform.apply(cx, cy);
        let (x, y) = self.transform.apply(x, y);
        self.path.push(PathSegment::QuadTo { cx, cy, x, y });
    }
}

impl PathSurface for RecordingSurface {
    fn save(&mut self) {
        self.commands.push(SurfaceCommand::Save);
        self.stack.push(self.transform);
    }

    fn restore(&mut self) {
        self.commands.push(SurfaceCommand::Restore);
        // canvas と同様に、対応する save が無ければ何もしない
        if let Some(t) = self.stack.pop() {
            self.transform = t;
        }
    }

    fn translate(&mut self, x: f64, y: f64) {
        self.commands
            .push(SurfaceCommand::Translate { dx: x, dy: y });
        self.transform.translate(x, y);
    }

    fn scale(&mut self, x: f64, y: f64) {
        self.commands.push(SurfaceCommand::Scale { sx: x, sy: y });
        self.transform.scale(x, y);
    }

    fn begin_path(&mut self) {
        self.commands.push(SurfaceCommand::BeginPath);
        self.path.clear();
    }

    fn close_path(&mut self) {
        self.commands.push(SurfaceCommand::ClosePath);
        if !self.path.is_empty() {
            self.path.push(PathSegment::Close);
        }
    }

    fn fill(&mut self) {
        self.commands.push(SurfaceCommand::Fill);
        self.paint(PaintMode::Fill);
    }

    fn stroke(&mut self) {
        self.commands.push(SurfaceCommand::Stroke);
        self.paint(PaintMode::Stroke);
    }

    fn font(&self) -> &str {
        &self.font
    }

    fn text_align(&self) -> TextAlign {
        self.text_align
    }

    fn text_baseline(&self) -> TextBaseline {
        self.text_baseline
    }

    fn direction(&self) -> Direction {
        self.direction
    }

    fn ambient_font_size(&self) -> f64 {
        self.ambient_font_size
    }

    fn native_text(&mut self) -> Option<&mut dyn NativeTextSurface> {
        if self.native_char_width.is_some() {
            Some(self)
        } else {
            None
        }
    }
}

impl NativeTextSurface for RecordingSurface {
    fn set_text_style(&mut self, css: &str) {
        self.commands
            .push(SurfaceCommand::SetTextStyle(css.to_string()));
    }

    fn draw_text(&mut self, text: &str) {
        self.commands.push(SurfaceCommand::DrawText(text.to_string()));
    }

    fn path_text(&mut self, text: &str) {
        self.commands.push(SurfaceCommand::PathText(text.to_string()));
    }

    fn measure_text(&mut self, text: &str) -> f64 {
        self.native_char_width.unwrap_or(0.0) * text.chars().count() as f64
    }
}
