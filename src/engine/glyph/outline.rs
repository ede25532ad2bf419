//! Glyph outline programs.
//!
//! An outline program is a whitespace-separated token stream:
//!
//! ```text
//! m x y          move to
//! l x y          line to
//! q x y cx cy    quadratic curve to (x, y) with control point (cx, cy)
//! ```
//!
//! Coordinates are in face units with the Y axis pointing up.
//! Unknown opcodes are skipped so newer face files still render.

use std::fmt;
use std::iter::Peekable;
use std::str::SplitWhitespace;

use crate::engine::face::Glyph;

/// Receiver for outline drawing commands.
pub trait OutlineSink {
    fn move_to(&mut self, x: f64, y: f64);
    fn line_to(&mut self, x: f64, y: f64);
    fn quadratic_curve_to(&mut self, cx: f64, cy: f64, x: f64, y: f64);
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GlyphOutlineOp {
    MoveTo { x: f64, y: f64 },
    LineTo { x: f64, y: f64 },
    QuadraticCurveTo { cx: f64, cy: f64, x: f64, y: f64 },
}

impl GlyphOutlineOp {
    pub fn replay<S: OutlineSink + ?Sized>(&self, sink: &mut S) {
        match *self {
            GlyphOutlineOp::MoveTo { x, y } => sink.move_to(x, y),
            GlyphOutlineOp::LineTo { x, y } => sink.line_to(x, y),
            GlyphOutlineOp::QuadraticCurveTo { cx, cy, x, y } => {
                sink.quadratic_curve_to(cx, cy, x, y)
            }
        }
    }
}

/// Writes the op in outline program form.
impl fmt::Display for GlyphOutlineOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            GlyphOutlineOp::MoveTo { x, y } => write!(f, "m {x} {y}"),
            GlyphOutlineOp::LineTo { x, y } => write!(f, "l {x} {y}"),
            GlyphOutlineOp::QuadraticCurveTo { cx, cy, x, y } => {
                write!(f, "q {x} {y} {cx} {cy}")
            }
        }
    }
}

/// Parses an outline program into drawing ops.
pub fn parse_outline(program: &str) -> Vec<GlyphOutlineOp> {
    let mut tokens = program.split_whitespace().peekable();
    let mut ops = Vec::new();

    while let Some(opcode) = tokens.next() {
        let op = match opcode {
            "m" => operands::<2>(&mut tokens).map(|[x, y]| GlyphOutlineOp::MoveTo { x, y }),
            "l" => operands::<2>(&mut tokens).map(|[x, y]| GlyphOutlineOp::LineTo { x, y }),
            "q" => operands::<4>(&mut tokens)
                .map(|[x, y, cx, cy]| GlyphOutlineOp::QuadraticCurveTo { cx, cy, x, y }),
            other => {
                log::debug!(target: "GlyphOutline::Parse", "skipping unknown opcode {other:?}");
                continue;
            }
        };
        match op {
            Some(op) => ops.push(op),
            None => {
                log::debug!(target: "GlyphOutline::Parse", "dropping {opcode:?}: missing operands")
            }
        }
    }

    ops
}

/// Reads `N` numeric operands. A non-numeric token is left in place so it
/// can be read as the next opcode.
fn operands<const N: usize>(tokens: &mut Peekable<SplitWhitespace<'_>>) -> Option<[f64; N]> {
    let mut values = [0.0; N];
    for value in values.iter_mut() {
        *value = tokens.next_if(|t| t.parse::<f64>().is_ok())?.parse().ok()?;
    }
    Some(values)
}

/// Serialises ops back to an outline program.
pub fn write_program(ops: &[GlyphOutlineOp]) -> String {
    ops.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Outline ops of `glyph`, parsed on first access and cached on the glyph.
pub fn interpret(glyph: &Glyph) -> &[GlyphOutlineOp] {
    glyph.outline_ops()
}

/// Replays the glyph outline into `sink`, returning the number of ops drawn.
pub fn replay<S: OutlineSink + ?Sized>(glyph: &Glyph, sink: &mut S) -> usize {
    let ops = interpret(glyph);
    for op in ops {
        op.replay(sink);
    }
    ops.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_all_opcodes() {
        let ops = parse_outline("m 0 0 l 10 0 q 10 10 5 12");
        assert_eq!(
            ops,
            vec![
                GlyphOutlineOp::MoveTo { x: 0.0, y: 0.0 },
                GlyphOutlineOp::LineTo { x: 10.0, y: 0.0 },
                GlyphOutlineOp::QuadraticCurveTo {
                    cx: 5.0,
                    cy: 12.0,
                    x: 10.0,
                    y: 10.0
                },
            ]
        );
    }

    #[test]
    fn unknown_opcode_is_skipped() {
        let ops = parse_outline("m 1 2 z l 3 4");
        assert_eq!(
            ops,
            vec![
                GlyphOutlineOp::MoveTo { x: 1.0, y: 2.0 },
                GlyphOutlineOp::LineTo { x: 3.0, y: 4.0 },
            ]
        );
    }

    #[test]
    fn truncated_op_keeps_following_opcode() {
        let ops = parse_outline("m 1 l 3 4");
        assert_eq!(ops, vec![GlyphOutlineOp::LineTo { x: 3.0, y: 4.0 }]);
    }

    #[test]
    fn program_round_trip() {
        let program = "m 0 0 l 10 0 q 10 10 5 12";
        assert_eq!(write_program(&parse_outline(program)), program);
    }
}
