//! TrueType/OpenType フォントから face データを作る
//!
//! `ab_glyph` で読み込んだアウトラインをアウトラインプログラムに変換する。
//! 3次ベジェは制御点1つの2次ベジェで近似する。

use std::collections::BTreeMap;

use ab_glyph::{Font, FontVec, OutlineCurve, Point};

use crate::engine::error::TextError;
use crate::engine::face::{FaceData, FaceKey, GlyphData};
use crate::engine::glyph::{GlyphOutlineOp, write_program};

/// 印字可能な ASCII
pub const ASCII_CHARSET: &str = " !\"#$%&'()*+,-./0123456789:;<=>?@ABCDEFGHIJKLMNOPQRSTUVWXYZ[\\]^_`abcdefghijklmnopqrstuvwxyz{|}~";

/// Converts font bytes into a face record for `key`, keeping the glyphs of
/// `charset` that the font maps.
pub fn face_data_from_font(
    bytes: Vec<u8>,
    key: &FaceKey,
    charset: &str,
) -> Result<FaceData, TextError> {
    let font = FontVec::try_from_vec(bytes).map_err(|e| TextError::InvalidFont(e.to_string()))?;
    let resolution = font
        .units_per_em()
        .ok_or_else(|| TextError::InvalidFont("missing units per em".to_string()))?;

    let mut glyphs = BTreeMap::new();
    for ch in charset.chars() {
        let id = font.glyph_id(ch);
        // .notdef
        if id.0 == 0 {
            continue;
        }
        let (o, x_max) = match font.outline(id) {
            Some(outline) => (
                Some(write_program(&outline_ops(&outline.curves))),
                Some(round(outline.bounds.max.x)),
            ),
            None => (None, None),
        };
        glyphs.insert(
            ch.to_string(),
            GlyphData {
                o,
                ha: round(font.h_advance_unscaled(id)),
                x_max,
            },
        );
    }

    Ok(FaceData {
        family_name: key.family.clone(),
        css_font_weight: key.weight.to_string(),
        css_font_style: key.slant.to_string(),
        resolution: f64::from(resolution),
        ascender: round(font.ascent_unscaled()),
        descender: round(font.descent_unscaled()),
        glyphs,
    })
}

/// Outline curves to move/line/quad ops. A new contour starts wherever a
/// curve does not continue from the previous end point.
pub fn outline_ops(curves: &[OutlineCurve]) -> Vec<GlyphOutlineOp> {
    let mut ops = Vec::with_capacity(curves.len() + 1);
    let mut pen: Option<Point> = None;

    for curve in curves {
        let (start, end) = match curve {
            OutlineCurve::Line(p0, p1) => (*p0, *p1),
            OutlineCurve::Quad(p0, _, p1) => (*p0, *p1),
            OutlineCurve::Cubic(p0, _, _, p1) => (*p0, *p1),
        };
        if !pen.is_some_and(|p| p.x == start.x && p.y == start.y) {
            ops.push(GlyphOutlineOp::MoveTo {
                x: round(start.x),
                y: round(start.y),
            });
        }

        let op = match curve {
            OutlineCurve::Line(_, p1) => GlyphOutlineOp::LineTo {
                x: round(p1.x),
                y: round(p1.y),
            },
            OutlineCurve::Quad(_, c, p1) => quad(*c, *p1),
            OutlineCurve::Cubic(p0, c1, c2, p1) => {
                let c = Point {
                    x: (3.0 * (c1.x + c2.x) - p0.x - p1.x) / 4.0,
                    y: (3.0 * (c1.y + c2.y) - p0.y - p1.y) / 4.0,
                };
                quad(c, *p1)
            }
        };
        ops.push(op);
        pen = Some(end);
    }
    ops
}

fn quad(c: Point, p: Point) -> GlyphOutlineOp {
    GlyphOutlineOp::QuadraticCurveTo {
        cx: round(c.x),
        cy: round(c.y),
        x: round(p.x),
        y: round(p.y),
    }
}

/// 小数第2位で丸める
fn round(v: f32) -> f64 {
    (f64::from(v) * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pt(x: f32, y: f32) -> Point {
        Point { x, y }
    }

    #[test]
    fn contours_start_with_move() {
        let ops = outline_ops(&[
            OutlineCurve::Line(pt(0.0, 0.0), pt(10.0, 0.0)),
            OutlineCurve::Quad(pt(10.0, 0.0), pt(10.0, 10.0), pt(0.0, 10.0)),
            OutlineCurve::Line(pt(20.0, 0.0), pt(30.0, 0.0)),
        ]);
        assert_eq!(
            ops,
            vec![
                GlyphOutlineOp::MoveTo { x: 0.0, y: 0.0 },
                GlyphOutlineOp::LineTo { x: 10.0, y: 0.0 },
                GlyphOutlineOp::QuadraticCurveTo {
                    cx: 10.0,
                    cy: 10.0,
                    x: 0.0,
                    y: 10.0
                },
                GlyphOutlineOp::MoveTo { x: 20.0, y: 0.0 },
                GlyphOutlineOp::LineTo { x: 30.0, y: 0.0 },
            ]
        );
    }

    #[test]
    fn cubic_becomes_single_quad() {
        let ops = outline_ops(&[OutlineCurve::Cubic(
            pt(0.0, 0.0),
            pt(0.0, 4.0),
            pt(4.0, 4.0),
            pt(4.0, 0.0),
        )]);
        assert_eq!(ops.len(), 2);
        assert_eq!(
            ops[1],
            GlyphOutlineOp::QuadraticCurveTo {
                cx: 2.0,
                cy: 6.0,
                x: 4.0,
                y: 0.0
            }
        );
    }

    #[test]
    fn rejects_garbage_bytes() {
        let key = FaceKey::new("x", Default::default(), Default::default());
        let err = face_data_from_font(vec![0, 1, 2, 3], &key, "a").unwrap_err();
        assert!(matches!(err, TextError::InvalidFont(_)));
    }
}
