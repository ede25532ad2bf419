use canvas_text::engine::Glyph;
use canvas_text::engine::glyph::{GlyphOutlineOp, OutlineSink, interpret, parse_outline, replay};

#[test]
fn outline_is_parsed_once_and_shared() {
    let glyph = Glyph::new(Some("m 0 0 l 5 5".to_string()), 10.0, None);
    assert!(!glyph.is_parsed());

    let first = interpret(&glyph).as_ptr();
    assert!(glyph.is_parsed());
    let second = interpret(&glyph).as_ptr();
    assert_eq!(first, second);
    assert_eq!(glyph.outline_ops(), parse_outline("m 0 0 l 5 5").as_slice());
}

#[test]
fn glyph_without_outline_has_no_ops() {
    let glyph = Glyph::new(None, 10.0, Some(4.0));
    assert!(interpret(&glyph).is_empty());
    assert_eq!(glyph.width(), 10.0);
}

#[test]
fn curve_operands_put_endpoint_first() {
    assert_eq!(
        parse_outline("q 1 2 3 4"),
        vec![GlyphOutlineOp::QuadraticCurveTo {
            cx: 3.0,
            cy: 4.0,
            x: 1.0,
            y: 2.0
        }]
    );
}

#[derive(Default)]
struct Collect(Vec<String>);

impl OutlineSink for Collect {
    fn move_to(&mut self, x: f64, y: f64) {
        self.0.push(format!("M {x} {y}"));
    }
    fn line_to(&mut self, x: f64, y: f64) {
        self.0.push(format!("L {x} {y}"));
    }
    fn quadratic_curve_to(&mut self, cx: f64, cy: f64, x: f64, y: f64) {
        self.0.push(format!("Q {cx} {cy} {x} {y}"));
    }
}

#[test]
fn unknown_opcode_keeps_following_ops() {
    let glyph = Glyph::new(Some("m 0 0 c 1 2 3 l 5 5 q 1 1 2 2".to_string()), 10.0, None);
    let mut sink = Collect::default();
    assert_eq!(replay(&glyph, &mut sink), 3);
    assert_eq!(sink.0, vec!["M 0 0", "L 5 5", "Q 2 2 1 1"]);
}
