use std::fmt;
use std::sync::Arc;

use super::{Direction, FontSlant, FontWeight, Style, TextAlign};

/// `textAlign` after resolving the logical `start`/`end` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResolvedAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// Style resolved against the surface state at call time.
///
/// Not cached: the ambient font size and direction may change between calls.
#[derive(Debug, Clone, PartialEq)]
pub struct ComputedStyle {
    pub style: Arc<Style>,
    /// 絶対ピクセルサイズ
    pub pixel_size: f64,
    pub align: ResolvedAlign,
}

impl ComputedStyle {
    pub fn family(&self) -> &str {
        &self.style.family
    }

    pub fn weight(&self) -> FontWeight {
        self.style.weight
    }

    pub fn slant(&self) -> FontSlant {
        self.style.slant
    }
}

/// CSS font shorthand for native text backends.
impl fmt::Display for ComputedStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}px \"{}\"",
            self.style.slant, self.style.weight, self.pixel_size, self.style.family
        )
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ComputedStyleResolver;

impl ComputedStyleResolver {
    pub fn resolve(
        &self,
        style: Arc<Style>,
        ambient_font_size: f64,
        align: TextAlign,
        direction: Direction,
    ) -> ComputedStyle {
        let pixel_size = style.size.to_px(ambient_font_size);
        ComputedStyle {
            style,
            pixel_size,
            align: resolve_align(align, direction),
        }
    }
}

pub fn resolve_align(align: TextAlign, direction: Direction) -> ResolvedAlign {
    match (align, direction) {
        (TextAlign::Left, _) => ResolvedAlign::Left,
        (TextAlign::Center, _) => ResolvedAlign::Center,
        (TextAlign::Right, _) => ResolvedAlign::Right,
        (TextAlign::Start, Direction::Rtl) | (TextAlign::End, Direction::Ltr) => {
            ResolvedAlign::Right
        }
        (TextAlign::Start, Direction::Ltr) | (TextAlign::End, Direction::Rtl) => {
            ResolvedAlign::Left
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::style::FontSize;

    fn style(size: FontSize) -> Arc<Style> {
        Arc::new(Style {
            size,
            ..Style::default()
        })
    }

    #[test]
    fn logical_alignment() {
        assert_eq!(resolve_align(TextAlign::Start, Direction::Ltr), ResolvedAlign::Left);
        assert_eq!(resolve_align(TextAlign::Start, Direction::Rtl), ResolvedAlign::Right);
        assert_eq!(resolve_align(TextAlign::End, Direction::Ltr), ResolvedAlign::Right);
        assert_eq!(resolve_align(TextAlign::End, Direction::Rtl), ResolvedAlign::Left);
        assert_eq!(resolve_align(TextAlign::Center, Direction::Rtl), ResolvedAlign::Center);
        assert_eq!(resolve_align(TextAlign::Left, Direction::Rtl), ResolvedAlign::Left);
    }

    #[test]
    fn size_relative_to_ambient() {
        let r = ComputedStyleResolver;
        let c = r.resolve(style(FontSize::Em(2.0)), 12.0, TextAlign::Start, Direction::Ltr);
        assert_eq!(c.pixel_size, 24.0);
        let c = r.resolve(style(FontSize::Px(30.0)), 12.0, TextAlign::Start, Direction::Ltr);
        assert_eq!(c.pixel_size, 30.0);
    }

    #[test]
    fn display_builds_shorthand() {
        let c = ComputedStyleResolver.resolve(
            Arc::new(Style {
                family: "Vera Sans".into(),
                size: FontSize::Px(14.0),
                weight: FontWeight::Bold,
                slant: FontSlant::Italic,
            }),
            16.0,
            TextAlign::Start,
            Direction::Ltr,
        );
        assert_eq!(c.to_string(), "italic bold 14px \"Vera Sans\"");
    }
}
