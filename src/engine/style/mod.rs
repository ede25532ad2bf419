//! Font style values for canvas text.
//!
//! # Overview
//!
//! A canvas `font` property is a CSS font shorthand such as
//! `italic bold 1.5em "Times New Roman"`. This module defines the values
//! extracted from it ([`Style`]) and the surface-side text properties
//! (`textAlign`, `textBaseline`, `direction`) needed to position text.
//!
//! # Data Flow
//!
//! ```text
//! font string → StyleParser → Style → ComputedStyleResolver → ComputedStyle
//! ```

use std::fmt;

pub mod computed;
pub mod parser;

pub use computed::{ComputedStyle, ComputedStyleResolver, ResolvedAlign};
pub use parser::StyleParser;

/* ============================
 * Font Size
 * ============================ */

/// フォントサイズの指定値
#[derive(Debug, Clone, PartialEq)]
pub enum FontSize {
    /// 単位なしの数値。そのままピクセル値として使う
    Px(f64),
    /// 周囲のフォントサイズに対する倍率
    Em(f64),
    /// 周囲のフォントサイズに対するパーセンテージ
    Percent(f64),
    /// ポイント指定
    Pt(f64),
    /// 解釈できない値（周囲のフォントサイズをそのまま使う）
    Unknown(String),
}

impl FontSize {
    /// CSS文字列からFontSize
    pub fn from_css(value: &str) -> FontSize {
        let value = value.trim();
        let parse = |num: &str| num.parse::<f64>().ok().filter(|n| n.is_finite());

        if let Some(n) = parse(value) {
            return FontSize::Px(n);
        }
        // px など em/%/pt 以外の単位は Unknown (周囲のサイズ) になる
        let parsed = if let Some(num) = value.strip_suffix("em") {
            parse(num).map(FontSize::Em)
        } else if let Some(num) = value.strip_suffix('%') {
            parse(num).map(FontSize::Percent)
        } else if let Some(num) = value.strip_suffix("pt") {
            parse(num).map(FontSize::Pt)
        } else {
            None
        };
        parsed.unwrap_or_else(|| FontSize::Unknown(value.to_string()))
    }

    /// 周囲のフォントサイズ `ambient` を基準にピクセル値へ変換する
    pub fn to_px(&self, ambient: f64) -> f64 {
        match *self {
            FontSize::Px(px) => px,
            FontSize::Em(em) => ambient * em,
            FontSize::Percent(p) => (ambient / 100.0) * p,
            FontSize::Pt(pt) => ambient * (4.0 / 3.0) * pt,
            FontSize::Unknown(_) => ambient,
        }
    }
}

impl Default for FontSize {
    fn default() -> Self {
        FontSize::Px(10.0)
    }
}

impl fmt::Display for FontSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FontSize::Px(v) => write!(f, "{}", v),
            FontSize::Em(v) => write!(f, "{}em", v),
            FontSize::Percent(v) => write!(f, "{}%", v),
            FontSize::Pt(v) => write!(f, "{}pt", v),
            FontSize::Unknown(raw) => write!(f, "{}", raw),
        }
    }
}

/* ============================
 * Weight / Slant
 * ============================ */

/// Font weight, collapsed to the two weights face files are published in.
///
/// `lighter` and the numeric weights below 700 all map to `Normal`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FontWeight {
    #[default]
    Normal,
    Bold,
}

impl FontWeight {
    /// Keywords recognised in a font shorthand, in match order.
    pub const KEYWORDS: [&'static str; 12] = [
        "bold", "bolder", "lighter", "100", "200", "300", "400", "500", "600", "700", "800", "900",
    ];

    pub fn from_keyword(keyword: &str) -> FontWeight {
        match keyword.to_ascii_lowercase().as_str() {
            "bold" | "bolder" | "700" | "800" | "900" => FontWeight::Bold,
            _ => FontWeight::Normal,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FontWeight::Normal => "normal",
            FontWeight::Bold => "bold",
        }
    }
}

impl fmt::Display for FontWeight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Font slant. `oblique` is not distinguished from `normal`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FontSlant {
    #[default]
    Normal,
    Italic,
}

impl FontSlant {
    pub const KEYWORDS: [&'static str; 1] = ["italic"];

    pub fn from_keyword(keyword: &str) -> FontSlant {
        if keyword.eq_ignore_ascii_case("italic") {
            FontSlant::Italic
        } else {
            FontSlant::Normal
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FontSlant::Normal => "normal",
            FontSlant::Italic => "italic",
        }
    }
}

impl fmt::Display for FontSlant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/* ============================
 * Style
 * ============================ */

/// Parsed font shorthand.
#[derive(Debug, Clone, PartialEq)]
pub struct Style {
    pub family: String,
    pub size: FontSize,
    pub weight: FontWeight,
    pub slant: FontSlant,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            family: "sans-serif".to_string(),
            size: FontSize::default(),
            weight: FontWeight::Normal,
            slant: FontSlant::Normal,
        }
    }
}

/* ============================
 * Surface text properties
 * ============================ */

/// `textAlign` of the drawing surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlign {
    #[default]
    Start,
    End,
    Left,
    Right,
    Center,
}

impl TextAlign {
    pub fn from_css(value: &str) -> Option<TextAlign> {
        match value.trim().to_ascii_lowercase().as_str() {
            "start" => Some(TextAlign::Start),
            "end" => Some(TextAlign::End),
            "left" => Some(TextAlign::Left),
            "right" => Some(TextAlign::Right),
            "center" => Some(TextAlign::Center),
            _ => None,
        }
    }
}

/// `textBaseline` of the drawing surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextBaseline {
    Top,
    Hanging,
    Middle,
    #[default]
    Alphabetic,
    Ideographic,
    Bottom,
}

impl TextBaseline {
    pub fn from_css(value: &str) -> Option<TextBaseline> {
        match value.trim().to_ascii_lowercase().as_str() {
            "top" => Some(TextBaseline::Top),
            "hanging" => Some(TextBaseline::Hanging),
            "middle" => Some(TextBaseline::Middle),
            "alphabetic" => Some(TextBaseline::Alphabetic),
            "ideographic" => Some(TextBaseline::Ideographic),
            "bottom" => Some(TextBaseline::Bottom),
            _ => None,
        }
    }
}

/// Text direction of the host surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Ltr,
    Rtl,
}

impl Direction {
    pub fn from_css(value: &str) -> Option<Direction> {
        match value.trim().to_ascii_lowercase().as_str() {
            "ltr" => Some(Direction::Ltr),
            "rtl" => Some(Direction::Rtl),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn font_size_units() {
        assert_eq!(FontSize::from_css("12"), FontSize::Px(12.0));
        assert_eq!(FontSize::from_css("12px"), FontSize::Unknown("12px".into()));
        assert_eq!(FontSize::from_css("1.5em"), FontSize::Em(1.5));
        assert_eq!(FontSize::from_css("50%"), FontSize::Percent(50.0));
        assert_eq!(FontSize::from_css("9pt"), FontSize::Pt(9.0));
        assert_eq!(FontSize::from_css("large"), FontSize::Unknown("large".into()));
    }

    #[test]
    fn font_size_to_px() {
        assert_eq!(FontSize::Px(12.0).to_px(16.0), 12.0);
        assert_eq!(FontSize::Em(2.0).to_px(16.0), 32.0);
        assert_eq!(FontSize::Percent(50.0).to_px(16.0), 8.0);
        assert!((FontSize::Pt(3.0).to_px(10.0) - 40.0).abs() < 1e-9);
        assert_eq!(FontSize::Unknown("x".into()).to_px(16.0), 16.0);
        assert_eq!(FontSize::from_css("12px").to_px(16.0), 16.0);
    }

    #[test]
    fn weight_collapses_to_two_values() {
        for kw in ["bold", "bolder", "700", "800", "900"] {
            assert_eq!(FontWeight::from_keyword(kw), FontWeight::Bold, "{kw}");
        }
        for kw in ["lighter", "100", "400", "600", "normal", "whatever"] {
            assert_eq!(FontWeight::from_keyword(kw), FontWeight::Normal, "{kw}");
        }
    }
}
