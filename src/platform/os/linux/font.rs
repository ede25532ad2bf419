//! Linux のシステムフォント取得
//!
//! ディストリ差が大きいため、
//! ある確率が高そうなものを太さ・スタイル別に列挙する

use anyhow::Result;
use std::path::PathBuf;

use crate::engine::style::{FontSlant, FontWeight};

pub fn system_font_candidates(weight: FontWeight, slant: FontSlant) -> Result<Vec<PathBuf>> {
    let (dejavu, liberation, free) = match (weight, slant) {
        (FontWeight::Normal, FontSlant::Normal) => ("DejaVuSans", "LiberationSans-Regular", "FreeSans"),
        (FontWeight::Bold, FontSlant::Normal) => ("DejaVuSans-Bold", "LiberationSans-Bold", "FreeSansBold"),
        (FontWeight::Normal, FontSlant::Italic) => {
            ("DejaVuSans-Oblique", "LiberationSans-Italic", "FreeSansOblique")
        }
        (FontWeight::Bold, FontSlant::Italic) => (
            "DejaVuSans-BoldOblique",
            "LiberationSans-BoldItalic",
            "FreeSansBoldOblique",
        ),
    };

    Ok(vec![
        // DejaVu
        PathBuf::from(format!("/usr/share/fonts/truetype/dejavu/{dejavu}.ttf")),
        // Liberation
        PathBuf::from(format!("/usr/share/fonts/truetype/liberation/{liberation}.ttf")),
        // FreeFont
        PathBuf::from(format!("/usr/share/fonts/truetype/freefont/{free}.ttf")),
        // 太さが無ければ標準の DejaVu
        PathBuf::from("/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf"),
    ])
}
