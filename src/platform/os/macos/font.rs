//! macOS のシステムフォント取得

use anyhow::Result;
use std::path::PathBuf;

use crate::engine::style::{FontSlant, FontWeight};

/// macOS のシステムフォント候補を返す
pub fn system_font_candidates(weight: FontWeight, slant: FontSlant) -> Result<Vec<PathBuf>> {
    let arial = match (weight, slant) {
        (FontWeight::Normal, FontSlant::Normal) => "Arial",
        (FontWeight::Bold, FontSlant::Normal) => "Arial Bold",
        (FontWeight::Normal, FontSlant::Italic) => "Arial Italic",
        (FontWeight::Bold, FontSlant::Italic) => "Arial Bold Italic",
    };

    Ok(vec![
        PathBuf::from(format!("/System/Library/Fonts/Supplemental/{arial}.ttf")),
        PathBuf::from(format!("/Library/Fonts/{arial}.ttf")),
        // fallback
        PathBuf::from("/System/Library/Fonts/Helvetica.ttc"),
    ])
}
