//! Windows のシステムフォント取得

use anyhow::Result;
use std::path::PathBuf;

use crate::engine::style::{FontSlant, FontWeight};

/// システムフォント候補を返す
pub fn system_font_candidates(weight: FontWeight, slant: FontSlant) -> Result<Vec<PathBuf>> {
    let (arial, segoe) = match (weight, slant) {
        (FontWeight::Normal, FontSlant::Normal) => ("arial", "segoeui"),
        (FontWeight::Bold, FontSlant::Normal) => ("arialbd", "segoeuib"),
        (FontWeight::Normal, FontSlant::Italic) => ("ariali", "segoeuii"),
        (FontWeight::Bold, FontSlant::Italic) => ("arialbi", "segoeuiz"),
    };

    Ok(vec![
        PathBuf::from(format!(r"C:\Windows\Fonts\{arial}.ttf")),
        PathBuf::from(format!(r"C:\Windows\Fonts\{segoe}.ttf")),
        // fallback
        PathBuf::from(r"C:\Windows\Fonts\arial.ttf"),
    ])
}
