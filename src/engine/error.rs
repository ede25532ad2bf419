use thiserror::Error;

use crate::engine::style::{FontSlant, FontWeight};

/// テキスト描画エンジンのエラー
#[derive(Debug, Error)]
pub enum TextError {
    /// 取得を試みても face が見つからない
    #[error("Unable to load the font [{family} {weight} {slant}]")]
    FaceNotFound {
        family: String,
        weight: FontWeight,
        slant: FontSlant,
    },

    /// フォールバック文字のグリフすら face に無い
    #[error("Glyph data corrupt: fallback character {fallback:?} has no glyph")]
    GlyphDataCorrupt { fallback: char },

    #[error("Invalid face data: {0}")]
    InvalidFaceData(String),

    #[error("Face data JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid font file: {0}")]
    InvalidFont(String),
}

impl TextError {
    pub fn face_not_found(family: &str, weight: FontWeight, slant: FontSlant) -> Self {
        Self::FaceNotFound {
            family: family.to_string(),
            weight,
            slant,
        }
    }
}
