//! Faces: vector glyph tables with global metrics.
//!
//! # Overview
//!
//! A face is published as a record (`FaceData`) per family/weight/slant,
//! holding an outline program and an advance for each character. Once
//! registered it becomes an immutable [`Face`] shared through `Arc`.
//!
//! Face files come either as plain JSON or wrapped in a
//! `_typeface_js.loadFace({...})` call; both are accepted.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};

use crate::engine::error::TextError;
use crate::engine::glyph::{GlyphOutlineOp, parse_outline};
use crate::engine::style::{FontSlant, FontWeight};

pub mod registry;
pub mod source;

pub use registry::FaceRegistry;
pub use source::{
    DirectoryFaceSource, FaceSource, FaceSourceChain, NoFaceSource, ResourceFaceSource,
    SystemFontSource,
};

/* ============================
 * Face data record
 * ============================ */

/// Face record as stored in face files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FaceData {
    pub family_name: String,
    #[serde(default = "default_css_keyword")]
    pub css_font_weight: String,
    #[serde(default = "default_css_keyword")]
    pub css_font_style: String,
    /// Units per em of the outline coordinate space
    pub resolution: f64,
    pub ascender: f64,
    pub descender: f64,
    #[serde(default)]
    pub glyphs: BTreeMap<String, GlyphData>,
}

fn default_css_keyword() -> String {
    "normal".to_string()
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GlyphData {
    /// Outline program
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub o: Option<String>,
    /// Horizontal advance
    #[serde(default)]
    pub ha: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x_max: Option<f64>,
}

impl FaceData {
    pub fn from_json(src: &str) -> Result<Self, TextError> {
        Ok(serde_json::from_str(src)?)
    }

    /// Parses a face file, with or without the `loadFace(...)` wrapper.
    pub fn from_typeface_js(src: &str) -> Result<Self, TextError> {
        let Some(call) = src.find("loadFace(") else {
            return Self::from_json(src);
        };
        let body = &src[call..];
        let (Some(start), Some(end)) = (body.find('{'), body.rfind('}')) else {
            return Err(TextError::InvalidFaceData(
                "loadFace call without an object literal".to_string(),
            ));
        };
        if end < start {
            return Err(TextError::InvalidFaceData(
                "unbalanced loadFace object literal".to_string(),
            ));
        }
        Self::from_json(&body[start..=end])
    }

    pub fn key(&self) -> FaceKey {
        FaceKey::new(
            &self.family_name,
            FontWeight::from_keyword(&self.css_font_weight),
            FontSlant::from_keyword(&self.css_font_style),
        )
    }
}

/* ============================
 * Face key
 * ============================ */

/// Registry key: lower-cased family plus collapsed weight and slant.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FaceKey {
    pub family: String,
    pub weight: FontWeight,
    pub slant: FontSlant,
}

impl FaceKey {
    pub fn new(family: &str, weight: FontWeight, slant: FontSlant) -> Self {
        Self {
            family: family.to_lowercase(),
            weight,
            slant,
        }
    }

    /// Face file name without extension, e.g. `times_new_roman-bold-italic`.
    pub fn file_stem(&self) -> String {
        format!("{}-{}-{}", self.family, self.weight, self.slant).replace(' ', "_")
    }
}

impl fmt::Display for FaceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.family, self.weight, self.slant)
    }
}

/* ============================
 * Face / Glyph
 * ============================ */

/// One character's outline and advance.
#[derive(Debug, Clone)]
pub struct Glyph {
    outline: Option<String>,
    pub horizontal_advance: f64,
    /// Rightmost extent of the outline
    pub x_max: Option<f64>,
    ops: OnceCell<Vec<GlyphOutlineOp>>,
}

impl Glyph {
    pub fn new(outline: Option<String>, horizontal_advance: f64, x_max: Option<f64>) -> Self {
        Self {
            outline,
            horizontal_advance,
            x_max,
            ops: OnceCell::new(),
        }
    }

    pub fn outline(&self) -> Option<&str> {
        self.outline.as_deref()
    }

    /// Parsed outline, computed once on first use.
    pub fn outline_ops(&self) -> &[GlyphOutlineOp] {
        self.ops
            .get_or_init(|| self.outline.as_deref().map(parse_outline).unwrap_or_default())
    }

    pub fn is_parsed(&self) -> bool {
        self.ops.get().is_some()
    }

    /// Visual width: the advance, or the outline extent when it overhangs.
    pub fn width(&self) -> f64 {
        match self.x_max {
            Some(x_max) if x_max > self.horizontal_advance => x_max,
            _ => self.horizontal_advance,
        }
    }
}

impl From<GlyphData> for Glyph {
    fn from(data: GlyphData) -> Self {
        Glyph::new(data.o, data.ha, data.x_max)
    }
}

/// A loaded face. Immutable once built.
#[derive(Debug)]
pub struct Face {
    pub key: FaceKey,
    pub family_name: String,
    pub resolution: f64,
    pub ascender: f64,
    pub descender: f64,
    glyphs: HashMap<char, Glyph>,
}

impl Face {
    pub fn from_data(data: FaceData) -> Result<Self, TextError> {
        if !(data.resolution.is_finite() && data.resolution > 0.0) {
            return Err(TextError::InvalidFaceData(format!(
                "resolution must be positive, got {}",
                data.resolution
            )));
        }

        let key = data.key();
        let mut glyphs = HashMap::with_capacity(data.glyphs.len());
        for (name, glyph) in data.glyphs {
            let mut chars = name.chars();
            match (chars.next(), chars.next()) {
                (Some(ch), None) => {
                    glyphs.insert(ch, Glyph::from(glyph));
                }
                _ => {
                    log::warn!(target: "Face::Glyphs", "ignoring glyph key {name:?} in face {key}")
                }
            }
        }

        Ok(Self {
            key,
            family_name: data.family_name,
            resolution: data.resolution,
            ascender: data.ascender,
            descender: data.descender,
            glyphs,
        })
    }

    pub fn glyph(&self, ch: char) -> Option<&Glyph> {
        self.glyphs.get(&ch)
    }

    /// Glyph for `ch`, or for `fallback` when the face lacks `ch`.
    pub fn glyph_or_fallback(&self, ch: char, fallback: char) -> Result<&Glyph, TextError> {
        self.glyph(ch)
            .or_else(|| self.glyph(fallback))
            .ok_or(TextError::GlyphDataCorrupt { fallback })
    }

    pub fn glyph_count(&self) -> usize {
        self.glyphs.len()
    }
}
