//! Face acquisition capabilities.
//!
//! The registry calls a [`FaceSource`] when a requested face is not yet
//! registered. Sources are synchronous and must return a fully parsed
//! record; the registry registers it before any glyph lookup happens.

use std::path::{Path, PathBuf};

use super::{FaceData, FaceKey};
use crate::engine::error::TextError;
use crate::platform;

pub trait FaceSource: Send + Sync {
    /// Returns `Ok(None)` when this source has no data for `key`.
    fn fetch(&self, key: &FaceKey) -> Result<Option<FaceData>, TextError>;
}

impl<F> FaceSource for F
where
    F: Fn(&FaceKey) -> Result<Option<FaceData>, TextError> + Send + Sync,
{
    fn fetch(&self, key: &FaceKey) -> Result<Option<FaceData>, TextError> {
        self(key)
    }
}

/// Source that never finds anything. Faces must be registered up front.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoFaceSource;

impl FaceSource for NoFaceSource {
    fn fetch(&self, _key: &FaceKey) -> Result<Option<FaceData>, TextError> {
        Ok(None)
    }
}

/* ============================
 * Face files on disk
 * ============================ */

/// Reads `<dir>/<family-weight-slant>.json` or `.js` face files.
#[derive(Debug, Clone)]
pub struct DirectoryFaceSource {
    dir: PathBuf,
}

impl DirectoryFaceSource {
    pub const EXTENSIONS: [&'static str; 2] = ["json", "js"];

    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Existing face file for `key`, if any.
    pub fn face_path(&self, key: &FaceKey) -> Option<PathBuf> {
        let stem = key.file_stem();
        Self::EXTENSIONS
            .iter()
            .map(|ext| self.dir.join(format!("{stem}.{ext}")))
            .find(|p| p.is_file())
    }
}

impl FaceSource for DirectoryFaceSource {
    fn fetch(&self, key: &FaceKey) -> Result<Option<FaceData>, TextError> {
        let Some(path) = self.face_path(key) else {
            return Ok(None);
        };
        log::debug!(target: "FaceSource::Directory", "reading {}", path.display());
        let src = std::fs::read_to_string(&path)?;
        FaceData::from_typeface_js(&src).map(Some)
    }
}

/// Face files bundled under `resource/faces`, searched in the usual
/// resource locations.
#[derive(Debug, Clone)]
pub struct ResourceFaceSource {
    dirs: Vec<DirectoryFaceSource>,
}

impl ResourceFaceSource {
    pub fn new() -> Self {
        Self {
            dirs: platform::io::resource_dirs("faces")
                .into_iter()
                .map(DirectoryFaceSource::new)
                .collect(),
        }
    }
}

impl Default for ResourceFaceSource {
    fn default() -> Self {
        Self::new()
    }
}

impl FaceSource for ResourceFaceSource {
    fn fetch(&self, key: &FaceKey) -> Result<Option<FaceData>, TextError> {
        for dir in &self.dirs {
            if let Some(data) = dir.fetch(key)? {
                return Ok(Some(data));
            }
        }
        Ok(None)
    }
}

/* ============================
 * System fonts
 * ============================ */

/// Builds faces from an installed TrueType/OpenType font.
///
/// The first readable font among the candidates for the requested weight
/// and slant is converted, for the characters of `charset` only.
#[derive(Debug, Clone)]
pub struct SystemFontSource {
    candidates: Option<Vec<PathBuf>>,
    charset: String,
}

impl SystemFontSource {
    /// Uses the platform's font candidates.
    pub fn new(charset: impl Into<String>) -> Self {
        Self {
            candidates: None,
            charset: charset.into(),
        }
    }

    /// Uses `candidates` for every key.
    pub fn with_candidates(candidates: Vec<PathBuf>, charset: impl Into<String>) -> Self {
        Self {
            candidates: Some(candidates),
            charset: charset.into(),
        }
    }

    fn candidates(&self, key: &FaceKey) -> Result<Vec<PathBuf>, TextError> {
        match &self.candidates {
            Some(paths) => Ok(paths.clone()),
            None => platform::font::system_font_candidates(key.weight, key.slant)
                .map_err(|e| TextError::InvalidFont(e.to_string())),
        }
    }
}

impl FaceSource for SystemFontSource {
    fn fetch(&self, key: &FaceKey) -> Result<Option<FaceData>, TextError> {
        for path in self.candidates(key)? {
            let Ok(bytes) = std::fs::read(&path) else {
                continue;
            };
            log::info!(target: "FaceSource::System", "building face {key} from {}", path.display());
            let data = platform::ttf::face_data_from_font(bytes, key, &self.charset)?;
            return Ok(Some(data));
        }
        Ok(None)
    }
}

/* ============================
 * Chain
 * ============================ */

/// Tries each source in order until one has data.
#[derive(Default)]
pub struct FaceSourceChain {
    sources: Vec<Box<dyn FaceSource>>,
}

impl FaceSourceChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, source: impl FaceSource + 'static) -> Self {
        self.sources.push(Box::new(source));
        self
    }
}

impl FaceSource for FaceSourceChain {
    fn fetch(&self, key: &FaceKey) -> Result<Option<FaceData>, TextError> {
        for source in &self.sources {
            if let Some(data) = source.fetch(key)? {
                return Ok(Some(data));
            }
        }
        Ok(None)
    }
}
