use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use anyhow::Context;

use super::source::{DirectoryFaceSource, FaceSource, NoFaceSource};
use super::{Face, FaceData, FaceKey};
use crate::engine::error::TextError;
use crate::engine::style::{ComputedStyle, FontSlant, FontWeight};
use crate::platform;

/// In-memory face table keyed by family/weight/slant.
///
/// Faces are immutable once inserted. On a miss the registry asks its
/// [`FaceSource`]; fetches for the same key are serialized so a face is
/// fetched at most once even when several threads miss together.
pub struct FaceRegistry {
    faces: RwLock<HashMap<FaceKey, Arc<Face>>>,
    fetch_locks: Mutex<HashMap<FaceKey, Arc<Mutex<()>>>>,
    source: Box<dyn FaceSource>,
}

impl Default for FaceRegistry {
    fn default() -> Self {
        Self::new(NoFaceSource)
    }
}

impl FaceRegistry {
    pub fn new(source: impl FaceSource + 'static) -> Self {
        Self {
            faces: RwLock::new(HashMap::new()),
            fetch_locks: Mutex::new(HashMap::new()),
            source: Box::new(source),
        }
    }

    /// Registers face data, replacing any face with the same key.
    pub fn load_face(&self, data: FaceData) -> Result<Arc<Face>, TextError> {
        let face = Arc::new(Face::from_data(data)?);
        log::info!(
            target: "FaceRegistry::Load",
            "registered face {} ({} glyphs)",
            face.key,
            face.glyph_count()
        );
        self.faces
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(face.key.clone(), Arc::clone(&face));
        Ok(face)
    }

    /// Looks up a registered face without fetching.
    pub fn get(&self, key: &FaceKey) -> Option<Arc<Face>> {
        self.faces
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    pub fn contains(&self, key: &FaceKey) -> bool {
        self.get(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.faces
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the face, fetching and registering it on a miss.
    pub fn get_face(
        &self,
        family: &str,
        weight: FontWeight,
        slant: FontSlant,
    ) -> Result<Arc<Face>, TextError> {
        let key = FaceKey::new(family, weight, slant);
        if let Some(face) = self.get(&key) {
            return Ok(face);
        }

        let lock = self.fetch_lock(&key);
        let result = {
            let _fetching = lock.lock().unwrap_or_else(PoisonError::into_inner);
            // 待っている間に他のスレッドが登録したかもしれない
            match self.get(&key) {
                Some(face) => Ok(face),
                None => self.fetch(&key),
            }
        };
        self.fetch_locks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&key);
        result
    }

    pub fn face_from_style(&self, style: &ComputedStyle) -> Result<Arc<Face>, TextError> {
        self.get_face(style.family(), style.weight(), style.slant())
    }

    fn fetch_lock(&self, key: &FaceKey) -> Arc<Mutex<()>> {
        let mut locks = self
            .fetch_locks
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        Arc::clone(locks.entry(key.clone()).or_default())
    }

    fn fetch(&self, key: &FaceKey) -> Result<Arc<Face>, TextError> {
        log::debug!(target: "FaceRegistry::Fetch", "fetching face {key}");
        let not_found = || TextError::face_not_found(&key.family, key.weight, key.slant);

        let data = self.source.fetch(key)?.ok_or_else(not_found)?;
        let face = self.load_face(data)?;
        if face.key == *key {
            Ok(face)
        } else {
            log::warn!(
                target: "FaceRegistry::Fetch",
                "fetched data for {key} declares {} instead",
                face.key
            );
            self.get(key).ok_or_else(not_found)
        }
    }

    /// Reads face files for `keys` from `dir` and registers them.
    ///
    /// Each face is fully parsed before it is registered. Keys without a
    /// face file are skipped. Returns the number of faces registered.
    pub async fn preload(&self, dir: &Path, keys: &[FaceKey]) -> anyhow::Result<usize> {
        let files = DirectoryFaceSource::new(dir);
        let mut loaded = 0;
        for key in keys {
            let Some(path) = files.face_path(key) else {
                log::warn!(target: "FaceRegistry::Preload", "no face file for {key} in {}", dir.display());
                continue;
            };
            let src = platform::io::read_text_file(&path).await?;
            let data = FaceData::from_typeface_js(&src)
                .with_context(|| format!("Failed to parse {}", path.display()))?;
            self.load_face(data)?;
            loaded += 1;
        }
        Ok(loaded)
    }
}
