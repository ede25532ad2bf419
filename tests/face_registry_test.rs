mod common;

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use canvas_text::engine::face::{
    DirectoryFaceSource, FaceSourceChain, NoFaceSource, SystemFontSource,
};
use canvas_text::engine::style::{FontSlant, FontWeight};
use canvas_text::engine::{FaceData, FaceKey, FaceRegistry, FaceSource, TextError};
use canvas_text::platform;
use common::{TEST_FACE_JSON, temp_dir, test_face};

fn counting_registry() -> (FaceRegistry, Arc<AtomicUsize>) {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let registry = FaceRegistry::new(
        move |key: &FaceKey| -> Result<Option<FaceData>, TextError> {
            counter.fetch_add(1, Ordering::SeqCst);
            if key.family == "test" {
                Ok(Some(test_face()))
            } else {
                Ok(None)
            }
        },
    );
    (registry, calls)
}

#[test]
fn face_is_fetched_once() {
    let (registry, calls) = counting_registry();
    let first = registry
        .get_face("Test", FontWeight::Normal, FontSlant::Normal)
        .unwrap();
    let second = registry
        .get_face("test", FontWeight::Normal, FontSlant::Normal)
        .unwrap();
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn concurrent_misses_fetch_once() {
    let (registry, calls) = counting_registry();
    std::thread::scope(|scope| {
        for _ in 0..8 {
            scope.spawn(|| {
                registry
                    .get_face("test", FontWeight::Normal, FontSlant::Normal)
                    .unwrap();
            });
        }
    });
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(registry.len(), 1);
}

#[test]
fn not_found_leaves_registry_unchanged() {
    let (registry, calls) = counting_registry();
    registry.load_face(test_face()).unwrap();

    let err = registry
        .get_face("other", FontWeight::Bold, FontSlant::Italic)
        .unwrap_err();
    assert!(matches!(
        err,
        TextError::FaceNotFound {
            weight: FontWeight::Bold,
            slant: FontSlant::Italic,
            ..
        }
    ));
    assert_eq!(registry.len(), 1);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn weights_are_separate_faces() {
    let registry = FaceRegistry::new(NoFaceSource);
    registry.load_face(test_face()).unwrap();
    assert!(registry.contains(&FaceKey::new("test", FontWeight::Normal, FontSlant::Normal)));
    assert!(!registry.contains(&FaceKey::new("test", FontWeight::Bold, FontSlant::Normal)));
}

#[test]
fn directory_source_reads_json_and_js() {
    let dir = temp_dir("directory_source");
    std::fs::write(dir.join("test-normal-normal.json"), TEST_FACE_JSON).unwrap();
    let bold = TEST_FACE_JSON.replace(r#""cssFontWeight": "normal""#, r#""cssFontWeight": "bold""#);
    std::fs::write(
        dir.join("test-bold-normal.js"),
        format!("if (_typeface_js && _typeface_js.loadFace) _typeface_js.loadFace({bold});"),
    )
    .unwrap();

    let registry = FaceRegistry::new(DirectoryFaceSource::new(&dir));
    let normal = registry
        .get_face("test", FontWeight::Normal, FontSlant::Normal)
        .unwrap();
    let bold = registry
        .get_face("test", FontWeight::Bold, FontSlant::Normal)
        .unwrap();
    assert_eq!(normal.glyph_count(), 4);
    assert_eq!(bold.key.weight, FontWeight::Bold);
    assert!(
        registry
            .get_face("test", FontWeight::Normal, FontSlant::Italic)
            .is_err()
    );

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn chain_tries_sources_in_order() {
    let dir = temp_dir("chain_source");
    std::fs::write(dir.join("test-normal-normal.json"), TEST_FACE_JSON).unwrap();

    let chain = FaceSourceChain::new()
        .with(NoFaceSource)
        .with(DirectoryFaceSource::new(&dir));
    let key = FaceKey::new("test", FontWeight::Normal, FontSlant::Normal);
    assert!(chain.fetch(&key).unwrap().is_some());
    let missing = FaceKey::new("missing", FontWeight::Normal, FontSlant::Normal);
    assert!(chain.fetch(&missing).unwrap().is_none());

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn corrupt_face_file_is_an_error() {
    let dir = temp_dir("corrupt_face");
    std::fs::write(dir.join("test-normal-normal.json"), "{ not json").unwrap();
    let registry = FaceRegistry::new(DirectoryFaceSource::new(&dir));

    let err = registry
        .get_face("test", FontWeight::Normal, FontSlant::Normal)
        .unwrap_err();
    assert!(matches!(err, TextError::Json(_)));
    assert!(registry.is_empty());

    let _ = std::fs::remove_dir_all(&dir);
}

#[tokio::test]
async fn preload_registers_faces() {
    let dir = temp_dir("preload");
    std::fs::write(dir.join("test-normal-normal.json"), TEST_FACE_JSON).unwrap();

    let registry = FaceRegistry::default();
    let keys = [
        FaceKey::new("test", FontWeight::Normal, FontSlant::Normal),
        FaceKey::new("test", FontWeight::Bold, FontSlant::Normal),
    ];
    let loaded = registry.preload(&dir, &keys).await.unwrap();
    assert_eq!(loaded, 1);
    assert!(registry.contains(&keys[0]));
    assert!(!registry.contains(&keys[1]));

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn system_font_builds_face() {
    let Ok(candidates) = platform::font::system_font_candidates(FontWeight::Normal, FontSlant::Normal)
    else {
        eprintln!("skipping system font test: unsupported platform");
        return;
    };
    let Some(path) = platform::font::first_existing(&candidates) else {
        eprintln!("skipping system font test: no system font found");
        return;
    };

    let source = SystemFontSource::with_candidates(vec![path.clone()], "Ab ");
    let registry = FaceRegistry::new(source);
    let face = registry
        .get_face("sans", FontWeight::Normal, FontSlant::Normal)
        .unwrap();
    assert!(face.resolution > 0.0);
    assert!(face.ascender > 0.0);
    assert!(face.descender <= 0.0);
    assert!(face.glyph('A').is_some_and(|g| !g.outline_ops().is_empty()));
    assert!(face.glyph(' ').is_some_and(|g| g.horizontal_advance > 0.0));
}
