#![allow(dead_code)]

use std::path::PathBuf;

use canvas_text::engine::FaceData;

/// resolution 1000, ascender 800, descender -200
pub const TEST_FACE_JSON: &str = r#"{
    "familyName": "Test",
    "cssFontWeight": "normal",
    "cssFontStyle": "normal",
    "resolution": 1000,
    "ascender": 800,
    "descender": -200,
    "glyphs": {
        " ": { "ha": 250 },
        "a": { "o": "m 0 0 l 100 0 l 100 100", "ha": 500, "x_max": 520 },
        "b": { "o": "m 0 0 z q 10 10 5 5 l 1 1", "ha": 600, "x_max": 400 },
        "e": { "o": "", "ha": 400 }
    }
}"#;

pub fn test_face() -> FaceData {
    FaceData::from_json(TEST_FACE_JSON).expect("fixture face")
}

pub fn test_face_without_space() -> FaceData {
    let mut data = test_face();
    data.glyphs.remove(" ");
    data
}

/// テストごとに別の一時ディレクトリ
pub fn temp_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("canvas_text_{name}_{}", std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).expect("create temp dir");
    dir
}

pub fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}
