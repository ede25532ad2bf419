//! リソース・face ファイルの読み込み

use std::path::{Path, PathBuf};

use anyhow::Context;

/// `resource/<sub>` の候補ディレクトリを返す。
/// 順序は以下の通り：
/// - ./resource/<sub>
/// - 実行ファイルのあるディレクトリ/resource/<sub>
/// - カレントディレクトリ/resource/<sub>
///
/// 存在しないディレクトリは含めない。
pub fn resource_dirs(sub: &str) -> Vec<PathBuf> {
    let mut candidates: Vec<PathBuf> = vec![PathBuf::from("resource").join(sub)];

    if let Ok(exe) = std::env::current_exe()
        && let Some(dir) = exe.parent()
    {
        candidates.push(dir.join("resource").join(sub));
    }

    if let Ok(cd) = std::env::current_dir() {
        candidates.push(cd.join("resource").join(sub));
    }

    let mut dirs: Vec<PathBuf> = Vec::new();
    for cand in candidates {
        if cand.is_dir() && !dirs.contains(&cand) {
            dirs.push(cand);
        }
    }
    dirs
}

/// テキストファイルを非同期で読み込む
pub async fn read_text_file(path: &Path) -> Result<String, anyhow::Error> {
    tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))
}
