//! システムフォント取得の Facade

use anyhow::Result;
use std::path::PathBuf;

use crate::engine::style::{FontSlant, FontWeight};

#[cfg(target_os = "linux")]
use crate::platform::os::linux;
#[cfg(target_os = "macos")]
use crate::platform::os::macos;
#[cfg(target_os = "windows")]
use crate::platform::os::windows;

/// 太さ・スタイルに合うシステムフォントの候補（優先順）
#[allow(unreachable_code, unused_variables)]
pub fn system_font_candidates(weight: FontWeight, slant: FontSlant) -> Result<Vec<PathBuf>> {
    #[cfg(target_os = "linux")]
    {
        return linux::font::system_font_candidates(weight, slant);
    }
    #[cfg(target_os = "macos")]
    {
        return macos::font::system_font_candidates(weight, slant);
    }
    #[cfg(target_os = "windows")]
    {
        return windows::font::system_font_candidates(weight, slant);
    }

    anyhow::bail!("system font is not supported on this OS yet");
}

/// 存在する最初の候補
pub fn first_existing(candidates: &[PathBuf]) -> Option<&PathBuf> {
    candidates.iter().find(|p| p.is_file())
}
