#[cfg(target_os = "linux")]
pub mod linux {
    pub mod font;
}

#[cfg(target_os = "macos")]
pub mod macos {
    pub mod font;
}

#[cfg(target_os = "windows")]
pub mod windows {
    pub mod font;
}
