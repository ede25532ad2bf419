//! Engine options.
//!
//! Options use the query-string convention of the script include
//! (`canvas.text.js?reimplement=true&fallbackCharacter=%3F`), so the same
//! string can be passed through the `CANVAS_TEXT_OPTIONS` env var.

use std::env;

/// 環境変数名
pub const OPTIONS_ENV: &str = "CANVAS_TEXT_OPTIONS";

#[derive(Debug, Clone, PartialEq)]
pub struct EngineOptions {
    /// Drawn in place of characters missing from the face
    pub fallback_character: char,
    /// Uniform correction applied on top of the face scale
    pub scaling: f64,
    /// Use the outline engine even when the surface draws text natively
    pub reimplement: bool,
    /// Logs every drawn glyph at `info`
    pub debug: bool,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            fallback_character: ' ',
            scaling: 0.962,
            reimplement: false,
            debug: false,
        }
    }
}

impl EngineOptions {
    /// Parses `key=value&...`. Unknown keys and malformed values are
    /// ignored, keeping the default.
    pub fn from_query(query: &str) -> Self {
        let mut options = Self::default();
        let query = query.trim_start_matches('?');

        for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
            match key.as_ref() {
                "fallbackCharacter" => match value.chars().next() {
                    Some(ch) => options.fallback_character = ch,
                    None => log::warn!(target: "EngineOptions", "empty fallbackCharacter"),
                },
                "scaling" => match value.parse::<f64>() {
                    Ok(s) if s.is_finite() && s > 0.0 => options.scaling = s,
                    _ => log::warn!(target: "EngineOptions", "invalid scaling {value:?}"),
                },
                "reimplement" => options.reimplement = parse_flag(&value),
                "debug" => options.debug = parse_flag(&value),
                other => log::warn!(target: "EngineOptions", "unknown option {other:?}"),
            }
        }
        options
    }

    /// Options from `CANVAS_TEXT_OPTIONS`, or the defaults.
    pub fn from_env() -> Self {
        match env::var(OPTIONS_ENV) {
            Ok(query) => Self::from_query(&query),
            Err(_) => Self::default(),
        }
    }
}

/// 空文字列は false
fn parse_flag(value: &str) -> bool {
    matches!(value.to_ascii_lowercase().as_str(), "true" | "1" | "yes")
}

/// Text drawing strategy, selected once per engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    /// Glyph outlines from faces
    Outline,
    /// The surface's own text primitives
    Native,
}

impl Backend {
    pub fn select(options: &EngineOptions, surface_has_native_text: bool) -> Backend {
        if surface_has_native_text && !options.reimplement {
            Backend::Native
        } else {
            Backend::Outline
        }
    }
}
