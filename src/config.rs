use serde::{Deserialize, Serialize};
use std::{fs, path::{Path, PathBuf}};

use crate::color::Rgb8;

/// Directories searched (recursively, a few levels deep) for a named font file
/// that is not found relative to the working directory.
pub const DEFAULT_FONT_DIRS: &[&str] = &[
    "/usr/share/fonts",
    "/usr/local/share/fonts",
    "/Library/Fonts",
    "/System/Library/Fonts",
    "C:\\Windows\\Fonts",
];

/// All tunables of a generation run. Defaults are the reference screenshot.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct ShotConfig {
    pub output_dir: PathBuf,
    pub file_name: String,
    pub width: u32,
    pub height: u32,
    pub background: Rgb8,
    pub text_color: Rgb8,
    pub text: String,
    /// Preferred font; a path, or a bare file name looked up in `font_dirs`.
    pub font_name: String,
    /// Pixel size for the preferred font.
    pub font_size: f32,
    /// Pixel size for the system default vector font (second tier).
    pub fallback_font_size: f32,
    pub font_dirs: Vec<PathBuf>,
}
impl Default for ShotConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("public/screenshots"),
            file_name: "screenshot-narrow.png".into(),
            width: 720,
            height: 1280,
            background: Rgb8::BEIGE,
            text_color: Rgb8::DARK_SEA_GREEN,
            text: "LinguaLecta".into(),
            font_name: "arial.ttf".into(),
            font_size: 60.0,
            fallback_font_size: 50.0,
            font_dirs: DEFAULT_FONT_DIRS.iter().map(PathBuf::from).collect(),
        }
    }
}

impl ShotConfig {
    pub fn output_path(&self) -> PathBuf { self.output_dir.join(&self.file_name) }

    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, String> {
        let data = fs::read_to_string(&path).map_err(|e| format!("read config: {e}"))?;
        ron::from_str(&data).map_err(|e| format!("parse RON: {e}"))
    }

    pub fn load_or_default(path: impl AsRef<Path>) -> (Self, Option<String>) {
        match Self::load_from_file(&path) {
            Ok(cfg) => (cfg, None),
            Err(e) => (Self::default(), Some(e)),
        }
    }

    /// Non-fatal sanity checks. Call before generating and log each warning with `warn!`.
    pub fn validate(&self) -> Vec<String> {
        let mut w = Vec::new();
        if self.width == 0 || self.height == 0 {
            w.push(format!("canvas dimensions must be > 0 (got {}x{})", self.width, self.height));
        }
        if (self.width as u64) * (self.height as u64) > 100_000_000 {
            w.push(format!("very large canvas: {}x{}", self.width, self.height));
        }
        if self.text.trim().is_empty() {
            w.push("text is empty; image will only contain the background".into());
        }
        if !(self.font_size > 0.0) {
            w.push(format!("font_size {} must be > 0", self.font_size));
        }
        if !(self.fallback_font_size > 0.0) {
            w.push(format!("fallback_font_size {} must be > 0", self.fallback_font_size));
        }
        if self.text_color == self.background {
            w.push("text_color equals background; text will be invisible".into());
        }
        if self.file_name.is_empty() {
            w.push("file_name is empty".into());
        } else if !self.file_name.to_ascii_lowercase().ends_with(".png") {
            w.push(format!("file_name '{}' lacks a .png extension (contents are PNG regardless)", self.file_name));
        }
        w
    }
}
