//! Screenshot generation pipeline.
//!
//! prepare dir -> allocate canvas -> resolve font -> measure -> center -> draw -> encode -> write.
//! Only font resolution recovers locally; every other failure ends the run.

use image::{ImageFormat, RgbImage};
use std::{fs, io::Cursor, path::{Path, PathBuf}};
use tracing::{debug, warn};

use crate::canvas::{centered_origin, new_canvas};
use crate::config::ShotConfig;
use crate::error::{FontLoadError, Result, ShotError};
use crate::font::{self, FontTier, ResolvedFont};
use crate::text::{draw_text, measure, TextBounds};

/// What a successful run produced.
#[derive(Debug, Clone)]
pub struct GenerateReport {
    pub path: PathBuf,
    pub font_tier: FontTier,
    pub font: String,
    pub bounds: TextBounds,
    pub origin: (f32, f32),
    pub png_bytes: usize,
}

/// Idempotent: succeeds whether or not `dir` already exists.
pub fn prepare_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).map_err(|source| ShotError::CreateDir { path: dir.to_path_buf(), source })
}

/// Canvas with the configured text centered on it, plus the measured box and origin used.
pub fn render(cfg: &ShotConfig, font: &ResolvedFont) -> Result<(RgbImage, TextBounds, (f32, f32))> {
    let mut canvas = new_canvas(cfg.width, cfg.height, cfg.background)?;
    let bounds = measure(&font.face, &cfg.text);
    let origin = centered_origin(cfg.width, cfg.height, &bounds);
    debug!(?bounds, ?origin, "placing text");
    draw_text(&mut canvas, &font.face, origin, &cfg.text, cfg.text_color);
    Ok((canvas, bounds, origin))
}

pub fn encode_png(canvas: &RgbImage) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    canvas.write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)?;
    Ok(buf)
}

/// Overwrites `path` without backup.
pub fn write_png(path: &Path, bytes: &[u8]) -> Result<()> {
    fs::write(path, bytes).map_err(|source| ShotError::Write { path: path.to_path_buf(), source })
}

pub fn generate(cfg: &ShotConfig) -> Result<GenerateReport> { generate_with_fonts(cfg, font::resolve_font) }

/// Same as [`generate`] with a caller-supplied font resolver.
pub fn generate_with_fonts<F>(cfg: &ShotConfig, resolve: F) -> Result<GenerateReport>
where
    F: FnOnce(&ShotConfig) -> std::result::Result<ResolvedFont, FontLoadError>,
{
    for w in cfg.validate() { warn!("config: {w}"); }
    let path = cfg.output_path();
    prepare_dir(&cfg.output_dir)?;
    let font = resolve(cfg)?;
    let (canvas, bounds, origin) = render(cfg, &font)?;
    // Encode fully before touching the destination so a failed encode leaves no file.
    let bytes = encode_png(&canvas)?;
    write_png(&path, &bytes)?;
    Ok(GenerateReport { path, font_tier: font.tier, font: font.describe(), bounds, origin, png_bytes: bytes.len() })
}
