//! Font resolution with ordered fallback.
//!
//! Tiers, tried in order:
//!   1. named   - the configured font file at `font_size`
//!   2. system  - the first parseable well-known system sans font at `fallback_font_size`
//!   3. builtin - the embedded 5x7 bitmap font at its fixed scale (never touches disk)

pub mod bitmap;

use ab_glyph::{FontVec, PxScale};
use std::{fs, path::{Path, PathBuf}};
use tracing::{debug, info, warn};

use crate::config::ShotConfig;
use crate::error::FontLoadError;
use crate::fallback::FallbackChain;
pub use bitmap::BitmapFont;

/// Well-known default sans fonts, in preference order.
pub const SYSTEM_DEFAULT_FONTS: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu-sans-fonts/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/truetype/freefont/FreeSans.ttf",
    "/usr/share/fonts/gnu-free/FreeSans.otf",
    "/usr/share/fonts/truetype/noto/NotoSans-Regular.ttf",
    "/usr/share/fonts/noto/NotoSans-Regular.ttf",
    "/System/Library/Fonts/Helvetica.ttc",
    "C:\\Windows\\Fonts\\segoeui.ttf",
];

/// How deep below each font directory a named font is looked for.
const SEARCH_DEPTH: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontTier {
    Named,
    SystemDefault,
    Builtin,
}

impl FontTier {
    pub fn label(self) -> &'static str {
        match self {
            FontTier::Named => "named",
            FontTier::SystemDefault => "system default",
            FontTier::Builtin => "builtin bitmap",
        }
    }
}

/// A parsed outline font bound to a pixel size.
pub struct VectorFace {
    pub font: FontVec,
    pub px: f32,
    pub path: PathBuf,
}

impl VectorFace {
    pub fn scale(&self) -> PxScale { PxScale::from(self.px) }
}

impl std::fmt::Debug for VectorFace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VectorFace").field("path", &self.path).field("px", &self.px).finish()
    }
}

/// The single font handle active at draw time.
#[derive(Debug)]
pub enum FaceSource {
    Vector(VectorFace),
    Bitmap(BitmapFont),
}

#[derive(Debug)]
pub struct ResolvedFont {
    pub tier: FontTier,
    pub face: FaceSource,
}

impl ResolvedFont {
    pub fn builtin() -> Self { Self { tier: FontTier::Builtin, face: FaceSource::Bitmap(BitmapFont::builtin()) } }

    pub fn describe(&self) -> String {
        match &self.face {
            FaceSource::Vector(v) => format!("{} ({} @ {}px)", self.tier.label(), v.path.display(), v.px),
            FaceSource::Bitmap(b) => format!("{} (5x7 x{})", self.tier.label(), b.scale),
        }
    }
}

pub fn load_vector(path: &Path, px: f32) -> Result<VectorFace, FontLoadError> {
    if !(px > 0.0) {
        return Err(FontLoadError::Invalid { path: path.to_path_buf(), reason: format!("size {px} must be > 0") });
    }
    let data = fs::read(path).map_err(|source| FontLoadError::Io { path: path.to_path_buf(), source })?;
    let font = FontVec::try_from_vec(data)
        .map_err(|e| FontLoadError::Invalid { path: path.to_path_buf(), reason: e.to_string() })?;
    Ok(VectorFace { font, px, path: path.to_path_buf() })
}

/// Locate `name`: as given first, then (for bare relative names) below each of `dirs`.
/// File name comparison ignores ASCII case so `arial.ttf` finds `Arial.ttf`.
pub fn find_font(name: &str, dirs: &[PathBuf]) -> Result<PathBuf, FontLoadError> {
    let direct = PathBuf::from(name);
    let mut searched = vec![direct.clone()];
    if direct.is_file() { return Ok(direct); }
    if direct.is_relative() {
        if let Some(file) = direct.file_name().and_then(|f| f.to_str()) {
            for dir in dirs {
                searched.push(dir.clone());
                if let Some(found) = search_dir(dir, file, SEARCH_DEPTH) { return Ok(found); }
            }
        }
    }
    Err(FontLoadError::NotFound { name: name.to_string(), searched })
}

fn search_dir(dir: &Path, file: &str, depth: usize) -> Option<PathBuf> {
    let entries = fs::read_dir(dir).ok()?;
    let mut subdirs = Vec::new();
    let mut matches = Vec::new();
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() { subdirs.push(path); continue; }
        if entry.file_name().to_str().is_some_and(|n| n.eq_ignore_ascii_case(file)) { matches.push(path); }
    }
    // read_dir order is unspecified
    matches.sort();
    if let Some(found) = matches.into_iter().next() { return Some(found); }
    if depth == 0 { return None; }
    subdirs.sort();
    subdirs.iter().find_map(|d| search_dir(d, file, depth - 1))
}

pub fn load_named(name: &str, dirs: &[PathBuf], px: f32) -> Result<VectorFace, FontLoadError> {
    let path = find_font(name, dirs)?;
    load_vector(&path, px)
}

pub fn load_system_default<P: AsRef<Path>>(candidates: &[P], px: f32) -> Result<VectorFace, FontLoadError> {
    let mut tried = Vec::with_capacity(candidates.len());
    for c in candidates {
        let path = c.as_ref();
        match load_vector(path, px) {
            Ok(face) => return Ok(face),
            Err(e) => { debug!("system font candidate skipped: {e}"); tried.push(path.to_path_buf()); }
        }
    }
    Err(FontLoadError::NoSystemDefault { tried })
}

/// The three-tier chain for `cfg`.
pub fn font_chain(cfg: &ShotConfig) -> FallbackChain<'_, ResolvedFont, FontLoadError> {
    FallbackChain::new()
        .then(FontTier::Named.label(), move || {
            load_named(&cfg.font_name, &cfg.font_dirs, cfg.font_size)
                .map(|v| ResolvedFont { tier: FontTier::Named, face: FaceSource::Vector(v) })
        })
        .then(FontTier::SystemDefault.label(), move || {
            load_system_default(SYSTEM_DEFAULT_FONTS, cfg.fallback_font_size)
                .map(|v| ResolvedFont { tier: FontTier::SystemDefault, face: FaceSource::Vector(v) })
        })
        .then(FontTier::Builtin.label(), || Ok(ResolvedFont::builtin()))
}

/// Run a font chain; every failed tier is logged, exhaustion is fatal.
pub fn resolve(chain: FallbackChain<'_, ResolvedFont, FontLoadError>) -> Result<ResolvedFont, FontLoadError> {
    match chain.run_with(|a| warn!("font tier '{}' unavailable: {}", a.label, a.error)) {
        Ok(chosen) => {
            info!("using font tier {}: {}", chosen.index + 1, chosen.value.describe());
            Ok(chosen.value)
        }
        Err(failures) => Err(FontLoadError::Exhausted(
            failures.iter().map(|a| format!("{}: {}", a.label, a.error)).collect(),
        )),
    }
}

pub fn resolve_font(cfg: &ShotConfig) -> Result<ResolvedFont, FontLoadError> { resolve(font_chain(cfg)) }

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_named_font_reports_search_locations() {
        let tmp = tempfile::tempdir().unwrap();
        let err = load_named("definitely-not-a-font.ttf", &[tmp.path().to_path_buf()], 60.0).unwrap_err();
        match err {
            FontLoadError::NotFound { name, searched } => {
                assert_eq!(name, "definitely-not-a-font.ttf");
                assert_eq!(searched.len(), 2);
            }
            other => panic!("unexpected error {other}"),
        }
    }

    #[test]
    fn garbage_font_file_is_invalid() {
        let tmp = tempfile::tempdir().unwrap();
        let nested = tmp.path().join("truetype").join("corefonts");
        fs::create_dir_all(&nested).unwrap();
        fs::write(nested.join("Arial.TTF"), b"not a font at all").unwrap();
        let err = load_named("arial.ttf", &[tmp.path().to_path_buf()], 60.0).unwrap_err();
        assert!(matches!(err, FontLoadError::Invalid { .. }), "got {err}");
    }

    #[test]
    fn case_variants_in_one_dir_pick_sorted_first() {
        let tmp = tempfile::tempdir().unwrap();
        for name in ["arial.ttf", "ARIAL.ttf", "Arial.TTF"] { fs::write(tmp.path().join(name), name.as_bytes()).unwrap(); }
        if fs::read_dir(tmp.path()).unwrap().count() < 3 { return; } // case-insensitive filesystem
        let dirs = [tmp.path().to_path_buf()];
        let first = find_font("arial.ttf", &dirs).unwrap();
        assert_eq!(first.file_name().unwrap(), "ARIAL.ttf");
        for _ in 0..5 { assert_eq!(find_font("arial.ttf", &dirs).unwrap(), first); }
    }

    #[test]
    fn non_positive_size_rejected_before_reading() {
        let err = load_vector(Path::new("does/not/matter.ttf"), 0.0).unwrap_err();
        assert!(matches!(err, FontLoadError::Invalid { .. }));
    }

    #[test]
    fn system_default_with_no_candidates_fails() {
        let none: [&str; 2] = ["/nope/a.ttf", "/nope/b.otf"];
        match load_system_default(&none, 50.0).unwrap_err() {
            FontLoadError::NoSystemDefault { tried } => assert_eq!(tried.len(), 2),
            other => panic!("unexpected error {other}"),
        }
    }

    #[test]
    fn default_chain_always_resolves_some_tier() {
        let cfg = ShotConfig { font_name: "no-such-font-anywhere.ttf".into(), font_dirs: vec![], ..Default::default() };
        let font = resolve_font(&cfg).expect("builtin tier cannot fail");
        assert_ne!(font.tier, FontTier::Named);
    }

    #[test]
    fn exhausted_chain_lists_every_tier() {
        let chain = FallbackChain::new()
            .then("named", || load_named("missing.ttf", &[], 60.0).map(|v| ResolvedFont { tier: FontTier::Named, face: FaceSource::Vector(v) }))
            .then("system default", || load_system_default(&["/nope.ttf"], 50.0).map(|v| ResolvedFont { tier: FontTier::SystemDefault, face: FaceSource::Vector(v) }));
        match resolve(chain).unwrap_err() {
            FontLoadError::Exhausted(tiers) => {
                assert_eq!(tiers.len(), 2);
                assert!(tiers[0].starts_with("named: font 'missing.ttf' not found"));
                assert!(tiers[1].starts_with("system default:"));
            }
            other => panic!("unexpected error {other}"),
        }
    }
}
