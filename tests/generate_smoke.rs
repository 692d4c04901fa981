use std::fs;
use std::path::Path;
use std::process::Command;

use placeholder_shot::fallback::FallbackChain;
use placeholder_shot::font::{self, FaceSource, FontTier, ResolvedFont};
use placeholder_shot::{generate_with_fonts, FontLoadError, Rgb8, ShotConfig, ShotError};

fn builtin(_: &ShotConfig) -> Result<ResolvedFont, FontLoadError> { Ok(ResolvedFont::builtin()) }

fn cfg_in(dir: &Path) -> ShotConfig {
    ShotConfig { output_dir: dir.join("public").join("screenshots"), ..Default::default() }
}

#[test]
fn output_is_png_with_configured_size_and_background() {
    let tmp = tempfile::tempdir().unwrap();
    let cfg = cfg_in(tmp.path());
    assert!(!cfg.output_dir.exists());
    let report = generate_with_fonts(&cfg, builtin).expect("generate");
    assert_eq!(report.path, cfg.output_path());
    assert_eq!(report.font_tier, FontTier::Builtin);

    let img = image::open(&report.path).expect("valid png").to_rgb8();
    assert_eq!(img.dimensions(), (720, 1280));
    assert_eq!(*img.get_pixel(0, 0), Rgb8(245, 245, 220).to_pixel());
    assert_eq!(*img.get_pixel(719, 1279), Rgb8(245, 245, 220).to_pixel());
    assert!(img.pixels().any(|p| *p == Rgb8(143, 188, 143).to_pixel()), "text not drawn");
}

#[test]
fn rerun_overwrites_with_identical_bytes() {
    let tmp = tempfile::tempdir().unwrap();
    let cfg = cfg_in(tmp.path());
    fs::create_dir_all(&cfg.output_dir).unwrap();
    fs::write(cfg.output_path(), b"stale contents").unwrap();

    generate_with_fonts(&cfg, builtin).unwrap();
    let first = fs::read(cfg.output_path()).unwrap();
    generate_with_fonts(&cfg, builtin).unwrap();
    let second = fs::read(cfg.output_path()).unwrap();
    assert_eq!(first, second);
    assert!(first.starts_with(b"\x89PNG"));
}

/// Half-open box (min_x, min_y, max_x, max_y) of every pixel that differs from the background.
fn ink_box(path: &Path, bg: Rgb8) -> (u32, u32, u32, u32) {
    let img = image::open(path).unwrap().to_rgb8();
    let bg = bg.to_pixel();
    let ink: Vec<(u32, u32)> = img.enumerate_pixels().filter(|(_, _, p)| **p != bg).map(|(x, y, _)| (x, y)).collect();
    assert!(!ink.is_empty(), "nothing drawn");
    (
        ink.iter().map(|p| p.0).min().unwrap(),
        ink.iter().map(|p| p.1).min().unwrap(),
        ink.iter().map(|p| p.0).max().unwrap() + 1,
        ink.iter().map(|p| p.1).max().unwrap() + 1,
    )
}

#[test]
fn ink_box_is_centered() {
    let tmp = tempfile::tempdir().unwrap();
    let cfg = cfg_in(tmp.path());
    let report = generate_with_fonts(&cfg, builtin).unwrap();
    let (min_x, min_y, max_x, max_y) = ink_box(&report.path, cfg.background);
    let cx = (min_x + max_x) as f32 / 2.0;
    let cy = (min_y + max_y) as f32 / 2.0;
    // Centering ignores the box's offset from the layout origin; expect exactly that offset plus rounding.
    let expect_x = 360.0 + report.bounds.min_x;
    let expect_y = 640.0 + report.bounds.min_y;
    assert!((cx - expect_x).abs() <= 1.0, "cx {cx} vs {expect_x}");
    assert!((cy - expect_y).abs() <= 1.0, "cy {cy} vs {expect_y}");
}

#[test]
fn system_vector_font_ink_matches_measured_box() {
    let Ok(face) = font::load_system_default(font::SYSTEM_DEFAULT_FONTS, 50.0) else {
        eprintln!("no system sans font installed; skipping");
        return;
    };
    let tmp = tempfile::tempdir().unwrap();
    let cfg = cfg_in(tmp.path());
    let report = generate_with_fonts(&cfg, move |_| Ok(ResolvedFont { tier: FontTier::SystemDefault, face: FaceSource::Vector(face) })).unwrap();
    assert_eq!(report.font_tier, FontTier::SystemDefault);
    let b = report.bounds;
    assert!(b.width() > 0.0 && b.height() > 0.0);

    let (min_x, min_y, max_x, max_y) = ink_box(&report.path, cfg.background);
    let (ink_w, ink_h) = ((max_x - min_x) as f32, (max_y - min_y) as f32);
    assert!((ink_w - b.width()).abs() <= 1.0, "ink width {ink_w} vs measured {}", b.width());
    assert!((ink_h - b.height()).abs() <= 1.0, "ink height {ink_h} vs measured {}", b.height());

    let cx = (min_x + max_x) as f32 / 2.0;
    let cy = (min_y + max_y) as f32 / 2.0;
    let (expect_x, expect_y) = (360.0 + b.min_x, 640.0 + b.min_y);
    assert!((cx - expect_x).abs() <= 1.0, "cx {cx} vs {expect_x}");
    assert!((cy - expect_y).abs() <= 1.0, "cy {cy} vs {expect_y}");

    // Stem interiors are fully covered, edges are blended.
    let img = image::open(&report.path).unwrap().to_rgb8();
    let fg = cfg.text_color.to_pixel();
    assert!(img.pixels().any(|p| *p == fg), "no fully covered pixel");
    let bg = cfg.background.to_pixel();
    assert!(img.pixels().any(|p| *p != fg && *p != bg), "no anti-aliased edge pixel");
}

#[test]
fn all_font_tiers_failing_is_fatal_and_writes_nothing() {
    let tmp = tempfile::tempdir().unwrap();
    let cfg = cfg_in(tmp.path());
    let err = generate_with_fonts(&cfg, |c| {
        font::resolve(
            FallbackChain::new()
                .then("named", || font::load_named("missing.ttf", &[], c.font_size).map(|v| ResolvedFont { tier: FontTier::Named, face: FaceSource::Vector(v) }))
                .then("system default", || font::load_system_default(&["/nope/Sans.ttf"], c.fallback_font_size).map(|v| ResolvedFont { tier: FontTier::SystemDefault, face: FaceSource::Vector(v) }))
                .then("builtin bitmap", || Err(FontLoadError::Exhausted(vec!["simulated".into()]))),
        )
    })
    .unwrap_err();
    match err {
        ShotError::Font(FontLoadError::Exhausted(tiers)) => assert_eq!(tiers.len(), 3),
        other => panic!("unexpected error {other}"),
    }
    assert!(!cfg.output_path().exists());
}

#[test]
fn unwritable_destination_is_fatal() {
    let tmp = tempfile::tempdir().unwrap();
    let cfg = cfg_in(tmp.path());
    // A directory squatting on the output file name makes the write fail.
    fs::create_dir_all(cfg.output_path()).unwrap();
    let err = generate_with_fonts(&cfg, builtin).unwrap_err();
    assert!(matches!(err, ShotError::Write { .. }), "got {err}");
}

#[test]
fn binary_writes_reference_screenshot_relative_to_cwd() {
    let tmp = tempfile::tempdir().unwrap();
    let out = Command::new(env!("CARGO_BIN_EXE_screenshot_narrow"))
        .current_dir(tmp.path())
        .output()
        .expect("run binary");
    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
    let stdout = String::from_utf8(out.stdout).unwrap();
    let expected_path = Path::new("public/screenshots").join("screenshot-narrow.png");
    assert_eq!(stdout, format!("Successfully created screenshot at {}\n", expected_path.display()));

    let img = image::open(tmp.path().join(&expected_path)).unwrap().to_rgb8();
    assert_eq!(img.dimensions(), (720, 1280));
    assert_eq!(*img.get_pixel(0, 0), Rgb8::BEIGE.to_pixel());
}
