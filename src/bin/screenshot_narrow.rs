//! Placeholder narrow screenshot
//!
//! Writes `public/screenshots/screenshot-narrow.png` (720x1280, beige, "LinguaLecta"
//! centered) relative to the working directory, overwriting any previous file.
//!
//! Usage:
//!   cargo run --bin screenshot_narrow
//!
//! Takes no arguments. Diagnostics go to stderr (`RUST_LOG` to raise verbosity).

use anyhow::{Context, Result};
use clap::Parser;
use placeholder_shot::{generate, logging::init_logging, ShotConfig};

#[derive(Parser, Debug)]
#[command(author, version, about = "Generate the placeholder narrow PWA screenshot", long_about = None)]
struct Cli {}

fn main() -> Result<()> {
    let _cli = Cli::parse();
    init_logging();
    let cfg = ShotConfig::default();
    let report = generate(&cfg).with_context(|| format!("generate {}", cfg.output_path().display()))?;
    tracing::info!("font: {}; origin ({:.1}, {:.1}); {} bytes", report.font, report.origin.0, report.origin.1, report.png_bytes);
    println!("Successfully created screenshot at {}", report.path.display());
    Ok(())
}
