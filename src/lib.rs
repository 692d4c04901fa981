pub mod canvas;
pub mod color;
pub mod config;
pub mod error;
pub mod fallback;
pub mod font;
pub mod generator;
pub mod logging;
pub mod text;

// Curated re-exports
pub use color::Rgb8;
pub use config::ShotConfig;
pub use error::{FontLoadError, ShotError};
pub use generator::{generate, generate_with_fonts, GenerateReport};
