//! Error types for screenshot generation

use std::path::PathBuf;
use thiserror::Error;

/// Result alias for generator operations
pub type Result<T> = std::result::Result<T, ShotError>;

/// Why a font tier could not produce a usable face.
#[derive(Error, Debug)]
pub enum FontLoadError {
    /// Named font file could not be located
    #[error("font '{name}' not found (searched {} location(s))", .searched.len())]
    NotFound { name: String, searched: Vec<PathBuf> },

    #[error("read font {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File was read but is not a parseable TrueType / OpenType face
    #[error("decode font {path:?}: {reason}")]
    Invalid { path: PathBuf, reason: String },

    #[error("no system default font available (tried {})", .tried.len())]
    NoSystemDefault { tried: Vec<PathBuf> },

    /// Every tier of the fallback chain failed; one entry per tier
    #[error("all font tiers failed: {}", .0.join("; "))]
    Exhausted(Vec<String>),
}

/// Fatal errors of a generation run.
#[derive(Error, Debug)]
pub enum ShotError {
    #[error("create directory {path:?}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Font(#[from] FontLoadError),

    #[error("encode png: {0}")]
    Encode(#[from] image::ImageError),

    #[error("write {path:?}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid canvas size {width}x{height}")]
    InvalidCanvas { width: u32, height: u32 },
}
