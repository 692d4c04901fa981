use image::Rgb;
use serde::{Deserialize, Serialize};

/// 8-bit RGB triple as written in config files: `(245, 245, 220)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb8(pub u8, pub u8, pub u8);

impl Rgb8 {
    pub const BEIGE: Rgb8 = Rgb8(245, 245, 220);
    pub const DARK_SEA_GREEN: Rgb8 = Rgb8(143, 188, 143);

    pub fn to_pixel(self) -> Rgb<u8> { Rgb([self.0, self.1, self.2]) }
}

impl From<Rgb8> for Rgb<u8> {
    fn from(c: Rgb8) -> Self { c.to_pixel() }
}

/// Blend `fg` over `bg` with coverage `a` in 0..=1 (values outside are clamped).
pub fn blend(bg: Rgb<u8>, fg: Rgb<u8>, a: f32) -> Rgb<u8> {
    let a = a.clamp(0.0, 1.0);
    let mix = |b: u8, f: u8| -> u8 { (b as f32 + (f as f32 - b as f32) * a).round().clamp(0.0, 255.0) as u8 };
    Rgb([mix(bg[0], fg[0]), mix(bg[1], fg[1]), mix(bg[2], fg[2])])
}
