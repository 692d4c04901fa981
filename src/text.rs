//! Single-line text layout, tight bounds measurement and rasterization.
//!
//! Layout origin is the top-left anchor: x = left edge of the pen, y = the font's
//! ascent line. Bounds are the inked box relative to that origin, so they can start
//! right of / below (0,0) depending on glyph shapes.

use ab_glyph::{point, Font, Glyph, GlyphId, ScaleFont};
use image::{Rgb, RgbImage};

use crate::color::{blend, Rgb8};
use crate::font::{BitmapFont, FaceSource, VectorFace};

/// Tight inked box. Empty text (or text with no ink) yields an all-zero box.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TextBounds {
    pub min_x: f32,
    pub min_y: f32,
    pub max_x: f32,
    pub max_y: f32,
}

impl TextBounds {
    pub fn width(&self) -> f32 { self.max_x - self.min_x }
    pub fn height(&self) -> f32 { self.max_y - self.min_y }

    fn include(acc: Option<TextBounds>, b: TextBounds) -> Option<TextBounds> {
        Some(match acc {
            None => b,
            Some(a) => TextBounds { min_x: a.min_x.min(b.min_x), min_y: a.min_y.min(b.min_y), max_x: a.max_x.max(b.max_x), max_y: a.max_y.max(b.max_y) },
        })
    }
}

fn layout(face: &VectorFace, text: &str, origin: (f32, f32)) -> Vec<Glyph> {
    let scaled = face.font.as_scaled(face.scale());
    let baseline = origin.1 + scaled.ascent();
    let mut caret = origin.0;
    let mut prev: Option<GlyphId> = None;
    let mut glyphs = Vec::with_capacity(text.len());
    for c in text.chars().filter(|c| !c.is_control()) {
        let mut g = scaled.scaled_glyph(c);
        if let Some(p) = prev { caret += scaled.kern(p, g.id); }
        g.position = point(caret, baseline);
        caret += scaled.h_advance(g.id);
        prev = Some(g.id);
        glyphs.push(g);
    }
    glyphs
}

fn bitmap_dots<'a>(font: &'a BitmapFont, text: &'a str) -> impl Iterator<Item = (u32, u32)> + 'a {
    let adv = font.advance();
    text.chars()
        .filter(|c| !c.is_control())
        .enumerate()
        .flat_map(move |(i, c)| BitmapFont::dots(c).map(move |(col, row)| (i as u32 * adv + col * font.scale, row * font.scale)))
}

pub fn measure(face: &FaceSource, text: &str) -> TextBounds {
    let mut acc = None;
    match face {
        FaceSource::Vector(v) => {
            for g in layout(v, text, (0.0, 0.0)) {
                if let Some(og) = v.font.outline_glyph(g) {
                    let r = og.px_bounds();
                    acc = TextBounds::include(acc, TextBounds { min_x: r.min.x, min_y: r.min.y, max_x: r.max.x, max_y: r.max.y });
                }
            }
        }
        FaceSource::Bitmap(b) => {
            let s = b.scale as f32;
            for (x, y) in bitmap_dots(b, text) {
                let (x, y) = (x as f32, y as f32);
                acc = TextBounds::include(acc, TextBounds { min_x: x, min_y: y, max_x: x + s, max_y: y + s });
            }
        }
    }
    acc.unwrap_or_default()
}

fn put(canvas: &mut RgbImage, x: i64, y: i64, fg: Rgb<u8>, coverage: f32) {
    if x < 0 || y < 0 || x >= canvas.width() as i64 || y >= canvas.height() as i64 { return; }
    let p = canvas.get_pixel_mut(x as u32, y as u32);
    *p = blend(*p, fg, coverage);
}

/// Draw `text` with its layout origin at `origin`. Glyphs falling off the canvas are clipped.
/// Fractional origins: vector glyphs keep sub-pixel placement, bitmap glyphs snap down to whole pixels.
pub fn draw_text(canvas: &mut RgbImage, face: &FaceSource, origin: (f32, f32), text: &str, color: Rgb8) {
    let fg = color.to_pixel();
    match face {
        FaceSource::Vector(v) => {
            for g in layout(v, text, origin) {
                let Some(og) = v.font.outline_glyph(g) else { continue };
                let r = og.px_bounds();
                let (bx, by) = (r.min.x as i64, r.min.y as i64);
                og.draw(|x, y, c| put(canvas, bx + x as i64, by + y as i64, fg, c));
            }
        }
        FaceSource::Bitmap(b) => {
            let (ox, oy) = (origin.0.floor() as i64, origin.1.floor() as i64);
            let s = b.scale as i64;
            for (x, y) in bitmap_dots(b, text) {
                for dy in 0..s { for dx in 0..s { put(canvas, ox + x as i64 + dx, oy + y as i64 + dy, fg, 1.0); } }
            }
        }
    }
}
