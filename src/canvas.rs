use image::RgbImage;

use crate::color::Rgb8;
use crate::error::{Result, ShotError};
use crate::text::TextBounds;

/// Allocate a `width` x `height` RGB8 canvas filled with `background`.
pub fn new_canvas(width: u32, height: u32, background: Rgb8) -> Result<RgbImage> {
    if width == 0 || height == 0 { return Err(ShotError::InvalidCanvas { width, height }); }
    Ok(RgbImage::from_pixel(width, height, background.to_pixel()))
}

/// Top-left layout origin that centers the measured box's extents on the canvas.
/// The box's own offset from the origin is not compensated, so ink can sit slightly
/// right of / below true center for glyphs with side bearings or short caps.
pub fn centered_origin(canvas_w: u32, canvas_h: u32, bounds: &TextBounds) -> (f32, f32) {
    ((canvas_w as f32 - bounds.width()) / 2.0, (canvas_h as f32 - bounds.height()) / 2.0)
}
