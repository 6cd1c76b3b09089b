//! Pixel-space filters: grayscale and sepia toning.
//!
//! Both filters are pure functions over an RGBA buffer. They allocate a new
//! buffer rather than mutating in place, so an input buffer is never aliased
//! by two stages at once. Alpha passes through untouched.

use image::{Rgba, RgbaImage};

use crate::error::{PipelineError, PipelineResult};
use std::path::Path;

/// ITU-R 601 luma weights.
const LUMA_R: f64 = 0.299;
const LUMA_G: f64 = 0.587;
const LUMA_B: f64 = 0.114;

/// Standard sepia tone matrix, row-major (R', G', B' from R, G, B).
const SEPIA: [[f64; 3]; 3] = [
    [0.393, 0.769, 0.189],
    [0.349, 0.686, 0.168],
    [0.272, 0.534, 0.131],
];

/// Convert an image to grayscale using the ITU-R 601 luma formula.
pub fn grayscale(img: &RgbaImage) -> RgbaImage {
    let mut out = RgbaImage::new(img.width(), img.height());
    for (x, y, pixel) in img.enumerate_pixels() {
        let [r, g, b, a] = pixel.0;
        let gray = (LUMA_R * r as f64 + LUMA_G * g as f64 + LUMA_B * b as f64) as u8;
        out.put_pixel(x, y, Rgba([gray, gray, gray, a]));
    }
    out
}

/// Apply the sepia tone matrix, clamping each channel to 255.
pub fn sepia(img: &RgbaImage) -> RgbaImage {
    let mut out = RgbaImage::new(img.width(), img.height());
    for (x, y, pixel) in img.enumerate_pixels() {
        let [r, g, b, a] = pixel.0;
        let toned = SEPIA.map(|row| {
            let v = row[0] * r as f64 + row[1] * g as f64 + row[2] * b as f64;
            v.min(255.0) as u8
        });
        out.put_pixel(x, y, Rgba([toned[0], toned[1], toned[2], a]));
    }
    out
}

/// Run the full toning chain: grayscale, then sepia, in that order.
///
/// Rejects zero-dimension buffers with [`PipelineError::Transform`]; a
/// malformed buffer fails that one item, never the worker processing it.
pub fn apply_chain(source: &Path, img: &RgbaImage) -> PipelineResult<RgbaImage> {
    if img.width() == 0 || img.height() == 0 {
        return Err(PipelineError::Transform {
            path: source.to_path_buf(),
            message: format!("empty pixel buffer ({}x{})", img.width(), img.height()),
        });
    }
    Ok(sepia(&grayscale(img)))
}
