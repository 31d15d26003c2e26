//! Alpha compositing of transparent images onto solid backgrounds

use crate::color::Rgb;
use image::{RgbImage, RgbaImage};

/// Blend one channel: `fg * a + bg * (1 - a)` with `a = alpha / 255`
///
/// Evaluated in `f64` and truncated toward zero when stored back as `u8`.
#[inline]
#[must_use]
pub fn blend_channel(fg: u8, bg: u8, alpha: u8) -> u8 {
    let a = f64::from(alpha) / 255.0;
    let value = f64::from(fg) * a + f64::from(bg) * (1.0 - a);
    value as u8
}

/// Composite `image` over a solid `background`, producing an opaque RGB image
///
/// Fully transparent pixels take the background color exactly, fully opaque
/// pixels keep their foreground color exactly.
#[must_use]
pub fn composite_onto(image: &RgbaImage, background: Rgb) -> RgbImage {
    let (width, height) = image.dimensions();
    let [bg_r, bg_g, bg_b] = background.to_array();
    let mut output = RgbImage::new(width, height);

    for (src, dst) in image.pixels().zip(output.pixels_mut()) {
        let [r, g, b, a] = src.0;
        dst.0 = [
            blend_channel(r, bg_r, a),
            blend_channel(g, bg_g, a),
            blend_channel(b, bg_b, a),
        ];
    }

    output
}

/// Composite `image` once per background color, in palette order
#[must_use]
pub fn composite_all(image: &RgbaImage, backgrounds: &[Rgb]) -> Vec<RgbImage> {
    backgrounds
        .iter()
        .map(|&bg| composite_onto(image, bg))
        .collect()
}
