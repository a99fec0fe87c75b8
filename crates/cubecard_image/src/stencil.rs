//! Scaling and stencil tinting

use cubecard_paint::Color;
use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};

/// Resample `image` to `height` pixels tall, keeping its aspect ratio
pub fn scale_to_height(image: &RgbaImage, height: u32) -> RgbaImage {
    let (w, h) = image.dimensions();
    if h == height || w == 0 || h == 0 {
        return image.clone();
    }
    let width = ((w as f32 * height as f32 / h as f32).round() as u32).max(1);
    imageops::resize(image, width, height.max(1), FilterType::Triangle)
}

/// Composite a solid `color` source-atop `image`.
///
/// The result keeps the icon's alpha; where the icon is opaque its color is
/// replaced by `color` (blended by the tint's own alpha), so any silhouette
/// comes out as a flat recoloring.
pub fn stencil(image: &RgbaImage, color: Color) -> RgbaImage {
    let [tr, tg, tb, _] = color.to_rgba8();
    let ta = color.a.clamp(0.0, 1.0);
    let blend = |tint: u8, src: u8| (tint as f32 * ta + src as f32 * (1.0 - ta)).round() as u8;

    let mut out = image.clone();
    for pixel in out.pixels_mut() {
        let Rgba([r, g, b, a]) = *pixel;
        *pixel = Rgba([blend(tr, r), blend(tg, g), blend(tb, b), a]);
    }
    out
}
