use image::RgbaImage;

use crate::consts::{CONTRAST_PIVOT, LUMINANCE_B, LUMINANCE_G, LUMINANCE_R};

/// Replace R, G and B with the BT.709 luminance
/// `0.2126*R + 0.7152*G + 0.0722*B`. Alpha is untouched.
pub fn grayscale(pixels: &mut RgbaImage) {
    for px in pixels.pixels_mut() {
        let [r, g, b, _] = px.0;
        let v = (LUMINANCE_R * r as f32 + LUMINANCE_G * g as f32 + LUMINANCE_B * b as f32).round()
            as u8;
        px.0[0] = v;
        px.0[1] = v;
        px.0[2] = v;
    }
}

/// Luminance with the red channel zeroed before weighting, simulating
/// red-channel-blind viewing.
pub fn red_free(pixels: &mut RgbaImage) {
    for px in pixels.pixels_mut() {
        let [_, g, b, _] = px.0;
        let v = (LUMINANCE_G * g as f32 + LUMINANCE_B * b as f32).round() as u8;
        px.0[0] = v;
        px.0[1] = v;
        px.0[2] = v;
    }
}

/// Add `delta` to every channel byte, alpha included.
///
/// Only one bound is checked explicitly, picked by the sign of `delta`;
/// the saturating byte store covers the other side. Results always land
/// in [0, 255].
pub fn brightness(pixels: &mut RgbaImage, delta: f32) {
    if delta > 0.0 {
        for v in pixels.iter_mut() {
            let shifted = *v as f32 + delta;
            *v = if shifted > 255.0 {
                255
            } else {
                shifted.round() as u8
            };
        }
    } else {
        for v in pixels.iter_mut() {
            let shifted = *v as f32 + delta;
            *v = if shifted < 0.0 { 0 } else { shifted.round() as u8 };
        }
    }
}

/// Scale every channel byte around the 128 midpoint:
/// `v = (v - 128)*factor + 128`, with the same sign-dependent
/// single-bound check as [`brightness`].
pub fn contrast(pixels: &mut RgbaImage, factor: f32) {
    if factor > 0.0 {
        for v in pixels.iter_mut() {
            let scaled = (*v as f32 - CONTRAST_PIVOT) * factor + CONTRAST_PIVOT;
            *v = if scaled > 255.0 {
                255
            } else {
                scaled.round() as u8
            };
        }
    } else {
        for v in pixels.iter_mut() {
            let scaled = (*v as f32 - CONTRAST_PIVOT) * factor + CONTRAST_PIVOT;
            *v = if scaled < 0.0 { 0 } else { scaled.round() as u8 };
        }
    }
}
