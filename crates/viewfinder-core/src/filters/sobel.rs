use image::RgbaImage;

use crate::filters::convolve::convolve_f32;
use crate::filters::kernels::{SOBEL_HORIZONTAL, SOBEL_VERTICAL};
use crate::filters::point::grayscale;

/// Two-pass Sobel edge visualisation.
///
/// The source is grayscaled, convolved with both Sobel operators in
/// floating point, and the gradient magnitudes recombined into a false
/// colour map: red carries the vertical response, green the horizontal,
/// blue a quarter of their sum. Output alpha is fully opaque.
pub fn edge_map(src: &RgbaImage) -> RgbaImage {
    let mut gray = src.clone();
    grayscale(&mut gray);

    let vertical = convolve_f32(&gray, &SOBEL_VERTICAL, false);
    let horizontal = convolve_f32(&gray, &SOBEL_HORIZONTAL, false);
    let v = vertical.as_raw();
    let h = horizontal.as_raw();

    let (width, height) = src.dimensions();
    let mut out = RgbaImage::new(width, height);
    for (i, px) in out.pixels_mut().enumerate() {
        let offset = i * 4;
        let vm = v[offset].abs();
        let hm = h[offset].abs();
        px.0 = [
            vm.round() as u8,
            hm.round() as u8,
            ((vm + hm) / 4.0).round() as u8,
            255,
        ];
    }
    out
}
