use image::{Rgba32FImage, RgbaImage};
use rayon::prelude::*;

use crate::consts::PARALLEL_PIXEL_THRESHOLD;

/// Side length of a square kernel given as a flat slice.
fn kernel_side(kernel: &[f32]) -> usize {
    let side = (kernel.len() as f64).sqrt().round() as usize;
    debug_assert_eq!(side * side, kernel.len(), "kernel length must be a perfect square");
    side
}

/// Weighted sum of the RGBA samples under the kernel window centred on
/// `(x, y)`. Reads outside the image clamp to the nearest edge pixel.
fn convolve_at(
    samples: &[u8],
    width: usize,
    height: usize,
    x: usize,
    y: usize,
    kernel: &[f32],
    side: usize,
    half: usize,
) -> [f32; 4] {
    let mut sums = [0.0f32; 4];
    for ky in 0..side {
        let sy = (y as isize + ky as isize - half as isize).clamp(0, height as isize - 1) as usize;
        for kx in 0..side {
            let sx = (x as isize + kx as isize - half as isize).clamp(0, width as isize - 1) as usize;
            let weight = kernel[ky * side + kx];
            let offset = (sy * width + sx) * 4;
            sums[0] += samples[offset] as f32 * weight;
            sums[1] += samples[offset + 1] as f32 * weight;
            sums[2] += samples[offset + 2] as f32 * weight;
            sums[3] += samples[offset + 3] as f32 * weight;
        }
    }
    sums
}

/// Convolve `src` with a flat square `kernel` into a new byte buffer.
///
/// The source is left untouched. With `opaque` set the output alpha is
/// forced to 255; otherwise the convolved alpha sum is kept. Channel
/// sums are rounded and clamped to [0, 255] on store. Images at or
/// above [`PARALLEL_PIXEL_THRESHOLD`] pixels are processed row-parallel.
pub fn convolve(src: &RgbaImage, kernel: &[f32], opaque: bool) -> RgbaImage {
    let (width, height) = src.dimensions();
    let (w, h) = (width as usize, height as usize);
    let side = kernel_side(kernel);
    let half = side / 2;
    let samples = src.as_raw().as_slice();
    let alpha_fac = if opaque { 1.0f32 } else { 0.0 };

    let data: Vec<u8> = if w * h >= PARALLEL_PIXEL_THRESHOLD {
        let rows: Vec<Vec<u8>> = (0..h)
            .into_par_iter()
            .map(|y| {
                let mut row = Vec::with_capacity(w * 4);
                for x in 0..w {
                    let [r, g, b, a] = convolve_at(samples, w, h, x, y, kernel, side, half);
                    row.push(r.round() as u8);
                    row.push(g.round() as u8);
                    row.push(b.round() as u8);
                    row.push((a + alpha_fac * (255.0 - a)).round() as u8);
                }
                row
            })
            .collect();
        let mut data = Vec::with_capacity(w * h * 4);
        for row in rows {
            data.extend_from_slice(&row);
        }
        data
    } else {
        let mut data = Vec::with_capacity(w * h * 4);
        for y in 0..h {
            for x in 0..w {
                let [r, g, b, a] = convolve_at(samples, w, h, x, y, kernel, side, half);
                data.push(r.round() as u8);
                data.push(g.round() as u8);
                data.push(b.round() as u8);
                data.push((a + alpha_fac * (255.0 - a)).round() as u8);
            }
        }
        data
    };

    RgbaImage::from_raw(width, height, data).expect("buffer size matches dimensions")
}

/// Like [`convolve`] but stores raw floating point sums without
/// rounding or clamping, for kernels whose interesting output lies
/// outside the byte range.
pub fn convolve_f32(src: &RgbaImage, kernel: &[f32], opaque: bool) -> Rgba32FImage {
    let (width, height) = src.dimensions();
    let (w, h) = (width as usize, height as usize);
    let side = kernel_side(kernel);
    let half = side / 2;
    let samples = src.as_raw().as_slice();
    let alpha_fac = if opaque { 1.0f32 } else { 0.0 };

    let data: Vec<f32> = if w * h >= PARALLEL_PIXEL_THRESHOLD {
        let rows: Vec<Vec<f32>> = (0..h)
            .into_par_iter()
            .map(|y| {
                let mut row = Vec::with_capacity(w * 4);
                for x in 0..w {
                    let [r, g, b, a] = convolve_at(samples, w, h, x, y, kernel, side, half);
                    row.push(r);
                    row.push(g);
                    row.push(b);
                    row.push(a + alpha_fac * (255.0 - a));
                }
                row
            })
            .collect();
        let mut data = Vec::with_capacity(w * h * 4);
        for row in rows {
            data.extend_from_slice(&row);
        }
        data
    } else {
        let mut data = Vec::with_capacity(w * h * 4);
        for y in 0..h {
            for x in 0..w {
                let [r, g, b, a] = convolve_at(samples, w, h, x, y, kernel, side, half);
                data.push(r);
                data.push(g);
                data.push(b);
                data.push(a + alpha_fac * (255.0 - a));
            }
        }
        data
    };

    Rgba32FImage::from_raw(width, height, data).expect("buffer size matches dimensions")
}
