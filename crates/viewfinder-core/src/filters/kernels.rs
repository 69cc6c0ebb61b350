//! Stock 3x3 convolution kernels.

/// Vertical Sobel operator, responding to horizontal edges.
pub const SOBEL_VERTICAL: [f32; 9] = [-1.0, -2.0, -1.0, 0.0, 0.0, 0.0, 1.0, 2.0, 1.0];

/// Horizontal Sobel operator, responding to vertical edges.
pub const SOBEL_HORIZONTAL: [f32; 9] = [-1.0, 0.0, 1.0, -2.0, 0.0, 2.0, -1.0, 0.0, 1.0];

/// Emboss kernel lighting the image from the upper left.
pub const EMBOSS: [f32; 9] = [1.0, 1.0, 1.0, 1.0, 0.7, -1.0, -1.0, -1.0, -1.0];

/// Sharpen kernel with a configurable centre weight. At `amount` 5 the
/// weights sum to 1 and flat regions pass through unchanged; values
/// closer to 4 push the response towards a pure edge detector.
pub fn sharpen(amount: f32) -> [f32; 9] {
    [0.0, -1.0, 0.0, -1.0, amount, -1.0, 0.0, -1.0, 0.0]
}
