/// ITU-R BT.709 luminance coefficient for the red channel.
pub const LUMINANCE_R: f32 = 0.2126;

/// ITU-R BT.709 luminance coefficient for the green channel.
pub const LUMINANCE_G: f32 = 0.7152;

/// ITU-R BT.709 luminance coefficient for the blue channel.
pub const LUMINANCE_B: f32 = 0.0722;

/// Neutral midpoint a contrast adjustment pivots around.
pub const CONTRAST_PIVOT: f32 = 128.0;

/// Two-finger pinch distance change (in device pixels) equal to one
/// relative zoom step at speed 1.0.
pub const PINCH_STEP_DISTANCE: f64 = 30.0;

/// Minimum pixel count (w*h) to use row-level Rayon parallelism.
pub const PARALLEL_PIXEL_THRESHOLD: usize = 65_536;

/// Determinant magnitude below which a transform counts as singular.
pub const SINGULAR_EPSILON: f64 = 1e-12;

/// Center weight of the sharpen kernel when no amount is given.
pub const SHARPEN_DEFAULT_AMOUNT: f32 = 5.0;
