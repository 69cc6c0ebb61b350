use std::fmt;

use image::RgbaImage;

use crate::filters::point::{brightness, contrast};

/// Recipe for a persisted pixel adjustment.
///
/// The viewer keeps at most one of these, carrying the accumulated
/// brightness or contrast total, so the adjustment can be replayed onto
/// a freshly reloaded working buffer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FilterDescriptor {
    /// Additive brightness shift, total delta over all steps.
    Brightness { delta: f32 },
    /// Multiplicative contrast scaling, total factor over all steps.
    Contrast { factor: f32 },
}

impl FilterDescriptor {
    /// Apply the recipe to `pixels` in place.
    pub fn apply(&self, pixels: &mut RgbaImage) {
        match *self {
            FilterDescriptor::Brightness { delta } => brightness(pixels, delta),
            FilterDescriptor::Contrast { factor } => contrast(pixels, factor),
        }
    }

    /// True when `other` adjusts the same dimension, regardless of the
    /// carried value.
    pub fn same_kind(&self, other: &FilterDescriptor) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }
}

impl fmt::Display for FilterDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterDescriptor::Brightness { delta } => write!(f, "brightness({delta:+})"),
            FilterDescriptor::Contrast { factor } => write!(f, "contrast(x{factor})"),
        }
    }
}
