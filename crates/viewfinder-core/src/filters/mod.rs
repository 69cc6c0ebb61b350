pub mod kernels;

mod convolve;
mod descriptor;
mod point;
mod sobel;

pub use convolve::{convolve, convolve_f32};
pub use descriptor::FilterDescriptor;
pub use point::{brightness, contrast, grayscale, red_free};
pub use sobel::edge_map;
