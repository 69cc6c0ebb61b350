use image::RgbaImage;

use crate::transform::AffineTransform;

/// The drawing sink a [`Viewer`](crate::viewer::Viewer) renders into.
///
/// Hosts back this with whatever 2D surface they have (a window canvas,
/// a GPU texture upload, a framebuffer); tests use a recording double.
/// All coordinates are in device space except `draw_image`, which takes
/// the image pixels plus the view transform to place them under.
pub trait Surface {
    /// Drawable width in device pixels.
    fn width(&self) -> u32;

    /// Drawable height in device pixels.
    fn height(&self) -> u32;

    /// Clear the whole surface.
    fn clear(&mut self);

    /// Draw the full image with the given transform applied.
    fn draw_image(&mut self, pixels: &RgbaImage, transform: &AffineTransform);

    /// Stroke an axis-aligned rectangle.
    fn stroke_rect(&mut self, x: f64, y: f64, w: f64, h: f64, line_width: f64, color: &str);

    /// Draw a line of text at a device-space position.
    fn fill_text(&mut self, text: &str, x: f64, y: f64, font: &str, color: &str);
}
