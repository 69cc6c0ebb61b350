use serde::{Deserialize, Serialize};

use crate::transform::Point;

/// Flat option set for the viewer. Every field has a default; hosts
/// override what they need and can round-trip the whole set through
/// serde for settings storage.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerOptions {
    /// How fast mouse panning moves the image.
    pub mouse_pan_speed: f64,
    /// How fast wheel scrolling zooms, in relative steps per wheel step.
    pub mouse_wheel_speed: f64,
    /// How fast touch panning moves the image.
    pub touch_pan_speed: f64,
    /// How fast a two-finger pinch zooms.
    pub two_finger_zoom_speed: f64,
    /// Release-to-release gap strictly above this fires a double-activate.
    pub double_click_min_ms: u64,
    /// Release-to-release gap at or above this never fires.
    pub double_click_max_ms: u64,
    /// Pow base for relative scale and zoom steps.
    pub scale_step: f64,
    /// Brightness delta (in channel units) for one relative step.
    pub brightness_step: f32,
    /// Pow base for relative contrast steps.
    pub contrast_step: f32,
    /// Font for the info text overlay.
    pub info_text_font: String,
    /// Color for the info text overlay.
    pub info_text_color: String,
    /// Device-space position of the info text overlay.
    pub info_text_position: Point,
    /// Stroke a boundary box around the image on every redraw.
    pub draw_boundary: bool,
    /// Boundary box inflation and stroke width, in device pixels.
    pub boundary_size: f64,
    /// Boundary box stroke color.
    pub boundary_color: String,
    /// Caption template shown when a load begins; `{0}` is the source.
    pub msg_load_start: String,
    /// Caption template shown when a load completes; `{0}` is the source.
    pub msg_loaded: String,
}

impl Default for ViewerOptions {
    fn default() -> Self {
        Self {
            mouse_pan_speed: 0.5,
            mouse_wheel_speed: 0.33,
            touch_pan_speed: 1.0,
            two_finger_zoom_speed: 1.0,
            double_click_min_ms: 100,
            double_click_max_ms: 300,
            scale_step: 1.1,
            brightness_step: 8.0,
            contrast_step: 1.1,
            info_text_font: "12px sans-serif".to_string(),
            info_text_color: "#FFFFFF".to_string(),
            info_text_position: Point::new(10.0, 14.0),
            draw_boundary: false,
            boundary_size: 10.0,
            boundary_color: "#FFFFFF".to_string(),
            msg_load_start: "Loading {0} ...".to_string(),
            msg_loaded: "Loaded {0}".to_string(),
        }
    }
}

impl ViewerOptions {
    /// Caption for a beginning load, with the source substituted in.
    pub fn load_start_caption(&self, source: &str) -> String {
        substitute(&self.msg_load_start, source)
    }

    /// Caption for a completed load, with the source substituted in.
    pub fn loaded_caption(&self, source: &str) -> String {
        substitute(&self.msg_loaded, source)
    }
}

/// Replace the first `{0}` placeholder. Templates without one are
/// returned as-is.
fn substitute(template: &str, value: &str) -> String {
    template.replacen("{0}", value, 1)
}
