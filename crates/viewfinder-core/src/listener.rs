use crate::error::ViewfinderError;

/// Viewer event notifications for UI chrome.
///
/// One slot per event kind; every method has a default no-op
/// implementation, so listeners override only what they care about.
pub trait ViewerEvents {
    /// The accumulated view scale changed (zoom, scale, fit, load).
    fn zoom_changed(&self, _scale: f64) {}

    /// The brightness level changed, reported in step units
    /// (accumulated delta divided by the configured step size).
    fn brightness_changed(&self, _level: f32) {}

    /// The contrast level changed. Absolute adjustments report the raw
    /// accumulated factor; relative adjustments report step units.
    fn contrast_changed(&self, _level: f32) {}

    /// A double-click/double-tap fired. Return `true` to consume it;
    /// `false` lets the viewer apply its default one-step zoom.
    fn double_activated(&self) -> bool {
        false
    }

    /// An image finished loading and is on screen.
    fn image_loaded(&self, _source: &str) {}

    /// An in-flight load failed; the previously committed state is
    /// untouched.
    fn image_load_failed(&self, _source: &str, _error: &ViewfinderError) {}
}

/// Default listener that ignores everything.
pub struct NoOpEvents;
impl ViewerEvents for NoOpEvents {}
