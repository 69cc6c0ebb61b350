use std::time::Instant;

use tracing::trace;

use crate::consts::PINCH_STEP_DISTANCE;
use crate::error::Result;
use crate::events::InputSource;
use crate::options::ViewerOptions;
use crate::transform::{Point, ViewTransform};

/// Gesture recognised from a low level input event. The tracker only
/// recognises; applying the action to the view is the caller's job.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GestureAction {
    /// Drag the image by an image-space delta.
    Pan { dx: f64, dy: f64 },
    /// Zoom by `steps` scale steps around the last tracked point.
    /// Fractional and zero step counts are legal.
    Zoom { steps: f64 },
    /// Two quick releases landed in the double-activation window.
    DoubleActivate { source: InputSource, alternate: bool },
}

/// Incremental state machine turning pointer events into [`GestureAction`]s.
///
/// Tracks the press anchor for drag panning, the two finger reference
/// distance for pinch zooming and release timestamps for double
/// activation. It reads the view transform to map device positions into
/// image space but never mutates it.
#[derive(Debug)]
pub struct GestureTracker {
    /// Last known pointer position in device space. Zooms anchor here.
    last_point: Point,
    /// Image-space position under the pointer when the press began.
    pan_anchor: Option<Point>,
    /// Set by any pointer motion, cleared on press. A release with this
    /// set never fires a double activation, though it still restarts
    /// the timing window.
    panning: bool,
    /// Reference finger distance for the pinch gesture.
    two_finger_distance: Option<f64>,
    /// Timestamp of the previous candidate release.
    last_release: Option<Instant>,
}

impl GestureTracker {
    pub fn new(initial_point: Point) -> Self {
        GestureTracker {
            last_point: initial_point,
            pan_anchor: None,
            panning: false,
            two_finger_distance: None,
            last_release: None,
        }
    }

    /// Device-space position zooms should centre on.
    pub fn last_point(&self) -> Point {
        self.last_point
    }

    pub fn set_last_point(&mut self, pos: Point) {
        self.last_point = pos;
    }

    /// True once the pointer has moved since the last press. Hosts can
    /// use this to switch drag cursors.
    pub fn is_panning(&self) -> bool {
        self.panning
    }

    /// Forget any in-progress press. Image loads call this so a drag
    /// started on the old image cannot carry over.
    pub fn clear_anchor(&mut self) {
        self.pan_anchor = None;
    }

    pub fn mouse_pressed(&mut self, pos: Point, view: &ViewTransform) -> Result<()> {
        self.pressed(pos, view)
    }

    pub fn mouse_moved(
        &mut self,
        pos: Point,
        view: &ViewTransform,
        options: &ViewerOptions,
    ) -> Result<Option<GestureAction>> {
        self.moved(pos, view, options.mouse_pan_speed)
    }

    pub fn mouse_released(
        &mut self,
        alternate: bool,
        at: Instant,
        options: &ViewerOptions,
    ) -> Option<GestureAction> {
        self.released(InputSource::Mouse, alternate, at, options)
    }

    /// Wheel motion maps straight to zoom steps; a zero delta is ignored.
    pub fn wheel(&self, delta: f64, options: &ViewerOptions) -> Option<GestureAction> {
        if delta == 0.0 {
            return None;
        }
        Some(GestureAction::Zoom {
            steps: delta * options.mouse_wheel_speed,
        })
    }

    /// A single touch starts a press and drops any pinch reference; a
    /// second finger arms the pinch reference instead, tracking the
    /// first contact as the last known point but leaving the press
    /// state alone.
    pub fn touch_started(
        &mut self,
        primary: Point,
        secondary: Option<Point>,
        view: &ViewTransform,
    ) -> Result<()> {
        match secondary {
            Some(second) => {
                self.last_point = primary;
                self.two_finger_distance = Some(primary.distance_to(second));
                Ok(())
            }
            None => {
                self.two_finger_distance = None;
                self.pressed(primary, view)
            }
        }
    }

    pub fn touch_moved(
        &mut self,
        primary: Point,
        secondary: Option<Point>,
        view: &ViewTransform,
        options: &ViewerOptions,
    ) -> Result<Option<GestureAction>> {
        match secondary {
            Some(second) => {
                self.last_point = primary;
                let dist = primary.distance_to(second);
                let action = self.two_finger_distance.map(|reference| GestureAction::Zoom {
                    steps: (dist - reference) / PINCH_STEP_DISTANCE
                        * options.two_finger_zoom_speed,
                });
                self.two_finger_distance = Some(dist);
                Ok(action)
            }
            None => self.moved(primary, view, options.touch_pan_speed),
        }
    }

    /// Touch end and touch cancel both land here. Unlike a mouse
    /// release this also resets the panning flag, since there is no
    /// hover motion to keep it meaningful between taps.
    pub fn touch_released(
        &mut self,
        at: Instant,
        options: &ViewerOptions,
    ) -> Option<GestureAction> {
        let action = self.released(InputSource::Touch, false, at, options);
        self.panning = false;
        action
    }

    fn pressed(&mut self, pos: Point, view: &ViewTransform) -> Result<()> {
        self.last_point = pos;
        self.pan_anchor = Some(view.map_point_inverse(pos)?);
        self.panning = false;
        Ok(())
    }

    /// Every motion updates the tracked point and marks the gesture as
    /// panning, whether or not a press is active. The pan delta is the
    /// image-space distance from the anchor; the anchor itself never
    /// advances, the view moving under it is what keeps the drag
    /// incremental.
    fn moved(
        &mut self,
        pos: Point,
        view: &ViewTransform,
        speed: f64,
    ) -> Result<Option<GestureAction>> {
        self.last_point = pos;
        self.panning = true;
        let anchor = match self.pan_anchor {
            Some(anchor) => anchor,
            None => return Ok(None),
        };
        let current = view.map_point_inverse(pos)?;
        Ok(Some(GestureAction::Pan {
            dx: (current.x - anchor.x) * speed,
            dy: (current.y - anchor.y) * speed,
        }))
    }

    fn released(
        &mut self,
        source: InputSource,
        alternate: bool,
        at: Instant,
        options: &ViewerOptions,
    ) -> Option<GestureAction> {
        self.pan_anchor = None;
        if self.panning {
            // A dragged release cannot fire, but it still re-arms the window.
            self.last_release = Some(at);
            return None;
        }
        match self.last_release {
            Some(prev) => {
                let diff = at.duration_since(prev).as_millis() as u64;
                if diff < options.double_click_max_ms {
                    if diff > options.double_click_min_ms {
                        self.last_release = None;
                        trace!(diff_ms = diff, "Double activation recognised");
                        return Some(GestureAction::DoubleActivate { source, alternate });
                    }
                    // Too fast, likely bounce. Restart the window here.
                    self.last_release = Some(at);
                } else {
                    self.last_release = None;
                }
            }
            None => self.last_release = Some(at),
        }
        None
    }
}
