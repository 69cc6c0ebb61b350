use std::cell::RefCell;
use std::rc::Rc;
use std::time::Instant;

use tracing::warn;

use crate::transform::Point;
use crate::viewer::Viewer;

/// Which device produced a pointer event. Pan speed and the default
/// double-activate zoom direction depend on it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputSource {
    Mouse,
    Touch,
}

/// A raw input event, one variant per host-level handler. Coordinates
/// are device pixels relative to the surface; wheel deltas arrive
/// already normalized to step units by the host. Release events carry
/// their timestamp so double-activate timing is deterministic.
#[derive(Clone, Copy, Debug)]
pub enum InputEvent {
    MouseDown { pos: Point },
    MouseMove { pos: Point },
    MouseUp { alternate: bool, at: Instant },
    Wheel { delta: f64 },
    TouchStart { primary: Point, secondary: Option<Point> },
    TouchMove { primary: Point, secondary: Option<Point> },
    TouchEnd { at: Instant },
    TouchCancel { at: Instant },
}

/// Subscription keys for [`EventSource::subscribe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventKind {
    MouseDown,
    MouseMove,
    MouseUp,
    Wheel,
    TouchStart,
    TouchMove,
    TouchEnd,
    TouchCancel,
}

impl EventKind {
    pub const ALL: [EventKind; 8] = [
        EventKind::MouseDown,
        EventKind::MouseMove,
        EventKind::MouseUp,
        EventKind::Wheel,
        EventKind::TouchStart,
        EventKind::TouchMove,
        EventKind::TouchEnd,
        EventKind::TouchCancel,
    ];
}

pub type EventHandler = Box<dyn FnMut(InputEvent)>;

/// Input subscription capability implemented by the host layer.
///
/// Device capability detection, coordinate conversion, and wheel delta
/// normalization all live behind this trait; the engine only ever asks
/// for one handler per event kind.
pub trait EventSource {
    fn subscribe(&mut self, kind: EventKind, handler: EventHandler);
}

/// Register a shared viewer with an event source, one handler per event
/// kind, each forwarding into [`Viewer::handle_input`]. Handler errors
/// are logged and dropped since an event loop has nowhere to propagate
/// them.
pub fn attach(viewer: &Rc<RefCell<Viewer>>, source: &mut dyn EventSource) {
    for kind in EventKind::ALL {
        let viewer = Rc::clone(viewer);
        source.subscribe(
            kind,
            Box::new(move |event| {
                if let Err(error) = viewer.borrow_mut().handle_input(event) {
                    warn!(?event, %error, "Input event dropped");
                }
            }),
        );
    }
}
