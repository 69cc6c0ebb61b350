use std::cell::RefCell;
use std::rc::Rc;

use image::{Rgba, RgbaImage};

use viewfinder_core::error::ViewfinderError;
use viewfinder_core::listener::ViewerEvents;
use viewfinder_core::options::ViewerOptions;
use viewfinder_core::surface::Surface;
use viewfinder_core::transform::AffineTransform;
use viewfinder_core::viewer::Viewer;

/// One recorded drawing call, pixels included, so tests can assert on
/// exactly what a redraw put on screen.
#[derive(Clone, Debug, PartialEq)]
pub enum SurfaceCall {
    Clear,
    DrawImage {
        pixels: RgbaImage,
        transform: AffineTransform,
    },
    StrokeRect {
        x: f64,
        y: f64,
        w: f64,
        h: f64,
        line_width: f64,
        color: String,
    },
    FillText {
        text: String,
        x: f64,
        y: f64,
    },
}

pub type SurfaceLog = Rc<RefCell<Vec<SurfaceCall>>>;

/// Surface double that records every call.
pub struct RecordingSurface {
    width: u32,
    height: u32,
    calls: SurfaceLog,
}

impl RecordingSurface {
    /// Returns the surface and a shared handle onto its call log.
    pub fn new(width: u32, height: u32) -> (Self, SurfaceLog) {
        let calls: SurfaceLog = Rc::new(RefCell::new(Vec::new()));
        let surface = RecordingSurface {
            width,
            height,
            calls: Rc::clone(&calls),
        };
        (surface, calls)
    }
}

impl Surface for RecordingSurface {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn clear(&mut self) {
        self.calls.borrow_mut().push(SurfaceCall::Clear);
    }

    fn draw_image(&mut self, pixels: &RgbaImage, transform: &AffineTransform) {
        self.calls.borrow_mut().push(SurfaceCall::DrawImage {
            pixels: pixels.clone(),
            transform: *transform,
        });
    }

    fn stroke_rect(&mut self, x: f64, y: f64, w: f64, h: f64, line_width: f64, color: &str) {
        self.calls.borrow_mut().push(SurfaceCall::StrokeRect {
            x,
            y,
            w,
            h,
            line_width,
            color: color.to_string(),
        });
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64, _font: &str, _color: &str) {
        self.calls.borrow_mut().push(SurfaceCall::FillText {
            text: text.to_string(),
            x,
            y,
        });
    }
}

/// The image most recently drawn to the surface.
pub fn last_drawn(log: &SurfaceLog) -> RgbaImage {
    log.borrow()
        .iter()
        .rev()
        .find_map(|call| match call {
            SurfaceCall::DrawImage { pixels, .. } => Some(pixels.clone()),
            _ => None,
        })
        .expect("no draw_image call recorded")
}

/// Text of every caption drawn so far, in order.
pub fn captions(log: &SurfaceLog) -> Vec<String> {
    log.borrow()
        .iter()
        .filter_map(|call| match call {
            SurfaceCall::FillText { text, .. } => Some(text.clone()),
            _ => None,
        })
        .collect()
}

/// Everything the listener saw, in call order per kind.
#[derive(Default)]
pub struct EventRecord {
    pub zoom: Vec<f64>,
    pub brightness: Vec<f32>,
    pub contrast: Vec<f32>,
    pub double_activations: usize,
    pub loaded: Vec<String>,
    pub failed: Vec<String>,
}

/// Listener double. `consume_double` is what `double_activated`
/// returns, i.e. whether the default zoom is suppressed.
pub struct RecordingListener {
    record: Rc<RefCell<EventRecord>>,
    consume_double: bool,
}

impl RecordingListener {
    pub fn new(consume_double: bool) -> (Self, Rc<RefCell<EventRecord>>) {
        let record = Rc::new(RefCell::new(EventRecord::default()));
        let listener = RecordingListener {
            record: Rc::clone(&record),
            consume_double,
        };
        (listener, record)
    }
}

impl ViewerEvents for RecordingListener {
    fn zoom_changed(&self, scale: f64) {
        self.record.borrow_mut().zoom.push(scale);
    }

    fn brightness_changed(&self, level: f32) {
        self.record.borrow_mut().brightness.push(level);
    }

    fn contrast_changed(&self, level: f32) {
        self.record.borrow_mut().contrast.push(level);
    }

    fn double_activated(&self) -> bool {
        self.record.borrow_mut().double_activations += 1;
        self.consume_double
    }

    fn image_loaded(&self, source: &str) {
        self.record.borrow_mut().loaded.push(source.to_string());
    }

    fn image_load_failed(&self, source: &str, _error: &ViewfinderError) {
        self.record.borrow_mut().failed.push(source.to_string());
    }
}

/// Uniform color image.
pub fn solid_image(width: u32, height: u32, rgba: [u8; 4]) -> RgbaImage {
    RgbaImage::from_pixel(width, height, Rgba(rgba))
}

/// Deterministic non-uniform image for content comparisons.
pub fn gradient_image(width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_fn(width, height, |x, y| {
        let v = ((x + y * width) * 7 % 256) as u8;
        Rgba([v, v.wrapping_add(40), v.wrapping_add(90), 255])
    })
}

/// Viewer over a recording surface with default options.
pub fn make_viewer(surface_w: u32, surface_h: u32) -> (Viewer, SurfaceLog) {
    let (surface, log) = RecordingSurface::new(surface_w, surface_h);
    let viewer = Viewer::new(Box::new(surface), ViewerOptions::default());
    (viewer, log)
}

/// Run a full begin/finish load cycle with the given pixels.
pub fn load_pixels(viewer: &mut Viewer, source: &str, pixels: RgbaImage) {
    let request = viewer.begin_load(source, false, None);
    viewer.finish_load(request, pixels).expect("load");
}
