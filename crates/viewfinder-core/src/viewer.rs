//! Viewport orchestration: owns the loaded image, the live view
//! transform, the filtered shadow buffer and the gesture tracker, and
//! exposes the operation surface consumed by UI chrome.

use std::path::Path;

use image::RgbaImage;
use tracing::{debug, info, warn};

use crate::consts::SHARPEN_DEFAULT_AMOUNT;
use crate::error::{Result, ViewfinderError};
use crate::events::{InputEvent, InputSource};
use crate::filters::{self, kernels, FilterDescriptor};
use crate::gesture::{GestureAction, GestureTracker};
use crate::io;
use crate::listener::{NoOpEvents, ViewerEvents};
use crate::options::ViewerOptions;
use crate::surface::Surface;
use crate::transform::{Point, ViewTransform};

/// Ticket for a split-phase image load. [`Viewer::begin_load`] hands it
/// out after resetting view and filter state; the host decodes the
/// source and returns the ticket to [`Viewer::finish_load`] or
/// [`Viewer::fail_load`].
#[derive(Clone, Debug)]
pub struct LoadRequest {
    pub source: String,
    pub fit: bool,
}

/// The loaded image: pristine decode plus the shadow working copy that
/// filters mutate and redraws blit from.
struct ImageState {
    source: String,
    pixels: RgbaImage,
    shadow: RgbaImage,
}

/// Interactive image viewer core.
///
/// All mutating operations redraw the surface from the shadow buffer
/// before returning; view operations additionally report the
/// accumulated scale through the listener. Operations that need pixels
/// fail with [`ViewfinderError::NoImage`] until a load completes.
pub struct Viewer {
    options: ViewerOptions,
    surface: Box<dyn Surface>,
    view: ViewTransform,
    gestures: GestureTracker,
    listener: Box<dyn ViewerEvents>,
    image: Option<ImageState>,
    /// Persisted brightness/contrast recipe. One-shot filters neither
    /// read nor write it.
    filter: Option<FilterDescriptor>,
}

impl Viewer {
    pub fn new(surface: Box<dyn Surface>, options: ViewerOptions) -> Self {
        let center = Point::new(surface.width() as f64 / 2.0, surface.height() as f64 / 2.0);
        Viewer {
            options,
            surface,
            view: ViewTransform::new(),
            gestures: GestureTracker::new(center),
            listener: Box::new(NoOpEvents),
            image: None,
            filter: None,
        }
    }

    pub fn set_listener(&mut self, listener: Box<dyn ViewerEvents>) {
        self.listener = listener;
    }

    pub fn options(&self) -> &ViewerOptions {
        &self.options
    }

    pub fn view(&self) -> &ViewTransform {
        &self.view
    }

    pub fn gestures(&self) -> &GestureTracker {
        &self.gestures
    }

    pub fn current_scale(&self) -> f64 {
        self.view.current_scale()
    }

    pub fn has_image(&self) -> bool {
        self.image.is_some()
    }

    // --- Loading ---

    /// Start a load: clear filter state, reset the view transform, wipe
    /// the surface and show a loading caption (the explicit `caption`
    /// if given, else the configured template). The current image, if
    /// any, stays installed until a completion replaces it.
    pub fn begin_load(&mut self, source: &str, fit: bool, caption: Option<&str>) -> LoadRequest {
        debug!(source, fit, "Image load started");
        self.filter = None;
        self.view.reset();
        self.gestures.clear_anchor();
        self.surface.clear();
        let caption = match caption {
            Some(text) => text.to_string(),
            None => self.options.load_start_caption(source),
        };
        self.draw_caption(&caption);
        LoadRequest {
            source: source.to_string(),
            fit,
        }
    }

    /// Install a decoded image. Completions are not ordered against
    /// their requests; when several loads are in flight the last one to
    /// finish determines the visible state.
    pub fn finish_load(&mut self, request: LoadRequest, pixels: RgbaImage) -> Result<()> {
        let (width, height) = pixels.dimensions();
        info!(source = %request.source, width, height, "Image loaded");
        self.image = Some(ImageState {
            source: request.source.clone(),
            shadow: pixels.clone(),
            pixels,
        });
        if request.fit {
            self.fit_to_surface()?;
        }
        self.redraw()?;
        let caption = self.options.loaded_caption(&request.source);
        self.draw_caption(&caption);
        self.listener.zoom_changed(self.view.current_scale());
        self.listener.image_loaded(&request.source);
        Ok(())
    }

    /// Report a failed load. Committed state is untouched; whatever was
    /// on screen before `begin_load` cleared it stays loaded.
    pub fn fail_load(&self, request: &LoadRequest, error: &ViewfinderError) {
        warn!(source = %request.source, %error, "Image load failed");
        self.listener.image_load_failed(&request.source, error);
    }

    /// Synchronous convenience: begin, decode from disk, finish or fail.
    pub fn load_from_path(&mut self, path: &Path, fit: bool) -> Result<()> {
        let source = path.display().to_string();
        let request = self.begin_load(&source, fit, None);
        match io::decode_path(path) {
            Ok(pixels) => self.finish_load(request, pixels),
            Err(error) => {
                self.fail_load(&request, &error);
                Err(error)
            }
        }
    }

    // --- Input ---

    /// Feed one raw input event through the gesture tracker and apply
    /// whatever action it recognises.
    pub fn handle_input(&mut self, event: InputEvent) -> Result<()> {
        let action = match event {
            InputEvent::MouseDown { pos } => {
                self.gestures.mouse_pressed(pos, &self.view)?;
                None
            }
            InputEvent::MouseMove { pos } => {
                self.gestures.mouse_moved(pos, &self.view, &self.options)?
            }
            InputEvent::MouseUp { alternate, at } => {
                self.gestures.mouse_released(alternate, at, &self.options)
            }
            InputEvent::Wheel { delta } => self.gestures.wheel(delta, &self.options),
            InputEvent::TouchStart { primary, secondary } => {
                self.gestures.touch_started(primary, secondary, &self.view)?;
                None
            }
            InputEvent::TouchMove { primary, secondary } => {
                self.gestures
                    .touch_moved(primary, secondary, &self.view, &self.options)?
            }
            InputEvent::TouchEnd { at } | InputEvent::TouchCancel { at } => {
                self.gestures.touch_released(at, &self.options)
            }
        };
        match action {
            Some(GestureAction::Pan { dx, dy }) => {
                self.image_ref()?;
                self.view.translate(dx, dy);
                self.redraw()
            }
            Some(GestureAction::Zoom { steps }) => self.zoom_relative(steps),
            Some(GestureAction::DoubleActivate { source, alternate }) => {
                if self.listener.double_activated() {
                    return Ok(());
                }
                let steps = if source == InputSource::Mouse && alternate {
                    -1.0
                } else {
                    1.0
                };
                self.zoom_relative(steps)
            }
            None => Ok(()),
        }
    }

    // --- View operations ---

    /// Zoom by `steps` scale steps, anchored so the image point under
    /// the last tracked pointer position stays fixed.
    pub fn zoom_relative(&mut self, steps: f64) -> Result<()> {
        self.image_ref()?;
        let factor = self.options.scale_step.powf(steps);
        self.zoom_anchored(factor)?;
        self.redraw()?;
        self.listener.zoom_changed(self.view.current_scale());
        Ok(())
    }

    /// Zoom to an absolute scale, anchored like [`zoom_relative`]. The
    /// reported scale scalar is overwritten to exactly `scale`.
    ///
    /// [`zoom_relative`]: Self::zoom_relative
    pub fn zoom_absolute(&mut self, scale: f64) -> Result<()> {
        self.image_ref()?;
        let factor = scale / self.view.current_scale();
        self.zoom_anchored(factor)?;
        self.view.set_current_scale(scale);
        self.redraw()?;
        self.listener.zoom_changed(self.view.current_scale());
        Ok(())
    }

    /// Multiply the view scale around the surface origin, unanchored.
    pub fn scale_relative(&mut self, factor: f64) -> Result<()> {
        self.image_ref()?;
        self.view.scale(factor, factor);
        self.redraw()?;
        self.listener.zoom_changed(self.view.current_scale());
        Ok(())
    }

    /// Replace the view with a bare scale around the surface origin,
    /// discarding any accumulated pan or rotation. Scaling to exactly
    /// 1.0 additionally re-centres an image wider than the surface.
    pub fn scale_absolute(&mut self, scale: f64) -> Result<()> {
        let (image_width, image_height) = self.image_dimensions()?;
        self.view.reset();
        self.view.scale(scale, scale);
        self.view.set_current_scale(scale);
        if scale == 1.0 && image_width as f64 > self.surface.width() as f64 {
            let dx = (self.surface.width() as f64 - image_width as f64) / 2.0;
            let dy = (self.surface.height() as f64 - image_height as f64) / 2.0;
            self.view.set(1.0, 0.0, 0.0, 1.0, dx, dy);
        }
        self.redraw()?;
        self.listener.zoom_changed(self.view.current_scale());
        Ok(())
    }

    /// Reset the view so the whole image fits the surface:
    /// `min(surface_w/image_w, surface_h/image_h)` applied absolutely.
    pub fn scale_to_fit(&mut self) -> Result<()> {
        self.fit_to_surface()?;
        self.redraw()?;
        self.listener.zoom_changed(self.view.current_scale());
        Ok(())
    }

    /// Re-centre the zoom anchor on the surface centre and fit. Used
    /// after the host resizes the surface; does not report a zoom
    /// change.
    pub fn scale_to_container(&mut self) -> Result<()> {
        let center = Point::new(
            self.surface.width() as f64 / 2.0,
            self.surface.height() as f64 / 2.0,
        );
        self.gestures.set_last_point(center);
        self.fit_to_surface()?;
        self.redraw()
    }

    // --- Filter operations ---

    /// Adjust brightness by `steps` times the configured step size.
    /// Steps in the direction of the accumulated delta apply in place;
    /// a direction reversal rebuilds the shadow from the pristine
    /// pixels and applies the new total in one pass.
    pub fn brightness_relative(&mut self, steps: f32) -> Result<()> {
        let delta = steps * self.options.brightness_step;
        let prior = match self.filter {
            Some(FilterDescriptor::Brightness { delta }) => delta,
            _ => 0.0,
        };
        let total = prior + delta;
        if (prior >= 0.0) == (delta >= 0.0) {
            self.adjust_in_place(
                FilterDescriptor::Brightness { delta },
                FilterDescriptor::Brightness { delta: total },
            )?;
        } else {
            self.rebuild_with(FilterDescriptor::Brightness { delta: total })?;
        }
        self.redraw()?;
        self.listener
            .brightness_changed(total / self.options.brightness_step);
        Ok(())
    }

    /// Set the accumulated brightness delta outright.
    pub fn brightness_absolute(&mut self, delta: f32) -> Result<()> {
        self.rebuild_with(FilterDescriptor::Brightness { delta })?;
        self.redraw()?;
        self.listener
            .brightness_changed(delta / self.options.brightness_step);
        Ok(())
    }

    /// Adjust contrast by `steps` powers of the configured step base,
    /// with the same fast path as [`brightness_relative`] around a
    /// factor of 1.
    ///
    /// [`brightness_relative`]: Self::brightness_relative
    pub fn contrast_relative(&mut self, steps: f32) -> Result<()> {
        let factor = self.options.contrast_step.powf(steps);
        let prior = match self.filter {
            Some(FilterDescriptor::Contrast { factor }) => factor,
            _ => 1.0,
        };
        let total = prior * factor;
        if (prior >= 1.0) == (factor >= 1.0) {
            self.adjust_in_place(
                FilterDescriptor::Contrast { factor },
                FilterDescriptor::Contrast { factor: total },
            )?;
        } else {
            self.rebuild_with(FilterDescriptor::Contrast { factor: total })?;
        }
        self.redraw()?;
        self.listener
            .contrast_changed(total.ln() / self.options.contrast_step.ln());
        Ok(())
    }

    /// Set the accumulated contrast factor outright. Reports the raw
    /// factor, not step units.
    pub fn contrast_absolute(&mut self, factor: f32) -> Result<()> {
        self.rebuild_with(FilterDescriptor::Contrast { factor })?;
        self.redraw()?;
        self.listener.contrast_changed(factor);
        Ok(())
    }

    /// One-shot BT.709 grayscale of the pristine image.
    pub fn grayscale(&mut self) -> Result<()> {
        let state = self.reload_shadow()?;
        filters::grayscale(&mut state.shadow);
        debug!("Applied grayscale filter");
        self.redraw()
    }

    /// One-shot red-free luminance of the pristine image.
    pub fn red_free(&mut self) -> Result<()> {
        let state = self.reload_shadow()?;
        filters::red_free(&mut state.shadow);
        debug!("Applied red-free filter");
        self.redraw()
    }

    /// One-shot Sobel edge map of the pristine image.
    pub fn sobel(&mut self) -> Result<()> {
        let state = self.image_mut()?;
        state.shadow = filters::edge_map(&state.pixels);
        debug!("Applied Sobel edge map");
        self.redraw()
    }

    /// One-shot sharpen with a configurable centre weight.
    pub fn sharpen(&mut self, amount: f32) -> Result<()> {
        let kernel = kernels::sharpen(amount);
        let state = self.image_mut()?;
        state.shadow = filters::convolve(&state.pixels, &kernel, false);
        debug!(amount, "Applied sharpen filter");
        self.redraw()
    }

    /// [`sharpen`](Self::sharpen) at the stock amount.
    pub fn sharpen_default(&mut self) -> Result<()> {
        self.sharpen(SHARPEN_DEFAULT_AMOUNT)
    }

    /// One-shot emboss convolution.
    pub fn emboss(&mut self) -> Result<()> {
        let state = self.image_mut()?;
        state.shadow = filters::convolve(&state.pixels, &kernels::EMBOSS, false);
        debug!("Applied emboss filter");
        self.redraw()
    }

    /// Drop every filter: reload the shadow from the pristine pixels,
    /// forget the persisted descriptor and redraw.
    pub fn original(&mut self) -> Result<()> {
        self.filter = None;
        self.reload_shadow()?;
        debug!("Restored original image");
        self.redraw()
    }

    // --- Diagnostics ---

    /// Human-readable dump of the current image and surface dimensions.
    pub fn image_info(&self) -> Result<String> {
        let state = self.image_ref()?;
        let (width, height) = state.pixels.dimensions();
        Ok(format!(
            "{} {}x{} px, surface {}x{} px",
            state.source,
            width,
            height,
            self.surface.width(),
            self.surface.height()
        ))
    }

    // --- Internals ---

    fn image_ref(&self) -> Result<&ImageState> {
        self.image.as_ref().ok_or(ViewfinderError::NoImage)
    }

    fn image_mut(&mut self) -> Result<&mut ImageState> {
        self.image.as_mut().ok_or(ViewfinderError::NoImage)
    }

    fn image_dimensions(&self) -> Result<(u32, u32)> {
        Ok(self.image_ref()?.pixels.dimensions())
    }

    /// Copy the pristine pixels back over the shadow buffer.
    fn reload_shadow(&mut self) -> Result<&mut ImageState> {
        let state = self.image.as_mut().ok_or(ViewfinderError::NoImage)?;
        state.shadow = state.pixels.clone();
        Ok(state)
    }

    /// Scale around the image point currently under the tracked pointer
    /// position, so that point stays put on screen.
    fn zoom_anchored(&mut self, factor: f64) -> Result<()> {
        let anchor = self.view.map_point_inverse(self.gestures.last_point())?;
        self.view.translate(anchor.x, anchor.y);
        self.view.scale(factor, factor);
        self.view.translate(-anchor.x, -anchor.y);
        Ok(())
    }

    fn fit_to_surface(&mut self) -> Result<()> {
        let (image_width, image_height) = self.image_dimensions()?;
        let ratio = (self.surface.width() as f64 / image_width as f64)
            .min(self.surface.height() as f64 / image_height as f64);
        self.view.reset();
        self.view.set(ratio, 0.0, 0.0, ratio, 0.0, 0.0);
        Ok(())
    }

    /// Rebuild the shadow for a persisted adjustment: reload, replay a
    /// stored descriptor of the other kind, then apply the accumulated
    /// `total` in a single pass and store it.
    fn rebuild_with(&mut self, total: FilterDescriptor) -> Result<()> {
        let previous = self.filter;
        let state = self.reload_shadow()?;
        if let Some(prev) = previous {
            if !prev.same_kind(&total) {
                prev.apply(&mut state.shadow);
            }
        }
        total.apply(&mut state.shadow);
        debug!(filter = %total, "Rebuilt shadow with persisted filter");
        self.filter = Some(total);
        Ok(())
    }

    /// Fast path for a same-direction relative adjustment: apply just
    /// the `step` to the current shadow and store the new `total`.
    fn adjust_in_place(&mut self, step: FilterDescriptor, total: FilterDescriptor) -> Result<()> {
        let state = self.image_mut()?;
        step.apply(&mut state.shadow);
        self.filter = Some(total);
        Ok(())
    }

    /// Blit the shadow buffer to the surface under the current
    /// transform, with the optional boundary box on top.
    fn redraw(&mut self) -> Result<()> {
        let matrix = self.view.matrix();
        let state = self.image.as_ref().ok_or(ViewfinderError::NoImage)?;
        self.surface.clear();
        self.surface.draw_image(&state.shadow, &matrix);
        if self.options.draw_boundary {
            let (width, height) = state.pixels.dimensions();
            let top_left = matrix.apply(Point::new(0.0, 0.0));
            let bottom_right = matrix.apply(Point::new(width as f64, height as f64));
            let size = self.options.boundary_size;
            self.surface.stroke_rect(
                top_left.x - size,
                top_left.y - size,
                bottom_right.x - top_left.x + 2.0 * size,
                bottom_right.y - top_left.y + 2.0 * size,
                size,
                &self.options.boundary_color,
            );
        }
        Ok(())
    }

    fn draw_caption(&mut self, text: &str) {
        let pos = self.options.info_text_position;
        self.surface.fill_text(
            text,
            pos.x,
            pos.y,
            &self.options.info_text_font,
            &self.options.info_text_color,
        );
    }
}
