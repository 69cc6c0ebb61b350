use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::consts::SINGULAR_EPSILON;
use crate::error::{Result, ViewfinderError};

/// A point in device or image space.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    pub fn distance_to(&self, other: Point) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// A 2D affine map stored as the six coefficients `(a, b, c, d, e, f)`.
///
/// Column-vector convention: `x' = a*x + c*y + e`, `y' = b*x + d*y + f`.
/// Composition is right-multiplication, so `m.multiply(&n)` applies `n`
/// first and `m` second.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AffineTransform {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
}

impl Default for AffineTransform {
    fn default() -> Self {
        Self::identity()
    }
}

impl AffineTransform {
    pub fn identity() -> Self {
        Self {
            a: 1.0,
            b: 0.0,
            c: 0.0,
            d: 1.0,
            e: 0.0,
            f: 0.0,
        }
    }

    pub fn translation(dx: f64, dy: f64) -> Self {
        Self {
            a: 1.0,
            b: 0.0,
            c: 0.0,
            d: 1.0,
            e: dx,
            f: dy,
        }
    }

    pub fn scaling(sx: f64, sy: f64) -> Self {
        Self {
            a: sx,
            b: 0.0,
            c: 0.0,
            d: sy,
            e: 0.0,
            f: 0.0,
        }
    }

    pub fn rotation(radians: f64) -> Self {
        let (sin, cos) = radians.sin_cos();
        Self {
            a: cos,
            b: sin,
            c: -sin,
            d: cos,
            e: 0.0,
            f: 0.0,
        }
    }

    /// Right-multiply: the result applies `other` first, then `self`.
    pub fn multiply(&self, other: &AffineTransform) -> AffineTransform {
        AffineTransform {
            a: self.a * other.a + self.c * other.b,
            b: self.b * other.a + self.d * other.b,
            c: self.a * other.c + self.c * other.d,
            d: self.b * other.c + self.d * other.d,
            e: self.a * other.e + self.c * other.f + self.e,
            f: self.b * other.e + self.d * other.f + self.f,
        }
    }

    pub fn determinant(&self) -> f64 {
        self.a * self.d - self.b * self.c
    }

    /// Inverse map, computed on demand. `None` when the determinant
    /// magnitude is below [`SINGULAR_EPSILON`].
    pub fn invert(&self) -> Option<AffineTransform> {
        let det = self.determinant();
        if det.abs() < SINGULAR_EPSILON {
            return None;
        }
        Some(AffineTransform {
            a: self.d / det,
            b: -self.b / det,
            c: -self.c / det,
            d: self.a / det,
            e: (self.c * self.f - self.d * self.e) / det,
            f: (self.b * self.e - self.a * self.f) / det,
        })
    }

    pub fn apply(&self, p: Point) -> Point {
        Point {
            x: self.a * p.x + self.c * p.y + self.e,
            y: self.b * p.x + self.d * p.y + self.f,
        }
    }
}

/// The live view transform: the current matrix, a LIFO stack of saved
/// snapshots, and the current-scale scalar reported to UI chrome.
///
/// The scalar is an approximation fed by the scale factors that pass
/// through [`scale`](Self::scale), [`compose`](Self::compose) and
/// [`set`](Self::set); it is never recomputed from the matrix. `rotate`
/// and `translate` leave it untouched, and save/restore does not cover it.
#[derive(Clone, Debug)]
pub struct ViewTransform {
    matrix: AffineTransform,
    saved: Vec<AffineTransform>,
    current_scale: f64,
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewTransform {
    pub fn new() -> Self {
        Self {
            matrix: AffineTransform::identity(),
            saved: Vec::new(),
            current_scale: 1.0,
        }
    }

    pub fn matrix(&self) -> AffineTransform {
        self.matrix
    }

    pub fn current_scale(&self) -> f64 {
        self.current_scale
    }

    /// Overwrite the reported scale without touching the matrix.
    pub fn set_current_scale(&mut self, scale: f64) {
        self.current_scale = scale;
    }

    pub fn scale(&mut self, sx: f64, sy: f64) {
        self.matrix = self.matrix.multiply(&AffineTransform::scaling(sx, sy));
        self.current_scale *= sx;
    }

    pub fn rotate(&mut self, radians: f64) {
        self.matrix = self.matrix.multiply(&AffineTransform::rotation(radians));
    }

    pub fn translate(&mut self, dx: f64, dy: f64) {
        self.matrix = self.matrix.multiply(&AffineTransform::translation(dx, dy));
    }

    /// Right-multiply an arbitrary matrix; `m.a` is folded into the
    /// current-scale scalar.
    pub fn compose(&mut self, m: &AffineTransform) {
        self.matrix = self.matrix.multiply(m);
        self.current_scale *= m.a;
        trace!(a = m.a, scale = self.current_scale, "Composed transform");
    }

    /// Replace the coefficients outright. The current-scale scalar still
    /// multiplies in `a`; only [`reset`](Self::reset) reassigns it.
    #[allow(clippy::many_single_char_names)]
    pub fn set(&mut self, a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) {
        self.matrix = AffineTransform { a, b, c, d, e, f };
        self.current_scale *= a;
    }

    /// Back to identity with the scale scalar at exactly 1. Used on image
    /// load; the snapshot stack is left alone.
    pub fn reset(&mut self) {
        self.matrix = AffineTransform::identity();
        self.current_scale = 1.0;
    }

    pub fn save(&mut self) {
        self.saved.push(self.matrix);
    }

    /// Pop-and-replace the current matrix. No-op on an empty stack.
    pub fn restore(&mut self) {
        if let Some(m) = self.saved.pop() {
            self.matrix = m;
        }
    }

    /// Map an image-space point to device space.
    pub fn map_point(&self, p: Point) -> Point {
        self.matrix.apply(p)
    }

    /// Map a device-space point back to image space through the inverse.
    pub fn map_point_inverse(&self, p: Point) -> Result<Point> {
        let inverse = self
            .matrix
            .invert()
            .ok_or_else(|| ViewfinderError::SingularTransform {
                determinant: self.matrix.determinant(),
            })?;
        Ok(inverse.apply(p))
    }
}
