use crate::{CanvasSize, Complex, InputError};
use serde::Serialize;

/// Scale used when no config is given: 0.01 complex units per pixel.
pub const DEFAULT_SCALE: f64 = 0.01;

/// Pan/zoom state mapping the canvas onto the complex plane.
///
/// A canvas point at NDC `(x, y)` maps to
/// - `re = (x * half_width + pan_x) * scale`
/// - `im = (y * half_height + pan_y) * scale`
///
/// Pan is measured in pixels and applied before scaling, so dragging moves
/// the window and zooming rescales the window. `scale` is complex units per
/// pixel and is always finite and positive: every mutation validates its
/// input and leaves the state untouched on error.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ViewState {
    pan_x: f64,
    pan_y: f64,
    scale: f64,
}

impl ViewState {
    /// Create a view state, rejecting non-finite pan and non-positive scale.
    pub fn new(pan_x: f64, pan_y: f64, scale: f64) -> Result<Self, InputError> {
        if !pan_x.is_finite() || !pan_y.is_finite() {
            return Err(InputError::NonFiniteOffset { x: pan_x, y: pan_y });
        }
        if !is_valid_scale(scale) {
            return Err(InputError::ScaleOutOfRange { scale });
        }
        Ok(Self {
            pan_x,
            pan_y,
            scale,
        })
    }

    pub fn pan(&self) -> (f64, f64) {
        (self.pan_x, self.pan_y)
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Move the window by (dx, dy) pixels.
    pub fn pan_by(&mut self, dx: f64, dy: f64) -> Result<(), InputError> {
        let (x, y) = (self.pan_x + dx, self.pan_y + dy);
        if !x.is_finite() || !y.is_finite() {
            return Err(InputError::NonFiniteOffset { x: dx, y: dy });
        }
        self.pan_x = x;
        self.pan_y = y;
        Ok(())
    }

    /// Multiply the scale by `factor`. Factors above 1 widen the visible region.
    pub fn zoom_by(&mut self, factor: f64) -> Result<(), InputError> {
        self.scale = self.zoomed_scale(factor)?;
        Ok(())
    }

    /// Zoom by `factor` keeping the complex point under `cursor` fixed.
    ///
    /// `cursor` is the pixel offset from the canvas center, y up
    /// (see [`CanvasSize::center_offset`]).
    pub fn zoom_at(&mut self, factor: f64, cursor: (f64, f64)) -> Result<(), InputError> {
        let (cx, cy) = cursor;
        if !cx.is_finite() || !cy.is_finite() {
            return Err(InputError::NonFiniteOffset { x: cx, y: cy });
        }
        let scale = self.zoomed_scale(factor)?;
        // (c + pan) * s == (c + pan') * s * f  =>  pan' = (c + pan) / f - c
        let pan_x = (cx + self.pan_x) / factor - cx;
        let pan_y = (cy + self.pan_y) / factor - cy;
        if !pan_x.is_finite() || !pan_y.is_finite() {
            return Err(InputError::NonFiniteOffset { x: pan_x, y: pan_y });
        }
        self.pan_x = pan_x;
        self.pan_y = pan_y;
        self.scale = scale;
        Ok(())
    }

    /// Map a normalized device coordinate to the complex plane.
    #[inline]
    pub fn ndc_to_complex(&self, ndc_x: f64, ndc_y: f64, canvas: &CanvasSize) -> Complex {
        Complex::new(
            (ndc_x * canvas.half_width() + self.pan_x) * self.scale,
            (ndc_y * canvas.half_height() + self.pan_y) * self.scale,
        )
    }

    fn zoomed_scale(&self, factor: f64) -> Result<f64, InputError> {
        if !factor.is_finite() || factor <= 0.0 {
            return Err(InputError::InvalidZoomFactor { factor });
        }
        let scale = self.scale * factor;
        if !is_valid_scale(scale) {
            return Err(InputError::ScaleOutOfRange { scale });
        }
        Ok(scale)
    }
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            pan_x: 0.0,
            pan_y: 0.0,
            scale: DEFAULT_SCALE,
        }
    }
}

/// Positive, finite and not subnormal: its reciprocal must stay finite.
fn is_valid_scale(scale: f64) -> bool {
    scale.is_finite() && scale >= f64::MIN_POSITIVE
}
