//! Domain coloring: complex value to RGB.
//!
//! Hue follows the phase angle, brightness (and in the two-segment mode,
//! saturation) follows the magnitude. Non-finite values come from
//! singularities and are drawn in [`SENTINEL_COLOR`].

use complexwonder_core::{ColorMode, ColorSettings, Complex};
use std::f64::consts::PI;

/// Color for values that are NaN or infinite.
pub const SENTINEL_COLOR: [f32; 3] = [0.0, 0.0, 0.0];

/// Map a complex value to an RGB triple in [0, 1]³.
pub fn complex_to_rgb(c: Complex, settings: &ColorSettings) -> [f32; 3] {
    if !c.is_finite() {
        return SENTINEL_COLOR;
    }

    let m = c.norm();
    // atan2 is in (-π, π], so hue is in [0, 1]; hue 1 wraps onto sector 0.
    let hue = (c.arg() + PI) / (2.0 * PI);

    let (sat, val) = match settings.mode {
        ColorMode::LogBrightness => (1.0, unit((settings.k * m).ln_1p() / settings.s)),
        ColorMode::TwoSegmentRamp => {
            let t = m.ln_1p() / settings.s;
            if t.is_nan() {
                (1.0, 0.0)
            } else if t < 0.5 {
                (1.0, unit(2.0 * t))
            } else {
                (unit(1.0 - 2.0 * (t - 0.5)), 1.0)
            }
        }
    };

    hsv_to_rgb(hue, sat, val)
}

/// Standard 6-sector HSV to RGB. `hue` is in turns ([0, 1) is one cycle).
pub fn hsv_to_rgb(hue: f64, sat: f64, val: f64) -> [f32; 3] {
    if sat == 0.0 {
        return rgb(val, val, val);
    }
    let h = hue.rem_euclid(1.0) * 6.0;
    let f = h.fract();
    let p = val * (1.0 - sat);
    let q = val * (1.0 - sat * f);
    let t = val * (1.0 - sat * (1.0 - f));
    match h.floor() as usize % 6 {
        0 => rgb(val, t, p),
        1 => rgb(q, val, p),
        2 => rgb(p, val, t),
        3 => rgb(p, q, val),
        4 => rgb(t, p, val),
        _ => rgb(val, p, q),
    }
}

/// Quantize an RGB triple to 8-bit RGBA with full opacity.
pub fn rgb_to_rgba8(color: [f32; 3]) -> [u8; 4] {
    let q = |x: f32| (x.clamp(0.0, 1.0) * 255.0).round() as u8;
    [q(color[0]), q(color[1]), q(color[2]), 255]
}

fn rgb(r: f64, g: f64, b: f64) -> [f32; 3] {
    [r as f32, g as f32, b as f32]
}

/// Clamp to [0, 1], NaN to 0.
fn unit(x: f64) -> f64 {
    if x.is_nan() {
        0.0
    } else {
        x.clamp(0.0, 1.0)
    }
}
