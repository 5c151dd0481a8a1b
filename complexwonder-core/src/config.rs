//! Plot configuration and color settings.
//!
//! This module contains the preset registry used to initialize a session,
//! plus the color mapping settings the colorizer reads.

use crate::parser::{CompileOptions, DEFAULT_MAX_DEPTH};
use crate::tokenizer::TokenizerMode;
use crate::view_state::DEFAULT_SCALE;
use crate::ViewState;
use serde::{Deserialize, Serialize};

/// How magnitude is turned into brightness/saturation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColorMode {
    /// Full saturation, value = clamp(ln(1 + k·m) / s, 0, 1).
    #[default]
    LogBrightness,
    /// t = ln(1 + m) / s. Below 0.5 the value ramps up at full saturation,
    /// above it saturation ramps down at full value (large |f| fades to white).
    TwoSegmentRamp,
}

/// Tunable colorizer parameters.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ColorSettings {
    pub mode: ColorMode,
    /// Magnitude gain inside the logarithm (log-brightness mode only).
    pub k: f64,
    /// Normalizing divisor applied after the logarithm.
    pub s: f64,
}

impl ColorSettings {
    pub const DEFAULT: Self = Self {
        mode: ColorMode::LogBrightness,
        k: 3.0,
        s: 1.5,
    };
}

impl Default for ColorSettings {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Configuration preset for a plotting session.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlotConfig {
    /// Unique identifier
    pub id: &'static str,
    /// Human-readable name for UI display
    pub display_name: &'static str,
    /// Expression installed before the user commits anything
    pub default_expression: &'static str,
    /// Mesh cell edge length in pixels
    pub mesh_unit_px: f64,
    /// Largest mesh a canvas may require; bigger canvases are rejected
    pub max_vertices: u64,
    /// Initial pan offset in pixels
    pub default_pan: (f64, f64),
    /// Initial complex units per pixel
    pub default_scale: f64,
    /// Multiplicative zoom per wheel notch
    pub zoom_step: f64,
    pub color: ColorSettings,
    pub compile: CompileOptions,
}

impl PlotConfig {
    /// Initial view for this preset. Falls back to the centered default if
    /// the preset's values are out of range.
    pub fn default_view(&self) -> ViewState {
        ViewState::new(self.default_pan.0, self.default_pan.1, self.default_scale)
            .unwrap_or_default()
    }
}

/// Room for a 4K canvas at a 2.5 px mesh.
pub const DEFAULT_MAX_VERTICES: u64 = 8_000_000;

/// Default preset: identity function, 5 px mesh, ±4 across an 800 px canvas.
pub static DEFAULT_CONFIG: PlotConfig = PlotConfig {
    id: "default",
    display_name: "Default",
    default_expression: "z",
    mesh_unit_px: 5.0,
    max_vertices: DEFAULT_MAX_VERTICES,
    default_pan: (0.0, 0.0),
    default_scale: DEFAULT_SCALE,
    zoom_step: 1.1,
    color: ColorSettings::DEFAULT,
    compile: CompileOptions {
        tokenizer_mode: TokenizerMode::Lenient,
        max_depth: DEFAULT_MAX_DEPTH,
    },
};

/// Zoomed-out preset with a coarser mesh and the two-segment ramp.
pub static WIDE_CONFIG: PlotConfig = PlotConfig {
    id: "wide",
    display_name: "Wide",
    default_expression: "z",
    mesh_unit_px: 8.0,
    max_vertices: DEFAULT_MAX_VERTICES,
    default_pan: (0.0, 0.0),
    default_scale: 0.05,
    zoom_step: 1.25,
    color: ColorSettings {
        mode: ColorMode::TwoSegmentRamp,
        k: 3.0,
        s: 3.0,
    },
    compile: CompileOptions {
        tokenizer_mode: TokenizerMode::Lenient,
        max_depth: DEFAULT_MAX_DEPTH,
    },
};

pub static PLOT_CONFIGS: &[&PlotConfig] = &[&DEFAULT_CONFIG, &WIDE_CONFIG];

/// Look up a plot configuration by ID.
pub fn get_plot_config(id: &str) -> Option<&'static PlotConfig> {
    PLOT_CONFIGS.iter().copied().find(|c| c.id == id)
}
